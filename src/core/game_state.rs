use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use bimap::BiMap;
use tracing::{trace, warn};

use crate::core::bounded_grid::BoundedGrid;
use crate::core::{BoardMap, Entity, PlayerId, Position, UndoLimit};

/// Player and box positions recorded after a successful push.
#[derive(Clone, Debug)]
struct Checkpoint {
    players: BiMap<PlayerId, Position>,
    boxes: HashMap<Position, PlayerId>,
}

/// A running game. The board is shared and never modified; everything that
/// changes while playing lives here.
///
/// `players` and `boxes` are caches of what `grid` holds and are updated on
/// every mutation.
#[derive(Clone, Debug)]
pub struct GameState {
    board: Rc<BoardMap>,
    grid: BoundedGrid<Option<Entity>>,
    players: BiMap<PlayerId, Position>,
    boxes: HashMap<Position, PlayerId>,
    undo_remaining: UndoLimit,
    checkpoints: Vec<Checkpoint>,
}

impl GameState {
    pub fn new(board: Rc<BoardMap>) -> GameState {
        let grid = board.initial_entities().clone();
        let undo_remaining = board.undo_limit();
        let mut state = GameState {
            board,
            grid,
            players: BiMap::new(),
            boxes: HashMap::new(),
            undo_remaining,
            checkpoints: Vec::new(),
        };
        state.rebuild_positions();
        state
    }

    pub fn board(&self) -> &BoardMap {
        &self.board
    }

    pub fn width(&self) -> i32 {
        self.board.width()
    }

    pub fn height(&self) -> i32 {
        self.board.height()
    }

    /// Current occupant of `pos`; `None` for absent or out of bounds cells.
    pub fn entity_at(&self, pos: &Position) -> Option<Entity> {
        self.grid.get(pos).copied().flatten()
    }

    pub fn destinations(&self) -> &HashSet<Position> {
        self.board.destinations()
    }

    /// Undo actions left, or `None` when undo is unlimited.
    pub fn undo_quota(&self) -> Option<u32> {
        self.undo_remaining.quota()
    }

    pub fn undo_remaining(&self) -> UndoLimit {
        self.undo_remaining
    }

    pub fn player_position(&self, id: PlayerId) -> Option<Position> {
        self.players.get_by_left(&id).copied()
    }

    pub fn player_positions(&self) -> &BiMap<PlayerId, Position> {
        &self.players
    }

    pub fn box_positions(&self) -> &HashMap<Position, PlayerId> {
        &self.boxes
    }

    pub fn checkpoint_count(&self) -> usize {
        self.checkpoints.len()
    }

    /// True when every box sits on a destination. Box and destination counts
    /// are equal from parsing onwards and boxes are never created or
    /// destroyed, so checking containment is enough.
    pub fn is_win(&self) -> bool {
        self.boxes.keys().all(|pos| self.board.is_destination(pos))
    }

    /// Relocates whatever is at `from` into `to`, putting the previous
    /// occupant of `to` at `from`. No rule checks happen here.
    pub fn move_entity(&mut self, from: Position, to: Position) {
        if !self.grid.contains(&from) || !self.grid.contains(&to) {
            warn!(%from, %to, "ignoring move outside the board");
            return;
        }
        if from == to {
            return;
        }

        let moving = self.grid[&from];
        let displaced = self.grid[&to];
        self.grid.swap(&from, &to);

        // Clear both old box keys before reinserting either.
        if let Some(Entity::Box(_)) = moving {
            self.boxes.remove(&from);
        }
        if let Some(Entity::Box(_)) = displaced {
            self.boxes.remove(&to);
        }

        for (entity, new_pos) in [(moving, to), (displaced, from)] {
            match entity {
                Some(Entity::Player(id)) => {
                    self.players.insert(id, new_pos);
                }
                Some(Entity::Box(owner)) => {
                    self.boxes.insert(new_pos, owner);
                }
                Some(Entity::Empty) | Some(Entity::Wall) | None => {}
            }
        }
        trace!(%from, %to, ?moving, "moved entity");
    }

    /// Records the current player and box positions as an undo point.
    pub fn checkpoint(&mut self) {
        self.checkpoints.push(Checkpoint {
            players: self.players.clone(),
            boxes: self.boxes.clone(),
        });
    }

    /// Reverts to the checkpoint before the most recent one, or to the
    /// initial layout when none is left. The caller checks the quota.
    pub fn undo(&mut self) {
        self.undo_remaining.consume();
        self.checkpoints.pop();

        match self.checkpoints.last() {
            None => {
                self.grid = self.board.initial_entities().clone();
            }
            Some(checkpoint) => {
                let occupied = self.players.right_values().chain(self.boxes.keys());
                for pos in occupied {
                    self.grid[pos] = Some(Entity::Empty);
                }
                for (&id, pos) in checkpoint.players.iter() {
                    self.grid[pos] = Some(Entity::Player(id));
                }
                for (pos, &owner) in checkpoint.boxes.iter() {
                    self.grid[pos] = Some(Entity::Box(owner));
                }
            }
        }

        self.rebuild_positions();
    }

    fn rebuild_positions(&mut self) {
        self.players.clear();
        self.boxes.clear();
        for (pos, cell) in self.grid.iter() {
            match cell {
                Some(Entity::Player(id)) => {
                    self.players.insert(*id, pos);
                }
                Some(Entity::Box(owner)) => {
                    self.boxes.insert(pos, *owner);
                }
                _ => {}
            }
        }
    }
}
