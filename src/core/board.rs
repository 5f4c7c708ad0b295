//! The immutable board a game is played on.
//!
//! Text format: the first line is the undo limit (`-1` unlimited, `0` no
//! undo, `n` a budget of n). Every following line is a board row:
//!
//! | char    | meaning                                  |
//! |---------|------------------------------------------|
//! | `#`     | wall                                     |
//! | `@`     | empty box destination                    |
//! | `A`-`Z` | player                                   |
//! | `a`-`z` | box owned by the player with that letter |
//! | `.`     | empty floor                              |
//! | space   | absent cell, outside the playable area   |
//!
//! Short rows are padded with absent cells up to the widest row. Trailing
//! whitespace on a row is not part of the board.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::core::bounded_grid::BoundedGrid;
use crate::core::bounds::BoundsOriginRoot;
use crate::core::model_helpers::entity_char;
use crate::core::{Entity, MalformedMap, PlayerId, Position, UndoLimit};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardMap {
    entities: BoundedGrid<Option<Entity>>,
    destinations: HashSet<Position>,
    undo_limit: UndoLimit,
    player_ids: BTreeSet<PlayerId>,
    box_count: usize,
}

impl BoardMap {
    pub fn parse(text: &str) -> Result<BoardMap, MalformedMap> {
        let mut lines = text.lines().map(str::trim_end);
        let undo_line = lines.next().ok_or(MalformedMap::Empty)?;
        let undo_limit = parse_undo_limit(undo_line)?;

        let mut rows: Vec<&str> = lines.collect();
        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }

        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let bounds = BoundsOriginRoot::new(width as i32, rows.len() as i32);
        let mut entities = BoundedGrid::new(bounds, None);
        let mut destinations = HashSet::new();
        let mut player_ids = BTreeSet::new();
        let mut box_owners: BTreeMap<PlayerId, usize> = BTreeMap::new();

        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let pos = Position::new(x as i32, y as i32);
                let entity = match ch {
                    '#' => Some(Entity::Wall),
                    '.' => Some(Entity::Empty),
                    ' ' => None,
                    '@' => {
                        destinations.insert(pos);
                        Some(Entity::Empty)
                    }
                    _ => match PlayerId::from_letter(ch) {
                        Some(id) if ch.is_ascii_uppercase() => {
                            if !player_ids.insert(id) {
                                return Err(MalformedMap::DuplicatePlayer(id));
                            }
                            Some(Entity::Player(id))
                        }
                        Some(owner) => {
                            *box_owners.entry(owner).or_default() += 1;
                            Some(Entity::Box(owner))
                        }
                        None => return Err(MalformedMap::UnexpectedCharacter { ch, at: pos }),
                    },
                };
                entities[&pos] = entity;
            }
        }

        if player_ids.is_empty() {
            return Err(MalformedMap::NoPlayers);
        }

        let box_count: usize = box_owners.values().sum();
        if box_count != destinations.len() {
            return Err(MalformedMap::BoxDestinationMismatch {
                boxes: box_count,
                destinations: destinations.len(),
            });
        }

        if let Some(&id) = player_ids.iter().find(|id| !box_owners.contains_key(id)) {
            return Err(MalformedMap::PlayerWithoutBox(id));
        }
        if let Some(&owner) = box_owners.keys().find(|owner| !player_ids.contains(owner)) {
            return Err(MalformedMap::BoxWithoutPlayer(owner));
        }

        debug!(
            width,
            height = rows.len(),
            players = player_ids.len(),
            boxes = box_count,
            "parsed board"
        );

        Ok(BoardMap {
            entities,
            destinations,
            undo_limit,
            player_ids,
            box_count,
        })
    }

    pub fn width(&self) -> i32 {
        self.entities.size().width()
    }

    pub fn height(&self) -> i32 {
        self.entities.size().height()
    }

    pub fn destinations(&self) -> &HashSet<Position> {
        &self.destinations
    }

    pub fn is_destination(&self, pos: &Position) -> bool {
        self.destinations.contains(pos)
    }

    pub fn undo_limit(&self) -> UndoLimit {
        self.undo_limit
    }

    /// Entity at `pos` in the layout the board was parsed with.
    pub fn initial_entity_at(&self, pos: &Position) -> Option<Entity> {
        self.entities.get(pos).copied().flatten()
    }

    pub(crate) fn initial_entities(&self) -> &BoundedGrid<Option<Entity>> {
        &self.entities
    }

    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.player_ids.iter().copied()
    }

    pub fn player_count(&self) -> usize {
        self.player_ids.len()
    }

    pub fn box_count(&self) -> usize {
        self.box_count
    }
}

fn parse_undo_limit(line: &str) -> Result<UndoLimit, MalformedMap> {
    let token = line.trim();
    match token.parse::<i64>() {
        Ok(-1) => Ok(UndoLimit::Unlimited),
        Ok(n) => u32::try_from(n)
            .map(UndoLimit::Limited)
            .map_err(|_| MalformedMap::BadUndoLimit(token.to_string())),
        Err(_) => Err(MalformedMap::BadUndoLimit(token.to_string())),
    }
}

impl FromStr for BoardMap {
    type Err = MalformedMap;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BoardMap::parse(s)
    }
}

/// Writes the board back in its text format, trailing absent cells trimmed.
impl fmt::Display for BoardMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.undo_limit)?;
        for y in 0..self.height() {
            let mut row = String::with_capacity(self.width() as usize);
            for x in 0..self.width() {
                let pos = Position::new(x, y);
                row.push(entity_char(self.initial_entity_at(&pos), self.is_destination(&pos)));
            }
            writeln!(f, "{}", row.trim_end())?;
        }
        Ok(())
    }
}
