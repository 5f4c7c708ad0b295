use std::fmt;
use std::ops::Add;

use crate::core::{
    Action, ActionResult, Direction, Entity, GameChangeType, PlayerId, Position, TurnSignal, TurnUpdate, UndoLimit,
};

impl Position {
    pub const fn new(x: i32, y: i32) -> Position {
        Position { x, y }
    }
}

impl Add<Direction> for Position {
    type Output = Position;

    fn add(self, dir: Direction) -> Position {
        let (dx, dy) = dir.delta();
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Direction {
    /// Rows grow downwards, so `Up` decreases `y`.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

impl PlayerId {
    /// Player for `A`-`Z`, or the owner for a box letter `a`-`z`.
    pub fn from_letter(ch: char) -> Option<PlayerId> {
        match ch {
            'A'..='Z' => Some(PlayerId(ch as u8 - b'A')),
            'a'..='z' => Some(PlayerId(ch as u8 - b'a')),
            _ => None,
        }
    }

    pub fn letter(&self) -> char {
        (b'A' + self.0) as char
    }

    pub fn box_letter(&self) -> char {
        (b'a' + self.0) as char
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Character for a cell in the board text format. An empty cell shows as a
/// destination when it is one.
pub fn entity_char(entity: Option<Entity>, is_destination: bool) -> char {
    match entity {
        None => ' ',
        Some(Entity::Wall) => '#',
        Some(Entity::Player(id)) => id.letter(),
        Some(Entity::Box(owner)) => owner.box_letter(),
        Some(Entity::Empty) => {
            if is_destination {
                '@'
            } else {
                '.'
            }
        }
    }
}

impl UndoLimit {
    /// Remaining quota, or `None` when unlimited.
    pub fn quota(&self) -> Option<u32> {
        match self {
            UndoLimit::Unlimited => None,
            UndoLimit::Limited(n) => Some(*n),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, UndoLimit::Limited(0))
    }

    /// Consumes one undo. Saturates at zero.
    pub fn consume(&mut self) {
        if let UndoLimit::Limited(n) = self {
            *n = n.saturating_sub(1);
        }
    }
}

impl fmt::Display for UndoLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UndoLimit::Unlimited => write!(f, "-1"),
            UndoLimit::Limited(n) => write!(f, "{}", n),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Step(id, dir) => write!(f, "{} {:?}", id, dir),
            Action::Undo => write!(f, "Undo"),
            Action::Exit => write!(f, "Exit"),
            Action::Invalid(raw) => write!(f, "Invalid({})", raw),
        }
    }
}

impl ActionResult {
    pub fn action(&self) -> &Action {
        match self {
            ActionResult::Success(action) | ActionResult::Failed(action, _) => action,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ActionResult::Success(_))
    }

    pub fn reason(&self) -> Option<String> {
        match self {
            ActionResult::Success(_) => None,
            ActionResult::Failed(_, rejection) => Some(rejection.to_string()),
        }
    }
}

/// Player-facing wording for the status line.
impl fmt::Display for GameChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameChangeType::PlayerMove => write!(f, "moved"),
            GameChangeType::PlayerAndBoxMove => write!(f, "pushed a box"),
            GameChangeType::Undo => write!(f, "undone"),
        }
    }
}

impl TurnUpdate {
    pub fn should_stop(&self) -> bool {
        self.signal != TurnSignal::Continue
    }
}
