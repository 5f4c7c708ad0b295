use serde::{Deserialize, Serialize};

use crate::core::Rejection;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// 0-based player id; player `A` is 0 and owns the `a` boxes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// What occupies a cell on the board. Cells outside the irregular board
/// shape are absent, which is modelled as `None` rather than a variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Entity {
    Empty,
    Wall,
    Player(PlayerId),
    Box(PlayerId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UndoLimit {
    Unlimited,
    Limited(u32),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Step(PlayerId, Direction),
    Undo,
    Exit,
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionResult {
    Success(Action),
    Failed(Action, Rejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GameChangeType {
    PlayerMove,
    PlayerAndBoxMove,
    Undo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TurnSignal {
    Continue,
    Exit,
    Won,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnUpdate {
    pub result: ActionResult,
    pub change: Option<GameChangeType>,
    pub signal: TurnSignal,
}
