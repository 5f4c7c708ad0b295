//! Error types for the two failure tiers of the game.
//!
//! [`MalformedMap`] is fatal and only produced while parsing a board.
//! [`Rejection`] is a per-turn refusal: the action is dropped, the state is
//! left untouched and the game carries on.

use thiserror::Error;

use crate::core::{PlayerId, Position};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedMap {
    #[error("map is empty, expected an undo limit on the first line")]
    Empty,

    #[error("undo limit must be -1 or an integer from 0 to {max}, got {0:?}", max = u32::MAX)]
    BadUndoLimit(String),

    #[error("player {0} appears more than once")]
    DuplicatePlayer(PlayerId),

    #[error("there are no players in the map")]
    NoPlayers,

    #[error("number of boxes ({boxes}) is not equal to number of box destinations ({destinations})")]
    BoxDestinationMismatch { boxes: usize, destinations: usize },

    #[error("player {0} has no matching box")]
    PlayerWithoutBox(PlayerId),

    #[error("box {} has no matching player", .0.box_letter())]
    BoxWithoutPlayer(PlayerId),

    #[error("unexpected character {ch:?} at {at}")]
    UnexpectedCharacter { ch: char, at: Position },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Invalid Input.")]
    InvalidInput,

    #[error("You have run out of your undo quota.")]
    OutOfUndoQuota,

    #[error("Player not found.")]
    PlayerNotFound,

    #[error("You hit a wall.")]
    HitWall,

    #[error("You hit another player.")]
    HitPlayer,

    #[error("You cannot move other players' boxes.")]
    ForeignBox,

    #[error("Failed to push the box.")]
    PushBlocked,
}
