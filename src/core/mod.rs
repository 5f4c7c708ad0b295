mod board;
mod bounded_grid;
mod bounds;
mod errors;
mod game_state;
mod model_helpers;
mod models;
mod update;

pub use board::BoardMap;
pub use errors::{MalformedMap, Rejection};
pub use game_state::GameState;
pub use model_helpers::entity_char;
pub use models::{
    Action, ActionResult, Direction, Entity, GameChangeType, PlayerId, Position, TurnSignal, TurnUpdate, UndoLimit,
};
pub use update::step;
