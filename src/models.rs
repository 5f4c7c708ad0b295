use crate::core::{GameChangeType, GameState};

pub struct GameRenderState<'a> {
    pub game: &'a GameState,
    pub won: bool,
    pub error: Option<String>,
    pub last_change: Option<GameChangeType>,
}
