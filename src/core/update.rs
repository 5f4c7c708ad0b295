use tracing::debug;

use crate::core::{
    Action, ActionResult, Direction, Entity, GameChangeType, GameState, PlayerId, Rejection, TurnSignal, TurnUpdate,
};

/// Resolves one action against the game. Every rejecting branch is decided
/// before the state is touched, so a failed action never mutates anything.
pub fn step(game: &mut GameState, action: Action) -> TurnUpdate {
    let outcome = match &action {
        Action::Invalid(_) => Err(Rejection::InvalidInput),
        Action::Exit => Ok(None),
        Action::Undo => undo(game).map(Some),
        Action::Step(id, dir) => move_player(game, *id, *dir).map(Some),
    };

    let signal = match &action {
        Action::Exit => TurnSignal::Exit,
        _ if game.is_win() => TurnSignal::Won,
        _ => TurnSignal::Continue,
    };

    let update = match outcome {
        Ok(change) => TurnUpdate {
            result: ActionResult::Success(action),
            change,
            signal,
        },
        Err(rejection) => TurnUpdate {
            result: ActionResult::Failed(action, rejection),
            change: None,
            signal,
        },
    };
    let reason = update.result.reason();
    debug!(
        action = %update.result.action(),
        success = update.result.is_success(),
        reason = reason.as_deref(),
        ?signal,
        "resolved turn"
    );
    update
}

fn undo(game: &mut GameState) -> Result<GameChangeType, Rejection> {
    if game.undo_remaining().is_exhausted() {
        return Err(Rejection::OutOfUndoQuota);
    }
    game.undo();
    Ok(GameChangeType::Undo)
}

fn move_player(game: &mut GameState, id: PlayerId, dir: Direction) -> Result<GameChangeType, Rejection> {
    let player = game.player_position(id).ok_or(Rejection::PlayerNotFound)?;
    let next = player + dir;

    match game.entity_at(&next) {
        Some(Entity::Empty) => {
            game.move_entity(player, next);
            Ok(GameChangeType::PlayerMove)
        }
        // Absent cells only appear here on a board that is not closed by walls.
        Some(Entity::Wall) | None => Err(Rejection::HitWall),
        Some(Entity::Player(_)) => Err(Rejection::HitPlayer),
        Some(Entity::Box(owner)) if owner != id => Err(Rejection::ForeignBox),
        Some(Entity::Box(_)) => {
            let beyond = next + dir;
            let Some(Entity::Empty) = game.entity_at(&beyond) else {
                return Err(Rejection::PushBlocked);
            };
            game.move_entity(next, beyond);
            game.move_entity(player, next);
            game.checkpoint();
            Ok(GameChangeType::PlayerAndBoxMove)
        }
    }
}
