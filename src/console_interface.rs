use crate::core::{entity_char, Action, Direction, GameState, PlayerId, Position};
use crate::models::GameRenderState;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};
use std::io;
use tracing::warn;

const CONTROLS: &str = "A: WASD/Arrows | B: HJKL | U: undo | Q: quit";

/// Raw mode is switched back off if any later step fails.
pub fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    crossterm::terminal::enable_raw_mode()?;
    let terminal = crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)
        .and_then(|()| Terminal::new(CrosstermBackend::new(io::stdout())));
    restore_on_err(terminal, cleanup_terminal)
}

/// Runs `restore` when `result` failed. The original error is kept.
fn restore_on_err<T>(result: io::Result<T>, restore: impl FnOnce() -> io::Result<()>) -> io::Result<T> {
    if result.is_err() {
        if let Err(err) = restore() {
            warn!(%err, "failed to restore the terminal");
        }
    }
    result
}

pub fn cleanup_terminal() -> io::Result<()> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    Ok(())
}

pub fn render_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &GameRenderState,
) -> io::Result<()> {
    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3), Constraint::Length(3)])
            .split(f.area());

        let game_text = render_game_to_string(state.game);
        let game_paragraph = Paragraph::new(game_text)
            .block(Block::default().borders(Borders::ALL).title("Sokoban"))
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(game_paragraph, chunks[0]);

        let status_paragraph = Paragraph::new(status_text(state))
            .block(Block::default().borders(Borders::ALL).title("Status"))
            .style(Style::default().fg(if state.error.is_some() { Color::Yellow } else { Color::Cyan }))
            .alignment(Alignment::Center);
        f.render_widget(status_paragraph, chunks[1]);

        let controls_paragraph = Paragraph::new(CONTROLS)
            .block(Block::default().borders(Borders::ALL).title("Controls"))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        f.render_widget(controls_paragraph, chunks[2]);
    })?;
    Ok(())
}

pub fn status_text(state: &GameRenderState) -> String {
    let status = if state.won {
        "You win! Press any key to quit.".to_string()
    } else {
        format!("{} | {}", undo_quota_text(state.game), progress_text(state.game))
    };
    match (&state.error, &state.last_change) {
        (Some(err), _) => format!("{} | {}", status, err),
        (None, Some(change_type)) => format!("{} | Last: {}", status, change_type),
        (None, None) => status,
    }
}

pub fn undo_quota_text(game: &GameState) -> String {
    match game.undo_quota() {
        Some(quota) => format!("Undo Quota: {}", quota),
        None => "Unlimited".to_string(),
    }
}

pub fn progress_text(game: &GameState) -> String {
    let placed = game
        .box_positions()
        .keys()
        .filter(|pos| game.destinations().contains(pos))
        .count();
    format!(
        "Boxes placed: {}/{} | Checkpoints: {}",
        placed,
        game.board().box_count(),
        game.checkpoint_count()
    )
}

/// Draws the live board in the same characters the map files use.
pub fn render_game_to_string(game: &GameState) -> String {
    let mut result = String::new();
    for y in 0..game.height() {
        for x in 0..game.width() {
            let pos = Position::new(x, y);
            result.push(entity_char(game.entity_at(&pos), game.destinations().contains(&pos)));
        }
        result.push('\n');
    }
    result
}

pub enum ConsoleInput {
    Action(Action),
    Timeout,
}

pub fn handle_input() -> io::Result<ConsoleInput> {
    if event::poll(std::time::Duration::from_millis(50))? {
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            return Ok(ConsoleInput::Action(action_from_key(code)));
        }
    }
    Ok(ConsoleInput::Timeout)
}

/// Player A walks with WASD or the arrow keys, player B with HJKL.
pub fn action_from_key(code: KeyCode) -> Action {
    const A: PlayerId = PlayerId(0);
    const B: PlayerId = PlayerId(1);

    let key = match code {
        KeyCode::Esc => return Action::Exit,
        KeyCode::Up => return Action::Step(A, Direction::Up),
        KeyCode::Down => return Action::Step(A, Direction::Down),
        KeyCode::Left => return Action::Step(A, Direction::Left),
        KeyCode::Right => return Action::Step(A, Direction::Right),
        KeyCode::Char(ch) => ch.to_ascii_lowercase(),
        other => return Action::Invalid(format!("{:?}", other)),
    };

    match key {
        'q' => Action::Exit,
        'u' => Action::Undo,
        'w' => Action::Step(A, Direction::Up),
        'a' => Action::Step(A, Direction::Left),
        's' => Action::Step(A, Direction::Down),
        'd' => Action::Step(A, Direction::Right),
        'k' => Action::Step(B, Direction::Up),
        'h' => Action::Step(B, Direction::Left),
        'j' => Action::Step(B, Direction::Down),
        'l' => Action::Step(B, Direction::Right),
        other => Action::Invalid(other.to_string()),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::GameChangeType;

    #[test]
    fn keys_map_to_both_players() {
        assert_eq!(action_from_key(KeyCode::Char('W')), Action::Step(PlayerId(0), Direction::Up));
        assert_eq!(action_from_key(KeyCode::Left), Action::Step(PlayerId(0), Direction::Left));
        assert_eq!(action_from_key(KeyCode::Char('j')), Action::Step(PlayerId(1), Direction::Down));
        assert_eq!(action_from_key(KeyCode::Char('L')), Action::Step(PlayerId(1), Direction::Right));
    }

    #[test]
    fn control_keys() {
        assert_eq!(action_from_key(KeyCode::Char('u')), Action::Undo);
        assert_eq!(action_from_key(KeyCode::Char('q')), Action::Exit);
        assert_eq!(action_from_key(KeyCode::Esc), Action::Exit);
    }

    #[test]
    fn failed_setup_restores_the_terminal() {
        let restored = std::cell::Cell::new(false);
        let result: io::Result<()> = restore_on_err(Err(io::Error::other("no tty")), || {
            restored.set(true);
            Ok(())
        });

        assert!(restored.get());
        assert_eq!(result.unwrap_err().to_string(), "no tty");
    }

    #[test]
    fn successful_setup_keeps_the_terminal() {
        let restored = std::cell::Cell::new(false);
        let result = restore_on_err(Ok(7), || {
            restored.set(true);
            Ok(())
        });

        assert!(!restored.get());
        assert_eq!(result.unwrap(), 7);
    }

    #[test]
    fn status_line_describes_the_last_change() {
        let board = crate::core::BoardMap::parse("2\n#A.a@#").unwrap();
        let game = GameState::new(std::rc::Rc::new(board));
        let mut state = GameRenderState {
            game: &game,
            won: false,
            error: None,
            last_change: None,
        };
        assert_eq!(status_text(&state), "Undo Quota: 2 | Boxes placed: 0/1 | Checkpoints: 0");

        state.last_change = Some(GameChangeType::PlayerAndBoxMove);
        assert_eq!(
            status_text(&state),
            "Undo Quota: 2 | Boxes placed: 0/1 | Checkpoints: 0 | Last: pushed a box"
        );

        state.last_change = Some(GameChangeType::Undo);
        assert!(status_text(&state).ends_with("| Last: undone"));

        state.error = Some("You hit a wall.".to_string());
        assert!(status_text(&state).ends_with("| You hit a wall."));
        assert!(!status_text(&state).contains("Last:"));
    }

    #[test]
    fn unknown_keys_are_invalid() {
        assert_eq!(action_from_key(KeyCode::Char('x')), Action::Invalid("x".to_string()));
        assert!(matches!(action_from_key(KeyCode::Tab), Action::Invalid(_)));
    }
}
