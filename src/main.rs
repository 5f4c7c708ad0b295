// Two-player terminal Sokoban.
// Player A: W/A/S/D or arrow keys. Player B: H/J/K/L. U undoes, Q quits.
// Map tiles: '#' wall, '@' destination, 'A'-'Z' player, 'a'-'z' that player's box, '.' floor.

mod console_interface;
mod core;
mod models;
mod transcript;
#[cfg(test)]
mod test;

use crate::console_interface::{cleanup_terminal, handle_input, render_game, setup_terminal, ConsoleInput};
use crate::core::{step, BoardMap, GameState, TurnSignal};
use crate::models::GameRenderState;
use crate::transcript::Transcript;
use anyhow::{bail, Context, Result};
use clap::Parser;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// The terminal only has keys for two players.
const MAX_TERMINAL_PLAYERS: usize = 2;

const DEFAULT_LEVEL: &str = r#"-1
  ########
###......#
#.A.a##..#
#..#..b.@#
#.B.@#...#
#######..#
      ####
"#;

#[derive(Parser)]
#[command(name = "multi-sokoban")]
#[command(about = "Multi-player Sokoban in the terminal", long_about = None)]
struct Args {
    /// Path to a map file; the first line is the undo limit
    #[arg(value_name = "MAP")]
    map: Option<PathBuf>,

    /// File that receives the log output
    #[arg(long, default_value = "multi-sokoban.log")]
    log_file: PathBuf,

    /// Write the played turns to this file as JSON when the game ends
    #[arg(long, value_name = "PATH")]
    transcript: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = setup_logging(&args.log_file)?;

    let level = match &args.map {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading map {}", path.display()))?,
        None => DEFAULT_LEVEL.to_string(),
    };
    let board = Rc::new(load_board(&level)?);
    info!(
        map = ?args.map,
        width = board.width(),
        height = board.height(),
        players = ?board.player_ids().collect::<Vec<_>>(),
        boxes = board.box_count(),
        "starting game"
    );

    let mut transcript = Transcript::new(board.to_string());
    let game = GameState::new(board);

    let mut terminal = setup_terminal()?;
    let outcome = run_interactive(game, &mut terminal, &mut transcript);
    cleanup_terminal()?;
    let won = outcome?;

    println!("Game exits.");
    if won {
        println!("You win.");
    }
    info!(won, turns = transcript.turns.len(), "game over");

    if let Some(path) = &args.transcript {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating transcript {}", path.display()))?;
        transcript.write_json(io::BufWriter::new(file))?;
        info!(path = %path.display(), "wrote transcript");
    }

    Ok(())
}

/// Parses a map for the terminal game, which has keys for two players only.
fn load_board(text: &str) -> Result<BoardMap> {
    let board: BoardMap = text.parse().context("invalid map")?;
    if board.player_count() > MAX_TERMINAL_PLAYERS {
        bail!(
            "there cannot be more than {} players in a terminal game, map has {}",
            MAX_TERMINAL_PLAYERS,
            board.player_count()
        );
    }
    Ok(board)
}

/// The terminal belongs to the game, so logs go to a file. `RUST_LOG`
/// overrides the default `info` level.
fn setup_logging(log_file: &Path) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let directory = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = log_file
        .file_name()
        .context("log file path has no file name")?;
    std::fs::create_dir_all(&directory)
        .with_context(|| format!("creating log directory {}", directory.display()))?;

    let file_appender = tracing_appender::rolling::never(&directory, file_name);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Plays until a player exits or the board is solved. Returns whether the
/// game was won.
fn run_interactive(
    mut game: GameState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    transcript: &mut Transcript,
) -> Result<bool> {
    render_game(terminal, &GameRenderState {
        game: &game,
        won: false,
        error: None,
        last_change: None,
    })?;

    loop {
        let action = match handle_input()? {
            ConsoleInput::Action(action) => action,
            ConsoleInput::Timeout => continue,
        };

        let update = step(&mut game, action);
        transcript.record(&update, game.undo_quota());

        let won = update.signal == TurnSignal::Won;
        render_game(terminal, &GameRenderState {
            game: &game,
            won,
            error: update.result.reason(),
            last_change: update.change,
        })?;

        if update.should_stop() {
            if won {
                // Keep the win screen up until a key is pressed
                while let ConsoleInput::Timeout = handle_input()? {}
            }
            return Ok(won);
        }
    }
}

