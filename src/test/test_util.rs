use std::rc::Rc;

pub use dissimilar::diff as __diff;
use crate::console_interface::render_game_to_string;
use crate::core::*;

#[macro_export]
macro_rules! assert_eq_text {
    ($left:expr, $right:expr) => {
        assert_eq_text!($left, $right,)
    };
    ($left:expr, $right:expr, $($tt:tt)*) => {{
        let left = $left;
        let right = $right;
        if left != right {
            if left.trim() == right.trim() {
                std::eprintln!("Left:\n{:?}\n\nRight:\n{:?}\n\nWhitespace difference\n", left, right);
            } else {
                let diff = $crate::test::test_util::__diff(left, right);
                std::eprintln!("Left:\n{}\n\nRight:\n{}\n\nDiff:\n{}\n", left, right, $crate::test::test_util::format_diff(diff));
            }
            std::eprintln!($($tt)*);
            panic!("text differs");
        }
    }};
}

pub fn format_diff(chunks: Vec<dissimilar::Chunk>) -> String {
    let mut buf = String::new();
    for chunk in chunks {
        let formatted = match chunk {
            dissimilar::Chunk::Equal(text) => text.into(),
            dissimilar::Chunk::Delete(text) => format!("\x1b[41m{}\x1b[0m", text),
            dissimilar::Chunk::Insert(text) => format!("\x1b[42m{}\x1b[0m", text),
        };
        buf.push_str(&formatted);
    }
    buf
}

/// Levels in tests are written as map files: undo limit on the first line,
/// then the rows. Surrounding blank lines are dropped.
pub struct GameTestState {
    pub game: GameState,
}

impl GameTestState {
    pub fn new(level: &str) -> Self {
        let board = BoardMap::parse(level.trim_start_matches('\n'))
            .unwrap_or_else(|err| panic!("bad test level: {}\n{}", err, level));
        Self { game: GameState::new(Rc::new(board)) }
    }

    pub fn game_to_string(&self) -> String {
        render_game_to_string(&self.game).trim_matches('\n').into()
    }

    pub fn assert_move(&mut self, player: char, direction: Direction) -> TurnUpdate {
        self.assert_step(step_action(player, direction))
    }

    pub fn assert_moves(&mut self, player: char, directions: &[Direction]) {
        for &dir in directions {
            self.assert_move(player, dir);
        }
    }

    pub fn assert_step(&mut self, action: Action) -> TurnUpdate {
        let update = step(&mut self.game, action);
        let ActionResult::Success(_) = &update.result else {
            panic!("Expected success, got {:?}, in map\n{}", update, self.game_to_string());
        };
        update
    }

    /// Expects `action` to be rejected with `rejection` and to leave the
    /// board exactly as it was.
    pub fn assert_rejected(&mut self, action: Action, rejection: Rejection) -> TurnUpdate {
        let before = self.game_to_string();
        let checkpoints = self.game.checkpoint_count();
        let quota = self.game.undo_quota();

        let update = step(&mut self.game, action);
        match &update.result {
            ActionResult::Failed(_, actual) => assert_eq!(*actual, rejection),
            ActionResult::Success(_) => panic!("Expected {:?}, got {:?}", rejection, update),
        }
        assert_eq!(update.change, None);
        let after = self.game_to_string();
        assert_eq_text!(before.as_str(), after.as_str(), "rejected action changed the board");
        assert_eq!(self.game.checkpoint_count(), checkpoints);
        assert_eq!(self.game.undo_quota(), quota);
        update
    }

    pub fn try_step(&mut self, action: Action) -> TurnUpdate {
        step(&mut self.game, action)
    }

    /// `expected` is rows only, without the undo limit line.
    pub fn assert_matches(&self, expected: &str) {
        let actual = self.game_to_string();
        assert_eq_text!(expected.trim_matches('\n'), actual.as_str().trim_matches('\n'));
    }
}

pub fn step_action(player: char, direction: Direction) -> Action {
    assert!(player.is_ascii_uppercase(), "players are upper-case letters");
    let id = PlayerId::from_letter(player).expect("player letter");
    Action::Step(id, direction)
}
