use serde::Serialize;
use std::io::Write;

use crate::core::{Action, GameChangeType, TurnSignal, TurnUpdate};

/// A played game, turn by turn, for export as JSON.
#[derive(Serialize, Debug, Default)]
pub struct Transcript {
    pub board: String,
    pub turns: Vec<TurnRecord>,
    pub won: bool,
}

#[derive(Serialize, Debug)]
pub struct TurnRecord {
    pub turn: usize,
    pub action: Action,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<GameChangeType>,
    pub signal: TurnSignal,
    pub undo_quota: Option<u32>,
}

impl Transcript {
    pub fn new(board: String) -> Self {
        Transcript {
            board,
            ..Default::default()
        }
    }

    pub fn record(&mut self, update: &TurnUpdate, undo_quota: Option<u32>) {
        self.turns.push(TurnRecord {
            turn: self.turns.len() + 1,
            action: update.result.action().clone(),
            success: update.result.is_success(),
            reason: update.result.reason(),
            change: update.change,
            signal: update.signal,
            undo_quota,
        });
        if update.signal == TurnSignal::Won {
            self.won = true;
        }
    }

    pub fn write_json<W: Write>(&self, writer: W) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(writer, self)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::{step, BoardMap, Direction, GameState, PlayerId};
    use std::rc::Rc;

    #[test]
    fn records_turns_as_json() {
        let board = Rc::new(BoardMap::parse("0\n####\n#Aa@#\n####").unwrap());
        let mut game = GameState::new(board.clone());
        let mut transcript = Transcript::new(board.to_string());

        for action in [Action::Invalid("x".to_string()), Action::Step(PlayerId(0), Direction::Right)] {
            let update = step(&mut game, action);
            transcript.record(&update, game.undo_quota());
        }

        let mut out = Vec::new();
        transcript.write_json(&mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(json["won"], true);
        assert_eq!(json["turns"].as_array().unwrap().len(), 2);
        assert_eq!(json["turns"][0]["success"], false);
        assert_eq!(json["turns"][0]["reason"], "Invalid Input.");
        assert_eq!(json["turns"][1]["change"], "PlayerAndBoxMove");
        assert_eq!(json["turns"][1]["signal"], "Won");
        assert_eq!(json["turns"][1]["action"]["Step"][1], "Right");
        assert_eq!(json["turns"][1]["undo_quota"], 0);
    }
}
