#[cfg(test)]
mod test {
    use std::rc::Rc;

    use crate::core::GameState;
    use crate::{load_board, DEFAULT_LEVEL, MAX_TERMINAL_PLAYERS};

    const BUNDLED_MAPS: [(&str, &str); 3] = [
        ("corridor", include_str!("../../maps/corridor.map")),
        ("crossing", include_str!("../../maps/crossing.map")),
        ("duel", include_str!("../../maps/duel.map")),
    ];

    #[test]
    fn default_level_loads() {
        let board = load_board(DEFAULT_LEVEL).unwrap();
        assert_eq!(board.player_count(), 2);
        assert!(!GameState::new(Rc::new(board)).is_win());
    }

    #[test]
    fn bundled_maps_load() {
        for (name, text) in BUNDLED_MAPS {
            let board = load_board(text).unwrap_or_else(|err| panic!("{}: {:#}", name, err));
            assert!(board.player_count() <= MAX_TERMINAL_PLAYERS, "{}", name);
        }
    }

    #[test]
    fn three_players_are_refused() {
        let err = load_board("-1\n#Aa@Bb@Cc@#").unwrap_err();
        assert_eq!(
            err.to_string(),
            "there cannot be more than 2 players in a terminal game, map has 3"
        );
    }

    #[test]
    fn malformed_map_keeps_its_reason() {
        let err = load_board("-1\n#.@.#").unwrap_err();
        assert_eq!(format!("{:#}", err), "invalid map: there are no players in the map");
    }
}
