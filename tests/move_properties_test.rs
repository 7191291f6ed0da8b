//! Property tests over random games.

use elemental_tiles::{
    BoardInvariants, Direction, GameConfig, GameManager, InvariantSet, MemoryStore, MoveEngine,
    RecordingActuator,
};
use proptest::prelude::*;

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

fn new_game(seed: u64) -> GameManager<MemoryStore, RecordingActuator> {
    let config = GameConfig::new().with_seed(seed).with_deck_quota(1);
    GameManager::new(config, MemoryStore::new(), RecordingActuator::new())
        .expect("Setup failed")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: score never drops and grows by exactly the merge points of each move.
    #[test]
    fn prop_score_accounts_for_merges(
        seed in any::<u64>(),
        moves in prop::collection::vec(direction(), 1..80),
    ) {
        let mut game = new_game(seed);
        for direction in moves {
            let before = game.state().score();
            let report = game.make_move(direction).expect("Move failed");
            prop_assert!(game.state().score() >= before);
            prop_assert_eq!(game.state().score(), before + report.points);
        }
    }

    /// Property: tiles stay inside the grid, in sync with their cells, and the deck stays stocked.
    #[test]
    fn prop_board_invariants_hold(
        seed in any::<u64>(),
        moves in prop::collection::vec(direction(), 1..80),
    ) {
        let mut game = new_game(seed);
        for direction in moves {
            game.make_move(direction).expect("Move failed");
            let state = game.state();
            prop_assert!(BoardInvariants::check_all(state).is_ok());
            prop_assert!(!state.deck().is_empty());
            prop_assert!(state.grid().tile_count() <= 16);
        }
    }

    /// Property: with no moves available, no direction changes the board and the game ends.
    #[test]
    fn prop_no_moves_means_over(
        seed in any::<u64>(),
        moves in prop::collection::vec(direction(), 1..200),
    ) {
        let mut game = new_game(seed);
        for direction in moves {
            if !game.moves_available() {
                let engine = MoveEngine::default();
                for stuck in Direction::ALL {
                    let mut grid = game.state().grid().clone();
                    let report = engine.execute(&mut grid, stuck);
                    prop_assert!(!report.moved);
                    prop_assert_eq!(&grid, game.state().grid());
                }

                let before = game.state().clone();
                let report = game.make_move(direction).expect("Move failed");
                prop_assert!(!report.moved);
                prop_assert_eq!(game.state().grid(), before.grid());
                prop_assert!(game.state().over());
                break;
            }
            game.make_move(direction).expect("Move failed");
        }
    }

    /// Property: a move that changes the board spawns exactly one tile per merge-adjusted count.
    #[test]
    fn prop_moves_spawn_one_tile(
        seed in any::<u64>(),
        moves in prop::collection::vec(direction(), 1..40),
    ) {
        let mut game = new_game(seed);
        for direction in moves {
            if game.is_terminated() {
                break;
            }
            let before = game.state().grid().tile_count();
            let report = game.make_move(direction).expect("Move failed");
            let after = game.state().grid().tile_count();
            if report.moved {
                prop_assert_eq!(after, before - report.merges + 1);
            } else {
                prop_assert_eq!(after, before);
            }
        }
    }
}
