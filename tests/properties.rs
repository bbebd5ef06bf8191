use lifedeath::board::PieceKind;
use lifedeath::engine::{Engine, Phase};
use lifedeath::movegen::possible_actions;
use lifedeath::playout::{check_invariants, random_playout};
use lifedeath::protocol::{encode_position, parse_position};
use lifedeath::RulesConfig;
use proptest::prelude::*;

fn rules() -> impl Strategy<Value = RulesConfig> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(both, heal, defer)| RulesConfig {
        special_action_uses_both_slots: both,
        heal_grants_immunity: heal,
        defer_turn_switch: defer,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn random_playouts_keep_invariants(seed: u64, rules in rules()) {
        let summary = random_playout(seed, &rules, 300);
        prop_assert!(summary.violations.is_empty(), "{:?}", summary.violations);
        prop_assert!(summary.actions <= 300);
    }

    #[test]
    fn reachable_positions_survive_notation(seed: u64) {
        let summary = random_playout(seed, &RulesConfig::default(), 150);
        let position = parse_position(&summary.final_position).unwrap();
        prop_assert_eq!(encode_position(&position.board, &position.turn), summary.final_position);
    }

    #[test]
    fn arbitrary_clicks_never_corrupt_the_board(
        clicks in prop::collection::vec((-2isize..12, -2isize..12), 0..60)
    ) {
        let mut engine = Engine::default();
        for (row, col) in clicks {
            let player = engine.turn().current_player;
            let _ = engine.handle_click(row, col);
            let switched = engine.turn().current_player != player;
            let violations = check_invariants(&engine, switched);
            prop_assert!(violations.is_empty(), "{:?}", violations);
        }
    }

    #[test]
    fn generated_actions_respect_occupancy(seed: u64) {
        let summary = random_playout(seed, &RulesConfig::default(), 120);
        let engine = Engine::from_notation(&summary.final_position, RulesConfig::default()).unwrap();
        prop_assert_eq!(engine.phase(), Phase::SelectPiece);

        let board = engine.board();
        for piece in board.pieces() {
            let actions = possible_actions(piece.square, board);
            for mv in &actions.moves {
                prop_assert!(board.is_empty(mv.to), "{:?} moves onto {}", piece.kind, mv.to);
            }
            for &target in &actions.attacks {
                let victim = board.get(target).unwrap();
                prop_assert!(!victim.is_spirit());
                prop_assert_ne!(victim.owner(), piece.owner());
            }
            if piece.kind != PieceKind::Life && piece.kind != PieceKind::Death {
                prop_assert!(actions.special_actions.is_empty());
            }
        }
    }
}
