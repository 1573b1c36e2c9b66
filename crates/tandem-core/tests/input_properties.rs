//! Property tests for input aggregation.
//!
//! Tests verify delivery semantics under arbitrary push/drain interleavings:
//! runes are delivered exactly once and in order, while keys and touches
//! always reflect the most recent push.

use std::collections::BTreeSet;

use proptest::prelude::*;
use tandem_core::{InputAggregator, Key, Touch, TouchId};

#[derive(Debug, Clone)]
enum Op {
    Push { keys: BTreeSet<u16>, runes: Vec<char>, touches: Vec<(u64, f64, f64)> },
    Drain,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (
            prop::collection::btree_set(0u16..16, 0..4),
            prop::collection::vec(prop::char::range('a', 'z'), 0..3),
            prop::collection::vec((0u64..8, 0.0f64..1000.0, 0.0f64..1000.0), 0..3),
        )
            .prop_map(|(keys, runes, touches)| Op::Push { keys, runes, touches }),
        2 => Just(Op::Drain),
    ]
}

proptest! {
    #[test]
    fn prop_runes_delivered_exactly_once(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let input = InputAggregator::new();
        let mut pushed = Vec::new();
        let mut delivered = Vec::new();

        for op in ops {
            match op {
                Op::Push { keys, runes, touches } => {
                    pushed.extend(runes.iter().copied());
                    input.update(
                        keys.into_iter().map(Key),
                        &runes,
                        touches.into_iter().map(|(id, x, y)| Touch { id: TouchId(id), x, y }),
                    );
                },
                Op::Drain => delivered.extend(input.drain().runes),
            }
        }
        delivered.extend(input.drain().runes);

        prop_assert_eq!(delivered, pushed);
        prop_assert!(input.drain().runes.is_empty());
    }

    #[test]
    fn prop_membership_tracks_last_push(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let input = InputAggregator::new();
        let mut last_keys = BTreeSet::new();
        let mut last_touch_ids = BTreeSet::new();

        for op in ops {
            match op {
                Op::Push { keys, runes, touches } => {
                    last_keys = keys.iter().copied().map(Key).collect();
                    last_touch_ids = touches.iter().map(|(id, _, _)| TouchId(*id)).collect();
                    input.update(
                        keys.into_iter().map(Key),
                        &runes,
                        touches.into_iter().map(|(id, x, y)| Touch { id: TouchId(id), x, y }),
                    );
                },
                Op::Drain => {
                    let state = input.drain();
                    prop_assert_eq!(&state.keys, &last_keys);
                },
            }
        }

        let state = input.drain();
        prop_assert_eq!(state.keys, last_keys);
        let ids: BTreeSet<TouchId> = state.touches.iter().map(|t| t.id).collect();
        prop_assert_eq!(ids, last_touch_ids);
    }
}
