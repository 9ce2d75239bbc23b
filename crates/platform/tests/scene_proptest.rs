//! Property-based tests for the scene's object tables.
//! Arbitrary create/destroy sequences must keep the bookkeeping consistent
//! and never let a destroyed handle reach a live object.
#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use platform::graphics::rect;
use platform::{LayerId, Scene, DisplayCaps, HostError, UiToolkit};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Create,
    Destroy(usize),
    SetText(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Create),
        (0usize..32).prop_map(Op::Destroy),
        (0usize..32).prop_map(Op::SetText),
    ]
}

proptest! {
    /// live objects always equal allocations minus releases.
    #[test]
    fn live_count_matches_stats(ops in proptest::collection::vec(op(), 0..64)) {
        let mut scene = Scene::new(DisplayCaps::MONOCHROME, &[]);
        let mut handles: Vec<LayerId> = Vec::new();
        for op in ops {
            match op {
                Op::Create => {
                    if let Ok(layer) = scene.text_layer_create(rect(0, 0, 10, 10)) {
                        handles.push(layer);
                    }
                }
                Op::Destroy(i) => {
                    if let Some(layer) = handles.get(i).copied() {
                        let _ = scene.layer_destroy(layer);
                    }
                }
                Op::SetText(i) => {
                    if let Some(layer) = handles.get(i).copied() {
                        let _ = scene.text_layer_set_text(layer, "x");
                    }
                }
            }
            let stats = scene.stats();
            prop_assert_eq!(scene.live_objects(), stats.allocations - stats.releases);
        }
    }

    /// A destroyed handle stays stale even after its slot is reused.
    #[test]
    fn destroyed_handle_stays_stale(reuses in 1usize..8) {
        let mut scene = Scene::new(DisplayCaps::MONOCHROME, &[]);
        let first = scene.text_layer_create(rect(0, 0, 10, 10)).unwrap();
        scene.layer_destroy(first).unwrap();
        for _ in 0..reuses {
            let again = scene.text_layer_create(rect(0, 0, 10, 10)).unwrap();
            prop_assert_ne!(again, first);
            prop_assert_eq!(scene.text_layer_set_text(first, "x"), Err(HostError::StaleHandle));
            scene.layer_destroy(again).unwrap();
        }
        prop_assert_eq!(scene.layer_destroy(first), Err(HostError::StaleHandle));
    }
}
