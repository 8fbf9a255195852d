//! Deterministic helpers for tests in this and downstream crates.

use colorwheel_types::wheel::{landing_rotation, Color, WEDGE_COUNT, WEDGE_TABLE};

use crate::outcome::{OutcomeSelector, SpinPlan};

/// Selector that replays a scripted list of wedge indices, cycling when exhausted.
#[derive(Clone, Debug)]
pub struct FixedSelector {
    indices: Vec<usize>,
    cursor: usize,
}

impl FixedSelector {
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        let indices: Vec<usize> = indices.into_iter().collect();
        assert!(!indices.is_empty(), "FixedSelector needs at least one index");
        assert!(
            indices.iter().all(|i| *i < WEDGE_COUNT),
            "FixedSelector index out of range"
        );
        Self { indices, cursor: 0 }
    }

    pub fn always(index: usize) -> Self {
        Self::new([index])
    }
}

impl OutcomeSelector for FixedSelector {
    fn select_outcome(&mut self, current_rotation: f64) -> SpinPlan {
        let winning_index = self.indices[self.cursor % self.indices.len()];
        self.cursor = self.cursor.wrapping_add(1);
        SpinPlan {
            winning_index,
            final_rotation: landing_rotation(current_rotation, winning_index),
        }
    }
}

/// First wedge index with the given color and multiplier.
pub fn find_wedge(color: Color, multiplier: u32) -> Option<usize> {
    WEDGE_TABLE
        .iter()
        .position(|w| w.color == color && w.multiplier == multiplier)
}
