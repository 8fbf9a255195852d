//! Winning wedge selection.
//!
//! Each spin draws an index uniformly from the wheel, independent of every
//! earlier draw, then derives the cumulative rotation that shows the landing.

use colorwheel_types::wheel::{landing_rotation, WEDGE_COUNT};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Result of selecting an outcome for one spin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpinPlan {
    pub winning_index: usize,
    pub final_rotation: f64,
}

/// Source of spin outcomes.
///
/// Implementations must return `winning_index < WEDGE_COUNT` and a
/// `final_rotation` computed with [`landing_rotation`].
pub trait OutcomeSelector {
    fn select_outcome(&mut self, current_rotation: f64) -> SpinPlan;
}

/// Fair selector backed by a [`rand`] generator.
#[derive(Clone, Debug)]
pub struct WheelSelector<R = StdRng> {
    rng: R,
}

impl WheelSelector<StdRng> {
    /// Reproducible selector, for tests and replays.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> WheelSelector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> OutcomeSelector for WheelSelector<R> {
    fn select_outcome(&mut self, current_rotation: f64) -> SpinPlan {
        let winning_index = self.rng.gen_range(0..WEDGE_COUNT);
        SpinPlan {
            winning_index,
            final_rotation: landing_rotation(current_rotation, winning_index),
        }
    }
}
