//! Layout contract shared by the engine and whatever draws the wheel.
//!
//! Wedge `i` is centered at `i * SLICE_ANGLE_DEG`, measured clockwise from the
//! fixed pointer at the top of the wheel. The landing rotation produced by the
//! outcome selector relies on exactly this layout.

use serde::{Deserialize, Serialize};

use super::{EXTRA_SPIN_TURNS, LABEL_RADIUS_FACTOR, SLICE_ANGLE_DEG, WEDGE_COUNT};

/// Where the multiplier label for a wedge is drawn, in polar form.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelAnchor {
    pub radius: f64,
    pub angle_deg: f64,
}

/// Center angle of wedge `index`.
pub fn wedge_center(index: usize) -> f64 {
    index as f64 * SLICE_ANGLE_DEG
}

/// Angular span `[start, end)` of wedge `index`.
pub fn wedge_span(index: usize) -> (f64, f64) {
    let half = SLICE_ANGLE_DEG / 2.0;
    let start = index as f64 * SLICE_ANGLE_DEG - half;
    let end = (index + 1) as f64 * SLICE_ANGLE_DEG - half;
    (start, end)
}

/// Label anchor for wedge `index` on a wheel of `wheel_radius`.
pub fn label_anchor(index: usize, wheel_radius: f64) -> LabelAnchor {
    LabelAnchor {
        radius: wheel_radius * LABEL_RADIUS_FACTOR,
        angle_deg: wedge_center(index),
    }
}

/// Cumulative rotation that lands `winning_index` under the pointer, starting
/// from `current_rotation` and always moving forward by the extra turns.
pub fn landing_rotation(current_rotation: f64, winning_index: usize) -> f64 {
    current_rotation + f64::from(EXTRA_SPIN_TURNS) * 360.0 - SLICE_ANGLE_DEG * winning_index as f64
}

/// Wedge whose center sits under the pointer at `rotation_deg`.
pub fn wedge_at_pointer(rotation_deg: f64) -> usize {
    let steps = (-rotation_deg / SLICE_ANGLE_DEG).round() as i64;
    steps.rem_euclid(WEDGE_COUNT as i64) as usize
}
