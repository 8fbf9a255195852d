/// Number of wedges on the wheel.
pub const WEDGE_COUNT: usize = 40;

/// Angular width of a single wedge in degrees (360 / 40).
pub const SLICE_ANGLE_DEG: f64 = 360.0 / WEDGE_COUNT as f64;

/// Full turns added to every spin before landing on the selected wedge.
pub const EXTRA_SPIN_TURNS: u32 = 3;

/// How long the wheel spins before the outcome is revealed.
pub const SPIN_DURATION_MS: u64 = 4_500;

/// How long a settled outcome stays on display before the round resets.
pub const DISPLAY_DURATION_MS: u64 = 3_000;

/// Balance every new session starts with.
pub const STARTING_BALANCE: u64 = 500;

/// Label anchors sit at this fraction of the wheel radius.
pub const LABEL_RADIUS_FACTOR: f64 = 0.7;

/// Chip values offered by front ends (bets themselves accept any positive amount).
pub const CHIP_DENOMINATIONS: [u64; 3] = [5, 10, 25];
