//! Animation configuration types

use core::ops::RangeInclusive;

/// Upper bound on the number of boxes a pipeline can own
pub const MAX_BOXES: usize = 128;

/// Range of speed magnitudes in pixels per frame
///
/// Each velocity component gets a magnitude in `[min, max]` and a random
/// sign, so no box ever moves along a purely horizontal or vertical line.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpeedRange {
    /// Minimum magnitude (must be > 0)
    pub min: f32,
    /// Maximum magnitude
    pub max: f32,
}

impl SpeedRange {
    pub const DEFAULT: Self = Self { min: 0.25, max: 5.0 };
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Box population and reporting configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    /// Number of boxes to spawn (at most `MAX_BOXES`)
    pub box_count: usize,
    /// Side length range in pixels
    pub size_range: RangeInclusive<u16>,
    /// Range for each 8-bit color channel
    pub channel_range: RangeInclusive<u8>,
    /// Velocity magnitude range
    pub speed: SpeedRange,
    /// Frames between frame-rate reports
    pub rate_window: u32,
}

impl AnimationConfig {
    pub const DEFAULT: Self = Self {
        box_count: 100,
        size_range: 7..=40,
        channel_range: 30..=255,
        speed: SpeedRange::DEFAULT,
        rate_window: 100,
    };
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
