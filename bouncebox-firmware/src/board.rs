//! Board wiring and compiled-in settings
//!
//! Pin assignment (RP2040, SPI0):
//!
//! | Signal      | GPIO |
//! |-------------|------|
//! | SCK         | 18   |
//! | MOSI        | 19   |
//! | MISO        | 16   |
//! | DC          | 20   |
//! | CS          | 22   |
//! | RST         | 21   |
//! | Stop button | 15   |
//!
//! The stop button pulls GPIO15 to ground; the internal pull-up is enabled.

use bouncebox_core::config::{AnimationConfig, DisplayConfig, SpiBusConfig};
use bouncebox_core::frame::FrameGeometry;
use embassy_rp::spi::{Config as SpiConfig, Phase, Polarity};

/// 320x240 landscape panel
pub const DISPLAY: DisplayConfig = DisplayConfig::DEFAULT;

/// 31.25 MHz, mode 3
pub const SPI_BUS: SpiBusConfig = SpiBusConfig::DEFAULT;

/// 100 boxes
pub const ANIMATION: AnimationConfig = AnimationConfig::DEFAULT;

pub const GEOMETRY: FrameGeometry = DISPLAY.geometry();

/// Bytes in the shared half-frame region
pub const HALF_FRAME_BYTES: usize = GEOMETRY.half_frame_bytes();

/// Stack for the core 1 executor
pub const CORE1_STACK_SIZE: usize = 4096;

/// Debounce time for the stop button
pub const STOP_DEBOUNCE_MS: u64 = 20;

/// Translate the bus settings into an embassy SPI config
pub fn spi_config(bus: &SpiBusConfig) -> SpiConfig {
    let mut config = SpiConfig::default();
    config.frequency = bus.frequency_hz;
    config.polarity = if bus.mode.idle_high() {
        Polarity::IdleHigh
    } else {
        Polarity::IdleLow
    };
    config.phase = if bus.mode.capture_on_second_transition() {
        Phase::CaptureOnSecondTransition
    } else {
        Phase::CaptureOnFirstTransition
    };
    config
}
