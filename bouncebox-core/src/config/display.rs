//! Display and bus configuration types

use crate::frame::FrameGeometry;

/// Panel rotation in degrees clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// Portrait, connector at the bottom
    Deg0,
    /// Landscape
    #[default]
    Deg90,
    /// Portrait, upside down
    Deg180,
    /// Landscape, upside down
    Deg270,
}

impl Rotation {
    /// Whether the panel's native width and height are swapped
    pub const fn is_landscape(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }
}

/// Display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Visible width in pixels (after rotation)
    pub width: u16,
    /// Visible height in pixels (after rotation)
    pub height: u16,
    /// Panel rotation
    pub rotation: Rotation,
}

impl DisplayConfig {
    /// 320x240 landscape ILI9341
    pub const DEFAULT: Self = Self {
        width: 320,
        height: 240,
        rotation: Rotation::Deg90,
    };

    /// Frame geometry for this display
    pub const fn geometry(&self) -> FrameGeometry {
        FrameGeometry::new(self.width, self.height)
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// SPI clock polarity and phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiMode {
    /// CPOL=0, CPHA=0
    Mode0,
    /// CPOL=0, CPHA=1
    Mode1,
    /// CPOL=1, CPHA=0
    Mode2,
    /// CPOL=1, CPHA=1
    Mode3,
}

impl SpiMode {
    /// Clock idles high (CPOL=1)
    pub const fn idle_high(self) -> bool {
        matches!(self, Self::Mode2 | Self::Mode3)
    }

    /// Data captured on the second clock transition (CPHA=1)
    pub const fn capture_on_second_transition(self) -> bool {
        matches!(self, Self::Mode1 | Self::Mode3)
    }
}

/// SPI bus configuration for the display link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiBusConfig {
    /// Clock frequency in Hz
    pub frequency_hz: u32,
    /// Clock polarity and phase
    pub mode: SpiMode,
}

impl SpiBusConfig {
    /// 31.25 MHz, mode 3, 8-bit words MSB first
    pub const DEFAULT: Self = Self {
        frequency_hz: 31_250_000,
        mode: SpiMode::Mode3,
    };
}

impl Default for SpiBusConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
