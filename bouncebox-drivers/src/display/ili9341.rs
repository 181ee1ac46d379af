//! ILI9341 TFT panel driver
//!
//! 240x320 RGB565 panel over a 4-wire SPI link (SCK, MOSI, DC, CS) plus a
//! hardware reset line. Pixel data is sent big-endian, one block at a time,
//! through the column/page address window.

use bouncebox_core::config::{DisplayConfig, Rotation};
use bouncebox_core::frame::BYTES_PER_PIXEL;
use bouncebox_core::traits::BlockWriter;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

/// ILI9341 commands
#[allow(dead_code)]
pub mod cmd {
    /// Software reset
    pub const SWRESET: u8 = 0x01;
    /// Exit sleep mode
    pub const SLPOUT: u8 = 0x11;
    /// Gamma curve select
    pub const GAMMASET: u8 = 0x26;
    /// Display on
    pub const DISPON: u8 = 0x29;
    /// Column address set
    pub const CASET: u8 = 0x2A;
    /// Page (row) address set
    pub const PASET: u8 = 0x2B;
    /// Memory write
    pub const RAMWR: u8 = 0x2C;
    /// Memory access control (scan direction, BGR)
    pub const MADCTL: u8 = 0x36;
    /// Vertical scrolling start address
    pub const VSCRSADD: u8 = 0x37;
    /// Pixel format
    pub const PIXFMT: u8 = 0x3A;
    /// Frame rate control, normal mode
    pub const FRMCTR1: u8 = 0xB1;
    /// Display function control
    pub const DFUNCTR: u8 = 0xB6;
    /// Power control 1
    pub const PWCTR1: u8 = 0xC0;
    /// Power control 2
    pub const PWCTR2: u8 = 0xC1;
    /// VCOM control 1
    pub const VMCTR1: u8 = 0xC5;
    /// VCOM control 2
    pub const VMCTR2: u8 = 0xC7;
    /// Power control A
    pub const PWCTRA: u8 = 0xCB;
    /// Power control B
    pub const PWCTRB: u8 = 0xCF;
    /// Positive gamma correction
    pub const GMCTRP1: u8 = 0xE0;
    /// Negative gamma correction
    pub const GMCTRN1: u8 = 0xE1;
    /// Driver timing control A
    pub const DTCA: u8 = 0xE8;
    /// Driver timing control B
    pub const DTCB: u8 = 0xEA;
    /// Power on sequence control
    pub const POSC: u8 = 0xED;
    /// Enable 3-gamma control
    pub const ENABLE3G: u8 = 0xF2;
    /// Pump ratio control
    pub const PRC: u8 = 0xF7;
}

/// MADCTL bits
mod madctl {
    pub const MY: u8 = 0x80;
    pub const MX: u8 = 0x40;
    pub const MV: u8 = 0x20;
    pub const BGR: u8 = 0x08;
}

/// 16 bits per pixel on both the RGB and MCU interfaces
const PIXEL_FORMAT_16BPP: u8 = 0x55;

/// Rows sent per band by [`Ili9341::clear`]
const CLEAR_BAND_ROWS: u16 = 16;

/// Zeroes streamed during a clear
const ZERO_CHUNK: [u8; 64] = [0; 64];

/// Power, timing and gamma setup sent before rotation is applied
const POWER_SEQUENCE: &[(u8, &[u8])] = &[
    (cmd::PWCTRB, &[0x00, 0xC1, 0x30]),
    (cmd::POSC, &[0x64, 0x03, 0x12, 0x81]),
    (cmd::DTCA, &[0x85, 0x00, 0x78]),
    (cmd::PWCTRA, &[0x39, 0x2C, 0x00, 0x34, 0x02]),
    (cmd::PRC, &[0x20]),
    (cmd::DTCB, &[0x00, 0x00]),
    (cmd::PWCTR1, &[0x23]),
    (cmd::PWCTR2, &[0x10]),
    (cmd::VMCTR1, &[0x3E, 0x28]),
    (cmd::VMCTR2, &[0x86]),
];

/// Display setup sent after rotation
const DISPLAY_SEQUENCE: &[(u8, &[u8])] = &[
    (cmd::VSCRSADD, &[0x00]),
    (cmd::PIXFMT, &[PIXEL_FORMAT_16BPP]),
    (cmd::FRMCTR1, &[0x00, 0x18]),
    (cmd::DFUNCTR, &[0x08, 0x82, 0x27]),
    (cmd::ENABLE3G, &[0x00]),
    (cmd::GAMMASET, &[0x01]),
    (
        cmd::GMCTRP1,
        &[
            0x0F, 0x31, 0x2B, 0x0C, 0x0E, 0x08, 0x4E, 0xF1, 0x37, 0x07, 0x10, 0x03, 0x0E, 0x09,
            0x00,
        ],
    ),
    (
        cmd::GMCTRN1,
        &[
            0x00, 0x0E, 0x14, 0x03, 0x11, 0x07, 0x31, 0xC1, 0x48, 0x08, 0x0F, 0x0C, 0x31, 0x36,
            0x0F,
        ],
    ),
];

/// Display driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// SPI transfer failed
    Bus,
    /// DC, CS or reset pin could not be driven
    Pin,
    /// Block corners outside the panel or inverted
    InvalidCoordinates,
    /// Pixel buffer length does not match the block size
    BufferSize,
}

/// MADCTL value for a rotation, BGR panel order
pub const fn madctl_for(rotation: Rotation) -> u8 {
    match rotation {
        Rotation::Deg0 => madctl::MY | madctl::BGR,
        Rotation::Deg90 => madctl::MY | madctl::MX | madctl::MV | madctl::BGR,
        Rotation::Deg180 => madctl::MX | madctl::BGR,
        Rotation::Deg270 => madctl::MV | madctl::BGR,
    }
}

/// ILI9341 driver
pub struct Ili9341<SPI, DC, CS, RST, DELAY> {
    spi: SPI,
    dc: DC,
    cs: CS,
    rst: RST,
    delay: DELAY,
    config: DisplayConfig,
}

impl<SPI, DC, CS, RST, DELAY> Ili9341<SPI, DC, CS, RST, DELAY>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Create a new driver
    ///
    /// Nothing is sent to the panel until [`init`](Self::init).
    pub fn new(spi: SPI, dc: DC, cs: CS, rst: RST, delay: DELAY, config: DisplayConfig) -> Self {
        Self {
            spi,
            dc,
            cs,
            rst,
            delay,
            config,
        }
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Reset, configure and clear the panel
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.cs.set_high().map_err(|_| DisplayError::Pin)?;
        self.hard_reset()?;

        self.write_command(cmd::SWRESET, &[])?;
        self.delay.delay_ms(100);

        for &(command, data) in POWER_SEQUENCE {
            self.write_command(command, data)?;
        }
        self.set_rotation(self.config.rotation)?;
        for &(command, data) in DISPLAY_SEQUENCE {
            self.write_command(command, data)?;
        }

        self.write_command(cmd::SLPOUT, &[])?;
        self.delay.delay_ms(100);
        self.write_command(cmd::DISPON, &[])?;
        self.delay.delay_ms(100);

        self.clear()
    }

    /// Pulse the reset line
    pub fn hard_reset(&mut self) -> Result<(), DisplayError> {
        self.rst.set_low().map_err(|_| DisplayError::Pin)?;
        self.delay.delay_ms(50);
        self.rst.set_high().map_err(|_| DisplayError::Pin)?;
        self.delay.delay_ms(50);
        Ok(())
    }

    /// Set the scan direction
    ///
    /// The configured width and height must already match the rotation.
    pub fn set_rotation(&mut self, rotation: Rotation) -> Result<(), DisplayError> {
        self.write_command(cmd::MADCTL, &[madctl_for(rotation)])?;
        self.config.rotation = rotation;
        Ok(())
    }

    /// Fill the whole panel with black, one band of rows at a time
    pub fn clear(&mut self) -> Result<(), DisplayError> {
        let width = self.config.width;
        let height = self.config.height;
        let mut y = 0;

        while y < height {
            let last = (y + CLEAR_BAND_ROWS).min(height) - 1;
            self.set_window(0, y, width - 1, last)?;

            let mut remaining = width as usize * (last - y + 1) as usize * BYTES_PER_PIXEL;
            self.with_data(|spi| {
                while remaining > 0 {
                    let n = remaining.min(ZERO_CHUNK.len());
                    spi.write(&ZERO_CHUNK[..n])?;
                    remaining -= n;
                }
                Ok(())
            })?;

            y = last + 1;
        }
        Ok(())
    }

    /// Release the bus and pins
    pub fn release(self) -> (SPI, DC, CS, RST, DELAY) {
        (self.spi, self.dc, self.cs, self.rst, self.delay)
    }

    /// Send one command byte followed by its parameters
    fn write_command(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.cs.set_low().map_err(|_| DisplayError::Pin)?;
        let result = self.command_frame(command, data);
        self.cs.set_high().map_err(|_| DisplayError::Pin)?;
        result
    }

    fn command_frame(&mut self, command: u8, data: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_low().map_err(|_| DisplayError::Pin)?;
        self.spi.write(&[command]).map_err(|_| DisplayError::Bus)?;
        self.spi.flush().map_err(|_| DisplayError::Bus)?;
        self.dc.set_high().map_err(|_| DisplayError::Pin)?;

        if !data.is_empty() {
            self.spi.write(data).map_err(|_| DisplayError::Bus)?;
            self.spi.flush().map_err(|_| DisplayError::Bus)?;
        }
        Ok(())
    }

    /// Set the address window and start a memory write
    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), DisplayError> {
        let [xs_hi, xs_lo] = x0.to_be_bytes();
        let [xe_hi, xe_lo] = x1.to_be_bytes();
        let [ys_hi, ys_lo] = y0.to_be_bytes();
        let [ye_hi, ye_lo] = y1.to_be_bytes();

        self.write_command(cmd::CASET, &[xs_hi, xs_lo, xe_hi, xe_lo])?;
        self.write_command(cmd::PASET, &[ys_hi, ys_lo, ye_hi, ye_lo])?;
        self.write_command(cmd::RAMWR, &[])
    }

    /// Stream pixel data following a RAMWR
    fn with_data<F>(&mut self, f: F) -> Result<(), DisplayError>
    where
        F: FnOnce(&mut SPI) -> Result<(), SPI::Error>,
    {
        self.cs.set_low().map_err(|_| DisplayError::Pin)?;
        let sent = self.dc.set_high().map_err(|_| DisplayError::Pin).and_then(|()| {
            f(&mut self.spi)
                .and_then(|()| self.spi.flush())
                .map_err(|_| DisplayError::Bus)
        });
        self.cs.set_high().map_err(|_| DisplayError::Pin)?;
        sent
    }

    fn check_block(
        &self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        len: usize,
    ) -> Result<(), DisplayError> {
        if x0 > x1 || y0 > y1 || x1 >= self.config.width || y1 >= self.config.height {
            return Err(DisplayError::InvalidCoordinates);
        }
        let expected = (x1 - x0 + 1) as usize * (y1 - y0 + 1) as usize * BYTES_PER_PIXEL;
        if len != expected {
            return Err(DisplayError::BufferSize);
        }
        Ok(())
    }
}

impl<SPI, DC, CS, RST, DELAY> BlockWriter for Ili9341<SPI, DC, CS, RST, DELAY>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    type Error = DisplayError;

    fn write_block(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        pixels: &[u8],
    ) -> Result<(), DisplayError> {
        self.check_block(x0, y0, x1, y1, pixels.len())?;
        self.set_window(x0, y0, x1, y1)?;
        self.with_data(|spi| spi.write(pixels))
    }
}
