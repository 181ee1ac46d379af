//! Color helpers
//!
//! Pixels are RGB565, the format the ILI9341 expects in 16-bit mode.

use core::ops::RangeInclusive;

use embedded_graphics::pixelcolor::Rgb565;
use rand::{Rng, RngCore};

/// Pack 8-bit channels into an RGB565 color
///
/// The low bits of each channel are dropped (5 bits red, 6 green, 5 blue).
pub const fn color565(r: u8, g: u8, b: u8) -> Rgb565 {
    Rgb565::new(r >> 3, g >> 2, b >> 3)
}

/// Random color with every channel drawn from `channels`
pub fn random_color<R: RngCore + ?Sized>(rng: &mut R, channels: RangeInclusive<u8>) -> Rgb565 {
    let r = rng.gen_range(channels.clone());
    let g = rng.gen_range(channels.clone());
    let b = rng.gen_range(channels);
    color565(r, g, b)
}
