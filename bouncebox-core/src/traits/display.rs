//! Display driver trait for block-addressed panels

/// A panel that accepts rectangular blocks of packed pixels
///
/// This is the only surface the transfer side needs from the display.
pub trait BlockWriter {
    /// Error type for block writes
    type Error;

    /// Write a block of pixels
    ///
    /// - `x0`, `y0`: top-left corner, inclusive
    /// - `x1`, `y1`: bottom-right corner, inclusive
    /// - `pixels`: exactly `(x1 - x0 + 1) * (y1 - y0 + 1)` RGB565 pixels,
    ///   big-endian, row-major
    ///
    /// Blocks until the bus transfer has completed.
    fn write_block(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        pixels: &[u8],
    ) -> Result<(), Self::Error>;
}

impl<T: BlockWriter + ?Sized> BlockWriter for &mut T {
    type Error = T::Error;

    fn write_block(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        pixels: &[u8],
    ) -> Result<(), Self::Error> {
        T::write_block(self, x0, y0, x1, y1, pixels)
    }
}
