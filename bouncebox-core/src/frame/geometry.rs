//! Half-frame geometry
//!
//! The full virtual frame is `width x height`. Only half of it is ever held
//! in memory: the same buffer is drawn and sent twice per displayed frame,
//! once for the top rows and once for the bottom rows.

use core::ops::Range;

/// Bytes per RGB565 pixel
pub const BYTES_PER_PIXEL: usize = 2;

/// One of the two horizontal halves of the virtual frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Half {
    /// Rows `[0, height/2)` ("half 1")
    Top,
    /// Rows `[height/2, height)` ("half 2")
    Bottom,
}

impl Half {
    /// The other half
    pub const fn flip(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }

    /// Zero-based index (0 = top, 1 = bottom)
    pub const fn index(self) -> u16 {
        match self {
            Self::Top => 0,
            Self::Bottom => 1,
        }
    }
}

/// Dimensions of the virtual frame and its half-height buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameGeometry {
    width: u16,
    height: u16,
}

impl FrameGeometry {
    /// Create a geometry for a `width x height` frame
    ///
    /// `height` must be even so both halves share one buffer size.
    pub const fn new(width: u16, height: u16) -> Self {
        assert!(height % 2 == 0, "frame height must be even");
        Self { width, height }
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Rows held by the buffer at once
    pub const fn half_height(&self) -> u16 {
        self.height / 2
    }

    /// Size in bytes of the half-frame buffer
    pub const fn half_frame_bytes(&self) -> usize {
        self.width as usize * self.half_height() as usize * BYTES_PER_PIXEL
    }

    /// Vertical offset of a half within the virtual frame
    pub const fn row_offset(&self, half: Half) -> u16 {
        half.index() * self.half_height()
    }

    /// Virtual-frame rows covered by a half
    pub const fn rows(&self, half: Half) -> Range<u16> {
        let start = self.row_offset(half);
        start..start + self.half_height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_flip() {
        assert_eq!(Half::Top.flip(), Half::Bottom);
        assert_eq!(Half::Bottom.flip(), Half::Top);
    }

    #[test]
    fn test_geometry_rows() {
        let geometry = FrameGeometry::new(320, 240);
        assert_eq!(geometry.half_height(), 120);
        assert_eq!(geometry.half_frame_bytes(), 320 * 120 * 2);
        assert_eq!(geometry.rows(Half::Top), 0..120);
        assert_eq!(geometry.rows(Half::Bottom), 120..240);
    }
}
