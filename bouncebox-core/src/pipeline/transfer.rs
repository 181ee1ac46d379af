//! Transfer task
//!
//! Runs on the secondary core once per published half. It sends the pending
//! half to the display at that half's rows, zeroes the region and sets the
//! flag back to idle.

use crate::frame::{FlagState, Half, TransferPort};
use crate::traits::BlockWriter;

/// Moves published halves from the shared region to the display
///
/// One instance lives for the whole program and is reused every frame.
pub struct TransferTask<'a, D: BlockWriter, const N: usize> {
    port: TransferPort<'a, N>,
    display: D,
}

impl<'a, D: BlockWriter, const N: usize> TransferTask<'a, D, N> {
    pub fn new(port: TransferPort<'a, N>, display: D) -> Self {
        Self { port, display }
    }

    /// Current hand-off flag value
    pub fn state(&self) -> FlagState {
        self.port.state()
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Send the pending half, if any
    ///
    /// Returns `Ok(None)` when the flag is idle; the region is left alone in
    /// that case since the producer may be drawing into it. On a display
    /// error the flag stays ready and the producer stays blocked.
    pub fn run_once(&mut self) -> Result<Option<Half>, D::Error> {
        let last_col = self.port.geometry().width() - 1;
        let Some(pending) = self.port.try_take() else {
            return Ok(None);
        };

        let half = pending.half();
        let rows = pending.rows();

        self.display
            .write_block(0, rows.start, last_col, rows.end - 1, pending.pixels())?;

        pending.release();
        Ok(Some(half))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{FrameGeometry, SharedFrame};
    use embedded_graphics::pixelcolor::Rgb565;
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::Rectangle;

    const GEOMETRY: FrameGeometry = FrameGeometry::new(320, 240);
    const BYTES: usize = GEOMETRY.half_frame_bytes();

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct BlockCall {
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        len: usize,
        painted: bool,
    }

    #[derive(Default)]
    struct MockDisplay {
        calls: [Option<BlockCall>; 4],
        count: usize,
        fail: bool,
    }

    impl BlockWriter for MockDisplay {
        type Error = ();

        fn write_block(
            &mut self,
            x0: u16,
            y0: u16,
            x1: u16,
            y1: u16,
            pixels: &[u8],
        ) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.calls[self.count] = Some(BlockCall {
                x0,
                y0,
                x1,
                y1,
                len: pixels.len(),
                painted: pixels.iter().any(|&b| b != 0),
            });
            self.count += 1;
            Ok(())
        }
    }

    #[test]
    fn test_idle_flag_sends_nothing() {
        let frame = SharedFrame::<BYTES>::new(GEOMETRY);
        let (_draw, transfer) = frame.split().unwrap();
        let mut task = TransferTask::new(transfer, MockDisplay::default());

        assert_eq!(task.run_once(), Ok(None));
        assert_eq!(task.display().count, 0);
    }

    #[test]
    fn test_top_half_writes_first_rows() {
        let frame = SharedFrame::<BYTES>::new(GEOMETRY);
        let (mut draw, transfer) = frame.split().unwrap();
        let mut task = TransferTask::new(transfer, MockDisplay::default());

        let mut canvas = draw.try_begin(Half::Top).unwrap();
        canvas
            .fill_solid(&Rectangle::new(Point::new(5, 5), Size::new(3, 3)), Rgb565::CYAN)
            .unwrap();
        canvas.publish();

        assert_eq!(task.run_once(), Ok(Some(Half::Top)));
        assert_eq!(
            task.display().calls[0],
            Some(BlockCall {
                x0: 0,
                y0: 0,
                x1: 319,
                y1: 119,
                len: 320 * 120 * 2,
                painted: true,
            })
        );

        assert_eq!(task.state(), FlagState::Idle);
        let canvas = draw.try_begin(Half::Bottom).unwrap();
        assert!(canvas.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_bottom_half_writes_last_rows() {
        let frame = SharedFrame::<BYTES>::new(GEOMETRY);
        let (mut draw, transfer) = frame.split().unwrap();
        let mut task = TransferTask::new(transfer, MockDisplay::default());

        draw.try_begin(Half::Bottom).unwrap().publish();

        assert_eq!(task.run_once(), Ok(Some(Half::Bottom)));
        let call = task.display().calls[0].unwrap();
        assert_eq!((call.x0, call.y0, call.x1, call.y1), (0, 120, 319, 239));
        assert!(!call.painted);
        assert!(task.state().is_idle());
    }

    #[test]
    fn test_display_error_keeps_flag_ready() {
        let frame = SharedFrame::<BYTES>::new(GEOMETRY);
        let (mut draw, transfer) = frame.split().unwrap();
        let mut task = TransferTask::new(
            transfer,
            MockDisplay {
                fail: true,
                ..Default::default()
            },
        );

        draw.try_begin(Half::Top).unwrap().publish();

        assert_eq!(task.run_once(), Err(()));
        assert_eq!(task.state(), FlagState::Ready(Half::Top));
        assert!(draw.try_begin(Half::Bottom).is_none());
    }
}
