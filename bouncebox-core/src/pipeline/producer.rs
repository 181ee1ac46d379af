//! Frame producer
//!
//! Runs on the primary core. Each call to [`FrameProducer::run_frame`]:
//!
//! 1. Flips the target half (the first frame targets the top half)
//! 2. Advances every box
//! 3. Spins until the transfer side has released the region
//! 4. Draws every box into the target half
//! 5. Publishes the half on the hand-off flag
//! 6. Dispatches the transfer for that half
//! 7. Feeds the frame-rate meter

use heapless::Vec;
use portable_atomic::{AtomicBool, Ordering};

use super::rate::FrameRateMeter;
use crate::config::MAX_BOXES;
use crate::frame::{DrawPort, FlagState, Half};
use crate::physics::BouncingBox;
use crate::traits::Clock;

/// Starts the transfer of a freshly published half
pub trait TransferDispatch {
    fn dispatch(&mut self, half: Half);
}

impl<F: FnMut(Half)> TransferDispatch for F {
    fn dispatch(&mut self, half: Half) {
        self(half)
    }
}

/// Outcome of one producer cycle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameReport {
    /// Half that was drawn and published
    pub half: Half,
    /// Full frames per second, when a measurement window completed
    pub frame_rate: Option<f32>,
}

/// Simulates and draws half-frames into the shared region
pub struct FrameProducer<'a, C: Clock, const N: usize> {
    port: DrawPort<'a, N>,
    boxes: Vec<BouncingBox, MAX_BOXES>,
    target: Half,
    clock: C,
    meter: FrameRateMeter,
    frames: u32,
}

impl<'a, C: Clock, const N: usize> FrameProducer<'a, C, N> {
    /// Create a producer owning the draw side of the region
    ///
    /// `rate_window` is the number of halves per frame-rate report.
    pub fn new(
        port: DrawPort<'a, N>,
        boxes: Vec<BouncingBox, MAX_BOXES>,
        clock: C,
        rate_window: u32,
    ) -> Self {
        let meter = FrameRateMeter::new(rate_window, clock.now_micros());
        Self {
            port,
            boxes,
            // Flipped before the first draw, so rendering starts with the top
            target: Half::Bottom,
            clock,
            meter,
            frames: 0,
        }
    }

    pub fn boxes(&self) -> &[BouncingBox] {
        &self.boxes
    }

    /// Half the next call to `run_frame` will draw
    pub fn next_half(&self) -> Half {
        self.target.flip()
    }

    /// Number of halves published so far
    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Current hand-off flag value
    pub fn state(&self) -> FlagState {
        self.port.state()
    }

    /// Run one producer cycle
    ///
    /// Blocks while the previous half is still being transferred.
    pub fn run_frame<D: TransferDispatch + ?Sized>(&mut self, dispatch: &mut D) -> FrameReport {
        self.target = self.target.flip();

        for b in self.boxes.iter_mut() {
            b.update_pos();
        }

        let mut canvas = self.port.begin(self.target);
        for b in &self.boxes {
            b.draw(&mut canvas);
        }
        let half = canvas.publish();

        dispatch.dispatch(half);

        self.frames = self.frames.wrapping_add(1);
        let frame_rate = self.meter.record(self.clock.now_micros());

        FrameReport { half, frame_rate }
    }

    /// Run cycles until `stop` is raised, then drain the in-flight transfer
    ///
    /// `on_frame` sees every report. Returns the number of halves published.
    pub fn run<D, F>(&mut self, dispatch: &mut D, stop: &AtomicBool, mut on_frame: F) -> u32
    where
        D: TransferDispatch + ?Sized,
        F: FnMut(&FrameReport),
    {
        while !stop.load(Ordering::Acquire) {
            let report = self.run_frame(dispatch);
            on_frame(&report);
        }

        self.port.wait_idle();
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::color565;
    use crate::frame::{FrameGeometry, SharedFrame};
    use crate::physics::{Bounds, Vec2};
    use core::cell::Cell;

    const GEOMETRY: FrameGeometry = FrameGeometry::new(32, 24);
    const BYTES: usize = GEOMETRY.half_frame_bytes();

    struct FakeClock<'c>(&'c Cell<u64>);

    impl Clock for FakeClock<'_> {
        fn now_micros(&self) -> u64 {
            self.0.get()
        }
    }

    fn one_box() -> Vec<BouncingBox, MAX_BOXES> {
        let mut boxes = Vec::new();
        let b = BouncingBox::new(
            Bounds::new(32, 24),
            4,
            color565(255, 255, 255),
            Vec2::new(1.0, 1.0),
        )
        .with_position(Vec2::new(0.0, 0.0));
        boxes.push(b).unwrap();
        boxes
    }

    #[test]
    fn test_first_frame_targets_top_half() {
        let frame = SharedFrame::<BYTES>::new(GEOMETRY);
        let (draw, mut transfer) = frame.split().unwrap();
        let time = Cell::new(0);
        let mut producer = FrameProducer::new(draw, one_box(), FakeClock(&time), 100);

        assert_eq!(producer.next_half(), Half::Top);

        let mut dispatched = None;
        let report = producer.run_frame(&mut |half: Half| dispatched = Some(half));

        assert_eq!(report.half, Half::Top);
        assert_eq!(dispatched, Some(Half::Top));
        assert_eq!(frame.state(), FlagState::Ready(Half::Top));

        transfer.try_take().unwrap().release();
        assert_eq!(producer.next_half(), Half::Bottom);
    }

    #[test]
    fn test_halves_alternate() {
        let frame = SharedFrame::<BYTES>::new(GEOMETRY);
        let (draw, mut transfer) = frame.split().unwrap();
        let time = Cell::new(0);
        let mut producer = FrameProducer::new(draw, one_box(), FakeClock(&time), 100);

        let mut seen = [None; 4];
        for slot in seen.iter_mut() {
            let report = producer.run_frame(&mut |_: Half| {});
            *slot = Some(report.half);
            transfer.try_take().unwrap().release();
        }

        assert_eq!(
            seen,
            [
                Some(Half::Top),
                Some(Half::Bottom),
                Some(Half::Top),
                Some(Half::Bottom)
            ]
        );
        assert_eq!(producer.frames(), 4);
    }

    #[test]
    fn test_boxes_move_before_drawing() {
        let frame = SharedFrame::<BYTES>::new(GEOMETRY);
        let (draw, mut transfer) = frame.split().unwrap();
        let time = Cell::new(0);
        let mut producer = FrameProducer::new(draw, one_box(), FakeClock(&time), 100);

        producer.run_frame(&mut |_: Half| {});

        assert_eq!(producer.boxes()[0].position(), Vec2::new(1.0, 1.0));
        let pending = transfer.try_take().unwrap();
        // Pixel (0, 0) is background; (1, 1) is the box's top-left
        let stride = 32 * 2;
        assert_eq!(&pending.pixels()[0..2], &[0, 0]);
        assert_eq!(&pending.pixels()[stride + 2..stride + 4], &[0xFF, 0xFF]);
    }

    #[test]
    fn test_frame_rate_reported_per_window() {
        let frame = SharedFrame::<BYTES>::new(GEOMETRY);
        let (draw, mut transfer) = frame.split().unwrap();
        let time = Cell::new(0);
        let mut producer = FrameProducer::new(draw, one_box(), FakeClock(&time), 2);

        time.set(10_000);
        let first = producer.run_frame(&mut |_: Half| {});
        transfer.try_take().unwrap().release();
        time.set(20_000);
        let second = producer.run_frame(&mut |_: Half| {});

        assert_eq!(first.frame_rate, None);
        // 2 halves in 20 ms = 100 halves/s = 50 frames/s
        assert_eq!(second.frame_rate, Some(50.0));
    }

    #[test]
    fn test_run_exits_when_stopped() {
        let frame = SharedFrame::<BYTES>::new(GEOMETRY);
        let (draw, mut transfer) = frame.split().unwrap();
        let time = Cell::new(0);
        let mut producer = FrameProducer::new(draw, one_box(), FakeClock(&time), 100);
        let stop = AtomicBool::new(false);

        // Transfer inline, and ask to stop after the third half
        let mut sent = 0;
        let mut dispatch = |_half: Half| {
            transfer.try_take().unwrap().release();
            sent += 1;
            if sent == 3 {
                stop.store(true, Ordering::Release);
            }
        };

        let mut reports = 0;
        let frames = producer.run(&mut dispatch, &stop, |_| reports += 1);

        assert_eq!(frames, 3);
        assert_eq!(reports, 3);
        assert!(frame.state().is_idle());
    }
}
