//! Shared half-frame region
//!
//! One statically sized pixel buffer plus the hand-off flag that decides
//! which side may touch it. The region is split exactly once into a
//! [`DrawPort`] for the producer core and a [`TransferPort`] for the
//! transfer core; no other path to the pixels exists.
//!
//! | Flag          | Pixels owned by | Transition made by          |
//! |---------------|-----------------|-----------------------------|
//! | `Idle`        | `DrawPort`      | `HalfCanvas::publish` -> Ready |
//! | `Ready(half)` | `TransferPort`  | `PendingHalf::release` -> Idle |

use core::cell::UnsafeCell;
use core::ops::Range;

use portable_atomic::{AtomicBool, Ordering};

use super::canvas::HalfCanvas;
use super::flag::{FlagState, HandoffFlag};
use super::{FrameGeometry, Half};

/// Half-frame pixel buffer shared between the two cores
///
/// `N` is the buffer size in bytes and must equal
/// `geometry.half_frame_bytes()`; this is checked at construction, which
/// fails to compile when used in a `static` initializer.
pub struct SharedFrame<const N: usize> {
    geometry: FrameGeometry,
    flag: HandoffFlag,
    split: AtomicBool,
    pixels: UnsafeCell<[u8; N]>,
}

// SAFETY: the pixels are only reachable through the two ports handed out by
// `split`, which succeeds once. Each port touches the pixels only in the flag
// state it owns, and only the owner of a state can leave it.
unsafe impl<const N: usize> Sync for SharedFrame<N> {}

impl<const N: usize> SharedFrame<N> {
    /// Create a zeroed region with an idle flag
    pub const fn new(geometry: FrameGeometry) -> Self {
        assert!(
            geometry.half_frame_bytes() == N,
            "buffer size does not match frame geometry"
        );
        Self {
            geometry,
            flag: HandoffFlag::new(),
            split: AtomicBool::new(false),
            pixels: UnsafeCell::new([0; N]),
        }
    }

    pub fn geometry(&self) -> FrameGeometry {
        self.geometry
    }

    /// Current hand-off flag value
    pub fn state(&self) -> FlagState {
        self.flag.load()
    }

    /// Hand out the producer and transfer ports
    ///
    /// Returns `None` if the region has already been split.
    pub fn split(&self) -> Option<(DrawPort<'_, N>, TransferPort<'_, N>)> {
        if self.split.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some((DrawPort { frame: self }, TransferPort { frame: self }))
    }

    /// # Safety
    ///
    /// The caller must be the port that owns the current flag state and must
    /// not let the returned slice outlive that ownership.
    #[allow(clippy::mut_from_ref)]
    unsafe fn pixels_mut(&self) -> &mut [u8] {
        &mut *self.pixels.get()
    }
}

/// Producer-side access to the shared region
pub struct DrawPort<'a, const N: usize> {
    frame: &'a SharedFrame<N>,
}

impl<'a, const N: usize> DrawPort<'a, N> {
    pub fn geometry(&self) -> FrameGeometry {
        self.frame.geometry
    }

    pub fn state(&self) -> FlagState {
        self.frame.flag.load()
    }

    /// Spin until the transfer side has released the region
    ///
    /// Unbounded: a stalled transfer stalls the caller.
    pub fn wait_idle(&self) {
        while !self.state().is_idle() {
            core::hint::spin_loop();
        }
    }

    /// Start drawing `half` if the region is idle
    pub fn try_begin(&mut self, half: Half) -> Option<HalfCanvas<'_>> {
        if !self.state().is_idle() {
            return None;
        }
        Some(self.canvas(half))
    }

    /// Wait for the region to go idle, then start drawing `half`
    pub fn begin(&mut self, half: Half) -> HalfCanvas<'_> {
        self.wait_idle();
        self.canvas(half)
    }

    fn canvas(&mut self, half: Half) -> HalfCanvas<'_> {
        // SAFETY: the flag was observed idle, only the transfer side can
        // leave `Ready`, and only this port (via the canvas) can leave `Idle`.
        // The canvas borrows `self` mutably, so at most one exists.
        let pixels = unsafe { self.frame.pixels_mut() };
        HalfCanvas::new(pixels, self.frame.geometry, half, &self.frame.flag)
    }
}

/// Transfer-side access to the shared region
pub struct TransferPort<'a, const N: usize> {
    frame: &'a SharedFrame<N>,
}

impl<'a, const N: usize> TransferPort<'a, N> {
    pub fn geometry(&self) -> FrameGeometry {
        self.frame.geometry
    }

    pub fn state(&self) -> FlagState {
        self.frame.flag.load()
    }

    /// Take the pending half, if the producer has published one
    pub fn try_take(&mut self) -> Option<PendingHalf<'_>> {
        match self.state() {
            FlagState::Idle => None,
            FlagState::Ready(half) => {
                // SAFETY: the flag is `Ready`, which only this port can
                // leave. The producer will not touch the pixels until it
                // observes `Idle`.
                let pixels = unsafe { self.frame.pixels_mut() };
                Some(PendingHalf {
                    half,
                    geometry: self.frame.geometry,
                    pixels,
                    flag: &self.frame.flag,
                })
            }
        }
    }
}

/// A published half waiting to be sent
///
/// Dropping it without calling [`release`](Self::release) leaves the flag
/// ready, which keeps the producer blocked.
pub struct PendingHalf<'a> {
    half: Half,
    geometry: FrameGeometry,
    pixels: &'a mut [u8],
    flag: &'a HandoffFlag,
}

impl PendingHalf<'_> {
    pub fn half(&self) -> Half {
        self.half
    }

    /// Virtual-frame rows these pixels belong to
    pub fn rows(&self) -> Range<u16> {
        self.geometry.rows(self.half)
    }

    /// Raw pixel bytes (RGB565, big-endian)
    pub fn pixels(&self) -> &[u8] {
        self.pixels
    }

    /// Zero the region and hand it back to the producer
    pub fn release(self) {
        self.pixels.fill(0);
        self.flag.store(FlagState::Idle);
    }
}
