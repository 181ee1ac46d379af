//! Half-height shared frame and its hand-off protocol
//!
//! The producer core draws into the region while the flag is idle and then
//! publishes the half it drew. The transfer core sends the published half,
//! zeroes the region and sets the flag back to idle.

pub mod canvas;
pub mod flag;
pub mod geometry;
#[allow(unsafe_code)]
pub mod region;

pub use canvas::HalfCanvas;
pub use flag::{FlagState, HandoffFlag};
pub use geometry::{FrameGeometry, Half, BYTES_PER_PIXEL};
pub use region::{DrawPort, PendingHalf, SharedFrame, TransferPort};
