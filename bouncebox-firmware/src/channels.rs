//! Cross-core signalling
//!
//! The pixels themselves travel through the shared frame region; these
//! statics only carry wake-ups and the stop request.

use bouncebox_core::frame::Half;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use portable_atomic::AtomicBool;

/// Wakes the transfer task on core 1 once a half has been published
pub static TRANSFER_READY: Signal<CriticalSectionRawMutex, Half> = Signal::new();

/// Raised by the stop button; polled by the producer between frames
pub static STOP_REQUESTED: AtomicBool = AtomicBool::new(false);
