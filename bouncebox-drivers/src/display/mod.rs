//! Display drivers
//!
//! Panels implement [`bouncebox_core::traits::BlockWriter`] so the transfer
//! task can push half-frames to them.

pub mod ili9341;

pub use ili9341::{DisplayError, Ili9341};
