//! Split-core frame pipeline
//!
//! The producer and transfer task each own one port of a
//! [`SharedFrame`](crate::frame::SharedFrame). They never touch the region
//! at the same time: the hand-off flag decides whose turn it is.

pub mod producer;
pub mod rate;
pub mod transfer;

pub use producer::{FrameProducer, FrameReport, TransferDispatch};
pub use rate::FrameRateMeter;
pub use transfer::TransferTask;
