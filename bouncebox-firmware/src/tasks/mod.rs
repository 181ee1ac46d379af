//! Embassy async tasks
//!
//! Both tasks run on the core 1 executor. Core 0 is left to the producer's
//! busy loop.

pub mod stop_button;
pub mod transfer;

pub use stop_button::stop_button_task;
pub use transfer::transfer_task;
