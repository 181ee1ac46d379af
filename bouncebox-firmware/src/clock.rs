//! Embassy-backed time source

use bouncebox_core::traits::Clock;
use embassy_time::Instant;

/// Microseconds since boot from the embassy time driver
#[derive(Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_micros(&self) -> u64 {
        Instant::now().as_micros()
    }
}
