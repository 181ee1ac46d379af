//! Monotonic time source

/// Microsecond timestamps for frame-rate measurement
pub trait Clock {
    /// Microseconds since an arbitrary, fixed epoch
    fn now_micros(&self) -> u64;
}
