//! Frame-rate measurement

/// Counts published halves and reports a rate once per window
///
/// Each displayed frame is two halves, so the reported rate is the half
/// rate divided by two.
#[derive(Debug, Clone)]
pub struct FrameRateMeter {
    window: u32,
    count: u32,
    window_start_us: u64,
}

impl FrameRateMeter {
    /// Start measuring at `now_us`, reporting every `window` halves
    pub fn new(window: u32, now_us: u64) -> Self {
        Self {
            window: window.max(1),
            count: 0,
            window_start_us: now_us,
        }
    }

    pub fn window(&self) -> u32 {
        self.window
    }

    /// Record one published half
    ///
    /// Returns full frames per second when a window completes.
    pub fn record(&mut self, now_us: u64) -> Option<f32> {
        self.count += 1;
        if self.count < self.window {
            return None;
        }

        let elapsed_us = now_us.saturating_sub(self.window_start_us);
        self.count = 0;
        self.window_start_us = now_us;

        if elapsed_us == 0 {
            return None;
        }
        let halves_per_s = self.window as f32 * 1_000_000.0 / elapsed_us as f32;
        Some(halves_per_s / 2.0)
    }
}
