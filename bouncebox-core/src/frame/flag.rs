//! Hand-off flag between the producer and transfer contexts
//!
//! The flag is the only synchronization between the two cores. The producer
//! is the only writer of `Ready`, the transfer side the only writer of
//! `Idle`. Stores use release ordering and loads use acquire ordering so the
//! pixel writes made before a store are visible to whoever observes it.

use portable_atomic::{AtomicU8, Ordering};

use super::Half;

const IDLE: u8 = 0;
const TOP_READY: u8 = 1;
const BOTTOM_READY: u8 = 2;

/// Decoded flag value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlagState {
    /// No half is pending; the producer may draw
    Idle,
    /// A drawn half is waiting to be (or being) transferred
    Ready(Half),
}

impl FlagState {
    pub fn is_idle(self) -> bool {
        self == Self::Idle
    }

    const fn encode(self) -> u8 {
        match self {
            Self::Idle => IDLE,
            Self::Ready(Half::Top) => TOP_READY,
            Self::Ready(Half::Bottom) => BOTTOM_READY,
        }
    }

    const fn decode(raw: u8) -> Self {
        match raw {
            TOP_READY => Self::Ready(Half::Top),
            BOTTOM_READY => Self::Ready(Half::Bottom),
            _ => Self::Idle,
        }
    }
}

/// Tri-state atomic flag, initialized to `Idle`
#[derive(Debug)]
pub struct HandoffFlag(AtomicU8);

impl HandoffFlag {
    pub const fn new() -> Self {
        Self(AtomicU8::new(IDLE))
    }

    pub fn load(&self) -> FlagState {
        FlagState::decode(self.0.load(Ordering::Acquire))
    }

    pub(crate) fn store(&self, state: FlagState) {
        self.0.store(state.encode(), Ordering::Release);
    }
}

impl Default for HandoffFlag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_starts_idle() {
        let flag = HandoffFlag::new();
        assert_eq!(flag.load(), FlagState::Idle);
        assert!(flag.load().is_idle());
    }

    #[test]
    fn test_flag_store_load() {
        let flag = HandoffFlag::new();
        flag.store(FlagState::Ready(Half::Bottom));
        assert_eq!(flag.load(), FlagState::Ready(Half::Bottom));
        flag.store(FlagState::Ready(Half::Top));
        assert_eq!(flag.load(), FlagState::Ready(Half::Top));
        flag.store(FlagState::Idle);
        assert!(flag.load().is_idle());
    }
}
