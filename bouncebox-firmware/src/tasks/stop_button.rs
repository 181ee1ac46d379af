//! Stop button task
//!
//! Waits for the operator to press the stop button, then asks the producer
//! to finish. The producer notices between frames.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Timer;
use portable_atomic::Ordering;

use crate::board::STOP_DEBOUNCE_MS;
use crate::channels::STOP_REQUESTED;

/// Stop button task
///
/// A press shorter than the debounce time is treated as noise.
#[embassy_executor::task]
pub async fn stop_button_task(mut button: Input<'static>) {
    info!("Stop button task started");

    loop {
        button.wait_for_falling_edge().await;
        Timer::after_millis(STOP_DEBOUNCE_MS).await;

        if button.is_low() {
            break;
        }
        debug!("Ignoring stop button bounce");
    }

    info!("Stop requested");
    STOP_REQUESTED.store(true, Ordering::Release);
}
