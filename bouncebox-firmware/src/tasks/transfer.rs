//! Transfer task
//!
//! Statically allocated and reused for every frame. Each wake-up from the
//! producer sends one half to the panel, then hands the region back.

use bouncebox_core::pipeline::TransferTask;
use bouncebox_drivers::display::Ili9341;
use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::Delay;

use crate::board::HALF_FRAME_BYTES;
use crate::channels::TRANSFER_READY;

/// The board's panel
pub type Panel = Ili9341<
    Spi<'static, SPI0, Blocking>,
    Output<'static>,
    Output<'static>,
    Output<'static>,
    Delay,
>;

/// Transfer side of the shared frame, bound to the panel
pub type PanelTransfer = TransferTask<'static, Panel, HALF_FRAME_BYTES>;

/// Transfer task
///
/// A display error leaves the half pending, which stalls the producer. There
/// is no retry.
#[embassy_executor::task]
pub async fn transfer_task(mut transfer: PanelTransfer) {
    info!("Transfer task started");

    loop {
        let half = TRANSFER_READY.wait().await;

        match transfer.run_once() {
            Ok(Some(sent)) => trace!("Sent {} half", sent),
            Ok(None) => warn!("Woken for {} half but nothing was pending", half),
            Err(e) => error!("Display write failed for {} half: {}", half, e),
        }
    }
}
