//! Bouncebox - split-core bouncing boxes demo
//!
//! Core 0 moves 100 boxes and draws them into one half of a virtual
//! 320x240 frame. Core 1 streams the finished half to an ILI9341 panel
//! while core 0 starts on the other half. Both share a single half-height
//! buffer, handed back and forth through an atomic flag.
//!
//! Pressing the stop button ends the animation once the half in flight
//! has reached the panel.

#![no_std]
#![no_main]

use bouncebox_core::frame::{Half, SharedFrame};
use bouncebox_core::physics::{spawn_boxes, Bounds};
use bouncebox_core::pipeline::{FrameProducer, TransferTask};
use bouncebox_drivers::display::Ili9341;
use defmt::*;
use embassy_executor::{Executor, Spawner};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::multicore::{spawn_core1, Stack};
use embassy_rp::spi::Spi;
use embassy_time::{Delay, Instant, Timer};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::board::{CORE1_STACK_SIZE, HALF_FRAME_BYTES};
use crate::channels::{STOP_REQUESTED, TRANSFER_READY};
use crate::clock::EmbassyClock;

mod board;
mod channels;
mod clock;
mod tasks;

/// The one half-frame buffer both cores share
static FRAME: SharedFrame<HALF_FRAME_BYTES> = SharedFrame::new(board::GEOMETRY);

static mut CORE1_STACK: Stack<CORE1_STACK_SIZE> = Stack::new();
static EXECUTOR1: StaticCell<Executor> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Bouncebox starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Display on SPI0
    let spi = Spi::new_blocking(
        p.SPI0,
        p.PIN_18,
        p.PIN_19,
        p.PIN_16,
        board::spi_config(&board::SPI_BUS),
    );
    let dc = Output::new(p.PIN_20, Level::Low);
    let cs = Output::new(p.PIN_22, Level::High);
    let rst = Output::new(p.PIN_21, Level::High);

    let mut display = Ili9341::new(spi, dc, cs, rst, Delay, board::DISPLAY);
    if let Err(e) = display.init() {
        error!("Display init failed: {}", e);
        return;
    }
    info!(
        "Display initialized: {}x{} at {} Hz",
        board::DISPLAY.width,
        board::DISPLAY.height,
        board::SPI_BUS.frequency_hz
    );

    let stop_button = Input::new(p.PIN_15, Pull::Up);

    let Some((draw, transfer)) = FRAME.split() else {
        error!("Shared frame already split");
        return;
    };
    let transfer = TransferTask::new(transfer, display);

    // Core 1 owns the panel from here on
    #[allow(static_mut_refs)]
    let core1_stack = unsafe { &mut CORE1_STACK };
    spawn_core1(p.CORE1, core1_stack, move || {
        let executor = EXECUTOR1.init(Executor::new());
        executor.run(|spawner| {
            spawner.spawn(tasks::transfer_task(transfer)).unwrap();
            spawner.spawn(tasks::stop_button_task(stop_button)).unwrap();
        })
    });
    info!("Core 1 started");

    let mut rng = SmallRng::seed_from_u64(Instant::now().as_ticks());
    let bounds = Bounds::new(board::DISPLAY.width, board::DISPLAY.height);
    let boxes = spawn_boxes(&board::ANIMATION, bounds, &mut rng);
    debug!("Spawned {} boxes", boxes.len());

    let mut producer = FrameProducer::new(draw, boxes, EmbassyClock, board::ANIMATION.rate_window);

    // Never yields: core 0 has nothing else to run
    let mut dispatch = |half: Half| TRANSFER_READY.signal(half);
    let frames = producer.run(&mut dispatch, &STOP_REQUESTED, |report| {
        if let Some(fps) = report.frame_rate {
            info!("{} fps", fps);
        }
    });

    info!("Stopped after {} half-frames", frames);

    loop {
        Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
