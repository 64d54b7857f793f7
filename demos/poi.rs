//! Poi firmware for a XIAO RP2040.
//!
//! Wiring:
//! - three WS2812 strips on GPIO26, GPIO27, GPIO28 (strip slots 0, 1, 2)
//! - push switch from GPIO7 to ground
//! - 5-position DIP switch on GPIO0, GPIO1, GPIO2, GPIO4, GPIO3 (positions 0–4), pulled up
//! - user LED on GPIO25, driven high when the orientation switch is set
//!
//! Build with `cargo firmware`.
#![no_std]
#![no_main]
#![cfg(not(feature = "host"))]
#![allow(unsafe_code, reason = "bind_interrupts! defines the PIO interrupt handler")]

use core::convert::Infallible;

use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{InterruptHandler, Pio};
use poi_envoy::{
    Error, Result,
    animation::gallery::STRIP_LEN,
    packed_frame::{Orientation, PackedFrame},
    playback::{ButtonFlag, Playback},
    poi::{ButtonLine, run_poi, watch_button},
    selector::{SelectAnimation, SelectorSwitch},
    transmit::parallel_ws2812::ParallelWs2812,
};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => InterruptHandler<PIO0>;
});

static PRESS: ButtonFlag = ButtonFlag::new();
static LINE: ButtonLine = ButtonLine::new();
static FRAME: StaticCell<PackedFrame<STRIP_LEN>> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, Irqs);
    let transmitter =
        ParallelWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_26, p.PIN_27, p.PIN_28);

    let mut selector = SelectorSwitch::new([
        Input::new(p.PIN_0, Pull::Up),
        Input::new(p.PIN_1, Pull::Up),
        Input::new(p.PIN_2, Pull::Up),
        Input::new(p.PIN_4, Pull::Up),
        Input::new(p.PIN_3, Pull::Up),
    ]);

    // The orientation is read once; only the animation is reselected on release.
    let orientation = selector.orientation();
    let user_level = match orientation {
        Orientation::Normal => Level::Low,
        Orientation::Reversed => Level::High,
    };
    let _user_led = Output::new(p.PIN_25, user_level);
    defmt::info!("poi: orientation {}", orientation);

    let token = button_task(Input::new(p.PIN_7, Pull::Up));
    spawner.spawn(token).map_err(Error::TaskSpawn)?;

    let playback = Playback::new(selector.select(), orientation, &PRESS);
    let frame = FRAME.init(PackedFrame::new());
    run_poi(playback, transmitter, selector, &LINE, frame).await
}

#[embassy_executor::task]
async fn button_task(input: Input<'static>) -> ! {
    watch_button(input, &PRESS, &LINE).await
}
