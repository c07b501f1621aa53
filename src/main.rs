//! FM Radio Main Application
//!
//! Entry point for the STM32G474-based TEA5767 keypad radio.
//! Initializes hardware and spawns async tasks.

#![no_std]
#![no_main]

use defmt::{error, info, warn};
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_stm32::i2c::{self, I2c};
use embassy_stm32::mode::Blocking;
use embassy_stm32::time::Hertz;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use fm_tuner::drivers::display::Oled;
use fm_tuner::drivers::keypad::MatrixKeypad;
use fm_tuner::prelude::*;

/// Tuner wired to I2C1 with the OLED on I2C2
type Radio = Tuner<I2cLink<I2c<'static, Blocking>>, Oled<I2c<'static, Blocking>>>;

/// Keypad scanner over the board's row and column pins
type Keypad = MatrixKeypad<Output<'static>, Input<'static>>;

/// Key presses from the keypad task to the radio task
static KEYS: Channel<CriticalSectionRawMutex, Key, 4> = Channel::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("FM Radio Firmware v{}", env!("CARGO_PKG_VERSION"));

    // Initialize STM32G474 peripherals with default clock configuration
    let config = embassy_stm32::Config::default();
    let p = embassy_stm32::init(config);

    info!("Peripherals initialized");

    // Initialize status LED (typically on PA5 for Nucleo boards)
    let led = Output::new(p.PA5, Level::Low, Speed::Low);

    // I2C1 for the tuner: PB8 = SCL, PB9 = SDA
    let tuner_bus = I2c::new_blocking(
        p.I2C1,
        p.PB8,
        p.PB9,
        Hertz(I2C_FREQUENCY_HZ),
        i2c::Config::default(),
    );

    // I2C2 for the display: PA9 = SCL, PA8 = SDA
    let display_bus = I2c::new_blocking(
        p.I2C2,
        p.PA9,
        p.PA8,
        Hertz(I2C_FREQUENCY_HZ),
        i2c::Config::default(),
    );

    info!("I2C1/I2C2 initialized at {} Hz", I2C_FREQUENCY_HZ);

    let mut oled = Oled::new(display_bus);
    if oled.init().is_err() {
        warn!("display init failed, continuing without it");
    }

    let tuner = Tuner::new(I2cLink::new(tuner_bus), oled, TunerConfig::default());

    let keypad = MatrixKeypad::new(
        [
            Output::new(p.PC0, Level::High, Speed::Low),
            Output::new(p.PC1, Level::High, Speed::Low),
            Output::new(p.PC2, Level::High, Speed::Low),
            Output::new(p.PC3, Level::High, Speed::Low),
        ],
        [
            Input::new(p.PB0, Pull::Up),
            Input::new(p.PB1, Pull::Up),
            Input::new(p.PB2, Pull::Up),
            Input::new(p.PB10, Pull::Up),
        ],
    );

    // Spawn background tasks
    spawner.spawn(heartbeat_task(led)).unwrap();
    spawner.spawn(keypad_task(keypad)).unwrap();
    spawner.spawn(radio_task(tuner)).unwrap();

    info!("Tasks spawned");
}

/// Radio task - owns the tuner and applies key presses
#[embassy_executor::task]
async fn radio_task(mut tuner: Radio) {
    match tuner.init(DEFAULT_FREQUENCY_MHZ) {
        Ok(wait) => settle(wait).await,
        Err(e) => error!("tuner init failed: {}", e),
    }

    match tuner.read_frequency() {
        Ok(mhz) => info!("tuned to {} MHz", mhz),
        Err(e) => warn!("status read failed: {}", e),
    }

    loop {
        let key = KEYS.receive().await;

        match tuner.handle_key(key) {
            Ok(KeyResponse::SeekStarted(wait)) => {
                settle(wait).await;
                match tuner.complete_seek() {
                    Ok(report) if report.found_station() => {
                        info!("station at {} MHz", report.frequency);
                    }
                    Ok(report) if report.band_limit => {
                        info!("seek hit band edge at {} MHz", report.frequency);
                    }
                    Ok(report) => {
                        info!("seek stopped without a station at {} MHz", report.frequency);
                    }
                    Err(e) => error!("seek failed: {}", e),
                }
            }
            Ok(KeyResponse::Tuned(mhz)) => info!("tuned to {} MHz", mhz),
            Ok(_) => {}
            Err(e) => warn!("key {} failed: {}", key, e),
        }
    }
}

/// Keypad task - scans the matrix and forwards new presses
#[embassy_executor::task]
async fn keypad_task(mut keypad: Keypad) {
    loop {
        if let Some(key) = keypad.poll_key() {
            KEYS.send(key).await;
        }
        Timer::after(Duration::from_millis(u64::from(KEYPAD_POLL_MS))).await;
    }
}

/// Heartbeat task - blinks LED to show system is running
#[embassy_executor::task]
async fn heartbeat_task(mut led: Output<'static>) {
    loop {
        led.set_high();
        Timer::after(Duration::from_millis(100)).await;
        led.set_low();
        Timer::after(Duration::from_millis(900)).await;
    }
}

async fn settle(wait: SettleWait) {
    Timer::after(Duration::from_millis(u64::from(wait.as_millis()))).await;
}
