//! Shaftlock - Shaft Brake Actuator Firmware
//!
//! Main firmware binary for RP2040-based controller boards. The entire
//! behavior is one decision cycle, invoked on a fixed ticker: sample the
//! panel and the current sense, run the core actuator, apply the motor and
//! indicator outputs, log what happened.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::{Duration, Instant, Ticker};
use {defmt_rtt as _, panic_probe as _};

use shaftlock_core::actuator::{Actuator, CycleEvent};
use shaftlock_drivers::{ControlPanel, HBridge, IndicatorLamp};
use shaftlock_hal::AnalogSource;

use crate::board::{BoardInput, BoardOutput, CurrentSense};
use crate::storage::SettingsFlash;

mod board;
mod storage;

/// Decision cycle interval
const CYCLE_INTERVAL_MS: u32 = 10;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Shaftlock firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Panel inputs: switch halves and selects pull up and close to ground,
    // engine sense is driven high by the ignition feed
    let panel = ControlPanel::new(
        BoardInput(Input::new(p.PIN_2, Pull::Up)),
        BoardInput(Input::new(p.PIN_3, Pull::Up)),
        BoardInput(Input::new(p.PIN_4, Pull::Up)),
        BoardInput(Input::new(p.PIN_5, Pull::Up)),
        BoardInput(Input::new(p.PIN_6, Pull::Down)),
    );

    // Indicator across its complementary pair
    let mut lamp = IndicatorLamp::new(
        BoardOutput(Output::new(p.PIN_7, Level::Low)),
        BoardOutput(Output::new(p.PIN_8, Level::Low)),
    );

    // Motor bridge: enable + direction lines
    let mut bridge = HBridge::new(
        BoardOutput(Output::new(p.PIN_10, Level::Low)),
        BoardOutput(Output::new(p.PIN_11, Level::Low)),
        BoardOutput(Output::new(p.PIN_12, Level::Low)),
    );

    // Motor current sense
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let mut current_sense = CurrentSense::new(adc, Channel::new_pin(p.PIN_26, Pull::None));

    // Settings live in the last flash sector
    let flash = SettingsFlash::new(p.FLASH);

    let start = Instant::now();
    let mut actuator = Actuator::new(flash, 0);
    info!(
        "Settings restored: position={}, run={}ms, limit={}",
        actuator.settings().position,
        actuator.settings().run_duration_ms,
        actuator.settings().max_current
    );

    let mut ticker = Ticker::every(Duration::from_millis(CYCLE_INTERVAL_MS as u64));
    let mut booted = false;

    loop {
        ticker.next().await;
        let now_ms = start.elapsed().as_millis() as u32;

        let current = current_sense.read();
        let inputs = panel.sample(current, now_ms);
        let outputs = actuator.cycle(&inputs);

        bridge.apply(&outputs.motor);
        lamp.set(outputs.indicator);

        if !booted && actuator.booted() {
            booted = true;
            if actuator.setup_mode() {
                info!("Boot complete, setup mode active");
            } else {
                info!("Boot complete");
            }
        }

        for event in &outputs.events {
            log_event(event);
        }
    }
}

/// Log one cycle event over defmt
fn log_event(event: &CycleEvent) {
    match event {
        CycleEvent::SwitchChanged(switch) => debug!("Switch: {}", switch),
        CycleEvent::SetupEntered => info!("Setup mode entry latched"),
        CycleEvent::AutoRelease => warn!("Engine interlock: forcing release"),
        CycleEvent::MotorStarted(direction) => info!("Motor started: {}", direction),
        CycleEvent::MotorStopped { direction, cause } => {
            info!("Motor stopped: {} ({})", direction, cause)
        }
        CycleEvent::CalibrationLearned(learned) => info!("Calibration: {}", learned),
        CycleEvent::SaveFailed(e) => warn!("Settings save failed: {}", e),
    }
}
