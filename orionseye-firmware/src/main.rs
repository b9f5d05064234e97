//! Orion's Eye - Spectrometer Device Firmware
//!
//! Main firmware binary for ESP32-CAM boards. Opens the serial console,
//! prints the startup banner and then idles while the rest of the device
//! stack (WiFi, MQTT uplink, camera capture) is brought up in later work.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use esp_hal::clock::CpuClock;
use esp_hal::delay::Delay;
use esp_hal::timer::timg::TimerGroup;
use static_cell::StaticCell;
use {esp_backtrace as _, esp_println as _};

use orionseye_core::config::FirmwareConfig;
use orionseye_core::device::{DeviceId, DeviceInfo};
use orionseye_core::lifecycle::Lifecycle;
use orionseye_hal::NullConsole;
use orionseye_hal_esp32::{open_console, EfuseIdentity};
use orionseye_protocol::{Topic, TopicKind};

use crate::channels::IDLE_TICK;

mod channels;
mod config;
mod tasks;

// Application descriptor required by the ESP-IDF second-stage bootloader
esp_bootloader_esp_idf::esp_app_desc!();

/// Log a heartbeat every this many idle ticks
const HEARTBEAT_EVERY: u32 = 60;

// Configuration must live forever for task references
static CONFIG: StaticCell<FirmwareConfig> = StaticCell::new();

/// Main entry point
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    let p = esp_hal::init(esp_hal::Config::default().with_cpu_clock(CpuClock::max()));

    // Time driver for embassy-time
    let timg0 = TimerGroup::new(p.TIMG0);
    esp_rtos::start(timg0.timer0);

    info!("Orion's Eye firmware starting...");

    let config: &'static FirmwareConfig = CONFIG.init(config::load());
    let mut lifecycle = Lifecycle::new(config);
    let mut delay = Delay::new();

    // Setup hook: console on UART0 (TX GPIO1), then the banner
    match open_console(p.UART0, p.GPIO1, &config.console) {
        Ok(mut console) => {
            info!("Console open at {} baud", config.console.baudrate);
            if let Err(e) = lifecycle.setup(&mut console, &mut delay) {
                warn!("Banner not written: {}", e);
            }
        }
        Err(e) => {
            error!("Console UART config rejected: {}", Debug2Format(&e));
            // Keep the lifecycle moving so the device still idles
            let _ = lifecycle.setup(&mut NullConsole, &mut delay);
        }
    }

    let info = DeviceInfo::new(DeviceId::read(&EfuseIdentity), &config.device);
    info!(
        "Device {} \"{}\" model={} firmware={}",
        info.id.as_str(),
        info.name.as_str(),
        info.model.as_str(),
        info.firmware.as_str()
    );
    log_topics(config.mqtt.topic_prefix.as_str(), info.id.as_str());

    spawner.spawn(tasks::idle_task(lifecycle)).unwrap();

    info!("Setup complete, idling");

    // Main task only reports liveness; the idle hook runs in its own task
    loop {
        let ticks = IDLE_TICK.wait().await;
        if ticks % HEARTBEAT_EVERY == 0 {
            info!("Heartbeat: {} idle periods", ticks);
        }
    }
}

/// Log the MQTT topics this device owns
fn log_topics(prefix: &str, device_id: &str) {
    for kind in TopicKind::ALL {
        match Topic::new(prefix, device_id, kind).render() {
            Ok(topic) => info!("{} topic ({}): {}", kind, kind.direction(), topic.as_str()),
            Err(e) => warn!("Cannot build {} topic: {}", kind, e),
        }
    }
}
