//! SmartWindow — host entry point.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                    │
//! │  Console (stdin) ─▶ http / bus / poll translation ─▶ Inbox│
//! │  HardwareAdapter  LogEventSink  ClimateSensor  Clock      │
//! │  ─────────────── Port Trait Boundary ──────────────────   │
//! │  ┌─────────────────────────────────────────────────────┐  │
//! │  │        ControllerService (pure logic)               │  │
//! │  │  Dedup · Pest mode · Decision Rule · Pump cycle     │  │
//! │  └─────────────────────────────────────────────────────┘  │
//! │  ControlLoop (single consumer)  ─▶ StatusBoard (/data)    │
//! └───────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::io::BufRead;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, info, warn};

use smartwindow::adapters::console::{Console, Outcome, parse_line};
use smartwindow::adapters::hardware::HardwareAdapter;
use smartwindow::adapters::http::AirQualityReport;
use smartwindow::adapters::log_sink::LogEventSink;
use smartwindow::adapters::time::MonotonicClock;
use smartwindow::app::service::ControllerService;
use smartwindow::app::status::StatusBoard;
use smartwindow::config::ControllerConfig;
use smartwindow::drivers::pump::PumpDriver;
use smartwindow::drivers::window::WindowServo;
use smartwindow::drivers::{WATER_PUMP_GPIO, WINDOW_SERVO_PIN};
use smartwindow::events::Inbox;
use smartwindow::runtime::ControlLoop;
use smartwindow::sensors::climate::ClimateSensor;

fn load_config() -> Result<ControllerConfig> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config {path}"))?;
            let cfg: ControllerConfig =
                serde_json::from_str(&text).with_context(|| format!("parsing config {path}"))?;
            info!("Config loaded from {}", path);
            cfg
        }
        None => {
            info!("No config file given, using defaults");
            ControllerConfig::default()
        }
    };
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("SmartWindow v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Config ─────────────────────────────────────────────
    let config = load_config()?;

    // ── 3. Adapters ───────────────────────────────────────────
    let clock = MonotonicClock::new();
    let inbox = Arc::new(Inbox::new());
    let board = Arc::new(StatusBoard::new());
    let sensor = ClimateSensor::new(ClimateSensor::DEFAULT_ADDR);
    let hw = HardwareAdapter::new(
        WindowServo::new(WINDOW_SERVO_PIN),
        PumpDriver::new(WATER_PUMP_GPIO),
    );

    // ── 4. Controller ─────────────────────────────────────────
    let mut service = ControllerService::new(&config, hw, LogEventSink::new())
        .with_status_board(Arc::clone(&board));
    service.start();

    // ── 5. Console transport ──────────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    let console = Console::new(
        Arc::clone(&inbox),
        Arc::clone(&board),
        sensor.injector(),
        config.topic_prefix.clone(),
        clock,
    );
    let _console = {
        let running = Arc::clone(&running);
        std::thread::Builder::new()
            .name("console".into())
            .spawn(move || {
                let stdin = std::io::stdin();
                for line in stdin.lock().lines() {
                    let Ok(line) = line else { break };
                    match parse_line(&line) {
                        Ok(Some(parsed)) => match console.execute(parsed) {
                            Outcome::Reply(text) => println!("{text}"),
                            Outcome::Quit => break,
                        },
                        Ok(None) => {}
                        Err(usage) => println!("error: {usage}"),
                    }
                }
                running.store(false, Ordering::Relaxed);
            })
            .context("spawning console thread")?
    };

    // ── 6. Control loop ───────────────────────────────────────
    let mut control = ControlLoop::new(&config, service, sensor, Arc::clone(&inbox));
    let interval = Duration::from_millis(config.control_loop_interval_ms);
    info!("System ready. Entering control loop.");

    while running.load(Ordering::Relaxed) {
        let report = control.run_once(clock.uptime_ms());
        let uplink = report
            .sample
            .and_then(|_| AirQualityReport::from_status(&board.read()));
        if let Some(uplink) = uplink {
            debug!("uplink {}", uplink.to_json());
        }
        std::thread::sleep(interval);
    }

    let dropped = inbox.dropped_count();
    if dropped > 0 {
        warn!("{} inputs were dropped on a full inbox", dropped);
    }
    info!("Shutting down");
    Ok(())
}
