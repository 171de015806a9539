//! dotclock host simulator
//!
//! Runs the watchface against in-memory storage, a loopback companion and
//! a terminal display, stepping a simulated clock one minute at a time.
//!
//! The config path is taken from `DOTCLOCK_CONFIG` (default
//! `dotclock.toml`); `RUST_LOG` controls log output.

mod companion;
mod config;
mod terminal;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use chrono::{Local, NaiveDateTime, Timelike};
use dotclock_core::{ClockFormat, Event, SettingsStore, WatchfaceController};
use dotclock_display::refresh;
use dotclock_hal::{BatteryChargeState, MemoryStorage, VibePattern, Vibrator};
use dotclock_protocol::SettingKey;
use log::{error, info, warn};

use crate::companion::LoopbackCompanion;
use crate::config::{ConfigError, SimConfig};
use crate::terminal::TerminalDisplay;

/// Default config file
const DEFAULT_CONFIG: &str = "dotclock.toml";

/// Simulated battery drains one percent this often
const BATTERY_DRAIN_MINUTES: u32 = 10;

/// Logs instead of buzzing
struct LogVibrator;

impl Vibrator for LogVibrator {
    fn vibrate(&mut self, pattern: VibePattern) {
        info!("bzzz {:?} ({} ms)", pattern, pattern.duration_ms());
    }
}

fn seeded_storage(config: &SimConfig) -> MemoryStorage {
    let mut store = SettingsStore::new(MemoryStorage::new());
    if let Some(settings) = &config.settings {
        for key in SettingKey::ALL {
            if let Err(e) = store.save(key, settings.get(key)) {
                warn!("could not seed {}: {:?}", key.name(), e);
            }
        }
    }
    store.into_inner()
}

fn run(config: SimConfig) -> Result<(), ConfigError> {
    let start = match config.clock.start_time()? {
        Some(start) => start,
        None => Local::now().naive_local(),
    };
    let start = start.with_second(0).unwrap_or(start);

    let (width, height) = (config.layout.screen_width, config.layout.screen_height);
    let mut display = TerminalDisplay::new(std::io::stdout(), width, height);
    let mut face = WatchfaceController::new(
        config.layout,
        seeded_storage(&config),
        LoopbackCompanion::new(config.companion.clone()),
        LogVibrator,
        ClockFormat::from_24h_flag(config.clock.use_24h),
    );

    let mut battery = BatteryChargeState::discharging(80);
    face.start(start, battery, config.companion.enabled);
    face.service_companion();
    redraw(&mut face, &mut display);

    for minute in 1..=config.clock.minutes {
        let now: NaiveDateTime = start + chrono::Duration::minutes(i64::from(minute));

        if config.companion.disconnect_after == Some(minute) {
            face.channel_mut().link_mut().set_connected(false);
            face.handle(Event::BluetoothChange(false));
        }

        if let Some(push) = config.companion.push.filter(|p| p.at == minute) {
            info!("companion: pushing settings");
            face.channel_mut().link_mut().push_settings(push.patch());
        }

        face.handle(Event::Tick(now));

        if minute % BATTERY_DRAIN_MINUTES == 0 && battery.charge_percent > 0 {
            battery = BatteryChargeState::discharging(battery.charge_percent - 1);
            face.handle(Event::BatteryChange(battery));
        }

        face.service_companion();
        redraw(&mut face, &mut display);

        if config.clock.tick_ms > 0 {
            std::thread::sleep(Duration::from_millis(config.clock.tick_ms));
        }
    }

    let stats = face.channel().stats();
    info!(
        "done: {} frames, {} requests ({} answered by companion), {} responses, {} dropped",
        display.frames_drawn(),
        stats.requests_sent,
        face.channel().link().requests_seen(),
        stats.responses,
        stats.frames_dropped
    );
    Ok(())
}

fn redraw<W: std::io::Write>(
    face: &mut WatchfaceController<MemoryStorage, LoopbackCompanion, LogVibrator>,
    display: &mut TerminalDisplay<W>,
) {
    if let Err(e) = refresh(face, display) {
        warn!("redraw failed: {:?}", e);
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::var_os("DOTCLOCK_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    let result = SimConfig::load(&path).and_then(run);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
