//! Watchface controller
//!
//! Owns the settings, weather and face view, and turns host and companion
//! events into view updates and side effects (weather requests, settings
//! writes, vibration). Nothing here can fail in a way that stops the face:
//! collaborator errors are logged and the event is otherwise completed.

use chrono::NaiveDateTime;

use dotclock_hal::{BatteryChargeState, CompanionLink, SettingsStorage, VibePattern, Vibrator};
use dotclock_protocol::SyncResponse;

use crate::config::{LayoutConfig, Settings};
use crate::render::{vertical_offset, BinaryGridRenderer, ClockFormat, Grid, TimeSample};
use crate::state::{Event, State};
use crate::store::SettingsStore;
use crate::sync::CompanionSyncChannel;
use crate::text::{format_battery, format_date, format_weather};
use crate::view::{FaceView, FontKey, Palette, TextField};
use crate::weather::WeatherState;

/// Weather is refreshed when the minute is a multiple of this
pub const WEATHER_REFRESH_MINUTES: u8 = 30;

/// Hourly chime period in minutes
pub const HOURLY_MINUTES: u8 = 60;

/// Binary watchface
pub struct WatchfaceController<S, L, V> {
    state: State,
    store: SettingsStore<S>,
    channel: CompanionSyncChannel<L>,
    vibrator: V,
    renderer: BinaryGridRenderer,
    clock_format: ClockFormat,
    settings: Settings,
    weather: WeatherState,
    battery: BatteryChargeState,
    bluetooth_connected: bool,
    last_sample: Option<TimeSample>,
    view: FaceView,
    dirty: bool,
}

impl<S, L, V> WatchfaceController<S, L, V>
where
    S: SettingsStorage,
    L: CompanionLink,
    V: Vibrator,
{
    pub fn new(
        layout: LayoutConfig,
        storage: S,
        link: L,
        vibrator: V,
        clock_format: ClockFormat,
    ) -> Self {
        let view = FaceView {
            palette: Palette::default(),
            ring_thickness: layout.circle_line_thickness,
            grid: Grid::default(),
            date: TextField::new(layout.date_frame, FontKey::Large),
            weather: TextField::new(layout.weather_frame, FontKey::Medium),
            battery: TextField::new(layout.battery_frame, FontKey::Small),
        };

        Self {
            state: State::Initializing,
            store: SettingsStore::new(storage),
            channel: CompanionSyncChannel::new(link),
            vibrator,
            renderer: BinaryGridRenderer::new(layout),
            clock_format,
            settings: Settings::default(),
            weather: WeatherState::Loading,
            battery: BatteryChargeState::default(),
            bluetooth_connected: false,
            last_sample: None,
            view,
            dirty: true,
        }
    }

    /// Load settings, take the first readings and draw the first frame
    ///
    /// The initial bluetooth state is recorded without vibrating. The first
    /// render is an ordinary tick, so a start on the hour or half hour
    /// chimes and requests weather like any other tick.
    pub fn start(&mut self, now: NaiveDateTime, battery: BatteryChargeState, connected: bool) {
        if self.state != State::Initializing {
            warn!("start called twice, ignoring");
            return;
        }

        self.settings = self.store.load_all();
        debug!("settings loaded: {:?}", self.settings);

        self.bluetooth_connected = connected;
        self.on_battery(battery);
        self.weather = WeatherState::Loading;
        self.refresh_weather_text();
        self.refresh_layout();
        self.on_tick(now);

        self.handle(Event::InitComplete);
        info!("watchface ready");
    }

    /// Dispatch one event
    pub fn handle(&mut self, event: Event) {
        if !self.state.accepts(&event) {
            warn!("ignoring {:?} in state {:?}", event, self.state);
            return;
        }

        let next = self.state.transition(&event);
        trace!("event {:?}", event);

        match event {
            Event::InitComplete => {}
            Event::Tick(now) => self.on_tick(now),
            Event::BatteryChange(battery) => self.on_battery(battery),
            Event::BluetoothChange(connected) => self.on_bluetooth(connected),
            Event::SyncResponse(response) => self.on_sync_response(response),
        }

        self.state = next;
    }

    /// Dispatch every response waiting on the companion link
    ///
    /// Returns the number of responses handled.
    pub fn service_companion(&mut self) -> usize {
        let mut handled = 0;
        while let Some(response) = self.channel.next_response() {
            self.handle(Event::SyncResponse(response));
            handled += 1;
        }
        handled
    }

    /// Host clock style changed
    pub fn set_clock_format(&mut self, format: ClockFormat) {
        if format == self.clock_format {
            return;
        }
        self.clock_format = format;
        self.refresh_grid();
    }

    fn on_tick(&mut self, now: NaiveDateTime) {
        let sample = TimeSample::capture(&now);
        self.last_sample = Some(sample);
        self.refresh_grid();
        self.view.date.set_text(&format_date(&now));
        self.dirty = true;

        if sample.on_period(WEATHER_REFRESH_MINUTES) {
            if let Err(e) = self.channel.request_weather() {
                warn!("weather request failed: {:?}", e);
            }
        }

        if self.settings.hourly_vibrate && sample.on_period(HOURLY_MINUTES) {
            self.vibrator.vibrate(VibePattern::ShortPulse);
        }
    }

    fn on_battery(&mut self, battery: BatteryChargeState) {
        self.battery = battery;
        self.view.battery.set_text(&format_battery(&battery));
        self.dirty = true;
    }

    fn on_bluetooth(&mut self, connected: bool) {
        if connected != self.bluetooth_connected {
            info!("companion {}", if connected { "connected" } else { "disconnected" });
            if self.settings.bluetooth_vibrate {
                self.vibrator.vibrate(VibePattern::DoublePulse);
            }
        }
        self.bluetooth_connected = connected;
    }

    fn on_sync_response(&mut self, response: SyncResponse) {
        if self.weather.apply(&response) {
            self.refresh_weather_text();
        }

        if !response.settings.is_empty() {
            if self.settings.apply(&response.settings) {
                debug!("settings changed: {:?}", self.settings);
            }
            // Failures were logged per key; the new values still apply
            let _ = self.store.save_patch(&response.settings);
        }

        self.refresh_layout();
        self.dirty = true;
    }

    fn refresh_weather_text(&mut self) {
        self.view.weather.set_text(&format_weather(&self.weather));
        self.dirty = true;
    }

    /// Re-derive palette, visibility and grid placement from the settings
    fn refresh_layout(&mut self) {
        self.view.palette = Palette::for_inverted(self.settings.invert_colours);
        self.view.date.visible = self.settings.show_date;
        self.view.weather.visible = self.settings.show_weather;
        self.view.battery.visible = self.settings.battery_percentage_visible;
        self.refresh_grid();
    }

    fn refresh_grid(&mut self) {
        let Some(sample) = self.last_sample else {
            return;
        };
        let offset = vertical_offset(self.renderer.layout(), &self.settings);
        self.view.grid = self.renderer.render(sample, self.clock_format, offset);
        self.dirty = true;
    }

    /// Current face description
    pub fn view(&self) -> &FaceView {
        &self.view
    }

    /// Check if the view changed since the last [`mark_clean`](Self::mark_clean)
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Host has drawn the current view
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn weather(&self) -> &WeatherState {
        &self.weather
    }

    pub fn battery(&self) -> BatteryChargeState {
        self.battery
    }

    pub fn is_bluetooth_connected(&self) -> bool {
        self.bluetooth_connected
    }

    pub fn clock_format(&self) -> ClockFormat {
        self.clock_format
    }

    pub fn channel(&self) -> &CompanionSyncChannel<L> {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut CompanionSyncChannel<L> {
        &mut self.channel
    }

    pub fn store(&self) -> &SettingsStore<S> {
        &self.store
    }

    pub fn vibrator(&self) -> &V {
        &self.vibrator
    }
}
