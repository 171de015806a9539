//! In-process companion
//!
//! Plays the phone side of the link: every weather request written by the
//! watch is answered with a canned response, and settings pushes can be
//! queued by the simulation script.

use std::collections::VecDeque;
use std::convert::Infallible;

use dotclock_hal::{CompanionRx, CompanionTx};
use dotclock_protocol::{FrameParser, SettingsPatch, SyncResponse, WeatherRequest};
use log::{debug, info, warn};

use crate::config::CompanionConfig;

/// Loopback companion link
pub struct LoopbackCompanion {
    config: CompanionConfig,
    connected: bool,
    parser: FrameParser,
    inbound: VecDeque<u8>,
    requests_seen: u32,
}

impl LoopbackCompanion {
    pub fn new(config: CompanionConfig) -> Self {
        Self {
            connected: config.enabled,
            config,
            parser: FrameParser::new(),
            inbound: VecDeque::new(),
            requests_seen: 0,
        }
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    pub fn requests_seen(&self) -> u32 {
        self.requests_seen
    }

    /// Queue a settings change, as if edited on the phone
    pub fn push_settings(&mut self, settings: SettingsPatch) {
        self.send(&SyncResponse {
            settings,
            ..SyncResponse::default()
        });
    }

    fn weather_response(&self) -> SyncResponse {
        SyncResponse {
            temperature: self.config.temperature,
            conditions: self
                .config
                .conditions
                .as_deref()
                .map(dotclock_protocol::messages::truncate_into),
            ..SyncResponse::default()
        }
    }

    fn send(&mut self, response: &SyncResponse) {
        match response.to_frame().and_then(|f| f.encode_to_vec()) {
            Ok(bytes) => self.inbound.extend(bytes.iter().copied()),
            Err(e) => warn!("companion could not encode response: {:?}", e),
        }
    }
}

impl CompanionTx for LoopbackCompanion {
    type Error = Infallible;

    fn write(&mut self, data: &[u8]) -> Result<(), Infallible> {
        for &byte in data {
            match self.parser.feed(byte) {
                Ok(Some(frame)) => {
                    if WeatherRequest::from_frame(&frame).is_ok() {
                        self.requests_seen += 1;
                        info!("companion: weather requested");
                        let response = self.weather_response();
                        self.send(&response);
                    } else {
                        debug!("companion: ignoring frame {:?}", frame.kind);
                    }
                }
                Ok(None) => {}
                Err(e) => warn!("companion: bad frame from watch: {:?}", e),
            }
        }
        Ok(())
    }
}

impl CompanionRx for LoopbackCompanion {
    type Error = Infallible;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Infallible> {
        let n = buf.len().min(self.inbound.len());
        for (slot, byte) in buf.iter_mut().zip(self.inbound.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}
