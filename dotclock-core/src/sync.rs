//! Companion sync channel
//!
//! Sends weather refresh triggers to the companion and turns the framed
//! byte stream coming back into [`SyncResponse`] values, one per frame, in
//! arrival order.
//!
//! Corrupt frames are dropped and the parser hunts for the next start
//! byte. Lost requests are not retried; the next scheduled request is the
//! retry.

use heapless::Vec;

use dotclock_hal::CompanionLink;
use dotclock_protocol::{FrameError, FrameParser, SyncResponse, WeatherRequest};

/// Bytes pulled from the link per read
pub const RX_CHUNK: usize = 64;

/// Link reads allowed per [`CompanionSyncChannel::next_response`] call
///
/// Keeps a link that never runs dry from stalling the caller.
pub const MAX_READS_PER_CALL: usize = 16;

/// Errors from sending a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncError {
    /// Request could not be encoded
    Encode(FrameError),
    /// Companion is not reachable
    Disconnected,
    /// Link rejected the write
    Link,
}

impl From<FrameError> for SyncError {
    fn from(e: FrameError) -> Self {
        SyncError::Encode(e)
    }
}

/// Channel counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncStats {
    pub requests_sent: u32,
    pub responses: u32,
    pub frames_dropped: u32,
    pub link_errors: u32,
}

/// Request/response channel to the companion
pub struct CompanionSyncChannel<L> {
    link: L,
    parser: FrameParser,
    rx: Vec<u8, RX_CHUNK>,
    rx_pos: usize,
    stats: SyncStats,
}

impl<L: CompanionLink> CompanionSyncChannel<L> {
    pub fn new(link: L) -> Self {
        Self {
            link,
            parser: FrameParser::new(),
            rx: Vec::new(),
            rx_pos: 0,
            stats: SyncStats::default(),
        }
    }

    /// Ask the companion for fresh weather
    pub fn request_weather(&mut self) -> Result<(), SyncError> {
        if !self.link.is_connected() {
            return Err(SyncError::Disconnected);
        }

        let bytes = WeatherRequest.to_frame()?.encode_to_vec()?;
        self.link.write(&bytes).map_err(|_| SyncError::Link)?;
        self.link.flush().map_err(|_| SyncError::Link)?;

        self.stats.requests_sent = self.stats.requests_sent.wrapping_add(1);
        debug!("weather request sent");
        Ok(())
    }

    /// Next decoded response, if one has arrived
    ///
    /// Bytes following a complete frame stay buffered for the next call.
    pub fn next_response(&mut self) -> Option<SyncResponse> {
        let mut reads = 0;
        loop {
            while self.rx_pos < self.rx.len() {
                let byte = self.rx[self.rx_pos];
                self.rx_pos += 1;

                match self.parser.feed(byte) {
                    Ok(Some(frame)) => match SyncResponse::from_frame(&frame) {
                        Ok(response) => {
                            self.stats.responses = self.stats.responses.wrapping_add(1);
                            if response.skipped > 0 {
                                warn!("response had {} unusable fields", response.skipped);
                            }
                            return Some(response);
                        }
                        Err(e) => self.drop_frame(e),
                    },
                    Ok(None) => {}
                    Err(e) => self.drop_frame(e),
                }
            }

            if reads == MAX_READS_PER_CALL || !self.refill() {
                return None;
            }
            reads += 1;
        }
    }

    /// Hand every pending response to `handler`, in arrival order
    ///
    /// Returns the number of responses delivered.
    pub fn poll_responses<F: FnMut(SyncResponse)>(&mut self, mut handler: F) -> usize {
        let mut delivered = 0;
        while let Some(response) = self.next_response() {
            handler(response);
            delivered += 1;
        }
        delivered
    }

    fn refill(&mut self) -> bool {
        self.rx.clear();
        self.rx_pos = 0;

        let mut chunk = [0u8; RX_CHUNK];
        match self.link.read(&mut chunk) {
            Ok(0) => false,
            Ok(n) => {
                // A misbehaving link may report more than it was given
                let n = n.min(RX_CHUNK);
                let _ = self.rx.extend_from_slice(&chunk[..n]);
                true
            }
            Err(_) => {
                self.stats.link_errors = self.stats.link_errors.wrapping_add(1);
                warn!("companion link read failed");
                false
            }
        }
    }

    fn drop_frame(&mut self, e: FrameError) {
        self.stats.frames_dropped = self.stats.frames_dropped.wrapping_add(1);
        warn!("dropped companion frame: {:?}", e);
    }

    pub fn is_connected(&self) -> bool {
        self.link.is_connected()
    }

    pub fn stats(&self) -> SyncStats {
        self.stats
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }
}
