//! State machine definition

use super::events::Event;

/// Watchface states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Loading settings, taking first battery and bluetooth readings
    #[default]
    Initializing,
    /// Face drawn, handling events
    Ready,
}

impl State {
    /// Check if host and companion events are handled in this state
    pub fn is_ready(&self) -> bool {
        matches!(self, State::Ready)
    }

    /// Check if `event` is acted on in this state
    pub fn accepts(&self, event: &Event) -> bool {
        match self {
            State::Initializing => matches!(event, Event::InitComplete),
            State::Ready => !matches!(event, Event::InitComplete),
        }
    }

    /// Process an event and return the next state
    pub fn transition(self, event: &Event) -> Self {
        match (self, event) {
            (State::Initializing, Event::InitComplete) => State::Ready,
            // Default: stay in current state
            _ => self,
        }
    }
}
