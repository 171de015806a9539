//! Companion link abstractions
//!
//! The watch talks to its paired companion over a byte link (Bluetooth
//! serial on hardware, an in-process loopback in the simulator). These
//! traits expose only non-blocking byte transfer; framing lives in
//! `dotclock-protocol`.

/// Link transmitter
pub trait CompanionTx {
    /// Error type for transmit operations
    type Error;

    /// Queue bytes for transmission
    ///
    /// Either the whole slice is accepted or an error is returned.
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Link receiver
pub trait CompanionRx {
    /// Error type for receive operations
    type Error;

    /// Read whatever bytes are pending without waiting
    ///
    /// Returns `Ok(0)` when nothing has arrived.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Check if the companion is currently reachable
    fn is_connected(&self) -> bool {
        true
    }
}

/// Combined link interface
///
/// For links that provide both directions on a single connection.
pub trait CompanionLink: CompanionTx + CompanionRx {}

// Blanket implementation
impl<T: CompanionTx + CompanionRx> CompanionLink for T {}
