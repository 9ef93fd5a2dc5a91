use crate::time::{Hertz, RateExtU32};

mod port;
mod uart_it;

pub use core::convert::Infallible;
pub use port::*;
pub use uart_it::*;

// ----------------------------------------------------------------------------

/// Register-level operations a serial port is built from.
pub trait UartPeriph {
    /// Program the baud generator and enable receiver, transmitter and the
    /// receive interrupt.
    fn enable(&mut self, config: &Config);
    /// Disable receiver, transmitter and the receive interrupt.
    fn disable(&mut self);

    fn write(&mut self, word: u8) -> nb::Result<(), Infallible>;
    /// The data register can take another byte.
    fn is_tx_empty(&self) -> bool;
    /// Every byte written so far has left the shift register.
    fn is_tx_complete(&self) -> bool;

    /// Raw read of the data register. Called from the receive interrupt, where
    /// a byte is known to be waiting.
    fn read(&mut self) -> u8;
}

/// Produce a second handle to the same peripheral.
pub trait Steal {
    /// # Safety
    ///
    /// The new handle aliases the same registers. Ensure the two handles are
    /// used in a way that cannot race, for example one only reads the data
    /// register from the receive interrupt while the other owns everything else.
    unsafe fn steal(&self) -> Self;
}

// ----------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Frequency of the clock feeding the baud generator.
    pub clock: Hertz,
    pub baudrate: u32,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            clock: 16.MHz(),
            baudrate: 9600,
        }
    }
}

impl Config {
    pub fn clock(mut self, clock: Hertz) -> Self {
        self.clock = clock;
        self
    }

    pub fn baudrate(mut self, baudrate: u32) -> Self {
        self.baudrate = baudrate;
        self
    }
}
