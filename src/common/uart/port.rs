//! A serial port: interrupt-fed receive queue plus blocking transmit.
//!
//! Transmission is deliberately synchronous. [`SerialPort::write_byte`] spins on
//! the data-register-empty flag with no timeout; the main loop has nothing else
//! to run while it waits.

use super::*;
use crate::common::ringbuf::{Consumer, RingBuffer};
use embedded_hal_nb as e_nb;
use embedded_io::{ErrorType, Read, ReadReady, Write, WriteReady};

pub struct SerialPort<'a, U, const N: usize> {
    uart: U,
    rx: Consumer<'a, N>,
}

impl<'a, U, const N: usize> SerialPort<'a, U, N>
where
    U: UartPeriph + Steal,
{
    /// Bind `uart` to its receive buffer. Touches no hardware.
    ///
    /// The returned handler owns the producing half of `rx_buffer` and must be
    /// installed on the receive-complete vector before the port is opened.
    pub fn configure(
        uart: U,
        rx_buffer: &'a mut RingBuffer<N>,
    ) -> (Self, UartInterruptRxHandler<'a, U, N>) {
        let (w, r) = rx_buffer.split();
        let it_uart = unsafe { uart.steal() };
        (
            Self { uart, rx: r },
            UartInterruptRxHandler::new(it_uart, w),
        )
    }
}

impl<U, const N: usize> SerialPort<'_, U, N>
where
    U: UartPeriph,
{
    pub fn open(&mut self, config: Config) {
        log::debug!("serial open: {} baud", config.baudrate);
        self.uart.enable(&config);
    }

    /// Wait for the last byte to leave the wire, then disable the USART.
    pub fn close(&mut self) {
        log::debug!("serial close");
        self.wait_tx_complete();
        self.uart.disable();
    }

    // RX -----------------------------------------------------------------

    /// Number of received bytes not read yet.
    #[inline]
    pub fn pending(&self) -> usize {
        self.rx.pending()
    }

    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.rx.peek()
    }

    #[inline]
    pub fn read_byte(&mut self) -> Option<u8> {
        self.rx.pop()
    }

    /// Drop everything received so far.
    pub fn clear(&mut self) {
        let n = self.rx.pending();
        if n > 0 {
            log::trace!("serial clear: {} bytes dropped", n);
        }
        self.rx.clear();
    }

    // TX -----------------------------------------------------------------

    pub fn write_byte(&mut self, byte: u8) {
        nb::block!(self.uart.write(byte)).unwrap_or_else(|e| match e {});
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_byte(b);
        }
    }

    pub fn write_string(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }

    /// Spin until both the data register and the shift register are empty.
    pub fn wait_tx_complete(&mut self) {
        while !(self.uart.is_tx_empty() && self.uart.is_tx_complete()) {}
    }
}

// embedded-io ----------------------------------------------------------------

impl<U: UartPeriph, const N: usize> ErrorType for SerialPort<'_, U, N> {
    type Error = Infallible;
}

impl<U: UartPeriph, const N: usize> Write for SerialPort<'_, U, N> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Infallible> {
        self.write_bytes(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Infallible> {
        self.wait_tx_complete();
        Ok(())
    }
}

impl<U: UartPeriph, const N: usize> WriteReady for SerialPort<'_, U, N> {
    fn write_ready(&mut self) -> Result<bool, Infallible> {
        Ok(self.uart.is_tx_empty())
    }
}

impl<U: UartPeriph, const N: usize> Read for SerialPort<'_, U, N> {
    /// Blocks until at least one byte has been received.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Infallible> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            let n = self.rx.pop_slice(buf);
            if n > 0 {
                return Ok(n);
            }
        }
    }
}

impl<U: UartPeriph, const N: usize> ReadReady for SerialPort<'_, U, N> {
    fn read_ready(&mut self) -> Result<bool, Infallible> {
        Ok(!self.rx.is_empty())
    }
}

// embedded-hal-nb ------------------------------------------------------------

impl<U: UartPeriph, const N: usize> e_nb::serial::ErrorType for SerialPort<'_, U, N> {
    type Error = Infallible;
}

impl<U: UartPeriph, const N: usize> e_nb::serial::Read<u8> for SerialPort<'_, U, N> {
    fn read(&mut self) -> nb::Result<u8, Infallible> {
        self.rx.pop().ok_or(nb::Error::WouldBlock)
    }
}

impl<U: UartPeriph, const N: usize> e_nb::serial::Write<u8> for SerialPort<'_, U, N> {
    fn write(&mut self, word: u8) -> nb::Result<(), Infallible> {
        self.uart.write(word)
    }

    fn flush(&mut self) -> nb::Result<(), Infallible> {
        if self.uart.is_tx_empty() && self.uart.is_tx_complete() {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }
}
