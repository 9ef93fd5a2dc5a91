//! Receive interrupt side of a serial port

use super::*;
use crate::common::ringbuf::Producer;

pub struct UartInterruptRxHandler<'a, U, const N: usize> {
    uart: U,
    w: Producer<'a, N>,
}

impl<'a, U, const N: usize> UartInterruptRxHandler<'a, U, N>
where
    U: UartPeriph,
{
    pub(super) fn new(uart: U, w: Producer<'a, N>) -> Self {
        Self { uart, w }
    }

    /// Call from the receive-complete vector. One register read, one push;
    /// the byte is lost if the receive queue is full.
    #[inline]
    pub fn handler(&mut self) {
        let data = self.uart.read();
        self.w.push(data);
    }
}
