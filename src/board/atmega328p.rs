//! ATmega328P / ATmega168: one USART, receive vector `USART_RX`.

use super::mega_usart;
use crate::{common::reg::MmioRegister, uart::Usart};

/// # Safety
///
/// Must run on an ATmega328P-compatible part, and only one handle set may be
/// configured as a serial port.
pub const unsafe fn usart0() -> Usart<MmioRegister> {
    unsafe { mega_usart(0xC5, 0xC4, 0xC0, 0xC1, 0xC6) }
}
