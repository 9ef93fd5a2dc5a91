//! ATmega8: single USART, receive vector `USART_RXC`.
//!
//! `UBRRH` shares its address with `UCSRC`; a write with bit 7 (`URSEL`) clear
//! lands in `UBRRH`, which the 12-bit divisor always satisfies.

use super::mega_usart;
use crate::{common::reg::MmioRegister, uart::Usart};

/// # Safety
///
/// Must run on an ATmega8, and only one handle set may be configured as a
/// serial port.
pub const unsafe fn usart() -> Usart<MmioRegister> {
    unsafe { mega_usart(0x40, 0x29, 0x2B, 0x2A, 0x2C) }
}
