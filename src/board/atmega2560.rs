//! ATmega1280 / ATmega2560: four USARTs with receive vectors
//! `USART0_RX` .. `USART3_RX`. Each one gets its own receive buffer.

use super::mega_usart;
use crate::{common::reg::MmioRegister, uart::Usart};

/// # Safety
///
/// See [`super::atmega328p::usart0`].
pub const unsafe fn usart0() -> Usart<MmioRegister> {
    unsafe { mega_usart(0xC5, 0xC4, 0xC0, 0xC1, 0xC6) }
}

/// # Safety
///
/// See [`super::atmega328p::usart0`].
pub const unsafe fn usart1() -> Usart<MmioRegister> {
    unsafe { mega_usart(0xCD, 0xCC, 0xC8, 0xC9, 0xCE) }
}

/// # Safety
///
/// See [`super::atmega328p::usart0`].
pub const unsafe fn usart2() -> Usart<MmioRegister> {
    unsafe { mega_usart(0xD5, 0xD4, 0xD0, 0xD1, 0xD6) }
}

/// # Safety
///
/// See [`super::atmega328p::usart0`].
pub const unsafe fn usart3() -> Usart<MmioRegister> {
    unsafe { mega_usart(0x135, 0x134, 0x130, 0x131, 0x136) }
}
