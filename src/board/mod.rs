//! USART register maps of supported AVR parts.
//!
//! Addresses are data-space addresses (I/O address + 0x20 where it applies).
//! Every constructor is `unsafe`: it hands out handles to live hardware, and
//! at most one [`Usart`] may drive a given register set.

use crate::common::reg::MmioRegister;
use crate::uart::{Usart, UsartBits, UsartRegisters};

pub mod atmega2560;
pub mod atmega328p;
pub mod atmega8;

/// `RXEN`/`TXEN`/`RXCIE`/`UDRE`/`U2X`/`TXC` sit at the same positions on all
/// classic megaAVR USARTs.
pub const MEGA_USART_BITS: UsartBits = UsartBits {
    rxen: 4,
    txen: 3,
    rxcie: 7,
    udre: 5,
    u2x: 1,
    txc: 6,
};

/// # Safety
///
/// All five addresses must be the registers of one USART on the running part.
pub const unsafe fn mega_usart(
    ubrrh: usize,
    ubrrl: usize,
    ucsra: usize,
    ucsrb: usize,
    udr: usize,
) -> Usart<MmioRegister> {
    unsafe {
        Usart::new(
            UsartRegisters {
                ubrrh: MmioRegister::new(ubrrh),
                ubrrl: MmioRegister::new(ubrrl),
                ucsra: MmioRegister::new(ucsra),
                ucsrb: MmioRegister::new(ucsrb),
                udr: MmioRegister::new(udr),
            },
            MEGA_USART_BITS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::uart::Steal;

    #[test]
    fn atmega328p_usart0_layout() {
        let u = unsafe { atmega328p::usart0() };
        let regs = u.registers();
        assert_eq!(regs.ubrrh.addr(), 0xC5);
        assert_eq!(regs.ubrrl.addr(), 0xC4);
        assert_eq!(regs.ucsra.addr(), 0xC0);
        assert_eq!(regs.ucsrb.addr(), 0xC1);
        assert_eq!(regs.udr.addr(), 0xC6);
        assert_eq!(*u.bits(), MEGA_USART_BITS);

        let twin = unsafe { u.steal() };
        assert_eq!(twin.registers().udr, regs.udr);
    }

    #[test]
    fn atmega2560_has_four_distinct_usarts() {
        let udrs = unsafe {
            [
                atmega2560::usart0().registers().udr.addr(),
                atmega2560::usart1().registers().udr.addr(),
                atmega2560::usart2().registers().udr.addr(),
                atmega2560::usart3().registers().udr.addr(),
            ]
        };
        assert_eq!(udrs, [0xC6, 0xCE, 0xD6, 0x136]);
    }

    #[test]
    fn atmega8_shares_ubrrh_with_ucsrc() {
        let u = unsafe { atmega8::usart() };
        assert_eq!(u.registers().ubrrh.addr(), 0x40);
        assert_eq!(u.registers().udr.addr(), 0x2C);
    }
}
