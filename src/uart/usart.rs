//! AVR USART (`UBRRnH/L`, `UCSRnA/B`, `UDRn`).
//!
//! Register handles and bit positions are supplied by the caller, so the same
//! driver runs on every register layout; see [`crate::board`] for the maps of
//! common parts.

use super::baud::BaudSetting;
use crate::common::{reg::Register, uart::*};

/// Register handles of one USART.
#[derive(Clone, Copy, Debug)]
pub struct UsartRegisters<R> {
    pub ubrrh: R,
    pub ubrrl: R,
    /// Control/status A: transmit-complete and data-register-empty flags,
    /// double-speed bit.
    pub ucsra: R,
    /// Control/status B: receiver, transmitter and receive-interrupt enables.
    pub ucsrb: R,
    pub udr: R,
}

/// Bit positions inside `UCSRnA` / `UCSRnB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UsartBits {
    pub rxen: u8,
    pub txen: u8,
    pub rxcie: u8,
    pub udre: u8,
    pub u2x: u8,
    pub txc: u8,
}

pub struct Usart<R> {
    regs: UsartRegisters<R>,
    bits: UsartBits,
    // TXC stays clear until a first byte goes out
    written: bool,
}

impl<R: Register> Usart<R> {
    pub const fn new(regs: UsartRegisters<R>, bits: UsartBits) -> Self {
        Self {
            regs,
            bits,
            written: false,
        }
    }

    pub fn registers(&self) -> &UsartRegisters<R> {
        &self.regs
    }

    pub fn bits(&self) -> &UsartBits {
        &self.bits
    }

    fn set_baud(&mut self, setting: BaudSetting) {
        self.regs
            .ucsra
            .modify_bit(self.bits.u2x, setting.double_speed);
        self.regs.ubrrh.write(setting.high());
        self.regs.ubrrl.write(setting.low());
    }
}

impl<R: Register + Clone> Steal for Usart<R> {
    unsafe fn steal(&self) -> Self {
        Self {
            regs: self.regs.clone(),
            bits: self.bits,
            written: false,
        }
    }
}

// Implement Peripheral -------------------------------------------------------

impl<R: Register> UartPeriph for Usart<R> {
    fn enable(&mut self, config: &Config) {
        let setting = BaudSetting::new(config.clock.raw(), config.baudrate);
        log::debug!(
            "usart: ubrr {} double speed {}",
            setting.ubrr,
            setting.double_speed
        );
        self.set_baud(setting);

        let ucsrb = &self.regs.ucsrb;
        ucsrb.set_bit(self.bits.rxen);
        ucsrb.set_bit(self.bits.txen);
        ucsrb.set_bit(self.bits.rxcie);
    }

    fn disable(&mut self) {
        let ucsrb = &self.regs.ucsrb;
        ucsrb.clear_bit(self.bits.rxen);
        ucsrb.clear_bit(self.bits.txen);
        ucsrb.clear_bit(self.bits.rxcie);
    }

    #[inline]
    fn write(&mut self, word: u8) -> nb::Result<(), Infallible> {
        if self.is_tx_empty() {
            self.regs.udr.write(word);
            // TXC is cleared by writing a one. Done after loading UDR, so the
            // flag can only come back once this byte is out.
            self.regs.ucsra.set_bit(self.bits.txc);
            self.written = true;
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }

    #[inline]
    fn is_tx_empty(&self) -> bool {
        self.regs.ucsra.bit_is_set(self.bits.udre)
    }

    #[inline]
    fn is_tx_complete(&self) -> bool {
        !self.written || self.regs.ucsra.bit_is_set(self.bits.txc)
    }

    #[inline]
    fn read(&mut self) -> u8 {
        self.regs.udr.read()
    }
}
