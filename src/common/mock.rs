//! In-memory registers for host tests.

use super::reg::Register;
use crate::uart::{Usart, UsartBits, UsartRegisters};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::vec::Vec;

/// Register backed by plain memory. Every write is logged; reads return the
/// queued input bytes first, then the last written value.
#[derive(Debug, Default)]
pub(crate) struct MockRegister {
    value: Cell<u8>,
    input: RefCell<VecDeque<u8>>,
    writes: RefCell<Vec<u8>>,
}

impl MockRegister {
    pub(crate) fn new(value: u8) -> Self {
        Self {
            value: Cell::new(value),
            ..Default::default()
        }
    }

    pub(crate) fn value(&self) -> u8 {
        self.value.get()
    }

    /// Queue bytes to be returned by subsequent reads.
    pub(crate) fn feed(&self, bytes: &[u8]) {
        self.input.borrow_mut().extend(bytes.iter().copied());
    }

    pub(crate) fn writes(&self) -> Vec<u8> {
        self.writes.borrow().clone()
    }

    pub(crate) fn take_writes(&self) -> Vec<u8> {
        self.writes.take()
    }
}

impl Register for MockRegister {
    fn read(&self) -> u8 {
        self.input
            .borrow_mut()
            .pop_front()
            .unwrap_or(self.value.get())
    }

    fn write(&self, value: u8) {
        self.value.set(value);
        self.writes.borrow_mut().push(value);
    }
}

pub(crate) const BITS: UsartBits = UsartBits {
    rxen: 4,
    txen: 3,
    rxcie: 7,
    udre: 5,
    u2x: 1,
    txc: 6,
};

/// A full USART register set in memory.
pub(crate) struct MockUsartRegs {
    pub(crate) ubrrh: MockRegister,
    pub(crate) ubrrl: MockRegister,
    pub(crate) ucsra: MockRegister,
    pub(crate) ucsrb: MockRegister,
    pub(crate) udr: MockRegister,
}

impl MockUsartRegs {
    pub(crate) fn new() -> Self {
        Self {
            ubrrh: MockRegister::new(0xFF),
            ubrrl: MockRegister::new(0xFF),
            // data register empty, transmit complete
            ucsra: MockRegister::new(1 << BITS.udre | 1 << 6),
            // unrelated bits that open/close must not touch
            ucsrb: MockRegister::new(0b0000_0110),
            udr: MockRegister::new(0),
        }
    }

    pub(crate) fn usart(&self) -> Usart<&MockRegister> {
        Usart::new(
            UsartRegisters {
                ubrrh: &self.ubrrh,
                ubrrl: &self.ubrrl,
                ucsra: &self.ucsra,
                ucsrb: &self.ucsrb,
                udr: &self.udr,
            },
            BITS,
        )
    }

    pub(crate) fn untouched(&self) -> bool {
        [&self.ubrrh, &self.ubrrl, &self.ucsra, &self.ucsrb, &self.udr]
            .iter()
            .all(|r| r.writes().is_empty())
    }
}
