//! 8-bit hardware register access.

use core::ptr::{read_volatile, write_volatile};

/// A single 8-bit peripheral register.
///
/// Registers take `&self` for writes: they alias hardware, not Rust-owned memory.
/// The bit helpers are read-modify-write and leave every other bit untouched.
pub trait Register {
    fn read(&self) -> u8;
    fn write(&self, value: u8);

    #[inline]
    fn set_bit(&self, bit: u8) {
        self.write(self.read() | (1 << bit));
    }

    #[inline]
    fn clear_bit(&self, bit: u8) {
        self.write(self.read() & !(1 << bit));
    }

    #[inline]
    fn modify_bit(&self, bit: u8, set: bool) {
        if set {
            self.set_bit(bit);
        } else {
            self.clear_bit(bit);
        }
    }

    #[inline]
    fn bit_is_set(&self, bit: u8) -> bool {
        self.read() & (1 << bit) != 0
    }
}

impl<R: Register + ?Sized> Register for &R {
    #[inline(always)]
    fn read(&self) -> u8 {
        (**self).read()
    }

    #[inline(always)]
    fn write(&self, value: u8) {
        (**self).write(value)
    }
}

/// Memory-mapped register accessed with volatile loads and stores.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MmioRegister {
    addr: *mut u8,
}

impl MmioRegister {
    /// # Safety
    ///
    /// `addr` must be the data-space address of a readable and writable 8-bit
    /// register. Handles to the same register may be copied, but only code that
    /// is coordinated with every other user of the register may write to it.
    pub const unsafe fn new(addr: usize) -> Self {
        Self {
            addr: addr as *mut u8,
        }
    }

    pub fn addr(&self) -> usize {
        self.addr as usize
    }
}

impl Register for MmioRegister {
    #[inline(always)]
    fn read(&self) -> u8 {
        unsafe { read_volatile(self.addr) }
    }

    #[inline(always)]
    fn write(&self, value: u8) {
        unsafe { write_volatile(self.addr, value) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::mock::MockRegister;

    #[test]
    fn bit_helpers_keep_other_bits() {
        let reg = MockRegister::new(0b1000_0001);
        reg.set_bit(3);
        assert_eq!(reg.value(), 0b1000_1001);
        reg.clear_bit(7);
        assert_eq!(reg.value(), 0b0000_1001);
        reg.modify_bit(0, false);
        reg.modify_bit(6, true);
        assert_eq!(reg.value(), 0b0100_1000);
        assert!(reg.bit_is_set(6));
        assert!(!reg.bit_is_set(0));
    }

    #[test]
    fn mmio_register_is_volatile_memory() {
        let mut backing = 0x5Au8;
        let reg = unsafe { MmioRegister::new(&raw mut backing as usize) };
        assert_eq!(reg.read(), 0x5A);
        reg.clear_bit(1);
        assert_eq!(reg.read(), 0x58);
        reg.write(0xFF);
        assert_eq!(backing, 0xFF);
    }
}
