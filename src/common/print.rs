//! Number formatting straight onto a byte stream, without `core::fmt`.

use embedded_io::Write;

/// Enough digits for a `u32` in base 2.
const MAX_DIGITS: usize = 32;

pub trait SerialWriteExt: Write {
    /// Write `value` in `base` (2..=36), most significant digit first, using
    /// `0-9` then `A-Z`. No sign, no leading zeros; zero is written as `0`.
    ///
    /// # Panics
    ///
    /// If `base` is outside `2..=36`.
    fn write_unsigned(&mut self, value: impl Into<u32>, base: u8) -> Result<(), Self::Error> {
        assert!((2..=36).contains(&base), "unsupported base");
        let mut n = value.into();
        if n == 0 {
            return self.write_all(b"0");
        }

        let mut buf = [0u8; MAX_DIGITS];
        let mut i = MAX_DIGITS;
        while n > 0 {
            let d = (n % base as u32) as u8;
            i -= 1;
            buf[i] = if d < 10 { b'0' + d } else { b'A' + d - 10 };
            n /= base as u32;
        }
        self.write_all(&buf[i..])
    }

    /// Write a signed value.
    ///
    /// * `base == 0` writes the low byte of `value` as-is, not as text.
    /// * `base == 10` writes a leading `-` for negative values.
    /// * Any other base writes the value's 32-bit pattern as unsigned, so
    ///   negative values are only meaningful in decimal.
    fn write_signed(&mut self, value: impl Into<i32>, base: u8) -> Result<(), Self::Error> {
        let n = value.into();
        match base {
            0 => self.write_all(&[n as u8]),
            10 => {
                if n < 0 {
                    self.write_all(b"-")?;
                }
                self.write_unsigned(n.unsigned_abs(), 10)
            }
            _ => self.write_unsigned(n as u32, base),
        }
    }

    /// Write `value` with exactly `digits` fractional digits, rounding the
    /// last one. `digits == 0` writes no decimal point.
    ///
    /// An integer part beyond `u32::MAX` (infinity included) is written as
    /// `u32::MAX` followed by all-9 digits; NaN is written as zero.
    fn write_fixed_point(&mut self, value: f64, digits: u8) -> Result<(), Self::Error> {
        let mut number = value;
        if number < 0.0 {
            self.write_all(b"-")?;
            number = -number;
        }

        // so that 1.999 with 2 digits prints as 2.00
        let mut rounding = 0.5;
        for _ in 0..digits {
            rounding /= 10.0;
        }
        number += rounding;

        let int_part = number as u32;
        let mut remainder = number - int_part as f64;
        self.write_unsigned(int_part, 10)?;

        if digits > 0 {
            self.write_all(b".")?;
        }
        for _ in 0..digits {
            remainder *= 10.0;
            let d = (remainder as u8).min(9);
            self.write_all(&[b'0' + d])?;
            remainder -= d as f64;
        }
        Ok(())
    }
}

impl<W: Write + ?Sized> SerialWriteExt for W {}
