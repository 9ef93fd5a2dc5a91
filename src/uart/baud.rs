//! Baud rate generator settings for the AVR USART.
//!
//! The USART samples each bit either 16 times (normal speed) or 8 times
//! (double speed, `U2X`). Both modes are tried and the one whose real baud
//! rate lands closer to the request wins; ties go to normal speed.

/// Largest value the 12-bit `UBRR` register can hold.
pub const UBRR_MAX: u16 = 0x0FFF;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BaudSetting {
    pub double_speed: bool,
    /// Value for the `UBRRH:UBRRL` register pair.
    pub ubrr: u16,
}

impl BaudSetting {
    /// # Panics
    ///
    /// If `baud` is zero or cannot be produced from `clock` in either mode.
    pub fn new(clock: u32, baud: u32) -> Self {
        assert!(baud > 0, "baud rate must not be zero");

        // Normal speed can't reach more than clock / 16.
        if baud > clock / 16 {
            return match Self::with_mode(clock, baud, true) {
                Some(s) => s,
                None => panic!("impossible baud rate"),
            };
        }

        match (
            Self::with_mode(clock, baud, false),
            Self::with_mode(clock, baud, true),
        ) {
            (Some(normal), Some(double)) => {
                if double.error(clock, baud) < normal.error(clock, baud) {
                    double
                } else {
                    normal
                }
            }
            (Some(s), None) | (None, Some(s)) => s,
            (None, None) => panic!("baud rate too low for this clock"),
        }
    }

    /// Setting for one sampling mode, or `None` when the divisor doesn't fit
    /// in `UBRR`.
    pub fn with_mode(clock: u32, baud: u32, double_speed: bool) -> Option<Self> {
        let prescale = if double_speed { 4 } else { 8 };
        let steps = clock / prescale / baud;
        if steps == 0 {
            return None;
        }
        let ubrr = (steps - 1) / 2;
        if ubrr > UBRR_MAX as u32 {
            return None;
        }
        Some(Self {
            double_speed,
            ubrr: ubrr as u16,
        })
    }

    #[inline]
    pub fn samples_per_bit(&self) -> u32 {
        if self.double_speed { 8 } else { 16 }
    }

    /// The rate the hardware really runs at with this setting.
    pub fn actual_baud(&self, clock: u32) -> u32 {
        clock / (self.samples_per_bit() * (self.ubrr as u32 + 1))
    }

    /// Distance between the real and the requested rate, scaled so that 255
    /// means 100 %. Saturates at 255.
    pub fn error(&self, clock: u32, baud: u32) -> u8 {
        let scaled = self.actual_baud(clock) as u64 * 255 / baud as u64;
        (255 - scaled as i64).unsigned_abs().min(255) as u8
    }

    #[inline]
    pub fn high(&self) -> u8 {
        (self.ubrr >> 8) as u8
    }

    #[inline]
    pub fn low(&self) -> u8 {
        self.ubrr as u8
    }
}
