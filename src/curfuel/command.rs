//! Query decoding and response framing.
//!
//! Every response is one line: `<millis since boot>:<command name>:<payload>\n`.

use crate::{common::print::SerialWriteExt, time::MillisDuration};
use embedded_io::Write;

pub const QUERY_FUEL_LEVEL: u8 = b'f';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Averaged raw sensor reading.
    RawFuelLevel,
    /// Any byte that isn't a known query; echoed back as the payload.
    Unknown(u8),
}

impl From<u8> for Command {
    fn from(query: u8) -> Self {
        match query {
            QUERY_FUEL_LEVEL => Command::RawFuelLevel,
            other => Command::Unknown(other),
        }
    }
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::RawFuelLevel => "raw_fuel_level",
            Command::Unknown(_) => "unknown_command",
        }
    }
}

pub fn write_header<W: Write + ?Sized>(
    w: &mut W,
    now: MillisDuration,
    name: &str,
) -> Result<(), W::Error> {
    w.write_unsigned(now.ticks(), 10)?;
    w.write_all(b":")?;
    w.write_all(name.as_bytes())?;
    w.write_all(b":")
}

/// `<millis>:raw_fuel_level:<level with 6 decimals>\n`
pub fn write_fuel_level<W: Write + ?Sized>(
    w: &mut W,
    now: MillisDuration,
    level: f64,
) -> Result<(), W::Error> {
    write_header(w, now, Command::RawFuelLevel.name())?;
    w.write_fixed_point(level, 6)?;
    w.write_all(b"\n")
}

/// `<millis>:unknown_command:<raw query byte>\n`
pub fn write_unknown<W: Write + ?Sized>(
    w: &mut W,
    now: MillisDuration,
    query: u8,
) -> Result<(), W::Error> {
    write_header(w, now, Command::Unknown(query).name())?;
    w.write_all(&[query])?;
    w.write_all(b"\n")
}
