//! Fuel-level query firmware.
//!
//! The host sends one command byte; the firmware answers with one line. `f`
//! samples the sender and reports the averaged raw reading, anything else is
//! answered with `unknown_command`. Input that piles up while a query is being
//! served is thrown away, so a host flooding the link gets one answer per poll.

mod command;
mod sampler;

pub use command::*;
pub use sampler::*;

use crate::{
    time::{ExtU32, MillisDuration, Uptime},
    uart::{Config, SerialPort, UartPeriph},
};
use embedded_hal::delay::DelayNs;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FirmwareConfig {
    pub serial: Config,
    /// Readings averaged per `f` query.
    pub sampling_count: u8,
    /// Pause after each reading.
    pub sampling_delay: MillisDuration,
    /// Pause before each look at the receive queue.
    pub poll_interval: MillisDuration,
}

impl Default for FirmwareConfig {
    fn default() -> Self {
        Self {
            serial: Config::default(),
            sampling_count: 10,
            sampling_delay: 10.millis(),
            poll_interval: 100.millis(),
        }
    }
}

impl FirmwareConfig {
    pub fn serial(mut self, serial: Config) -> Self {
        self.serial = serial;
        self
    }

    pub fn sampling_count(mut self, count: u8) -> Self {
        self.sampling_count = count;
        self
    }

    pub fn sampling_delay(mut self, delay: MillisDuration) -> Self {
        self.sampling_delay = delay;
        self
    }

    pub fn poll_interval(mut self, interval: MillisDuration) -> Self {
        self.poll_interval = interval;
        self
    }
}

pub struct Firmware<'a, U, S, D, T, const N: usize> {
    port: SerialPort<'a, U, N>,
    source: S,
    delay: D,
    clock: T,
    config: FirmwareConfig,
}

impl<'a, U, S, D, T, const N: usize> Firmware<'a, U, S, D, T, N>
where
    U: UartPeriph,
    S: SampleSource,
    D: DelayNs,
    T: Uptime,
{
    pub fn new(
        port: SerialPort<'a, U, N>,
        source: S,
        delay: D,
        clock: T,
        config: FirmwareConfig,
    ) -> Self {
        Self {
            port,
            source,
            delay,
            clock,
            config,
        }
    }

    /// Open the serial port with the configured baud rate.
    pub fn start(&mut self) {
        self.port.open(self.config.serial);
    }

    /// One pass of the main loop: wait, then serve at most one query.
    pub fn poll(&mut self) -> Option<Command> {
        self.delay.delay_ms(self.config.poll_interval.ticks());

        if self.port.pending() == 0 {
            return None;
        }
        let command = Command::from(self.port.read_byte()?);
        log::debug!("query: {}", command.name());
        self.serve(command);

        self.port.clear();
        Some(command)
    }

    pub fn run(mut self) -> ! {
        self.start();
        loop {
            self.poll();
        }
    }

    pub fn port(&mut self) -> &mut SerialPort<'a, U, N> {
        &mut self.port
    }

    fn serve(&mut self, command: Command) {
        let written = match command {
            Command::RawFuelLevel => {
                let level = average(
                    &mut self.source,
                    &mut self.delay,
                    self.config.sampling_count,
                    self.config.sampling_delay.ticks(),
                );
                let now = self.clock.uptime();
                write_fuel_level(&mut self.port, now, level)
            }
            Command::Unknown(query) => {
                let now = self.clock.uptime();
                write_unknown(&mut self.port, now, query)
            }
        };
        written.unwrap_or_else(|e| match e {});
    }
}
