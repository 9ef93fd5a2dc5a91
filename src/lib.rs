#![cfg_attr(not(test), no_std)]

pub mod board;
pub mod curfuel;
pub mod interrupt;
pub mod prelude;
pub mod time;
pub mod uart;

mod common;

pub use common::{print, reg, ringbuf};
pub use embedded_hal;
pub use embedded_hal_nb;
pub use embedded_io;
pub use nb;
