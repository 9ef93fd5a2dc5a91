pub use crate::curfuel::SampleSource as _;
pub use crate::print::SerialWriteExt as _;
pub use crate::reg::Register as _;
pub use crate::time::ExtU32 as _fugit_ExtU32;
pub use crate::time::RateExtU32 as _fugit_RateExtU32;
pub use crate::time::Uptime as _;
pub use crate::uart::{Steal as _, UartPeriph as _};
pub use embedded_hal::delay::DelayNs as _;
pub use embedded_io::Write as _embedded_io_Write;
