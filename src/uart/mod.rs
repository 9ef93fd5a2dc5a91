pub mod baud;
pub(crate) mod usart;

pub use crate::common::uart::*;
pub use baud::BaudSetting;
pub use usart::{Usart, UsartBits, UsartRegisters};
