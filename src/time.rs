pub use fugit::{
    ExtU32, HertzU32 as Hertz, MillisDurationU32 as MillisDuration, RateExtU32,
};

/// Time since boot, as kept by the board's millisecond timer.
pub trait Uptime {
    fn uptime(&mut self) -> MillisDuration;
}
