use embedded_hal::delay::DelayNs;

/// One analog reading of the fuel-level sender.
pub trait SampleSource {
    fn read_sample(&mut self) -> u16;
}

impl<F: FnMut() -> u16> SampleSource for F {
    fn read_sample(&mut self) -> u16 {
        self()
    }
}

/// Mean of `count` readings taken `interval_ms` apart.
///
/// # Panics
///
/// If `count` is zero.
pub fn average<S, D>(source: &mut S, delay: &mut D, count: u8, interval_ms: u32) -> f64
where
    S: SampleSource,
    D: DelayNs,
{
    assert!(count > 0, "sampling count must not be zero");
    let mut sum = 0u32;
    for _ in 0..count {
        sum += source.read_sample() as u32;
        delay.delay_ms(interval_ms);
    }
    sum as f64 / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curfuel::tests::CountingDelay;

    #[test]
    fn mean_of_readings() {
        let mut readings = [1023u16, 0, 511, 512].into_iter();
        let mut source = || readings.next().unwrap();
        let mut delay = CountingDelay::default();
        assert_eq!(average(&mut source, &mut delay, 4, 10), 511.5);
        assert_eq!(delay.total_ms(), 40);
    }

    #[test]
    fn full_scale_does_not_overflow() {
        let mut source = || u16::MAX;
        let mut delay = CountingDelay::default();
        assert_eq!(average(&mut source, &mut delay, 255, 0), u16::MAX as f64);
    }
}
