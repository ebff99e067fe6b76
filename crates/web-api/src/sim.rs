//! Host stand-ins for board hardware.

use std::time::Duration;

use embedded_hal::delay::DelayNs;

/// `DelayNs` backed by `std::thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_std_delay_sleeps() {
        let start = Instant::now();
        StdDelay.delay_ms(5);
        assert!(start.elapsed() >= Duration::from_millis(5));
    }
}
