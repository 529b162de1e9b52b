// Simulated sensor noise
// Author: kelexine (https://github.com/kelexine)

use ring::rand::{SecureRandom, SystemRandom};
use std::fmt;

/// Full width of the jitter band: offsets fall in `[-SPAN / 2, SPAN / 2)`.
pub const JITTER_SPAN: f64 = 10.0;

/// Source of uniform samples in `[0, 1)`.
///
/// Handlers hold this behind `Arc<dyn JitterSource>` so tests can swap in a
/// deterministic source.
pub trait JitterSource: Send + Sync {
    fn sample(&self) -> f64;

    /// Offset to add to a reading, uniformly distributed over the band.
    fn offset(&self) -> f64 {
        (self.sample() - 0.5) * JITTER_SPAN
    }
}

/// OS-backed randomness.
pub struct SystemJitter {
    rng: SystemRandom,
}

impl SystemJitter {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }
}

impl Default for SystemJitter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SystemJitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SystemJitter")
    }
}

impl JitterSource for SystemJitter {
    fn sample(&self) -> f64 {
        let mut bytes = [0u8; 8];
        // SystemRandom only fails if the OS source is unavailable; fall back to the band centre.
        if self.rng.fill(&mut bytes).is_err() {
            return 0.5;
        }
        // Top 53 bits give a uniformly distributed f64 mantissa.
        (u64::from_le_bytes(bytes) >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Always returns the same sample.
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub f64);

impl JitterSource for FixedJitter {
    fn sample(&self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_samples_stay_in_unit_interval() {
        let jitter = SystemJitter::new();
        for _ in 0..1000 {
            let sample = jitter.sample();
            assert!((0.0..1.0).contains(&sample), "sample {} out of range", sample);
            let offset = jitter.offset();
            assert!((-5.0..5.0).contains(&offset), "offset {} out of band", offset);
        }
    }

    #[test]
    fn test_fixed_offsets() {
        assert_eq!(FixedJitter(0.5).offset(), 0.0);
        assert_eq!(FixedJitter(0.0).offset(), -5.0);
        assert_eq!(FixedJitter(0.75).offset(), 2.5);
    }
}
