//! Utility functions and helpers for the semey-api server.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization, switching format with the run mode.
//! - `jitter`: Random offsets that make mock sensor data look live.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod jitter;
pub mod logging;

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::round_to;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(16.6333, 2), 16.63);
        assert_eq!(round_to(86.04, 1), 86.0);
        assert_eq!(round_to(2.5, 0), 3.0);
    }
}
