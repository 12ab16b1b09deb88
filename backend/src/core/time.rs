//! Time management for the simulation
//!
//! The simulation advances in discrete minutes. This module provides
//! deterministic time advancement; the first simulated minute is 1.

use serde::{Deserialize, Serialize};

/// Manages simulation time in discrete minutes
///
/// # Example
/// ```
/// use pizza_simulator_core_rs::TimeManager;
///
/// let mut time = TimeManager::new();
/// assert_eq!(time.current_minute(), 1);
///
/// time.advance_minute();
/// assert_eq!(time.current_minute(), 2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeManager {
    /// The minute about to be simulated (1-based)
    current_minute: u32,
}

impl TimeManager {
    /// Create a new TimeManager positioned at minute 1
    pub fn new() -> Self {
        Self { current_minute: 1 }
    }

    /// Advance time by one minute
    pub fn advance_minute(&mut self) {
        self.current_minute += 1;
    }

    /// Get the current minute (1-based)
    pub fn current_minute(&self) -> u32 {
        self.current_minute
    }
}

impl Default for TimeManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_minute_one() {
        let time = TimeManager::new();
        assert_eq!(time.current_minute(), 1);
    }

    #[test]
    fn test_advance() {
        let mut time = TimeManager::new();
        for _ in 0..5 {
            time.advance_minute();
        }
        assert_eq!(time.current_minute(), 6);
    }
}
