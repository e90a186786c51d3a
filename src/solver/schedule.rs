//! Convergence threshold schedule
//!
//! After the k-th weight update, training is considered converged once
//!
//! ```text
//! floor((ln ν - ln S - n ln k) / ln(1 - ε))
//! ```
//!
//! consecutive observations were classified correctly. Update k receives the
//! share `1 / (S k^n)` of the total failure probability `1 - ν`, where
//! `S = Σ_{i=1}^{max_i} 1 / i^n` normalizes the shares (union bound), and a
//! classifier whose error rate exceeds ε survives m independent trials with
//! probability at most `(1 - ε)^m`.

use crate::core::{PFMError, Result, ScheduleConfig};

/// Threshold schedule with the normalizing series computed once
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceSchedule {
    config: ScheduleConfig,
    series_sum: f64,
}

impl ConvergenceSchedule {
    /// Validate the configuration and precompute the series sum
    pub fn new(config: ScheduleConfig) -> Result<Self> {
        if !(config.epsilon > 0.0 && config.epsilon < 1.0) {
            return Err(PFMError::InvalidParameter(format!(
                "Epsilon must be in (0, 1), got: {}",
                config.epsilon
            )));
        }
        if !(config.confidence > 0.0 && config.confidence < 1.0) {
            return Err(PFMError::InvalidParameter(format!(
                "Confidence must be in (0, 1), got: {}",
                config.confidence
            )));
        }
        if config.series_terms == 0 {
            return Err(PFMError::InvalidParameter(
                "Series must have at least one term".to_string(),
            ));
        }
        if config.exponent == 0 {
            return Err(PFMError::InvalidParameter(
                "Exponent must be positive".to_string(),
            ));
        }
        let exponent = i32::try_from(config.exponent).map_err(|_| {
            PFMError::InvalidParameter(format!(
                "Exponent must be at most {}, got: {}",
                i32::MAX,
                config.exponent
            ))
        })?;

        let series_sum = series_sum(config.series_terms, exponent);
        Ok(Self { config, series_sum })
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Precomputed S = Σ_{i=1}^{max_i} 1 / i^n
    pub fn series_sum(&self) -> f64 {
        self.series_sum
    }

    /// Consecutive matches required after `change` weight updates
    ///
    /// # Panics
    /// Panics if `change` is zero
    pub fn matches_needed(&self, change: usize) -> u64 {
        assert!(change > 0, "Change count must be positive");

        let n = self.config.exponent as f64;
        let numerator =
            self.config.confidence.ln() - self.series_sum.ln() - n * (change as f64).ln();
        let threshold = numerator / (1.0 - self.config.epsilon).ln();

        // Saturating cast; NaN maps to 0
        threshold.floor() as u64
    }
}

impl Default for ConvergenceSchedule {
    fn default() -> Self {
        let config = ScheduleConfig::default();
        let exponent = i32::try_from(config.exponent).unwrap_or(i32::MAX);
        Self {
            config,
            series_sum: series_sum(config.series_terms, exponent),
        }
    }
}

fn series_sum(terms: usize, exponent: i32) -> f64 {
    (1..=terms).fold(0.0, |sum, i| sum + 1.0 / (i as f64).powi(exponent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_series_sum() {
        let schedule = ConvergenceSchedule::default();
        // Partial sum of ζ(3)
        assert_relative_eq!(schedule.series_sum(), 1.2020564036593433, epsilon = 1e-12);
        assert_eq!(series_sum(1, 3), 1.0);
        assert_eq!(series_sum(2, 1), 1.5);
    }

    #[test]
    fn test_matches_needed_fixture() {
        let schedule = ConvergenceSchedule::default();
        assert_eq!(schedule.matches_needed(1), 5);
        assert_eq!(schedule.matches_needed(2), 46);
        assert_eq!(schedule.matches_needed(3), 69);
        assert_eq!(schedule.matches_needed(4), 86);
        assert_eq!(schedule.matches_needed(10), 140);
        assert_eq!(schedule.matches_needed(100), 274);
    }

    #[test]
    fn test_matches_needed_ordering() {
        let schedule = ConvergenceSchedule::default();
        let mut previous = schedule.matches_needed(1);
        for change in 2..500 {
            let current = schedule.matches_needed(change);
            assert!(current >= previous, "threshold dropped at change {change}");
            previous = current;
        }
    }

    #[test]
    #[should_panic(expected = "Change count must be positive")]
    fn test_matches_needed_zero_change() {
        ConvergenceSchedule::default().matches_needed(0);
    }

    #[test]
    fn test_smaller_confidence_needs_more_matches() {
        let default = ConvergenceSchedule::default();
        let smaller = ConvergenceSchedule::new(ScheduleConfig {
            confidence: 0.5,
            ..ScheduleConfig::default()
        })
        .unwrap();

        assert_eq!(default.matches_needed(3), 69);
        assert_eq!(smaller.matches_needed(3), 81);
        for change in 1..50 {
            assert!(smaller.matches_needed(change) > default.matches_needed(change));
        }
    }

    #[test]
    fn test_exponent_beyond_i32_rejected() {
        let result = ConvergenceSchedule::new(ScheduleConfig {
            exponent: 3_000_000_000,
            ..ScheduleConfig::default()
        });
        assert!(matches!(result, Err(PFMError::InvalidParameter(_))));

        // Largest accepted exponent: every term but the first vanishes
        let schedule = ConvergenceSchedule::new(ScheduleConfig {
            exponent: i32::MAX as u32,
            ..ScheduleConfig::default()
        })
        .unwrap();
        assert_eq!(schedule.series_sum(), 1.0);
    }

    #[test]
    fn test_invalid_config() {
        let bad = [
            ScheduleConfig {
                epsilon: 0.0,
                ..ScheduleConfig::default()
            },
            ScheduleConfig {
                epsilon: 1.0,
                ..ScheduleConfig::default()
            },
            ScheduleConfig {
                confidence: 1.5,
                ..ScheduleConfig::default()
            },
            ScheduleConfig {
                series_terms: 0,
                ..ScheduleConfig::default()
            },
            ScheduleConfig {
                exponent: 0,
                ..ScheduleConfig::default()
            },
        ];
        for config in bad {
            assert!(matches!(
                ConvergenceSchedule::new(config),
                Err(PFMError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_default_matches_new() {
        let built = ConvergenceSchedule::new(ScheduleConfig::default()).unwrap();
        assert_eq!(built, ConvergenceSchedule::default());
    }
}
