//! Row completeness threshold.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RinseError};

/// Minimum percentage of non-missing cells a row needs to be kept.
///
/// Always within `[0, 100]`; out-of-range values are rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Threshold(f64);

impl Threshold {
    /// Percentage used when the caller does not supply one.
    pub const DEFAULT_PERCENT: f64 = 50.0;

    /// Validate a percentage.
    pub fn new(percent: f64) -> Result<Self> {
        if percent.is_finite() && (0.0..=100.0).contains(&percent) {
            Ok(Self(percent))
        } else {
            Err(RinseError::invalid_input(format!(
                "Threshold must be between 0 and 100, got {}",
                percent
            )))
        }
    }

    /// The percentage value.
    pub fn percent(&self) -> f64 {
        self.0
    }

    /// Minimum number of non-missing cells for a row of `column_count` cells:
    /// `floor(column_count * percent / 100)`.
    pub fn min_count(&self, column_count: usize) -> usize {
        (column_count as f64 * self.0 / 100.0).floor() as usize
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(Self::DEFAULT_PERCENT)
    }
}

impl TryFrom<f64> for Threshold {
    type Error = RinseError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Threshold> for f64 {
    fn from(value: Threshold) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(Threshold::new(0.0).is_ok());
        assert!(Threshold::new(100.0).is_ok());
        assert!(Threshold::new(-1.0).is_err());
        assert!(Threshold::new(100.5).is_err());
        assert!(Threshold::new(f64::NAN).is_err());
    }

    #[test]
    fn test_min_count_floors() {
        let t = Threshold::new(60.0).unwrap();
        assert_eq!(t.min_count(3), 1);
        assert_eq!(t.min_count(5), 3);
        assert_eq!(Threshold::new(70.0).unwrap().min_count(10), 7);
        assert_eq!(Threshold::new(0.0).unwrap().min_count(8), 0);
        assert_eq!(Threshold::new(100.0).unwrap().min_count(8), 8);
    }

    #[test]
    fn test_deserialize_validates() {
        let t: Threshold = serde_json::from_str("40").unwrap();
        assert_eq!(t.percent(), 40.0);
        assert!(serde_json::from_str::<Threshold>("140").is_err());
    }
}
