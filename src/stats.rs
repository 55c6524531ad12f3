//! Descriptive statistics over intron size lists.
//!
//! Every function rejects an empty slice with [`StatsError::InsufficientData`].
//! The geometric and harmonic means additionally require strictly positive
//! values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::StatsError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub count: usize,
    pub min: i64,
    pub max: i64,
    pub mean: f64,
    /// Midpoint of the two central values for even-length input
    pub median: f64,
    /// Smallest of the most frequent values
    pub mode: i64,
    /// `None` when a value is zero or negative
    pub geometric_mean: Option<f64>,
    /// `None` when a value is zero or negative
    pub harmonic_mean: Option<f64>,
}

impl SummaryStatistics {
    pub fn from_values(values: &[i64]) -> Result<Self, StatsError> {
        let (min, max) = min_max(values)?;
        Ok(Self {
            count: values.len(),
            min,
            max,
            mean: mean(values)?,
            median: median(values)?,
            mode: mode(values)?,
            geometric_mean: geometric_mean(values).ok(),
            harmonic_mean: harmonic_mean(values).ok(),
        })
    }
}

fn require_values(values: &[i64], measure: &'static str) -> Result<(), StatsError> {
    if values.is_empty() {
        Err(StatsError::InsufficientData(measure))
    } else {
        Ok(())
    }
}

fn require_positive(values: &[i64], measure: &'static str) -> Result<(), StatsError> {
    require_values(values, measure)?;
    match values.iter().find(|&&v| v <= 0) {
        Some(&value) => Err(StatsError::Domain { measure, value }),
        None => Ok(()),
    }
}

pub fn min_max(values: &[i64]) -> Result<(i64, i64), StatsError> {
    require_values(values, "min/max")?;
    let min = values.iter().copied().min().unwrap_or_default();
    let max = values.iter().copied().max().unwrap_or_default();
    Ok((min, max))
}

pub fn mean(values: &[i64]) -> Result<f64, StatsError> {
    require_values(values, "mean")?;
    let sum: i128 = values.iter().map(|&v| v as i128).sum();
    Ok(sum as f64 / values.len() as f64)
}

pub fn median(values: &[i64]) -> Result<f64, StatsError> {
    require_values(values, "median")?;
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0)
    } else {
        Ok(sorted[mid] as f64)
    }
}

pub fn mode(values: &[i64]) -> Result<i64, StatsError> {
    require_values(values, "mode")?;
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for &v in values {
        *counts.entry(v).or_default() += 1;
    }

    let mut best = (values[0], 0usize);
    // ascending keys with a strict comparison keep the smallest modal value
    for (value, count) in counts {
        if count > best.1 {
            best = (value, count);
        }
    }
    Ok(best.0)
}

pub fn geometric_mean(values: &[i64]) -> Result<f64, StatsError> {
    require_positive(values, "geometric mean")?;
    let log_sum: f64 = values.iter().map(|&v| (v as f64).ln()).sum();
    Ok((log_sum / values.len() as f64).exp())
}

pub fn harmonic_mean(values: &[i64]) -> Result<f64, StatsError> {
    require_positive(values, "harmonic mean")?;
    let reciprocal_sum: f64 = values.iter().map(|&v| 1.0 / v as f64).sum();
    Ok(values.len() as f64 / reciprocal_sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn summary_of_small_list() {
        let stats = SummaryStatistics::from_values(&[2, 2, 3, 5]).unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.min, 2);
        assert_eq!(stats.max, 5);
        assert!(close(stats.mean, 3.0));
        assert!(close(stats.median, 2.5));
        assert_eq!(stats.mode, 2);
        assert!(close(stats.geometric_mean.unwrap(), 60f64.powf(0.25)));
        assert!(close(stats.harmonic_mean.unwrap(), 4.0 / (0.5 + 0.5 + 1.0 / 3.0 + 0.2)));
    }

    #[test]
    fn odd_length_median() {
        assert!(close(median(&[9, 1, 5]).unwrap(), 5.0));
    }

    #[test]
    fn mode_ties_pick_smallest() {
        assert_eq!(mode(&[7, 3, 7, 3, 1]).unwrap(), 3);
        assert_eq!(mode(&[4]).unwrap(), 4);
    }

    #[test]
    fn empty_input_is_insufficient() {
        assert_eq!(
            SummaryStatistics::from_values(&[]).unwrap_err(),
            StatsError::InsufficientData("min/max")
        );
        assert!(matches!(mean(&[]), Err(StatsError::InsufficientData(_))));
        assert!(matches!(harmonic_mean(&[]), Err(StatsError::InsufficientData(_))));
    }

    #[test]
    fn non_positive_values_leave_means_undefined() {
        assert_eq!(
            geometric_mean(&[4, 0, 2]).unwrap_err(),
            StatsError::Domain {
                measure: "geometric mean",
                value: 0
            }
        );
        assert!(matches!(harmonic_mean(&[-1, 2]), Err(StatsError::Domain { value: -1, .. })));

        let stats = SummaryStatistics::from_values(&[0, 10]).unwrap();
        assert_eq!(stats.geometric_mean, None);
        assert_eq!(stats.harmonic_mean, None);
        assert!(close(stats.mean, 5.0));
    }

    #[test]
    fn large_values_do_not_overflow_mean() {
        let big = i64::MAX;
        assert!(close(mean(&[big, big]).unwrap(), big as f64));
    }
}
