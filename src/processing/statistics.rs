//! Descriptive statistics over sparse series.
//!
//! A series is a slice of `Option<f64>`: `None` marks a point the
//! simplification dropped. Non-finite samples are never counted. Means and
//! standard deviations are rounded to two decimal places, half away from
//! zero (`f64::round`).

use serde::{Deserialize, Serialize};

/// Number of decimal places reported for means and standard deviations.
pub const DECIMALS: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    /// Every sample was missing, so mean and deviation are undefined.
    #[error("series has no valid points")]
    EmptyInput,
    /// The original series has no points to compare against.
    #[error("original series is empty, point reduction is undefined")]
    DivisionByZero,
}

/// Which samples count as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissingPolicy {
    /// Only `None` and non-finite samples are missing.
    Explicit,
    /// Numeric zero is missing as well. Matches results pages that used
    /// truthiness to detect gaps, at the cost of dropping real zero readings.
    Falsy,
}

impl Default for MissingPolicy {
    fn default() -> Self {
        MissingPolicy::Explicit
    }
}

impl MissingPolicy {
    pub fn is_missing(&self, sample: Option<f64>) -> bool {
        match sample {
            None => true,
            Some(v) if !v.is_finite() => true,
            Some(v) => *self == MissingPolicy::Falsy && v == 0.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MissingPolicy::Explicit => "Gaps only",
            MissingPolicy::Falsy => "Gaps and zeros",
        }
    }
}

/// Above this every `f64` is an integer.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Round half away from zero to [`DECIMALS`] places. Values too large to
/// carry hundredths are returned unchanged.
pub fn round_to_decimals(value: f64) -> f64 {
    let scale = 10f64.powi(DECIMALS);
    let scaled = value * scale;
    if !(scaled.abs() < EXACT_INTEGER_LIMIT) {
        return value;
    }
    scaled.round() / scale
}

/// Valid samples of `series`, in order, under the default policy.
pub fn filter_valid(series: &[Option<f64>]) -> Vec<f64> {
    filter_valid_with(series, MissingPolicy::default())
}

pub fn filter_valid_with(series: &[Option<f64>], policy: MissingPolicy) -> Vec<f64> {
    series
        .iter()
        .copied()
        .filter(|&sample| !policy.is_missing(sample))
        .flatten()
        .collect()
}

pub fn valid_count_with(series: &[Option<f64>], policy: MissingPolicy) -> usize {
    series.iter().filter(|&&sample| !policy.is_missing(sample)).count()
}

/// Share of the original points removed by simplification, truncated toward
/// zero. Negative when the simplified series holds more valid points than the
/// original has positions.
pub fn reduction_percent(
    original: &[Option<f64>],
    simplified: &[Option<f64>],
) -> Result<i64, StatsError> {
    reduction_percent_with(original, simplified, MissingPolicy::default())
}

pub fn reduction_percent_with(
    original: &[Option<f64>],
    simplified: &[Option<f64>],
    policy: MissingPolicy,
) -> Result<i64, StatsError> {
    let (total, kept) = point_counts(original, simplified, policy)?;
    // Integer division truncates toward zero.
    Ok((total - kept) * 100 / total)
}

/// Share of the original points kept by simplification, truncated toward zero.
pub fn retained_percent(
    original: &[Option<f64>],
    simplified: &[Option<f64>],
) -> Result<i64, StatsError> {
    retained_percent_with(original, simplified, MissingPolicy::default())
}

pub fn retained_percent_with(
    original: &[Option<f64>],
    simplified: &[Option<f64>],
    policy: MissingPolicy,
) -> Result<i64, StatsError> {
    let (total, kept) = point_counts(original, simplified, policy)?;
    Ok(kept * 100 / total)
}

/// Total positions in `original` (all of them, missing or not) and valid
/// points in `simplified`.
fn point_counts(
    original: &[Option<f64>],
    simplified: &[Option<f64>],
    policy: MissingPolicy,
) -> Result<(i64, i64), StatsError> {
    if original.is_empty() {
        return Err(StatsError::DivisionByZero);
    }
    let total = original.len() as i64;
    let kept = valid_count_with(simplified, policy) as i64;
    Ok((total, kept))
}

pub fn mean(series: &[Option<f64>]) -> Result<f64, StatsError> {
    mean_with(series, MissingPolicy::default())
}

pub fn mean_with(series: &[Option<f64>], policy: MissingPolicy) -> Result<f64, StatsError> {
    let vals = filter_valid_with(series, policy);
    if vals.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let n = vals.len() as f64;
    let sum: f64 = vals.iter().sum();
    let raw = if sum.is_finite() {
        sum / n
    } else {
        vals.iter().map(|v| v / n).sum()
    };
    Ok(round_to_decimals(raw))
}

/// Population standard deviation (divides by N).
pub fn standard_deviation(series: &[Option<f64>]) -> Result<f64, StatsError> {
    standard_deviation_with(series, MissingPolicy::default())
}

/// Deviations are taken from the rounded mean, so the result agrees with the
/// mean shown next to it.
pub fn standard_deviation_with(
    series: &[Option<f64>],
    policy: MissingPolicy,
) -> Result<f64, StatsError> {
    let vals = filter_valid_with(series, policy);
    if vals.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    let centre = mean_with(series, policy)?;
    let n = vals.len() as f64;
    let sum_sq = vals.iter().fold(0.0, |acc, v| acc + (v - centre).powi(2));
    let raw = if sum_sq.is_finite() {
        (sum_sq / n).sqrt()
    } else {
        scaled_deviation(&vals, centre, n)
    };
    Ok(round_to_decimals(raw))
}

/// Deviation for spreads whose squares overflow: halved deviations are
/// divided by the largest one before squaring.
fn scaled_deviation(vals: &[f64], centre: f64, n: f64) -> f64 {
    let halves: Vec<f64> = vals.iter().map(|v| v / 2.0 - centre / 2.0).collect();
    let largest = halves.iter().fold(0.0f64, |acc, d| acc.max(d.abs()));
    if largest == 0.0 {
        return 0.0;
    }
    let sum_sq = halves.iter().fold(0.0, |acc, d| acc + (d / largest).powi(2));
    2.0 * largest * (sum_sq / n).sqrt()
}

/// Statistics for one series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
}

impl SeriesSummary {
    pub fn compute(series: &[Option<f64>], policy: MissingPolicy) -> Result<Self, StatsError> {
        Ok(SeriesSummary {
            count: valid_count_with(series, policy),
            mean: mean_with(series, policy)?,
            std_dev: standard_deviation_with(series, policy)?,
        })
    }

    /// Format as a multi-line report string.
    pub fn report(&self, label: &str) -> String {
        format!(
            "{}:\n  Count: {}\n  Mean: {:.2}\n  Std Dev: {:.2}\n",
            label, self.count, self.mean, self.std_dev
        )
    }
}

/// The simplified series described against the original it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Valid points in the simplified series.
    pub count: usize,
    pub reduction_percent: i64,
    pub mean: f64,
    pub std_dev: f64,
}

impl Summary {
    pub fn compute(
        original: &[Option<f64>],
        simplified: &[Option<f64>],
        policy: MissingPolicy,
    ) -> Result<Self, StatsError> {
        let reduction_percent = reduction_percent_with(original, simplified, policy)?;
        let simplified = SeriesSummary::compute(simplified, policy)?;
        Ok(Summary {
            count: simplified.count,
            reduction_percent,
            mean: simplified.mean,
            std_dev: simplified.std_dev,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(vals: &[f64]) -> Vec<Option<f64>> {
        vals.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_filter_valid_drops_gaps_in_order() {
        let input = vec![Some(3.0), None, Some(1.0), Some(f64::NAN), Some(2.0), None];
        assert_eq!(filter_valid(&input), vec![3.0, 1.0, 2.0]);
        // Input untouched.
        assert_eq!(input.len(), 6);
    }

    #[test]
    fn test_filter_valid_zero_handling() {
        let input = vec![Some(0.0), Some(1.5), None, Some(-0.0), Some(f64::INFINITY)];
        assert_eq!(filter_valid(&input), vec![0.0, 1.5, -0.0]);
        assert_eq!(filter_valid_with(&input, MissingPolicy::Falsy), vec![1.5]);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&series(&[2.0, 4.0, 6.0])), Ok(4.0));
        assert_eq!(mean(&[Some(1.0), None, Some(2.0)]), Ok(1.5));
        // 10 / 3 = 3.333.. -> 3.33
        assert_eq!(mean(&series(&[1.0, 2.0, 7.0])), Ok(3.33));
    }

    #[test]
    fn test_mean_rounds_half_away_from_zero() {
        // 0.125 is exact in binary, so the tie is real.
        assert_eq!(round_to_decimals(0.125), 0.13);
        assert_eq!(round_to_decimals(-0.125), -0.13);
        assert_eq!(mean(&series(&[0.0, 0.25])), Ok(0.13));
    }

    #[test]
    fn test_huge_values_stay_finite() {
        assert_eq!(round_to_decimals(1e307), 1e307);
        assert_eq!(round_to_decimals(-1e20), -1e20);
        assert_eq!(mean(&series(&[1e307])), Ok(1e307));
        assert_eq!(mean(&series(&[1e308, 1e308])), Ok(1e308));
        assert_eq!(standard_deviation(&series(&[1e200, -1e200])), Ok(1e200));
        assert_eq!(standard_deviation(&series(&[1e308, 1e308])), Ok(0.0));
    }

    #[test]
    fn test_standard_deviation_reference_value() {
        let data = series(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(standard_deviation(&data), Ok(2.0));
    }

    #[test]
    fn test_standard_deviation_single_point() {
        assert_eq!(standard_deviation(&[None, Some(42.0), None]), Ok(0.0));
    }

    #[test]
    fn test_standard_deviation_uses_rounded_mean() {
        // Exact mean 0.00333.. would give 0.0047 -> 0.00.
        // Rounded mean 0.00 gives sqrt(0.0001 / 3) = 0.0058 -> 0.01.
        let data = series(&[0.0, 0.0, 0.01]);
        assert_eq!(mean(&data), Ok(0.0));
        assert_eq!(standard_deviation(&data), Ok(0.01));
    }

    #[test]
    fn test_empty_input_errors() {
        assert_eq!(mean(&[]), Err(StatsError::EmptyInput));
        assert_eq!(standard_deviation(&[]), Err(StatsError::EmptyInput));
        assert_eq!(mean(&[None, None]), Err(StatsError::EmptyInput));
        assert_eq!(
            mean_with(&[Some(0.0), None], MissingPolicy::Falsy),
            Err(StatsError::EmptyInput)
        );
    }

    #[test]
    fn test_reduction_percent() {
        let original = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let simplified = vec![Some(1.0), None, Some(3.0), None, Some(5.0)];
        assert_eq!(reduction_percent(&original, &simplified), Ok(40));
        assert_eq!(retained_percent(&original, &simplified), Ok(60));
    }

    #[test]
    fn test_reduction_percent_truncates() {
        let original = series(&[1.0, 2.0, 3.0]);
        let simplified = vec![Some(1.0), None, None];
        // 2/3 removed = 66.66..% -> 66
        assert_eq!(reduction_percent(&original, &simplified), Ok(66));
        assert_eq!(retained_percent(&original, &simplified), Ok(33));
    }

    #[test]
    fn test_reduction_percent_counts_all_original_positions() {
        let original = vec![Some(1.0), None, Some(3.0), None];
        let simplified = vec![Some(1.0), None, None, None];
        assert_eq!(reduction_percent(&original, &simplified), Ok(75));
    }

    #[test]
    fn test_reduction_percent_empty_original() {
        assert_eq!(reduction_percent(&[], &[]), Err(StatsError::DivisionByZero));
        assert_eq!(
            retained_percent(&[], &[Some(1.0)]),
            Err(StatsError::DivisionByZero)
        );
    }

    #[test]
    fn test_reduction_percent_policy() {
        let original = series(&[1.0, 0.0, 2.0, 0.0]);
        let simplified = series(&[1.0, 0.0, 2.0, 0.0]);
        assert_eq!(reduction_percent(&original, &simplified), Ok(0));
        assert_eq!(
            reduction_percent_with(&original, &simplified, MissingPolicy::Falsy),
            Ok(50)
        );
    }

    #[test]
    fn test_functions_are_idempotent() {
        let data = vec![Some(1.0), None, Some(4.0), Some(9.0)];
        assert_eq!(mean(&data), mean(&data));
        assert_eq!(standard_deviation(&data), standard_deviation(&data));
        assert_eq!(filter_valid(&data), filter_valid(&data));
        assert_eq!(reduction_percent(&data, &data), reduction_percent(&data, &data));
    }

    #[test]
    fn test_summary_compute() {
        let original = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let simplified = vec![Some(1.0), None, Some(3.0), None, Some(5.0)];
        let summary = Summary::compute(&original, &simplified, MissingPolicy::Explicit).unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.reduction_percent, 40);
        assert_eq!(summary.mean, 3.0);
        // sqrt(8/3) = 1.633 -> 1.63
        assert_eq!(summary.std_dev, 1.63);
    }

    #[test]
    fn test_summary_errors() {
        assert_eq!(
            Summary::compute(&[], &[], MissingPolicy::Explicit),
            Err(StatsError::DivisionByZero)
        );
        assert_eq!(
            Summary::compute(&[Some(1.0)], &[None], MissingPolicy::Explicit),
            Err(StatsError::EmptyInput)
        );
    }

    #[test]
    fn test_series_summary_report() {
        let summary = SeriesSummary::compute(&series(&[2.0, 4.0, 6.0]), MissingPolicy::Explicit)
            .unwrap();
        let report = summary.report("Original");
        assert!(report.starts_with("Original:"));
        assert!(report.contains("Count: 3"));
        assert!(report.contains("Mean: 4.00"));
        assert!(report.contains("Std Dev: 1.63"));
    }
}
