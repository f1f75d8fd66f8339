use average::Variance;
use serde::Serialize;

/// Descriptive statistics of the prices, rounded to cents.
///
/// Halves are rounded away from zero, so `0.125` becomes `0.13` and not the banker's `0.12`.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Statistics {
    pub count: usize,
    pub mean: f64,
    pub median: f64,

    /// Sample standard deviation, undefined for a single price.
    pub std: Option<f64>,

    pub min: f64,
    pub max: f64,
    pub q25: f64,
    pub q75: f64,
}

impl Statistics {
    /// Calculate the statistics, or [`None`] when there are no prices.
    pub fn from_prices(prices: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut sorted: Vec<f64> = prices.into_iter().collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let variance: Variance = sorted.iter().copied().collect();
        let std = (sorted.len() >= 2).then(|| round(variance.sample_variance().sqrt()));

        Some(Self {
            count: sorted.len(),
            mean: round(variance.mean()),
            median: round(quantile(&sorted, 0.5)),
            std,
            min: round(sorted[0]),
            max: round(sorted[sorted.len() - 1]),
            q25: round(quantile(&sorted, 0.25)),
            q75: round(quantile(&sorted, 0.75)),
        })
    }
}

/// Quantile with the linear interpolation between the closest ranks.
///
/// The slice must be sorted and non-empty.
#[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - position.floor();
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Round to 2 decimals, halves away from zero.
fn round(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn empty_ok() {
        assert!(Statistics::from_prices(Vec::new()).is_none());
    }

    #[test]
    fn single_price_ok() {
        let statistics = Statistics::from_prices([50.0]).unwrap();
        assert_eq!(statistics.count, 1);
        assert_abs_diff_eq!(statistics.mean, 50.0);
        assert_abs_diff_eq!(statistics.median, 50.0);
        assert_eq!(statistics.std, None);
        assert_abs_diff_eq!(statistics.min, 50.0);
        assert_abs_diff_eq!(statistics.max, 50.0);
        assert_abs_diff_eq!(statistics.q25, 50.0);
        assert_abs_diff_eq!(statistics.q75, 50.0);
    }

    #[test]
    fn interpolated_quantiles_ok() {
        let statistics = Statistics::from_prices([4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(statistics.count, 4);
        assert_abs_diff_eq!(statistics.mean, 2.5);
        assert_abs_diff_eq!(statistics.median, 2.5);
        assert_abs_diff_eq!(statistics.std.unwrap(), 1.29);
        assert_abs_diff_eq!(statistics.min, 1.0);
        assert_abs_diff_eq!(statistics.max, 4.0);
        assert_abs_diff_eq!(statistics.q25, 1.75);
        assert_abs_diff_eq!(statistics.q75, 3.25);
    }

    #[test]
    fn negative_prices_ok() {
        let statistics = Statistics::from_prices([-5.123, 10.0, 0.0, 120.456, 33.3]).unwrap();
        assert_abs_diff_eq!(statistics.mean, 31.73);
        assert_abs_diff_eq!(statistics.median, 10.0);
        assert_abs_diff_eq!(statistics.min, -5.12);
        assert_abs_diff_eq!(statistics.max, 120.46);
        assert_abs_diff_eq!(statistics.q25, 0.0);
        assert_abs_diff_eq!(statistics.q75, 33.3);
        assert_abs_diff_eq!(statistics.std.unwrap(), 51.75);
    }

    #[test]
    fn round_half_away_from_zero_ok() {
        assert_abs_diff_eq!(round(0.125), 0.13);
        assert_abs_diff_eq!(round(0.625), 0.63);
        assert_abs_diff_eq!(round(-0.125), -0.13);
        assert_abs_diff_eq!(round(1.004), 1.0);
    }
}
