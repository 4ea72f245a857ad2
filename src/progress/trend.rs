use serde::{Deserialize, Serialize};

pub const DEFAULT_TREND_WINDOW: usize = 10;
pub const MIN_TREND_POINTS: usize = 3;

/// Slope per measurement beyond which a skill counts as moving.
pub const TREND_SLOPE_THRESHOLD: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Improving,
    Stable,
    Declining,
    Unknown,
}

/// Least-squares slope of `scores` against their index. `None` for fewer
/// than two points.
pub fn regression_slope(scores: &[f64]) -> Option<f64> {
    let n = scores.len();
    if n < 2 {
        return None;
    }

    let n_f = n as f64;
    let mean_x = (n_f - 1.0) / 2.0;
    let mean_y = scores.iter().sum::<f64>() / n_f;

    let (covariance, spread) = scores
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(cov, spread), (i, y)| {
            let dx = i as f64 - mean_x;
            (cov + dx * (y - mean_y), spread + dx * dx)
        });

    Some(covariance / spread)
}

/// Classifies the most recent `window` scores.
pub fn classify(scores: &[f64], window: usize) -> Trend {
    let recent = &scores[scores.len().saturating_sub(window)..];
    if recent.len() < MIN_TREND_POINTS {
        return Trend::Unknown;
    }

    match regression_slope(recent) {
        Some(slope) if slope > TREND_SLOPE_THRESHOLD => Trend::Improving,
        Some(slope) if slope < -TREND_SLOPE_THRESHOLD => Trend::Declining,
        Some(_) => Trend::Stable,
        None => Trend::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slope_of_a_line() {
        let slope = regression_slope(&[0.5, 0.55, 0.6, 0.65]).unwrap();
        assert!((slope - 0.05).abs() < 1e-12);
        assert!(regression_slope(&[0.5]).is_none());
    }

    #[test]
    fn too_few_points_is_unknown() {
        assert_eq!(classify(&[], DEFAULT_TREND_WINDOW), Trend::Unknown);
        assert_eq!(classify(&[0.5, 0.9], DEFAULT_TREND_WINDOW), Trend::Unknown);
    }

    #[test]
    fn rising_scores_improve() {
        assert_eq!(classify(&[0.5, 0.55, 0.6, 0.65], DEFAULT_TREND_WINDOW), Trend::Improving);
        assert_eq!(classify(&[0.7, 0.6, 0.5], DEFAULT_TREND_WINDOW), Trend::Declining);
        assert_eq!(classify(&[0.6, 0.605, 0.6], DEFAULT_TREND_WINDOW), Trend::Stable);
    }

    #[test]
    fn only_the_window_counts() {
        // an early decline falls outside the last three points
        let scores = [0.9, 0.5, 0.3, 0.4, 0.5, 0.6];
        assert_eq!(classify(&scores, 3), Trend::Improving);
        assert_eq!(classify(&scores, 6), Trend::Declining);
    }
}
