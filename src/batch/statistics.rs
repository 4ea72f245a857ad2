//! Population statistics over a batch of per-photo scalars.

/// Spread below this counts as zero.
const MIN_STDDEV: f64 = 1e-9;

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Mean and standard deviation of `values` with the element at `skip` left
/// out. A zero spread is reported as 1.0.
pub fn mean_and_stddev_without(values: &[f64], skip: usize) -> (f64, f64) {
    let rest: Vec<f64> = values
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != skip)
        .map(|(_, v)| *v)
        .collect();

    let stddev = population_variance(&rest).sqrt();
    let stddev = if stddev < MIN_STDDEV { 1.0 } else { stddev };
    (mean(&rest), stddev)
}

/// How many standard deviations `values[index]` sits from the rest.
pub fn deviation_from_rest(values: &[f64], index: usize) -> f64 {
    let (rest_mean, rest_stddev) = mean_and_stddev_without(values, index);
    (values[index] - rest_mean).abs() / rest_stddev
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn population_statistics() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&values), 5.0);
        assert_eq!(population_variance(&values), 4.0);
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(population_variance(&[3.0]), 0.0);
    }

    #[test]
    fn deviation_is_measured_against_the_rest() {
        let values = [120.0, 120.0, 122.0, 123.5];
        assert!((deviation_from_rest(&values, 3) - 3.005).abs() < 0.01);
        assert!(deviation_from_rest(&values, 0) < 2.0);
        assert!(deviation_from_rest(&values, 2) < 1.0);
    }

    #[test]
    fn zero_spread_uses_unit_stddev() {
        let values = [10.0, 10.0, 13.0];
        assert_eq!(mean_and_stddev_without(&values, 2), (10.0, 1.0));
        assert_eq!(deviation_from_rest(&values, 2), 3.0);
    }
}
