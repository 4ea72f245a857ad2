use super::trend::{classify, Trend};
use crate::types::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const SECONDS_PER_WEEK: f64 = 7.0 * 24.0 * 3600.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub score: f64,
    pub timestamp: DateTime<Utc>,
    pub photo_id: String,
    pub critique_id: Uuid,
}

/// Longitudinal record of one category. Measurements are kept in time order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMetric {
    pub category: Category,
    pub current_score: f64,
    pub target_score: f64,
    pub measurements: Vec<Measurement>,
    pub trend: Trend,
    /// Score change per week between the first and last measurement.
    pub improvement_rate: f64,
}

impl SkillMetric {
    pub fn new(category: Category, target_score: f64) -> Self {
        Self {
            category,
            current_score: 0.0,
            target_score,
            measurements: Vec::new(),
            trend: Trend::Unknown,
            improvement_rate: 0.0,
        }
    }

    pub fn has_measurements(&self) -> bool {
        !self.measurements.is_empty()
    }

    /// Inserts `measurement` at its place in time and refreshes the derived
    /// fields.
    pub fn record(&mut self, measurement: Measurement, trend_window: usize) {
        let at = self
            .measurements
            .partition_point(|m| m.timestamp <= measurement.timestamp);
        self.measurements.insert(at, measurement);
        self.refresh(trend_window);
    }

    /// Recomputes current score, trend and improvement rate.
    pub fn refresh(&mut self, trend_window: usize) {
        self.current_score = self.measurements.last().map(|m| m.score).unwrap_or(0.0);
        let scores: Vec<f64> = self.measurements.iter().map(|m| m.score).collect();
        self.trend = classify(&scores, trend_window);
        self.improvement_rate = improvement_rate(&self.measurements);
    }

    /// Score gain from the first measurement at or after `since` to the
    /// latest, with the number of measurements in that span.
    pub fn gain_since(&self, since: DateTime<Utc>) -> (f64, usize) {
        let recent: Vec<&Measurement> = self
            .measurements
            .iter()
            .filter(|m| m.timestamp >= since)
            .collect();
        match (recent.first(), recent.last()) {
            (Some(first), Some(last)) => (last.score - first.score, recent.len()),
            _ => (0.0, 0),
        }
    }
}

fn improvement_rate(measurements: &[Measurement]) -> f64 {
    let (Some(first), Some(last)) = (measurements.first(), measurements.last()) else {
        return 0.0;
    };
    if measurements.len() < 2 {
        return 0.0;
    }

    let elapsed = (last.timestamp - first.timestamp).num_seconds() as f64;
    if elapsed <= 0.0 {
        return 0.0;
    }
    (last.score - first.score) / (elapsed / SECONDS_PER_WEEK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(day: i64, score: f64) -> Measurement {
        Measurement {
            score,
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap() + Duration::days(day),
            photo_id: format!("IMG_{}", day),
            critique_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn rate_is_per_week() {
        let mut metric = SkillMetric::new(Category::Light, 0.8);
        metric.record(at(0, 0.5), 10);
        metric.record(at(14, 0.7), 10);
        assert!((metric.improvement_rate - 0.1).abs() < 1e-9);
        assert_eq!(metric.current_score, 0.7);
        assert_eq!(metric.trend, Trend::Unknown);
    }

    #[test]
    fn same_instant_has_no_rate() {
        let mut metric = SkillMetric::new(Category::Light, 0.8);
        metric.record(at(0, 0.5), 10);
        metric.record(at(0, 0.9), 10);
        assert_eq!(metric.improvement_rate, 0.0);
    }

    #[test]
    fn late_arrivals_keep_time_order() {
        let mut metric = SkillMetric::new(Category::Focus, 0.8);
        metric.record(at(2, 0.6), 10);
        metric.record(at(1, 0.4), 10);
        let days: Vec<_> = metric.measurements.iter().map(|m| m.photo_id.as_str()).collect();
        assert_eq!(days, vec!["IMG_1", "IMG_2"]);
        assert_eq!(metric.current_score, 0.6);
    }

    #[test]
    fn gain_over_recent_span() {
        let mut metric = SkillMetric::new(Category::Color, 0.8);
        for (day, score) in [(0, 0.3), (10, 0.4), (12, 0.5), (14, 0.65)] {
            metric.record(at(day, score), 10);
        }
        let since = at(5, 0.0).timestamp;
        let (gain, count) = metric.gain_since(since);
        assert!((gain - 0.25).abs() < 1e-9);
        assert_eq!(count, 3);
    }
}
