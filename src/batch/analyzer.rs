use super::report::{
    BatchCorrection, BatchMetric, BatchRecommendation, ConsistencyMetrics, ConsistencyReport,
    CorrectionScope, MetricScore, OutlierPhoto,
};
use super::statistics::{deviation_from_rest, mean, mean_and_stddev_without, population_variance};
use crate::analysis::analyzers::detail_level;
use crate::error::BatchError;
use crate::types::ImageSignals;
use tracing::{debug, info};
use uuid::Uuid;

pub const MIN_BATCH_SIZE: usize = 2;
pub const DEFAULT_OUTLIER_THRESHOLD: f64 = 2.0;
pub const RECOMMEND_BELOW: f64 = 0.7;
/// Outliers need at least two other photos to be measured against.
pub const MIN_OUTLIER_BATCH_SIZE: usize = 3;

/// A photo in a batch with its measured signals.
#[derive(Debug, Clone)]
pub struct BatchPhoto {
    pub photo_id: String,
    pub signals: ImageSignals,
}

impl BatchPhoto {
    pub fn new(photo_id: impl Into<String>, signals: ImageSignals) -> Self {
        Self {
            photo_id: photo_id.into(),
            signals,
        }
    }
}

/// Scalar a photo contributes to `metric`, falling back to the neutral value.
pub fn metric_value(metric: BatchMetric, signals: &ImageSignals) -> f64 {
    let value = match metric {
        BatchMetric::Exposure => signals
            .average_brightness
            .or_else(|| signals.histogram_stats().map(|s| s.mean)),
        BatchMetric::WhiteBalance => signals.channel_means.map(|c| c.warmth()),
        BatchMetric::Color => signals.saturation.map(|s| s * 100.0),
        BatchMetric::Sharpness => signals.sharpness.map(|v| 100.0 * detail_level(v)),
        BatchMetric::Composition => signals.primary_region().map(|r| r.bounds.center().0 * 100.0),
    };
    value.unwrap_or_else(|| metric.neutral_value())
}

pub fn variance_score(metric: BatchMetric, variance: f64) -> f64 {
    let [excellent, good, fair, weak] = metric.variance_bands();
    if variance <= excellent {
        1.0
    } else if variance <= good {
        0.85
    } else if variance <= fair {
        0.7
    } else if variance <= weak {
        0.5
    } else {
        0.3
    }
}

fn metric_notes(metric: BatchMetric, score: f64) -> String {
    if score >= 0.85 {
        format!("{} is consistent across the batch.", metric)
    } else if score >= RECOMMEND_BELOW {
        format!("{} varies slightly between photos.", metric)
    } else {
        format!("{} varies noticeably between photos.", metric)
    }
}

fn outlier_suggestion(metric: BatchMetric, current: f64, target: f64) -> String {
    let direction = if current > target { "lower" } else { "raise" };
    match metric {
        BatchMetric::Exposure => format!("{} exposure to match the rest of the set", capitalize(direction)),
        BatchMetric::WhiteBalance => {
            let shift = if current > target { "cooler" } else { "warmer" };
            format!("Shift white balance {} to match the rest of the set", shift)
        }
        BatchMetric::Color => format!("{} saturation to match the rest of the set", capitalize(direction)),
        BatchMetric::Sharpness => {
            if current < target {
                "Sharpen this frame or consider replacing it".to_string()
            } else {
                "Soften sharpening to match the rest of the set".to_string()
            }
        }
        BatchMetric::Composition => {
            "Recrop so the subject sits where it does in the other photos".to_string()
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Measures how consistently a set of photos was shot and edited.
#[derive(Debug, Clone)]
pub struct BatchConsistencyAnalyzer {
    outlier_threshold: f64,
}

impl Default for BatchConsistencyAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchConsistencyAnalyzer {
    pub fn new() -> Self {
        Self {
            outlier_threshold: DEFAULT_OUTLIER_THRESHOLD,
        }
    }

    pub fn with_outlier_threshold(outlier_threshold: f64) -> Self {
        Self { outlier_threshold }
    }

    pub fn outlier_threshold(&self) -> f64 {
        self.outlier_threshold
    }

    pub fn analyze(&self, photos: &[BatchPhoto]) -> Result<ConsistencyReport, BatchError> {
        if photos.len() < MIN_BATCH_SIZE {
            return Err(BatchError::InsufficientPhotos(photos.len()));
        }

        let mut outliers = Vec::new();
        let mut recommendations = Vec::new();

        let mut score_metric = |metric: BatchMetric| -> MetricScore {
            let values: Vec<f64> = photos
                .iter()
                .map(|p| metric_value(metric, &p.signals))
                .collect();
            let batch_mean = mean(&values);
            let variance = population_variance(&values);
            let score = variance_score(metric, variance);

            let before = outliers.len();
            let photos_to_check: &[BatchPhoto] = if photos.len() >= MIN_OUTLIER_BATCH_SIZE {
                photos
            } else {
                &[]
            };
            for (index, photo) in photos_to_check.iter().enumerate() {
                let deviation = deviation_from_rest(&values, index);
                if deviation > self.outlier_threshold {
                    let (target, _) = mean_and_stddev_without(&values, index);
                    debug!(
                        "{} is a {} outlier: {:.2} vs {:.2} ({:.2} sd)",
                        photo.photo_id, metric, values[index], target, deviation
                    );
                    outliers.push(OutlierPhoto {
                        photo_id: photo.photo_id.clone(),
                        metric,
                        deviation,
                        current_value: values[index],
                        target_value: target,
                        suggestion: outlier_suggestion(metric, values[index], target),
                    });
                }
            }

            if score < RECOMMEND_BELOW {
                let has_outliers = outliers.len() > before;
                let scope = if has_outliers {
                    CorrectionScope::OutliersOnly
                } else {
                    CorrectionScope::All
                };
                let message = match scope {
                    CorrectionScope::OutliersOnly => {
                        format!("Bring the {} outliers in line with the batch.", metric.label().to_lowercase())
                    }
                    CorrectionScope::All => {
                        format!("Normalize {} across every photo in the batch.", metric.label().to_lowercase())
                    }
                };
                recommendations.push(BatchRecommendation {
                    metric,
                    message,
                    correction: BatchCorrection {
                        adjustment: metric.adjustment(),
                        target_value: batch_mean,
                        scope,
                    },
                });
            }

            MetricScore {
                score,
                variance,
                mean: batch_mean,
                notes: metric_notes(metric, score),
            }
        };

        let metrics = ConsistencyMetrics {
            exposure: score_metric(BatchMetric::Exposure),
            white_balance: score_metric(BatchMetric::WhiteBalance),
            color: score_metric(BatchMetric::Color),
            sharpness: score_metric(BatchMetric::Sharpness),
            composition: score_metric(BatchMetric::Composition),
        };

        let overall_consistency = metrics
            .iter()
            .map(|(metric, score)| metric.weight() * score.score)
            .sum::<f64>()
            .clamp(0.0, 1.0);

        let report = ConsistencyReport {
            batch_id: Uuid::new_v4(),
            photo_ids: photos.iter().map(|p| p.photo_id.clone()).collect(),
            overall_consistency,
            metrics,
            recommendations,
            outliers,
        };

        info!(
            "Batch {} of {} photos: consistency {:.3}, {} outliers, {} recommendations",
            report.batch_id,
            report.photo_ids.len(),
            report.overall_consistency,
            report.outliers.len(),
            report.recommendations.len()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChannelMeans;

    fn brightness(photo_id: &str, value: f64) -> BatchPhoto {
        BatchPhoto::new(
            photo_id,
            ImageSignals {
                average_brightness: Some(value),
                ..ImageSignals::default()
            },
        )
    }

    #[test]
    fn single_photo_is_rejected() {
        let analyzer = BatchConsistencyAnalyzer::new();
        assert_eq!(
            analyzer.analyze(&[brightness("a", 120.0)]).unwrap_err(),
            BatchError::InsufficientPhotos(1)
        );
        assert_eq!(
            analyzer.analyze(&[]).unwrap_err(),
            BatchError::InsufficientPhotos(0)
        );
    }

    #[test]
    fn identical_pair_is_fully_consistent() {
        let signals = ImageSignals {
            average_brightness: Some(130.0),
            channel_means: Some(ChannelMeans::new(140.0, 130.0, 120.0)),
            saturation: Some(0.4),
            sharpness: Some(300.0),
            ..ImageSignals::default()
        };
        let photos = [
            BatchPhoto::new("a", signals.clone()),
            BatchPhoto::new("b", signals),
        ];
        let report = BatchConsistencyAnalyzer::new().analyze(&photos).unwrap();

        assert!((report.overall_consistency - 1.0).abs() < 1e-12);
        assert!(report.outliers.is_empty());
        assert!(report.recommendations.is_empty());
        assert_eq!(report.photo_ids, vec!["a", "b"]);
        assert_eq!(report.metrics.exposure.mean, 130.0);
        assert_eq!(report.metrics.white_balance.mean, 20.0);
    }

    #[test]
    fn flags_only_the_deviant_photo() {
        let photos = [
            brightness("a", 120.0),
            brightness("b", 120.0),
            brightness("c", 122.0),
            brightness("d", 123.5),
        ];
        let report = BatchConsistencyAnalyzer::new().analyze(&photos).unwrap();

        assert_eq!(report.outliers.len(), 1);
        let outlier = &report.outliers[0];
        assert_eq!(outlier.photo_id, "d");
        assert_eq!(outlier.metric, BatchMetric::Exposure);
        assert!(outlier.deviation > 2.9 && outlier.deviation < 3.1);
        assert_eq!(outlier.current_value, 123.5);
        assert!(outlier.suggestion.starts_with("Lower exposure"));
    }

    #[test]
    fn pair_never_flags_outliers() {
        let report = BatchConsistencyAnalyzer::new()
            .analyze(&[brightness("a", 120.0), brightness("b", 126.0)])
            .unwrap();
        assert_eq!(report.metrics.exposure.variance, 9.0);
        assert_eq!(report.metrics.exposure.score, 1.0);
        assert!(report.outliers.is_empty());

        let report = BatchConsistencyAnalyzer::new()
            .analyze(&[brightness("a", 60.0), brightness("b", 200.0)])
            .unwrap();
        assert!(report.outliers.is_empty());
        assert_eq!(report.recommendations.len(), 1);
        assert_eq!(report.recommendations[0].correction.scope, CorrectionScope::All);
        assert_eq!(report.recommendations[0].correction.target_value, 130.0);
    }

    #[test]
    fn inconsistent_exposure_recommends_correction() {
        let photos = [
            brightness("a", 60.0),
            brightness("b", 200.0),
            brightness("c", 80.0),
            brightness("d", 180.0),
        ];
        let report = BatchConsistencyAnalyzer::new().analyze(&photos).unwrap();

        // variance 3700
        assert_eq!(report.metrics.exposure.score, 0.3);
        assert!((report.overall_consistency - 0.79).abs() < 1e-12);
        assert_eq!(report.recommendations.len(), 1);
        let recommendation = &report.recommendations[0];
        assert_eq!(recommendation.metric, BatchMetric::Exposure);
        assert_eq!(recommendation.correction.target_value, 130.0);
        assert_eq!(recommendation.correction.scope, CorrectionScope::All);
    }

    #[test]
    fn variance_bands_per_metric() {
        assert_eq!(variance_score(BatchMetric::Exposure, 25.0), 1.0);
        assert_eq!(variance_score(BatchMetric::Exposure, 90.0), 0.85);
        assert_eq!(variance_score(BatchMetric::WhiteBalance, 50.0), 0.7);
        assert_eq!(variance_score(BatchMetric::Color, 64.0), 0.5);
        assert_eq!(variance_score(BatchMetric::Color, 65.0), 0.3);
    }

    #[test]
    fn missing_signals_use_neutral_values() {
        let empty = ImageSignals::default();
        for metric in BatchMetric::ALL {
            assert_eq!(metric_value(metric, &empty), metric.neutral_value());
        }
    }
}
