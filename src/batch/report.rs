use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The five cross-photo consistency dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatchMetric {
    Exposure,
    WhiteBalance,
    Color,
    Sharpness,
    Composition,
}

impl BatchMetric {
    pub const ALL: [BatchMetric; 5] = [
        BatchMetric::Exposure,
        BatchMetric::WhiteBalance,
        BatchMetric::Color,
        BatchMetric::Sharpness,
        BatchMetric::Composition,
    ];

    pub fn weight(self) -> f64 {
        match self {
            BatchMetric::Exposure => 0.30,
            BatchMetric::WhiteBalance => 0.25,
            BatchMetric::Color => 0.20,
            BatchMetric::Sharpness => 0.15,
            BatchMetric::Composition => 0.10,
        }
    }

    /// Variance ceilings for the 1.0 / 0.85 / 0.7 / 0.5 score bands.
    pub fn variance_bands(self) -> [f64; 4] {
        match self {
            BatchMetric::WhiteBalance => [9.0, 36.0, 81.0, 144.0],
            BatchMetric::Color => [4.0, 16.0, 36.0, 64.0],
            BatchMetric::Exposure | BatchMetric::Sharpness | BatchMetric::Composition => {
                [25.0, 100.0, 225.0, 400.0]
            }
        }
    }

    /// Scalar used when a photo is missing the underlying signal.
    pub fn neutral_value(self) -> f64 {
        match self {
            BatchMetric::Exposure => 128.0,
            BatchMetric::WhiteBalance => 0.0,
            BatchMetric::Color | BatchMetric::Sharpness | BatchMetric::Composition => 50.0,
        }
    }

    pub fn adjustment(self) -> BatchAdjustment {
        match self {
            BatchMetric::Exposure => BatchAdjustment::Exposure,
            BatchMetric::WhiteBalance => BatchAdjustment::WhiteBalance,
            BatchMetric::Color => BatchAdjustment::Saturation,
            BatchMetric::Sharpness => BatchAdjustment::Sharpening,
            BatchMetric::Composition => BatchAdjustment::Crop,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BatchMetric::Exposure => "Exposure",
            BatchMetric::WhiteBalance => "White balance",
            BatchMetric::Color => "Color",
            BatchMetric::Sharpness => "Sharpness",
            BatchMetric::Composition => "Composition",
        }
    }
}

impl fmt::Display for BatchMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BatchAdjustment {
    Exposure,
    WhiteBalance,
    Saturation,
    Sharpening,
    Crop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrectionScope {
    OutliersOnly,
    All,
}

/// Directive for the external edit pipeline: move `adjustment` towards
/// `target_value` on the photos in `scope`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchCorrection {
    pub adjustment: BatchAdjustment,
    pub target_value: f64,
    pub scope: CorrectionScope,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecommendation {
    pub metric: BatchMetric,
    pub message: String,
    pub correction: BatchCorrection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricScore {
    pub score: f64,
    pub variance: f64,
    pub mean: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyMetrics {
    pub exposure: MetricScore,
    pub white_balance: MetricScore,
    pub color: MetricScore,
    pub sharpness: MetricScore,
    pub composition: MetricScore,
}

impl ConsistencyMetrics {
    pub fn get(&self, metric: BatchMetric) -> &MetricScore {
        match metric {
            BatchMetric::Exposure => &self.exposure,
            BatchMetric::WhiteBalance => &self.white_balance,
            BatchMetric::Color => &self.color,
            BatchMetric::Sharpness => &self.sharpness,
            BatchMetric::Composition => &self.composition,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (BatchMetric, &MetricScore)> {
        BatchMetric::ALL.into_iter().map(move |m| (m, self.get(m)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierPhoto {
    pub photo_id: String,
    pub metric: BatchMetric,
    /// Distance from the rest of the batch in standard deviations.
    pub deviation: f64,
    pub current_value: f64,
    pub target_value: f64,
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub batch_id: Uuid,
    pub photo_ids: Vec<String>,
    pub overall_consistency: f64,
    pub metrics: ConsistencyMetrics,
    pub recommendations: Vec<BatchRecommendation>,
    pub outliers: Vec<OutlierPhoto>,
}

impl ConsistencyReport {
    pub fn outliers_for(&self, metric: BatchMetric) -> impl Iterator<Item = &OutlierPhoto> {
        self.outliers.iter().filter(move |o| o.metric == metric)
    }
}
