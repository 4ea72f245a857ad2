use crate::analysis::core::{CategoryAnalyzer, SubMeasurement};
use crate::types::{Category, HistogramStats, ImageSignals};

const EXPOSURE_WEIGHT: f64 = 0.4;
const CONTRAST_WEIGHT: f64 = 0.3;
const CLIPPING_WEIGHT: f64 = 0.3;

// percent of pixels at either extreme before it reads as lost detail
const CLIP_ISSUE_PCT: f64 = 2.0;

/// Scores exposure level, tonal range and clipping.
#[derive(Debug, Default, Clone, Copy)]
pub struct LightAnalyzer;

impl LightAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn exposure(mean_brightness: f64) -> SubMeasurement {
        if (110.0..=145.0).contains(&mean_brightness) {
            SubMeasurement::scored(1.0).with_strength("Well-balanced exposure")
        } else if mean_brightness < 85.0 {
            SubMeasurement::scored(0.4).with_issue("Image is underexposed; shadows look heavy")
        } else if mean_brightness > 170.0 {
            SubMeasurement::scored(0.4).with_issue("Image is overexposed; highlights look washed out")
        } else {
            SubMeasurement::scored(0.75)
        }
    }

    pub(crate) fn contrast(dynamic_range: f64) -> SubMeasurement {
        if dynamic_range < 60.0 {
            SubMeasurement::scored(0.4).with_issue("Flat, low-contrast tonality")
        } else if (80.0..=160.0).contains(&dynamic_range) {
            SubMeasurement::scored(1.0).with_strength("Healthy tonal range")
        } else if dynamic_range > 170.0 {
            SubMeasurement::scored(0.6).with_issue("Harsh contrast between light and dark areas")
        } else {
            SubMeasurement::scored(0.8)
        }
    }

    pub(crate) fn clipping(stats: &HistogramStats) -> SubMeasurement {
        let total = stats.shadow_clip_pct + stats.highlight_clip_pct;
        let mut measurement = if total <= 1.0 {
            SubMeasurement::scored(1.0).with_strength("Full tonal detail preserved")
        } else if total <= 4.0 {
            SubMeasurement::scored(0.7)
        } else {
            SubMeasurement::scored(0.4)
        };

        if stats.shadow_clip_pct > CLIP_ISSUE_PCT {
            measurement = measurement.with_issue("Crushed shadows lose detail");
        }
        if stats.highlight_clip_pct > CLIP_ISSUE_PCT {
            measurement = measurement.with_issue("Blown highlights lose detail");
        }
        measurement
    }
}

impl CategoryAnalyzer for LightAnalyzer {
    fn category(&self) -> Category {
        Category::Light
    }

    fn name(&self) -> &'static str {
        "LightAnalyzer"
    }

    fn measure(&self, signals: &ImageSignals) -> Vec<(f64, SubMeasurement)> {
        let stats = signals.histogram_stats();
        // the histogram mean stands in when the source gives no brightness
        let brightness = signals
            .average_brightness
            .or_else(|| stats.map(|s| s.mean));

        let exposure = brightness
            .map(Self::exposure)
            .unwrap_or_else(SubMeasurement::neutral);
        let contrast = stats
            .map(|s| Self::contrast(s.dynamic_range()))
            .unwrap_or_else(SubMeasurement::neutral);
        let clipping = stats
            .as_ref()
            .map(Self::clipping)
            .unwrap_or_else(SubMeasurement::neutral);

        vec![
            (EXPOSURE_WEIGHT, exposure),
            (CONTRAST_WEIGHT, contrast),
            (CLIPPING_WEIGHT, clipping),
        ]
    }
}
