use crate::analysis::core::{CategoryAnalyzer, SubMeasurement};
use crate::types::{Category, ChannelMeans, ImageSignals};

const SATURATION_WEIGHT: f64 = 0.6;
const WHITE_BALANCE_WEIGHT: f64 = 0.4;

// cast thresholds in 0-255 channel units
const WARMTH_LIMIT: f64 = 18.0;
const TINT_LIMIT: f64 = 10.0;

/// Scores saturation and white balance.
#[derive(Debug, Default, Clone, Copy)]
pub struct ColorAnalyzer;

impl ColorAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn saturation(saturation: f64) -> SubMeasurement {
        if (0.3..=0.6).contains(&saturation) {
            SubMeasurement::scored(1.0).with_strength("Natural, healthy saturation")
        } else if saturation < 0.2 {
            SubMeasurement::scored(0.4).with_issue("Colors look muted and washed out")
        } else if saturation < 0.3 {
            SubMeasurement::scored(0.7)
        } else if saturation <= 0.8 {
            SubMeasurement::scored(0.8)
        } else {
            SubMeasurement::scored(0.5).with_issue("Colors look oversaturated")
        }
    }

    pub(crate) fn white_balance(means: &ChannelMeans) -> SubMeasurement {
        let warmth = means.warmth();
        let tint = means.tint();
        let ratio = (warmth.abs() / WARMTH_LIMIT).max(tint.abs() / TINT_LIMIT);

        let mut measurement = if ratio <= 0.5 {
            SubMeasurement::scored(1.0).with_strength("Neutral white balance")
        } else if ratio <= 1.0 {
            SubMeasurement::scored(0.8)
        } else if ratio <= 2.0 {
            SubMeasurement::scored(0.6)
        } else {
            SubMeasurement::scored(0.4)
        };

        if warmth > WARMTH_LIMIT {
            measurement = measurement.with_issue("Warm color cast (reds and yellows dominate)");
        } else if warmth < -WARMTH_LIMIT {
            measurement = measurement.with_issue("Cool color cast (blues dominate)");
        }
        if tint > TINT_LIMIT {
            measurement = measurement.with_issue("Green color cast");
        } else if tint < -TINT_LIMIT {
            measurement = measurement.with_issue("Magenta color cast");
        }
        measurement
    }
}

impl CategoryAnalyzer for ColorAnalyzer {
    fn category(&self) -> Category {
        Category::Color
    }

    fn name(&self) -> &'static str {
        "ColorAnalyzer"
    }

    fn measure(&self, signals: &ImageSignals) -> Vec<(f64, SubMeasurement)> {
        let saturation = signals
            .saturation
            .map(Self::saturation)
            .unwrap_or_else(SubMeasurement::neutral);
        let white_balance = signals
            .channel_means
            .as_ref()
            .map(Self::white_balance)
            .unwrap_or_else(SubMeasurement::neutral);

        vec![
            (SATURATION_WEIGHT, saturation),
            (WHITE_BALANCE_WEIGHT, white_balance),
        ]
    }
}
