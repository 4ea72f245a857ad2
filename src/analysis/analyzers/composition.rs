use crate::analysis::core::{CategoryAnalyzer, SubMeasurement};
use crate::types::{Category, ImageSignals, SalientRegion};

const SALIENCY_WEIGHT: f64 = 0.4;
const BALANCE_WEIGHT: f64 = 0.3;
const THIRDS_WEIGHT: f64 = 0.3;

const THIRDS_POINTS: [(f64, f64); 4] = [
    (1.0 / 3.0, 1.0 / 3.0),
    (2.0 / 3.0, 1.0 / 3.0),
    (1.0 / 3.0, 2.0 / 3.0),
    (2.0 / 3.0, 2.0 / 3.0),
];

/// Scores subject concentration, left/right balance and thirds placement.
#[derive(Debug, Default, Clone, Copy)]
pub struct CompositionAnalyzer;

impl CompositionAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn saliency_concentration(regions: &[SalientRegion]) -> SubMeasurement {
        let total: f64 = regions.iter().map(|r| r.confidence.max(0.0)).sum();
        let top = regions
            .iter()
            .map(|r| r.confidence.max(0.0))
            .fold(0.0, f64::max);
        if regions.is_empty() || total <= 0.0 {
            return SubMeasurement::scored(0.3).with_issue("No clear subject stands out in the frame");
        }

        let concentration = top / total;
        if concentration >= 0.7 {
            SubMeasurement::scored(1.0).with_strength("Strong, clear subject")
        } else if concentration >= 0.4 {
            SubMeasurement::scored(0.7)
        } else {
            SubMeasurement::scored(0.4).with_issue("Attention is split across several competing subjects")
        }
    }

    pub(crate) fn balance(left: f64, right: f64) -> SubMeasurement {
        let difference = (left - right).abs();
        if difference <= 15.0 {
            SubMeasurement::scored(1.0).with_strength("Well-balanced visual weight")
        } else if difference <= 40.0 {
            SubMeasurement::scored(0.7)
        } else {
            SubMeasurement::scored(0.4).with_issue("Visual weight is lopsided between left and right")
        }
    }

    pub(crate) fn thirds_placement(subject: &SalientRegion) -> SubMeasurement {
        let (cx, cy) = subject.bounds.center();
        let distance = THIRDS_POINTS
            .iter()
            .map(|(px, py)| ((cx - px).powi(2) + (cy - py).powi(2)).sqrt())
            .fold(f64::INFINITY, f64::min);
        let from_center = ((cx - 0.5).powi(2) + (cy - 0.5).powi(2)).sqrt();

        if distance <= 0.1 {
            SubMeasurement::scored(1.0).with_strength("Subject sits near a rule-of-thirds point")
        } else if distance <= 0.2 {
            SubMeasurement::scored(0.7)
        } else if from_center <= 0.1 {
            SubMeasurement::scored(0.6).with_issue("Subject is dead-center; try an off-center placement")
        } else {
            SubMeasurement::scored(0.4).with_issue("Subject placement ignores the thirds grid")
        }
    }
}

impl CategoryAnalyzer for CompositionAnalyzer {
    fn category(&self) -> Category {
        Category::Composition
    }

    fn name(&self) -> &'static str {
        "CompositionAnalyzer"
    }

    fn measure(&self, signals: &ImageSignals) -> Vec<(f64, SubMeasurement)> {
        let saliency = match signals.salient_regions.as_deref() {
            Some(regions) => Self::saliency_concentration(regions),
            None => SubMeasurement::neutral(),
        };
        let balance = match (signals.left_brightness, signals.right_brightness) {
            (Some(left), Some(right)) => Self::balance(left, right),
            _ => SubMeasurement::neutral(),
        };
        let thirds = signals
            .primary_region()
            .map(Self::thirds_placement)
            .unwrap_or_else(SubMeasurement::neutral);

        vec![
            (SALIENCY_WEIGHT, saliency),
            (BALANCE_WEIGHT, balance),
            (THIRDS_WEIGHT, thirds),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NormalizedRect;

    fn region(cx: f64, cy: f64, confidence: f64) -> SalientRegion {
        SalientRegion::new(NormalizedRect::new(cx - 0.05, cy - 0.05, 0.1, 0.1), confidence)
    }

    #[test]
    fn subject_on_thirds_point_scores_full() {
        let signals = ImageSignals {
            salient_regions: Some(vec![region(1.0 / 3.0, 1.0 / 3.0, 0.9)]),
            left_brightness: Some(120.0),
            right_brightness: Some(125.0),
            ..ImageSignals::default()
        };
        let score = CompositionAnalyzer::new().analyze(&signals);
        assert!((score.score() - 1.0).abs() < 1e-12);
        assert_eq!(score.strengths().len(), 3);
        assert!(score.issues().is_empty());
    }

    #[test]
    fn centered_subject_is_flagged() {
        let measurement = CompositionAnalyzer::thirds_placement(&region(0.5, 0.5, 0.9));
        assert_eq!(measurement.score, 0.6);
        assert_eq!(measurement.issues.len(), 1);
    }

    #[test]
    fn competing_subjects_split_attention() {
        let regions = vec![region(0.2, 0.2, 0.5), region(0.8, 0.8, 0.5), region(0.5, 0.2, 0.5)];
        let measurement = CompositionAnalyzer::saliency_concentration(&regions);
        assert_eq!(measurement.score, 0.4);
        assert!(measurement.issues[0].contains("competing"));
    }

    #[test]
    fn missing_balance_signal_is_neutral_without_text() {
        let signals = ImageSignals {
            salient_regions: Some(vec![region(1.0 / 3.0, 2.0 / 3.0, 0.9)]),
            ..ImageSignals::default()
        };
        let score = CompositionAnalyzer::new().analyze(&signals);
        // 0.4 * 1.0 + 0.3 * 0.5 + 0.3 * 1.0
        assert!((score.score() - 0.85).abs() < 1e-12);
        assert!(!score.strengths().iter().any(|s| s.contains("balanced")));
    }

    #[test]
    fn lopsided_frame_is_an_issue() {
        let measurement = CompositionAnalyzer::balance(60.0, 180.0);
        assert_eq!(measurement.score, 0.4);
        assert_eq!(measurement.issues.len(), 1);
    }
}
