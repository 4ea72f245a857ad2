use super::category::Category;
use super::rating::Rating;
use crate::error::StateError;
use serde::{Deserialize, Serialize};

/// Score assigned by one category analyzer. Immutable once produced.
///
/// Only serialized directly; loading goes through [`CategoryScoreRecord`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryScore {
    score: f64,
    rating: Rating,
    notes: String,
    issues: Vec<String>,
    strengths: Vec<String>,
}

impl CategoryScore {
    pub const NEUTRAL: f64 = 0.5;

    /// Clamps `score` into [0, 1] and derives the rating from it.
    pub fn new(score: f64, notes: String, issues: Vec<String>, strengths: Vec<String>) -> Self {
        let score = if score.is_nan() {
            Self::NEUTRAL
        } else {
            score.clamp(0.0, 1.0)
        };
        Self {
            score,
            rating: Rating::from_score(score),
            notes,
            issues,
            strengths,
        }
    }

    /// Score used when no signal could be measured for the image.
    pub fn neutral(notes: impl Into<String>) -> Self {
        Self::new(Self::NEUTRAL, notes.into(), Vec::new(), Vec::new())
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn issues(&self) -> &[String] {
        &self.issues
    }

    pub fn strengths(&self) -> &[String] {
        &self.strengths
    }
}

/// Serialized shape of a [`CategoryScore`], checked before it is trusted.
#[derive(Debug, Deserialize)]
pub struct CategoryScoreRecord {
    score: f64,
    rating: Rating,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    issues: Vec<String>,
    #[serde(default)]
    strengths: Vec<String>,
}

impl CategoryScoreRecord {
    /// Rejects a score outside [0, 1] or a rating the score would not produce.
    pub fn validate(self, category: Category) -> Result<CategoryScore, StateError> {
        if !(0.0..=1.0).contains(&self.score) {
            return Err(StateError::ScoreOutOfRange {
                category: category.to_string(),
                score: self.score,
            });
        }

        let expected = Rating::from_score(self.score);
        if self.rating != expected {
            return Err(StateError::RatingMismatch {
                category: category.to_string(),
                rating: self.rating,
                expected,
            });
        }

        Ok(CategoryScore {
            score: self.score,
            rating: self.rating,
            notes: self.notes,
            issues: self.issues,
            strengths: self.strengths,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_and_derives_rating() {
        let high = CategoryScore::new(1.4, String::new(), vec![], vec![]);
        assert_eq!(high.score(), 1.0);
        assert_eq!(high.rating(), Rating::Excellent);

        let low = CategoryScore::new(-0.2, String::new(), vec![], vec![]);
        assert_eq!(low.score(), 0.0);
        assert_eq!(low.rating(), Rating::Poor);
    }

    fn record(json: &str) -> CategoryScoreRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn record_must_agree_with_its_score() {
        let score = record(r#"{"score": 0.95, "rating": "Excellent", "notes": "crisp"}"#)
            .validate(Category::Focus)
            .unwrap();
        assert_eq!(score.rating(), Rating::Excellent);
        assert_eq!(score.notes(), "crisp");

        match record(r#"{"score": 0.95, "rating": "Poor"}"#).validate(Category::Focus) {
            Err(StateError::RatingMismatch { category, rating, expected }) => {
                assert_eq!(category, "Focus");
                assert_eq!(rating, Rating::Poor);
                assert_eq!(expected, Rating::Excellent);
            }
            other => panic!("expected rating mismatch, got {:?}", other),
        }

        assert!(matches!(
            record(r#"{"score": 1.2, "rating": "Excellent"}"#).validate(Category::Light),
            Err(StateError::ScoreOutOfRange { .. })
        ));
    }

    #[test]
    fn neutral_has_no_text() {
        let neutral = CategoryScore::neutral("unavailable");
        assert_eq!(neutral.score(), 0.5);
        assert_eq!(neutral.rating(), Rating::NeedsWork);
        assert!(neutral.issues().is_empty());
        assert!(neutral.strengths().is_empty());
    }
}
