use super::category::{Category, PerCategory};
use super::category_score::{CategoryScore, CategoryScoreRecord};
use super::edit_suggestion::EditSuggestion;
use super::rating::Rating;
use crate::error::StateError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub type CategoryBreakdown = PerCategory<CategoryScore>;

pub const MAX_TOP_IMPROVEMENTS: usize = 3;

/// Letter grade on the 0-100 scale, for compact display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    pub fn from_score(score: f64) -> Self {
        let percent = score * 100.0;
        if percent >= 93.0 {
            LetterGrade::A
        } else if percent >= 85.0 {
            LetterGrade::B
        } else if percent >= 75.0 {
            LetterGrade::C
        } else if percent >= 65.0 {
            LetterGrade::D
        } else {
            LetterGrade::F
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Serialized shape of a critique, validated on the way in.
#[derive(Debug, Deserialize)]
pub struct CritiqueResultRecord {
    id: Uuid,
    photo_id: String,
    timestamp: DateTime<Utc>,
    overall_score: f64,
    #[serde(default)]
    overall_summary: String,
    #[serde(default)]
    top_improvements: Vec<String>,
    categories: PerCategory<CategoryScoreRecord>,
    #[serde(default)]
    edit_guidance: Vec<EditSuggestion>,
    #[serde(default)]
    practice_recommendation: Option<String>,
}

/// Outcome of one critique run. A new analysis always produces a new result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CritiqueResultRecord")]
pub struct CritiqueResult {
    id: Uuid,
    photo_id: String,
    timestamp: DateTime<Utc>,
    overall_score: f64,
    overall_summary: String,
    top_improvements: Vec<String>,
    categories: CategoryBreakdown,
    edit_guidance: Vec<EditSuggestion>,
    practice_recommendation: Option<String>,
}

impl CritiqueResult {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        photo_id: impl Into<String>,
        timestamp: DateTime<Utc>,
        overall_score: f64,
        overall_summary: String,
        top_improvements: Vec<String>,
        categories: CategoryBreakdown,
        edit_guidance: Vec<EditSuggestion>,
        practice_recommendation: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            photo_id: photo_id.into(),
            timestamp,
            overall_score,
            overall_summary,
            top_improvements,
            categories,
            edit_guidance,
            practice_recommendation,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn photo_id(&self) -> &str {
        &self.photo_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn overall_score(&self) -> f64 {
        self.overall_score
    }

    pub fn overall_rating(&self) -> Rating {
        Rating::from_score(self.overall_score)
    }

    pub fn letter_grade(&self) -> LetterGrade {
        LetterGrade::from_score(self.overall_score)
    }

    pub fn overall_summary(&self) -> &str {
        &self.overall_summary
    }

    pub fn top_improvements(&self) -> &[String] {
        &self.top_improvements
    }

    pub fn categories(&self) -> &CategoryBreakdown {
        &self.categories
    }

    pub fn category(&self, category: Category) -> &CategoryScore {
        self.categories.get(category)
    }

    pub fn edit_guidance(&self) -> &[EditSuggestion] {
        &self.edit_guidance
    }

    pub fn practice_recommendation(&self) -> Option<&str> {
        self.practice_recommendation.as_deref()
    }

    pub fn to_json(&self) -> Result<String, StateError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restores a critique, reporting malformed state as a typed error.
    pub fn from_json(json: &str) -> Result<Self, StateError> {
        let record: CritiqueResultRecord = serde_json::from_str(json)?;
        Self::try_from(record)
    }
}

impl TryFrom<CritiqueResultRecord> for CritiqueResult {
    type Error = StateError;

    fn try_from(record: CritiqueResultRecord) -> Result<Self, Self::Error> {
        if !(0.0..=1.0).contains(&record.overall_score) {
            return Err(StateError::ScoreOutOfRange {
                category: "overall".to_string(),
                score: record.overall_score,
            });
        }

        if record.top_improvements.len() > MAX_TOP_IMPROVEMENTS {
            return Err(StateError::TooManyImprovements(record.top_improvements.len()));
        }

        let categories = record
            .categories
            .try_map(|category, score| score.validate(category))?;

        Ok(Self {
            id: record.id,
            photo_id: record.photo_id,
            timestamp: record.timestamp,
            overall_score: record.overall_score,
            overall_summary: record.overall_summary,
            top_improvements: record.top_improvements,
            categories,
            edit_guidance: record.edit_guidance,
            practice_recommendation: record.practice_recommendation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::edit_suggestion::{AdjustmentKind, EditInstruction, SuggestionPriority};

    fn sample() -> CritiqueResult {
        let categories = PerCategory::from_fn(|c| {
            CategoryScore::new(
                0.1 + c.weight() * 2.0 / 3.0,
                format!("{} notes", c),
                vec![format!("{} issue", c)],
                vec![],
            )
        });
        CritiqueResult::new(
            "IMG_0042",
            Utc::now(),
            0.7271234567891234,
            "A decent photograph.".to_string(),
            vec!["Light issue".to_string()],
            categories,
            vec![EditSuggestion {
                category: Category::Light,
                suggestion_text: "Lift shadows".to_string(),
                priority: SuggestionPriority::Medium,
                instruction: Some(EditInstruction::new(AdjustmentKind::Shadows, 0.3)),
            }],
            Some("Practice with window light.".to_string()),
        )
    }

    #[test]
    fn json_round_trip_is_exact() {
        let critique = sample();
        let json = critique.to_json().unwrap();
        let restored = CritiqueResult::from_json(&json).unwrap();
        assert_eq!(restored, critique);
        assert_eq!(
            restored.overall_score().to_bits(),
            critique.overall_score().to_bits()
        );
    }

    #[test]
    fn malformed_rating_is_a_state_error() {
        let json = sample().to_json().unwrap().replace("\"Poor\"", "\"Dreadful\"");
        assert!(matches!(
            CritiqueResult::from_json(&json),
            Err(StateError::Decode(_))
        ));
    }

    #[test]
    fn rating_must_match_persisted_score() {
        let mut value: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        value["categories"]["focus"]["score"] = serde_json::json!(0.95);
        value["categories"]["focus"]["rating"] = serde_json::json!("Poor");

        assert!(matches!(
            CritiqueResult::from_json(&value.to_string()),
            Err(StateError::RatingMismatch { expected: Rating::Excellent, .. })
        ));
        // plain serde goes through the same checks
        assert!(serde_json::from_value::<CritiqueResult>(value).is_err());
    }

    #[test]
    fn overall_and_improvements_are_bounded() {
        let mut value: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        value["overall_score"] = serde_json::json!(1.3);
        assert!(matches!(
            CritiqueResult::from_json(&value.to_string()),
            Err(StateError::ScoreOutOfRange { score, .. }) if score == 1.3
        ));

        let mut value: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        value["top_improvements"] = serde_json::json!(["a", "b", "c", "d"]);
        assert!(matches!(
            CritiqueResult::from_json(&value.to_string()),
            Err(StateError::TooManyImprovements(4))
        ));
    }

    #[test]
    fn letter_grades_follow_percent_bands() {
        assert_eq!(LetterGrade::from_score(0.93), LetterGrade::A);
        assert_eq!(LetterGrade::from_score(0.86), LetterGrade::B);
        assert_eq!(LetterGrade::from_score(0.75), LetterGrade::C);
        assert_eq!(LetterGrade::from_score(0.65), LetterGrade::D);
        assert_eq!(LetterGrade::from_score(0.64), LetterGrade::F);
    }
}
