use super::category::Category;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SuggestionPriority {
    High,
    Medium,
    Low,
}

/// Adjustment tokens understood by the edit engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdjustmentKind {
    Exposure,
    Shadows,
    Highlights,
    Contrast,
    Vibrance,
    SharpenAmount,
    VignetteAmount,
}

/// Opaque `(type, magnitude)` descriptor handed to the edit engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EditInstruction {
    pub kind: AdjustmentKind,
    pub magnitude: f64,
}

impl EditInstruction {
    pub fn new(kind: AdjustmentKind, magnitude: f64) -> Self {
        Self { kind, magnitude }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditSuggestion {
    pub category: Category,
    pub suggestion_text: String,
    pub priority: SuggestionPriority,
    pub instruction: Option<EditInstruction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjustment_tokens_match_edit_engine_names() {
        let json = serde_json::to_string(&AdjustmentKind::SharpenAmount).unwrap();
        assert_eq!(json, "\"sharpenAmount\"");
        let json = serde_json::to_string(&AdjustmentKind::VignetteAmount).unwrap();
        assert_eq!(json, "\"vignetteAmount\"");
    }
}
