mod category;
mod category_score;
mod critique_result;
mod edit_suggestion;
mod image_signals;
mod rating;

pub use category::{Category, PerCategory};
pub use category_score::{CategoryScore, CategoryScoreRecord};
pub use critique_result::{
    CategoryBreakdown, CritiqueResult, CritiqueResultRecord, LetterGrade, MAX_TOP_IMPROVEMENTS,
};
pub use edit_suggestion::{AdjustmentKind, EditInstruction, EditSuggestion, SuggestionPriority};
pub use image_signals::{ChannelMeans, HistogramStats, ImageSignals, NormalizedRect, SalientRegion};
pub use rating::Rating;
