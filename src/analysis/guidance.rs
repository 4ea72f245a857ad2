//! Turns a category breakdown into the prose and edit descriptors of a
//! critique: summary, top improvements, edit guidance, practice advice.

use crate::types::{
    AdjustmentKind, Category, CategoryBreakdown, EditInstruction, EditSuggestion, Rating,
    SuggestionPriority, MAX_TOP_IMPROVEMENTS,
};

pub const MAX_IMPROVEMENTS: usize = MAX_TOP_IMPROVEMENTS;

/// Categories below this score are named as the next focus in summaries and
/// are eligible for edit suggestions.
pub const NEEDS_ATTENTION_BELOW: f64 = 0.7;

/// Weighted sum of category scores using the fixed category weights.
pub fn overall_score(categories: &CategoryBreakdown) -> f64 {
    categories
        .iter()
        .map(|(category, score)| score.score() * category.weight())
        .sum::<f64>()
        .clamp(0.0, 1.0)
}

/// Highest-scoring category; the earliest category wins ties.
pub fn strongest(categories: &CategoryBreakdown) -> (Category, f64) {
    categories
        .iter()
        .map(|(c, s)| (c, s.score()))
        .fold(None, |best: Option<(Category, f64)>, (c, s)| match best {
            Some((_, best_score)) if best_score >= s => best,
            _ => Some((c, s)),
        })
        .unwrap_or((Category::Composition, 0.0))
}

/// Lowest-scoring category; the earliest category wins ties.
pub fn weakest(categories: &CategoryBreakdown) -> (Category, f64) {
    categories
        .iter()
        .map(|(c, s)| (c, s.score()))
        .fold(None, |worst: Option<(Category, f64)>, (c, s)| match worst {
            Some((_, worst_score)) if worst_score <= s => worst,
            _ => Some((c, s)),
        })
        .unwrap_or((Category::Composition, 0.0))
}

pub fn summary(categories: &CategoryBreakdown, overall: f64) -> String {
    let opening = match Rating::from_score(overall) {
        Rating::Excellent => "An excellent photograph with strong fundamentals.",
        Rating::Good => "A good photograph with solid technique.",
        Rating::Fair => "A decent photograph with clear room to grow.",
        Rating::NeedsWork => "This photograph needs work in several areas.",
        Rating::Poor => "This photograph has significant technical issues.",
    };

    let (best, _) = strongest(categories);
    let mut summary = format!("{} Strongest area: {}.", opening, best);

    let (worst, worst_score) = weakest(categories);
    if worst_score < NEEDS_ATTENTION_BELOW {
        summary.push_str(&format!(" Focus next on {}.", worst));
    }
    summary
}

/// Every reported issue, ranked by `(1 - category score) * boost`, keeping
/// analyzer order among equal priorities. At most three are returned.
pub fn top_improvements(categories: &CategoryBreakdown) -> Vec<String> {
    let mut ranked: Vec<(f64, &String)> = categories
        .iter()
        .flat_map(|(category, score)| {
            let priority = (1.0 - score.score()) * category.improvement_boost();
            score.issues().iter().map(move |issue| (priority, issue))
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    ranked
        .into_iter()
        .take(MAX_IMPROVEMENTS)
        .map(|(_, issue)| issue.clone())
        .collect()
}

struct EditRule {
    category: Category,
    needle: &'static str,
    kind: AdjustmentKind,
    magnitude: f64,
    priority: SuggestionPriority,
    text: &'static str,
}

const EDIT_RULES: &[EditRule] = &[
    EditRule {
        category: Category::Light,
        needle: "underexposed",
        kind: AdjustmentKind::Exposure,
        magnitude: 0.5,
        priority: SuggestionPriority::High,
        text: "Raise exposure by about half a stop to brighten the scene.",
    },
    EditRule {
        category: Category::Light,
        needle: "overexposed",
        kind: AdjustmentKind::Exposure,
        magnitude: -0.5,
        priority: SuggestionPriority::High,
        text: "Lower exposure by about half a stop to recover brightness.",
    },
    EditRule {
        category: Category::Light,
        needle: "shadow",
        kind: AdjustmentKind::Shadows,
        magnitude: 0.3,
        priority: SuggestionPriority::Medium,
        text: "Lift the shadows to reveal detail in dark areas.",
    },
    EditRule {
        category: Category::Light,
        needle: "highlight",
        kind: AdjustmentKind::Highlights,
        magnitude: -0.3,
        priority: SuggestionPriority::Medium,
        text: "Pull back the highlights to recover bright detail.",
    },
    EditRule {
        category: Category::Light,
        needle: "low-contrast",
        kind: AdjustmentKind::Contrast,
        magnitude: 0.2,
        priority: SuggestionPriority::Medium,
        text: "Add contrast to give the tones more punch.",
    },
    EditRule {
        category: Category::Light,
        needle: "harsh contrast",
        kind: AdjustmentKind::Contrast,
        magnitude: -0.15,
        priority: SuggestionPriority::Low,
        text: "Soften contrast slightly to tame harsh transitions.",
    },
    EditRule {
        category: Category::Focus,
        needle: "soft",
        kind: AdjustmentKind::SharpenAmount,
        magnitude: 0.3,
        priority: SuggestionPriority::Medium,
        text: "Apply moderate sharpening to crisp up fine detail.",
    },
    EditRule {
        category: Category::Color,
        needle: "muted",
        kind: AdjustmentKind::Vibrance,
        magnitude: 0.25,
        priority: SuggestionPriority::Medium,
        text: "Boost vibrance to bring muted colors back to life.",
    },
    EditRule {
        category: Category::Color,
        needle: "oversaturated",
        kind: AdjustmentKind::Vibrance,
        magnitude: -0.2,
        priority: SuggestionPriority::Low,
        text: "Reduce vibrance to calm oversaturated colors.",
    },
    EditRule {
        category: Category::Background,
        needle: "background",
        kind: AdjustmentKind::VignetteAmount,
        magnitude: 0.25,
        priority: SuggestionPriority::Low,
        text: "Add a subtle vignette to draw the eye away from the background.",
    },
    EditRule {
        category: Category::Story,
        needle: "mood",
        kind: AdjustmentKind::Contrast,
        magnitude: 0.15,
        priority: SuggestionPriority::Low,
        text: "Add a touch of contrast to strengthen the mood.",
    },
];

/// Applies the fixed rule table; each rule fires at most once.
pub fn edit_guidance(categories: &CategoryBreakdown) -> Vec<EditSuggestion> {
    EDIT_RULES
        .iter()
        .filter(|rule| {
            let score = categories.get(rule.category);
            score.score() < NEEDS_ATTENTION_BELOW
                && score
                    .issues()
                    .iter()
                    .any(|issue| issue.to_lowercase().contains(rule.needle))
        })
        .map(|rule| EditSuggestion {
            category: rule.category,
            suggestion_text: rule.text.to_string(),
            priority: rule.priority,
            instruction: Some(EditInstruction::new(rule.kind, rule.magnitude)),
        })
        .collect()
}

pub fn practice_text(category: Category) -> &'static str {
    match category {
        Category::Composition => {
            "Shoot one subject ten different ways this week, placing it on each thirds intersection and trying both horizontal and vertical frames."
        }
        Category::Light => {
            "Photograph the same scene at three times of day and compare how the direction and quality of light change the mood."
        }
        Category::Focus => {
            "Practice single-point autofocus on a static subject, then try a faster shutter speed to rule out camera shake."
        }
        Category::Color => {
            "Set a custom white balance under mixed lighting and build a small series around one dominant color."
        }
        Category::Background => {
            "Before each shot, scan the edges of the frame and move your feet until the background is simple and uncluttered."
        }
        Category::Story => {
            "Create a three-photo sequence that shows a beginning, middle and end of a small moment."
        }
    }
}

/// Practice advice for the weakest category, or `None` when every category
/// is already excellent.
pub fn practice_recommendation(categories: &CategoryBreakdown) -> Option<String> {
    let (worst, worst_score) = weakest(categories);
    if worst_score >= 0.9 {
        return None;
    }
    Some(practice_text(worst).to_string())
}
