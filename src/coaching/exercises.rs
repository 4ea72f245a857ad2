use crate::types::Category;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn for_score(score: f64) -> Self {
        if score < 0.6 {
            Difficulty::Beginner
        } else if score < 0.8 {
            Difficulty::Intermediate
        } else {
            Difficulty::Advanced
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub category: Category,
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub duration_minutes: u32,
}

struct ExerciseTemplate {
    id: &'static str,
    category: Category,
    difficulty: Difficulty,
    title: &'static str,
    description: &'static str,
    duration_minutes: u32,
}

impl ExerciseTemplate {
    fn to_exercise(&self) -> Exercise {
        Exercise {
            id: self.id.to_string(),
            category: self.category,
            title: self.title.to_string(),
            description: self.description.to_string(),
            difficulty: self.difficulty,
            duration_minutes: self.duration_minutes,
        }
    }
}

macro_rules! exercise {
    ($id:literal, $category:ident, $difficulty:ident, $minutes:literal, $title:literal, $description:literal) => {
        ExerciseTemplate {
            id: $id,
            category: Category::$category,
            difficulty: Difficulty::$difficulty,
            title: $title,
            description: $description,
            duration_minutes: $minutes,
        }
    };
}

const LIBRARY: &[ExerciseTemplate] = &[
    exercise!("composition-thirds-walk", Composition, Beginner, 30,
        "Thirds walk",
        "Take 20 photos placing the subject on a different thirds intersection each time."),
    exercise!("composition-two-frames", Composition, Beginner, 20,
        "Two frames",
        "Shoot every subject once horizontally and once vertically, then compare."),
    exercise!("composition-leading-lines", Composition, Intermediate, 45,
        "Leading lines",
        "Find five scenes where lines lead the eye to the subject and shoot each from three heights."),
    exercise!("composition-negative-space", Composition, Intermediate, 40,
        "Negative space",
        "Make a series where the subject fills less than a tenth of the frame."),
    exercise!("composition-layers", Composition, Advanced, 60,
        "Foreground, middle, back",
        "Build frames with a distinct element in each of three depth layers."),
    exercise!("composition-break-rules", Composition, Advanced, 45,
        "Deliberate centering",
        "Shoot symmetric scenes dead-center and justify each choice in a note."),
    exercise!("light-golden-hour", Light, Beginner, 40,
        "Golden hour",
        "Photograph one subject in the hour before sunset and compare with midday."),
    exercise!("light-exposure-bracket", Light, Beginner, 25,
        "Exposure bracket",
        "Bracket five scenes at -1, 0 and +1 stops and pick the best of each."),
    exercise!("light-window-portrait", Light, Intermediate, 45,
        "Window light",
        "Shoot a portrait by a single window, turning the subject through 180 degrees."),
    exercise!("light-silhouette", Light, Intermediate, 30,
        "Silhouettes",
        "Expose for a bright background to render the subject as a clean silhouette."),
    exercise!("light-high-key-low-key", Light, Advanced, 60,
        "High key and low key",
        "Produce one high-key and one low-key image of the same subject."),
    exercise!("light-hard-shadows", Light, Advanced, 50,
        "Hard shadows",
        "Use midday sun to build a composition out of shadow shapes alone."),
    exercise!("focus-single-point", Focus, Beginner, 25,
        "Single-point focus",
        "Switch to single-point autofocus and place the point on the eye in ten portraits."),
    exercise!("focus-steady-hands", Focus, Beginner, 20,
        "Steady hands",
        "Find the slowest shutter speed you can hand-hold sharply at your usual focal length."),
    exercise!("focus-shallow-depth", Focus, Intermediate, 40,
        "Shallow depth",
        "Shoot wide open and keep the focal plane exactly on the subject's nearest eye."),
    exercise!("focus-moving-subject", Focus, Intermediate, 45,
        "Moving subjects",
        "Use continuous autofocus to track cyclists or runners across the frame."),
    exercise!("focus-manual-macro", Focus, Advanced, 60,
        "Manual macro",
        "Focus manually on small subjects by rocking the camera instead of the ring."),
    exercise!("focus-stacking", Focus, Advanced, 60,
        "Focus stacking",
        "Capture a five-frame focus stack of a still life and blend it."),
    exercise!("color-white-balance", Color, Beginner, 20,
        "White balance presets",
        "Shoot one scene with every white balance preset and note how each shifts the mood."),
    exercise!("color-single-hue", Color, Beginner, 30,
        "One color",
        "Find and photograph ten subjects that share a single dominant hue."),
    exercise!("color-complementary", Color, Intermediate, 40,
        "Complementary pairs",
        "Build five frames around complementary color pairs."),
    exercise!("color-mixed-light", Color, Intermediate, 45,
        "Mixed light",
        "Set a custom white balance in a scene lit by both daylight and tungsten."),
    exercise!("color-muted-palette", Color, Advanced, 50,
        "Muted palette",
        "Create a cohesive series using only desaturated, low-contrast color."),
    exercise!("color-grading", Color, Advanced, 60,
        "Color grading",
        "Grade one set of photos to two distinct looks and keep skin tones natural."),
    exercise!("background-scan-edges", Background, Beginner, 20,
        "Scan the edges",
        "Before every shot, check all four edges of the frame for distractions."),
    exercise!("background-step-closer", Background, Beginner, 25,
        "Step closer",
        "Fill more of the frame with the subject to crowd out the background."),
    exercise!("background-separation", Background, Intermediate, 40,
        "Subject separation",
        "Move the subject away from the background and shoot wide open to blur it."),
    exercise!("background-clean-wall", Background, Intermediate, 30,
        "Clean backdrop",
        "Find three plain backdrops in your neighborhood and shoot a portrait against each."),
    exercise!("background-context", Background, Advanced, 50,
        "Environmental context",
        "Make environmental portraits where the background tells who the subject is."),
    exercise!("background-compression", Background, Advanced, 45,
        "Lens compression",
        "Use a long focal length to compress and simplify a busy background."),
    exercise!("story-three-shots", Story, Beginner, 30,
        "Three-shot story",
        "Tell a small event in three photos: setting, action, detail."),
    exercise!("story-one-subject", Story, Beginner, 25,
        "One clear subject",
        "Shoot ten frames where a viewer can name the subject in one word."),
    exercise!("story-decisive-moment", Story, Intermediate, 45,
        "Decisive moment",
        "Wait at one spot for the moment when action and composition line up."),
    exercise!("story-details", Story, Intermediate, 35,
        "Telling details",
        "Photograph a person only through their hands, tools and belongings."),
    exercise!("story-photo-essay", Story, Advanced, 90,
        "Photo essay",
        "Plan and shoot a ten-image essay with an opening, middle and closing image."),
    exercise!("story-juxtaposition", Story, Advanced, 50,
        "Juxtaposition",
        "Find scenes where two contrasting elements share the frame."),
];

/// Library exercises for `category` suited to `difficulty`. Exact matches
/// come first; intermediate exercises fill in for other levels.
pub fn exercises_for(category: Category, difficulty: Difficulty, limit: usize) -> Vec<Exercise> {
    let in_category = || LIBRARY.iter().filter(move |t| t.category == category);

    let exact = in_category().filter(|t| t.difficulty == difficulty);
    let wildcard = in_category()
        .filter(|t| difficulty != Difficulty::Intermediate && t.difficulty == Difficulty::Intermediate);

    exact
        .chain(wildcard)
        .take(limit)
        .map(ExerciseTemplate::to_exercise)
        .collect()
}

pub fn find_exercise(id: &str) -> Option<Exercise> {
    LIBRARY.iter().find(|t| t.id == id).map(ExerciseTemplate::to_exercise)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_bands() {
        assert_eq!(Difficulty::for_score(0.59), Difficulty::Beginner);
        assert_eq!(Difficulty::for_score(0.6), Difficulty::Intermediate);
        assert_eq!(Difficulty::for_score(0.8), Difficulty::Advanced);
    }

    #[test]
    fn beginners_get_intermediate_fill() {
        let picked = exercises_for(Category::Light, Difficulty::Beginner, 3);
        let levels: Vec<_> = picked.iter().map(|e| e.difficulty).collect();
        assert_eq!(
            levels,
            vec![Difficulty::Beginner, Difficulty::Beginner, Difficulty::Intermediate]
        );
        assert!(picked.iter().all(|e| e.category == Category::Light));
    }

    #[test]
    fn intermediate_stays_intermediate() {
        let picked = exercises_for(Category::Story, Difficulty::Intermediate, 3);
        assert_eq!(picked.len(), 2);
        assert!(picked.iter().all(|e| e.difficulty == Difficulty::Intermediate));
    }

    #[test]
    fn every_category_has_every_level() {
        for category in Category::ALL {
            for difficulty in [Difficulty::Beginner, Difficulty::Intermediate, Difficulty::Advanced] {
                assert!(!exercises_for(category, difficulty, 1).is_empty());
            }
        }
        assert!(find_exercise("focus-stacking").is_some());
    }
}
