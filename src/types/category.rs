use serde::{Deserialize, Serialize};
use std::fmt;

/// The six fixed critique dimensions, in their canonical iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Composition,
    Light,
    Focus,
    Color,
    Background,
    Story,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Composition,
        Category::Light,
        Category::Focus,
        Category::Color,
        Category::Background,
        Category::Story,
    ];

    /// Contribution of this category to the overall critique score.
    pub fn weight(self) -> f64 {
        match self {
            Category::Composition => 0.25,
            Category::Light => 0.25,
            Category::Focus => 0.15,
            Category::Color => 0.15,
            Category::Background => 0.10,
            Category::Story => 0.10,
        }
    }

    /// Composition and light issues are boosted when ranking improvements.
    pub fn improvement_boost(self) -> f64 {
        match self {
            Category::Composition | Category::Light => 1.5,
            _ => 1.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Composition => "Composition",
            Category::Light => "Light",
            Category::Focus => "Focus",
            Category::Color => "Color",
            Category::Background => "Background",
            Category::Story => "Story",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per category, held as plain fields so that every category is
/// always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerCategory<T> {
    pub composition: T,
    pub light: T,
    pub focus: T,
    pub color: T,
    pub background: T,
    pub story: T,
}

impl<T> PerCategory<T> {
    /// Builds every slot by calling `f` in canonical category order.
    pub fn from_fn(mut f: impl FnMut(Category) -> T) -> Self {
        Self {
            composition: f(Category::Composition),
            light: f(Category::Light),
            focus: f(Category::Focus),
            color: f(Category::Color),
            background: f(Category::Background),
            story: f(Category::Story),
        }
    }

    pub fn get(&self, category: Category) -> &T {
        match category {
            Category::Composition => &self.composition,
            Category::Light => &self.light,
            Category::Focus => &self.focus,
            Category::Color => &self.color,
            Category::Background => &self.background,
            Category::Story => &self.story,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut T {
        match category {
            Category::Composition => &mut self.composition,
            Category::Light => &mut self.light,
            Category::Focus => &mut self.focus,
            Category::Color => &mut self.color,
            Category::Background => &mut self.background,
            Category::Story => &mut self.story,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(Category, &T) -> U) -> PerCategory<U> {
        PerCategory::from_fn(|c| f(c, self.get(c)))
    }

    /// Consumes the set, stopping at the first slot `f` rejects.
    pub fn try_map<U, E>(
        self,
        mut f: impl FnMut(Category, T) -> Result<U, E>,
    ) -> Result<PerCategory<U>, E> {
        Ok(PerCategory {
            composition: f(Category::Composition, self.composition)?,
            light: f(Category::Light, self.light)?,
            focus: f(Category::Focus, self.focus)?,
            color: f(Category::Color, self.color)?,
            background: f(Category::Background, self.background)?,
            story: f(Category::Story, self.story)?,
        })
    }
}

impl<T: Default> Default for PerCategory<T> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}
