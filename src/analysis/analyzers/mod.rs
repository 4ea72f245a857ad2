mod background;
mod color;
mod composition;
mod focus;
mod light;
mod story;

pub use background::BackgroundAnalyzer;
pub use color::ColorAnalyzer;
pub use composition::CompositionAnalyzer;
pub use focus::{detail_level, sharpness_curve, FocusAnalyzer};
pub use light::LightAnalyzer;
pub use story::StoryAnalyzer;
