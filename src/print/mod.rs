pub mod readiness;

pub use readiness::{assess, PrintQuality, PrintReadiness, PrintSize};
