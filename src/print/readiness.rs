use crate::error::PrintError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pixel densities a print-size table is computed for.
pub const STANDARD_PPI: [u32; 4] = [300, 240, 200, 150];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrintSize {
    pub width_in: f64,
    pub height_in: f64,
}

impl PrintSize {
    pub fn new(width_in: f64, height_in: f64) -> Self {
        Self { width_in, height_in }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PrintQuality {
    Low,
    Fair,
    Good,
    VeryGood,
    Excellent,
}

impl PrintQuality {
    pub fn for_ppi(ppi: f64) -> Self {
        if ppi >= 300.0 {
            PrintQuality::Excellent
        } else if ppi >= 240.0 {
            PrintQuality::VeryGood
        } else if ppi >= 200.0 {
            PrintQuality::Good
        } else if ppi >= 150.0 {
            PrintQuality::Fair
        } else {
            PrintQuality::Low
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PrintQuality::Excellent => "Excellent for high-quality prints (300+ PPI).",
            PrintQuality::VeryGood => "Very good print quality (240+ PPI).",
            PrintQuality::Good => "Good print quality for most uses (200+ PPI).",
            PrintQuality::Fair => "Fair quality; best viewed from a distance (150+ PPI).",
            PrintQuality::Low => "Low PPI; the print may look soft or pixelated.",
        }
    }
}

impl fmt::Display for PrintQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaxPrintSize {
    pub ppi: u32,
    pub width_in: f64,
    pub height_in: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectivePpi {
    pub width: f64,
    pub height: f64,
    /// The limiting axis.
    pub min: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetAssessment {
    pub size: PrintSize,
    pub effective_ppi: EffectivePpi,
    pub quality: PrintQuality,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintReadiness {
    pub width_px: u32,
    pub height_px: u32,
    pub max_sizes: Vec<MaxPrintSize>,
    pub target: Option<TargetAssessment>,
}

pub fn max_print_size(width_px: u32, height_px: u32, ppi: u32) -> MaxPrintSize {
    MaxPrintSize {
        ppi,
        width_in: width_px as f64 / ppi as f64,
        height_in: height_px as f64 / ppi as f64,
    }
}

pub fn effective_ppi(width_px: u32, height_px: u32, size: PrintSize) -> Result<EffectivePpi, PrintError> {
    if !(size.width_in > 0.0 && size.height_in > 0.0) {
        return Err(PrintError::InvalidPrintSize(size.width_in, size.height_in));
    }
    let width = width_px as f64 / size.width_in;
    let height = height_px as f64 / size.height_in;
    Ok(EffectivePpi {
        width,
        height,
        min: width.min(height),
    })
}

/// Print-size table for an image, plus a quality verdict for `target`.
pub fn assess(width_px: u32, height_px: u32, target: Option<PrintSize>) -> Result<PrintReadiness, PrintError> {
    if width_px == 0 || height_px == 0 {
        return Err(PrintError::InvalidDimensions(width_px, height_px));
    }

    let target = target
        .map(|size| {
            effective_ppi(width_px, height_px, size).map(|ppi| TargetAssessment {
                size,
                effective_ppi: ppi,
                quality: PrintQuality::for_ppi(ppi.min),
            })
        })
        .transpose()?;

    Ok(PrintReadiness {
        width_px,
        height_px,
        max_sizes: STANDARD_PPI
            .iter()
            .map(|&ppi| max_print_size(width_px, height_px, ppi))
            .collect(),
        target,
    })
}
