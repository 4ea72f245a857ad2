use serde::{Deserialize, Serialize};

/// Mean channel values on the 0-255 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelMeans {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl ChannelMeans {
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    /// Positive = warm, negative = cool.
    pub fn warmth(&self) -> f64 {
        self.red - self.blue
    }

    /// Positive = greenish, negative = magenta.
    pub fn tint(&self) -> f64 {
        self.green - (self.red + self.blue) / 2.0
    }
}

/// Rectangle in normalized image coordinates (0..1 on both axes).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NormalizedRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalientRegion {
    pub bounds: NormalizedRect,
    pub confidence: f64,
}

impl SalientRegion {
    pub fn new(bounds: NormalizedRect, confidence: f64) -> Self {
        Self { bounds, confidence }
    }
}

/// Raw per-image measurements supplied by the signal source. Every field is
/// optional; a missing field is a degraded signal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageSignals {
    pub average_brightness: Option<f64>,
    pub left_brightness: Option<f64>,
    pub right_brightness: Option<f64>,
    pub channel_means: Option<ChannelMeans>,
    pub saturation: Option<f64>,
    pub salient_regions: Option<Vec<SalientRegion>>,
    pub segment_count: Option<u32>,
    pub edge_density: Option<f64>,
    pub sharpness: Option<f64>,
    pub luminance_histogram: Option<Vec<u64>>,
}

impl ImageSignals {
    /// Signals for an image whose source could not be reached at all.
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn is_unavailable(&self) -> bool {
        *self == Self::default()
    }

    /// Most confident salient region; the first one wins ties.
    pub fn primary_region(&self) -> Option<&SalientRegion> {
        self.salient_regions.as_ref()?.iter().fold(None, |best, region| match best {
            Some(current) if current.confidence >= region.confidence => Some(current),
            _ => Some(region),
        })
    }

    pub fn histogram_stats(&self) -> Option<HistogramStats> {
        self.luminance_histogram
            .as_deref()
            .and_then(HistogramStats::from_bins)
    }
}

/// Exposure statistics read off a luminance histogram, in 0-255 units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramStats {
    pub mean: f64,
    pub p05: f64,
    pub p95: f64,
    pub shadow_clip_pct: f64,
    pub highlight_clip_pct: f64,
}

impl HistogramStats {
    /// Returns `None` for an empty histogram or one with no counts.
    pub fn from_bins(bins: &[u64]) -> Option<Self> {
        let n = bins.len();
        let total: u64 = bins.iter().sum();
        if n == 0 || total == 0 {
            return None;
        }

        let bin_width = 256.0 / n as f64;
        let value_of = |i: usize| i as f64 * bin_width;

        let percentile = |frac: f64| -> f64 {
            let target = (frac * total as f64).floor() as u64;
            let mut running = 0u64;
            for (i, count) in bins.iter().enumerate() {
                running += count;
                if running >= target {
                    return value_of(i);
                }
            }
            255.0
        };

        let mean = bins
            .iter()
            .enumerate()
            .map(|(i, &c)| (value_of(i) + (bin_width - 1.0) / 2.0) * c as f64)
            .sum::<f64>()
            / total as f64;

        // bins overlapping values 0..=2 and 253..=255
        let shadow_bins = ((3.0 / bin_width).ceil() as usize).clamp(1, n);
        let highlight_start = ((253.0 / bin_width).floor() as usize).min(n - 1);
        let shadow: u64 = bins[..shadow_bins].iter().sum();
        let highlight: u64 = bins[highlight_start..].iter().sum();

        Some(Self {
            mean,
            p05: percentile(0.05),
            p95: percentile(0.95),
            shadow_clip_pct: shadow as f64 / total as f64 * 100.0,
            highlight_clip_pct: highlight as f64 / total as f64 * 100.0,
        })
    }

    pub fn dynamic_range(&self) -> f64 {
        self.p95 - self.p05
    }
}
