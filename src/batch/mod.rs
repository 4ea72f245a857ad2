pub mod analyzer;
pub mod report;
pub mod statistics;

pub use analyzer::{BatchConsistencyAnalyzer, BatchPhoto};
pub use report::{
    BatchAdjustment, BatchCorrection, BatchMetric, BatchRecommendation, ConsistencyMetrics,
    ConsistencyReport, CorrectionScope, MetricScore, OutlierPhoto,
};
