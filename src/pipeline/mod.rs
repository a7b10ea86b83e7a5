//! Training, baseline, and experiment pipelines.

pub mod baseline;
pub mod experiment;
pub mod observers;
pub mod training;

pub use baseline::{BaselineConfig, BaselinePipeline};
pub use experiment::{
    ExperimentConfig, ExperimentReport, ExperimentRunner, VariantCurve, VariantSpec,
    standard_variants,
};
pub use observers::{MetricsObserver, ProgressObserver, RunMetrics, WindowedMeanObserver};
pub use training::{TrainingConfig, TrainingPipeline};
