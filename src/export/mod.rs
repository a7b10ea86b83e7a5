//! Metric export for downstream analysis and plotting.

pub mod metrics_csv;

pub use metrics_csv::{MetricsExporter, VariantSummary};
