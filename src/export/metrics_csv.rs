//! CSV and JSON export of experiment metrics.
//!
//! For each variant the exporter writes a raw per-episode CSV (with the
//! advantage over the random baseline), a smoothed CSV for plotting, and a
//! combined JSON summary across variants.

use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    error::Error,
    pipeline::experiment::ExperimentReport,
    q_learning::Hyperparameters,
    utils::{mean, rolling_mean},
};

/// Per-variant entry in `summary.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantSummary {
    pub variant: String,
    pub hyperparameters: Hyperparameters,
    pub episodes: usize,
    pub mean_reward: f64,
    pub mean_advantage: f64,
    pub final_reward: f64,
    pub best_reward: f64,
    pub baseline_mean: f64,
}

/// Writes experiment metrics into a target directory.
#[derive(Debug, Clone)]
pub struct MetricsExporter {
    out_dir: PathBuf,
    /// Rolling-mean window for the smoothed series.
    smoothing_window: usize,
}

impl MetricsExporter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            smoothing_window: 50,
        }
    }

    pub fn with_smoothing_window(mut self, window: usize) -> Self {
        self.smoothing_window = window.max(1);
        self
    }

    /// Export every variant's CSVs plus the combined summary.
    ///
    /// Returns the written summaries in variant order.
    pub fn export(&self, report: &ExperimentReport) -> Result<Vec<VariantSummary>> {
        std::fs::create_dir_all(&self.out_dir).map_err(|source| Error::Io {
            operation: format!("create export directory {}", self.out_dir.display()),
            source,
        })?;

        let mut summaries = Vec::with_capacity(report.curves.len());
        for curve in &report.curves {
            self.write_episode_csv(&curve.name, &curve.returns, report.baseline_mean)?;
            self.write_smoothed_csv(&curve.name, &curve.returns)?;

            let mean_reward = mean(&curve.returns);
            summaries.push(VariantSummary {
                variant: curve.name.clone(),
                hyperparameters: curve.hyperparameters,
                episodes: curve.returns.len(),
                mean_reward,
                mean_advantage: mean_reward - report.baseline_mean,
                final_reward: curve.returns.last().copied().unwrap_or(0.0),
                best_reward: curve
                    .returns
                    .iter()
                    .copied()
                    .fold(f64::NEG_INFINITY, f64::max),
                baseline_mean: report.baseline_mean,
            });
        }

        self.write_summary(&summaries)?;
        Ok(summaries)
    }

    /// `<name>_episodes.csv`: episode (from 1), reward, advantage.
    fn write_episode_csv(&self, name: &str, returns: &[f64], baseline_mean: f64) -> Result<()> {
        let path = self.out_dir.join(format!("{name}_episodes.csv"));
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(["episode", "reward", "advantage"])?;
        for (i, reward) in returns.iter().enumerate() {
            writer.write_record([
                (i + 1).to_string(),
                reward.to_string(),
                (reward - baseline_mean).to_string(),
            ])?;
        }
        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush {}", path.display()),
            source,
        })?;
        Ok(())
    }

    /// `<name>_smooth.csv`: episode (from 1), reward, rolling-mean reward.
    fn write_smoothed_csv(&self, name: &str, returns: &[f64]) -> Result<()> {
        let path = self.out_dir.join(format!("{name}_smooth.csv"));
        let smoothed = rolling_mean(returns, self.smoothing_window);
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(["episode", "reward", "smoothed"])?;
        for (i, (reward, smooth)) in returns.iter().zip(&smoothed).enumerate() {
            writer.write_record([
                (i + 1).to_string(),
                reward.to_string(),
                smooth.to_string(),
            ])?;
        }
        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush {}", path.display()),
            source,
        })?;
        Ok(())
    }

    fn write_summary(&self, summaries: &[VariantSummary]) -> Result<()> {
        let path = self.out_dir.join("summary.json");
        let file = File::create(&path).map_err(|source| Error::Io {
            operation: format!("create {}", path.display()),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), summaries)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::experiment::VariantCurve;

    fn report() -> ExperimentReport {
        ExperimentReport {
            baseline_returns: vec![-1.0, -3.0],
            baseline_mean: -2.0,
            curves: vec![VariantCurve {
                name: "unit".to_string(),
                hyperparameters: Hyperparameters::default(),
                returns: vec![1.0, 2.0, 6.0],
                elapsed_secs: 0.5,
            }],
        }
    }

    #[test]
    fn export_writes_all_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = MetricsExporter::new(dir.path()).with_smoothing_window(2);
        let summaries = exporter.export(&report()).unwrap();

        assert!(dir.path().join("unit_episodes.csv").exists());
        assert!(dir.path().join("unit_smooth.csv").exists());
        assert!(dir.path().join("summary.json").exists());

        assert_eq!(summaries.len(), 1);
        let s = &summaries[0];
        assert_eq!(s.variant, "unit");
        assert_eq!(s.episodes, 3);
        assert!((s.mean_reward - 3.0).abs() < 1e-12);
        assert!((s.mean_advantage - 5.0).abs() < 1e-12);
        assert_eq!(s.final_reward, 6.0);
        assert_eq!(s.best_reward, 6.0);
    }

    #[test]
    fn episode_csv_rows_carry_the_advantage() {
        let dir = tempfile::tempdir().unwrap();
        MetricsExporter::new(dir.path()).export(&report()).unwrap();

        let content = std::fs::read_to_string(dir.path().join("unit_episodes.csv")).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("episode,reward,advantage"));
        assert_eq!(lines.next(), Some("1,1,3"));
        assert_eq!(lines.next(), Some("2,2,4"));
        assert_eq!(lines.next(), Some("3,6,8"));
    }

    #[test]
    fn smoothed_csv_uses_min_periods_of_one() {
        let dir = tempfile::tempdir().unwrap();
        MetricsExporter::new(dir.path())
            .with_smoothing_window(2)
            .export(&report())
            .unwrap();

        let content = std::fs::read_to_string(dir.path().join("unit_smooth.csv")).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("episode,reward,smoothed"));
        assert_eq!(lines.next(), Some("1,1,1"));
        assert_eq!(lines.next(), Some("2,2,1.5"));
        assert_eq!(lines.next(), Some("3,6,4"));
    }

    #[test]
    fn summary_json_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let written = MetricsExporter::new(dir.path()).export(&report()).unwrap();

        let content = std::fs::read_to_string(dir.path().join("summary.json")).unwrap();
        let parsed: Vec<VariantSummary> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.len(), written.len());
        assert_eq!(parsed[0].variant, written[0].variant);
        assert_eq!(parsed[0].baseline_mean, -2.0);
    }
}
