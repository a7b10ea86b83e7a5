//! Built-in observers: progress bar, metrics collection, periodic logging.

use std::sync::{Arc, Mutex};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{Result, error::Error, ports::observer::Observer, utils::mean};

/// Renders an indicatif progress bar over the episode loop.
pub struct ProgressObserver {
    bar: Option<ProgressBar>,
    label: String,
}

impl ProgressObserver {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            bar: None,
            label: label.into(),
        }
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let style = ProgressStyle::with_template(
            "{msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
        )
        .map_err(|e| Error::ProgressBarTemplate {
            message: e.to_string(),
        })?
        .progress_chars("=>-");

        let bar = ProgressBar::new(total_episodes as u64).with_style(style);
        bar.set_message(self.label.clone());
        self.bar = Some(bar);
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: usize, _episode_return: f64, _epsilon: f64) -> Result<()> {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(bar) = self.bar.take() {
            bar.finish();
        }
        Ok(())
    }
}

/// Summary statistics collected by a [`MetricsObserver`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunMetrics {
    pub episodes: usize,
    pub mean_return: f64,
    pub best_return: f64,
    pub final_return: f64,
}

/// Collects per-episode returns into a shared buffer.
///
/// The buffer is behind an `Arc<Mutex<_>>` so the caller can keep a handle
/// while the observer is boxed into a pipeline.
#[derive(Default)]
pub struct MetricsObserver {
    returns: Arc<Mutex<Vec<f64>>>,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the collected returns.
    pub fn returns(&self) -> Arc<Mutex<Vec<f64>>> {
        Arc::clone(&self.returns)
    }

    /// Summarize whatever has been collected so far.
    pub fn summary(&self) -> RunMetrics {
        let returns = self.returns.lock().expect("metrics lock poisoned");
        if returns.is_empty() {
            return RunMetrics::default();
        }
        RunMetrics {
            episodes: returns.len(),
            mean_return: mean(&returns),
            best_return: returns.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            final_return: *returns.last().expect("non-empty"),
        }
    }
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, _episode: usize, episode_return: f64, _epsilon: f64) -> Result<()> {
        self.returns
            .lock()
            .expect("metrics lock poisoned")
            .push(episode_return);
        Ok(())
    }
}

/// Logs a windowed mean return and the current ε at a fixed episode cadence.
pub struct WindowedMeanObserver {
    label: String,
    every: usize,
    window: Vec<f64>,
}

impl WindowedMeanObserver {
    pub fn new(label: impl Into<String>, every: usize) -> Self {
        Self {
            label: label.into(),
            every: every.max(1),
            window: Vec::new(),
        }
    }
}

impl Observer for WindowedMeanObserver {
    fn on_episode_end(&mut self, episode: usize, episode_return: f64, epsilon: f64) -> Result<()> {
        self.window.push(episode_return);
        if (episode + 1) % self.every == 0 {
            eprintln!(
                "[{}] episode {:>6}  mean return {:>8.3}  eps {:.4}",
                self.label,
                episode + 1,
                mean(&self.window),
                epsilon,
            );
            self.window.clear();
        }
        Ok(())
    }
}
