//! Multi-variant experiment orchestration.
//!
//! An experiment runs a uniform-random baseline first, then trains every
//! configured variant in parallel. Each worker thread owns its own
//! environment and agent; nothing is shared between workers except the
//! model repository. Worker seeds are derived from the experiment seed at a
//! fixed stride so variants stay reproducible independently of scheduling.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
    thread,
    time::{Duration, Instant},
};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    error::Error,
    pipeline::{
        baseline::{BaselineConfig, BaselinePipeline},
        observers::WindowedMeanObserver,
        training::{TrainingConfig, TrainingPipeline},
    },
    ports::{environment::GameEnvironment, observer::Observer, repository::ModelRepository},
    q_learning::Hyperparameters,
    reward::RewardWeights,
    utils::mean,
};

/// A named hyperparameter configuration to train.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantSpec {
    pub name: String,
    pub hyperparameters: Hyperparameters,
}

impl VariantSpec {
    pub fn new(name: impl Into<String>, hyperparameters: Hyperparameters) -> Self {
        Self {
            name: name.into(),
            hyperparameters,
        }
    }
}

/// The standard three-variant comparison.
///
/// All three share the same ε range; they differ in how fast ε decays once
/// the warmup frame count has passed, and the third also halves the
/// learning rate.
pub fn standard_variants() -> Vec<VariantSpec> {
    let fast = Hyperparameters::default()
        .with_alpha(0.10)
        .with_gamma(0.99)
        .with_epsilon_schedule(1.0, 0.05, 0.999_989_5)
        .with_decay_after(20_000);
    let slow = fast
        .with_epsilon_schedule(1.0, 0.05, 0.999_999_5)
        .with_decay_after(50_000);
    let low_lr = slow.with_alpha(0.05);

    vec![
        VariantSpec::new("q_fast_decay", fast),
        VariantSpec::new("q_slow_decay", slow),
        VariantSpec::new("q_low_lr", low_lr),
    ]
}

/// Configuration for a full experiment run.
#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    /// Root seed. The baseline uses it directly; worker `i` gets
    /// `seed + i * worker_seed_stride`.
    pub seed: u64,
    pub baseline_episodes: usize,
    pub episodes: usize,
    pub max_frames: u32,
    pub rewards: RewardWeights,
    pub variants: Vec<VariantSpec>,
    /// Seed offset between consecutive workers.
    pub worker_seed_stride: u64,
    /// Startup delay per worker index, spreading out environment startup.
    pub stagger_ms: u64,
    /// Episode cadence for the per-worker windowed-mean log line; 0 runs
    /// silent.
    pub log_every: usize,
    /// Directory model artifacts are written to.
    pub model_dir: PathBuf,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            baseline_episodes: 250,
            episodes: 15_000,
            max_frames: 10_000,
            rewards: RewardWeights::default(),
            variants: standard_variants(),
            worker_seed_stride: 10_000,
            stagger_ms: 250,
            log_every: 250,
            model_dir: PathBuf::from("models"),
        }
    }
}

/// One variant's training outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantCurve {
    pub name: String,
    pub hyperparameters: Hyperparameters,
    /// Per-episode shaped returns in episode order.
    pub returns: Vec<f64>,
    pub elapsed_secs: f64,
}

/// Everything an experiment produced, ready for export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub baseline_returns: Vec<f64>,
    pub baseline_mean: f64,
    pub curves: Vec<VariantCurve>,
}

impl ExperimentReport {
    /// Write the report as JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create report file {}", path.display()),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Read a report back from JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open report file {}", path.display()),
            source,
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

type ObserverFactory = Box<dyn Fn(&str) -> Vec<Box<dyn Observer>> + Send + Sync>;

/// Runs the baseline and all variants, fanning variants out across threads.
pub struct ExperimentRunner {
    config: ExperimentConfig,
    observer_factory: Option<ObserverFactory>,
}

impl ExperimentRunner {
    pub fn new(config: ExperimentConfig) -> Self {
        Self {
            config,
            observer_factory: None,
        }
    }

    /// Replace the default per-run observers.
    ///
    /// The factory is called once per run with its label (`"baseline"` or
    /// the variant name) and its observers are attached to that run's
    /// pipeline. Without a factory every run gets a
    /// [`WindowedMeanObserver`] at the configured `log_every` cadence.
    pub fn with_observer_factory(
        mut self,
        factory: impl Fn(&str) -> Vec<Box<dyn Observer>> + Send + Sync + 'static,
    ) -> Self {
        self.observer_factory = Some(Box::new(factory));
        self
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    fn observers_for(&self, label: &str) -> Vec<Box<dyn Observer>> {
        match &self.observer_factory {
            Some(factory) => factory(label),
            None if self.config.log_every > 0 => vec![Box::new(WindowedMeanObserver::new(
                label,
                self.config.log_every,
            ))],
            None => Vec::new(),
        }
    }

    /// Run the full experiment.
    ///
    /// `make_env` is called once on the main thread for the baseline and
    /// once inside each worker thread, so environment instances never cross
    /// threads. Workers run one per variant; a panicking worker surfaces as
    /// [`Error::WorkerPanicked`] after the others have finished.
    pub fn run<E, F>(
        &self,
        make_env: F,
        repository: &(dyn ModelRepository + Sync),
    ) -> Result<ExperimentReport>
    where
        E: GameEnvironment,
        F: Fn() -> Result<E> + Send + Sync,
    {
        if self.config.variants.is_empty() {
            return Err(Error::InvalidConfiguration {
                message: "experiment requires at least one variant".to_string(),
            });
        }

        let mut baseline_env = make_env()?;
        let mut baseline_pipeline = BaselinePipeline::new(BaselineConfig {
            episodes: self.config.baseline_episodes,
            max_frames: self.config.max_frames,
            rewards: self.config.rewards,
        });
        for observer in self.observers_for("baseline") {
            baseline_pipeline = baseline_pipeline.with_observer(observer);
        }
        let baseline_returns = baseline_pipeline.run(&mut baseline_env, self.config.seed)?;
        let baseline_mean = mean(&baseline_returns);
        drop(baseline_env);

        std::fs::create_dir_all(&self.config.model_dir).map_err(|source| Error::Io {
            operation: format!(
                "create model directory {}",
                self.config.model_dir.display()
            ),
            source,
        })?;

        let config = &self.config;
        let make_env = &make_env;
        let mut curves = Vec::with_capacity(config.variants.len());

        thread::scope(|scope| -> Result<()> {
            let mut handles = Vec::with_capacity(config.variants.len());
            for (index, variant) in config.variants.iter().enumerate() {
                let observers = self.observers_for(&variant.name);
                let handle = scope.spawn(move || -> Result<VariantCurve> {
                    thread::sleep(Duration::from_millis(config.stagger_ms * index as u64));

                    let mut env = make_env()?;
                    let seed = config.seed + index as u64 * config.worker_seed_stride;
                    let mut pipeline = TrainingPipeline::new(TrainingConfig {
                        episodes: config.episodes,
                        max_frames: config.max_frames,
                        rewards: config.rewards,
                    });
                    for observer in observers {
                        pipeline = pipeline.with_observer(observer);
                    }

                    let started = Instant::now();
                    let returns = pipeline.train_variant(
                        &variant.name,
                        variant.hyperparameters,
                        seed,
                        &mut env,
                        repository,
                        &config.model_dir,
                    )?;

                    Ok(VariantCurve {
                        name: variant.name.clone(),
                        hyperparameters: variant.hyperparameters,
                        returns,
                        elapsed_secs: started.elapsed().as_secs_f64(),
                    })
                });
                handles.push((variant.name.clone(), handle));
            }

            for (name, handle) in handles {
                let curve = handle
                    .join()
                    .map_err(|_| Error::WorkerPanicked { variant: name })??;
                curves.push(curve);
            }
            Ok(())
        })?;

        Ok(ExperimentReport {
            baseline_returns,
            baseline_mean,
            curves,
        })
    }
}
