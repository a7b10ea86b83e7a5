//! `export` command: turn an experiment report into CSVs and a summary.

use std::path::PathBuf;

use clap::Args;

use crate::{
    Result,
    cli::output::{print_kv, print_section},
    export::MetricsExporter,
    pipeline::ExperimentReport,
};

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Path to the experiment report (JSON).
    pub report: PathBuf,

    /// Output directory for CSVs and summary.json.
    #[arg(short, long, default_value = "metrics")]
    pub out_dir: PathBuf,

    /// Rolling-mean window for the smoothed series.
    #[arg(long, default_value_t = 50)]
    pub smoothing_window: usize,
}

pub fn execute(args: &ExportArgs) -> Result<()> {
    let report = ExperimentReport::load(&args.report)?;
    let exporter =
        MetricsExporter::new(&args.out_dir).with_smoothing_window(args.smoothing_window);
    let summaries = exporter.export(&report)?;

    print_section("Export");
    print_kv("report", args.report.display());
    print_kv("output dir", args.out_dir.display());
    print_kv("baseline mean", format!("{:.4}", report.baseline_mean));

    for summary in &summaries {
        print_section(&summary.variant);
        print_kv("episodes", summary.episodes);
        print_kv("mean reward", format!("{:.4}", summary.mean_reward));
        print_kv("mean advantage", format!("{:.4}", summary.mean_advantage));
        print_kv("best reward", format!("{:.4}", summary.best_reward));
        print_kv("final reward", format!("{:.4}", summary.final_reward));
    }

    Ok(())
}
