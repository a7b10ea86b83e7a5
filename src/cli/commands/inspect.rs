//! `inspect` command: summarize a saved model artifact.

use std::path::PathBuf;

use clap::Args;

use crate::{
    Result,
    app::App,
    cli::output::{format_number, print_kv, print_section},
};

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Path to the model artifact (MessagePack).
    pub model: PathBuf,
}

pub fn execute(app: &App, args: &InspectArgs) -> Result<()> {
    let saved = app.repository().load(&args.model)?;
    let hp = saved.hyperparameters();
    let table = saved.table();

    print_section("Model");
    print_kv("path", args.model.display());
    print_kv("variant", &saved.variant);
    print_kv("format version", saved.version);

    print_section("Hyperparameters");
    print_kv("alpha", hp.alpha);
    print_kv("gamma", hp.gamma);
    print_kv("eps start", hp.eps_start);
    print_kv("eps min", hp.eps_min);
    print_kv("eps decay", hp.eps_decay);
    print_kv("decay after frames", format_number(hp.decay_after as usize));

    print_section("Table");
    print_kv("states", format_number(table.len()));
    print_kv("actions", table.actions());

    let mut best: Option<(f64, usize)> = None;
    let mut total_values = 0usize;
    for (state, row) in table.iter() {
        total_values += row.len();
        let value = table.max_value(state);
        if best.is_none_or(|(v, _)| value > v) {
            best = Some((value, table.greedy_action(state)));
        }
    }
    print_kv("stored values", format_number(total_values));
    if let Some((value, action)) = best {
        print_kv("best state value", format!("{value:.4}"));
        print_kv("its greedy action", action);
    }

    Ok(())
}
