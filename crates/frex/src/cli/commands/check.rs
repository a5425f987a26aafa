//! Implementation of `frex check`.

use std::process::ExitCode;

use frex_config::{CONFIG_FILENAME, ConfigWarning, discover_config_files};
use frex_data::{Corpus, LoadWarning};

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, success, warning},
};

/// Validates the configuration and the corpus it points at.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);
    if config_files.is_empty() {
        println!(
            "{}",
            dim(&format!("No {CONFIG_FILENAME} found; checking defaults."))
        );
        println!();
    }

    let config_warnings = ctx.config.validate(&ctx.cwd);
    let data_dir = ctx.data_dir();
    let (load_warnings, load_error) = match Corpus::load(&data_dir, &ctx.config.datasets) {
        Ok(corpus) => {
            println!(
                "{} {} examples, {} frames",
                subheader("Corpus:"),
                corpus.len(),
                corpus.ontology().len()
            );
            println!();
            (corpus.warnings().to_vec(), None)
        }
        Err(e) => (Vec::new(), Some(e.to_string())),
    };

    let total = config_warnings.len() + load_warnings.len() + usize::from(load_error.is_some());
    if total == 0 {
        println!("{}", success("No issues found."));
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({total}):")));
    for w in &config_warnings {
        println!("   {}", warning(&w.to_string()));
    }
    if let Some(e) = &load_error {
        println!("   {}", warning(&format!("corpus could not be loaded: {e}")));
    }
    for w in &load_warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();

    print_hints(&config_warnings, &load_warnings);

    ExitCode::FAILURE
}

/// Prints hints for resolving common warnings.
fn print_hints(config_warnings: &[ConfigWarning], load_warnings: &[LoadWarning]) {
    for w in config_warnings {
        match w {
            ConfigWarning::DataDirMissing { .. } | ConfigWarning::DataDirNotDirectory { .. } => {
                println!(
                    "{}",
                    dim("Hint: set [settings] data_dir in .frex.toml to the corpus root")
                );
            }
            ConfigWarning::DatasetMissing { .. } => {
                println!(
                    "{}",
                    dim("Hint: check the dataset names under [datasets] in .frex.toml")
                );
            }
            ConfigWarning::NonPositiveBoost { .. }
            | ConfigWarning::CandidateLimitBelowMaxResults { .. } => {}
        }
    }
    if load_warnings
        .iter()
        .any(|w| matches!(w, LoadWarning::SecondaryUnavailable { .. }))
    {
        println!(
            "{}",
            dim("Hint: examples are still browsable; summaries will be missing")
        );
    }
}
