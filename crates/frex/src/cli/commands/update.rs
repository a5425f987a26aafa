//! Implementation of `frex update`.

use std::process::ExitCode;

use frex_index::Indexer;

use crate::cli::{
    context::CommandContext,
    output::{dim, success},
};

/// Rebuilds the search index from the corpus search documents.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let corpus = match ctx.corpus() {
        Ok(corpus) => corpus,
        Err(code) => return code,
    };

    let indexer = match Indexer::new(&ctx.config, &corpus.search_index_path()) {
        Ok(indexer) => indexer,
        Err(e) => {
            eprintln!("error: failed to initialize indexer: {e}");
            eprintln!("Run 'frex init' to create a .frex.toml; the index lives beside it.");
            return ExitCode::FAILURE;
        }
    };

    match indexer.rebuild(corpus.documents(), corpus.secondary()) {
        Ok(stats) => {
            println!(
                "{}",
                success(&format!(
                    "Indexed {} examples ({} with summaries)",
                    stats.documents_indexed, stats.documents_with_summary
                ))
            );
            println!("{}", dim(&indexer.index_dir().display().to_string()));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: indexing failed: {e}");
            ExitCode::FAILURE
        }
    }
}
