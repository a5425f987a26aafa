//! Implementation of `frex search`.

use std::process::ExitCode;

use frex_index::{FieldSearchIndex, FieldedSearchEngine};
use tracing::debug;

use crate::cli::{
    args::SearchCommand,
    context::CommandContext,
    output::{print_search_json, print_search_table},
};

/// Searches the corpus and prints ranked examples.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    let query = cmd.query.join(" ");
    if query.trim().is_empty() {
        eprintln!("error: empty query");
        return ExitCode::FAILURE;
    }

    let corpus = match ctx.corpus() {
        Ok(corpus) => corpus,
        Err(code) => return code,
    };
    let mut index = ctx.search_index(&corpus);

    let mut engine = FieldedSearchEngine::new(&ctx.config.search);
    if let Some(limit) = cmd.limit {
        engine = engine.with_max_results(limit);
        index = index.map(|index| index.with_min_limit(limit));
    }

    let groups = cmd.groups.groups();
    debug!(query = %query, ?groups, "searching");
    let results = engine.search(
        &query,
        groups,
        index.as_ref().map(|index| index as &dyn FieldSearchIndex),
        corpus.documents(),
        corpus.secondary(),
    );

    if cmd.json {
        return print_search_json(&query, &results);
    }
    print_search_table(&results);
    ExitCode::SUCCESS
}
