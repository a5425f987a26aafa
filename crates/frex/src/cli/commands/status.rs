//! Implementation of `frex status`.

use std::process::ExitCode;

use frex_config::{discover_config_files, is_global_config};
use frex_index::{detect_index_status, index_directory};

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, warning},
};

/// Shows configuration files, the corpus and index status.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);
    println!("{}", subheader("Config files:"));
    if config_files.is_empty() {
        println!("   {}", dim("(none, using defaults)"));
    }
    for path in &config_files {
        let scope = if is_global_config(path) { "global" } else { "local" };
        println!("   {} {}", path.display(), dim(&format!("({scope})")));
    }
    println!();

    let config = &ctx.config;
    let data_dir = ctx.data_dir();
    println!("{}", subheader("Corpus:"));
    if data_dir.is_dir() {
        println!("   {}", data_dir.display());
    } else {
        println!("   {} {}", data_dir.display(), warning("[missing]"));
    }
    for dataset in [
        &config.datasets.primary,
        &config.datasets.secondary,
        &config.datasets.ontology,
    ] {
        let marker = if data_dir.join(dataset).is_dir() {
            String::new()
        } else {
            format!(" {}", warning("[missing]"))
        };
        println!("   {} {dataset}{marker}", dim("dataset"));
    }
    println!();

    let Ok(corpus) = ctx.corpus() else {
        println!("Run {} for details.", subheader("frex check"));
        return ExitCode::FAILURE;
    };

    let metadata = corpus.metadata();
    println!("{}", subheader("Examples:"));
    println!("   {} examples", corpus.len());
    println!("   {} frames annotated", metadata.frames.len());
    for (split, count) in &metadata.splits {
        println!("   {} {count}", dim(&format!("{split}:")));
    }
    println!(
        "   {} linked to summaries",
        corpus
            .documents()
            .iter()
            .filter(|doc| corpus.secondary().first(&doc.instance_id).is_some())
            .count()
    );
    println!("   {} frames in ontology", corpus.ontology().len());
    println!();

    let index_status = detect_index_status(config, &corpus.search_index_path());
    print!("{}\n   {}", subheader("Index:"), index_status.description());
    match index_directory(config) {
        Some(path) => println!(" {}", dim(&format!("({})", path.display()))),
        None => println!(" {}", dim("(no config file; searches scan documents)")),
    }
    if index_status.needs_update() {
        println!("   {}", dim("Run 'frex update' or search to rebuild."));
    }

    ExitCode::SUCCESS
}
