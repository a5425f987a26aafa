//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
pub use frex_highlight::{dim, header, rule, subheader, success, warning};
use frex_index::{SearchHit, SearchMode, SearchResults};
use serde::Serialize;

/// Width of section rules.
pub const RULE_WIDTH: usize = 60;

/// JSON output for `frex search`.
#[derive(Serialize)]
struct JsonSearchOutput<'a> {
    /// The query as typed.
    query: &'a str,
    /// Whether the index or the fallback scan answered.
    mode: SearchMode,
    /// Number of hits.
    total_matches: usize,
    /// Ranked hits, best first.
    results: &'a [SearchHit],
}

/// Prints `value` as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints search results as JSON.
pub fn print_search_json(query: &str, results: &SearchResults) -> ExitCode {
    print_json(&JsonSearchOutput {
        query,
        mode: results.mode,
        total_matches: results.hits.len(),
        results: &results.hits,
    })
}

/// Prints search results as a table.
pub fn print_search_table(results: &SearchResults) {
    if results.hits.is_empty() {
        println!("{}", dim("No results found."));
        print_mode_note(results.mode);
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_header(vec!["#", "Frame", "Score", "Summary", "Preview"]);

    for hit in &results.hits {
        let summary = hit
            .secondary
            .as_ref()
            .map_or_else(String::new, |link| link.seamus_id.clone());
        table.add_row(vec![
            Cell::new(hit.document.id),
            Cell::new(&hit.document.frame_name),
            Cell::new(format!("{:.2}", hit.score)),
            Cell::new(summary),
            Cell::new(&hit.preview),
        ]);
    }

    println!("{table}");
    println!(
        "{}",
        dim(&format!(
            "{} result{}. Show one with 'frex show <#>'.",
            results.hits.len(),
            if results.hits.len() == 1 { "" } else { "s" }
        ))
    );
    print_mode_note(results.mode);
}

/// Notes on stdout when results came from the fallback scan.
fn print_mode_note(mode: SearchMode) {
    if mode == SearchMode::Fallback {
        println!(
            "{}",
            dim("(search index unavailable; results are from a substring scan)")
        );
    }
}
