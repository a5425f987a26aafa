//! Implementation of `frex show`.

use std::process::ExitCode;

use frex_data::{Corpus, DocumentVersion, Example, SourceLinks, SummaryKind, SummaryRecord};
use frex_highlight::{
    MarkupFormat, RenderOptions, RoleColorMap, example_color_map, legend, render_example,
    render_summary, sanitize,
};
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Serialize;
use tracing::warn;

use crate::cli::{
    args::ShowCommand,
    context::CommandContext,
    output::{RULE_WIDTH, dim, header, print_json, rule, subheader, warning},
};

/// Summary kinds shown under an example, in order.
const SUMMARY_KINDS: [SummaryKind; 2] = [SummaryKind::Report, SummaryKind::Combined];

/// Renders one annotated example with its linked summaries.
pub fn run(ctx: &CommandContext, cmd: &ShowCommand) -> ExitCode {
    let mut corpus = match ctx.corpus() {
        Ok(corpus) => corpus,
        Err(code) => return code,
    };

    let index = match resolve_index(&corpus, cmd) {
        Ok(index) => index,
        Err(code) => return code,
    };

    let example = match corpus.example(index) {
        Ok(example) => example,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let links = corpus.source_links(&example.instance_id).cloned();

    if cmd.json {
        return print_json(&ShownExample {
            example: &example,
            source_links: links.as_ref(),
        });
    }

    let summary = corpus
        .summary_for(&example.instance_id)
        .unwrap_or_else(|e| {
            warn!(instance = %example.instance_id, error = %e, "linked summary unreadable");
            None
        });

    let format = if cmd.html {
        MarkupFormat::Html
    } else {
        MarkupFormat::Terminal
    };
    let options = ctx.render_options(format, cmd.plain);
    let colors = color_map(&corpus, &example, summary.as_ref());
    let view = ExampleView {
        index,
        example: &example,
        version: cmd.version.into(),
        summary: summary.as_ref(),
        links: links.as_ref(),
        colors: &colors,
        options: &options,
    };

    match format {
        MarkupFormat::Html => view.print_html(),
        MarkupFormat::Terminal => view.print_terminal(&corpus),
    }
    ExitCode::SUCCESS
}

/// Picks the global example index from a positional index or a frame name.
fn resolve_index(corpus: &Corpus, cmd: &ShowCommand) -> Result<usize, ExitCode> {
    let index = match (&cmd.frame, cmd.index) {
        (Some(frame), _) => {
            let entries = corpus.frame_index().instances(frame);
            if entries.is_empty() {
                eprintln!("error: no examples of frame '{frame}'");
                eprintln!("Run 'frex frames' to list frames.");
                return Err(ExitCode::FAILURE);
            }
            match entries.get(cmd.nth) {
                Some(entry) => entry.idx,
                None => {
                    eprintln!(
                        "error: frame '{frame}' has {} examples; --nth {} is out of range",
                        entries.len(),
                        cmd.nth
                    );
                    return Err(ExitCode::FAILURE);
                }
            }
        }
        (None, Some(index)) => index,
        (None, None) => {
            eprintln!("error: give an example index or --frame");
            return Err(ExitCode::FAILURE);
        }
    };

    if index >= corpus.len() {
        eprintln!(
            "error: example {index} is out of range; the corpus has {} examples",
            corpus.len()
        );
        return Err(ExitCode::FAILURE);
    }
    Ok(index)
}

/// Colors covering the example, its frame's declared roles and the summary's roles.
fn color_map(corpus: &Corpus, example: &Example, summary: Option<&SummaryRecord>) -> RoleColorMap {
    let mut extra: Vec<String> = corpus
        .ontology()
        .roles(&example.frame)
        .map(|roles| roles.keys().cloned().collect())
        .unwrap_or_default();
    if let Some(summary) = summary {
        extra.extend(summary.roles());
    }
    example_color_map(example, extra)
}

/// `show --json` output: the example record plus its source links.
#[derive(Serialize)]
struct ShownExample<'a> {
    /// The example record.
    #[serde(flatten)]
    example: &'a Example,
    /// Where the source text came from.
    #[serde(skip_serializing_if = "Option::is_none")]
    source_links: Option<&'a SourceLinks>,
}

/// Everything needed to print one example.
struct ExampleView<'a> {
    /// Global example index.
    index: usize,
    /// The example.
    example: &'a Example,
    /// Document version to render.
    version: DocumentVersion,
    /// Canonical linked summary.
    summary: Option<&'a SummaryRecord>,
    /// Article title and URLs.
    links: Option<&'a SourceLinks>,
    /// Role colors shared by the document and summaries.
    colors: &'a RoleColorMap,
    /// Output options.
    options: &'a RenderOptions,
}

impl ExampleView<'_> {
    /// Prints the example with ANSI styling.
    fn print_terminal(&self, corpus: &Corpus) {
        let example = self.example;
        println!(
            "{}",
            header(&format!("Example {}: {}", self.index, example.frame))
        );
        let mut details = vec![format!("instance {}", example.instance_id)];
        if !example.split.is_empty() {
            details.push(format!("split {}", example.split));
        }
        details.push(format!("{} document", self.version));
        println!("{}", dim(&details.join(", ")));
        if !example.frame_gloss.is_empty() {
            println!("{}", dim(&example.frame_gloss));
        }
        if let Some(links) = self.links {
            for (label, value) in [
                ("article", &links.article_title),
                ("wikipedia", &links.wikipedia_url),
                ("source", &links.source_url),
            ] {
                if !value.is_empty() {
                    println!("{}", dim(&format!("{label}: {}", sanitize(value))));
                }
            }
        }
        println!("{}", rule(RULE_WIDTH));

        if self.options.highlight {
            println!("{}", legend(self.colors, self.options));
            println!();
        }

        let rendered = render_example(example, self.version, self.colors, self.options);
        println!("{}", rendered.markup);
        for issue in &rendered.issues {
            println!("{}", warning(&format!("skipped: {issue}")));
        }

        if let Some(summary) = self.summary {
            for kind in SUMMARY_KINDS {
                if summary.summary(kind).is_empty() {
                    continue;
                }
                println!();
                println!("{}", subheader(kind.label()));
                println!(
                    "{}",
                    render_summary(summary, kind, self.colors, self.options)
                );
            }
        }

        println!("{}", rule(RULE_WIDTH));
        let mut nav = Vec::new();
        if let Some(prev) = corpus.prev_index(self.index) {
            nav.push(format!("prev: frex show {prev}"));
        }
        if let Some(next) = corpus.next_index(self.index) {
            nav.push(format!("next: frex show {next}"));
        }
        if !nav.is_empty() {
            println!("{}", dim(&nav.join("   ")));
        }
    }

    /// Prints the example as an HTML fragment.
    fn print_html(&self) {
        let example = self.example;
        println!(
            r#"<article class="frex-example" data-index="{}" data-version="{}">"#,
            self.index, self.version
        );
        println!("<h2>{}</h2>", encode_text(&example.frame));
        if let Some(links) = self.links {
            print_html_links(links);
        }
        if self.options.highlight {
            println!(
                r#"<p class="frex-legend">{}</p>"#,
                legend(self.colors, self.options)
            );
        }

        let rendered = render_example(example, self.version, self.colors, self.options);
        println!(r#"<p class="frex-document">{}</p>"#, rendered.markup);
        for issue in &rendered.issues {
            println!("<!-- skipped: {} -->", encode_text(&issue.to_string()));
        }

        if let Some(summary) = self.summary {
            for kind in SUMMARY_KINDS {
                if summary.summary(kind).is_empty() {
                    continue;
                }
                println!("<h3>{}</h3>", kind.label());
                println!(
                    r#"<p class="frex-summary">{}</p>"#,
                    render_summary(summary, kind, self.colors, self.options)
                );
            }
        }
        println!("</article>");
    }
}

/// Prints the article title and URLs as a paragraph of links.
fn print_html_links(links: &SourceLinks) {
    let mut parts = Vec::new();
    if !links.article_title.is_empty() {
        parts.push(format!(
            r#"<span class="frex-article">{}</span>"#,
            encode_text(&links.article_title)
        ));
    }
    for (label, url) in [
        ("Wikipedia", &links.wikipedia_url),
        ("Source", &links.source_url),
    ] {
        if !url.is_empty() {
            parts.push(format!(
                r#"<a href="{}">{label}</a>"#,
                encode_double_quoted_attribute(url)
            ));
        }
    }
    if !parts.is_empty() {
        println!(r#"<p class="frex-links">{}</p>"#, parts.join(" | "));
    }
}
