//! Implementation of `frex frame`.

use std::process::ExitCode;

use frex_highlight::{MarkupFormat, color_map_for, highlight_roles_in_text};
use frex_ontology::FrameRecord;

use crate::cli::{
    args::FrameCommand,
    context::CommandContext,
    output::{dim, header, subheader},
};

/// Shows a frame's definition, roles, relatives and example count.
pub fn run(ctx: &CommandContext, cmd: &FrameCommand) -> ExitCode {
    let corpus = match ctx.corpus() {
        Ok(corpus) => corpus,
        Err(code) => return code,
    };
    let ontology = corpus.ontology();
    let Some(frame) = ontology.frame(&cmd.name) else {
        eprintln!("error: unknown frame '{}'", cmd.name);
        eprintln!("Run 'frex frames {}' to browse frames.", cmd.name);
        return ExitCode::FAILURE;
    };

    let options = ctx.render_options(MarkupFormat::Terminal, cmd.plain);
    let colors = color_map_for(frame.all_roles.keys());

    println!("{}", header(&frame.name));
    if !frame.definition.is_empty() {
        println!(
            "{}",
            highlight_roles_in_text(&frame.definition, &frame.all_roles, &colors, &options)
        );
    }
    println!();

    print_roles(frame);

    let walker = ontology.walker();
    print_relatives("Parents:", walker.parents_of(&frame.name));
    print_relatives("Children:", walker.children_of(&frame.name));
    print_relatives("Ancestors:", &walker.ancestors_of(&frame.name));
    print_relatives("Descendants:", &walker.descendants_of(&frame.name));

    let examples = corpus.frame_index().instances(&frame.name);
    println!("{}", subheader("Examples:"));
    match examples.first() {
        Some(first) => println!(
            "   {} {}",
            examples.len(),
            dim(&format!("(first: frex show {})", first.idx))
        ),
        None => println!("   {}", dim("(none in this corpus)")),
    }
    ExitCode::SUCCESS
}

/// Prints the frame's roles, core roles first.
fn print_roles(frame: &FrameRecord) {
    println!("{}", subheader("Roles:"));
    if frame.all_roles.is_empty() {
        println!("   {}", dim("(none)"));
    }
    let core = frame.all_roles.iter().filter(|(role, _)| frame.is_core_role(role));
    let other = frame.all_roles.iter().filter(|(role, _)| !frame.is_core_role(role));
    for (role, definition) in core {
        println!("   {role} {}", dim("(core)"));
        print_definition(definition);
    }
    for (role, definition) in other {
        println!("   {role}");
        print_definition(definition);
    }
    println!();
}

/// Prints a role definition under its name.
fn print_definition(definition: &str) {
    if !definition.is_empty() {
        println!("      {}", dim(definition));
    }
}

/// Prints a labeled list of related frames, skipping empty lists.
fn print_relatives(label: &str, frames: &[String]) {
    if frames.is_empty() {
        return;
    }
    println!("{}", subheader(label));
    println!("   {}", frames.join(", "));
    println!();
}
