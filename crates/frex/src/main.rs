//! Command-line interface for `frex`, the annotated frame-corpus explorer.

mod cli;

use std::process::ExitCode;

use cli::{CommandContext, args::Commands, commands, logging};

fn main() -> ExitCode {
    let cli = cli::args::parse_cli();
    logging::init(cli.verbose);

    let ctx = match &cli.command {
        Commands::Init(_) => CommandContext::load_cwd_only(),
        _ => CommandContext::load(),
    };
    let ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &ctx)
}
