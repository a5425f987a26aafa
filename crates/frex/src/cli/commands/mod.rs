//! Command implementations and dispatch.

pub mod check;
pub mod config;
pub mod frame;
pub mod frames;
pub mod init;
pub mod search;
pub mod show;
pub mod status;
pub mod update;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Search(cmd) => search::run(ctx, &cmd),
        Commands::Show(cmd) => show::run(ctx, &cmd),
        Commands::Frames(cmd) => frames::run(ctx, &cmd),
        Commands::Frame(cmd) => frame::run(ctx, &cmd),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Check => check::run(ctx),
        Commands::Status => status::run(ctx),
        Commands::Update => update::run(ctx),
        Commands::Config => config::run(ctx),
    }
}
