//! Clap argument definitions for the `frex` CLI.

use std::{env, process::exit};

use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand, ValueEnum, error::ErrorKind};
use frex_data::DocumentVersion;
use frex_index::FieldGroups;

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "frex")]
#[command(about = "Frame Explorer - browse and search an annotated frame corpus")]
pub struct Cli {
    /// Increase diagnostic output on stderr (-v info, -vv debug)
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `frex init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.frex.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Field group toggles for `frex search`.
#[derive(Args, Debug, Clone, Default)]
pub struct FieldGroupArgs {
    /// Search frame names, glosses and definitions
    #[arg(long)]
    pub frames: bool,

    /// Search report and source text
    #[arg(long)]
    pub text: bool,

    /// Search annotated role names
    #[arg(long)]
    pub roles: bool,

    /// Search linked summaries
    #[arg(long)]
    pub summaries: bool,
}

impl FieldGroupArgs {
    /// The selected groups. None selected searches every field.
    pub fn groups(&self) -> FieldGroups {
        FieldGroups {
            frames: self.frames,
            text: self.text,
            roles: self.roles,
            summaries: self.summaries,
        }
    }
}

/// Arguments for `frex search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Search terms
    #[arg(required = true)]
    pub query: Vec<String>,

    #[command(flatten)]
    /// Field group toggles.
    pub groups: FieldGroupArgs,

    /// Maximum results to return [default: 50]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Document version selectable on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum VersionArg {
    /// The report document
    #[default]
    Report,
    /// The source document
    Source,
}

impl From<VersionArg> for DocumentVersion {
    fn from(version: VersionArg) -> Self {
        match version {
            VersionArg::Report => Self::Report,
            VersionArg::Source => Self::Source,
        }
    }
}

/// Arguments for `frex show`.
#[derive(Args, Debug, Clone)]
pub struct ShowCommand {
    /// Global example index
    #[arg(required_unless_present = "frame")]
    pub index: Option<usize>,

    /// Show an example of this frame instead
    #[arg(long, conflicts_with = "index")]
    pub frame: Option<String>,

    /// Which example of the frame to show, starting at 0
    #[arg(long, default_value_t = 0)]
    pub nth: usize,

    /// Document version to render
    #[arg(long, value_enum, default_value_t = VersionArg::Report)]
    pub version: VersionArg,

    /// Emit HTML markup instead of terminal colors
    #[arg(long)]
    pub html: bool,

    /// Disable annotation highlighting
    #[arg(long)]
    pub plain: bool,

    /// Output the raw example as JSON
    #[arg(long, conflicts_with_all = ["html", "plain"])]
    pub json: bool,
}

/// Arguments for `frex frames`.
#[derive(Args, Debug, Clone)]
pub struct FramesCommand {
    /// Only show frames whose name, or a descendant's name, contains this text
    pub filter: Option<String>,
}

/// Arguments for `frex frame`.
#[derive(Args, Debug, Clone)]
pub struct FrameCommand {
    /// Frame name
    pub name: String,

    /// Disable role highlighting in the definition
    #[arg(long)]
    pub plain: bool,
}

/// Supported `frex` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search examples by frame, text, roles or summaries
    #[command(after_help = "\
MATCHING:
  Each field is searched for whole terms first; if nothing matches, terms
  are treated as prefixes. Without any group flag every field is searched.

EXAMPLES:
  frex search fire
  frex search --frames fire
  frex search --roles Agent -n 10
  frex search --summaries evacuation --json")]
    Search(SearchCommand),

    /// Render one annotated example
    Show(ShowCommand),

    /// Browse the frame hierarchy
    Frames(FramesCommand),

    /// Show a frame's definition, roles and relatives
    Frame(FrameCommand),

    /// Initialize frex configuration in current directory
    Init(InitCommand),

    /// Validate configuration and corpus
    Check,

    /// Show configuration, corpus and index status
    Status,

    /// Force rebuild of the search index
    Update,

    /// Show effective configuration settings
    Config,
}

/// Parses CLI arguments, printing compact help for top-level `--help`.
pub fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if e.kind() == ErrorKind::DisplayHelp {
                let args: Vec<_> = env::args().collect();
                if args.len() <= 2 {
                    print_command_help();
                    exit(0);
                }
            }
            e.exit();
        }
    }
}

/// Prints help listing every subcommand on one line.
fn print_command_help() {
    let cmd = Cli::command();
    let about = cmd.get_about().map(|s| s.to_string()).unwrap_or_default();

    println!("{about}");
    println!();
    println!("Usage: frex [OPTIONS] <COMMAND>");
    println!();
    println!("Commands:");
    for sub in cmd.get_subcommands() {
        let name = sub.get_name();
        if name == "help" {
            continue;
        }
        let about = sub.get_about().map(|s| s.to_string()).unwrap_or_default();
        println!("  {name:10} {about}");
    }
    println!(
        "  {:<10} Print this message or the help of the given subcommand(s)",
        "help"
    );
    println!();
    println!("Options:");
    println!("  -v, --verbose  Increase diagnostic output on stderr");
    println!("  -h, --help     Print help");
}
