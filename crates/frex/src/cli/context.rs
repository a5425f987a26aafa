//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use frex_config::Config;
use frex_data::Corpus;
use frex_highlight::{MarkupFormat, RenderOptions};
use frex_index::{Indexer, TantivyFieldIndex};
use tracing::{debug, warn};

use super::output::warning;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for `init`, which should work even when an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// The configured corpus root.
    pub fn data_dir(&self) -> PathBuf {
        self.config.data_dir(&self.cwd)
    }

    /// Loads the corpus, printing any load warnings to stderr.
    pub fn corpus(&self) -> Result<Corpus, ExitCode> {
        let data_dir = self.data_dir();
        let corpus = Corpus::load(&data_dir, &self.config.datasets).map_err(|e| {
            eprintln!("error: failed to load corpus from {}: {e}", data_dir.display());
            eprintln!("Set data_dir in .frex.toml or run 'frex check' for details.");
            ExitCode::FAILURE
        })?;
        for w in corpus.warnings() {
            eprintln!("{}", warning(&format!("warning: {w}")));
        }
        Ok(corpus)
    }

    /// Opens the search index, building it if it is missing or stale.
    ///
    /// Returns `None` when the index cannot be used; searches then fall back to scanning.
    pub fn search_index(&self, corpus: &Corpus) -> Option<TantivyFieldIndex> {
        let indexer = match Indexer::new(&self.config, &corpus.search_index_path()) {
            Ok(indexer) => indexer,
            Err(e) => {
                debug!(error = %e, "no index location");
                return None;
            }
        };
        match indexer.open(corpus.documents(), corpus.secondary()) {
            Ok(index) => Some(index),
            Err(e) => {
                warn!(error = %e, "search index unavailable");
                None
            }
        }
    }

    /// Rendering options from the configuration, with `plain` disabling highlighting.
    pub fn render_options(&self, format: MarkupFormat, plain: bool) -> RenderOptions {
        RenderOptions {
            highlight: self.config.settings.highlight && !plain,
            theme: self.config.settings.theme,
            format,
        }
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
