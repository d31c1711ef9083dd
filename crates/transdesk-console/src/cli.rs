//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};
use transdesk_common_async::CancellationToken;
use transdesk_common_config::{vars, ConfigLoader, ConsoleConfig};

use crate::app::Console;
use crate::commands::{LocalesCommand, OpenCommand, ProjectsCommand, TranslationsCommand};
use crate::error::CliError;
use crate::output::OutputFormat;
use crate::router::Router;

/// Transdesk - translation administration console
///
/// Manage projects, their locales and translation keys against a
/// Transdesk backend.
#[derive(Debug, Parser)]
#[command(
    name = "transdesk",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = vars::TRANSDESK_CONFIG_PATH,
        value_hint = ValueHint::FilePath
    )]
    pub config: Option<PathBuf>,

    /// Backend base URL, overriding configuration and environment
    #[arg(long, global = true, value_hint = ValueHint::Url)]
    pub base_url: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List, inspect and edit projects
    Projects(ProjectsCommand),

    /// Manage the locales of a project
    Locales(LocalesCommand),

    /// Build translation requests
    Translations(TranslationsCommand),

    /// Open a console path and print the page
    Open(OpenCommand),
}

impl Cli {
    /// Load configuration from the given file or the default location.
    pub fn load_config(&self) -> Result<ConsoleConfig, CliError> {
        let loader = match &self.config {
            Some(path) => ConfigLoader::from_file(path),
            None => ConfigLoader::default(),
        };
        let mut config = loader.load()?;
        if let Some(url) = &self.base_url {
            config.backend.base_url = Some(url.clone());
        }
        Ok(config)
    }

    /// Execute the selected command
    pub async fn execute(self, config: ConsoleConfig, token: CancellationToken) -> Result<(), CliError> {
        let console = Console::new(&config)?;
        let ctx = CommandContext {
            router: Router::new(console),
            format: self.format,
            quiet: self.quiet,
            token,
        };

        let result = match self.command {
            Command::Projects(cmd) => cmd.execute(&ctx).await,
            Command::Locales(cmd) => cmd.execute(&ctx).await,
            Command::Translations(cmd) => cmd.execute(&ctx).await,
            Command::Open(cmd) => cmd.execute(&ctx).await,
        };

        let stats = ctx.console().cache().stats();
        tracing::debug!(
            hits = stats.hits,
            misses = stats.misses,
            hit_rate = stats.hit_rate(),
            entries = stats.size,
            "query cache summary"
        );
        result
    }
}

/// Context passed to all commands
pub struct CommandContext {
    pub router: Router,
    pub format: OutputFormat,
    pub quiet: bool,
    pub token: CancellationToken,
}

impl CommandContext {
    pub fn console(&self) -> &Console {
        self.router.console()
    }

    /// Print a status line unless `--quiet` or JSON output was requested.
    pub fn status(&self, message: impl AsRef<str>) {
        if !self.quiet && !self.format.is_json() {
            println!("{}", message.as_ref());
        }
    }
}
