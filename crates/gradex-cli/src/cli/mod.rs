//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use gradex_core::config::Config;
use gradex_core::logging;

mod commands;

#[derive(Parser)]
#[command(name = "gradex")]
#[command(version)]
#[command(about = "Terminal client for the grading-system backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the backend base URL from config
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage subjects
    Subjects {
        #[command(subcommand)]
        command: SubjectCommands,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum SubjectCommands {
    /// Lists all subjects
    List,
    /// Shows a specific subject
    Show {
        /// The ID of the subject to show
        #[arg(value_name = "SUBJECT_ID")]
        id: i64,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = Config::load().context("load config")?;

    if let Some(url) = cli.base_url.as_deref() {
        let trimmed = url.trim();
        if !trimmed.is_empty() {
            config.base_url = trimmed.to_string();
        }
    }

    // default to the interactive browser
    let Some(command) = cli.command else {
        // Logs go to a file; stdout belongs to the alternate screen.
        let _guard = logging::init_logging(&config.log_level)?;
        return gradex_tui::run_browser(&config).await;
    };

    match command {
        Commands::Subjects { command } => match command {
            SubjectCommands::List => commands::subjects::list(&config).await,
            SubjectCommands::Show { id } => commands::subjects::show(&config, id).await,
        },

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
