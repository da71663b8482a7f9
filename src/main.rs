//! # Project Hub CLI (`hub`)
//!
//! The `hub` binary serves the project gallery and offers a few commands for
//! looking at the spreadsheet contents from a terminal.
//!
//! ## Usage
//!
//! ```bash
//! hub --config ./config/hub.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `hub serve` | Start the gallery HTTP server |
//! | `hub list` | Print projects, optionally filtered with `--search` |
//! | `hub show <id>` | Print one project's details and links |
//! | `hub export` | Write every project as JSON |

use clap::{Parser, Subcommand};
use project_hub::{config, detail, export, search, server};
use std::path::PathBuf;

/// Project Hub CLI: a searchable gallery of student projects.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. When the file does not exist the built-in defaults are used.
#[derive(Parser)]
#[command(
    name = "hub",
    about = "Project Hub: a searchable gallery of student projects",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/hub.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gallery server.
    ///
    /// Binds to `[server].bind`. The spreadsheet is fetched once in the
    /// background; until it arrives only the example project is shown.
    Serve,

    /// List projects.
    ///
    /// Matches the search term against title, author and tags,
    /// case-insensitively. Without a term every project is listed.
    List {
        /// Filter term.
        #[arg(long, short)]
        search: Option<String>,

        /// Print the matching records as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show one project's details.
    Show {
        /// Project id as printed by `hub list`.
        id: u32,
    },

    /// Export every project as JSON.
    Export {
        /// Output file. Defaults to stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::List { search: term, json } => {
            search::run_list(&cfg, term.as_deref(), json).await?;
        }
        Commands::Show { id } => {
            detail::run_show(&cfg, id).await?;
        }
        Commands::Export { output } => {
            export::run_export(&cfg, output.as_deref()).await?;
        }
    }

    Ok(())
}
