use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod logging;
mod state;
mod tui;
mod views;

use commands::GateAction;

#[derive(Parser, Debug)]
#[command(name = "delegate", version, about = "Delegate tasks to an AI agent and review what it found")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive three-page dashboard
    Tui {
        /// Catalogue JSON (defaults to config, then the built-in demo data)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Write logs here; the dashboard logs nowhere otherwise
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// List delegable task templates
    Tasks {
        /// insurance, investment, travel, shopping or research
        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Print the AI interpretation for a goal
    Interpret {
        #[arg(long)]
        goal: String,

        /// Repeatable, e.g. --constraint budget='$150/month'
        #[arg(long = "constraint", value_name = "TYPE=VALUE")]
        constraints: Vec<String>,

        /// Supporting document to attach (PDF, DOC(X), XLS(X), images; up to 10 MB)
        #[arg(long = "document")]
        documents: Vec<PathBuf>,

        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Run the progress simulator headless, printing each transition
    Simulate {
        /// Override the configured tick interval
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Approve at the gate and run to completion
        #[arg(long, conflicts_with = "request_changes")]
        approve: bool,

        /// Request changes at the gate (leaves the run paused)
        #[arg(long)]
        request_changes: bool,
    },

    /// Print the final review for a recommendation
    Review {
        /// Recommendation id (defaults to the recommended one)
        #[arg(long)]
        select: Option<String>,

        /// Also list the alternatives
        #[arg(long)]
        alternatives: bool,

        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Catalogue file helpers
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },

    /// Manage ~/.delegate/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Write the built-in demo catalogue as JSON to stdout
    Export,

    /// Validate a catalogue JSON file
    Check {
        file: PathBuf,

        /// Comparison table CSV to apply before validating
        #[arg(long)]
        comparison: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Tui { log_file, .. } => logging::init_file(log_file.as_deref())?,
        _ => logging::init_stderr(),
    }

    match cli.command {
        Command::Tui { catalog, .. } => {
            let cfg = config::load_config()?;
            let catalog = commands::open_catalog(catalog.as_deref(), &cfg)?;
            let app = tui::App::new(catalog, cfg.settings()?, cfg.timezone()?);
            tui::run_tui(app)?;
        }

        Command::Tasks { category, catalog } => {
            let cfg = config::load_config()?;
            let catalog = commands::open_catalog(catalog.as_deref(), &cfg)?;
            commands::list_tasks(catalog.as_ref(), category.as_deref())?;
        }

        Command::Interpret {
            goal,
            constraints,
            documents,
            catalog,
        } => {
            let cfg = config::load_config()?;
            let catalog = commands::open_catalog(catalog.as_deref(), &cfg)?;
            commands::interpret(catalog, &goal, &constraints, &documents)?;
        }

        Command::Simulate {
            interval_ms,
            approve,
            request_changes,
        } => {
            let cfg = config::load_config()?;
            let sim = commands::interval_override(cfg.simulator.to_core()?, interval_ms);
            let gate = match (approve, request_changes) {
                (true, _) => GateAction::Approve,
                (_, true) => GateAction::RequestChanges,
                _ => GateAction::Stop,
            };
            let run = commands::simulate(sim, gate).await?;
            tracing::debug!(phase = ?run.phase, progress = run.progress, "simulate done");
        }

        Command::Review {
            select,
            alternatives,
            catalog,
        } => {
            let cfg = config::load_config()?;
            let catalog = commands::open_catalog(catalog.as_deref(), &cfg)?;
            commands::review(catalog, select.as_deref(), alternatives)?;
        }

        Command::Catalog { command } => match command {
            CatalogCommand::Export => commands::catalog_export()?,
            CatalogCommand::Check { file, comparison } => {
                commands::catalog_check(&file, comparison.as_deref())?;
            }
        },

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
    }

    Ok(())
}
