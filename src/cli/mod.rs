//! Command-line surface over the projector.

pub mod output;

use std::io::{self, Write};
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::config::SpecLoader;
use crate::errors::Result;
use crate::projector::{Projection, Projector};

#[derive(Debug, Parser)]
#[command(
    name = "balance_projector_cli",
    version,
    about = "Project account balances into the future"
)]
pub struct Cli {
    /// Path to the JSON specification file
    #[arg(long, global = true, env = "BALANCE_PROJECTOR_SPEC")]
    pub spec: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, clap::Args)]
pub struct WindowArgs {
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: NaiveDate,
    /// End date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub end: NaiveDate,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the running balance of one account
    Project {
        /// Account id to project
        #[arg(long)]
        account: String,
        #[command(flatten)]
        window: WindowArgs,
        /// Merge entries that share a date
        #[arg(long)]
        grouped: bool,
    },
    /// Print the balance of one account at the end of a date
    Balance {
        #[arg(long)]
        account: String,
        /// Date to query (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        #[command(flatten)]
        window: WindowArgs,
    },
    /// Summarize every chart declared in the specification
    Report {
        #[command(flatten)]
        window: WindowArgs,
    },
    /// Show build information
    Version,
}

/// Parses process arguments and runs the selected command against stdout.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}

pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }
    let loader = SpecLoader::new(cli.spec);

    match cli.command {
        Command::Project {
            account,
            window,
            grouped,
        } => {
            let projection = project(&loader, &window)?;
            let title = format!("{} {} .. {}", account, window.start, window.end);
            if grouped {
                output::write_grouped(out, &title, &projection.running_balance_grouped(&account)?)
            } else {
                output::write_rows(out, &title, &projection.rows(&account)?)
            }
        }
        Command::Balance {
            account,
            date,
            window,
        } => {
            let projection = project(&loader, &window)?;
            let balance = projection.balance_as_of(&account, date)?;
            writeln!(out, "{balance}")?;
            Ok(())
        }
        Command::Report { window } => {
            let spec = loader.load()?;
            let projection = Projector::project(&spec, window.start, window.end)?;
            for report in projection.reports(&spec.charts)? {
                output::write_report(out, &report)?;
            }
            Ok(())
        }
        Command::Version => {
            writeln!(out, "{}", version_line())?;
            Ok(())
        }
    }
}

/// Package version plus the git revision and build date embedded by `build.rs`.
fn version_line() -> String {
    format!(
        "balance_projector {} ({}, built {})",
        env!("CARGO_PKG_VERSION"),
        option_env!("BALANCE_PROJECTOR_REVISION").unwrap_or("unknown"),
        option_env!("BALANCE_PROJECTOR_BUILT").unwrap_or("unknown"),
    )
}

fn project(loader: &SpecLoader, window: &WindowArgs) -> Result<Projection> {
    let spec = loader.load()?;
    Projector::project(&spec, window.start, window.end)
}
