use std::{io, path::PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

use self::{
    adjust::{ReassignArg, SwapArg},
    check::CheckArg,
    generate::GenerateArg,
    history::HistoryArg,
    rebase_secondary::RebaseSecondaryArg,
    report::ReportArg,
    standings::StandingsArg,
};

mod adjust;
mod check;
mod generate;
mod history;
mod rebase_secondary;
mod report;
mod standings;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log debug events
    #[arg(long, short, global = true)]
    verbose: bool,
    /// JSON file with `balancer` and `rating` settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Build balanced teams for a ten-participant session
    Generate(#[clap(flatten)] GenerateArg),
    /// Exchange the participants at two team positions
    Swap(#[clap(flatten)] SwapArg),
    /// Change the role of one team position
    Reassign(#[clap(flatten)] ReassignArg),
    /// Audit teams against session role exclusions
    Check(#[clap(flatten)] CheckArg),
    /// Record a match result and update ratings
    Report(#[clap(flatten)] ReportArg),
    /// Show participant and role standings
    Standings(#[clap(flatten)] StandingsArg),
    /// List recorded matches, newest first
    History(#[clap(flatten)] HistoryArg),
    /// Reset secondary ratings to a percentage of primary ratings
    RebaseSecondary(#[clap(flatten)] RebaseSecondaryArg),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing(args.verbose);
    let config = AppConfig::load(args.config.as_deref())?;
    match args.mode {
        Mode::Generate(arg) => generate::run(&arg, &config)?,
        Mode::Swap(arg) => adjust::run_swap(&arg)?,
        Mode::Reassign(arg) => adjust::run_reassign(&arg)?,
        Mode::Check(arg) => check::run(&arg)?,
        Mode::Report(arg) => report::run(&arg, &config)?,
        Mode::Standings(arg) => standings::run(&arg, &config)?,
        Mode::History(arg) => history::run(&arg, &config)?,
        Mode::RebaseSecondary(arg) => rebase_secondary::run(&arg, &config)?,
    }
    Ok(())
}
