use std::path::PathBuf;

use anyhow::Context as _;
use lanemix_model::Side;
use lanemix_rating::{RatingChange, ReportError, report_result};

use crate::{config::AppConfig, store::JsonStore, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReportArg {
    /// Roster JSON file, updated in place
    #[arg(long)]
    roster: PathBuf,
    /// Match log JSON file, created if missing
    #[arg(long)]
    matches: PathBuf,
    /// Teams JSON file of the played match
    #[arg(long)]
    teams: PathBuf,
    /// Winning side
    #[arg(long)]
    winner: Side,
}

pub(crate) fn run(arg: &ReportArg, config: &AppConfig) -> anyhow::Result<()> {
    let ReportArg {
        roster,
        matches,
        teams,
        winner,
    } = arg;

    let teams = util::read_teams_file(teams)?;
    let store = JsonStore::new(roster, Some(matches), &config.rating);
    let repo = store.open()?;

    let result = report_result(&repo, &teams, *winner, &config.rating);
    // Whatever was written stays written, so persist before reporting errors.
    store.save(repo).context("Failed to save roster and match log")?;

    let changes: &[RatingChange] = match &result {
        Ok(outcome) => {
            eprintln!("Recorded match {} (winner: side {winner})", outcome.match_id);
            &outcome.changes
        }
        Err(ReportError::Partial {
            match_id, applied, ..
        }) => {
            eprintln!("Recorded match {match_id} (winner: side {winner}) with failures");
            applied
        }
        Err(ReportError::Roster(_) | ReportError::MatchRecord(_)) => &[],
    };
    for change in changes {
        eprintln!(
            "  {} {:<6} {} {} -> {} ({})",
            change.participant_id,
            change.role.to_string(),
            change.field,
            change.before,
            change.after,
            if change.won { "win" } else { "loss" },
        );
    }

    if let Err(err) = &result {
        for id in err.failed_ids() {
            eprintln!("  not updated: {id}");
        }
    }
    result.map(drop).context("Match result was not fully applied")
}
