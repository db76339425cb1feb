use std::path::PathBuf;

use lanemix_rating::standings::{self, RoleSummary, Standing};
use serde::Serialize;

use crate::{config::AppConfig, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct StandingsArg {
    /// Roster JSON file
    #[arg(long)]
    roster: PathBuf,
    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
    /// Output file path for the JSON
    #[arg(long, requires = "json")]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct StandingsReport {
    participants: Vec<Standing>,
    roles: Vec<RoleSummary>,
}

pub(crate) fn run(arg: &StandingsArg, config: &AppConfig) -> anyhow::Result<()> {
    let participants = util::read_roster_file(&arg.roster, &config.rating)?;
    let report = StandingsReport {
        participants: standings::standings(&participants),
        roles: standings::role_summaries(&participants),
    };
    if arg.json {
        return util::save_json(&report, arg.output.as_deref());
    }

    println!(
        "{:<4} {:<20} {:<6} {:>7} {:>9} {:>4} {:>4} {:>5}",
        "#", "Name", "Role", "Primary", "Secondary", "W", "L", "Win%"
    );
    for (rank, s) in report.participants.iter().enumerate() {
        println!(
            "{:<4} {:<20} {:<6} {:>7} {:>9} {:>4} {:>4} {:>4}%",
            rank + 1,
            s.name,
            s.primary_role.to_string(),
            s.primary_rating,
            s.secondary_rating,
            s.wins,
            s.losses,
            s.win_rate_percent,
        );
    }
    println!();
    println!(
        "{:<6} {:>7} {:>6} {:>5} {:>11}",
        "Role", "Players", "Games", "Win%", "Avg primary"
    );
    for r in &report.roles {
        println!(
            "{:<6} {:>7} {:>6} {:>4}% {:>11}",
            r.role.to_string(),
            r.participants,
            r.games,
            r.win_rate_percent,
            r.average_primary_rating,
        );
    }
    Ok(())
}
