use std::{collections::HashMap, path::PathBuf};

use lanemix_model::Side;
use lanemix_rating::Repository as _;

use crate::{config::AppConfig, store::JsonStore};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct HistoryArg {
    /// Roster JSON file, used to show names
    #[arg(long)]
    roster: PathBuf,
    /// Match log JSON file
    #[arg(long)]
    matches: PathBuf,
    /// Show at most this many matches
    #[arg(long)]
    limit: Option<usize>,
}

pub(crate) fn run(arg: &HistoryArg, config: &AppConfig) -> anyhow::Result<()> {
    let repo = JsonStore::new(&arg.roster, Some(&arg.matches), &config.rating).open()?;
    let participants = repo.list_participants()?;
    let names = participants
        .iter()
        .map(|p| (&p.id, p.name.as_str()))
        .collect::<HashMap<_, _>>();

    let matches = repo.list_match_records()?;
    let shown = arg.limit.unwrap_or(matches.len());
    for stored in matches.iter().take(shown) {
        let record = &stored.record;
        println!(
            "{} {} winner: side {}",
            stored.id,
            record.recorded_at.format("%Y-%m-%d %H:%M"),
            record.winner
        );
        for side in Side::ALL {
            let players = record
                .side_entries(side)
                .map(|p| {
                    let name = names
                        .get(&p.participant_id)
                        .copied()
                        .unwrap_or(p.participant_id.as_str());
                    format!("{name} ({})", p.role)
                })
                .collect::<Vec<_>>();
            println!("  {side}: {}", players.join(", "));
        }
    }
    if matches.is_empty() {
        eprintln!("No matches recorded");
    }
    Ok(())
}
