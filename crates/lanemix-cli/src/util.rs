use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use lanemix_model::{Participant, Side, TeamPair};
use lanemix_rating::RatingConfig;

use crate::session::SessionEntry;

/// Writes `value` as pretty JSON to `path`, or to stdout when `path` is `None`.
pub fn save_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
where
    T: serde::Serialize,
{
    let target = path.map_or_else(|| "stdout".to_owned(), |p| p.display().to_string());
    let mut writer: Box<dyn Write> = match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {target}"))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write JSON to {target}"))?;
    writeln!(writer).with_context(|| format!("Failed to write JSON to {target}"))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush output to {target}"))
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Read the roster catalog from a JSON file
///
/// # Arguments
///
/// * `path` - Path to a JSON array of participants
/// * `rating` - Rating rules whose ceiling every stored rating must respect
///
/// # Errors
///
/// Returns error if file cannot be opened or parsed, or holds a rating above
/// the ceiling
pub fn read_roster_file<P>(path: P, rating: &RatingConfig) -> anyhow::Result<Vec<Participant>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let participants: Vec<Participant> = read_json_file("roster", path)?;
    rating
        .check_roster(&participants)
        .with_context(|| format!("Invalid roster file: {}", path.display()))?;
    Ok(participants)
}

/// Read a team pair from a JSON file
///
/// Structural invariants are checked while parsing, so a hand-edited file with
/// a repeated role or participant is rejected here.
pub fn read_teams_file<P>(path: P) -> anyhow::Result<TeamPair>
where
    P: AsRef<Path>,
{
    read_json_file("teams", path)
}

pub fn read_session_file<P>(path: P) -> anyhow::Result<Vec<SessionEntry>>
where
    P: AsRef<Path>,
{
    read_json_file("session", path)
}

/// Participants appearing in `teams`, side A first.
pub fn participants_of(teams: &TeamPair) -> Vec<Participant> {
    teams.entries().map(|(_, e)| e.participant.clone()).collect()
}

pub fn print_teams(teams: &TeamPair) {
    for side in Side::ALL {
        let assignment = teams.side(side);
        eprintln!(
            "Side {side} (rating {}, average {}):",
            assignment.rating(),
            assignment.average_rating()
        );
        for (i, entry) in assignment.iter().enumerate() {
            let marker = if entry.is_primary() { "" } else { " (off-role)" };
            eprintln!(
                "  {i} {:<6} {:<20} {:>5}{marker}",
                entry.role.to_string(),
                entry.participant.name,
                entry.rating(),
            );
        }
    }
    eprintln!("Rating gap: {}", teams.rating_gap());
}
