//! Applying a reported match result to the catalog.
//!
//! Current ratings are read from the repository and the match record is
//! committed. Rating and win/loss updates for the ten participants are then
//! issued concurrently and all of them are waited for, so a failed write never
//! hides the outcome of the others.

use std::{collections::HashMap, panic, thread};

use lanemix_model::{
    MatchRecord, MatchRecordId, Participant, ParticipantId, RatingField, RecordField, Role, Side,
    TeamEntry, TeamPair,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    config::RatingConfig,
    repository::{PersistenceError, Repository},
};

/// The rating change applied to one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingChange {
    pub participant_id: ParticipantId,
    pub side: Side,
    pub role: Role,
    pub field: RatingField,
    pub before: u32,
    pub after: u32,
    pub won: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantFailure {
    pub participant_id: ParticipantId,
    pub error: PersistenceError,
}

/// A fully applied match result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutcome {
    pub match_id: MatchRecordId,
    pub changes: Vec<RatingChange>,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ReportError {
    #[display("failed to read current ratings: {_0}")]
    Roster(PersistenceError),
    #[display("failed to record match: {_0}")]
    MatchRecord(PersistenceError),
    #[display(
        "match {match_id} recorded but {} participant update(s) failed",
        failures.len()
    )]
    Partial {
        match_id: MatchRecordId,
        applied: Vec<RatingChange>,
        failures: Vec<ParticipantFailure>,
    },
}

impl ReportError {
    /// Participants whose updates did not complete.
    pub fn failed_ids(&self) -> impl Iterator<Item = &ParticipantId> {
        let failures = match self {
            Self::Roster(_) | Self::MatchRecord(_) => &[][..],
            Self::Partial { failures, .. } => failures.as_slice(),
        };
        failures.iter().map(|f| &f.participant_id)
    }
}

/// Plans one entry's update from the participant's stored record.
///
/// The applicable field follows the stored primary role, and the delta is
/// applied to the stored rating, so earlier writes are never overwritten.
fn plan(
    side: Side,
    entry: &TeamEntry,
    current: Option<&Participant>,
    winner: Side,
    config: &RatingConfig,
) -> Result<RatingChange, ParticipantFailure> {
    let id = &entry.participant.id;
    let Some(current) = current else {
        return Err(ParticipantFailure {
            participant_id: id.clone(),
            error: PersistenceError::ParticipantNotFound { id: id.clone() },
        });
    };
    let field = current.rating_field_for(entry.role);
    let before = current.rating(field);
    let won = side == winner;
    Ok(RatingChange {
        participant_id: id.clone(),
        side,
        role: entry.role,
        field,
        before,
        after: config.apply(before, won),
        won,
    })
}

fn apply<R>(repo: &R, change: RatingChange) -> Result<RatingChange, ParticipantFailure>
where
    R: Repository + ?Sized,
{
    let record = if change.won {
        RecordField::Wins
    } else {
        RecordField::Losses
    };
    let result = repo
        .update_participant_rating(&change.participant_id, change.field, change.after)
        .and_then(|()| repo.increment_participant_record(&change.participant_id, record));
    match result {
        Ok(()) => Ok(change),
        Err(error) => Err(ParticipantFailure {
            participant_id: change.participant_id,
            error,
        }),
    }
}

/// Records `teams` as played with `winner` and moves every participant's
/// applicable rating by the configured delta.
///
/// Each new rating is derived from the value currently stored in `repo`; the
/// participant snapshots inside `teams` only identify who played which role.
/// A participant missing from the repository is reported as a failure for
/// that participant. Calling this twice for the same match applies it twice.
pub fn report_result<R>(
    repo: &R,
    teams: &TeamPair,
    winner: Side,
    config: &RatingConfig,
) -> Result<ReportOutcome, ReportError>
where
    R: Repository + ?Sized,
{
    let roster = repo.list_participants().map_err(ReportError::Roster)?;
    let by_id = roster
        .iter()
        .map(|p| (&p.id, p))
        .collect::<HashMap<_, _>>();

    let record = MatchRecord::now(teams, winner);
    let match_id = repo
        .create_match_record(&record)
        .map_err(ReportError::MatchRecord)?;
    info!(%match_id, %winner, "match recorded");

    let (planned, unknown): (Vec<_>, Vec<_>) = teams
        .entries()
        .map(|(side, entry)| {
            let current = by_id.get(&entry.participant.id).copied();
            plan(side, entry, current, winner, config)
        })
        .partition(Result::is_ok);

    let results = thread::scope(|s| {
        let handles = planned
            .into_iter()
            .flatten()
            .map(|change| s.spawn(move || apply(repo, change)))
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|e| panic::resume_unwind(e)))
            .collect::<Vec<_>>()
    });

    let mut changes = vec![];
    let mut failures = vec![];
    for result in unknown.into_iter().chain(results) {
        match result {
            Ok(change) => changes.push(change),
            Err(failure) => {
                warn!(
                    %match_id,
                    participant = %failure.participant_id,
                    error = %failure.error,
                    "participant update failed"
                );
                failures.push(failure);
            }
        }
    }

    if failures.is_empty() {
        Ok(ReportOutcome { match_id, changes })
    } else {
        Err(ReportError::Partial {
            match_id,
            applied: changes,
            failures,
        })
    }
}
