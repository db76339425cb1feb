//! Persistence contract for the roster catalog and match history.
//!
//! Every method takes `&self` so a single repository can serve concurrent
//! per-participant writes while a result is being reported.

use std::sync::{Mutex, MutexGuard};

use lanemix_model::{
    MatchRecord, MatchRecordId, Participant, ParticipantId, RatingField, RecordField,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PersistenceError {
    #[display("participant {id} not found")]
    ParticipantNotFound { id: ParticipantId },
    #[display("participant {id} {field} {value} exceeds the ceiling {ceiling}")]
    RatingOutOfRange {
        id: ParticipantId,
        field: RatingField,
        value: u32,
        ceiling: u32,
    },
    #[display("storage failure: {message}")]
    Backend { message: String },
}

/// A committed match record together with its assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMatch {
    pub id: MatchRecordId,
    #[serde(flatten)]
    pub record: MatchRecord,
}

pub trait Repository: Sync {
    fn list_participants(&self) -> Result<Vec<Participant>, PersistenceError>;

    fn update_participant_rating(
        &self,
        id: &ParticipantId,
        field: RatingField,
        value: u32,
    ) -> Result<(), PersistenceError>;

    /// Adds one to the given counter. Each call must count exactly once.
    fn increment_participant_record(
        &self,
        id: &ParticipantId,
        field: RecordField,
    ) -> Result<(), PersistenceError>;

    fn create_match_record(&self, record: &MatchRecord) -> Result<MatchRecordId, PersistenceError>;

    /// Lists committed matches, newest first.
    fn list_match_records(&self) -> Result<Vec<StoredMatch>, PersistenceError>;
}

/// A [`Repository`] backed by process memory.
///
/// Callers that persist elsewhere load state with [`InMemoryRepository::new`]
/// and write back what [`InMemoryRepository::into_parts`] returns.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    participants: Mutex<Vec<Participant>>,
    matches: Mutex<Vec<StoredMatch>>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, PersistenceError> {
    mutex.lock().map_err(|_| PersistenceError::Backend {
        message: "repository lock poisoned".to_owned(),
    })
}

impl InMemoryRepository {
    #[must_use]
    pub fn new(participants: Vec<Participant>, matches: Vec<StoredMatch>) -> Self {
        Self {
            participants: Mutex::new(participants),
            matches: Mutex::new(matches),
        }
    }

    pub fn into_parts(self) -> Result<(Vec<Participant>, Vec<StoredMatch>), PersistenceError> {
        let participants = self
            .participants
            .into_inner()
            .map_err(|_| PersistenceError::Backend {
                message: "repository lock poisoned".to_owned(),
            })?;
        let matches = self
            .matches
            .into_inner()
            .map_err(|_| PersistenceError::Backend {
                message: "repository lock poisoned".to_owned(),
            })?;
        Ok((participants, matches))
    }

    fn with_participant<F>(&self, id: &ParticipantId, f: F) -> Result<(), PersistenceError>
    where
        F: FnOnce(&mut Participant),
    {
        let mut participants = lock(&self.participants)?;
        let participant = participants
            .iter_mut()
            .find(|p| p.id == *id)
            .ok_or_else(|| PersistenceError::ParticipantNotFound { id: id.clone() })?;
        f(participant);
        Ok(())
    }
}

impl Repository for InMemoryRepository {
    fn list_participants(&self) -> Result<Vec<Participant>, PersistenceError> {
        Ok(lock(&self.participants)?.clone())
    }

    fn update_participant_rating(
        &self,
        id: &ParticipantId,
        field: RatingField,
        value: u32,
    ) -> Result<(), PersistenceError> {
        self.with_participant(id, |p| match field {
            RatingField::Primary => p.primary_rating = value,
            RatingField::Secondary => p.secondary_rating = value,
        })
    }

    fn increment_participant_record(
        &self,
        id: &ParticipantId,
        field: RecordField,
    ) -> Result<(), PersistenceError> {
        self.with_participant(id, |p| match field {
            RecordField::Wins => p.wins += 1,
            RecordField::Losses => p.losses += 1,
        })
    }

    fn create_match_record(&self, record: &MatchRecord) -> Result<MatchRecordId, PersistenceError> {
        let mut matches = lock(&self.matches)?;
        let id = MatchRecordId::from(format!("m{}", matches.len() + 1));
        matches.push(StoredMatch {
            id: id.clone(),
            record: record.clone(),
        });
        Ok(id)
    }

    fn list_match_records(&self) -> Result<Vec<StoredMatch>, PersistenceError> {
        let mut matches = lock(&self.matches)?.clone();
        // Stable, so records sharing a timestamp keep newest-inserted first.
        matches.reverse();
        matches.sort_by(|a, b| b.record.recorded_at.cmp(&a.record.recorded_at));
        Ok(matches)
    }
}
