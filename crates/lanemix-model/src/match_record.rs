use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ParticipantId, Role, Side, TeamPair};

/// Identity assigned to a committed match record by the repository.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct MatchRecordId(String);

/// One participant's placement in a recorded match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEntry {
    pub participant_id: ParticipantId,
    pub role: Role,
    pub side: Side,
}

/// A reported match outcome.
///
/// Built only from a [`TeamPair`], so its entries always mirror a
/// structurally valid pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub recorded_at: DateTime<Utc>,
    pub players: Vec<MatchEntry>,
    pub winner: Side,
}

impl MatchRecord {
    #[must_use]
    pub fn new(teams: &TeamPair, winner: Side, recorded_at: DateTime<Utc>) -> Self {
        let players = teams
            .entries()
            .map(|(side, entry)| MatchEntry {
                participant_id: entry.participant.id.clone(),
                role: entry.role,
                side,
            })
            .collect();
        Self {
            recorded_at,
            players,
            winner,
        }
    }

    /// Records `teams` with the current time.
    #[must_use]
    pub fn now(teams: &TeamPair, winner: Side) -> Self {
        Self::new(teams, winner, Utc::now())
    }

    pub fn side_entries(&self, side: Side) -> impl Iterator<Item = &MatchEntry> {
        self.players.iter().filter(move |p| p.side == side)
    }
}
