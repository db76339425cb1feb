use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{Participant, ParticipantId, Role, RoleSet, SessionSelection};

/// Number of participants on one side.
pub const TEAM_SIZE: usize = Role::LEN;

/// Number of participants in one team-building session.
pub const ROSTER_SIZE: usize = TEAM_SIZE * 2;

/// One of the two opposing sides of a [`TeamPair`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
    derive_more::IsVariant,
)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub const ALL: [Self; 2] = [Self::A, Self::B];
}

/// A participant placed into a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamEntry {
    pub participant: Participant,
    pub role: Role,
}

impl TeamEntry {
    #[must_use]
    pub fn new(participant: Participant, role: Role) -> Self {
        Self { participant, role }
    }

    /// Rating this participant contributes when playing the assigned role.
    #[must_use]
    pub fn rating(&self) -> u32 {
        self.participant.rating_for(self.role)
    }

    /// Whether the assigned role is the participant's primary role.
    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.role == self.participant.primary_role
    }
}

/// Five entries covering every role once, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TeamAssignment {
    entries: Vec<TeamEntry>,
}

impl TeamAssignment {
    #[must_use]
    pub fn entries(&self) -> &[TeamEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &TeamEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TeamEntry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn roles(&self) -> RoleSet {
        self.entries.iter().map(|e| e.role).collect()
    }

    /// Sum of every entry's role-dependent rating, saturating at `u32::MAX`.
    #[must_use]
    pub fn rating(&self) -> u32 {
        self.entries
            .iter()
            .map(TeamEntry::rating)
            .fold(0, u32::saturating_add)
    }

    /// Mean entry rating, rounded to nearest.
    #[must_use]
    pub fn average_rating(&self) -> u32 {
        let len = self.entries.len() as u64;
        if len == 0 {
            return 0;
        }
        let sum = self.entries.iter().map(|e| u64::from(e.rating())).sum::<u64>();
        u32::try_from((sum * 2 + len) / (len * 2)).unwrap_or(u32::MAX)
    }
}

/// A structural invariant of [`TeamPair`] that does not hold.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StructureError {
    #[display("side {side} has {len} entries, expected 5")]
    WrongSize { side: Side, len: usize },
    #[display("side {side} uses role {role} more than once")]
    DuplicateRole { side: Side, role: Role },
    #[display("participant {id} appears more than once")]
    DuplicateParticipant { id: ParticipantId },
}

/// A session entry placed into a role that the session excludes for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExclusionViolation {
    pub side: Side,
    pub index: usize,
    pub participant_id: ParticipantId,
    pub role: Role,
}

#[derive(Deserialize)]
struct RawTeamPair {
    a: Vec<TeamEntry>,
    b: Vec<TeamEntry>,
}

impl TryFrom<RawTeamPair> for TeamPair {
    type Error = StructureError;

    fn try_from(raw: RawTeamPair) -> Result<Self, Self::Error> {
        Self::new(raw.a, raw.b)
    }
}

/// Two complete, disjoint teams.
///
/// A value of this type always satisfies the structural invariants: each side
/// holds exactly [`TEAM_SIZE`] entries using every role once, and no
/// participant appears twice across both sides. Adjustments produce new
/// values instead of editing in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTeamPair")]
pub struct TeamPair {
    a: TeamAssignment,
    b: TeamAssignment,
}

impl TeamPair {
    /// Builds a team pair, checking every structural invariant.
    pub fn new(a: Vec<TeamEntry>, b: Vec<TeamEntry>) -> Result<Self, StructureError> {
        let mut seen = HashSet::with_capacity(ROSTER_SIZE);
        for (side, entries) in [(Side::A, &a), (Side::B, &b)] {
            if entries.len() != TEAM_SIZE {
                return Err(StructureError::WrongSize {
                    side,
                    len: entries.len(),
                });
            }
            let mut roles = RoleSet::EMPTY;
            for entry in entries {
                if !roles.insert(entry.role) {
                    return Err(StructureError::DuplicateRole {
                        side,
                        role: entry.role,
                    });
                }
                if !seen.insert(&entry.participant.id) {
                    return Err(StructureError::DuplicateParticipant {
                        id: entry.participant.id.clone(),
                    });
                }
            }
        }
        Ok(Self {
            a: TeamAssignment { entries: a },
            b: TeamAssignment { entries: b },
        })
    }

    #[must_use]
    pub fn side(&self, side: Side) -> &TeamAssignment {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    #[must_use]
    pub fn entry(&self, side: Side, index: usize) -> Option<&TeamEntry> {
        self.side(side).get(index)
    }

    /// Iterates all ten entries, side A first.
    pub fn entries(&self) -> impl Iterator<Item = (Side, &TeamEntry)> {
        Side::ALL
            .into_iter()
            .flat_map(move |side| self.side(side).iter().map(move |entry| (side, entry)))
    }

    /// Clones both sides' entries for building an adjusted pair.
    #[must_use]
    pub fn to_entries(&self) -> (Vec<TeamEntry>, Vec<TeamEntry>) {
        (self.a.entries.clone(), self.b.entries.clone())
    }

    #[must_use]
    pub fn side_rating(&self, side: Side) -> u32 {
        self.side(side).rating()
    }

    /// Absolute difference between the two side ratings.
    #[must_use]
    pub fn rating_gap(&self) -> u32 {
        self.a.rating().abs_diff(self.b.rating())
    }

    #[must_use]
    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.entries().any(|(_, e)| &e.participant.id == id)
    }

    /// Lists every entry whose role is excluded by the matching session
    /// selection. Entries without a selection are not checked.
    #[must_use]
    pub fn exclusion_violations(&self, selections: &[SessionSelection]) -> Vec<ExclusionViolation> {
        Side::ALL
            .into_iter()
            .flat_map(|side| {
                self.side(side)
                    .iter()
                    .enumerate()
                    .map(move |(index, entry)| (side, index, entry))
            })
            .filter(|(_, _, entry)| {
                selections
                    .iter()
                    .find(|s| s.participant.id == entry.participant.id)
                    .is_some_and(|s| s.excludes(entry.role))
            })
            .map(|(side, index, entry)| ExclusionViolation {
                side,
                index,
                participant_id: entry.participant.id.clone(),
                role: entry.role,
            })
            .collect()
    }

    /// Rebuilds session selections for a rematch with the same ten
    /// participants, each starting from their persisted exclusion set.
    #[must_use]
    pub fn to_selections(&self) -> Vec<SessionSelection> {
        self.entries()
            .map(|(_, entry)| SessionSelection::new(entry.participant.clone()))
            .collect()
    }
}
