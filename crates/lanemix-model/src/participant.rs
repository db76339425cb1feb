use serde::{Deserialize, Serialize};

use crate::{Role, RoleSet};

/// Stable identity of a participant in the roster catalog.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Which of a participant's two ratings a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum RatingField {
    #[display("primary rating")]
    Primary,
    #[display("secondary rating")]
    Secondary,
}

/// Which cumulative match counter a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    #[display("wins")]
    Wins,
    #[display("losses")]
    Losses,
}

// `skip_serializing_if` passes the field by reference.
#[allow(clippy::trivially_copy_pass_by_ref)]
fn no_roles(roles: &RoleSet) -> bool {
    roles.is_empty()
}

/// A roster member as persisted by the catalog.
///
/// The primary rating applies when the participant plays `primary_role`; the
/// secondary rating applies to every other role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub primary_role: Role,
    pub primary_rating: u32,
    pub secondary_rating: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    /// Roles this participant never wants to be assigned.
    #[serde(default, skip_serializing_if = "no_roles")]
    pub excluded_roles: RoleSet,
}

impl Participant {
    /// Creates a participant with no match history, labels or exclusions.
    #[must_use]
    pub fn new(
        id: impl Into<ParticipantId>,
        name: impl Into<String>,
        primary_role: Role,
        primary_rating: u32,
        secondary_rating: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            primary_role,
            primary_rating,
            secondary_rating,
            wins: 0,
            losses: 0,
            labels: vec![],
            excluded_roles: RoleSet::EMPTY,
        }
    }

    /// Returns the rating field that applies when playing `role`.
    #[must_use]
    pub fn rating_field_for(&self, role: Role) -> RatingField {
        if role == self.primary_role {
            RatingField::Primary
        } else {
            RatingField::Secondary
        }
    }

    #[must_use]
    pub fn rating(&self, field: RatingField) -> u32 {
        match field {
            RatingField::Primary => self.primary_rating,
            RatingField::Secondary => self.secondary_rating,
        }
    }

    /// Returns the rating that applies when playing `role`.
    #[must_use]
    pub fn rating_for(&self, role: Role) -> u32 {
        self.rating(self.rating_field_for(role))
    }

    #[must_use]
    pub fn record(&self, field: RecordField) -> u32 {
        match field {
            RecordField::Wins => self.wins,
            RecordField::Losses => self.losses,
        }
    }

    #[must_use]
    pub fn games(&self) -> u32 {
        self.wins + self.losses
    }

    /// Win rate in whole percent, rounded to nearest; `0` with no games played.
    #[must_use]
    pub fn win_rate_percent(&self) -> u32 {
        let games = u64::from(self.games());
        if games == 0 {
            return 0;
        }
        let rate = (u64::from(self.wins) * 200 + games) / (games * 2);
        u32::try_from(rate).unwrap_or(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_for_primary_and_other_roles() {
        let p = Participant::new("p1", "Alice", Role::Mid, 1700, 1360);
        assert_eq!(p.rating_for(Role::Mid), 1700);
        assert_eq!(p.rating_for(Role::Top), 1360);
        assert_eq!(p.rating_field_for(Role::Sup), RatingField::Secondary);
    }

    #[test]
    fn test_win_rate_rounds_to_nearest_percent() {
        let mut p = Participant::new("p1", "Alice", Role::Mid, 1700, 1360);
        assert_eq!(p.win_rate_percent(), 0);
        p.wins = 2;
        p.losses = 1;
        assert_eq!(p.win_rate_percent(), 67);
        p.wins = 1;
        p.losses = 2;
        assert_eq!(p.win_rate_percent(), 33);
    }

    #[test]
    fn test_participant_json_defaults_optional_fields() {
        let json = r#"{
            "id": "p7",
            "name": "Grace",
            "primary_role": "ADC",
            "primary_rating": 1500,
            "secondary_rating": 1200
        }"#;
        let p: Participant = serde_json::from_str(json).unwrap();
        assert_eq!(p.id.as_str(), "p7");
        assert_eq!(p.primary_role, Role::Adc);
        assert_eq!(p.games(), 0);
        assert!(p.labels.is_empty());
        assert!(p.excluded_roles.is_empty());
    }

    #[test]
    fn test_empty_exclusions_are_omitted_from_json() {
        let mut p = Participant::new("p1", "Alice", Role::Mid, 1700, 1360);
        let value = serde_json::to_value(&p).unwrap();
        assert!(value.get("excluded_roles").is_none());
        assert!(value.get("labels").is_none());

        p.excluded_roles = RoleSet::from([Role::Sup, Role::Top]);
        let value = serde_json::to_value(&p).unwrap();
        assert_eq!(value["excluded_roles"], serde_json::json!(["TOP", "SUP"]));
        let back: Participant = serde_json::from_value(value).unwrap();
        assert_eq!(back, p);
    }
}
