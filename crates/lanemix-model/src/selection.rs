use serde::{Deserialize, Serialize};

use crate::{Participant, Role, RoleSet};

/// How strongly a participant wants their session role wish honoured.
///
/// Ordered from strongest to weakest, so sorting ascending puts `High` first.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum WishPriority {
    #[display("HIGH")]
    High,
    #[default]
    #[display("MEDIUM")]
    Medium,
    #[display("LOW")]
    Low,
}

/// A single role a participant asked to play in this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleWish {
    pub role: Role,
    #[serde(default)]
    pub priority: WishPriority,
}

/// A participant picked for one team-building session, with the
/// session-scoped preferences that steer assignment.
///
/// Selections are never persisted; edits to `excluded_roles` here do not
/// touch the participant's stored exclusion set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSelection {
    pub participant: Participant,
    #[serde(default)]
    pub excluded_roles: RoleSet,
    #[serde(default)]
    pub wanted_roles: RoleSet,
    #[serde(default)]
    pub role_wish: Option<RoleWish>,
}

impl SessionSelection {
    /// Selects `participant`, starting from their persisted exclusion set.
    #[must_use]
    pub fn new(participant: Participant) -> Self {
        let excluded_roles = participant.excluded_roles;
        Self {
            participant,
            excluded_roles,
            wanted_roles: RoleSet::EMPTY,
            role_wish: None,
        }
    }

    #[must_use]
    pub fn with_excluded_roles(mut self, roles: impl Into<RoleSet>) -> Self {
        self.excluded_roles = roles.into();
        self
    }

    #[must_use]
    pub fn with_wanted_roles(mut self, roles: impl Into<RoleSet>) -> Self {
        self.wanted_roles = roles.into();
        self
    }

    #[must_use]
    pub fn with_role_wish(mut self, role: Role, priority: WishPriority) -> Self {
        self.role_wish = Some(RoleWish { role, priority });
        self
    }

    #[must_use]
    pub fn excludes(&self, role: Role) -> bool {
        self.excluded_roles.contains(role)
    }

    /// Returns the wish priority if `role` is this session's role wish.
    #[must_use]
    pub fn wish_priority_for(&self, role: Role) -> Option<WishPriority> {
        self.role_wish
            .filter(|wish| wish.role == role)
            .map(|wish| wish.priority)
    }

    #[must_use]
    pub fn wants(&self, role: Role) -> bool {
        self.wanted_roles.contains(role)
    }

    /// Whether being assigned `role` satisfies this participant's preferences.
    #[must_use]
    pub fn prefers(&self, role: Role) -> bool {
        self.wish_priority_for(role).is_some() || self.wants(role)
    }

    /// Returns a copy with the session exclusion set cleared.
    #[must_use]
    pub fn relaxed(&self) -> Self {
        Self {
            excluded_roles: RoleSet::EMPTY,
            ..self.clone()
        }
    }
}
