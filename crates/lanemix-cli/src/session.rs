//! Session files: which ten participants play, and what each of them asks for
//! this time.

use std::collections::HashMap;

use anyhow::{Context as _, bail};
use lanemix_model::{Participant, ParticipantId, Role, RoleSet, SessionSelection, WishPriority};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionEntry {
    pub participant: ParticipantId,
    /// Replaces the participant's persisted exclusions when present.
    #[serde(default)]
    pub excluded_roles: Option<RoleSet>,
    #[serde(default)]
    pub wanted_roles: RoleSet,
    #[serde(default)]
    pub role_wish: Option<Role>,
    #[serde(default)]
    pub wish_priority: Option<WishPriority>,
}

impl SessionEntry {
    fn to_selection(&self, participant: &Participant) -> anyhow::Result<SessionSelection> {
        let mut selection =
            SessionSelection::new(participant.clone()).with_wanted_roles(self.wanted_roles);
        if let Some(excluded) = self.excluded_roles {
            selection = selection.with_excluded_roles(excluded);
        }
        match (self.role_wish, self.wish_priority) {
            (Some(role), priority) => {
                selection = selection.with_role_wish(role, priority.unwrap_or_default());
            }
            (None, Some(_)) => bail!("wish_priority is set but role_wish is missing"),
            (None, None) => {}
        }
        Ok(selection)
    }
}

/// Looks every session entry up in `roster` and builds its selection.
pub fn resolve_selections(
    entries: &[SessionEntry],
    roster: &[Participant],
) -> anyhow::Result<Vec<SessionSelection>> {
    let by_id = roster
        .iter()
        .map(|p| (&p.id, p))
        .collect::<HashMap<_, _>>();
    entries
        .iter()
        .map(|entry| {
            let participant = by_id
                .get(&entry.participant)
                .with_context(|| format!("participant {} is not in the roster", entry.participant))?;
            entry
                .to_selection(participant)
                .with_context(|| format!("invalid session entry for {}", entry.participant))
        })
        .collect()
}
