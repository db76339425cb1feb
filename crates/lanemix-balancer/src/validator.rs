use lanemix_model::{Role, RoleSet, SessionSelection};

use crate::GenerateError;

/// Counts, per role, how many selections exclude it. Indexed by [`Role::index`].
#[must_use]
pub fn exclusion_counts(selections: &[SessionSelection]) -> [usize; Role::LEN] {
    Role::ALL.map(|role| selections.iter().filter(|s| s.excludes(role)).count())
}

/// Roles excluded by at least `threshold` selections.
#[must_use]
pub fn over_excluded_roles(selections: &[SessionSelection], threshold: usize) -> RoleSet {
    let counts = exclusion_counts(selections);
    Role::ALL
        .into_iter()
        .filter(|role| counts[role.index()] >= threshold)
        .collect()
}

/// Rejects selections where some role is excluded by too many participants
/// to ever be filled on both sides.
///
/// Passing this check does not guarantee construction succeeds.
pub fn check_feasibility(
    selections: &[SessionSelection],
    threshold: usize,
) -> Result<(), GenerateError> {
    let roles = over_excluded_roles(selections, threshold);
    if roles.is_empty() {
        Ok(())
    } else {
        Err(GenerateError::InfeasibleConstraints { roles })
    }
}
