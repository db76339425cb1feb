//! Manual edits to a generated team pair.
//!
//! Every operation takes a pair by reference and returns a new one; the input
//! is never modified, and on error the caller still holds it unchanged.
//!
//! [`swap`] and [`reassign_role`] keep the structural invariants but do not
//! look at session exclusions. The `_checked` variants additionally reject an
//! edit that places a participant into a role their selection excludes.

use lanemix_model::{Role, SessionSelection, Side, StructureError, TeamEntry, TeamPair};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum AdjustError {
    #[display("side {side} has no entry at index {index}")]
    IndexOutOfRange { side: Side, index: usize },
    #[display("role {role} is already used by entry {conflicting_index} on side {side}")]
    StructuralConflict {
        side: Side,
        role: Role,
        conflicting_index: usize,
    },
    #[display("entry {index} on side {side} would play excluded role {role}")]
    ExcludedRole { side: Side, index: usize, role: Role },
    #[display("adjusted teams are malformed: {_0}")]
    Structure(StructureError),
}

fn side_entries<'a>(
    a: &'a mut [TeamEntry],
    b: &'a mut [TeamEntry],
    side: Side,
) -> &'a mut [TeamEntry] {
    match side {
        Side::A => a,
        Side::B => b,
    }
}

fn entry(teams: &TeamPair, side: Side, index: usize) -> Result<&TeamEntry, AdjustError> {
    teams
        .entry(side, index)
        .ok_or(AdjustError::IndexOutOfRange { side, index })
}

/// Exchanges the participants at two positions.
///
/// Roles stay with their slots, so each participant takes over the role the
/// other one held. Applying the same swap twice restores the original pair.
pub fn swap(
    teams: &TeamPair,
    side_x: Side,
    index_x: usize,
    side_y: Side,
    index_y: usize,
) -> Result<TeamPair, AdjustError> {
    let first = entry(teams, side_x, index_x)?.participant.clone();
    let second = entry(teams, side_y, index_y)?.participant.clone();

    let (mut a, mut b) = teams.to_entries();
    side_entries(&mut a, &mut b, side_x)[index_x].participant = second;
    side_entries(&mut a, &mut b, side_y)[index_y].participant = first;
    TeamPair::new(a, b).map_err(AdjustError::Structure)
}

/// Changes the role of one entry.
///
/// Rejected with [`AdjustError::StructuralConflict`] when another entry on the
/// same side already plays `new_role`. Because both sides always cover every
/// role, only a no-op reassignment can succeed on a complete pair; exchanging
/// roles between two entries of one side is done with [`swap`].
pub fn reassign_role(
    teams: &TeamPair,
    side: Side,
    index: usize,
    new_role: Role,
) -> Result<TeamPair, AdjustError> {
    entry(teams, side, index)?;
    if let Some(conflicting_index) = teams
        .side(side)
        .iter()
        .enumerate()
        .position(|(i, e)| i != index && e.role == new_role)
    {
        return Err(AdjustError::StructuralConflict {
            side,
            role: new_role,
            conflicting_index,
        });
    }

    let (mut a, mut b) = teams.to_entries();
    side_entries(&mut a, &mut b, side)[index].role = new_role;
    TeamPair::new(a, b).map_err(AdjustError::Structure)
}

fn ensure_allowed(
    teams: &TeamPair,
    selections: &[SessionSelection],
    edited: &[(Side, usize)],
) -> Result<(), AdjustError> {
    for violation in teams.exclusion_violations(selections) {
        if edited.contains(&(violation.side, violation.index)) {
            return Err(AdjustError::ExcludedRole {
                side: violation.side,
                index: violation.index,
                role: violation.role,
            });
        }
    }
    Ok(())
}

/// [`swap`] that also rejects placing either participant into a role
/// excluded by their session selection.
pub fn swap_checked(
    teams: &TeamPair,
    selections: &[SessionSelection],
    side_x: Side,
    index_x: usize,
    side_y: Side,
    index_y: usize,
) -> Result<TeamPair, AdjustError> {
    let swapped = swap(teams, side_x, index_x, side_y, index_y)?;
    ensure_allowed(&swapped, selections, &[(side_x, index_x), (side_y, index_y)])?;
    Ok(swapped)
}

/// [`reassign_role`] that also rejects a role excluded by the participant's
/// session selection.
pub fn reassign_role_checked(
    teams: &TeamPair,
    selections: &[SessionSelection],
    side: Side,
    index: usize,
    new_role: Role,
) -> Result<TeamPair, AdjustError> {
    let reassigned = reassign_role(teams, side, index, new_role)?;
    ensure_allowed(&reassigned, selections, &[(side, index)])?;
    Ok(reassigned)
}

#[cfg(test)]
mod tests {
    use lanemix_model::Participant;

    use super::*;

    fn teams() -> TeamPair {
        let side = |prefix: &str, rating: u32| {
            Role::ALL
                .into_iter()
                .enumerate()
                .map(|(i, role)| {
                    let id = format!("{prefix}{i}");
                    TeamEntry::new(Participant::new(id.clone(), id, role, rating, rating - 200), role)
                })
                .collect::<Vec<_>>()
        };
        TeamPair::new(side("a", 1000), side("b", 1200)).unwrap()
    }

    #[test]
    fn test_swap_moves_participants_and_keeps_roles() {
        let original = teams();
        let swapped = swap(&original, Side::A, 0, Side::B, 3).unwrap();

        let a0 = swapped.entry(Side::A, 0).unwrap();
        let b3 = swapped.entry(Side::B, 3).unwrap();
        assert_eq!(a0.participant.id.as_str(), "b3");
        assert_eq!(a0.role, Role::Top);
        assert_eq!(b3.participant.id.as_str(), "a0");
        assert_eq!(b3.role, Role::Adc);
        // Both now play off their primary role.
        assert_eq!(swapped.side_rating(Side::A), 4000 + 1000);
        assert_eq!(swapped.side_rating(Side::B), 4800 + 800);
    }

    #[test]
    fn test_swap_is_self_inverse() {
        let original = teams();
        let once = swap(&original, Side::A, 0, Side::B, 0).unwrap();
        assert_ne!(once, original);
        let twice = swap(&once, Side::A, 0, Side::B, 0).unwrap();
        assert_eq!(twice, original);
    }

    #[test]
    fn test_swap_within_one_side_exchanges_roles() {
        let swapped = swap(&teams(), Side::B, 1, Side::B, 4).unwrap();
        assert_eq!(swapped.entry(Side::B, 1).unwrap().participant.id.as_str(), "b4");
        assert_eq!(swapped.entry(Side::B, 1).unwrap().role, Role::Jungle);
        assert_eq!(swapped.entry(Side::B, 4).unwrap().participant.id.as_str(), "b1");
    }

    #[test]
    fn test_swap_rejects_bad_index() {
        let err = swap(&teams(), Side::A, 5, Side::B, 0).unwrap_err();
        assert_eq!(err, AdjustError::IndexOutOfRange { side: Side::A, index: 5 });
    }

    #[test]
    fn test_reassign_to_used_role_is_conflict_and_leaves_input() {
        let original = teams();
        let before = original.clone();
        let err = reassign_role(&original, Side::A, 0, Role::Mid).unwrap_err();
        assert_eq!(
            err,
            AdjustError::StructuralConflict {
                side: Side::A,
                role: Role::Mid,
                conflicting_index: 2
            }
        );
        assert_eq!(original, before);
    }

    #[test]
    fn test_reassign_to_same_role_is_noop() {
        let original = teams();
        assert_eq!(reassign_role(&original, Side::B, 2, Role::Mid).unwrap(), original);
    }

    #[test]
    fn test_swap_checked_rejects_excluded_role() {
        let original = teams();
        let a0 = original.entry(Side::A, 0).unwrap().participant.clone();
        let selections = vec![SessionSelection::new(a0).with_excluded_roles([Role::Sup])];

        let err = swap_checked(&original, &selections, Side::A, 0, Side::B, 4).unwrap_err();
        assert_eq!(
            err,
            AdjustError::ExcludedRole {
                side: Side::B,
                index: 4,
                role: Role::Sup
            }
        );
        assert!(swap_checked(&original, &selections, Side::A, 0, Side::B, 1).is_ok());
        // The unchecked variant allows it.
        assert!(swap(&original, Side::A, 0, Side::B, 4).is_ok());
    }

    #[test]
    fn test_reassign_checked_passes_noop() {
        let original = teams();
        let selections = original.to_selections();
        assert!(reassign_role_checked(&original, &selections, Side::A, 1, Role::Jungle).is_ok());
    }
}
