//! Per-role candidate pools.
//!
//! For every role, the pool lists the selections that have not excluded it,
//! grouped into tiers that bias which candidate is drawn first:
//!
//! 1. the role is the participant's session wish (`HIGH`, then `MEDIUM`, then `LOW`)
//! 2. the role is in the participant's wanted set
//! 3. everyone else
//!
//! Order inside a tier is left to the caller; [`RolePools::draw`] shuffles
//! each tier per draw.

use lanemix_model::{Role, SessionSelection, WishPriority};
use rand::{Rng, seq::SliceRandom as _};

/// How a selection relates to a role it is eligible for.
///
/// Ordered from most to least preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, derive_more::IsVariant)]
pub enum Eligibility {
    Wished(WishPriority),
    Wanted,
    Open,
}

impl Eligibility {
    /// Classifies `selection` for `role`, or `None` if the role is excluded.
    #[must_use]
    pub fn of(selection: &SessionSelection, role: Role) -> Option<Self> {
        if selection.excludes(role) {
            return None;
        }
        let tier = if let Some(priority) = selection.wish_priority_for(role) {
            Self::Wished(priority)
        } else if selection.wants(role) {
            Self::Wanted
        } else {
            Self::Open
        };
        Some(tier)
    }
}

/// Eligible selections for each role, as indices into the selection slice.
///
/// Pools are an immutable snapshot of the selections they were built from and
/// can be shared across trial workers.
#[derive(Debug, Clone)]
pub struct RolePools {
    pools: [Vec<(Eligibility, usize)>; Role::LEN],
}

impl RolePools {
    #[must_use]
    pub fn new(selections: &[SessionSelection]) -> Self {
        let pools = Role::ALL.map(|role| {
            let mut pool = selections
                .iter()
                .enumerate()
                .filter_map(|(i, sel)| Eligibility::of(sel, role).map(|tier| (tier, i)))
                .collect::<Vec<_>>();
            pool.sort_by_key(|(tier, _)| *tier);
            pool
        });
        Self { pools }
    }

    /// Eligible selections for `role`, most preferred tier first.
    pub fn pool(&self, role: Role) -> impl Iterator<Item = (usize, Eligibility)> + '_ {
        self.pools[role.index()].iter().map(|(tier, i)| (*i, *tier))
    }

    /// Picks an unassigned candidate for `role`.
    ///
    /// Candidates are shuffled and then stably ordered by tier, so the pick is
    /// uniform within the best non-empty tier.
    pub fn draw<R>(&self, role: Role, assigned: &[bool], rng: &mut R) -> Option<usize>
    where
        R: Rng + ?Sized,
    {
        let mut candidates = self.pools[role.index()]
            .iter()
            .filter(|(_, i)| !assigned[*i])
            .copied()
            .collect::<Vec<_>>();
        candidates.shuffle(rng);
        candidates.sort_by_key(|(tier, _)| *tier);
        candidates.first().map(|(_, i)| *i)
    }
}
