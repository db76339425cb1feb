//! Role-aware team balancing.
//!
//! Assigns ten selected participants to two five-role teams while
//!
//! 1. never placing anyone into a role their session excludes (hard constraint),
//! 2. maximizing how many participants get a wished-for or wanted role, then
//! 3. minimizing the rating gap between the sides.
//!
//! # Architecture
//!
//! ```text
//! SessionSelection x 10
//!     ↓ checked by
//! validator (over-excluded roles)
//!     ↓ grouped by
//! eligibility (per-role pools, preference tiers)
//!     ↓ sampled by
//! constructor (randomized multi-restart trials)
//!     ↓ scored by
//! evaluator (preference count, rating gap)
//!     ↓ produces
//! TeamPair ── optionally edited by adjust (swap / reassign)
//! ```
//!
//! The search is a bounded heuristic: it returns the best pair found within
//! the trial budget, not a proven optimum.
//!
//! # Example
//!
//! ```
//! use lanemix_balancer::{BalancerConfig, GenerationMode, validate_and_generate};
//! use lanemix_model::{Participant, Role, SessionSelection};
//!
//! let selections = (0..10)
//!     .map(|i| {
//!         let role = Role::ALL[i % Role::LEN];
//!         let id = format!("p{i}");
//!         SessionSelection::new(Participant::new(id.clone(), id, role, 1500, 1200))
//!     })
//!     .collect::<Vec<_>>();
//!
//! let config = BalancerConfig { seed: Some(7), ..BalancerConfig::default() };
//! let generated = validate_and_generate(&selections, &config, GenerationMode::Strict).unwrap();
//! assert_eq!(generated.teams.entries().count(), 10);
//! ```

use std::collections::HashSet;

use lanemix_model::{ROSTER_SIZE, SessionSelection};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;
use tracing::debug;

pub use self::{
    config::{BalancerConfig, GenerationMode},
    constructor::Construction,
    error::GenerateError,
};

pub mod adjust;
mod config;
pub mod constructor;
pub mod eligibility;
mod error;
pub mod evaluator;
pub mod validator;

/// Checks the selections and builds the best team pair found within the
/// configured trial budget.
///
/// In [`GenerationMode::Relaxed`] the exclusion pre-check is skipped and
/// session exclusions are ignored during construction.
pub fn validate_and_generate(
    selections: &[SessionSelection],
    config: &BalancerConfig,
    mode: GenerationMode,
) -> Result<Construction, GenerateError> {
    if selections.len() != ROSTER_SIZE {
        return Err(GenerateError::SelectionCount {
            actual: selections.len(),
        });
    }
    let mut seen = HashSet::with_capacity(ROSTER_SIZE);
    if let Some(dup) = selections.iter().find(|s| !seen.insert(&s.participant.id)) {
        return Err(GenerateError::DuplicateParticipant {
            id: dup.participant.id.clone(),
        });
    }

    let relaxed;
    let selections = match mode {
        GenerationMode::Strict => {
            validator::check_feasibility(selections, config.exclusion_threshold)?;
            selections
        }
        GenerationMode::Relaxed => {
            relaxed = selections
                .iter()
                .map(SessionSelection::relaxed)
                .collect::<Vec<_>>();
            &relaxed
        }
    };

    let mut rng = match config.seed {
        Some(seed) => Pcg32::seed_from_u64(seed),
        None => Pcg32::from_os_rng(),
    };
    debug!(%mode, trial_count = config.trial_count, workers = config.workers, "generating teams");
    constructor::Constructor::new(selections).run(config.trial_count, config.workers, &mut rng)
}

#[cfg(test)]
mod tests {
    use lanemix_model::{Participant, Role, RoleSet, Side};

    use super::*;

    fn selections() -> Vec<SessionSelection> {
        (0..10)
            .map(|i| {
                let id = format!("p{i}");
                let role = Role::ALL[i % Role::LEN];
                let rating = 1200 + u32::try_from(i).unwrap() * 90;
                SessionSelection::new(Participant::new(id.clone(), id, role, rating, rating - 200))
            })
            .collect()
    }

    fn seeded() -> BalancerConfig {
        BalancerConfig {
            seed: Some(11),
            ..BalancerConfig::default()
        }
    }

    fn exclude_jungle(count: usize) -> Vec<SessionSelection> {
        selections()
            .into_iter()
            .enumerate()
            .map(|(i, s)| if i < count { s.with_excluded_roles([Role::Jungle]) } else { s })
            .collect()
    }

    #[test]
    fn test_rejects_wrong_selection_count() {
        let mut sels = selections();
        sels.pop();
        let err = validate_and_generate(&sels, &seeded(), GenerationMode::Strict).unwrap_err();
        assert_eq!(err, GenerateError::SelectionCount { actual: 9 });
    }

    #[test]
    fn test_rejects_duplicate_participant() {
        let mut sels = selections();
        sels[9] = sels[0].clone();
        let err = validate_and_generate(&sels, &seeded(), GenerationMode::Strict).unwrap_err();
        assert!(matches!(err, GenerateError::DuplicateParticipant { .. }));
    }

    #[test]
    fn test_eight_jungle_exclusions_short_circuit() {
        let err = validate_and_generate(&exclude_jungle(8), &seeded(), GenerationMode::Strict)
            .unwrap_err();
        assert_eq!(
            err,
            GenerateError::InfeasibleConstraints {
                roles: RoleSet::from([Role::Jungle])
            }
        );
    }

    #[test]
    fn test_seven_jungle_exclusions_reach_construction() {
        let sels = exclude_jungle(7);
        match validate_and_generate(&sels, &seeded(), GenerationMode::Strict) {
            Ok(generated) => assert!(generated.teams.exclusion_violations(&sels).is_empty()),
            Err(err) => assert!(matches!(err, GenerateError::GenerationFailure { .. })),
        }
    }

    #[test]
    fn test_relaxed_mode_ignores_exclusions() {
        let sels = exclude_jungle(10);
        let generated = validate_and_generate(&sels, &seeded(), GenerationMode::Relaxed).unwrap();
        for side in Side::ALL {
            assert_eq!(generated.teams.side(side).roles(), RoleSet::FULL);
        }
        // Two participants must be playing JUNGLE despite excluding it.
        assert_eq!(generated.teams.exclusion_violations(&sels).len(), 2);
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let sels = selections();
        let first = validate_and_generate(&sels, &seeded(), GenerationMode::Strict).unwrap();
        let second = validate_and_generate(&sels, &seeded(), GenerationMode::Strict).unwrap();
        assert_eq!(first.teams, second.teams);
        assert_eq!(first.evaluation, second.evaluation);
    }

    #[test]
    fn test_returned_evaluation_matches_teams() {
        let sels = selections();
        let generated = validate_and_generate(&sels, &seeded(), GenerationMode::Strict).unwrap();
        let recomputed = evaluator::Evaluation::of(&generated.teams, &sels);
        assert_eq!(recomputed, generated.evaluation);
    }
}
