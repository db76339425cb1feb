//! Randomized multi-restart construction of team pairs.
//!
//! Each trial builds one candidate:
//!
//! 1. Shuffle the five roles.
//! 2. Fill side A in that role order, drawing each role's candidate from its
//!    [`RolePools`] entry (best preference tier first, random inside a tier).
//! 3. Fill side B the same way from whoever is still unassigned.
//! 4. For every role still open, take the first unassigned participant who does
//!    not exclude it. If nobody qualifies the trial is discarded.
//! 5. Score the candidate and keep it if it [replaces](Evaluation::replaces)
//!    the best so far.
//!
//! Trials are independent and only read the shared pools, so the budget can be
//! split across scoped worker threads, each with its own PCG stream. Batches
//! are merged in worker order, which keeps seeded runs reproducible.

use std::{panic, thread};

use arrayvec::ArrayVec;
use lanemix_model::{
    Role, RoleSet, SessionSelection, Side, StructureError, TEAM_SIZE, TeamEntry, TeamPair,
};
use rand::{Rng, SeedableRng as _, seq::SliceRandom as _};
use rand_pcg::Pcg32;
use tracing::debug;

use crate::{GenerateError, eligibility::RolePools, evaluator::Evaluation};

#[derive(Debug, Clone, Copy)]
struct Slot {
    selection: usize,
    role: Role,
}

type SideSlots = ArrayVec<Slot, TEAM_SIZE>;

#[derive(Debug, Clone)]
struct Candidate {
    sides: [SideSlots; 2],
    evaluation: Evaluation,
}

#[derive(Debug, Default)]
struct TrialBatch {
    best: Option<Candidate>,
    completed: usize,
    unfilled: RoleSet,
}

impl TrialBatch {
    fn offer(&mut self, candidate: Candidate) {
        self.completed += 1;
        self.keep_if_better(candidate);
    }

    fn keep_if_better(&mut self, candidate: Candidate) {
        if self
            .best
            .as_ref()
            .is_none_or(|best| candidate.evaluation.replaces(&best.evaluation))
        {
            self.best = Some(candidate);
        }
    }

    fn merge(&mut self, other: Self) {
        self.completed += other.completed;
        self.unfilled = self.unfilled.union(other.unfilled);
        if let Some(candidate) = other.best {
            self.keep_if_better(candidate);
        }
    }
}

/// The best team pair found by a construction run.
#[derive(Debug, Clone)]
pub struct Construction {
    pub teams: TeamPair,
    pub evaluation: Evaluation,
    /// Trials that produced a complete pair.
    pub completed_trials: usize,
}

/// Builds team pairs for one fixed set of selections.
#[derive(Debug)]
pub struct Constructor<'a> {
    selections: &'a [SessionSelection],
    pools: RolePools,
}

impl<'a> Constructor<'a> {
    #[must_use]
    pub fn new(selections: &'a [SessionSelection]) -> Self {
        Self {
            selections,
            pools: RolePools::new(selections),
        }
    }

    /// Runs `trial_count` trials and returns the best complete pair.
    ///
    /// With `workers > 1` the trials are spread over that many threads; each
    /// worker's stream is seeded from `rng`.
    pub fn run<R>(
        &self,
        trial_count: usize,
        workers: usize,
        rng: &mut R,
    ) -> Result<Construction, GenerateError>
    where
        R: Rng,
    {
        let batch = if workers > 1 && trial_count > 1 {
            self.run_parallel(trial_count, workers, rng)
        } else {
            self.run_trials(trial_count, rng)
        };
        debug!(
            trial_count,
            completed = batch.completed,
            unfilled = %batch.unfilled,
            "construction finished"
        );

        let Some(best) = batch.best else {
            return Err(GenerateError::GenerationFailure {
                trials: trial_count,
                unfilled: batch.unfilled,
            });
        };
        let teams = self.to_team_pair(&best).map_err(GenerateError::Structure)?;
        Ok(Construction {
            teams,
            evaluation: best.evaluation,
            completed_trials: batch.completed,
        })
    }

    fn run_parallel<R>(&self, trial_count: usize, workers: usize, rng: &mut R) -> TrialBatch
    where
        R: Rng,
    {
        let workers = workers.min(trial_count);
        let streams = (0..workers)
            .map(|i| {
                let count = trial_count / workers + usize::from(i < trial_count % workers);
                (count, Pcg32::from_rng(rng))
            })
            .collect::<Vec<_>>();

        thread::scope(|s| {
            let handles = streams
                .into_iter()
                .map(|(count, mut stream)| s.spawn(move || self.run_trials(count, &mut stream)))
                .collect::<Vec<_>>();

            let mut total = TrialBatch::default();
            for handle in handles {
                match handle.join() {
                    Ok(batch) => total.merge(batch),
                    Err(payload) => panic::resume_unwind(payload),
                }
            }
            total
        })
    }

    fn run_trials<R>(&self, count: usize, rng: &mut R) -> TrialBatch
    where
        R: Rng + ?Sized,
    {
        let mut batch = TrialBatch::default();
        for _ in 0..count {
            match self.run_trial(rng) {
                Ok(candidate) => batch.offer(candidate),
                Err(unfilled) => batch.unfilled = batch.unfilled.union(unfilled),
            }
        }
        batch
    }

    /// Builds one candidate, or returns the roles that could not be filled.
    fn run_trial<R>(&self, rng: &mut R) -> Result<Candidate, RoleSet>
    where
        R: Rng + ?Sized,
    {
        let mut order = Role::ALL;
        order.shuffle(rng);

        let mut assigned = vec![false; self.selections.len()];
        let mut sides = [SideSlots::new(), SideSlots::new()];
        for side in &mut sides {
            for role in order {
                if let Some(selection) = self.pools.draw(role, &assigned, rng) {
                    assigned[selection] = true;
                    side.push(Slot { selection, role });
                }
            }
        }

        let mut unfilled = RoleSet::EMPTY;
        for side in &mut sides {
            let filled = side.iter().map(|slot| slot.role).collect::<RoleSet>();
            for role in order.into_iter().filter(|role| !filled.contains(*role)) {
                let fallback = self
                    .selections
                    .iter()
                    .enumerate()
                    .position(|(i, sel)| !assigned[i] && !sel.excludes(role));
                match fallback {
                    Some(selection) => {
                        assigned[selection] = true;
                        side.push(Slot { selection, role });
                    }
                    None => {
                        unfilled.insert(role);
                    }
                }
            }
        }
        if !unfilled.is_empty() {
            return Err(unfilled);
        }

        let evaluation = self.evaluate(&sides);
        Ok(Candidate { sides, evaluation })
    }

    fn evaluate(&self, sides: &[SideSlots; 2]) -> Evaluation {
        Evaluation::from_placements(Side::ALL.into_iter().zip(sides).flat_map(|(side, slots)| {
            slots.iter().map(move |slot| {
                let sel = &self.selections[slot.selection];
                (side, &sel.participant, slot.role, sel.prefers(slot.role))
            })
        }))
    }

    fn to_team_pair(&self, candidate: &Candidate) -> Result<TeamPair, StructureError> {
        let [a, b] = candidate.sides.clone().map(|mut slots| {
            slots.sort_by_key(|slot| slot.role);
            slots
                .into_iter()
                .map(|slot| {
                    let participant = self.selections[slot.selection].participant.clone();
                    TeamEntry::new(participant, slot.role)
                })
                .collect::<Vec<_>>()
        });
        TeamPair::new(a, b)
    }
}

#[cfg(test)]
mod tests {
    use lanemix_model::{Participant, WishPriority};
    use rand::SeedableRng as _;

    use super::*;

    fn selections(ratings: &[u32]) -> Vec<SessionSelection> {
        ratings
            .iter()
            .enumerate()
            .map(|(i, rating)| {
                let id = format!("p{i}");
                let role = Role::ALL[i % Role::LEN];
                SessionSelection::new(Participant::new(id.clone(), id, role, *rating, *rating))
            })
            .collect()
    }

    fn assert_valid(sels: &[SessionSelection], teams: &TeamPair) {
        assert_eq!(teams.entries().count(), 10);
        for side in Side::ALL {
            assert_eq!(teams.side(side).roles(), RoleSet::FULL);
        }
        assert!(teams.exclusion_violations(sels).is_empty());
    }

    #[test]
    fn test_every_result_is_valid_under_random_exclusions() {
        let mut rng = Pcg32::seed_from_u64(2024);
        for _ in 0..50 {
            let sels = selections(&[1000; 10])
                .into_iter()
                .map(|sel| {
                    let excluded = Role::ALL
                        .into_iter()
                        .filter(|_| rng.random_bool(0.3))
                        .collect::<RoleSet>();
                    sel.with_excluded_roles(excluded)
                })
                .collect::<Vec<_>>();
            match Constructor::new(&sels).run(100, 1, &mut rng) {
                Ok(construction) => assert_valid(&sels, &construction.teams),
                Err(err) => assert!(matches!(err, GenerateError::GenerationFailure { .. })),
            }
        }
    }

    #[test]
    fn test_distinct_wishes_are_all_satisfied() {
        let sels = selections(&[1000; 10])
            .into_iter()
            .enumerate()
            .map(|(i, sel)| sel.with_role_wish(Role::ALL[(i + 2) % Role::LEN], WishPriority::High))
            .collect::<Vec<_>>();
        let mut rng = Pcg32::seed_from_u64(1);
        let construction = Constructor::new(&sels).run(10, 1, &mut rng).unwrap();
        assert_eq!(construction.evaluation.preference_count, 10);
        assert_eq!(construction.completed_trials, 10);
        assert_valid(&sels, &construction.teams);
    }

    #[test]
    fn test_matches_exhaustive_best_gap() {
        let ratings = [1510, 1220, 2040, 980, 1775, 1330, 2260, 1405, 1890, 1115];
        let sels = selections(&ratings);

        // Ratings are role-independent here, so only the split matters.
        let total: u32 = ratings.iter().sum();
        let mut best_gap = u32::MAX;
        let mut worst_gap = 0;
        for mask in 0_u32..1 << 10 {
            if mask.count_ones() != 5 {
                continue;
            }
            let side_a: u32 = (0..10)
                .filter(|i| mask & (1 << i) != 0)
                .map(|i| ratings[i])
                .sum();
            let gap = side_a.abs_diff(total - side_a);
            best_gap = best_gap.min(gap);
            worst_gap = worst_gap.max(gap);
        }

        let mut rng = Pcg32::seed_from_u64(99);
        let construction = Constructor::new(&sels).run(2000, 1, &mut rng).unwrap();
        assert!(construction.evaluation.rating_gap <= worst_gap);
        assert_eq!(construction.evaluation.rating_gap, best_gap);
        assert_eq!(construction.teams.rating_gap(), best_gap);
    }

    #[test]
    fn test_unsatisfiable_selections_fail() {
        // Three participants can only play TOP, but only two TOP slots exist.
        let sels = selections(&[1000; 10])
            .into_iter()
            .enumerate()
            .map(|(i, sel)| {
                if i < 3 {
                    sel.with_excluded_roles([Role::Jungle, Role::Mid, Role::Adc, Role::Sup])
                } else {
                    sel
                }
            })
            .collect::<Vec<_>>();
        let mut rng = Pcg32::seed_from_u64(5);
        let err = Constructor::new(&sels).run(100, 1, &mut rng).unwrap_err();
        let GenerateError::GenerationFailure { trials, unfilled } = err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(trials, 100);
        assert!(!unfilled.is_empty());
    }

    #[test]
    fn test_parallel_run_is_reproducible() {
        let sels = selections(&[1510, 1220, 2040, 980, 1775, 1330, 2260, 1405, 1890, 1115]);
        let run = |seed| {
            let mut rng = Pcg32::seed_from_u64(seed);
            Constructor::new(&sels).run(400, 4, &mut rng).unwrap()
        };
        let first = run(8);
        let second = run(8);
        assert_eq!(first.teams, second.teams);
        assert_eq!(first.completed_trials, 400);
        assert_valid(&sels, &first.teams);
    }

    #[test]
    fn test_entries_are_listed_in_role_order() {
        let sels = selections(&[1000; 10]);
        let mut rng = Pcg32::seed_from_u64(3);
        let construction = Constructor::new(&sels).run(5, 1, &mut rng).unwrap();
        for side in Side::ALL {
            let roles = construction
                .teams
                .side(side)
                .iter()
                .map(|e| e.role)
                .collect::<Vec<_>>();
            assert_eq!(roles, Role::ALL);
        }
    }
}
