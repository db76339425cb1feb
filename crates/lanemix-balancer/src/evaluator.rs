//! Scoring of candidate team pairs.
//!
//! A candidate is judged lexicographically:
//!
//! 1. more participants placed into a role they wished for or wanted is better
//! 2. on a tie, a smaller rating gap between the sides is better
//!
//! Candidates equal on both are interchangeable; which one a search keeps is
//! not specified.

use std::cmp::Ordering;

use lanemix_model::{Participant, Role, SessionSelection, Side, TeamAssignment, TeamPair};
use serde::Serialize;

/// Sum of each entry's rating for its assigned role.
#[must_use]
pub fn calculate_side_rating(side: &TeamAssignment) -> u32 {
    side.rating()
}

/// Objective values for one team pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    /// Side ratings, indexed A then B.
    pub side_ratings: [u32; 2],
    pub rating_gap: u32,
    /// Entries whose role matches the session wish or a wanted role.
    pub preference_count: usize,
    /// Entries playing their own primary role.
    pub primary_role_count: usize,
}

impl Evaluation {
    /// Evaluates placements of the form `(side, participant, role, prefers)`.
    #[must_use]
    pub fn from_placements<'a, I>(placements: I) -> Self
    where
        I: IntoIterator<Item = (Side, &'a Participant, Role, bool)>,
    {
        let mut side_ratings = [0; 2];
        let mut preference_count = 0;
        let mut primary_role_count = 0;
        for (side, participant, role, prefers) in placements {
            let slot = match side {
                Side::A => 0,
                Side::B => 1,
            };
            side_ratings[slot] = participant.rating_for(role).saturating_add(side_ratings[slot]);
            preference_count += usize::from(prefers);
            primary_role_count += usize::from(participant.primary_role == role);
        }
        Self {
            side_ratings,
            rating_gap: side_ratings[0].abs_diff(side_ratings[1]),
            preference_count,
            primary_role_count,
        }
    }

    /// Evaluates `teams`, looking up preferences in `selections` by
    /// participant id. Participants without a selection count as having no
    /// preference.
    #[must_use]
    pub fn of(teams: &TeamPair, selections: &[SessionSelection]) -> Self {
        Self::from_placements(teams.entries().map(|(side, entry)| {
            let prefers = selections
                .iter()
                .find(|s| s.participant.id == entry.participant.id)
                .is_some_and(|s| s.prefers(entry.role));
            (side, &entry.participant, entry.role, prefers)
        }))
    }

    #[must_use]
    pub fn side_rating(&self, side: Side) -> u32 {
        match side {
            Side::A => self.side_ratings[0],
            Side::B => self.side_ratings[1],
        }
    }

    /// Compares objective quality; `Greater` means `self` is the better candidate.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.preference_count
            .cmp(&other.preference_count)
            .then_with(|| other.rating_gap.cmp(&self.rating_gap))
    }

    /// Whether `self` should replace `best` as the retained candidate.
    ///
    /// Ties replace, so the most recently evaluated of equal candidates wins.
    #[must_use]
    pub fn replaces(&self, best: &Self) -> bool {
        self.compare(best).is_ge()
    }
}

#[cfg(test)]
mod tests {
    use lanemix_model::{TeamEntry, WishPriority};

    use super::*;

    fn primary_side(prefix: &str) -> Vec<TeamEntry> {
        Role::ALL
            .into_iter()
            .enumerate()
            .map(|(i, role)| {
                let id = format!("{prefix}{i}");
                TeamEntry::new(Participant::new(id.clone(), id, role, 1000, 800), role)
            })
            .collect()
    }

    fn eval(preference_count: usize, rating_gap: u32) -> Evaluation {
        Evaluation {
            side_ratings: [0, rating_gap],
            rating_gap,
            preference_count,
            primary_role_count: 0,
        }
    }

    #[test]
    fn test_all_primary_sides_rate_5000() {
        let pair = TeamPair::new(primary_side("a"), primary_side("b")).unwrap();
        assert_eq!(calculate_side_rating(pair.side(Side::A)), 5000);
        assert_eq!(calculate_side_rating(pair.side(Side::B)), 5000);

        let evaluation = Evaluation::of(&pair, &[]);
        assert_eq!(evaluation.rating_gap, 0);
        assert_eq!(evaluation.preference_count, 0);
        assert_eq!(evaluation.primary_role_count, 10);
    }

    #[test]
    fn test_huge_ratings_saturate_instead_of_overflowing() {
        let mut a = primary_side("a");
        for entry in &mut a {
            entry.participant.primary_rating = u32::MAX / 2;
        }
        let pair = TeamPair::new(a, primary_side("b")).unwrap();
        let evaluation = Evaluation::of(&pair, &[]);
        assert_eq!(evaluation.side_rating(Side::A), u32::MAX);
        assert_eq!(evaluation.rating_gap, u32::MAX - 5000);
    }

    #[test]
    fn test_preference_count_uses_wish_and_wanted() {
        let pair = TeamPair::new(primary_side("a"), primary_side("b")).unwrap();
        let a0 = pair.entry(Side::A, 0).unwrap();
        let b1 = pair.entry(Side::B, 1).unwrap();
        let b2 = pair.entry(Side::B, 2).unwrap();
        let selections = vec![
            SessionSelection::new(a0.participant.clone()).with_role_wish(a0.role, WishPriority::Low),
            SessionSelection::new(b1.participant.clone()).with_wanted_roles([b1.role]),
            SessionSelection::new(b2.participant.clone()).with_wanted_roles([Role::Sup]),
        ];
        assert_eq!(Evaluation::of(&pair, &selections).preference_count, 2);
    }

    #[test]
    fn test_higher_preference_count_beats_smaller_gap() {
        assert_eq!(eval(3, 900).compare(&eval(2, 0)), Ordering::Greater);
        assert!(!eval(2, 0).replaces(&eval(3, 900)));
    }

    #[test]
    fn test_smaller_gap_wins_on_preference_tie() {
        assert_eq!(eval(2, 100).compare(&eval(2, 300)), Ordering::Greater);
        assert!(!eval(2, 300).replaces(&eval(2, 100)));
    }

    #[test]
    fn test_full_tie_replaces() {
        assert_eq!(eval(1, 50).compare(&eval(1, 50)), Ordering::Equal);
        assert!(eval(1, 50).replaces(&eval(1, 50)));
    }
}
