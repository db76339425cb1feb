use lanemix_model::{Participant, RatingField};
use serde::{Deserialize, Serialize};

use crate::repository::PersistenceError;

/// Rating update rules applied when a match result is reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Points added to each winner's applicable rating and removed from each
    /// loser's.
    pub delta: u32,
    /// Upper bound for any rating; the lower bound is zero.
    pub ceiling: u32,
}

impl RatingConfig {
    pub const DEFAULT_DELTA: u32 = 50;
    pub const DEFAULT_CEILING: u32 = 10_000;

    /// Applies one win or loss to `rating`.
    ///
    /// A win never lowers a rating and a loss never raises it. Results stay
    /// within `0..=ceiling` whenever `rating` does.
    #[must_use]
    pub fn apply(&self, rating: u32, won: bool) -> u32 {
        if !won {
            rating.saturating_sub(self.delta)
        } else if rating >= self.ceiling {
            rating
        } else {
            rating.saturating_add(self.delta).min(self.ceiling)
        }
    }

    /// Rejects a roster holding a rating above the ceiling.
    pub fn check_roster(&self, participants: &[Participant]) -> Result<(), PersistenceError> {
        for p in participants {
            for field in [RatingField::Primary, RatingField::Secondary] {
                let value = p.rating(field);
                if value > self.ceiling {
                    return Err(PersistenceError::RatingOutOfRange {
                        id: p.id.clone(),
                        field,
                        value,
                        ceiling: self.ceiling,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            delta: Self::DEFAULT_DELTA,
            ceiling: Self::DEFAULT_CEILING,
        }
    }
}
