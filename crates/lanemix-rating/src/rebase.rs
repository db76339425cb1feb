use lanemix_model::RatingField;
use tracing::info;

use crate::repository::{PersistenceError, Repository};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RebaseError {
    #[display("secondary rating percent must be within 0..=100, got {percent}")]
    InvalidPercent { percent: u32 },
    #[display("failed to rebase secondary ratings: {_0}")]
    Persistence(PersistenceError),
}

/// Resets every participant's secondary rating to `percent` of their primary
/// rating, rounded to nearest.
///
/// Returns how many participants actually changed. Stops at the first failed
/// write; updates issued before it remain applied.
pub fn rebase_secondary_ratings<R>(repo: &R, percent: u32) -> Result<usize, RebaseError>
where
    R: Repository + ?Sized,
{
    if percent > 100 {
        return Err(RebaseError::InvalidPercent { percent });
    }
    let participants = repo.list_participants().map_err(RebaseError::Persistence)?;
    let mut updated = 0;
    for participant in &participants {
        let target = scaled(participant.primary_rating, percent);
        if target == participant.secondary_rating {
            continue;
        }
        repo.update_participant_rating(&participant.id, RatingField::Secondary, target)
            .map_err(RebaseError::Persistence)?;
        updated += 1;
    }
    info!(percent, updated, total = participants.len(), "secondary ratings rebased");
    Ok(updated)
}

fn scaled(rating: u32, percent: u32) -> u32 {
    let value = (u64::from(rating) * u64::from(percent) + 50) / 100;
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use lanemix_model::{Participant, Role};

    use super::*;
    use crate::repository::InMemoryRepository;

    #[test]
    fn test_rebase_scales_from_primary() {
        let repo = InMemoryRepository::new(
            vec![
                Participant::new("p1", "Alice", Role::Top, 1500, 1000),
                Participant::new("p2", "Bob", Role::Sup, 1255, 1004),
                Participant::new("p3", "Carol", Role::Mid, 2000, 1800),
            ],
            vec![],
        );
        assert_eq!(rebase_secondary_ratings(&repo, 90).unwrap(), 2);

        let secondaries = repo
            .list_participants()
            .unwrap()
            .into_iter()
            .map(|p| p.secondary_rating)
            .collect::<Vec<_>>();
        // 1255 * 0.9 = 1129.5 rounds up.
        assert_eq!(secondaries, [1350, 1130, 1800]);
    }

    #[test]
    fn test_rebase_rejects_percent_above_hundred() {
        let repo = InMemoryRepository::default();
        assert_eq!(
            rebase_secondary_ratings(&repo, 120),
            Err(RebaseError::InvalidPercent { percent: 120 })
        );
    }
}
