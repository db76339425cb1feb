//! Read-only summaries of the roster.

use std::cmp::Reverse;

use lanemix_model::{Participant, ParticipantId, Role};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub participant_id: ParticipantId,
    pub name: String,
    pub primary_role: Role,
    pub primary_rating: u32,
    pub secondary_rating: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate_percent: u32,
}

impl From<&Participant> for Standing {
    fn from(p: &Participant) -> Self {
        Self {
            participant_id: p.id.clone(),
            name: p.name.clone(),
            primary_role: p.primary_role,
            primary_rating: p.primary_rating,
            secondary_rating: p.secondary_rating,
            wins: p.wins,
            losses: p.losses,
            win_rate_percent: p.win_rate_percent(),
        }
    }
}

/// Ranks participants by primary rating, highest first, then by name.
#[must_use]
pub fn standings(participants: &[Participant]) -> Vec<Standing> {
    let mut standings = participants.iter().map(Standing::from).collect::<Vec<_>>();
    standings.sort_by(|a, b| {
        b.primary_rating
            .cmp(&a.primary_rating)
            .then_with(|| a.name.cmp(&b.name))
    });
    standings
}

/// Aggregate figures for everyone whose primary role is `role`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleSummary {
    pub role: Role,
    pub participants: usize,
    pub games: u32,
    pub win_rate_percent: u32,
    pub average_primary_rating: u32,
}

/// One summary per role in [`Role::ALL`] order, including empty roles.
#[must_use]
pub fn role_summaries(participants: &[Participant]) -> Vec<RoleSummary> {
    Role::ALL
        .into_iter()
        .map(|role| {
            let members = participants
                .iter()
                .filter(|p| p.primary_role == role)
                .collect::<Vec<_>>();
            let wins = members.iter().map(|p| p.wins).sum::<u32>();
            let games = members.iter().map(|p| p.games()).sum::<u32>();
            let rating_sum = members.iter().map(|p| u64::from(p.primary_rating)).sum::<u64>();
            RoleSummary {
                role,
                participants: members.len(),
                games,
                win_rate_percent: rounded_percent(u64::from(wins), u64::from(games)),
                average_primary_rating: rounded_mean(rating_sum, members.len() as u64),
            }
        })
        .collect()
}

fn rounded_percent(part: u64, whole: u64) -> u32 {
    rounded_mean(part * 100, whole)
}

fn rounded_mean(sum: u64, count: u64) -> u32 {
    if count == 0 {
        return 0;
    }
    u32::try_from((sum * 2 + count) / (count * 2)).unwrap_or(u32::MAX)
}

/// The roster members with the most games played, busiest first.
#[must_use]
pub fn most_active(participants: &[Participant], limit: usize) -> Vec<Standing> {
    let mut sorted = participants.iter().collect::<Vec<_>>();
    sorted.sort_by_key(|p| (Reverse(p.games()), p.name.clone()));
    sorted.into_iter().take(limit).map(Standing::from).collect()
}
