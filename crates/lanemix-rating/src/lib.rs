//! Match reporting and rating maintenance for the roster catalog.
//!
//! Storage is abstracted behind [`Repository`]; [`InMemoryRepository`] is the
//! bundled implementation. Reporting a result records the match, then moves
//! each participant's applicable rating (primary when they played their
//! primary role, secondary otherwise) by [`RatingConfig::delta`].
//!
//! ```
//! use lanemix_model::{Participant, Role, Side, TeamEntry, TeamPair};
//! use lanemix_rating::{InMemoryRepository, RatingConfig, Repository, report_result};
//!
//! let side = |prefix: &str| -> Vec<TeamEntry> {
//!     Role::ALL
//!         .into_iter()
//!         .enumerate()
//!         .map(|(i, role)| {
//!             let id = format!("{prefix}{i}");
//!             TeamEntry::new(Participant::new(id.clone(), id, role, 1500, 1200), role)
//!         })
//!         .collect()
//! };
//! let teams = TeamPair::new(side("a"), side("b")).unwrap();
//! let roster = teams.entries().map(|(_, e)| e.participant.clone()).collect();
//! let repo = InMemoryRepository::new(roster, vec![]);
//!
//! report_result(&repo, &teams, Side::B, &RatingConfig::default()).unwrap();
//! let b0 = repo
//!     .list_participants()
//!     .unwrap()
//!     .into_iter()
//!     .find(|p| p.id.as_str() == "b0")
//!     .unwrap();
//! assert_eq!((b0.primary_rating, b0.wins), (1550, 1));
//! ```

pub use self::{
    config::RatingConfig,
    rebase::{RebaseError, rebase_secondary_ratings},
    repository::{InMemoryRepository, PersistenceError, Repository, StoredMatch},
    updater::{ParticipantFailure, RatingChange, ReportError, ReportOutcome, report_result},
};

mod config;
mod rebase;
mod repository;
pub mod standings;
mod updater;
