//! Data model for role-based team balancing.
//!
//! - [`Role`] / [`RoleSet`] - the five fixed roles and compact sets of them
//! - [`Participant`] - a roster member with primary/secondary ratings and a win/loss record
//! - [`SessionSelection`] - a participant picked for one session, with per-session
//!   exclusions, wanted roles and an optional [`RoleWish`]
//! - [`TeamPair`] - two complete five-role teams; always structurally valid
//! - [`MatchRecord`] - a reported outcome, flattened from a [`TeamPair`]
//!
//! # Example
//!
//! ```
//! use lanemix_model::{Participant, Role, SessionSelection, WishPriority};
//!
//! let alice = Participant::new("p1", "Alice", Role::Mid, 1700, 1360);
//! let selection = SessionSelection::new(alice)
//!     .with_excluded_roles([Role::Sup])
//!     .with_role_wish(Role::Jungle, WishPriority::High);
//!
//! assert!(selection.excludes(Role::Sup));
//! assert!(selection.prefers(Role::Jungle));
//! ```

pub use self::{match_record::*, participant::*, role::*, selection::*, team::*};

mod match_record;
mod participant;
mod role;
mod selection;
mod team;
