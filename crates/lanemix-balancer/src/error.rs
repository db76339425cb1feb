use lanemix_model::{ParticipantId, RoleSet, StructureError};

/// Why a generation call produced no team pair.
///
/// Nothing is committed in any of these cases.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GenerateError {
    #[display("expected 10 selected participants, got {actual}")]
    SelectionCount { actual: usize },
    #[display("participant {id} is selected more than once")]
    DuplicateParticipant { id: ParticipantId },
    #[display("too many participants exclude {roles}; no team can fill these roles")]
    InfeasibleConstraints { roles: RoleSet },
    #[display("no complete teams found in {trials} trials (unfillable roles: {unfilled})")]
    GenerationFailure { trials: usize, unfilled: RoleSet },
    #[display("constructed teams are malformed: {_0}")]
    Structure(StructureError),
}
