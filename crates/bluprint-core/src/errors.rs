//! Error types for the compatibility engine.
//!
//! Compatibility problems are never errors: they land in
//! [`Verdict::issues`](crate::engine::Verdict) and
//! [`Verdict::warnings`](crate::engine::Verdict). Errors here are the
//! conditions under which no verdict can be produced at all.

use crate::catalog::{PartId, PartType};
use crate::rules::RuleId;

/// Engine and catalog errors.
#[derive(Debug, thiserror::Error)]
pub enum BluprintError {
    /// One or more requested part ids do not exist in the catalog.
    #[error("parts not found: {}", join_ids(.ids))]
    PartsNotFound { ids: Vec<PartId> },

    /// The build exceeds the configured part limit.
    #[error("build has {count} parts, limit is {limit}")]
    TooManyParts { count: usize, limit: usize },

    /// Two catalog parts share an id.
    #[error("duplicate part id in catalog: {id}")]
    DuplicatePartId { id: PartId },

    /// Two catalog rules share an id.
    #[error("duplicate rule id in catalog: {id}")]
    DuplicateRuleId { id: RuleId },

    /// Catalog document could not be read or parsed.
    #[error("catalog error: {message}")]
    Catalog { message: String },

    /// Engine configuration could not be read or is invalid.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Part specifications violate the schema for their category.
    #[error("invalid specifications for {part_type}: {message}")]
    SpecValidation { part_type: PartType, message: String },

    /// Part record fields (name, price, manufacturer) are out of bounds.
    #[error("invalid part {id}: {message}")]
    PartValidation { id: PartId, message: String },
}

fn join_ids(ids: &[PartId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl BluprintError {
    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            // Caller asked for something that cannot be evaluated
            Self::PartsNotFound { .. } => 2,
            Self::TooManyParts { .. } => 2,

            // Bad input files
            Self::DuplicatePartId { .. } => 3,
            Self::DuplicateRuleId { .. } => 3,
            Self::Catalog { .. } => 3,
            Self::Config { .. } => 3,

            Self::SpecValidation { .. } => 1,
            Self::PartValidation { .. } => 1,
        }
    }

    /// Data-integrity failures the service layer maps to "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PartsNotFound { .. })
    }
}

impl From<std::io::Error> for BluprintError {
    fn from(err: std::io::Error) -> Self {
        Self::Catalog {
            message: err.to_string(),
        }
    }
}

/// Result type for engine operations.
pub type BluprintResult<T> = Result<T, BluprintError>;
