//! Error types for SQL generation.

use crate::statement::StatementKind;
use crate::validation::ValidationErrors;

/// Errors that can occur while compiling changes into SQL.
///
/// `Validation` is the only recoverable variant: it carries every problem
/// the resolved generators found. The others point at a registration or
/// programming defect and abort generation.
#[derive(Debug, thiserror::Error)]
pub enum SqlGenError {
    /// The statement is not valid for the target database.
    #[error("Validation failed:\n{0}")]
    Validation(ValidationErrors),

    /// No registered generator supports the statement on this database.
    #[error("No SQL generator supports {kind} on database '{database}'")]
    NoGenerator {
        /// Kind of the statement.
        kind: StatementKind,
        /// Short name of the target database.
        database: String,
    },

    /// A generator delegated past the last generator of its chain.
    #[error("Generator chain for {kind} on database '{database}' is exhausted")]
    EndOfChain {
        /// Kind of the statement.
        kind: StatementKind,
        /// Short name of the target database.
        database: String,
    },

    /// A numeric foreign key action code outside the metadata constants.
    #[error("Unknown foreign key action code: {0}")]
    UnknownForeignKeyAction(i32),

    /// A textual foreign key rule outside the supported vocabulary.
    #[error("Unknown foreign key rule: '{0}'")]
    UnknownForeignKeyRule(String),

    /// The statement needs a schema but none was given and the database has no default.
    #[error("Cannot resolve a schema name on database '{database}'")]
    UnresolvedSchema {
        /// Short name of the target database.
        database: String,
    },

    /// A change set contains a change that cannot be rolled back.
    #[error("Change set '{0}' is not revertible")]
    NotRevertible(String),

    /// Invalid engine configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SqlGenError {
    /// Returns true if this error is a validation failure rather than a fatal defect.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result type for SQL generation.
pub type Result<T> = std::result::Result<T, SqlGenError>;
