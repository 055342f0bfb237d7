//! Error types for command profiles and parsing
use thiserror::Error;

/// A type alias for a boxed error that is thread-safe and sendable across threads.
/// Used as the error type of the fallible `FieldValue` conversions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Profile construction errors.
///
/// These are fatal: a record whose declared metadata fails to compile cannot
/// parse anything, so they surface exactly once, when the profile is built.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Switch annotation on a field that is not boolean
    #[error("Invalid switch: {0}")]
    Switch(String),

    /// More than one list receptor, or a receptor before other free arguments
    #[error("Invalid list receptor: {0}")]
    ListReceptor(String),

    /// Field type outside the supported closed set
    #[error("Invalid field type: {0}")]
    FieldType(String),

    /// Invalid field value error
    #[error("Invalid field value: {0}")]
    FieldValue(String),

    /// Declared default value does not match the declared field type
    #[error("Invalid default value: {0}")]
    Default(String),
}

/// Per-call parse errors. All of these are recoverable: the caller keeps the
/// compiled profile and simply rejects the one input line.
#[derive(Error, Debug)]
pub enum CommandError {
    /// A quote was opened and never closed
    #[error("Unterminated quote in {0:?}")]
    UnterminatedQuote(String),

    /// The input's command name is not this profile's name
    #[error("Command name mismatched: expected {expected:?}, got {got:?}")]
    NameMismatch { expected: String, got: String },

    /// More bare free arguments than declared positions, with no list receptor
    #[error("No free argument position left for {0:?}")]
    BindingExhausted(String),
}
