//! Error types for todo domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain todo values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoDomainError {
    /// The name is empty after trimming.
    #[error("name must not be empty")]
    EmptyName,

    /// The name exceeds the persisted column width.
    #[error("name is {0} characters long, maximum is 50")]
    NameTooLong(usize),

    /// The description exceeds the persisted column width.
    #[error("description is {0} characters long, maximum is 1000")]
    DescriptionTooLong(usize),
}

/// Error returned while parsing recurrence frequencies from requests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown recurrence frequency: {0}")]
pub struct ParseFrequencyError(pub String);
