//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted by the quiz session engine.
///
/// A rejected call leaves the session unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no questions available for quiz")]
    Empty,
    #[error("no question is waiting for an answer")]
    NotInProgress,
    #[error("the current question has not been graded yet")]
    NotReviewing,
}
