use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("questions per session must be > 0")]
    InvalidSessionSize,

    #[error("seconds per question must be > 0")]
    InvalidSecondsPerQuestion,
}

/// Tunables for a quiz attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    questions_per_session: u32,
    seconds_per_question: u32,
}

impl QuizSettings {
    pub const DEFAULT_QUESTIONS_PER_SESSION: u32 = 5;
    pub const DEFAULT_SECONDS_PER_QUESTION: u32 = 30;

    /// Creates custom quiz settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if either value is zero.
    pub fn new(questions_per_session: u32, seconds_per_question: u32) -> Result<Self, SettingsError> {
        if questions_per_session == 0 {
            return Err(SettingsError::InvalidSessionSize);
        }
        if seconds_per_question == 0 {
            return Err(SettingsError::InvalidSecondsPerQuestion);
        }

        Ok(Self {
            questions_per_session,
            seconds_per_question,
        })
    }

    #[must_use]
    pub fn questions_per_session(&self) -> u32 {
        self.questions_per_session
    }

    #[must_use]
    pub fn seconds_per_question(&self) -> u32 {
        self.seconds_per_question
    }
}

impl Default for QuizSettings {
    /// Five questions, thirty seconds each.
    fn default() -> Self {
        Self {
            questions_per_session: Self::DEFAULT_QUESTIONS_PER_SESSION,
            seconds_per_question: Self::DEFAULT_SECONDS_PER_QUESTION,
        }
    }
}
