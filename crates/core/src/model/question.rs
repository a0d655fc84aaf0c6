use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("canonical answer cannot be empty")]
    EmptyAnswer,
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single practice item from the question bank.
///
/// Questions are immutable once built. The canonical answer is guaranteed to
/// be non-empty after trimming, which the grading policy relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Question {
    chapter: String,
    prompt: String,
    answer: String,
    explanation: String,
}

impl Question {
    /// Build a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` if the prompt is blank.
    /// Returns `QuestionError::EmptyAnswer` if the canonical answer is blank.
    pub fn new(
        chapter: impl Into<String>,
        prompt: impl Into<String>,
        answer: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        let answer = answer.into();

        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if answer.trim().is_empty() {
            return Err(QuestionError::EmptyAnswer);
        }

        Ok(Self {
            chapter: chapter.into(),
            prompt,
            answer,
            explanation: explanation.into(),
        })
    }

    /// Topic label. Not unique across the bank.
    #[must_use]
    pub fn chapter(&self) -> &str {
        &self.chapter
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
