use quiz_core::Verdict;
use quiz_core::model::CumulativeStats;
use services::{
    AdvanceOutcome, CountdownId, QuizError, QuizLoopService, QuizPhase, QuizSession, TickOutcome,
};

use crate::views::ViewError;

/// Remaining seconds at or below which the timer is highlighted.
pub const URGENT_SECONDS: u32 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Input(String),
    Submit,
    Next,
    Restart,
    SpeakQuestion,
    SpeakExplanation,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewVm {
    pub is_correct: bool,
    pub verdict_label: &'static str,
    pub answer: String,
    pub explanation: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub progress_label: String,
    pub timer_label: String,
    pub timer_urgent: bool,
    pub prompt: String,
    pub answer_input: String,
    pub can_submit: bool,
    pub review: Option<ReviewVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionVm {
    pub score_label: String,
    pub stats: Option<CumulativeStats>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizScreenVm {
    Idle,
    Question(QuestionVm),
    Completed(CompletionVm),
}

/// A quiz attempt as seen by the quiz view.
#[derive(Clone, Debug)]
pub struct QuizVm {
    session: QuizSession,
    topic: Option<String>,
    stats: Option<CumulativeStats>,
}

fn map_quiz_error(err: QuizError) -> ViewError {
    match err {
        QuizError::Empty => ViewError::EmptyQuiz,
        _ => ViewError::Unknown,
    }
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession, topic: Option<String>) -> Self {
        Self {
            session,
            topic,
            stats: None,
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    #[must_use]
    pub fn countdown_id(&self) -> Option<CountdownId> {
        self.session.countdown_id()
    }

    /// Explicit submission needs a non-empty answer on an ungraded question.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.session.phase() == QuizPhase::InProgress && !self.session.pending_answer().is_empty()
    }

    #[must_use]
    pub fn screen(&self) -> QuizScreenVm {
        match self.session.phase() {
            QuizPhase::Idle => QuizScreenVm::Idle,
            QuizPhase::Completed => QuizScreenVm::Completed(CompletionVm {
                score_label: format!("{}/{}", self.session.score(), self.session.total()),
                stats: self.stats,
            }),
            QuizPhase::InProgress | QuizPhase::Reviewing => {
                let Some(question) = self.session.current_question() else {
                    return QuizScreenVm::Idle;
                };
                let progress = self.session.progress();
                let review = self.session.verdict().map(|verdict| ReviewVm {
                    is_correct: verdict.is_correct,
                    verdict_label: if verdict.is_correct { "Correct!" } else { "Wrong" },
                    answer: question.answer().to_string(),
                    explanation: question.explanation().to_string(),
                });
                QuizScreenVm::Question(QuestionVm {
                    progress_label: format!("Q{}/{}", progress.number, progress.total),
                    timer_label: format!("{}s", progress.remaining_seconds),
                    timer_urgent: review.is_none() && progress.remaining_seconds <= URGENT_SECONDS,
                    prompt: question.prompt().to_string(),
                    answer_input: self.session.pending_answer().to_string(),
                    can_submit: self.can_submit(),
                    review,
                })
            }
        }
    }

    /// Replace the typed answer. Ignored once the question is graded.
    pub fn set_answer(&mut self, text: String) {
        let _ = self.session.set_answer(text);
    }

    pub fn submit(&mut self, quiz: &QuizLoopService) -> Option<Verdict> {
        if !self.can_submit() {
            return None;
        }
        quiz.submit(&mut self.session)
    }

    pub fn tick(&mut self, quiz: &QuizLoopService, id: CountdownId) -> TickOutcome {
        quiz.tick(&mut self.session, id)
    }

    /// Move to the next question, or finish the attempt.
    ///
    /// A completed tally still has to be folded into statistics; the result
    /// arrives later through [`Self::set_stats`].
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Unknown` if the current question is not graded yet.
    pub fn next(&mut self, quiz: &QuizLoopService) -> Result<AdvanceOutcome, ViewError> {
        quiz.step(&mut self.session).map_err(map_quiz_error)
    }

    /// Attach the cumulative totals recorded for a completed attempt.
    pub fn set_stats(&mut self, stats: CumulativeStats) {
        if self.session.is_complete() {
            self.stats = Some(stats);
        }
    }

    /// Start over on the same topic with a fresh sample.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::EmptyQuiz` if the topic has no questions.
    pub fn restart(&mut self, quiz: &QuizLoopService) -> Result<(), ViewError> {
        self.stats = None;
        quiz.restart(&mut self.session, self.topic.as_deref())
            .map_err(map_quiz_error)
    }

    pub fn abandon(&mut self, quiz: &QuizLoopService) {
        quiz.abandon(&mut self.session);
    }

    pub fn speak_question(&self, quiz: &QuizLoopService) {
        quiz.narrate_question(&self.session);
    }

    pub fn speak_explanation(&self, quiz: &QuizLoopService) {
        quiz.narrate_explanation(&self.session);
    }
}

/// # Errors
///
/// Returns `ViewError::EmptyQuiz` when the topic has no questions.
pub fn start_quiz(quiz: &QuizLoopService, topic: Option<String>) -> Result<QuizVm, ViewError> {
    let session = quiz
        .start_session(topic.as_deref())
        .map_err(map_quiz_error)?;
    Ok(QuizVm::new(session, topic))
}
