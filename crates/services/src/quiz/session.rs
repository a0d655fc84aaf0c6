use std::fmt;

use quiz_core::model::{Question, SessionTally};
use quiz_core::{Verdict, grade_answer};
use rand::Rng;
use rand::rng;

use super::countdown::{Countdown, CountdownId, CountdownTick};
use super::progress::QuizProgress;
use crate::error::QuizError;
use crate::question_bank::sample_with;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    Idle,
    /// Waiting for an answer; the countdown is live.
    InProgress,
    /// The current question has a verdict; the countdown is stopped.
    Reviewing,
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Next { position: usize },
    Completed(SessionTally),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not the live countdown, or no question is in progress.
    Stale,
    Running { remaining: u32 },
    /// Time ran out and the pending answer was graded.
    Expired(Verdict),
}

/// State machine for one quiz attempt.
///
/// Driven entirely by discrete events: answer edits, submission, countdown
/// ticks and navigation. Owns the per-question countdown; every transition
/// out of `InProgress` cancels it.
#[derive(Clone)]
pub struct QuizSession {
    phase: QuizPhase,
    items: Vec<Question>,
    position: usize,
    score: u32,
    pending_answer: String,
    verdict: Option<Verdict>,
    countdown: Countdown,
}

impl QuizSession {
    /// An idle session whose questions each get `seconds_per_question` ticks.
    #[must_use]
    pub fn new(seconds_per_question: u32) -> Self {
        Self {
            phase: QuizPhase::Idle,
            items: Vec::new(),
            position: 0,
            score: 0,
            pending_answer: String::new(),
            verdict: None,
            countdown: Countdown::new(seconds_per_question),
        }
    }

    /// Begin a fresh attempt over a random sample of `source`.
    ///
    /// Allowed from any phase; the previous attempt is discarded.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if the sample has no questions. The session is
    /// left idle.
    pub fn start(&mut self, source: &[Question], size: usize) -> Result<(), QuizError> {
        self.start_with(source, size, &mut rng())
    }

    /// [`QuizSession::start`] with a caller-provided random source.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if the sample has no questions.
    pub fn start_with<R: Rng + ?Sized>(
        &mut self,
        source: &[Question],
        size: usize,
        rng: &mut R,
    ) -> Result<(), QuizError> {
        let items = sample_with(source, size, rng);
        self.reset();
        if items.is_empty() {
            return Err(QuizError::Empty);
        }

        self.items = items;
        self.countdown.arm();
        self.phase = QuizPhase::InProgress;
        Ok(())
    }

    /// Abandon the attempt and return to `Idle`.
    pub fn reset(&mut self) {
        self.countdown.cancel();
        self.phase = QuizPhase::Idle;
        self.items.clear();
        self.position = 0;
        self.score = 0;
        self.pending_answer.clear();
        self.verdict = None;
    }

    /// Replace the pending answer, verbatim.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotInProgress` outside `InProgress`.
    pub fn set_answer(&mut self, text: impl Into<String>) -> Result<(), QuizError> {
        if self.phase != QuizPhase::InProgress {
            return Err(QuizError::NotInProgress);
        }
        self.pending_answer = text.into();
        Ok(())
    }

    /// Grade the pending answer and move to `Reviewing`.
    ///
    /// Returns `None` without any change outside `InProgress`, so a second call
    /// can never score the same question twice.
    pub fn grade(&mut self) -> Option<Verdict> {
        if self.phase != QuizPhase::InProgress {
            return None;
        }
        self.countdown.cancel();

        let question = self.items.get(self.position)?;
        let verdict = grade_answer(question.answer(), &self.pending_answer);
        if verdict.is_correct {
            self.score = self.score.saturating_add(1);
        }
        self.verdict = Some(verdict);
        self.phase = QuizPhase::Reviewing;
        Some(verdict)
    }

    /// One elapsed time unit on countdown `id`.
    ///
    /// The tick that reaches zero grades the pending answer, exactly once.
    pub fn tick(&mut self, id: CountdownId) -> TickOutcome {
        if self.phase != QuizPhase::InProgress {
            return TickOutcome::Stale;
        }

        match self.countdown.tick(id) {
            CountdownTick::Stale => TickOutcome::Stale,
            CountdownTick::Running(remaining) => TickOutcome::Running { remaining },
            CountdownTick::Expired => self
                .grade()
                .map_or(TickOutcome::Stale, TickOutcome::Expired),
        }
    }

    /// Move past a graded question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotReviewing` unless the current question has been
    /// graded.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, QuizError> {
        if self.phase != QuizPhase::Reviewing {
            return Err(QuizError::NotReviewing);
        }

        if self.position + 1 < self.items.len() {
            self.position += 1;
            self.pending_answer.clear();
            self.verdict = None;
            self.countdown.arm();
            self.phase = QuizPhase::InProgress;
            return Ok(AdvanceOutcome::Next {
                position: self.position,
            });
        }

        self.countdown.cancel();
        self.phase = QuizPhase::Completed;
        Ok(AdvanceOutcome::Completed(self.tally()))
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    /// The question being answered or reviewed.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            QuizPhase::InProgress | QuizPhase::Reviewing => self.items.get(self.position),
            QuizPhase::Idle | QuizPhase::Completed => None,
        }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.items
    }

    /// 0-based index of the current question.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn pending_answer(&self) -> &str {
        &self.pending_answer
    }

    #[must_use]
    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.countdown.remaining()
    }

    /// Id of the live countdown, if one is running.
    #[must_use]
    pub fn countdown_id(&self) -> Option<CountdownId> {
        self.countdown.live()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == QuizPhase::Completed
    }

    #[must_use]
    pub fn tally(&self) -> SessionTally {
        SessionTally {
            answered: u32::try_from(self.items.len()).unwrap_or(u32::MAX),
            correct: self.score,
        }
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let number = match self.phase {
            QuizPhase::Idle => 0,
            QuizPhase::InProgress | QuizPhase::Reviewing | QuizPhase::Completed => {
                self.position + 1
            }
        };
        QuizProgress {
            number,
            total: self.total(),
            score: self.score,
            remaining_seconds: self.remaining_seconds(),
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("phase", &self.phase)
            .field("items_len", &self.items.len())
            .field("position", &self.position)
            .field("score", &self.score)
            .field("verdict", &self.verdict)
            .field("countdown", &self.countdown)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
