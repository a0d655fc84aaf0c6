use std::sync::Arc;

use quiz_core::Verdict;
use quiz_core::model::{CumulativeStats, QuizSettings, SessionTally};
use tracing::{debug, info};

use super::countdown::CountdownId;
use super::session::{AdvanceOutcome, QuizPhase, QuizSession, TickOutcome};
use crate::error::QuizError;
use crate::narration::Narrator;
use crate::question_bank::QuestionBank;
use crate::stats_service::StatsService;

/// Result of moving past a graded question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceResult {
    pub outcome: AdvanceOutcome,
    /// Updated cumulative totals, present once the session completes.
    pub stats: Option<CumulativeStats>,
}

/// Orchestrates quiz sessions against the question bank, statistics and
/// narrator.
#[derive(Clone)]
pub struct QuizLoopService {
    bank: Arc<QuestionBank>,
    stats: Arc<StatsService>,
    narrator: Arc<dyn Narrator>,
    settings: QuizSettings,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(
        bank: Arc<QuestionBank>,
        stats: Arc<StatsService>,
        narrator: Arc<dyn Narrator>,
        settings: QuizSettings,
    ) -> Self {
        Self {
            bank,
            stats,
            narrator,
            settings,
        }
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.settings
    }

    #[must_use]
    pub fn topics(&self) -> Vec<String> {
        self.bank.topics()
    }

    #[must_use]
    pub fn stats_service(&self) -> Arc<StatsService> {
        Arc::clone(&self.stats)
    }

    /// An idle session configured with the per-question time budget.
    #[must_use]
    pub fn new_session(&self) -> QuizSession {
        QuizSession::new(self.settings.seconds_per_question())
    }

    /// Start a new session over the whole bank or a single topic.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if the topic has no questions.
    pub fn start_session(&self, topic: Option<&str>) -> Result<QuizSession, QuizError> {
        let mut session = self.new_session();
        self.restart(&mut session, topic)?;
        Ok(session)
    }

    /// Re-start `session`, discarding whatever attempt it held.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if the topic has no questions.
    pub fn restart(&self, session: &mut QuizSession, topic: Option<&str>) -> Result<(), QuizError> {
        self.narrator.cancel();
        let size = usize::try_from(self.settings.questions_per_session()).unwrap_or(usize::MAX);

        match topic {
            Some(topic) => session.start(&self.bank.by_topic(topic), size)?,
            None => session.start(self.bank.all(), size)?,
        }

        info!(
            topic = topic.unwrap_or("all"),
            questions = session.total(),
            seconds_per_question = self.settings.seconds_per_question(),
            "quiz session started"
        );
        Ok(())
    }

    /// Leave the session, stopping its countdown and any narration.
    pub fn abandon(&self, session: &mut QuizSession) {
        self.narrator.cancel();
        if session.phase() != QuizPhase::Idle {
            debug!(position = session.position(), "quiz session abandoned");
        }
        session.reset();
    }

    /// Explicit user submission of the pending answer.
    pub fn submit(&self, session: &mut QuizSession) -> Option<Verdict> {
        let verdict = session.grade()?;
        debug!(
            position = session.position(),
            correct = verdict.is_correct,
            "answer submitted"
        );
        Some(verdict)
    }

    pub fn tick(&self, session: &mut QuizSession, id: CountdownId) -> TickOutcome {
        let outcome = session.tick(id);
        if let TickOutcome::Expired(verdict) = outcome {
            debug!(
                position = session.position(),
                correct = verdict.is_correct,
                "time expired; answer graded"
            );
        }
        outcome
    }

    /// Move past the graded question, folding the tally into cumulative
    /// statistics when the session completes.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotReviewing` if the current question has not been
    /// graded.
    pub async fn advance(&self, session: &mut QuizSession) -> Result<AdvanceResult, QuizError> {
        let outcome = self.step(session)?;
        let stats = match outcome {
            AdvanceOutcome::Next { .. } => None,
            AdvanceOutcome::Completed(tally) => Some(self.record_completion(tally).await),
        };
        Ok(AdvanceResult { outcome, stats })
    }

    /// Move past the graded question without touching statistics.
    ///
    /// Callers that own the session across an await use this and hand a
    /// completed tally to [`Self::record_completion`].
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotReviewing` if the current question has not been
    /// graded.
    pub fn step(&self, session: &mut QuizSession) -> Result<AdvanceOutcome, QuizError> {
        let outcome = session.advance()?;
        self.narrator.cancel();
        if let AdvanceOutcome::Completed(tally) = outcome {
            info!(
                answered = tally.answered,
                correct = tally.correct,
                "quiz session completed"
            );
        }
        Ok(outcome)
    }

    /// Fold a completed session into cumulative statistics.
    pub async fn record_completion(&self, tally: SessionTally) -> CumulativeStats {
        self.stats.record(tally).await
    }

    /// Speak the current question's prompt.
    pub fn narrate_question(&self, session: &QuizSession) {
        if let Some(question) = session.current_question() {
            self.speak(question.prompt());
        }
    }

    /// Speak the explanation once the current question has been graded.
    pub fn narrate_explanation(&self, session: &QuizSession) {
        if session.phase() != QuizPhase::Reviewing {
            return;
        }
        if let Some(question) = session.current_question() {
            self.speak(question.explanation());
        }
    }

    pub fn stop_narration(&self) {
        self.narrator.cancel();
    }

    fn speak(&self, text: &str) {
        self.narrator.cancel();
        if !text.trim().is_empty() {
            self.narrator.speak(text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::Question;
    use std::sync::Mutex;
    use storage::repository::InMemoryRepository;

    #[derive(Default)]
    struct RecordingNarrator {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingNarrator {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Narrator for RecordingNarrator {
        fn speak(&self, text: &str) {
            self.calls.lock().unwrap().push(format!("speak:{text}"));
        }

        fn cancel(&self) {
            self.calls.lock().unwrap().push("cancel".to_string());
        }
    }

    fn service_with(narrator: Arc<RecordingNarrator>) -> QuizLoopService {
        let bank = QuestionBank::new(vec![
            Question::new("Squares", "12^2 = ?", "144", "12 x 12 = 144").unwrap(),
            Question::new("Cubes", "Cube of 3?", "27", "3 x 3 x 3 = 27").unwrap(),
        ]);
        QuizLoopService::new(
            Arc::new(bank),
            Arc::new(StatsService::new(Arc::new(InMemoryRepository::new()))),
            narrator,
            QuizSettings::new(5, 30).unwrap(),
        )
    }

    #[test]
    fn topic_session_only_uses_that_chapter() {
        let service = service_with(Arc::default());
        let session = service.start_session(Some("Cubes")).unwrap();
        assert_eq!(session.total(), 1);
        assert_eq!(session.current_question().unwrap().chapter(), "Cubes");
    }

    #[test]
    fn unknown_topic_is_empty() {
        let service = service_with(Arc::default());
        let err = service.start_session(Some("Algebra")).unwrap_err();
        assert_eq!(err, QuizError::Empty);
    }

    #[test]
    fn narration_cancels_before_speaking() {
        let narrator = Arc::new(RecordingNarrator::default());
        let service = service_with(Arc::clone(&narrator));
        let mut session = service.start_session(Some("Squares")).unwrap();

        service.narrate_question(&session);
        // No explanation before grading.
        service.narrate_explanation(&session);
        service.submit(&mut session);
        service.narrate_explanation(&session);

        assert_eq!(
            narrator.calls(),
            vec![
                "cancel",
                "cancel",
                "speak:12^2 = ?",
                "cancel",
                "speak:12 x 12 = 144",
            ]
        );
    }

    #[test]
    fn abandon_resets_and_silences() {
        let narrator = Arc::new(RecordingNarrator::default());
        let service = service_with(Arc::clone(&narrator));
        let mut session = service.start_session(None).unwrap();

        service.abandon(&mut session);

        assert_eq!(session.phase(), QuizPhase::Idle);
        assert!(session.countdown_id().is_none());
        assert_eq!(narrator.calls().last().map(String::as_str), Some("cancel"));
    }

    #[tokio::test]
    async fn advance_reports_stats_only_on_completion() {
        let service = service_with(Arc::default());
        let mut session = service.start_session(None).unwrap();

        service.submit(&mut session);
        let first = service.advance(&mut session).await.unwrap();
        assert_eq!(first.outcome, AdvanceOutcome::Next { position: 1 });
        assert_eq!(first.stats, None);

        service.submit(&mut session);
        let last = service.advance(&mut session).await.unwrap();
        // Empty submissions grade as correct.
        assert_eq!(last.stats, Some(CumulativeStats::new(2, 2)));
    }

    #[tokio::test]
    async fn step_leaves_statistics_to_the_caller() {
        let service = service_with(Arc::default());
        let mut session = service.start_session(Some("Cubes")).unwrap();
        assert_eq!(service.step(&mut session), Err(QuizError::NotReviewing));

        service.submit(&mut session);
        let outcome = service.step(&mut session).unwrap();
        let AdvanceOutcome::Completed(tally) = outcome else {
            panic!("expected completion, got {outcome:?}");
        };
        assert_eq!(service.stats_service().load().await, CumulativeStats::default());

        let stats = service.record_completion(tally).await;
        assert_eq!(stats, CumulativeStats::new(1, 1));
        assert_eq!(service.stats_service().load().await, CumulativeStats::new(1, 1));
    }
}
