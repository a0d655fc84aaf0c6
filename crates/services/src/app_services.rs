use std::sync::Arc;

use quiz_core::model::QuizSettings;
use storage::repository::{QuestionSource, Storage};
use tracing::warn;

use crate::narration::Narrator;
use crate::question_bank::QuestionBank;
use crate::quiz::QuizLoopService;
use crate::stats_service::StatsService;

/// Assembles app-facing services.
///
/// Construction never fails: an unusable question source yields the fallback
/// bank and an unusable database yields an in-memory statistics slot.
#[derive(Clone)]
pub struct AppServices {
    quiz_loop: Arc<QuizLoopService>,
    stats: Arc<StatsService>,
}

impl AppServices {
    /// Build services backed by `SQLite` statistics storage.
    pub async fn new_sqlite(
        db_url: &str,
        questions: &dyn QuestionSource,
        settings: QuizSettings,
        narrator: Arc<dyn Narrator>,
    ) -> Self {
        let storage = match Storage::sqlite(db_url).await {
            Ok(storage) => storage,
            Err(err) => {
                warn!(
                    db_url,
                    error = %err,
                    "statistics database unavailable; keeping statistics in memory"
                );
                Storage::in_memory()
            }
        };
        Self::from_storage(storage, questions, settings, narrator).await
    }

    /// Build services over an already-opened `Storage`.
    pub async fn from_storage(
        storage: Storage,
        questions: &dyn QuestionSource,
        settings: QuizSettings,
        narrator: Arc<dyn Narrator>,
    ) -> Self {
        let bank = Arc::new(QuestionBank::load(questions).await);
        let stats = Arc::new(StatsService::new(Arc::clone(&storage.stats)));
        let quiz_loop = Arc::new(QuizLoopService::new(
            bank,
            Arc::clone(&stats),
            narrator,
            settings,
        ));

        Self { quiz_loop, stats }
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn stats(&self) -> Arc<StatsService> {
        Arc::clone(&self.stats)
    }
}
