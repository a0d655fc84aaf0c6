use std::sync::Arc;

use quiz_core::model::{CumulativeStats, SessionTally};
use storage::repository::StatsRepository;
use tracing::{debug, warn};

/// Reads and updates the persisted cumulative statistics.
///
/// Persistence problems never surface to callers: unreadable or malformed
/// state reads as zero, failed writes are logged and dropped.
#[derive(Clone)]
pub struct StatsService {
    repo: Arc<dyn StatsRepository>,
}

impl StatsService {
    #[must_use]
    pub fn new(repo: Arc<dyn StatsRepository>) -> Self {
        Self { repo }
    }

    /// Load persisted statistics (or zeros if missing or unreadable).
    pub async fn load(&self) -> CumulativeStats {
        match self.repo.get_stats().await {
            Ok(stats) => stats.unwrap_or_default(),
            Err(err) => {
                warn!(error = %err, "statistics unavailable; starting from zero");
                CumulativeStats::default()
            }
        }
    }

    /// Fold a finished session into the persisted totals.
    ///
    /// Returns the updated totals even when the write fails.
    pub async fn record(&self, tally: SessionTally) -> CumulativeStats {
        let stats = self.load().await.with_session(tally);
        match self.repo.save_stats(&stats).await {
            Ok(()) => debug!(
                total_answered = stats.total_answered,
                total_correct = stats.total_correct,
                "statistics saved"
            ),
            Err(err) => warn!(error = %err, "failed to save statistics"),
        }
        stats
    }
}
