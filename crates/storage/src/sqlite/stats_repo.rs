use async_trait::async_trait;
use quiz_core::model::CumulativeStats;

use crate::repository::{StatsRepository, StorageError};

use super::SqliteRepository;

/// Slot key holding the serialized `CumulativeStats`.
pub const STATS_KEY: &str = "quiz.cumulative_stats";

#[async_trait]
impl StatsRepository for SqliteRepository {
    async fn get_stats(&self) -> Result<Option<CumulativeStats>, StorageError> {
        let Some(raw) = self.get_value(STATS_KEY).await? else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    async fn save_stats(&self, stats: &CumulativeStats) -> Result<(), StorageError> {
        let raw = serde_json::to_string(stats)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.put_value(STATS_KEY, &raw).await
    }
}
