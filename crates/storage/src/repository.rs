use async_trait::async_trait;
use quiz_core::model::{CumulativeStats, Question, QuestionError};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {0}")]
    Io(String),
}

/// Persisted shape for a question, as it appears in the question document.
///
/// `chapter` and `explanation` default to empty strings when omitted; the
/// prompt and answer are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    #[serde(default)]
    pub chapter: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub explanation: String,
}

impl QuestionRecord {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            chapter: question.chapter().to_owned(),
            question: question.prompt().to_owned(),
            answer: question.answer().to_owned(),
            explanation: question.explanation().to_owned(),
        }
    }

    /// Convert the record back into a domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt or answer is blank.
    pub fn into_question(self) -> Result<Question, QuestionError> {
        Question::new(self.chapter, self.question, self.answer, self.explanation)
    }
}

/// Where the question bank comes from.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Read every question record from the source.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the source cannot be read or decoded.
    async fn load_questions(&self) -> Result<Vec<QuestionRecord>, StorageError>;

    /// Human-readable location, used in logs.
    fn describe(&self) -> String;
}

/// The single persisted slot holding cumulative statistics.
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Fetch the stored statistics, `None` when nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the stored value is malformed,
    /// or other storage errors.
    async fn get_stats(&self) -> Result<Option<CumulativeStats>, StorageError>;

    /// Replace the stored statistics.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn save_stats(&self, stats: &CumulativeStats) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    questions: Arc<Mutex<Vec<QuestionRecord>>>,
    stats: Arc<Mutex<Option<CumulativeStats>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_questions(records: Vec<QuestionRecord>) -> Self {
        Self {
            questions: Arc::new(Mutex::new(records)),
            stats: Arc::new(Mutex::new(None)),
        }
    }
}

#[async_trait]
impl QuestionSource for InMemoryRepository {
    async fn load_questions(&self) -> Result<Vec<QuestionRecord>, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}

#[async_trait]
impl StatsRepository for InMemoryRepository {
    async fn get_stats(&self) -> Result<Option<CumulativeStats>, StorageError> {
        let guard = self
            .stats
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(*guard)
    }

    async fn save_stats(&self, stats: &CumulativeStats) -> Result<(), StorageError> {
        let mut guard = self
            .stats
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(*stats);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub stats: Arc<dyn StatsRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let stats: Arc<dyn StatsRepository> = Arc::new(InMemoryRepository::new());
        Self { stats }
    }
}
