use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::repository::{QuestionRecord, QuestionSource, StorageError};

/// Decode a question document: a JSON array of question records.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the payload is not a JSON array of
/// records with string `question` and `answer` fields.
pub fn parse_question_document(bytes: &[u8]) -> Result<Vec<QuestionRecord>, StorageError> {
    serde_json::from_slice(bytes).map_err(|err| StorageError::Serialization(err.to_string()))
}

/// Question bank stored as a JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileQuestionSource {
    path: PathBuf,
}

impl JsonFileQuestionSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QuestionSource for JsonFileQuestionSource {
    async fn load_questions(&self) -> Result<Vec<QuestionRecord>, StorageError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|err| StorageError::Io(err.to_string()))?;
        parse_question_document(&bytes)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
