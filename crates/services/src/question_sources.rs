use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use storage::repository::{QuestionRecord, QuestionSource, StorageError};
use storage::{JsonFileQuestionSource, parse_question_document};

/// Question document served over HTTP.
#[derive(Clone)]
pub struct HttpQuestionSource {
    client: Client,
    url: String,
}

impl HttpQuestionSource {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl QuestionSource for HttpQuestionSource {
    async fn load_questions(&self) -> Result<Vec<QuestionRecord>, StorageError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound);
        }
        if !status.is_success() {
            return Err(StorageError::Connection(format!(
                "question source returned status {status}"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        parse_question_document(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Pick a question source for a configured location.
///
/// `http://` and `https://` locations are fetched over the network; anything
/// else is treated as a file path.
#[must_use]
pub fn source_for_location(location: &str) -> Arc<dyn QuestionSource> {
    let trimmed = location.trim();
    if is_http_location(trimmed) {
        Arc::new(HttpQuestionSource::new(trimmed))
    } else {
        Arc::new(JsonFileQuestionSource::new(trimmed))
    }
}

fn is_http_location(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_locations_are_detected() {
        assert!(is_http_location("http://localhost:8080/questions.json"));
        assert!(is_http_location("https://example.com/q.json"));
        assert!(!is_http_location("questions.json"));
        assert!(!is_http_location("/srv/quiz/https.json"));
    }

    #[test]
    fn source_describes_its_location() {
        assert_eq!(
            source_for_location(" https://example.com/q.json ").describe(),
            "https://example.com/q.json"
        );
        assert_eq!(source_for_location("data/q.json").describe(), "data/q.json");
    }
}
