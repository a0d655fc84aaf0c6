#![forbid(unsafe_code)]

pub mod question_file;
pub mod repository;
pub mod sqlite;

pub use question_file::{JsonFileQuestionSource, parse_question_document};
pub use repository::{
    InMemoryRepository, QuestionRecord, QuestionSource, StatsRepository, Storage, StorageError,
};
