#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod narration;
pub mod question_bank;
pub mod question_sources;
pub mod quiz;
pub mod stats_service;

pub use app_services::AppServices;
pub use error::QuizError;
pub use narration::{Narrator, SilentNarrator};
pub use question_bank::{QuestionBank, sample, sample_with};
pub use question_sources::{HttpQuestionSource, source_for_location};
pub use quiz::{
    AdvanceOutcome, AdvanceResult, Countdown, CountdownId, CountdownTick, QuizLoopService,
    QuizPhase, QuizProgress, QuizSession, TickOutcome,
};
pub use stats_service::StatsService;
