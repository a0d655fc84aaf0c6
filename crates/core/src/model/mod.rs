mod question;
mod settings;
mod stats;

pub use question::{Question, QuestionError};
pub use settings::{QuizSettings, SettingsError};
pub use stats::{CumulativeStats, SessionTally};
