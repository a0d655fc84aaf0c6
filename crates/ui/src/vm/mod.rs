mod quiz_vm;
mod stats_vm;

pub use quiz_vm::{
    CompletionVm, QuestionVm, QuizIntent, QuizScreenVm, QuizVm, ReviewVm, URGENT_SECONDS,
    start_quiz,
};
pub use stats_vm::{HomeVm, StatsVm, map_home};
