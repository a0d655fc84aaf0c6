/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// 1-based number of the current question, `0` when idle.
    pub number: usize,
    pub total: usize,
    pub score: u32,
    pub remaining_seconds: u32,
}
