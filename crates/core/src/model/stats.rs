use serde::{Deserialize, Serialize};

/// Final result of one completed quiz session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionTally {
    pub answered: u32,
    pub correct: u32,
}

/// Running totals across every session played on this device.
///
/// Serialized with camelCase keys, e.g. `{"totalAnswered":8,"totalCorrect":5}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativeStats {
    pub total_answered: u32,
    pub total_correct: u32,
}

impl CumulativeStats {
    #[must_use]
    pub fn new(total_answered: u32, total_correct: u32) -> Self {
        Self {
            total_answered,
            total_correct,
        }
    }

    /// Fold a finished session into the totals.
    pub fn record(&mut self, tally: SessionTally) {
        self.total_answered = self.total_answered.saturating_add(tally.answered);
        self.total_correct = self.total_correct.saturating_add(tally.correct);
    }

    /// Returns a copy with the session folded in.
    #[must_use]
    pub fn with_session(mut self, tally: SessionTally) -> Self {
        self.record(tally);
        self
    }

    /// Whole-number accuracy percentage, `0` when nothing has been answered.
    #[must_use]
    pub fn accuracy_percent(&self) -> u32 {
        if self.total_answered == 0 {
            return 0;
        }
        let pct = u64::from(self.total_correct) * 100 / u64::from(self.total_answered);
        u32::try_from(pct).unwrap_or(u32::MAX)
    }
}
