use quiz_core::model::CumulativeStats;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsVm {
    pub answered_label: String,
    pub correct_label: String,
    pub accuracy_label: String,
}

impl StatsVm {
    #[must_use]
    pub fn from_stats(stats: &CumulativeStats) -> Self {
        Self {
            answered_label: format!("Questions answered: {}", stats.total_answered),
            correct_label: format!("Correct answers: {}", stats.total_correct),
            accuracy_label: format!("Accuracy: {}%", stats.accuracy_percent()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HomeVm {
    pub stats: StatsVm,
    pub topics: Vec<String>,
    /// The bundled questions could not be loaded and a placeholder is in use.
    pub using_fallback: bool,
}

#[must_use]
pub fn map_home(stats: &CumulativeStats, topics: Vec<String>, using_fallback: bool) -> HomeVm {
    HomeVm {
        stats: StatsVm::from_stats(stats),
        topics,
        using_fallback,
    }
}
