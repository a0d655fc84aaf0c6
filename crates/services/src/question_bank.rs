use std::collections::HashSet;

use quiz_core::model::Question;
use rand::Rng;
use rand::rng;
use rand::seq::SliceRandom;
use storage::repository::{QuestionRecord, QuestionSource};
use tracing::{info, warn};

/// Immutable question bank with a by-topic view.
///
/// Never empty: when the source is unusable the bank holds a single built-in
/// question instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
    is_fallback: bool,
}

impl QuestionBank {
    /// Build a bank from already-validated questions.
    ///
    /// An empty list yields the fallback bank.
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        if questions.is_empty() {
            return Self::fallback();
        }
        Self {
            questions,
            is_fallback: false,
        }
    }

    /// The single-question bank used when nothing else is available.
    #[must_use]
    pub fn fallback() -> Self {
        let questions = Question::new("Test", "1+1=?", "2", "One plus one is two.")
            .map(|question| vec![question])
            .unwrap_or_default();
        Self {
            questions,
            is_fallback: true,
        }
    }

    /// Validate persisted records, skipping any that break the question invariants.
    #[must_use]
    pub fn from_records(records: Vec<QuestionRecord>) -> Self {
        let total = records.len();
        let mut questions = Vec::with_capacity(total);
        for (index, record) in records.into_iter().enumerate() {
            match record.into_question() {
                Ok(question) => questions.push(question),
                Err(err) => warn!(index, error = %err, "skipping invalid question record"),
            }
        }

        if questions.is_empty() {
            warn!(total, "question payload has no usable questions; using fallback bank");
        }
        Self::new(questions)
    }

    /// Load the bank from a source, substituting the fallback on any failure.
    ///
    /// Attempted once; there is no retry.
    pub async fn load(source: &dyn QuestionSource) -> Self {
        match source.load_questions().await {
            Ok(records) => {
                let bank = Self::from_records(records);
                info!(
                    source = %source.describe(),
                    questions = bank.len(),
                    fallback = bank.is_fallback(),
                    "question bank loaded"
                );
                bank
            }
            Err(err) => {
                warn!(
                    source = %source.describe(),
                    error = %err,
                    "question source unavailable; using fallback bank"
                );
                Self::fallback()
            }
        }
    }

    #[must_use]
    pub fn all(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// True when the built-in fallback question is in use.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.is_fallback
    }

    /// Distinct chapters in first-seen order.
    #[must_use]
    pub fn topics(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.questions
            .iter()
            .map(Question::chapter)
            .filter(|chapter| seen.insert(*chapter))
            .map(ToOwned::to_owned)
            .collect()
    }

    /// Questions whose chapter equals `topic`, in bank order.
    #[must_use]
    pub fn by_topic(&self, topic: &str) -> Vec<Question> {
        self.questions
            .iter()
            .filter(|question| question.chapter() == topic)
            .cloned()
            .collect()
    }

    /// Random subset of the whole bank. See [`sample`].
    #[must_use]
    pub fn sample(&self, n: usize) -> Vec<Question> {
        sample(&self.questions, n)
    }
}

/// Shuffled copy of `all`, truncated to `min(n, all.len())` items.
#[must_use]
pub fn sample(all: &[Question], n: usize) -> Vec<Question> {
    sample_with(all, n, &mut rng())
}

/// [`sample`] with a caller-provided random source.
#[must_use]
pub fn sample_with<R: Rng + ?Sized>(all: &[Question], n: usize, rng: &mut R) -> Vec<Question> {
    let mut picked = all.to_vec();
    picked.shuffle(rng);
    picked.truncate(n.min(all.len()));
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn question(chapter: &str, n: usize) -> Question {
        Question::new(chapter, format!("Q{n}"), format!("A{n}"), "").unwrap()
    }

    fn bank() -> QuestionBank {
        QuestionBank::new(vec![
            question("Squares", 1),
            question("Cubes", 2),
            question("Squares", 3),
            question("Mensuration", 4),
            question("Cubes", 5),
        ])
    }

    #[test]
    fn empty_bank_falls_back_to_single_question() {
        let bank = QuestionBank::new(Vec::new());
        assert!(bank.is_fallback());
        assert_eq!(bank.len(), 1);
        assert_eq!(bank.all()[0].prompt(), "1+1=?");
        assert_eq!(bank.all()[0].answer(), "2");
    }

    #[test]
    fn invalid_records_are_skipped() {
        let records = vec![
            QuestionRecord {
                chapter: "Squares".into(),
                question: "12^2 = ?".into(),
                answer: "144".into(),
                explanation: String::new(),
            },
            QuestionRecord {
                chapter: "Squares".into(),
                question: "13^2 = ?".into(),
                answer: "  ".into(),
                explanation: String::new(),
            },
        ];
        let bank = QuestionBank::from_records(records);
        assert!(!bank.is_fallback());
        assert_eq!(bank.len(), 1);
        assert_eq!(bank.all()[0].answer(), "144");
    }

    #[test]
    fn all_invalid_records_use_fallback() {
        let records = vec![QuestionRecord {
            chapter: String::new(),
            question: String::new(),
            answer: "1".into(),
            explanation: String::new(),
        }];
        assert!(QuestionBank::from_records(records).is_fallback());
    }

    #[test]
    fn topics_are_distinct_in_first_seen_order() {
        assert_eq!(bank().topics(), vec!["Squares", "Cubes", "Mensuration"]);
    }

    #[test]
    fn by_topic_preserves_bank_order() {
        let cubes = bank().by_topic("Cubes");
        let prompts: Vec<_> = cubes.iter().map(Question::prompt).collect();
        assert_eq!(prompts, vec!["Q2", "Q5"]);
        assert!(bank().by_topic("Algebra").is_empty());
    }

    #[test]
    fn sample_returns_distinct_subset_without_touching_source() {
        let bank = bank();
        let before = bank.all().to_vec();
        let mut rng = StdRng::seed_from_u64(7);

        let picked = sample_with(bank.all(), 3, &mut rng);

        assert_eq!(picked.len(), 3);
        let unique: HashSet<_> = picked.iter().collect();
        assert_eq!(unique.len(), 3);
        assert!(picked.iter().all(|q| bank.all().contains(q)));
        assert_eq!(bank.all(), before.as_slice());
    }

    #[test]
    fn sample_is_capped_by_source_length() {
        let bank = bank();
        assert_eq!(bank.sample(50).len(), bank.len());
        assert!(bank.sample(0).is_empty());
    }

    #[test]
    fn repeated_samples_produce_different_orders() {
        let all: Vec<_> = (0..10).map(|n| question("Numbers", n)).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let first = sample_with(&all, all.len(), &mut rng);
        let differs = (0..20).any(|_| sample_with(&all, all.len(), &mut rng) != first);
        assert!(differs);
    }
}
