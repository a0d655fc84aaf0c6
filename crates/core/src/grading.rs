//! Containment grading for free-text answers.
//!
//! Both sides are case-folded and trimmed, then compared with plain substring
//! containment in two directions:
//!
//! - the canonical answer contains the submission, or
//! - the submission contains the first whitespace-delimited token of the
//!   canonical answer.
//!
//! There is no word-boundary, accent or numeric normalization. An empty
//! submission is contained in every canonical answer and therefore grades as
//! correct; short submissions such as `"2"` match any answer containing that
//! digit. Both leniencies are kept as-is until product review decides
//! otherwise.

/// Outcome of grading one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub is_correct: bool,
}

impl Verdict {
    #[must_use]
    pub fn correct() -> Self {
        Self { is_correct: true }
    }

    #[must_use]
    pub fn wrong() -> Self {
        Self { is_correct: false }
    }
}

/// Grade `submitted` against the canonical `answer`.
///
/// Pure function of its inputs.
#[must_use]
pub fn grade_answer(answer: &str, submitted: &str) -> Verdict {
    let correct = answer.to_lowercase();
    let correct = correct.trim();
    let user = submitted.trim().to_lowercase();

    let contains_user = correct.contains(user.as_str());
    let contains_head = correct
        .split_whitespace()
        .next()
        .is_some_and(|head| user.contains(head));

    Verdict {
        is_correct: contains_user || contains_head,
    }
}
