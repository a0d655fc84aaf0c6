use std::sync::Arc;
use dioxus::signals::ReadableExt;

use quiz_core::model::CumulativeStats;
use storage::repository::{InMemoryRepository, StatsRepository, StorageError};

use super::test_harness::{
    ViewHarness, ViewKind, sample_questions, setup_default_harness, setup_view_harness,
};
use crate::vm::QuizIntent;

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_stats_and_topics() {
    let repo = InMemoryRepository::new();
    repo.save_stats(&CumulativeStats::new(8, 5))
        .await
        .expect("save stats");

    let mut harness = setup_view_harness(ViewKind::Home, sample_questions(), Arc::new(repo));
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    for expected in [
        "Questions answered: 8",
        "Correct answers: 5",
        "Accuracy: 62%",
        "Start Quiz",
        "Squares",
        "Cubes",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
}

struct FailingStatsRepo;

#[async_trait::async_trait]
impl StatsRepository for FailingStatsRepo {
    async fn get_stats(&self) -> Result<Option<CumulativeStats>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn save_stats(&self, _stats: &CumulativeStats) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_shows_zero_stats_when_storage_fails() {
    let mut harness =
        setup_view_harness(ViewKind::Home, sample_questions(), Arc::new(FailingStatsRepo));
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Questions answered: 0"), "missing zero stats in {html}");
    assert!(html.contains("Accuracy: 0%"), "missing accuracy in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_flags_fallback_bank() {
    let mut harness =
        setup_view_harness(ViewKind::Home, Vec::new(), Arc::new(InMemoryRepository::new()));
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("sample question"), "missing fallback notice in {html}");
    assert!(html.contains("Test"), "missing fallback topic in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let mut harness = setup_default_harness(ViewKind::Quiz);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Q1/2"), "missing progress in {html}");
    assert!(html.contains("30s"), "missing timer in {html}");
    assert!(!html.contains("Submit"), "submit shown for empty input in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn topic_quiz_smoke_renders_only_that_topic() {
    let mut harness = setup_default_harness(ViewKind::TopicQuiz("Cubes".to_string()));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Q1/1"), "missing progress in {html}");
    assert!(html.contains("Cube of 3?"), "missing prompt in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn unknown_topic_smoke_renders_empty_message() {
    let mut harness = setup_default_harness(ViewKind::TopicQuiz("Graphs".to_string()));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("no questions for this topic"), "missing message in {html}");
}

fn quiz_score(harness: &ViewHarness) -> u32 {
    let vm = harness
        .quiz_handles
        .as_ref()
        .expect("quiz handles")
        .vm();
    harness
        .dom
        .in_runtime(|| vm.peek().as_ref().map_or(0, |vm| vm.session().score()))
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn quiz_view_smoke_counts_down_and_grades_once() {
    let mut harness = setup_default_harness(ViewKind::Quiz);
    harness.rebuild();
    harness.settle().await;
    assert!(harness.render().contains("30s"));

    harness.advance_seconds(1).await;
    let html = harness.render();
    assert!(html.contains("29s"), "missing 29s in {html}");
    harness.advance_seconds(1).await;
    let html = harness.render();
    assert!(html.contains("28s"), "missing 28s in {html}");

    harness.advance_seconds(28).await;
    let html = harness.render();
    assert!(html.contains("Correct!"), "missing auto-grade in {html}");
    assert!(html.contains("Next Question"), "missing next button in {html}");
    assert_eq!(quiz_score(&harness), 1);

    // The finished countdown no longer grades anything.
    harness.advance_seconds(10).await;
    assert_eq!(quiz_score(&harness), 1);
    assert!(harness.render().contains("Q1/2"));

    let dispatch = harness.quiz_handles.as_ref().expect("quiz handles").dispatch();
    harness.dom.in_runtime(|| dispatch.call(QuizIntent::Next));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Q2/2"), "missing second question in {html}");
    assert!(html.contains("30s"), "timer did not restart in {html}");

    harness.advance_seconds(1).await;
    let html = harness.render();
    assert!(html.contains("29s"), "missing 29s after next in {html}");
    assert!(!html.contains("28s"), "timer ran twice per second in {html}");
}
