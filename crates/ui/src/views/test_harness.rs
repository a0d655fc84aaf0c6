use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::{Question, QuizSettings};
use services::{QuestionBank, QuizLoopService, SilentNarrator, StatsService};
use storage::repository::{InMemoryRepository, StatsRepository};

use crate::context::{UiApp, build_app_context};
use crate::views::quiz::QuizTestHandles;
use crate::views::{HomeView, QuizView, TopicQuizView};

#[derive(Clone)]
struct TestApp {
    quiz_loop: Arc<QuizLoopService>,
    stats: Arc<StatsService>,
}

impl UiApp for TestApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    fn stats(&self) -> Arc<StatsService> {
        Arc::clone(&self.stats)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Quiz,
    TopicQuiz(String),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    quiz_handles: Option<QuizTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    if let Some(handles) = props.quiz_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::TopicQuiz(chapter) => rsx! { TopicQuizView { chapter } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub quiz_handles: Option<QuizTestHandles>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Run whatever is ready without letting a paused clock auto-advance.
    pub async fn settle(&mut self) {
        for _ in 0..4 {
            let _ = tokio::time::timeout(Duration::ZERO, self.dom.wait_for_work()).await;
            self.dom.process_events();
            self.dom.render_immediate(&mut NoOpMutations);
            tokio::task::yield_now().await;
        }
    }

    /// Move the paused clock forward one second at a time.
    pub async fn advance_seconds(&mut self, seconds: u64) {
        for _ in 0..seconds {
            tokio::time::advance(Duration::from_secs(1)).await;
            self.settle().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn sample_questions() -> Vec<Question> {
    vec![
        Question::new("Squares", "12^2 = ?", "144", "12 x 12 = 144").unwrap(),
        Question::new("Cubes", "Cube of 3?", "27", "3 x 3 x 3 = 27").unwrap(),
    ]
}

pub fn setup_view_harness(
    view: ViewKind,
    questions: Vec<Question>,
    stats_repo: Arc<dyn StatsRepository>,
) -> ViewHarness {
    let stats = Arc::new(StatsService::new(stats_repo));
    let quiz_loop = Arc::new(QuizLoopService::new(
        Arc::new(QuestionBank::new(questions)),
        Arc::clone(&stats),
        Arc::new(SilentNarrator),
        QuizSettings::new(5, 30).expect("settings"),
    ));
    let app = Arc::new(TestApp { quiz_loop, stats });
    let quiz_handles = match view {
        ViewKind::Quiz | ViewKind::TopicQuiz(_) => Some(QuizTestHandles::default()),
        ViewKind::Home => None,
    };

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            quiz_handles: quiz_handles.clone(),
        },
    );
    ViewHarness { dom, quiz_handles }
}

pub fn setup_default_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness(view, sample_questions(), Arc::new(InMemoryRepository::new()))
}
