use std::time::Duration;

use dioxus::core::{Task, spawn_forever};
use dioxus::prelude::*;
use dioxus_router::Link;
use services::{AdvanceOutcome, CountdownId, TickOutcome};
use tracing::debug;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::{QuestionVm, QuizIntent, QuizScreenVm, QuizVm, start_quiz};

const TICK: Duration = Duration::from_secs(1);

#[component]
pub fn QuizView() -> Element {
    rsx! {
        QuizScreen { topic: None }
    }
}

#[component]
pub fn TopicQuizView(chapter: String) -> Element {
    rsx! {
        QuizScreen { key: "{chapter}", topic: Some(chapter.clone()) }
    }
}

#[component]
fn QuizScreen(#[props(!optional)] topic: Option<String>) -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();

    let initial = use_hook({
        let quiz_loop = quiz_loop.clone();
        move || start_quiz(&quiz_loop, topic)
    });
    let mut vm = use_signal(|| initial.as_ref().ok().cloned());
    let mut error = use_signal(|| initial.as_ref().err().copied());
    let mut ticker = use_signal(|| None::<(CountdownId, Task)>);

    // One ticker task per live countdown; a new id replaces the old task.
    {
        let quiz_loop = quiz_loop.clone();
        use_effect(move || {
            let live = vm.read().as_ref().and_then(QuizVm::countdown_id);
            let current = (*ticker.peek()).map(|(id, _)| id);
            if live == current {
                return;
            }
            if let Some((_, task)) = ticker.write().take() {
                task.cancel();
            }
            let Some(id) = live else {
                return;
            };
            let quiz_loop = quiz_loop.clone();
            let task = spawn(async move {
                loop {
                    tokio::time::sleep(TICK).await;
                    let outcome = vm
                        .write()
                        .as_mut()
                        .map_or(TickOutcome::Stale, |vm| vm.tick(&quiz_loop, id));
                    if !matches!(outcome, TickOutcome::Running { .. }) {
                        debug!(countdown = id.value(), ?outcome, "countdown ticker finished");
                        break;
                    }
                }
            });
            ticker.set(Some((id, task)));
        });
    }

    {
        let quiz_loop = quiz_loop.clone();
        use_drop(move || {
            if let Ok(mut guard) = vm.try_write() {
                if let Some(vm) = guard.as_mut() {
                    vm.abandon(&quiz_loop);
                }
            }
        });
    }

    let dispatch = {
        let quiz_loop = quiz_loop.clone();
        use_callback(move |intent: QuizIntent| match intent {
            QuizIntent::Input(text) => {
                if let Some(vm) = vm.write().as_mut() {
                    vm.set_answer(text);
                }
            }
            QuizIntent::Submit => {
                if let Some(vm) = vm.write().as_mut() {
                    vm.submit(&quiz_loop);
                }
            }
            QuizIntent::SpeakQuestion => {
                if let Some(vm) = vm.read().as_ref() {
                    vm.speak_question(&quiz_loop);
                }
            }
            QuizIntent::SpeakExplanation => {
                if let Some(vm) = vm.read().as_ref() {
                    vm.speak_explanation(&quiz_loop);
                }
            }
            QuizIntent::Restart => {
                let result = vm
                    .write()
                    .as_mut()
                    .map_or(Err(ViewError::Unknown), |vm| vm.restart(&quiz_loop));
                error.set(result.err());
            }
            QuizIntent::Next => {
                let result = vm
                    .write()
                    .as_mut()
                    .map_or(Err(ViewError::Unknown), |vm| vm.next(&quiz_loop));
                match result {
                    Ok(AdvanceOutcome::Completed(tally)) => {
                        // The fold outlives this view so a finished attempt always counts.
                        let quiz_loop = quiz_loop.clone();
                        spawn_forever(async move {
                            let stats = quiz_loop.record_completion(tally).await;
                            if let Ok(mut guard) = vm.try_write() {
                                if let Some(vm) = guard.as_mut() {
                                    vm.set_stats(stats);
                                }
                            }
                        });
                        error.set(None);
                    }
                    Ok(AdvanceOutcome::Next { .. }) => error.set(None),
                    Err(err) => error.set(Some(err)),
                }
            }
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch, vm);
            }
        }
    }

    let screen = vm.read().as_ref().map(QuizVm::screen);

    rsx! {
        div { class: "page quiz",
            if let Some(err) = error() {
                div { class: "error",
                    p { "{err.message()}" }
                    Link { to: Route::Home {}, "Back to Home" }
                }
            }
            match screen {
                None | Some(QuizScreenVm::Idle) => rsx! {},
                Some(QuizScreenVm::Question(question)) => rsx! {
                    QuestionPanel { question, dispatch }
                },
                Some(QuizScreenVm::Completed(done)) => rsx! {
                    section { class: "completed",
                        h2 { "Quiz complete" }
                        p { class: "score", "Score: {done.score_label}" }
                        if let Some(stats) = done.stats {
                            p { "All time: {stats.total_correct}/{stats.total_answered} correct" }
                        }
                        button {
                            class: "primary",
                            onclick: move |_| dispatch.call(QuizIntent::Restart),
                            "Try Again"
                        }
                        Link { to: Route::Home {}, "Home" }
                    }
                },
            }
        }
    }
}

#[component]
fn QuestionPanel(question: QuestionVm, dispatch: Callback<QuizIntent>) -> Element {
    let graded = question.review.is_some();
    let can_submit = question.can_submit;
    let timer_class = if question.timer_urgent { "timer urgent" } else { "timer" };

    rsx! {
        section { class: "question",
            div { class: "quiz-header",
                span { class: "progress", "{question.progress_label}" }
                span { class: "{timer_class}", "{question.timer_label}" }
            }
            div { class: "prompt",
                p { "{question.prompt}" }
                button {
                    class: "speak",
                    title: "Read the question aloud",
                    onclick: move |_| dispatch.call(QuizIntent::SpeakQuestion),
                    "🔊"
                }
            }
            div { class: "answer-row",
                input {
                    id: "quiz-answer",
                    r#type: "text",
                    placeholder: "Type your answer",
                    autofocus: true,
                    disabled: graded,
                    value: "{question.answer_input}",
                    oninput: move |evt: FormEvent| dispatch.call(QuizIntent::Input(evt.value())),
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.key() == Key::Enter && can_submit {
                            evt.prevent_default();
                            dispatch.call(QuizIntent::Submit);
                        }
                    },
                }
                if can_submit {
                    button {
                        class: "primary",
                        onclick: move |_| dispatch.call(QuizIntent::Submit),
                        "Submit"
                    }
                }
            }
            if let Some(review) = question.review {
                div { class: if review.is_correct { "review correct" } else { "review wrong" },
                    p { class: "verdict", "{review.verdict_label}" }
                    p { "Answer: {review.answer}" }
                    div { class: "explanation",
                        p { "{review.explanation}" }
                        button {
                            class: "speak",
                            title: "Read the explanation aloud",
                            onclick: move |_| dispatch.call(QuizIntent::SpeakExplanation),
                            "🔊"
                        }
                    }
                    button {
                        class: "primary",
                        onclick: move |_| dispatch.call(QuizIntent::Next),
                        "Next Question"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: std::rc::Rc<std::cell::RefCell<Option<Callback<QuizIntent>>>>,
    vm: std::rc::Rc<std::cell::RefCell<Option<Signal<Option<QuizVm>>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, vm: Signal<Option<QuizVm>>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<Option<QuizVm>> {
        (*self.vm.borrow()).expect("quiz vm registered")
    }
}
