use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{HomeVm, map_home};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let stats = ctx.stats();
    let quiz_loop = ctx.quiz_loop();

    let resource = use_resource(move || {
        let stats = stats.clone();
        let quiz_loop = quiz_loop.clone();
        async move {
            let totals = stats.load().await;
            Ok::<HomeVm, ViewError>(map_home(
                &totals,
                quiz_loop.topics(),
                quiz_loop.bank().is_fallback(),
            ))
        }
    });
    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page home",
            h2 { "Class 8 Maths Quiz" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(vm) => rsx! {
                    section { class: "stats",
                        p { "{vm.stats.answered_label}" }
                        p { "{vm.stats.correct_label}" }
                        p { "{vm.stats.accuracy_label}" }
                    }
                    if vm.using_fallback {
                        p { class: "notice", "Questions could not be loaded. Showing a sample question." }
                    }
                    Link { class: "button primary", to: Route::Quiz {}, "Start Quiz" }
                    section { class: "topics",
                        h3 { "Topics" }
                        ul {
                            for topic in vm.topics {
                                li { key: "{topic}",
                                    Link { to: Route::TopicQuiz { chapter: topic.clone() }, "{topic}" }
                                }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}
