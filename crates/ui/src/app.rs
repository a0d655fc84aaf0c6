use dioxus::prelude::*;
use dioxus_router::Router;

use crate::routes::Route;

const APP_TITLE: &str = "CBSE Maths 8 Quiz";

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "{APP_TITLE}" }

        main { class: "quiz-app",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! { FatalPanel { details: format!("{errors:?}") } },
                Router::<Route> {}
            }
        }
    }
}

#[component]
fn FatalPanel(details: String) -> Element {
    rsx! {
        section { class: "fatal",
            h1 { "The quiz stopped unexpectedly" }
            p { "Your saved statistics are safe. Restart the app to keep practising." }
            details {
                summary { "Details" }
                pre { "{details}" }
            }
        }
    }
}
