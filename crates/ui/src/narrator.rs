use dioxus::document::eval;
use services::Narrator;

/// Narrator backed by the webview's `speechSynthesis` API.
///
/// Does nothing when the API is missing. Must be called from inside the
/// Dioxus runtime, which is where every UI event handler runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSpeechNarrator;

pub(crate) fn speak_script(text: &str) -> String {
    format!(
        r"(function() {{
            const synth = window.speechSynthesis;
            if (!synth || typeof SpeechSynthesisUtterance === 'undefined') return;
            synth.cancel();
            synth.speak(new SpeechSynthesisUtterance({text:?}));
        }})();"
    )
}

pub(crate) const CANCEL_SCRIPT: &str = r"(function() {
    const synth = window.speechSynthesis;
    if (synth) synth.cancel();
})();";

impl Narrator for WebSpeechNarrator {
    fn speak(&self, text: &str) {
        let _ = eval(&speak_script(text));
    }

    fn cancel(&self) {
        let _ = eval(CANCEL_SCRIPT);
    }
}
