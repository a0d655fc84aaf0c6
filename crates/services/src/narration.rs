/// Text-to-speech capability.
///
/// Best-effort: implementations swallow their own failures and callers never
/// wait for speech to finish.
pub trait Narrator: Send + Sync {
    /// Start speaking `text`.
    fn speak(&self, text: &str);

    /// Stop any speech in progress.
    fn cancel(&self);
}

/// Narrator for environments without speech synthesis.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNarrator;

impl Narrator for SilentNarrator {
    fn speak(&self, _text: &str) {}

    fn cancel(&self) {}
}
