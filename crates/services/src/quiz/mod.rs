mod countdown;
mod progress;
mod session;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use countdown::{Countdown, CountdownId, CountdownTick};
pub use progress::QuizProgress;
pub use session::{AdvanceOutcome, QuizPhase, QuizSession, TickOutcome};
pub use workflow::{AdvanceResult, QuizLoopService};
