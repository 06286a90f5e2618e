/// Session management module - Gateway

mod manager;
mod state;

pub use manager::Session;
pub use state::{SessionEvent, SessionObserver, SessionState, SubmitOutcome, Transcript};
