/// Runtime orchestrator module - Gateway

mod non_interactive;
mod orchestrator;
mod repl;

pub use non_interactive::{NonInteractiveResult, NonInteractiveRunner};
pub use orchestrator::Orchestrator;
pub use repl::{format_message, run_repl, ReplCommand};
