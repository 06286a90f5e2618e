pub mod app;
pub mod cli;
pub mod constants;
pub mod intake;
pub mod models;
pub mod runtime;
pub mod session;
pub mod utils;

pub use app::{load_config, Config};
pub use models::{local_fallback, AiGateway, ChatMessage, ChatTransport, MessageRole};
pub use session::{Session, SessionEvent, SubmitOutcome};
pub use utils::{GatewayError, ImmigoError};
