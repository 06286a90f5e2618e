// Gateway module for models - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod fallback;
mod gateway;
mod http;
mod traits;
mod types;

// Public re-exports - the ONLY way to access model functionality
pub use fallback::local_fallback;
pub use gateway::AiGateway;
pub use http::HttpTransport;
pub use traits::ChatTransport;
#[cfg(test)]
pub use traits::MockChatTransport;
pub use types::{ChatCompletion, ChatMessage, ChatRequest, Choice, ChoiceMessage, MessageRole};
