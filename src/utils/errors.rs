use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug)]
pub enum ImmigoError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    ValidationError(String),
}

/// Errors raised while talking to the chat-completion service
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// The service answered with a non-2xx status
    #[error("API error: {status} - {body}")]
    ApiError { status: u16, body: String },

    /// The service answered 2xx but the payload could not be used
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The connection failed before a complete response arrived
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Conversation is empty")]
    EmptyConversation,
}

impl GatewayError {
    /// Structured failures reported by the service itself. These are answered
    /// locally; everything else propagates to the caller.
    pub fn is_api_error(&self) -> bool {
        matches!(
            self,
            GatewayError::ApiError { .. } | GatewayError::MalformedResponse(_)
        )
    }
}
