use async_trait::async_trait;

use super::types::{ChatCompletion, ChatRequest};
use crate::utils::GatewayError;

/// One round trip to a chat-completion backend
///
/// Implementations must report non-2xx answers as [`GatewayError::ApiError`],
/// 2xx bodies that arrive whole but cannot be parsed as
/// [`GatewayError::MalformedResponse`], and connection failures (including one
/// that cuts a body short) as [`GatewayError::NetworkError`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatCompletion, GatewayError>;
}
