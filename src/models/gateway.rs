use std::sync::Arc;
use tracing::{debug, error, warn};

use super::fallback::local_fallback;
use super::http::HttpTransport;
use super::traits::ChatTransport;
use super::types::{ChatMessage, ChatRequest, MessageRole};
use crate::app::{ApiConfig, Config};
use crate::constants::{CONFIG_ERROR_MESSAGE, SYSTEM_PROMPT};
use crate::utils::{sliding_window, GatewayError};

/// Turns a conversation into exactly one remote call and normalizes the
/// outcome into displayable text.
pub struct AiGateway {
    transport: Arc<dyn ChatTransport>,
    api: ApiConfig,
    max_history: usize,
}

impl AiGateway {
    pub fn new(config: &Config, transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            transport,
            api: config.api.clone(),
            max_history: config.history.max_history,
        }
    }

    /// Gateway talking HTTP to the configured endpoint
    pub fn from_config(config: &Config) -> Result<Self, GatewayError> {
        let transport = HttpTransport::new(&config.api)?;
        Ok(Self::new(config, Arc::new(transport)))
    }

    /// Reply text for `messages`
    ///
    /// A missing key and structured service errors both resolve to text.
    /// Only failures without an HTTP response come back as `Err`.
    pub async fn get_response(&self, messages: &[ChatMessage]) -> Result<String, GatewayError> {
        if self.api.credential().is_none() {
            error!("API key not configured. Set api.key in config.toml or IMMIGO_API_KEY");
            return Ok(CONFIG_ERROR_MESSAGE.to_string());
        }

        if messages.is_empty() {
            return Err(GatewayError::EmptyConversation);
        }

        let request = self.build_request(messages);
        debug!("Number of messages sent to AI API: {}", request.messages.len());

        match self.transport.send(&request).await {
            Ok(completion) => match completion.first_content() {
                Some(content) => Ok(content.to_string()),
                None => {
                    warn!("Response contained no choices, using backup reply");
                    Ok(local_fallback(last_user_content(messages)))
                }
            },
            Err(e) if e.is_api_error() => {
                warn!("Failed to get AI response: {}. Using backup reply", e);
                Ok(local_fallback(last_user_content(messages)))
            }
            Err(e) => {
                error!("Failed to get AI response: {}", e);
                Err(e)
            }
        }
    }

    /// System directive followed by the newest `max_history` messages
    fn build_request(&self, messages: &[ChatMessage]) -> ChatRequest {
        let window = sliding_window(messages, self.max_history);

        let mut api_messages = Vec::with_capacity(window.len() + 1);
        api_messages.push(ChatMessage::system(SYSTEM_PROMPT));
        api_messages.extend_from_slice(window);

        ChatRequest {
            model: self.api.model.clone(),
            messages: api_messages,
            max_tokens: self.api.max_tokens,
            temperature: self.api.temperature,
        }
    }
}

/// Content of the newest user message, or of the newest message if the
/// caller broke the "ends with a user turn" convention.
fn last_user_content(messages: &[ChatMessage]) -> &str {
    messages
        .iter()
        .rev()
        .find(|m| m.role == MessageRole::User)
        .or_else(|| messages.last())
        .map(|m| m.content.as_str())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::traits::MockChatTransport;
    use crate::models::types::ChatCompletion;
    use pretty_assertions::assert_eq;

    fn config_with_key(max_history: usize) -> Config {
        let mut config = Config::default();
        config.api.key = Some("sk-test".to_string());
        config.history.max_history = max_history;
        config
    }

    fn conversation(len: usize) -> Vec<ChatMessage> {
        (0..len)
            .map(|i| {
                if i % 2 == 0 {
                    ChatMessage::user(format!("question {}", i))
                } else {
                    ChatMessage::assistant(format!("answer {}", i))
                }
            })
            .collect()
    }

    #[tokio::test]
    async fn test_success_returns_first_choice() {
        let mut transport = MockChatTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Ok(ChatCompletion::from_text("OK")));

        let gateway = AiGateway::new(&config_with_key(20), Arc::new(transport));
        let reply = gateway
            .get_response(&[ChatMessage::user("hello")])
            .await
            .unwrap();

        assert_eq!(reply, "OK");
    }

    #[tokio::test]
    async fn test_request_has_system_prompt_and_window() {
        let messages = conversation(25);
        let expected_window = messages[5..].to_vec();

        let mut transport = MockChatTransport::new();
        transport
            .expect_send()
            .withf(move |req: &ChatRequest| {
                req.messages.len() == 21
                    && req.messages[0] == ChatMessage::system(SYSTEM_PROMPT)
                    && req.messages[1..] == expected_window[..]
                    && req.model == "gpt-3.5-turbo"
                    && req.max_tokens == 1000
                    && (req.temperature - 0.7).abs() < f32::EPSILON
            })
            .times(1)
            .returning(|_| Ok(ChatCompletion::from_text("fine")));

        let gateway = AiGateway::new(&config_with_key(20), Arc::new(transport));
        assert_eq!(gateway.get_response(&messages).await.unwrap(), "fine");
    }

    #[tokio::test]
    async fn test_missing_key_skips_network() {
        let mut transport = MockChatTransport::new();
        transport.expect_send().times(0);

        let gateway = AiGateway::new(&Config::default(), Arc::new(transport));
        let reply = gateway
            .get_response(&[ChatMessage::user("visa?")])
            .await
            .unwrap();

        assert_eq!(reply, CONFIG_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_api_error_uses_fallback() {
        let cases = [
            ("Which visa suits me?", "visa types"),
            ("How are points calculated?", "points system"),
            ("What are the fees?", "application fees"),
            ("Tell me about Auckland", "\"Tell me about Auckland\""),
        ];

        for (question, expected_fragment) in cases {
            let mut transport = MockChatTransport::new();
            transport.expect_send().times(1).returning(|_| {
                Err(GatewayError::ApiError {
                    status: 500,
                    body: "internal".to_string(),
                })
            });

            let gateway = AiGateway::new(&config_with_key(20), Arc::new(transport));
            let reply = gateway
                .get_response(&[ChatMessage::user(question)])
                .await
                .unwrap();

            assert_eq!(reply, local_fallback(question));
            assert!(
                reply.contains(expected_fragment),
                "{:?} -> {:?}",
                question,
                reply
            );
        }
    }

    #[tokio::test]
    async fn test_fallback_uses_latest_user_message() {
        let mut transport = MockChatTransport::new();
        transport
            .expect_send()
            .returning(|_| Err(GatewayError::MalformedResponse("bad json".to_string())));

        let gateway = AiGateway::new(&config_with_key(20), Arc::new(transport));
        let messages = vec![
            ChatMessage::assistant("welcome"),
            ChatMessage::user("what does it cost?"),
            ChatMessage::assistant("..."),
            ChatMessage::user("and the visa?"),
        ];

        assert_eq!(
            gateway.get_response(&messages).await.unwrap(),
            local_fallback("and the visa?")
        );
    }

    #[tokio::test]
    async fn test_empty_choices_uses_fallback() {
        let mut transport = MockChatTransport::new();
        transport
            .expect_send()
            .returning(|_| Ok(ChatCompletion { choices: vec![] }));

        let gateway = AiGateway::new(&config_with_key(20), Arc::new(transport));
        assert_eq!(
            gateway
                .get_response(&[ChatMessage::user("score?")])
                .await
                .unwrap(),
            local_fallback("score?")
        );
    }

    #[tokio::test]
    async fn test_network_error_propagates() {
        let mut transport = MockChatTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Err(GatewayError::NetworkError("connection refused".to_string())));

        let gateway = AiGateway::new(&config_with_key(20), Arc::new(transport));
        let err = gateway
            .get_response(&[ChatMessage::user("visa?")])
            .await
            .unwrap_err();

        assert_eq!(
            err,
            GatewayError::NetworkError("connection refused".to_string())
        );
    }

    #[tokio::test]
    async fn test_empty_conversation_rejected() {
        let mut transport = MockChatTransport::new();
        transport.expect_send().times(0);

        let gateway = AiGateway::new(&config_with_key(20), Arc::new(transport));
        assert_eq!(
            gateway.get_response(&[]).await.unwrap_err(),
            GatewayError::EmptyConversation
        );
    }

    #[tokio::test]
    async fn test_http_500_resolves_to_fallback_end_to_end() {
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let mut config = config_with_key(20);
        config.api.url = format!("{}/v1/chat/completions", server.uri());
        let gateway = AiGateway::from_config(&config).unwrap();

        let cases = [
            ("What visa needs the most points?", "visa types"),
            ("What is my SCORE?", "points system"),
            ("How much does it cost?", "application fees"),
            ("Is Perth nice?", "\"Is Perth nice?\""),
        ];

        for (question, expected_fragment) in cases {
            let reply = gateway
                .get_response(&[ChatMessage::user(question)])
                .await
                .unwrap();

            assert_eq!(reply, local_fallback(question));
            assert!(
                reply.contains(expected_fragment),
                "{:?} -> {:?}",
                question,
                reply
            );
        }

        assert_eq!(server.received_requests().await.unwrap().len(), 4);
    }
}
