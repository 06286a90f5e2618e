use serde::{Deserialize, Serialize};

use crate::{
    cli::OutputFormat,
    session::{Session, SubmitOutcome},
};

/// Result of a single non-interactive question
#[derive(Debug, Serialize, Deserialize)]
pub struct NonInteractiveResult {
    /// The question that was submitted
    pub prompt: String,
    /// The assistant entry the question produced
    pub response: String,
    /// How the submission resolved (replied, failed, timed_out, ...)
    pub outcome: String,
    /// Wall-clock time in milliseconds
    pub duration_ms: u128,
}

impl NonInteractiveResult {
    /// Whether the user got something other than an error placeholder
    pub fn is_success(&self) -> bool {
        self.outcome == SubmitOutcome::Replied.as_str()
    }
}

/// Runs one question through a fresh session
pub struct NonInteractiveRunner {
    session: Session,
}

impl NonInteractiveRunner {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Submit `prompt` and collect the reply
    pub async fn execute(&self, prompt: String) -> NonInteractiveResult {
        let start_time = std::time::Instant::now();

        let outcome = self.session.submit(&prompt).await;
        let response = if outcome.accepted() {
            self.session
                .transcript()
                .last()
                .map(|m| m.content.clone())
                .unwrap_or_default()
        } else {
            String::new()
        };

        NonInteractiveResult {
            prompt,
            response,
            outcome: outcome.as_str().to_string(),
            duration_ms: start_time.elapsed().as_millis(),
        }
    }

    /// Format the result according to the output format
    pub fn format_result(&self, result: &NonInteractiveResult, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(result).unwrap_or_else(|e| {
                format!("{{\"error\": \"Failed to serialize result: {}\"}}", e)
            }),
            OutputFormat::Text => result.response.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Config;
    use crate::models::{AiGateway, ChatCompletion, MockChatTransport};
    use std::sync::Arc;

    fn runner(reply: &'static str) -> NonInteractiveRunner {
        let mut config = Config::default();
        config.api.key = Some("sk-test".to_string());

        let mut transport = MockChatTransport::new();
        transport
            .expect_send()
            .returning(move |_| Ok(ChatCompletion::from_text(reply)));

        let gateway = AiGateway::new(&config, Arc::new(transport));
        NonInteractiveRunner::new(Session::new(&config, Arc::new(gateway)))
    }

    #[tokio::test]
    async fn test_execute_collects_reply() {
        let runner = runner("You may qualify for a 189 visa.");
        let result = runner.execute("Do I qualify?".to_string()).await;

        assert_eq!(result.response, "You may qualify for a 189 visa.");
        assert_eq!(result.outcome, "replied");
        assert!(result.is_success());
        assert_eq!(
            runner.format_result(&result, OutputFormat::Text),
            "You may qualify for a 189 visa."
        );
    }

    #[tokio::test]
    async fn test_blank_prompt_is_not_sent() {
        let runner = runner("unused");
        let result = runner.execute("  ".to_string()).await;

        assert_eq!(result.outcome, "empty");
        assert!(result.response.is_empty());
        assert!(!result.is_success());
    }

    #[tokio::test]
    async fn test_json_output() {
        let runner = runner("OK");
        let result = runner.execute("hello".to_string()).await;

        let value: serde_json::Value =
            serde_json::from_str(&runner.format_result(&result, OutputFormat::Json)).unwrap();
        assert_eq!(value["prompt"], "hello");
        assert_eq!(value["response"], "OK");
        assert_eq!(value["outcome"], "replied");
    }
}
