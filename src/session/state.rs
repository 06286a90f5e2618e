use std::sync::Arc;
use tracing::warn;

use crate::models::{ChatMessage, MessageRole};
use crate::utils::sliding_window;

/// Ordered conversation as shown to the user, oldest first
///
/// Only user and assistant turns are stored; the system directive is added
/// per request by the gateway.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    /// Transcript holding a single assistant greeting
    pub fn with_welcome(welcome: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::assistant(welcome)],
        }
    }

    /// Append a user or assistant turn; system messages are refused
    pub fn push(&mut self, message: ChatMessage) -> bool {
        if message.role == MessageRole::System {
            warn!("Refusing to store a system message in the transcript");
            return false;
        }
        self.messages.push(message);
        true
    }

    /// Newest `cap` messages, the slice that goes to the gateway
    pub fn window(&self, cap: usize) -> Vec<ChatMessage> {
        sliding_window(&self.messages, cap).to_vec()
    }

    /// Drop the oldest messages until at most `cap` remain
    pub fn prune(&mut self, cap: usize) -> usize {
        let excess = self.messages.len().saturating_sub(cap);
        if excess > 0 {
            self.messages.drain(..excess);
        }
        excess
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

/// Mutable state owned by a [`Session`](super::Session)
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub transcript: Transcript,
    /// A gateway call is in flight
    pub pending: bool,
    /// Text waiting to be submitted
    pub input: String,
}

/// Change notifications for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    MessageAppended(ChatMessage),
    PendingChanged(bool),
}

/// Observer callback type for session changes
pub type SessionObserver = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

/// Result of a submission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank text, nothing happened
    Empty,
    /// Another call is in flight, nothing happened
    Busy,
    /// The gateway produced text (real reply, fallback or config notice)
    Replied,
    /// The gateway failed; an apology was appended
    Failed,
    /// No answer within the response timeout; a timeout notice was appended
    TimedOut,
}

impl SubmitOutcome {
    /// Whether the submission was accepted into the transcript
    pub fn accepted(&self) -> bool {
        !matches!(self, SubmitOutcome::Empty | SubmitOutcome::Busy)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubmitOutcome::Empty => "empty",
            SubmitOutcome::Busy => "busy",
            SubmitOutcome::Replied => "replied",
            SubmitOutcome::Failed => "failed",
            SubmitOutcome::TimedOut => "timed_out",
        }
    }
}
