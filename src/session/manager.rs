use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::state::{SessionEvent, SessionObserver, SessionState, SubmitOutcome, Transcript};
use crate::app::Config;
use crate::constants::{APOLOGY_MESSAGE, DISPLAY_HISTORY_FACTOR, TIMEOUT_MESSAGE, WELCOME_MESSAGE};
use crate::models::{AiGateway, ChatMessage};

/// Conversation session: owns the transcript and serializes submissions
///
/// Cloning is cheap and every clone shares the same state, so a renderer can
/// read the transcript while a submission is awaiting the gateway.
#[derive(Clone)]
pub struct Session {
    gateway: Arc<AiGateway>,
    state: Arc<Mutex<SessionState>>,
    observers: Arc<Mutex<Vec<SessionObserver>>>,
    max_history: usize,
    response_timeout: Option<Duration>,
}

impl Session {
    /// Create a session that starts with the welcome message
    pub fn new(config: &Config, gateway: Arc<AiGateway>) -> Self {
        let state = SessionState {
            transcript: Transcript::with_welcome(WELCOME_MESSAGE),
            ..SessionState::default()
        };

        Self {
            gateway,
            state: Arc::new(Mutex::new(state)),
            observers: Arc::new(Mutex::new(Vec::new())),
            max_history: config.history.max_history,
            response_timeout: config.session.response_timeout(),
        }
    }

    /// Register a callback for transcript and pending changes
    pub fn subscribe(&self, observer: SessionObserver) {
        self.observers.lock().push(observer);
    }

    /// Snapshot of the transcript for rendering
    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.state.lock().transcript.messages().to_vec()
    }

    pub fn is_pending(&self) -> bool {
        self.state.lock().pending
    }

    pub fn input(&self) -> String {
        self.state.lock().input.clone()
    }

    pub fn set_input(&self, text: impl Into<String>) {
        self.state.lock().input = text.into();
    }

    /// Submit whatever is in the input buffer
    pub async fn submit_input(&self) -> SubmitOutcome {
        let text = self.input();
        self.submit(&text).await
    }

    /// The single entry point that grows the transcript
    ///
    /// Blank text and submissions made while another call is in flight are
    /// dropped without touching any state. Accepted text always ends with
    /// exactly one assistant entry and `pending` back to false, even when the
    /// returned future is dropped before the gateway answers.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        let window = {
            let mut state = self.state.lock();

            if text.trim().is_empty() {
                debug!("Ignoring blank submission");
                return SubmitOutcome::Empty;
            }
            if state.pending {
                debug!("Ignoring submission while a reply is pending");
                return SubmitOutcome::Busy;
            }

            state.transcript.push(ChatMessage::user(text));
            state.pending = true;
            state.input.clear();
            self.prune_display(&mut state);

            state.transcript.window(self.max_history)
        };
        let mut turn = OpenTurn::new(self);

        info!("Submitting question ({} messages in window)", window.len());
        self.notify(&[
            SessionEvent::MessageAppended(ChatMessage::user(text)),
            SessionEvent::PendingChanged(true),
        ]);

        let (outcome, content) = self.resolve(&window).await;
        turn.close(content);

        outcome
    }

    /// Append the assistant entry for the open turn and leave pending
    fn close_turn(&self, content: String) {
        let reply = ChatMessage::assistant(content);

        {
            let mut state = self.state.lock();
            state.transcript.push(reply.clone());
            state.pending = false;
            self.prune_display(&mut state);
        }

        self.notify(&[
            SessionEvent::MessageAppended(reply),
            SessionEvent::PendingChanged(false),
        ]);
    }

    /// Ask the gateway, mapping failures and timeouts to placeholder text
    async fn resolve(&self, window: &[ChatMessage]) -> (SubmitOutcome, String) {
        let call = self.gateway.get_response(window);

        let result = match self.response_timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => {
                    warn!("No reply within {:?}, giving up on this turn", limit);
                    return (SubmitOutcome::TimedOut, TIMEOUT_MESSAGE.to_string());
                }
            },
            None => call.await,
        };

        match result {
            Ok(reply) => (SubmitOutcome::Replied, reply),
            Err(e) => {
                warn!("Error fetching response: {}", e);
                (SubmitOutcome::Failed, APOLOGY_MESSAGE.to_string())
            }
        }
    }

    /// Keep the displayed transcript bounded
    fn prune_display(&self, state: &mut SessionState) {
        let cap = self.max_history * DISPLAY_HISTORY_FACTOR;
        let dropped = state.transcript.prune(cap);
        if dropped > 0 {
            debug!("Pruned {} old message(s) from the transcript", dropped);
        }
    }

    fn notify(&self, events: &[SessionEvent]) {
        // Call observers without holding the lock so they may read the session
        let observers = self.observers.lock().clone();
        for event in events {
            for observer in &observers {
                observer(event);
            }
        }
    }
}

/// An accepted submission that still owes the transcript its assistant entry
///
/// Dropping it unclosed (the caller gave up on the `submit` future) closes the
/// turn with the apology so the session does not stay pending.
struct OpenTurn<'a> {
    session: &'a Session,
    closed: bool,
}

impl<'a> OpenTurn<'a> {
    fn new(session: &'a Session) -> Self {
        Self {
            session,
            closed: false,
        }
    }

    fn close(&mut self, content: String) {
        if !self.closed {
            self.closed = true;
            self.session.close_turn(content);
        }
    }
}

impl Drop for OpenTurn<'_> {
    fn drop(&mut self) {
        if !self.closed {
            warn!("Submission abandoned before a reply arrived");
            self.close(APOLOGY_MESSAGE.to_string());
        }
    }
}
