//! Scripted assistant for testing and offline operation.
//!
//! `ScriptedAssistant` returns pre-configured replies in order and keeps
//! a call log for verification, so conversation flows can be exercised
//! without a real understanding service. `OfflineAssistant` models the
//! not-configured case: the capability probe reports false and every
//! call errors.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{AssistantContext, AssistantError, AssistantReply, ConversationAssistant};

/// Assistant double with queued replies and call tracking.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAssistant {
    replies: Arc<Mutex<VecDeque<ScriptedResponse>>>,
    calls: Arc<Mutex<Vec<String>>>,
    /// Simulated latency per request.
    delay: Duration,
}

/// A configured response.
#[derive(Debug, Clone)]
enum ScriptedResponse {
    Reply(AssistantReply),
    Unavailable(String),
    Network(String),
}

impl ScriptedAssistant {
    /// Creates an assistant with an empty reply queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply.
    pub fn with_reply(self, reply: AssistantReply) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(ScriptedResponse::Reply(reply));
        self
    }

    /// Queues an unavailable error.
    pub fn with_unavailable(self, message: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(ScriptedResponse::Unavailable(message.into()));
        self
    }

    /// Queues a network error.
    pub fn with_network_error(self, message: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(ScriptedResponse::Network(message.into()));
        self
    }

    /// Simulates request latency, for exercising in-flight behavior.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Utterances received so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of `process` invocations.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ConversationAssistant for ScriptedAssistant {
    async fn process(
        &self,
        utterance: &str,
        _context: AssistantContext<'_>,
    ) -> Result<AssistantReply, AssistantError> {
        self.calls.lock().unwrap().push(utterance.to_string());
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(ScriptedResponse::Reply(reply)) => Ok(reply),
            Some(ScriptedResponse::Unavailable(message)) => {
                Err(AssistantError::unavailable(message))
            }
            Some(ScriptedResponse::Network(message)) => Err(AssistantError::network(message)),
            None => Ok(AssistantReply::message(
                "Tell me more about that expense - what did you buy, where, and for how much?",
            )),
        }
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Assistant that is not configured at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineAssistant;

#[async_trait]
impl ConversationAssistant for OfflineAssistant {
    async fn process(
        &self,
        _utterance: &str,
        _context: AssistantContext<'_>,
    ) -> Result<AssistantReply, AssistantError> {
        Err(AssistantError::unavailable("assistant not configured"))
    }

    fn is_available(&self) -> bool {
        false
    }
}
