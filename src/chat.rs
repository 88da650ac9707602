use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

use crate::assistant;
use crate::error::QuerySenseError;
use crate::fixtures;
use crate::models::ChatMessage;

pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1500);

/// Append-only transcript plus the single-slot gate that keeps one reply in flight.
#[derive(Debug)]
pub struct ChatSession {
    history: Vec<ChatMessage>,
    gate: Arc<Semaphore>,
    delay: Duration,
}

/// A scheduled assistant reply. Holding it keeps the session in the typing state.
#[must_use = "the reply is only appended once passed to ChatSession::complete"]
#[derive(Debug)]
pub struct PendingReply {
    handle: JoinHandle<String>,
    permit: OwnedSemaphorePermit,
}

impl ChatSession {
    pub fn new(delay: Duration) -> Self {
        Self::with_history(fixtures::initial_chat_history(), delay)
    }

    pub fn with_history(history: Vec<ChatMessage>, delay: Duration) -> Self {
        Self {
            history,
            gate: Arc::new(Semaphore::new(1)),
            delay,
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn is_typing(&self) -> bool {
        self.gate.available_permits() == 0
    }

    /// Records the question and schedules the reply. Must be called inside a tokio runtime.
    #[instrument(skip(self))]
    pub fn submit(&mut self, question: &str) -> Result<PendingReply, QuerySenseError> {
        if question.trim().is_empty() {
            return Err(QuerySenseError::EmptyMessage);
        }

        let permit = Arc::clone(&self.gate)
            .try_acquire_owned()
            .map_err(|_| QuerySenseError::AssistantBusy)?;

        self.history.push(ChatMessage::user(question));

        let intent = assistant::classify(question);
        debug!(?intent, "scheduled assistant reply");

        let delay = self.delay;
        let question = question.to_string();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            assistant::respond(&question)
        });

        Ok(PendingReply { handle, permit })
    }

    /// Waits out the simulated latency and appends the assistant message.
    pub async fn complete(&mut self, pending: PendingReply) -> Result<ChatMessage, QuerySenseError> {
        let PendingReply { handle, permit } = pending;
        let reply = handle
            .await
            .map_err(|err| QuerySenseError::ReplyTask(err.to_string()))?;

        let message = ChatMessage::assistant(reply);
        self.history.push(message.clone());
        drop(permit);
        Ok(message)
    }

    pub async fn ask(&mut self, question: &str) -> Result<ChatMessage, QuerySenseError> {
        let pending = self.submit(question)?;
        self.complete(pending).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn reply_arrives_after_delay() {
        let mut session = ChatSession::new(DEFAULT_REPLY_DELAY);
        let seeded = session.history().len();

        let started = Instant::now();
        let reply = session.ask("What are my optimization opportunities?").await.unwrap();

        assert!(started.elapsed() >= DEFAULT_REPLY_DELAY);
        assert_eq!(reply.role, Role::Assistant);
        assert!(reply.message.contains("customer_events"));
        assert_eq!(session.history().len(), seeded + 2);
        assert_eq!(session.history()[seeded].role, Role::User);
        assert!(!session.is_typing());
    }

    #[tokio::test(start_paused = true)]
    async fn second_question_is_blocked_while_typing() {
        let mut session = ChatSession::with_history(Vec::new(), DEFAULT_REPLY_DELAY);
        let pending = session.submit("Where can I save the most money?").unwrap();
        assert!(session.is_typing());

        let err = session.submit("Compare this month to last month").unwrap_err();
        assert!(matches!(err, QuerySenseError::AssistantBusy));
        assert_eq!(session.history().len(), 1);

        session.complete(pending).await.unwrap();
        assert!(!session.is_typing());
        assert!(session.submit("Compare this month to last month").is_ok());
    }

    #[tokio::test]
    async fn blank_input_is_rejected() {
        let mut session = ChatSession::with_history(Vec::new(), Duration::ZERO);
        let err = session.submit("   \n").unwrap_err();
        assert!(matches!(err, QuerySenseError::EmptyMessage));
        assert!(session.history().is_empty());
        assert!(!session.is_typing());
    }

    #[tokio::test(start_paused = true)]
    async fn history_only_grows() {
        let mut session = ChatSession::with_history(Vec::new(), Duration::from_millis(10));
        let mut snapshot: Vec<ChatMessage> = Vec::new();
        for question in ["hello there", "Show me ROI by department"] {
            session.ask(question).await.unwrap();
            assert!(session.history().starts_with(&snapshot));
            snapshot = session.history().to_vec();
        }
        assert_eq!(snapshot.len(), 4);
        assert!(snapshot[1].message.contains("\"hello there\""));
    }
}
