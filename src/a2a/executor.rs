//! Agent executor: runs one request through extract → capability → sink.

use crate::a2a::capability::{AgentCapability, CapabilityError};
use crate::a2a::events::{EventSink, TaskEventKind};
use crate::a2a::extract::get_message_text;
use crate::a2a::types::Message;
use std::sync::Arc;

/// Per-request context handed to the executor.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub task_id: String,
    pub context_id: String,
    pub message: Option<Message>,
}

#[derive(Clone)]
pub struct AgentExecutor {
    capability: Arc<dyn AgentCapability>,
}

impl AgentExecutor {
    pub fn new(capability: Arc<dyn AgentCapability>) -> Self {
        Self { capability }
    }

    pub fn capability_name(&self) -> &str {
        self.capability.name()
    }

    /// Invoke the capability on the request text and publish the outcome.
    ///
    /// Capability errors become a `Failed` event; this never returns an error.
    pub async fn execute(&self, ctx: &RequestContext, sink: &mut EventSink) {
        let text = get_message_text(ctx.message.as_ref());

        match self.capability.invoke(&text).await {
            Ok(reply) => {
                let mut message = Message::agent_text(reply);
                message.context_id = Some(ctx.context_id.clone());
                message.task_id = Some(ctx.task_id.clone());
                sink.publish_message(message);
            }
            Err(e) => {
                tracing::warn!(
                    "A2A: capability '{}' failed on task {}: {}",
                    self.capability.name(),
                    ctx.task_id,
                    e
                );
                sink.publish(TaskEventKind::Failed {
                    error: e.to_string(),
                });
            }
        }
    }

    pub async fn cancel(&self, ctx: &RequestContext) -> Result<(), CapabilityError> {
        self.capability.cancel(Some(&ctx.task_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::a2a::capability::EchoCapability;
    use async_trait::async_trait;

    struct FailingCapability;

    #[async_trait]
    impl AgentCapability for FailingCapability {
        fn name(&self) -> &str {
            "failing"
        }

        async fn invoke(&self, _text: &str) -> crate::a2a::capability::Result<String> {
            Err(CapabilityError::Failed("upstream unavailable".to_string()))
        }

        async fn cancel(&self, _task_id: Option<&str>) -> crate::a2a::capability::Result<()> {
            Ok(())
        }
    }

    fn ctx(message: Option<Message>) -> RequestContext {
        RequestContext {
            task_id: "task-1".to_string(),
            context_id: "ctx-1".to_string(),
            message,
        }
    }

    #[tokio::test]
    async fn test_execute_publishes_echo() {
        let executor = AgentExecutor::new(Arc::new(EchoCapability));
        let mut sink = EventSink::new();
        executor
            .execute(&ctx(Some(Message::user_text("hi"))), &mut sink)
            .await;

        let events = sink.drain();
        assert_eq!(events.len(), 1);
        let TaskEventKind::Message(m) = &events[0].kind else {
            unreachable!("expected a message event, got {:?}", events[0].kind);
        };
        assert_eq!(m.parts[0].as_text(), Some("Echo: hi"));
        assert_eq!(m.context_id.as_deref(), Some("ctx-1"));
        assert_eq!(m.task_id.as_deref(), Some("task-1"));
    }

    #[tokio::test]
    async fn test_execute_without_message_echoes_empty() {
        let executor = AgentExecutor::new(Arc::new(EchoCapability));
        let mut sink = EventSink::new();
        executor.execute(&ctx(None), &mut sink).await;

        let events = sink.drain();
        assert!(matches!(
            &events[0].kind,
            TaskEventKind::Message(m) if m.parts[0].as_text() == Some("Echo: ")
        ));
    }

    #[tokio::test]
    async fn test_capability_failure_becomes_event() {
        let executor = AgentExecutor::new(Arc::new(FailingCapability));
        let mut sink = EventSink::new();
        executor
            .execute(&ctx(Some(Message::user_text("hi"))), &mut sink)
            .await;

        let events = sink.drain();
        assert_eq!(
            events[0].kind,
            TaskEventKind::Failed {
                error: "capability failed: upstream unavailable".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_cancel_delegates_to_capability() {
        let executor = AgentExecutor::new(Arc::new(EchoCapability));
        let err = executor.cancel(&ctx(None)).await.expect_err("unsupported");
        assert!(matches!(err, CapabilityError::Unsupported(_)));
    }
}
