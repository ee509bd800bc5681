//! JSON-RPC 2.0 handler for A2A protocol operations.
//!
//! Dispatches JSON-RPC methods:
//! - `message/send` → run the executor, answer with the produced message
//! - `tasks/cancel` → forward to the capability's cancel
//! - `tasks/get`    → always not found; tasks are never stored
//!
//! Nothing here depends on the HTTP framework, so the same dispatch works
//! behind any router.

use crate::a2a::capability::CapabilityError;
use crate::a2a::error::A2aError;
use crate::a2a::events::{EventSink, TaskEvent, TaskEventKind};
use crate::a2a::executor::{AgentExecutor, RequestContext};
use crate::a2a::types::*;
use uuid::Uuid;

/// Dispatch a JSON-RPC request to the appropriate handler.
pub async fn dispatch(req: JsonRpcRequest, executor: &AgentExecutor) -> JsonRpcResponse {
    if req.jsonrpc != "2.0" {
        return A2aError::InvalidRequest("Invalid JSON-RPC version, expected 2.0".to_string())
            .into_response(req.id);
    }

    let id = req.id;
    let result = match req.method.as_str() {
        "message/send" => handle_send_message(req.params, executor).await,
        "tasks/cancel" => handle_cancel_task(req.params, executor).await,
        "tasks/get" => handle_get_task(req.params),
        method @ ("message/stream" | "tasks/resubscribe") => Err(
            A2aError::UnsupportedOperation(format!("{} requires streaming", method)),
        ),
        other => Err(A2aError::MethodNotFound(other.to_string())),
    };

    match result {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => e.into_response(id),
    }
}

fn parse_params<T: serde::de::DeserializeOwned>(params: serde_json::Value) -> Result<T, A2aError> {
    serde_json::from_value(params).map_err(|e| A2aError::InvalidParams(e.to_string()))
}

/// Handle `message/send` — run the capability and build the response from the sink.
async fn handle_send_message(
    params: serde_json::Value,
    executor: &AgentExecutor,
) -> Result<serde_json::Value, A2aError> {
    let send_params: SendMessageParams = parse_params(params)?;
    let message = send_params.message;

    let ctx = RequestContext {
        task_id: message
            .task_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
        context_id: message
            .context_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
        message: Some(message),
    };

    tracing::info!(
        "A2A: task {} dispatched to '{}'",
        ctx.task_id,
        executor.capability_name()
    );

    let mut sink = EventSink::new();
    executor.execute(&ctx, &mut sink).await;
    let events = sink.drain();

    let response = build_send_response(ctx, events);
    serde_json::to_value(&response).map_err(|e| A2aError::Internal(e.to_string()))
}

/// Result of `message/send`: a bare message, or a task wrapping the event log.
#[derive(Debug, serde::Serialize)]
#[serde(untagged)]
pub enum SendResponse {
    Message(Message),
    Task(Task),
}

/// Fold drained events into the response shape.
///
/// Exactly one message event is returned as-is. Anything else becomes a
/// task whose status is `failed` if any event failed, `completed` otherwise.
pub fn build_send_response(ctx: RequestContext, events: Vec<TaskEvent>) -> SendResponse {
    let mut messages = Vec::new();
    let mut failure = None;
    for event in events {
        match event.kind {
            TaskEventKind::Message(m) => messages.push(m),
            TaskEventKind::Failed { error } => failure = Some(error),
        }
    }

    if failure.is_none() && messages.len() == 1 {
        if let Some(message) = messages.pop() {
            return SendResponse::Message(message);
        }
    }

    let (state, status_message) = match failure {
        Some(error) => {
            let mut m = Message::agent_text(error);
            m.context_id = Some(ctx.context_id.clone());
            m.task_id = Some(ctx.task_id.clone());
            (TaskState::Failed, Some(m))
        }
        None => (TaskState::Completed, messages.last().cloned()),
    };

    let history = ctx.message.into_iter().chain(messages).collect();

    SendResponse::Task(Task::new(
        ctx.task_id,
        ctx.context_id,
        TaskStatus {
            state,
            message: status_message,
            timestamp: Some(chrono::Utc::now().to_rfc3339()),
        },
        history,
    ))
}

/// Handle `tasks/cancel` — ask the capability to cancel.
async fn handle_cancel_task(
    params: serde_json::Value,
    executor: &AgentExecutor,
) -> Result<serde_json::Value, A2aError> {
    let cancel_params: TaskIdParams = parse_params(params)?;
    let ctx = RequestContext {
        task_id: cancel_params.id.clone(),
        context_id: String::new(),
        message: None,
    };

    match executor.cancel(&ctx).await {
        Ok(()) => {
            tracing::info!("A2A: Canceled task {}", cancel_params.id);
            Ok(serde_json::json!({
                "id": cancel_params.id,
                "status": {"state": TaskState::Canceled},
                "kind": "task",
            }))
        }
        Err(CapabilityError::Unsupported(reason)) => Err(A2aError::UnsupportedOperation(reason)),
        Err(CapabilityError::Failed(reason)) => Err(A2aError::Internal(reason)),
    }
}

/// Handle `tasks/get` — no task store, so every id is unknown.
fn handle_get_task(params: serde_json::Value) -> Result<serde_json::Value, A2aError> {
    let get_params: TaskIdParams = parse_params(params)?;
    Err(A2aError::TaskNotFound(get_params.id))
}
