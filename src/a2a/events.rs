//! Request-scoped event sink.
//!
//! The executor publishes result events here while handling one request; the
//! dispatcher drains them in FIFO order to build the response. A sink is
//! created per request and dropped with it.

use crate::a2a::types::Message;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq)]
pub enum TaskEventKind {
    /// A message produced by the capability.
    Message(Message),
    /// The capability failed; `error` is surfaced to the caller.
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskEvent {
    /// Position within this request's event log, starting at 0.
    pub sequence: u64,
    /// RFC 3339 publish time.
    pub timestamp: String,
    pub kind: TaskEventKind,
}

#[derive(Debug, Default)]
pub struct EventSink {
    queue: VecDeque<TaskEvent>,
    next_sequence: u64,
}

impl EventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, stamping it with the next sequence number.
    pub fn publish(&mut self, kind: TaskEventKind) {
        let event = TaskEvent {
            sequence: self.next_sequence,
            timestamp: chrono::Utc::now().to_rfc3339(),
            kind,
        };
        self.next_sequence += 1;
        self.queue.push_back(event);
    }

    pub fn publish_message(&mut self, message: Message) {
        self.publish(TaskEventKind::Message(message));
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Take every queued event in publish order, leaving the sink empty.
    pub fn drain(&mut self) -> Vec<TaskEvent> {
        self.queue.drain(..).collect()
    }
}
