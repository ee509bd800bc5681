//! A2A (Agent-to-Agent) gateway for the echo agent.
//!
//! - Agent Card discovery (`.well-known/agent-card.json`)
//! - JSON-RPC 2.0 task API (`message/send`, `tasks/cancel`, `tasks/get`)
//! - Shared-secret API key gate in front of the task API
//! - HTTP gateway server (axum)

pub mod agent_card;
pub mod auth;
pub mod capability;
pub mod error;
pub mod events;
pub mod executor;
pub mod extract;
pub mod handler;
pub mod server;
pub mod types;
