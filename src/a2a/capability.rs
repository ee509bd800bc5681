//! Agent capabilities: the pluggable unit of work behind the gateway.
//!
//! The gateway only knows the [`AgentCapability`] trait. A concrete variant is
//! picked in `main` and injected into the executor; [`EchoCapability`] is the
//! reference implementation.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    /// The capability does not implement this operation.
    #[error("{0}")]
    Unsupported(String),

    /// The capability tried and failed (network, inference, ...).
    #[error("capability failed: {0}")]
    Failed(String),
}

pub type Result<T> = std::result::Result<T, CapabilityError>;

#[async_trait]
pub trait AgentCapability: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Turn input text into output text.
    async fn invoke(&self, text: &str) -> Result<String>;

    /// Cancel a running invocation.
    async fn cancel(&self, task_id: Option<&str>) -> Result<()>;
}

/// Echoes its input back with an `"Echo: "` prefix.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoCapability;

pub const ECHO_PREFIX: &str = "Echo: ";

#[async_trait]
impl AgentCapability for EchoCapability {
    fn name(&self) -> &str {
        "echo"
    }

    async fn invoke(&self, text: &str) -> Result<String> {
        tracing::debug!("EchoCapability received input: {}", text);
        Ok(format!("{ECHO_PREFIX}{text}"))
    }

    async fn cancel(&self, _task_id: Option<&str>) -> Result<()> {
        // Echo completes inside invoke; there is never anything to cancel.
        Err(CapabilityError::Unsupported("cancel not supported".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[tokio::test]
    async fn test_echo_invoke() {
        let out = EchoCapability.invoke("hello world").await.expect("invoke");
        assert_eq!(out, "Echo: hello world");
    }

    #[tokio::test]
    async fn test_echo_empty_input() {
        let out = EchoCapability.invoke("").await.expect("invoke");
        assert_eq!(out, "Echo: ");
    }

    #[tokio::test]
    async fn test_echo_cancel_is_unsupported() {
        let err = EchoCapability.cancel(Some("task-1")).await.expect_err("cancel");
        assert_eq!(
            err,
            CapabilityError::Unsupported("cancel not supported".to_string())
        );
    }

    #[tokio::test]
    async fn test_echo_is_idempotent() {
        let cap = EchoCapability;
        let first = cap.invoke("same").await.expect("invoke");
        let second = cap.invoke("same").await.expect("invoke");
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn prop_echo_prefixes_any_input(s in ".*") {
            let out = tokio_test::block_on(EchoCapability.invoke(&s)).expect("invoke");
            prop_assert_eq!(out, format!("Echo: {s}"));
        }
    }
}
