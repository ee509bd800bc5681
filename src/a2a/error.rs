//! Protocol-level errors reported back through JSON-RPC.

use crate::a2a::types::{JsonRpcResponse, error_codes};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum A2aError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl A2aError {
    /// JSON-RPC error code for this variant.
    pub fn code(&self) -> i32 {
        match self {
            A2aError::Parse(_) => error_codes::PARSE_ERROR,
            A2aError::InvalidRequest(_) => error_codes::INVALID_REQUEST,
            A2aError::MethodNotFound(_) => error_codes::METHOD_NOT_FOUND,
            A2aError::InvalidParams(_) => error_codes::INVALID_PARAMS,
            A2aError::TaskNotFound(_) => error_codes::TASK_NOT_FOUND,
            A2aError::UnsupportedOperation(_) => error_codes::UNSUPPORTED_OPERATION,
            A2aError::Internal(_) => error_codes::INTERNAL_ERROR,
        }
    }

    pub fn into_response(self, id: serde_json::Value) -> JsonRpcResponse {
        JsonRpcResponse::error(id, self.code(), self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(A2aError::MethodNotFound("x".into()).code(), -32601);
        assert_eq!(A2aError::UnsupportedOperation("x".into()).code(), -32004);
        assert_eq!(A2aError::TaskNotFound("x".into()).code(), -32001);
    }

    #[test]
    fn test_into_response_keeps_id() {
        let resp = A2aError::InvalidParams("missing message".into())
            .into_response(serde_json::json!(7));
        assert_eq!(resp.id, serde_json::json!(7));
        let err = resp.error.expect("error");
        assert_eq!(err.code, -32602);
        assert_eq!(err.message, "Invalid params: missing message");
    }
}
