//! Shared-secret API key gate for the A2A gateway.
//!
//! When a key is configured every request must carry it in the configured
//! header, except the public discovery and health routes. Without a key the
//! gate lets everything through; that is logged once at startup by
//! [`AuthGate::log_status`], not per request.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::config::{ApiKeyHeader, GatewayConfig};

pub const AGENT_CARD_PATH: &str = "/.well-known/agent-card.json";
pub const HEALTH_PATH: &str = "/healthz";

/// GET routes reachable without credentials.
const PUBLIC_GET_PATHS: &[&str] = &[AGENT_CARD_PATH, HEALTH_PATH];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("{header} header is required")]
    Missing { header: String },

    #[error("Invalid API key")]
    Invalid,
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Missing { .. } => StatusCode::UNAUTHORIZED,
            AuthError::Invalid => StatusCode::FORBIDDEN,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AuthError::Missing { .. } => "Unauthorized",
            AuthError::Invalid => "Forbidden",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.code(),
            "message": self.to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}

/// Immutable API key check shared by all requests.
#[derive(Clone)]
pub struct AuthGate {
    api_key: Option<Zeroizing<String>>,
    header: ApiKeyHeader,
}

impl AuthGate {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            header: config.api_key_header.clone(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Emit the startup notice describing whether auth is active.
    pub fn log_status(&self) {
        if self.is_enabled() {
            tracing::info!("API key authentication enabled ({} header)", self.header);
        } else {
            tracing::warn!("API_KEY not set. Authentication is disabled.");
        }
    }

    /// Decide whether a request may proceed.
    pub fn check(&self, method: &Method, path: &str, headers: &HeaderMap) -> Result<(), AuthError> {
        let Some(expected) = self.api_key.as_ref() else {
            return Ok(());
        };

        if method == Method::GET && PUBLIC_GET_PATHS.contains(&path) {
            return Ok(());
        }

        let provided = headers
            .get(self.header.name())
            .map(|v| v.as_bytes())
            .filter(|v| !v.is_empty());

        let Some(provided) = provided else {
            return Err(AuthError::Missing {
                header: self.header.to_string(),
            });
        };

        if bool::from(provided.ct_eq(expected.as_bytes())) {
            Ok(())
        } else {
            Err(AuthError::Invalid)
        }
    }
}

/// axum middleware running [`AuthGate::check`] before the wrapped routes.
pub async fn require_api_key(
    State(gate): State<Arc<AuthGate>>,
    request: Request,
    next: Next,
) -> Response {
    match gate.check(request.method(), request.uri().path(), request.headers()) {
        Ok(()) => next.run(request).await,
        Err(e) => {
            tracing::warn!(
                "A2A: rejected {} {} ({})",
                request.method(),
                request.uri().path(),
                e.status()
            );
            e.into_response()
        }
    }
}
