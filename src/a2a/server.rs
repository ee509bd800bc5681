//! A2A Gateway HTTP server powered by axum.
//!
//! Serves:
//! - `GET  /.well-known/agent-card.json` — Agent Card discovery (public)
//! - `GET  /healthz`                     — Health check (public)
//! - `POST /`                            — JSON-RPC 2.0 endpoint (API key gated)

use crate::a2a::auth::{self, AGENT_CARD_PATH, AuthGate, HEALTH_PATH};
use crate::a2a::error::A2aError;
use crate::a2a::executor::AgentExecutor;
use crate::a2a::{agent_card, handler, types::*};
use crate::config::GatewayConfig;
use axum::{
    Router,
    body::Bytes,
    extract::State,
    middleware,
    response::Json,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared, read-only state for the A2A gateway.
#[derive(Clone)]
pub struct A2aState {
    pub card: Arc<AgentCard>,
    pub executor: AgentExecutor,
}

/// Build the axum router for the A2A gateway.
pub fn build_router(state: A2aState, gate: AuthGate) -> Router {
    Router::new()
        .route(AGENT_CARD_PATH, get(get_agent_card))
        .route(HEALTH_PATH, get(health_check))
        .route("/", post(handle_jsonrpc))
        .layer(middleware::from_fn_with_state(
            Arc::new(gate),
            auth::require_api_key,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the A2A gateway server and run until Ctrl-C / SIGTERM.
pub async fn start_server(config: &GatewayConfig, executor: AgentExecutor) -> anyhow::Result<()> {
    let gate = AuthGate::new(config);
    gate.log_status();

    let state = A2aState {
        card: Arc::new(agent_card::build_agent_card(config)),
        executor,
    };

    let app = build_router(state, gate);
    let addr: SocketAddr = format!("{}:{}", config.bind, config.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid gateway address: {}", e))?;

    tracing::info!("A2A Gateway starting on http://{}", addr);
    tracing::info!("   Agent Card: {}{}", config.public_url(), AGENT_CARD_PATH.trim_start_matches('/'));
    tracing::info!("   JSON-RPC:   {}", config.public_url());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("A2A Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}

/// GET /.well-known/agent-card.json — Agent Card discovery.
async fn get_agent_card(State(state): State<A2aState>) -> Json<AgentCard> {
    Json(state.card.as_ref().clone())
}

/// POST / — JSON-RPC 2.0 endpoint.
///
/// Always answers 200; protocol failures travel in the JSON-RPC error object.
async fn handle_jsonrpc(State(state): State<A2aState>, body: Bytes) -> Json<JsonRpcResponse> {
    let value: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!("A2A: unparsable JSON-RPC body: {}", e);
            return Json(A2aError::Parse(e.to_string()).into_response(serde_json::Value::Null));
        }
    };

    // Valid JSON that is not a request object: echo back whatever id it carried.
    let id = value.get("id").cloned().unwrap_or(serde_json::Value::Null);
    let req: JsonRpcRequest = match serde_json::from_value(value) {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!("A2A: malformed JSON-RPC request: {}", e);
            return Json(A2aError::InvalidRequest(format!("Invalid request: {}", e)).into_response(id));
        }
    };

    Json(handler::dispatch(req, &state.executor).await)
}

/// GET /healthz — Health check.
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::a2a::capability::EchoCapability;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_app() -> Router {
        let config = GatewayConfig {
            port: 18789,
            ..GatewayConfig::default()
        };
        let state = A2aState {
            card: Arc::new(agent_card::build_agent_card(&config)),
            executor: AgentExecutor::new(Arc::new(EchoCapability)),
        };
        build_router(state, AuthGate::new(&config))
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let req = Request::builder()
            .uri("/healthz")
            .body(Body::empty())
            .expect("request");

        let resp = test_app().oneshot(req).await.expect("response");
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, serde_json::json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_agent_card_endpoint() {
        let req = Request::builder()
            .uri("/.well-known/agent-card.json")
            .body(Body::empty())
            .expect("request");

        let resp = test_app().oneshot(req).await.expect("response");
        assert_eq!(resp.status(), StatusCode::OK);
        let card = body_json(resp).await;
        assert_eq!(card["name"], "Echo Agent");
        assert_eq!(card["url"], "http://localhost:18789/");
    }

    #[tokio::test]
    async fn test_jsonrpc_send_message() {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "method": "message/send",
            "params": {
                "message": {
                    "role": "user",
                    "messageId": "m-1",
                    "parts": [{"kind": "text", "text": "Hello from A2A test!"}]
                }
            },
            "id": 1
        });

        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).expect("json")))
            .expect("request");

        let resp = test_app().oneshot(req).await.expect("response");
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["id"], 1);
        assert_eq!(json["result"]["parts"][0]["text"], "Echo: Hello from A2A test!");
    }

    #[tokio::test]
    async fn test_jsonrpc_parse_error() {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .expect("request");

        let resp = test_app().oneshot(req).await.expect("response");
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["error"]["code"], -32700);
        assert!(json["id"].is_null());
    }

    async fn post_raw(body: &str) -> serde_json::Value {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request");

        let resp = test_app().oneshot(req).await.expect("response");
        assert_eq!(resp.status(), StatusCode::OK);
        body_json(resp).await
    }

    #[tokio::test]
    async fn test_jsonrpc_missing_method_is_invalid_request() {
        let json = post_raw(r#"{"jsonrpc":"2.0","id":5}"#).await;
        assert_eq!(json["error"]["code"], -32600);
        assert_eq!(json["id"], 5);
    }

    #[tokio::test]
    async fn test_jsonrpc_non_object_is_invalid_request() {
        let json = post_raw("[1, 2, 3]").await;
        assert_eq!(json["error"]["code"], -32600);
        assert!(json["id"].is_null());
    }
}
