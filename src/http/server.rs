//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the forward handler
//! - Wire up middleware (request ID, tracing, timeout, CORS, body limit)
//! - Bind server to listener and serve until shutdown
//! - Validate the forward directive and relay results

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, Method},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ForwardConfig;
use crate::forward::{Forwarder, HttpTransport, TransportError, FORWARD_URL_HEADER};
use crate::http::request::{inbound_request, request_id, request_id_layer};
use crate::http::response::{relay_response, HandlerError};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<Forwarder<HttpTransport>>,
}

/// HTTP server for the forwarding relay.
pub struct HttpServer {
    router: Router,
    config: ForwardConfig,
}

impl HttpServer {
    /// Create a new HTTP server, building the shared upstream client.
    pub fn new(config: ForwardConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(&config.upstream)?;
        let state = AppState {
            forwarder: Arc::new(Forwarder::new(transport)),
        };
        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ForwardConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route(&config.listener.forward_path, any(forward_handler))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.security.max_body_size));

        if config.security.cors_enabled {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        router.layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.timeouts.request_secs,
                ))),
        )
    }

    /// Run the server, accepting connections until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            forward_path = %self.config.listener.forward_path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Forward handler: any method on the forward path.
async fn forward_handler(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&headers).to_string();

    let response = match relay(&state, &method, &headers, body).await {
        Ok(response) => response,
        Err(e) => {
            match &e {
                HandlerError::MissingForwardUrl => {
                    tracing::warn!(request_id = %request_id, "x-forward-url header is missing in the request");
                }
                HandlerError::Upstream(source) => {
                    tracing::error!(request_id = %request_id, error = %source, "Upstream error");
                }
            }
            e.into_response()
        }
    };

    metrics::record_request(method.as_str(), response.status().as_u16(), start_time);
    response
}

async fn relay(
    state: &AppState,
    method: &Method,
    headers: &HeaderMap,
    body: Bytes,
) -> Result<Response, HandlerError> {
    if !headers.contains_key(FORWARD_URL_HEADER) {
        return Err(HandlerError::MissingForwardUrl);
    }

    let inbound = inbound_request(method, headers, body);
    let result = state.forwarder.forward(&inbound).await?;
    Ok(relay_response(result))
}
