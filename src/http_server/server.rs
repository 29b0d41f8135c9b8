//! # HTTP Server
//!
//! Combines the route modules under `/api/v1`, applies CORS and request
//! logging, and serves the result.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::{self, Next},
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use uuid::Uuid;

use crate::observability::{log_event, Event};
use crate::service::{Journal, Validator};
use crate::store::InMemoryDocumentStore;

use super::board_routes::board_routes;
use super::config::ServerConfig;
use super::element_routes::element_routes;
use super::health_routes::health_routes;
use super::page_routes::page_routes;
use super::recap_routes::recap_routes;
use super::SharedJournal;

/// Header carrying the request id, echoed back on every response
pub const REQUEST_ID: &str = "x-request-id";

pub struct HttpServer {
    config: ServerConfig,
    journal: SharedJournal,
    router: Router,
}

impl HttpServer {
    /// Server over a fresh in-memory store
    pub fn with_config(config: ServerConfig) -> Self {
        let store = Arc::new(InMemoryDocumentStore::new());
        let journal = Arc::new(Journal::new(store, Validator::new(), config.frontend_url.clone()));
        Self::with_journal(config, journal)
    }

    pub fn with_journal(config: ServerConfig, journal: SharedJournal) -> Self {
        let router = Self::build_router(&config, Arc::clone(&journal));
        Self {
            config,
            journal,
            router,
        }
    }

    fn build_router(config: &ServerConfig, journal: SharedJournal) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<HeaderValue> = config
                .cors_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        let api = Router::new()
            .merge(board_routes(Arc::clone(&journal)))
            .merge(page_routes(Arc::clone(&journal)))
            .merge(element_routes(Arc::clone(&journal)))
            .merge(recap_routes(Arc::clone(&journal)));

        Router::new()
            .merge(health_routes(journal))
            .nest("/api/v1", api)
            .layer(middleware::from_fn(log_requests))
            .layer(cors)
    }

    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    pub fn journal(&self) -> &SharedJournal {
        &self.journal
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process is stopped
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address: {}", self.config.socket_addr()),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        log_event(
            Event::ServerStart,
            &[
                ("addr", &listener.local_addr()?.to_string()),
                ("frontend_url", &self.config.frontend_url),
            ],
        );

        axum::serve(listener, self.router).await?;

        log_event(Event::ServerStop, &[]);
        Ok(())
    }
}

/// Log every request and echo or assign its request id
async fn log_requests(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let path = loggable_path(request.uri().path());
    let request_id = request
        .headers()
        .get(REQUEST_ID)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID, value);
    }

    log_event(
        Event::HttpRequest,
        &[
            ("duration_ms", &started.elapsed().as_millis().to_string()),
            ("method", &method),
            ("path", &path),
            ("request_id", &request_id),
            ("status", &response.status().as_u16().to_string()),
        ],
    );
    response
}

/// Request path with any secret segment masked
fn loggable_path(path: &str) -> String {
    let mut segments: Vec<&str> = path.split('/').collect();
    let secret_at = segments
        .windows(3)
        .position(|window| window[0] == "boards" && matches!(window[1], "edit" | "public"))
        .map(|at| at + 2);
    match secret_at {
        Some(at) => {
            segments[at] = ":token";
            segments.join("/")
        }
        None => path.to_string(),
    }
}
