//! HTTP server with graceful shutdown

use axum::Router;
use http::{header, HeaderValue, Method};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

use crate::config::{Config, CorsConfig};
use crate::error::Result;

/// Server instance
pub struct Server {
    config: Config,
}

impl Server {
    /// Create a new server instance
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the server with the given router
    pub async fn serve(self, app: Router) -> Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.service.port));

        tracing::info!("Starting {} on {}", self.config.service.name, addr);

        // Layers are applied in reverse order (bottom layer is innermost)
        let body_limit = self.config.service.body_limit_mb * 1024 * 1024;
        let cors_layer = build_cors_layer(&self.config.cors);

        let app = app
            // CORS (outermost layer)
            .layer(cors_layer)
            // Compression
            .layer(CompressionLayer::new())
            // Request timeout, so a stuck store cannot hang a request forever
            .layer(TimeoutLayer::with_status_code(
                http::StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(self.config.service.timeout_secs),
            ))
            // Request body size limit
            .layer(RequestBodyLimitLayer::new(body_limit))
            // Request/response tracing
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().include_headers(true))
                    .on_response(DefaultOnResponse::new().include_headers(true)),
            )
            // Panic recovery (innermost layer)
            .layer(CatchPanicLayer::new());

        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// Build the CORS layer from configuration
///
/// Exactly one origin may call the API from a browser; anything else gets
/// no CORS grant. An unset or unparsable origin denies all cross-origin
/// callers.
fn build_cors_layer(cors: &CorsConfig) -> CorsLayer {
    match cors.origin.as_deref() {
        Some(origin) => match HeaderValue::from_str(origin) {
            // list() grants the header only when the request's Origin
            // matches; exact() would emit it unconditionally
            Ok(value) => CorsLayer::new()
                .allow_origin(AllowOrigin::list([value]))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                ])
                .allow_headers([header::CONTENT_TYPE]),
            Err(_) => {
                tracing::warn!(
                    "Invalid cors.origin value {:?}; denying all cross-origin requests",
                    origin
                );
                CorsLayer::new()
            }
        },
        None => {
            tracing::warn!("cors.origin not configured; denying all cross-origin requests");
            CorsLayer::new()
        }
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl+C), starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }

    tracing::info!("Shutdown signal received, draining requests...");
}
