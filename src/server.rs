use std::{net::SocketAddr, path::Path, sync::Arc};

use anyhow::Context;
use axum::{middleware, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    decompression::RequestDecompressionLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};

use crate::{
    book::{
        service::BookService,
        store::{BookStore, InMemoryBookStore, SqliteBookStore},
    },
    error::ErrorVerbosity,
    middleware::{
        method_not_allowed::method_not_allowed, not_found::not_found,
        trace_response_body::trace_response_body,
    },
    openapi, route,
    state::ApiState,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum StoreConfig {
    /// Books live in process memory and are lost on shutdown.
    Memory,
    /// Books live in the `books` table of a SQLite database.
    Sqlite { url: String },
}

impl StoreConfig {
    async fn open(&self) -> anyhow::Result<Arc<dyn BookStore>> {
        let store: Arc<dyn BookStore> = match self {
            StoreConfig::Memory => Arc::new(InMemoryBookStore::new()),
            StoreConfig::Sqlite { url } => Arc::new(
                SqliteBookStore::connect(url)
                    .await
                    .context("Failed to open SQLite store")?,
            ),
        };

        Ok(store)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    socket_address: SocketAddr,
    error_verbosity: ErrorVerbosity,
    store: StoreConfig,
}

impl ServerConfig {
    pub fn new(
        socket_address: SocketAddr,
        error_verbosity: ErrorVerbosity,
        store: StoreConfig,
    ) -> Self {
        Self {
            socket_address,
            error_verbosity,
            store,
        }
    }

    pub async fn from_config_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();

        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

/// Builds the complete application router on top of `state`.
pub fn app(state: ApiState) -> Router {
    Router::new()
        .merge(route::books::app::app())
        .merge(openapi::app())
        .fallback(not_found::<ApiState>)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            method_not_allowed::<ApiState>,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            trace_response_body::<ApiState>,
        ))
        .with_state(state)
}

pub struct Server {
    config: ServerConfig,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let store = self.config.store.open().await?;
        let state = ApiState::new(self.config.error_verbosity, BookService::new(store));

        let app = app(state).layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                        .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                        .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
                )
                .layer(RequestDecompressionLayer::new())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive()),
        );

        tracing::info!(addr = %self.config.socket_address, "Starting server");

        let listener = TcpListener::bind(&self.config.socket_address)
            .await
            .context("Bind failed")?;

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");

        tracing::info!("CTRL+C received");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM signal handler")
            .recv()
            .await;

        tracing::info!("SIGTERM received");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down");
}
