//! API web server

use anyhow::Result;
use axum::Router;
use colored::Colorize;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use super::api;
use super::context::AppContext;

/// API server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

/// Router with API routes and the artifacts directory mounted at `/artifacts`
pub fn build_router(ctx: Arc<AppContext>) -> Router {
    let artifacts = ServeDir::new(&ctx.config.artifacts_dir);

    Router::new()
        .merge(api::api_router())
        .nest_service("/artifacts", artifacts)
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}

/// Main API server
pub struct ApiServer {
    config: ServerConfig,
    ctx: Arc<AppContext>,
}

impl ApiServer {
    pub fn new(config: ServerConfig, ctx: AppContext) -> Self {
        Self {
            config,
            ctx: Arc::new(ctx),
        }
    }

    /// Serve until Ctrl+C
    pub async fn start(&self) -> Result<()> {
        let app = build_router(self.ctx.clone());
        let addr = SocketAddr::new(self.config.host, self.config.port);

        println!("\n🧪 Test orchestrator started!");
        println!("   Listening: http://{}", addr);
        println!("   Target: {}", self.ctx.config.target_url);
        println!(
            "   Artifacts: {}",
            self.ctx.config.artifacts_dir.display().to_string().cyan()
        );
        println!("\n   Press Ctrl+C to stop.\n");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        log::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl+C: {}", e);
        // Without a signal handler, keep serving
        std::future::pending::<()>().await;
    }
}
