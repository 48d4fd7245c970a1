//! HTTP server
//!
//! Combines the cluster routes with a health endpoint and serves them.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::observability::Logger;

use super::cluster_routes::{cluster_routes, ClusterState};
use super::config::HttpServerConfig;
use super::API_PREFIX;

/// HTTP server for the failover daemon.
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    pub fn new(state: Arc<ClusterState>) -> Self {
        Self::with_config(HttpServerConfig::default(), state)
    }

    pub fn with_config(config: HttpServerConfig, state: Arc<ClusterState>) -> Self {
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    fn build_router(config: &HttpServerConfig, state: Arc<ClusterState>) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .route("/health", get(health_handler))
            .nest(API_PREFIX, cluster_routes(state))
            .layer(cors)
    }

    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing).
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process exits.
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid listen address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        Logger::info(
            "HTTP_SERVER_STARTED",
            &[
                ("addr", &addr.to_string()),
                ("api_prefix", API_PREFIX),
            ],
        );

        axum::serve(listener, self.router).await
    }
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::*;
    use crate::failover::FailoverController;
    use crate::gateway::{GatewayResult, InterfaceGateway, NetworkInterfaceState};
    use crate::inventory::{ClusterInventory, Node};

    struct NullGateway;

    #[async_trait::async_trait]
    impl InterfaceGateway for NullGateway {
        async fn fetch(&self, _node: &Node) -> GatewayResult<NetworkInterfaceState> {
            Ok(NetworkInterfaceState {
                fingerprint: "fp".to_string(),
                alias_ranges: vec![],
            })
        }

        async fn set_alias_ranges(
            &self,
            _node: &Node,
            _fingerprint: &str,
            _ranges: &[String],
        ) -> GatewayResult<()> {
            Ok(())
        }
    }

    fn test_state() -> Arc<ClusterState> {
        let inventory = Arc::new(
            ClusterInventory::new(
                "proj",
                Ipv4Addr::new(10, 0, 0, 5),
                vec![Node::new("node-a", "zone-a")],
            )
            .unwrap(),
        );
        let controller = FailoverController::new(Arc::new(NullGateway), inventory.clone());
        Arc::new(ClusterState::new(inventory, controller))
    }

    #[test]
    fn test_server_default_addr() {
        let server = HttpServer::new(test_state());
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_router_builds() {
        let server = HttpServer::new(test_state());
        let _router = server.router();
    }
}
