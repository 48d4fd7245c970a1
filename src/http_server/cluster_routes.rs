//! Cluster HTTP routes
//!
//! The six operational endpoints, mounted under
//! `/manage-gce-floating-ip/api/v1.0`:
//!
//! - `GET  /get-cluster-members` — configured node list
//! - `GET  /get-cluster-vip` — configured VIP
//! - `GET  /get-master-instance` — current holder (404 when none)
//! - `GET  /get-instance/:name` — live interface state of one node
//! - `POST /demote-master/:name` — clear the VIP from a node
//! - `POST /promote-master/:name` — move the VIP to a node

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::failover::{FailoverController, FailoverError, PromoteOutcome};
use crate::gateway::GatewayError;
use crate::inventory::{ClusterInventory, Node};
use crate::observability::Logger;

// ==================
// Shared State
// ==================

/// State shared across handlers.
pub struct ClusterState {
    inventory: Arc<ClusterInventory>,
    controller: FailoverController,
}

impl ClusterState {
    pub fn new(inventory: Arc<ClusterInventory>, controller: FailoverController) -> Self {
        Self {
            inventory,
            controller,
        }
    }
}

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct NodeInfo {
    pub name: String,
    pub zone: String,
}

impl From<&Node> for NodeInfo {
    fn from(node: &Node) -> Self {
        Self {
            name: node.name.clone(),
            zone: node.zone.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MembersResponse {
    pub project: String,
    pub nodes: Vec<NodeInfo>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct VipResponse {
    pub vip: String,
}

#[derive(Debug, Serialize)]
pub struct MasterResponse {
    pub name: String,
    pub zone: String,
    pub vip: String,
}

#[derive(Debug, Serialize)]
pub struct InstanceResponse {
    pub name: String,
    pub zone: String,
    pub alias_ranges: Vec<String>,
    pub holds_vip: bool,
    pub checked_at: String,
}

#[derive(Debug, Serialize)]
pub struct OperationResponse {
    pub success: bool,
    pub node: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

// ==================
// Routes
// ==================

/// Create the cluster routes.
pub fn cluster_routes(state: Arc<ClusterState>) -> Router {
    Router::new()
        .route("/get-cluster-members", get(get_cluster_members_handler))
        .route("/get-cluster-vip", get(get_cluster_vip_handler))
        .route("/get-master-instance", get(get_master_instance_handler))
        .route("/get-instance/:name", get(get_instance_handler))
        .route("/demote-master/:name", post(demote_master_handler))
        .route("/promote-master/:name", post(promote_master_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn get_cluster_members_handler(
    State(state): State<Arc<ClusterState>>,
) -> Json<MembersResponse> {
    let nodes: Vec<NodeInfo> = state.inventory.nodes().iter().map(NodeInfo::from).collect();
    let total = nodes.len();

    Json(MembersResponse {
        project: state.inventory.project().to_string(),
        nodes,
        total,
    })
}

async fn get_cluster_vip_handler(State(state): State<Arc<ClusterState>>) -> Json<VipResponse> {
    Json(VipResponse {
        vip: state.inventory.vip().to_string(),
    })
}

async fn get_master_instance_handler(
    State(state): State<Arc<ClusterState>>,
) -> Result<Json<MasterResponse>, (StatusCode, Json<ErrorResponse>)> {
    let holder = state
        .controller
        .locate_holder()
        .await
        .map_err(gateway_error_response)?;

    match holder {
        Some(node) => Ok(Json(MasterResponse {
            name: node.name.clone(),
            zone: node.zone.clone(),
            vip: state.inventory.vip().to_string(),
        })),
        None => Err(not_found("no node currently holds the VIP")),
    }
}

async fn get_instance_handler(
    State(state): State<Arc<ClusterState>>,
    Path(name): Path<String>,
) -> Result<Json<InstanceResponse>, (StatusCode, Json<ErrorResponse>)> {
    let node = find_node(&state, &name)?;

    let iface = state
        .controller
        .gateway()
        .fetch(node)
        .await
        .map_err(gateway_error_response)?;

    let holds_vip = iface.holds(&state.inventory.vip_cidr());
    Ok(Json(InstanceResponse {
        name: node.name.clone(),
        zone: node.zone.clone(),
        alias_ranges: iface.alias_ranges,
        holds_vip,
        checked_at: chrono::Utc::now().to_rfc3339(),
    }))
}

async fn demote_master_handler(
    State(state): State<Arc<ClusterState>>,
    Path(name): Path<String>,
) -> Result<Json<OperationResponse>, (StatusCode, Json<ErrorResponse>)> {
    let node = find_node(&state, &name)?;

    state
        .controller
        .demote(node)
        .await
        .map_err(failover_error_response)?;

    Ok(Json(OperationResponse {
        success: true,
        node: node.name.clone(),
        message: format!("{} demoted", node.name),
    }))
}

async fn promote_master_handler(
    State(state): State<Arc<ClusterState>>,
    Path(name): Path<String>,
) -> Result<(StatusCode, Json<OperationResponse>), (StatusCode, Json<ErrorResponse>)> {
    let node = find_node(&state, &name)?;

    let outcome = state
        .controller
        .promote(node)
        .await
        .map_err(failover_error_response)?;

    let status = StatusCode::from_u16(outcome.status().http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let success = matches!(outcome, PromoteOutcome::Promoted { .. });

    Ok((
        status,
        Json(OperationResponse {
            success,
            node: node.name.clone(),
            message: outcome.message(),
        }),
    ))
}

// ==================
// Error Mapping
// ==================

fn find_node<'a>(
    state: &'a ClusterState,
    name: &str,
) -> Result<&'a Node, (StatusCode, Json<ErrorResponse>)> {
    state
        .inventory
        .find_node(name)
        .ok_or_else(|| not_found(&format!("unknown instance: {}", name)))
}

fn not_found(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: message.to_string(),
            code: 404,
        }),
    )
}

fn gateway_error_response(error: GatewayError) -> (StatusCode, Json<ErrorResponse>) {
    Logger::error("GATEWAY_ERROR", &[("error", &error.to_string())]);
    let code = error.status_code();
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(ErrorResponse {
            error: error.to_string(),
            code,
        }),
    )
}

fn failover_error_response(error: FailoverError) -> (StatusCode, Json<ErrorResponse>) {
    Logger::error("FAILOVER_ERROR", &[("error", &error.to_string())]);
    let code = error.status_code();
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(ErrorResponse {
            error: error.to_string(),
            code,
        }),
    )
}
