//! vipd - floating-VIP failover orchestrator for GCE alias IP ranges
//!
//! Exactly one node in a fixed cluster should carry the VIP at any time;
//! clients reach the active node through it. vipd locates the current
//! holder, demotes it, and promotes a new holder with convergence
//! verification, driving the cloud provider's alias-IP-range attribute
//! under fingerprint-based optimistic concurrency.

pub mod cli;
pub mod failover;
pub mod gateway;
pub mod http_server;
pub mod inventory;
pub mod observability;
