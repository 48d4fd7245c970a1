//! Failover controller
//!
//! Orchestrates demote/promote sequences over the interface gateway.
//! Purely coordinating: the gateway owns the wire mechanics, the locator
//! owns holder discovery, and the phase table in `state.rs` owns the
//! legal operation shape.
//!
//! Non-responsibilities:
//! - Does not decide when to fail over (the caller does)
//! - Does not retry gateway errors
//! - Does not re-invoke a failed promotion automatically
//!
//! Every mutation follows fetch-then-patch on the same node within the
//! same operation, because the provider fingerprint is single-use.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::gateway::{GatewayResult, InterfaceGateway};
use crate::inventory::{ClusterInventory, Node};
use crate::observability::Logger;

use super::errors::{FailoverError, FailoverResult};
use super::locator::VipLocator;
use super::state::{PromoteOutcome, PromotePhase};

/// Convergence attempt budget for one promote call.
///
/// The loop absorbs patch-then-read propagation latency in the provider's
/// backing store; it never retries errors.
pub const PROMOTE_ATTEMPTS: usize = 3;

/// Executes VIP demotion and promotion against the cluster.
pub struct FailoverController {
    gateway: Arc<dyn InterfaceGateway>,
    inventory: Arc<ClusterInventory>,
    /// Advisory per-VIP lock: one demote/promote at a time. Held for the
    /// whole operation and released on every exit path via the guard.
    vip_lock: Mutex<()>,
}

impl FailoverController {
    pub fn new(gateway: Arc<dyn InterfaceGateway>, inventory: Arc<ClusterInventory>) -> Self {
        Self {
            gateway,
            inventory,
            vip_lock: Mutex::new(()),
        }
    }

    pub fn inventory(&self) -> &ClusterInventory {
        &self.inventory
    }

    pub fn gateway(&self) -> &dyn InterfaceGateway {
        self.gateway.as_ref()
    }

    /// Read-only holder scan. Takes no lock: observation only.
    pub async fn locate_holder(&self) -> GatewayResult<Option<&Node>> {
        VipLocator::new(self.gateway.as_ref(), &self.inventory)
            .locate_holder()
            .await
    }

    /// Remove the VIP from `node` unconditionally.
    ///
    /// Fire-and-forget: success means the provider acknowledged the
    /// patch. There is no post-patch verification; a later holder scan is
    /// the way to confirm. Idempotent on a node that is already clear.
    pub async fn demote(&self, node: &Node) -> FailoverResult<()> {
        let _guard = self.vip_lock.lock().await;

        self.clear_alias_ranges(node).await?;
        Logger::info("DEMOTE_APPLIED", &[("node", &node.name)]);
        Ok(())
    }

    /// Move the VIP to `target`.
    ///
    /// Locates the current holder, short-circuits when the target already
    /// holds the VIP, demotes a different holder, runs the idempotent
    /// standby cleanup pass, then attempts fetch-patch-verify up to
    /// [`PROMOTE_ATTEMPTS`] times. Gateway errors abort the whole
    /// operation immediately; only a clean patch acknowledgement followed
    /// by a verification miss consumes an attempt.
    pub async fn promote(&self, target: &Node) -> FailoverResult<PromoteOutcome> {
        let _guard = self.vip_lock.lock().await;

        let mut phase = PromotePhase::Idle;
        self.advance(&mut phase, PromotePhase::LocatingHolder, target)?;

        let locator = VipLocator::new(self.gateway.as_ref(), &self.inventory);
        let holder = locator.locate_holder().await?;

        match holder {
            Some(holder) if holder.name == target.name => {
                self.advance(&mut phase, PromotePhase::AlreadyMaster, target)?;
                return Ok(PromoteOutcome::AlreadyMaster {
                    node: target.name.clone(),
                });
            }
            Some(holder) => {
                self.advance(&mut phase, PromotePhase::DemotingOther, target)?;
                self.clear_alias_ranges(holder).await?;
                Logger::info(
                    "PROMOTE_DEMOTED_HOLDER",
                    &[("holder", &holder.name), ("target", &target.name)],
                );
                self.advance(&mut phase, PromotePhase::CleaningStandbys, target)?;
            }
            None => {
                self.advance(&mut phase, PromotePhase::CleaningStandbys, target)?;
            }
        }

        self.clean_standbys(target).await?;

        let vip_cidr = self.inventory.vip_cidr();
        let desired = [vip_cidr.clone()];

        for attempt in 1..=PROMOTE_ATTEMPTS {
            self.advance(&mut phase, PromotePhase::AttemptingPromotion { attempt }, target)?;

            let state = self.gateway.fetch(target).await?;
            self.gateway
                .set_alias_ranges(target, &state.fingerprint, &desired)
                .await?;

            let verified = self.gateway.fetch(target).await?;
            if verified.holds(&vip_cidr) {
                self.advance(&mut phase, PromotePhase::Promoted, target)?;
                Logger::info(
                    "PROMOTE_CONVERGED",
                    &[
                        ("node", target.name.as_str()),
                        ("attempt", &attempt.to_string()),
                    ],
                );
                return Ok(PromoteOutcome::Promoted {
                    node: target.name.clone(),
                });
            }

            Logger::warn(
                "PROMOTE_VERIFY_MISS",
                &[
                    ("node", target.name.as_str()),
                    ("attempt", &attempt.to_string()),
                ],
            );
        }

        self.advance(&mut phase, PromotePhase::PromotionFailed, target)?;
        Ok(PromoteOutcome::PromotionFailed {
            node: target.name.clone(),
            attempts: PROMOTE_ATTEMPTS,
        })
    }

    /// Fetch-then-patch a node's alias range list to empty.
    async fn clear_alias_ranges(&self, node: &Node) -> FailoverResult<()> {
        let state = self.gateway.fetch(node).await?;
        self.gateway
            .set_alias_ranges(node, &state.fingerprint, &[])
            .await?;
        Ok(())
    }

    /// Idempotent clear pass over every non-target node that currently
    /// shows no alias ranges. A no-op in effect, but it guards against
    /// partially-observed state from a stale fetch during holder
    /// location, so it is never skipped.
    async fn clean_standbys(&self, target: &Node) -> FailoverResult<()> {
        for node in self.inventory.nodes() {
            if node.name == target.name {
                continue;
            }
            let state = self.gateway.fetch(node).await?;
            if state.is_clear() {
                self.gateway
                    .set_alias_ranges(node, &state.fingerprint, &[])
                    .await?;
                Logger::trace("STANDBY_CLEARED", &[("node", &node.name)]);
            }
        }
        Ok(())
    }

    /// Apply a checked phase transition, logging it.
    fn advance(
        &self,
        phase: &mut PromotePhase,
        next: PromotePhase,
        target: &Node,
    ) -> FailoverResult<()> {
        if !phase.permits(&next) {
            return Err(FailoverError::ForbiddenTransition {
                from: phase.state_name(),
                to: next.state_name(),
            });
        }
        Logger::trace(
            "PROMOTE_PHASE",
            &[
                ("node", target.name.as_str()),
                ("from", phase.state_name()),
                ("to", next.state_name()),
            ],
        );
        *phase = next;
        Ok(())
    }
}
