//! VIP failover orchestration
//!
//! The core of the daemon: deciding which node currently carries the VIP
//! and moving it safely. Three pieces:
//!
//! - [`VipLocator`] — read-only scan reporting the current holder.
//! - [`FailoverController`] — demote/promote sequences with bounded
//!   convergence retries and a per-VIP advisory lock.
//! - [`PromotePhase`] — the explicit promotion state machine; transitions
//!   are checked, never inferred.
//!
//! The controller executes mechanics only. *When* to promote is the
//! caller's decision (an operator or an external health monitor); there
//! is no quorum and no liveness inference here.

mod controller;
mod errors;
mod locator;
mod state;

pub use controller::{FailoverController, PROMOTE_ATTEMPTS};
pub use errors::{FailoverError, FailoverResult};
pub use locator::{VipLocator, TieBreak, TIE_BREAK};
pub use state::{OperationStatus, PromoteOutcome, PromotePhase};
