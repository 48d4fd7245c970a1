//! Promotion state machine and outcomes
//!
//! States are explicit and enumerable; transitions are event-driven and
//! checked against a fixed table. A promotion walks
//!
//! ```text
//! Idle -> LocatingHolder -> {DemotingOther | AlreadyMaster}
//!      -> CleaningStandbys -> AttemptingPromotion(x<=3)
//!      -> {Promoted | PromotionFailed}
//! ```
//!
//! `AlreadyMaster`, `Promoted` and `PromotionFailed` are terminal.

use crate::failover::controller::PROMOTE_ATTEMPTS;

/// Phase of a single promotion operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromotePhase {
    /// No work started yet
    Idle,
    /// Scanning the inventory for the current holder
    LocatingHolder,
    /// A different node holds the VIP and is being cleared
    DemotingOther,
    /// The target already holds the VIP; nothing to do
    AlreadyMaster,
    /// Idempotent clear pass over the remaining standby nodes
    CleaningStandbys,
    /// Fetch-patch-verify cycle on the target, 1-based attempt counter
    AttemptingPromotion { attempt: usize },
    /// The verification fetch observed the VIP on the target
    Promoted,
    /// All attempts exhausted without convergence
    PromotionFailed,
}

impl PromotePhase {
    /// Stable name for logs and assertions.
    pub fn state_name(&self) -> &'static str {
        match self {
            PromotePhase::Idle => "Idle",
            PromotePhase::LocatingHolder => "LocatingHolder",
            PromotePhase::DemotingOther => "DemotingOther",
            PromotePhase::AlreadyMaster => "AlreadyMaster",
            PromotePhase::CleaningStandbys => "CleaningStandbys",
            PromotePhase::AttemptingPromotion { .. } => "AttemptingPromotion",
            PromotePhase::Promoted => "Promoted",
            PromotePhase::PromotionFailed => "PromotionFailed",
        }
    }

    /// Whether this phase ends the operation.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PromotePhase::AlreadyMaster | PromotePhase::Promoted | PromotePhase::PromotionFailed
        )
    }

    /// Whether `next` is a legal successor of this phase.
    pub fn permits(&self, next: &PromotePhase) -> bool {
        use PromotePhase::*;
        match (self, next) {
            (Idle, LocatingHolder) => true,
            (LocatingHolder, DemotingOther) => true,
            (LocatingHolder, AlreadyMaster) => true,
            // No holder found: straight to the cleanup pass.
            (LocatingHolder, CleaningStandbys) => true,
            (DemotingOther, CleaningStandbys) => true,
            (CleaningStandbys, AttemptingPromotion { attempt: 1 }) => true,
            (AttemptingPromotion { attempt }, AttemptingPromotion { attempt: next_attempt }) => {
                *next_attempt == attempt + 1 && *next_attempt <= PROMOTE_ATTEMPTS
            }
            (AttemptingPromotion { .. }, Promoted) => true,
            (AttemptingPromotion { attempt }, PromotionFailed) => *attempt == PROMOTE_ATTEMPTS,
            _ => false,
        }
    }
}

/// Terminal result of a promote operation.
///
/// Carried to the HTTP boundary as a tri-state status plus a
/// human-readable message; errors travel separately as `FailoverError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromoteOutcome {
    /// The target now holds the VIP
    Promoted { node: String },
    /// The target already held the VIP; zero patches were issued
    AlreadyMaster { node: String },
    /// Convergence was not observed within the attempt budget.
    /// Terminal: the caller must re-invoke explicitly.
    PromotionFailed { node: String, attempts: usize },
}

impl PromoteOutcome {
    pub fn status(&self) -> OperationStatus {
        match self {
            PromoteOutcome::Promoted { .. } => OperationStatus::Success,
            PromoteOutcome::AlreadyMaster { .. } => OperationStatus::Conflict,
            PromoteOutcome::PromotionFailed { .. } => OperationStatus::NotFound,
        }
    }

    pub fn message(&self) -> String {
        match self {
            PromoteOutcome::Promoted { node } => {
                format!("{} promoted to master", node)
            }
            PromoteOutcome::AlreadyMaster { node } => {
                format!("{} is already the master", node)
            }
            PromoteOutcome::PromotionFailed { node, attempts } => {
                format!(
                    "failed to promote {} after {} attempts; re-invoke to retry",
                    node, attempts
                )
            }
        }
    }
}

/// Tri-state outcome the boundary layer maps to transport codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationStatus {
    Success,
    NotFound,
    Conflict,
}

impl OperationStatus {
    /// The HTTP mapping contract: 200 / 404 / 409.
    pub fn http_status(&self) -> u16 {
        match self {
            OperationStatus::Success => 200,
            OperationStatus::NotFound => 404,
            OperationStatus::Conflict => 409,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        use PromotePhase::*;
        assert!(Idle.permits(&LocatingHolder));
        assert!(LocatingHolder.permits(&DemotingOther));
        assert!(DemotingOther.permits(&CleaningStandbys));
        assert!(CleaningStandbys.permits(&AttemptingPromotion { attempt: 1 }));
        assert!(AttemptingPromotion { attempt: 1 }.permits(&Promoted));
    }

    #[test]
    fn test_no_holder_skips_demotion() {
        use PromotePhase::*;
        assert!(LocatingHolder.permits(&CleaningStandbys));
    }

    #[test]
    fn test_attempts_increment_by_one_up_to_budget() {
        use PromotePhase::*;
        let first = AttemptingPromotion { attempt: 1 };
        assert!(first.permits(&AttemptingPromotion { attempt: 2 }));
        assert!(!first.permits(&AttemptingPromotion { attempt: 3 }));
        assert!(!AttemptingPromotion { attempt: PROMOTE_ATTEMPTS }
            .permits(&AttemptingPromotion { attempt: PROMOTE_ATTEMPTS + 1 }));
    }

    #[test]
    fn test_failure_only_after_last_attempt() {
        use PromotePhase::*;
        assert!(!AttemptingPromotion { attempt: 1 }.permits(&PromotionFailed));
        assert!(AttemptingPromotion { attempt: PROMOTE_ATTEMPTS }.permits(&PromotionFailed));
    }

    #[test]
    fn test_terminal_phases_permit_nothing() {
        use PromotePhase::*;
        for terminal in [AlreadyMaster, Promoted, PromotionFailed] {
            assert!(terminal.is_terminal());
            assert!(!terminal.permits(&LocatingHolder));
            assert!(!terminal.permits(&Idle));
        }
    }

    #[test]
    fn test_outcome_status_mapping() {
        let promoted = PromoteOutcome::Promoted { node: "a".into() };
        let already = PromoteOutcome::AlreadyMaster { node: "a".into() };
        let failed = PromoteOutcome::PromotionFailed {
            node: "a".into(),
            attempts: 3,
        };

        assert_eq!(promoted.status().http_status(), 200);
        assert_eq!(already.status().http_status(), 409);
        assert_eq!(failed.status().http_status(), 404);
    }

    #[test]
    fn test_outcome_messages_name_the_node() {
        let failed = PromoteOutcome::PromotionFailed {
            node: "node-b".into(),
            attempts: 3,
        };
        assert!(failed.message().contains("node-b"));
        assert!(failed.message().contains('3'));
    }
}
