//! The canonical transition table.
//!
//! A transition is defined when it moves forward along the chain
//! `Booked → Pending → Collected → Processing → Report Ready → Completed`
//! (forward jumps allowed), or cancels a non-terminal visit. On top of that,
//! each role may only operate on its slice of the lifecycle:
//!
//! - Admin: any defined transition
//! - Receptionist: none (creates visits, never moves them)
//! - Pathologist: from Booked/Pending, to Pending/Collected/Processing/Cancelled
//! - Technician: from Collected/Processing/Report Ready,
//!   to Processing/Report Ready/Completed/Cancelled

use crate::models::{Role, VisitStatus};

/// Whether the lifecycle defines a transition from `from` to `to`.
pub fn transition_defined(from: VisitStatus, to: VisitStatus) -> bool {
    if from.is_terminal() || from == to {
        return false;
    }
    if to == VisitStatus::Cancelled {
        return true;
    }
    match (from.rank(), to.rank()) {
        (Some(f), Some(t)) => t > f,
        _ => false,
    }
}

/// Whether `role` may perform a (defined) transition from `from` to `to`.
pub fn role_permits(role: Role, from: VisitStatus, to: VisitStatus) -> bool {
    use VisitStatus::*;
    match role {
        Role::Admin => true,
        Role::Receptionist => false,
        Role::Pathologist => {
            matches!(from, Booked | Pending)
                && matches!(to, Pending | Collected | Processing | Cancelled)
        }
        Role::Technician => {
            matches!(from, Collected | Processing | ReportReady)
                && matches!(to, Processing | ReportReady | Completed | Cancelled)
        }
    }
}

/// Statuses `role` may move a visit in `from` to. Drives the update form's
/// status dropdown.
pub fn allowed_targets(role: Role, from: VisitStatus) -> Vec<VisitStatus> {
    VisitStatus::ALL
        .into_iter()
        .filter(|&to| transition_defined(from, to) && role_permits(role, from, to))
        .collect()
}
