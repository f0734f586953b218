//! Visit lifecycle workflow.
//!
//! One canonical status vocabulary and one transition table, replacing the
//! divergent per-screen status lists of earlier revisions. A status update
//! either passes every gate (transition defined, role permitted, report
//! present when completing) or leaves the visit untouched.

mod transitions;

pub use transitions::*;

use thiserror::Error;

use crate::models::{ReportFile, Role, Visit, VisitStatus};

/// Workflow errors.
#[derive(Error, Debug, PartialEq)]
pub enum WorkflowError {
    #[error("No transition from {from} to {to}")]
    InvalidTransition { from: VisitStatus, to: VisitStatus },

    #[error("{role} may not move a visit from {from} to {to}")]
    RoleNotPermitted {
        role: Role,
        from: VisitStatus,
        to: VisitStatus,
    },

    #[error("A report file is required to complete a visit")]
    ReportRequired,
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// A requested status change.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    /// Target status
    pub status: VisitStatus,
    /// Staff remarks to persist alongside the change
    pub remarks: Option<String>,
    /// Report file, required when the target is `Completed`
    pub report: Option<ReportFile>,
}

impl StatusUpdate {
    /// Plain status change with no remarks or attachment.
    pub fn to(status: VisitStatus) -> Self {
        Self {
            status,
            remarks: None,
            report: None,
        }
    }

    /// Attach remarks.
    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }

    /// Attach a report file.
    pub fn with_report(mut self, report: ReportFile) -> Self {
        self.report = Some(report);
        self
    }
}

/// Validate an update against the visit without mutating anything.
pub fn validate_update(visit: &Visit, role: Role, update: &StatusUpdate) -> WorkflowResult<()> {
    let from = visit.status;
    let to = update.status;

    if !transition_defined(from, to) {
        return Err(WorkflowError::InvalidTransition { from, to });
    }
    if !role_permits(role, from, to) {
        return Err(WorkflowError::RoleNotPermitted { role, from, to });
    }
    // Completion requires a report on the update or already on the visit.
    if to == VisitStatus::Completed && update.report.is_none() && visit.report.is_none() {
        return Err(WorkflowError::ReportRequired);
    }
    Ok(())
}

/// Apply a status update to a visit. On any error the visit is unchanged.
pub fn apply_update(visit: &mut Visit, role: Role, update: StatusUpdate) -> WorkflowResult<()> {
    validate_update(visit, role, &update)?;

    visit.status = update.status;
    if update.remarks.is_some() {
        visit.remarks = update.remarks;
    }
    if update.report.is_some() {
        visit.report = update.report;
    }
    visit.touch();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookingType;

    fn make_visit(status: VisitStatus) -> Visit {
        let mut visit = Visit::new("patient-1".into(), BookingType::Offline);
        visit.status = status;
        visit
    }

    #[test]
    fn test_pathologist_collects_sample() {
        let mut visit = make_visit(VisitStatus::Pending);
        let update = StatusUpdate::to(VisitStatus::Collected).with_remarks("fasting sample");

        apply_update(&mut visit, Role::Pathologist, update).unwrap();
        assert_eq!(visit.status, VisitStatus::Collected);
        assert_eq!(visit.remarks.as_deref(), Some("fasting sample"));
    }

    #[test]
    fn test_completion_without_report_rejected() {
        let mut visit = make_visit(VisitStatus::ReportReady);
        let err = apply_update(
            &mut visit,
            Role::Technician,
            StatusUpdate::to(VisitStatus::Completed),
        )
        .unwrap_err();

        assert_eq!(err, WorkflowError::ReportRequired);
        // No mutation on failure
        assert_eq!(visit.status, VisitStatus::ReportReady);
        assert!(visit.remarks.is_none());
    }

    #[test]
    fn test_completion_with_report() {
        let mut visit = make_visit(VisitStatus::ReportReady);
        let report = ReportFile::from_bytes("cbc.pdf".into(), b"pdf bytes");
        let update = StatusUpdate::to(VisitStatus::Completed).with_report(report);

        apply_update(&mut visit, Role::Technician, update).unwrap();
        assert_eq!(visit.status, VisitStatus::Completed);
        assert!(visit.has_report());
    }

    #[test]
    fn test_completion_with_previously_attached_report() {
        // Upload-then-update: the file may land on the visit before the
        // status change request.
        let mut visit = make_visit(VisitStatus::ReportReady);
        visit.report = Some(ReportFile::from_bytes("cbc.pdf".into(), b"pdf"));

        apply_update(
            &mut visit,
            Role::Technician,
            StatusUpdate::to(VisitStatus::Completed),
        )
        .unwrap();
        assert_eq!(visit.status, VisitStatus::Completed);
    }

    #[test]
    fn test_receptionist_cannot_update_status() {
        let mut visit = make_visit(VisitStatus::Booked);
        let err = apply_update(
            &mut visit,
            Role::Receptionist,
            StatusUpdate::to(VisitStatus::Collected),
        )
        .unwrap_err();

        assert!(matches!(err, WorkflowError::RoleNotPermitted { .. }));
        assert_eq!(visit.status, VisitStatus::Booked);
    }

    #[test]
    fn test_terminal_status_is_final() {
        let mut visit = make_visit(VisitStatus::Cancelled);
        let err = apply_update(
            &mut visit,
            Role::Admin,
            StatusUpdate::to(VisitStatus::Pending),
        )
        .unwrap_err();

        assert!(matches!(err, WorkflowError::InvalidTransition { .. }));
    }

    #[test]
    fn test_remarks_survive_when_update_has_none() {
        let mut visit = make_visit(VisitStatus::Collected);
        visit.remarks = Some("haemolysed, recollected".into());

        apply_update(
            &mut visit,
            Role::Technician,
            StatusUpdate::to(VisitStatus::Processing),
        )
        .unwrap();
        assert_eq!(visit.remarks.as_deref(), Some("haemolysed, recollected"));
    }
}
