//! Golden tests for the visit status workflow.
//!
//! These tests verify the transition and role tables against known cases.

use labtrack_core::models::{BookingType, ReportFile, Role, Visit, VisitStatus};
use labtrack_core::workflow::{apply_update, StatusUpdate, WorkflowError};

/// One transition attempt and its expected outcome.
struct GoldenCase {
    id: &'static str,
    role: Role,
    from: VisitStatus,
    to: VisitStatus,
    has_report: bool,
    expect_ok: bool,
}

fn get_golden_cases() -> Vec<GoldenCase> {
    use Role::*;
    use VisitStatus::*;
    vec![
        GoldenCase {
            id: "pathologist-confirms-booking",
            role: Pathologist,
            from: Booked,
            to: Pending,
            has_report: false,
            expect_ok: true,
        },
        GoldenCase {
            id: "pathologist-collects",
            role: Pathologist,
            from: Pending,
            to: Collected,
            has_report: false,
            expect_ok: true,
        },
        GoldenCase {
            id: "pathologist-skips-to-processing",
            role: Pathologist,
            from: Booked,
            to: Processing,
            has_report: false,
            expect_ok: true,
        },
        GoldenCase {
            id: "pathologist-cannot-complete",
            role: Pathologist,
            from: Pending,
            to: Completed,
            has_report: true,
            expect_ok: false,
        },
        GoldenCase {
            id: "technician-starts-processing",
            role: Technician,
            from: Collected,
            to: Processing,
            has_report: false,
            expect_ok: true,
        },
        GoldenCase {
            id: "technician-readies-report",
            role: Technician,
            from: Processing,
            to: ReportReady,
            has_report: false,
            expect_ok: true,
        },
        GoldenCase {
            id: "technician-completes-with-report",
            role: Technician,
            from: ReportReady,
            to: Completed,
            has_report: true,
            expect_ok: true,
        },
        GoldenCase {
            id: "technician-completes-without-report",
            role: Technician,
            from: ReportReady,
            to: Completed,
            has_report: false,
            expect_ok: false,
        },
        GoldenCase {
            id: "technician-cannot-collect",
            role: Technician,
            from: Pending,
            to: Collected,
            has_report: false,
            expect_ok: false,
        },
        GoldenCase {
            id: "receptionist-cannot-move-anything",
            role: Receptionist,
            from: Booked,
            to: Pending,
            has_report: false,
            expect_ok: false,
        },
        GoldenCase {
            id: "admin-moves-backward-rejected",
            role: Admin,
            from: Processing,
            to: Collected,
            has_report: false,
            expect_ok: false,
        },
        GoldenCase {
            id: "admin-cancels-late",
            role: Admin,
            from: ReportReady,
            to: Cancelled,
            has_report: false,
            expect_ok: true,
        },
        GoldenCase {
            id: "cancelled-is-final",
            role: Admin,
            from: Cancelled,
            to: Pending,
            has_report: false,
            expect_ok: false,
        },
        GoldenCase {
            id: "completed-is-final",
            role: Admin,
            from: Completed,
            to: Cancelled,
            has_report: true,
            expect_ok: false,
        },
    ]
}

fn make_visit(status: VisitStatus, has_report: bool) -> Visit {
    let mut visit = Visit::new("patient-1".into(), BookingType::Offline);
    visit.status = status;
    if has_report {
        visit.report = Some(ReportFile::from_bytes("report.pdf".into(), b"pdf"));
    }
    visit
}

#[test]
fn test_golden_transitions() {
    for case in get_golden_cases() {
        let mut visit = make_visit(case.from, case.has_report);
        let result = apply_update(&mut visit, case.role, StatusUpdate::to(case.to));

        assert_eq!(
            result.is_ok(),
            case.expect_ok,
            "Case {}: expected ok={}, got {:?}",
            case.id,
            case.expect_ok,
            result
        );

        // Rejected updates leave the visit where it was
        let expected_status = if case.expect_ok { case.to } else { case.from };
        assert_eq!(visit.status, expected_status, "Case {}: status", case.id);
    }
}

#[test]
fn test_completion_requires_report_regardless_of_role() {
    for role in [Role::Admin, Role::Technician] {
        let mut visit = make_visit(VisitStatus::ReportReady, false);
        let err = apply_update(&mut visit, role, StatusUpdate::to(VisitStatus::Completed))
            .unwrap_err();
        assert_eq!(err, WorkflowError::ReportRequired, "role {role}");
    }
}

#[test]
fn test_report_on_update_satisfies_completion() {
    let mut visit = make_visit(VisitStatus::ReportReady, false);
    let report = ReportFile::from_bytes("cbc.pdf".into(), b"pdf bytes");

    apply_update(
        &mut visit,
        Role::Technician,
        StatusUpdate::to(VisitStatus::Completed).with_report(report),
    )
    .unwrap();

    assert_eq!(visit.status, VisitStatus::Completed);
    assert!(visit.has_report());
}

#[test]
fn test_every_status_reaches_a_terminal() {
    // From any non-terminal status, Admin can always cancel; the lifecycle
    // has no stuck states.
    for status in VisitStatus::ALL {
        if status.is_terminal() {
            continue;
        }
        let mut visit = make_visit(status, false);
        apply_update(&mut visit, Role::Admin, StatusUpdate::to(VisitStatus::Cancelled))
            .unwrap();
        assert_eq!(visit.status, VisitStatus::Cancelled);
    }
}
