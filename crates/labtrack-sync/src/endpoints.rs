//! REST endpoint paths for the lab backend.
//!
//! Every path the client hits is built here, so a backend route change is a
//! one-file edit. Paths are relative to the configured base URL.

/// Authorization header name.
pub const AUTH_HEADER: &str = "Authorization";

/// Render a bearer header value from a session token.
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Staff email/password login.
pub fn staff_login() -> String {
    "/auth/login".to_string()
}

/// Patient OTP request (step one of the patient login).
pub fn patient_request_otp() -> String {
    "/patient-auth/request-otp".to_string()
}

/// Patient OTP verification (step two of the patient login).
pub fn patient_verify_otp() -> String {
    "/patient-auth/verify-otp".to_string()
}

/// Staff user collection.
pub fn users() -> String {
    "/users".to_string()
}

/// One staff user.
pub fn user(user_id: &str) -> String {
    format!("/users/{user_id}")
}

/// Lab test collection.
pub fn lab_tests() -> String {
    "/tests".to_string()
}

/// One lab test.
pub fn lab_test(test_id: &str) -> String {
    format!("/tests/{test_id}")
}

/// Package collection.
pub fn packages() -> String {
    "/packages".to_string()
}

/// One package.
pub fn package(package_id: &str) -> String {
    format!("/packages/{package_id}")
}

/// Patient collection.
pub fn patients() -> String {
    "/patients".to_string()
}

/// One patient.
pub fn patient(patient_id: &str) -> String {
    format!("/patients/{patient_id}")
}

/// A patient's visits.
pub fn patient_visits(patient_id: &str) -> String {
    format!("/patients/{patient_id}/visits")
}

/// One visit of a patient.
pub fn patient_visit(patient_id: &str, visit_id: &str) -> String {
    format!("/patients/{patient_id}/visits/{visit_id}")
}

/// Status update on a visit.
pub fn visit_status(patient_id: &str, visit_id: &str) -> String {
    format!("/patients/{patient_id}/visits/{visit_id}/status")
}

/// Report upload for a visit.
pub fn visit_report(patient_id: &str, visit_id: &str) -> String {
    format!("/patients/{patient_id}/visits/{visit_id}/report")
}

/// Visits with an uploaded report (the reports-list screens).
pub fn reports() -> String {
    "/reports".to_string()
}

/// Dashboard status counts.
pub fn dashboard_counts() -> String {
    "/dashboard/status-counts".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bearer_header() {
        assert_eq!(bearer("abc123"), "Bearer abc123");
    }

    #[test]
    fn test_nested_visit_paths() {
        assert_eq!(patient_visit("p1", "v1"), "/patients/p1/visits/v1");
        assert_eq!(visit_status("p1", "v1"), "/patients/p1/visits/v1/status");
        assert_eq!(visit_report("p1", "v1"), "/patients/p1/visits/v1/report");
    }

    proptest! {
        // Paths stay well-formed for any id the database can produce.
        #[test]
        fn paths_have_no_double_slashes(id in "[a-z0-9-]{1,40}") {
            for path in [patient(&id), lab_test(&id), package(&id), user(&id)] {
                prop_assert!(path.starts_with('/'));
                prop_assert!(!path.contains("//"), "{path}");
            }
        }
    }
}
