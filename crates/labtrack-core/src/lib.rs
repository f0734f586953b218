//! LabTrack Core Library
//!
//! Local-first diagnostics-lab management core: patients, visits, catalog,
//! status workflow, billing, and barcode scan resolution.
//!
//! # Architecture
//!
//! ```text
//! Reception books visit ──┐                 Patient books online ──┐
//!                         ▼                                        ▼
//!                 status: Booked                           status: Pending
//!                         │                                        │
//!                         └──────────────┬─────────────────────────┘
//!                                        ▼
//!                       Pathologist collects sample (scan label)
//!                                        │
//!                              status: Collected
//!                                        ▼
//!                       Technician processes + uploads report
//!                                        │
//!                    status: Processing → Report Ready → Completed
//!                                        │
//!                 ┌──────────────────────┼──────────────────────┐
//!                 ▼                      ▼                      ▼
//!             Invoice               Report               Dashboard
//!             Export               Register                Counts
//! ```
//!
//! # Core Principle
//!
//! **Every status change passes one gate.** One transition table, one role
//! permission table, one report-required rule; no screen-local shortcuts.
//!
//! # Modules
//!
//! - [`db`]: SQLite database layer with FTS5 search
//! - [`models`]: Domain types (LabTest, TestPackage, Patient, Visit, StaffUser)
//! - [`workflow`]: Visit status transitions with role gating
//! - [`billing`]: Pure price arithmetic and per-visit summaries
//! - [`resolver`]: Scan-code parsing, dedupe, routing, history
//! - [`session`]: Staff and patient session state
//! - [`export`]: Invoice and report-register export

pub mod billing;
pub mod db;
pub mod export;
pub mod models;
pub mod resolver;
pub mod session;
pub mod workflow;

// Re-export commonly used types
pub use billing::{BillingLine, BillingSummary};
pub use db::Database;
pub use models::{
    BookingType, LabTest, Patient, ReportFile, Role, StaffUser, TestPackage, Visit, VisitStatus,
};
pub use resolver::{ScanCode, ScanOutcome, ScanRecord, ScanResolver};
pub use workflow::{StatusUpdate, WorkflowError};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum LabTrackError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Workflow error: {0}")]
    WorkflowViolation(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<db::DbError> for LabTrackError {
    fn from(e: db::DbError) -> Self {
        match e {
            db::DbError::NotFound(what) => LabTrackError::NotFound(what),
            other => LabTrackError::DatabaseError(other.to_string()),
        }
    }
}

impl From<workflow::WorkflowError> for LabTrackError {
    fn from(e: workflow::WorkflowError) -> Self {
        LabTrackError::WorkflowViolation(e.to_string())
    }
}

impl From<resolver::ScanError> for LabTrackError {
    fn from(e: resolver::ScanError) -> Self {
        LabTrackError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for LabTrackError {
    fn from(e: serde_json::Error) -> Self {
        LabTrackError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for LabTrackError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        LabTrackError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

fn parse_role(role: &str) -> Result<Role, LabTrackError> {
    Role::parse(role).ok_or_else(|| LabTrackError::InvalidInput(format!("Unknown role: {role}")))
}

fn parse_status(status: &str) -> Result<VisitStatus, LabTrackError> {
    VisitStatus::parse(status)
        .ok_or_else(|| LabTrackError::InvalidInput(format!("Unknown status: {status}")))
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<LabTrackCore>, LabTrackError> {
    let db = Database::open(&path)?;
    Ok(Arc::new(LabTrackCore {
        db: Arc::new(Mutex::new(db)),
        scanner: Mutex::new(ScanResolver::new()),
    }))
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<LabTrackCore>, LabTrackError> {
    let db = Database::open_in_memory()?;
    Ok(Arc::new(LabTrackCore {
        db: Arc::new(Mutex::new(db)),
        scanner: Mutex::new(ScanResolver::new()),
    }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe core handle for FFI.
#[derive(uniffi::Object)]
pub struct LabTrackCore {
    db: Arc<Mutex<Database>>,
    scanner: Mutex<ScanResolver>,
}

#[uniffi::export]
impl LabTrackCore {
    // =========================================================================
    // Catalog Operations
    // =========================================================================

    /// Create a new lab test.
    pub fn create_lab_test(
        &self,
        name: String,
        sample_type: String,
        price: f64,
    ) -> Result<FfiLabTest, LabTrackError> {
        let db = self.db.lock()?;
        let test = LabTest::new(name, sample_type, price);
        db.upsert_lab_test(&test)?;
        Ok(test.into())
    }

    /// Add or update a lab test.
    pub fn upsert_lab_test(&self, test: FfiLabTest) -> Result<(), LabTrackError> {
        let db = self.db.lock()?;
        db.upsert_lab_test(&test.into())?;
        Ok(())
    }

    /// Get a lab test by id.
    pub fn get_lab_test(&self, test_id: String) -> Result<Option<FfiLabTest>, LabTrackError> {
        let db = self.db.lock()?;
        Ok(db.get_lab_test(&test_id)?.map(|t| t.into()))
    }

    /// List all lab tests.
    pub fn list_lab_tests(&self) -> Result<Vec<FfiLabTest>, LabTrackError> {
        let db = self.db.lock()?;
        Ok(db.list_lab_tests()?.into_iter().map(|t| t.into()).collect())
    }

    /// Search active lab tests by name.
    pub fn search_lab_tests(
        &self,
        query: String,
        limit: u32,
    ) -> Result<Vec<FfiLabTest>, LabTrackError> {
        let db = self.db.lock()?;
        let tests = db.search_lab_tests(&query, limit as usize)?;
        Ok(tests.into_iter().map(|t| t.into()).collect())
    }

    /// Delete a lab test.
    pub fn delete_lab_test(&self, test_id: String) -> Result<bool, LabTrackError> {
        let db = self.db.lock()?;
        Ok(db.delete_lab_test(&test_id)?)
    }

    /// Add or update a test package.
    pub fn upsert_package(&self, package: FfiTestPackage) -> Result<(), LabTrackError> {
        let db = self.db.lock()?;
        db.upsert_package(&package.into())?;
        Ok(())
    }

    /// Get a package by id, with its derived prices resolved.
    pub fn get_package(&self, package_id: String) -> Result<Option<FfiTestPackage>, LabTrackError> {
        let db = self.db.lock()?;
        let Some(package) = db.get_package(&package_id)? else {
            return Ok(None);
        };
        let prices = db.package_member_prices(&package)?;
        Ok(Some(FfiTestPackage::from_package(&package, &prices)))
    }

    /// List all packages with derived prices.
    pub fn list_packages(&self) -> Result<Vec<FfiTestPackage>, LabTrackError> {
        let db = self.db.lock()?;
        let mut out = Vec::new();
        for package in db.list_packages()? {
            let prices = db.package_member_prices(&package)?;
            out.push(FfiTestPackage::from_package(&package, &prices));
        }
        Ok(out)
    }

    /// Delete a package.
    pub fn delete_package(&self, package_id: String) -> Result<bool, LabTrackError> {
        let db = self.db.lock()?;
        Ok(db.delete_package(&package_id)?)
    }

    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// Register a new patient.
    pub fn create_patient(
        &self,
        name: String,
        email: String,
        mobile: String,
    ) -> Result<FfiPatient, LabTrackError> {
        let db = self.db.lock()?;
        let patient = Patient::new(name, email, mobile);
        db.insert_patient(&patient)?;
        Ok(patient.into())
    }

    /// Update a patient's details.
    pub fn update_patient(&self, patient: FfiPatient) -> Result<bool, LabTrackError> {
        let db = self.db.lock()?;
        Ok(db.update_patient(&patient.into())?)
    }

    /// Get a patient by id.
    pub fn get_patient(&self, patient_id: String) -> Result<Option<FfiPatient>, LabTrackError> {
        let db = self.db.lock()?;
        Ok(db.get_patient(&patient_id)?.map(|p| p.into()))
    }

    /// Search patients by name, email, or mobile.
    pub fn search_patients(
        &self,
        query: String,
        limit: u32,
    ) -> Result<Vec<FfiPatient>, LabTrackError> {
        let db = self.db.lock()?;
        let patients = db.search_patients(&query, limit as usize)?;
        Ok(patients.into_iter().map(|p| p.into()).collect())
    }

    /// List all patients.
    pub fn list_patients(&self) -> Result<Vec<FfiPatient>, LabTrackError> {
        let db = self.db.lock()?;
        Ok(db.list_patients()?.into_iter().map(|p| p.into()).collect())
    }

    // =========================================================================
    // Visit Operations
    // =========================================================================

    /// Book a visit for a patient, pricing it from the current catalog.
    pub fn book_visit(
        &self,
        patient_id: String,
        booking_type: String,
        test_ids: Vec<String>,
        package_ids: Vec<String>,
        discount_percent: f64,
    ) -> Result<FfiVisit, LabTrackError> {
        let booking_type = BookingType::parse(&booking_type).ok_or_else(|| {
            LabTrackError::InvalidInput(format!("Unknown booking type: {booking_type}"))
        })?;

        let db = self.db.lock()?;
        db.get_patient(&patient_id)?
            .ok_or_else(|| LabTrackError::NotFound(format!("patient {patient_id}")))?;

        let mut visit = Visit::new(patient_id, booking_type);
        visit.test_ids = test_ids;
        visit.package_ids = package_ids;
        visit.discount_percent = discount_percent;

        let (test_prices, package_prices) = resolve_prices(&db, &visit)?;
        visit.reprice(&test_prices, &package_prices);

        db.insert_visit(&visit)?;
        Ok(visit.into())
    }

    /// Get a visit by id.
    pub fn get_visit(&self, visit_id: String) -> Result<Option<FfiVisit>, LabTrackError> {
        let db = self.db.lock()?;
        Ok(db.get_visit(&visit_id)?.map(|v| v.into()))
    }

    /// List a patient's visits, newest first.
    pub fn list_visits_for_patient(
        &self,
        patient_id: String,
    ) -> Result<Vec<FfiVisit>, LabTrackError> {
        let db = self.db.lock()?;
        let visits = db.list_visits_for_patient(&patient_id)?;
        Ok(visits.into_iter().map(|v| v.into()).collect())
    }

    /// Worklist: visits in a given status, oldest first.
    pub fn list_visits_by_status(&self, status: String) -> Result<Vec<FfiVisit>, LabTrackError> {
        let status = parse_status(&status)?;
        let db = self.db.lock()?;
        let visits = db.list_visits_by_status(status)?;
        Ok(visits.into_iter().map(|v| v.into()).collect())
    }

    /// Change the test/package selection on a visit and reprice it.
    pub fn update_visit_selection(
        &self,
        visit_id: String,
        test_ids: Vec<String>,
        package_ids: Vec<String>,
        discount_percent: f64,
    ) -> Result<FfiVisit, LabTrackError> {
        let db = self.db.lock()?;
        let mut visit = db
            .get_visit(&visit_id)?
            .ok_or_else(|| LabTrackError::NotFound(format!("visit {visit_id}")))?;

        visit.test_ids = test_ids;
        visit.package_ids = package_ids;
        visit.discount_percent = discount_percent;

        let (test_prices, package_prices) = resolve_prices(&db, &visit)?;
        visit.reprice(&test_prices, &package_prices);

        db.update_visit(&visit)?;
        Ok(visit.into())
    }

    /// Move a visit through the lifecycle, enforcing role permissions.
    pub fn update_visit_status(
        &self,
        visit_id: String,
        role: String,
        status: String,
        remarks: Option<String>,
    ) -> Result<FfiVisit, LabTrackError> {
        let role = parse_role(&role)?;
        let status = parse_status(&status)?;

        let db = self.db.lock()?;
        let mut visit = db
            .get_visit(&visit_id)?
            .ok_or_else(|| LabTrackError::NotFound(format!("visit {visit_id}")))?;

        let mut update = StatusUpdate::to(status);
        update.remarks = remarks;
        workflow::apply_update(&mut visit, role, update)?;

        db.update_visit(&visit)?;
        Ok(visit.into())
    }

    /// Targets a role may move a visit to from its current status.
    pub fn allowed_status_targets(
        &self,
        visit_id: String,
        role: String,
    ) -> Result<Vec<String>, LabTrackError> {
        let role = parse_role(&role)?;
        let db = self.db.lock()?;
        let visit = db
            .get_visit(&visit_id)?
            .ok_or_else(|| LabTrackError::NotFound(format!("visit {visit_id}")))?;
        Ok(workflow::allowed_targets(role, visit.status)
            .into_iter()
            .map(|s| s.as_str().to_string())
            .collect())
    }

    /// Upload a report file and complete the visit in one step.
    pub fn complete_visit(
        &self,
        visit_id: String,
        role: String,
        file_name: String,
        file_bytes: Vec<u8>,
    ) -> Result<FfiVisit, LabTrackError> {
        let role = parse_role(&role)?;

        let db = self.db.lock()?;
        let mut visit = db
            .get_visit(&visit_id)?
            .ok_or_else(|| LabTrackError::NotFound(format!("visit {visit_id}")))?;

        let report = ReportFile::from_bytes(file_name, &file_bytes);
        let update = StatusUpdate::to(VisitStatus::Completed).with_report(report);
        workflow::apply_update(&mut visit, role, update)?;

        db.update_visit(&visit)?;
        Ok(visit.into())
    }

    /// Attach a report file without changing the visit status.
    pub fn attach_report(
        &self,
        visit_id: String,
        file_name: String,
        file_bytes: Vec<u8>,
    ) -> Result<bool, LabTrackError> {
        let db = self.db.lock()?;
        let report = ReportFile::from_bytes(file_name, &file_bytes);
        Ok(db.attach_report(&visit_id, &report)?)
    }

    // =========================================================================
    // Billing Operations
    // =========================================================================

    /// Itemized billing summary for a visit, as JSON.
    pub fn billing_summary_json(&self, visit_id: String) -> Result<String, LabTrackError> {
        let db = self.db.lock()?;
        let exporter = export::InvoiceExporter::new(&db);
        let invoice = exporter.export_visit(&visit_id)?;
        Ok(serde_json::to_string_pretty(&invoice.summary)?)
    }

    // =========================================================================
    // Scan Operations
    // =========================================================================

    /// Handle a raw barcode scan for a role.
    ///
    /// Returns `None` when the code repeats the previous accepted scan.
    pub fn resolve_scan(
        &self,
        role: String,
        raw: String,
    ) -> Result<Option<FfiScanOutcome>, LabTrackError> {
        let role = parse_role(&role)?;
        let mut scanner = self.scanner.lock()?;
        let outcome = scanner.scan(role, &raw)?;
        Ok(outcome.map(|o| o.into()))
    }

    /// Recent accepted scans, newest first.
    pub fn scan_history(&self) -> Result<Vec<FfiScanRecord>, LabTrackError> {
        let scanner = self.scanner.lock()?;
        Ok(scanner.history().iter().cloned().map(|r| r.into()).collect())
    }

    // =========================================================================
    // Staff Operations
    // =========================================================================

    /// Create a staff account.
    pub fn create_staff_user(
        &self,
        name: String,
        email: String,
        phone: String,
        role: String,
        password: String,
    ) -> Result<FfiStaffUser, LabTrackError> {
        let role = parse_role(&role)?;
        let db = self.db.lock()?;
        let user = StaffUser::new(name, email, phone, role, &password);
        db.upsert_user(&user)?;
        Ok(user.into())
    }

    /// Check staff credentials. `None` when they do not match an active account.
    pub fn staff_login(
        &self,
        email: String,
        password: String,
    ) -> Result<Option<FfiStaffUser>, LabTrackError> {
        let db = self.db.lock()?;
        Ok(db.verify_staff_login(&email, &password)?.map(|u| u.into()))
    }

    /// List all staff users.
    pub fn list_staff_users(&self) -> Result<Vec<FfiStaffUser>, LabTrackError> {
        let db = self.db.lock()?;
        Ok(db.list_users()?.into_iter().map(|u| u.into()).collect())
    }

    /// Delete a staff account.
    pub fn delete_staff_user(&self, user_id: String) -> Result<bool, LabTrackError> {
        let db = self.db.lock()?;
        Ok(db.delete_user(&user_id)?)
    }

    // =========================================================================
    // Dashboard + Export Operations
    // =========================================================================

    /// Visit counts per status for the dashboard tiles.
    pub fn visit_status_counts(&self) -> Result<Vec<FfiStatusCount>, LabTrackError> {
        let db = self.db.lock()?;
        let counts = db.visit_status_counts()?;
        Ok(counts
            .into_iter()
            .map(|(status, count)| FfiStatusCount {
                status: status.as_str().to_string(),
                count,
            })
            .collect())
    }

    /// Export the invoice for one visit as JSON.
    pub fn export_invoice_json(&self, visit_id: String) -> Result<String, LabTrackError> {
        let db = self.db.lock()?;
        let invoice = export::InvoiceExporter::new(&db).export_visit(&visit_id)?;
        Ok(invoice.to_json()?)
    }

    /// Export all invoices for a patient as CSV.
    pub fn export_patient_invoices_csv(
        &self,
        patient_id: String,
    ) -> Result<String, LabTrackError> {
        let db = self.db.lock()?;
        let batch = export::InvoiceExporter::new(&db).export_for_patient(&patient_id)?;
        Ok(batch.to_csv())
    }

    /// Export the report register as JSON.
    pub fn export_report_register_json(&self) -> Result<String, LabTrackError> {
        let db = self.db.lock()?;
        let register = export::ReportRegister::build(&db)?;
        Ok(register.to_json()?)
    }

    /// Export the report register as CSV.
    pub fn export_report_register_csv(&self) -> Result<String, LabTrackError> {
        let db = self.db.lock()?;
        let register = export::ReportRegister::build(&db)?;
        Ok(register.to_csv())
    }
}

/// Resolve catalog prices for a visit's selection. Package prices are the
/// discounted bundle prices, not the raw member sums.
fn resolve_prices(db: &Database, visit: &Visit) -> Result<(Vec<f64>, Vec<f64>), LabTrackError> {
    let mut test_prices = Vec::with_capacity(visit.test_ids.len());
    for test_id in &visit.test_ids {
        let test = db
            .get_lab_test(test_id)?
            .ok_or_else(|| LabTrackError::NotFound(format!("lab test {test_id}")))?;
        test_prices.push(test.price);
    }

    let mut package_prices = Vec::with_capacity(visit.package_ids.len());
    for package_id in &visit.package_ids {
        let package = db
            .get_package(package_id)?
            .ok_or_else(|| LabTrackError::NotFound(format!("package {package_id}")))?;
        package_prices.push(db.package_final_price(&package)?);
    }

    Ok((test_prices, package_prices))
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe lab test.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiLabTest {
    pub test_id: String,
    pub name: String,
    pub sample_type: String,
    pub price: f64,
    pub active: bool,
}

impl From<LabTest> for FfiLabTest {
    fn from(test: LabTest) -> Self {
        Self {
            test_id: test.test_id,
            name: test.name,
            sample_type: test.sample_type,
            price: test.price,
            active: test.active,
        }
    }
}

impl From<FfiLabTest> for LabTest {
    fn from(test: FfiLabTest) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        LabTest {
            test_id: test.test_id,
            name: test.name,
            sample_type: test.sample_type,
            price: test.price,
            active: test.active,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// FFI-safe test package, with prices already resolved against the catalog.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTestPackage {
    pub package_id: String,
    pub name: String,
    pub description: Option<String>,
    pub test_ids: Vec<String>,
    pub discount_percent: f64,
    pub total_price: f64,
    pub final_price: f64,
    pub active: bool,
}

impl FfiTestPackage {
    fn from_package(package: &TestPackage, member_prices: &[f64]) -> Self {
        Self {
            package_id: package.package_id.clone(),
            name: package.name.clone(),
            description: package.description.clone(),
            test_ids: package.test_ids.clone(),
            discount_percent: package.discount_percent,
            total_price: package.total_price(member_prices),
            final_price: package.final_price(member_prices),
            active: package.active,
        }
    }
}

impl From<FfiTestPackage> for TestPackage {
    fn from(package: FfiTestPackage) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        TestPackage {
            package_id: package.package_id,
            name: package.name,
            description: package.description,
            test_ids: package.test_ids,
            discount_percent: package.discount_percent,
            active: package.active,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub patient_id: String,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub address: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            patient_id: patient.patient_id,
            name: patient.name,
            email: patient.email,
            mobile: patient.mobile,
            address: patient.address,
            age: patient.age,
            gender: patient.gender,
        }
    }
}

impl From<FfiPatient> for Patient {
    fn from(patient: FfiPatient) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Patient {
            patient_id: patient.patient_id,
            name: patient.name,
            email: patient.email,
            mobile: patient.mobile,
            address: patient.address,
            age: patient.age,
            gender: patient.gender,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// FFI-safe visit.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiVisit {
    pub visit_id: String,
    pub patient_id: String,
    pub status: String,
    pub booking_type: String,
    pub test_ids: Vec<String>,
    pub package_ids: Vec<String>,
    pub discount_percent: f64,
    pub total_amount: f64,
    pub final_amount: f64,
    pub scan_code: String,
    pub report_file_name: Option<String>,
    pub remarks: Option<String>,
    pub created_at: String,
}

impl From<Visit> for FfiVisit {
    fn from(visit: Visit) -> Self {
        Self {
            scan_code: visit.scan_code(),
            visit_id: visit.visit_id,
            patient_id: visit.patient_id,
            status: visit.status.as_str().to_string(),
            booking_type: visit.booking_type.as_str().to_string(),
            test_ids: visit.test_ids,
            package_ids: visit.package_ids,
            discount_percent: visit.discount_percent,
            total_amount: visit.total_amount,
            final_amount: visit.final_amount,
            report_file_name: visit.report.map(|r| r.file_name),
            remarks: visit.remarks,
            created_at: visit.created_at,
        }
    }
}

/// FFI-safe staff user. Never carries the password digest.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiStaffUser {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub dashboard_path: String,
    pub active: bool,
}

impl From<StaffUser> for FfiStaffUser {
    fn from(user: StaffUser) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            role: user.role.as_str().to_string(),
            dashboard_path: user.role.dashboard_path(),
            active: user.active,
        }
    }
}

/// FFI-safe scan outcome.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiScanOutcome {
    pub patient_id: String,
    pub visit_id: String,
    pub route: String,
}

impl From<ScanOutcome> for FfiScanOutcome {
    fn from(outcome: ScanOutcome) -> Self {
        Self {
            patient_id: outcome.code.patient_id,
            visit_id: outcome.code.visit_id,
            route: outcome.route,
        }
    }
}

/// FFI-safe scan history entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiScanRecord {
    pub code: String,
    pub patient_id: String,
    pub visit_id: String,
    pub scanned_at: String,
}

impl From<ScanRecord> for FfiScanRecord {
    fn from(record: ScanRecord) -> Self {
        Self {
            code: record.code,
            patient_id: record.patient_id,
            visit_id: record.visit_id,
            scanned_at: record.scanned_at,
        }
    }
}

/// One dashboard tile: a status and its visit count.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiStatusCount {
    pub status: String,
    pub count: u64,
}
