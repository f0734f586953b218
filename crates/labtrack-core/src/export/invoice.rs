//! Invoice export for billing and print views.

use serde::{Deserialize, Serialize};

use super::escape_csv;
use crate::billing::BillingSummary;
use crate::db::{Database, DbError, DbResult};
use crate::models::Visit;

/// Invoice for a single visit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceExport {
    /// Export metadata
    pub metadata: InvoiceMetadata,
    /// Cost breakdown
    pub summary: BillingSummary,
}

/// Invoice metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceMetadata {
    /// Visit the invoice covers
    pub visit_id: String,
    /// Patient billed
    pub patient_id: String,
    /// Patient display name
    pub patient_name: String,
    /// Visit status at export time
    pub status: String,
    /// How the visit was booked
    pub booking_type: String,
    /// Export timestamp
    pub exported_at: String,
}

impl InvoiceExport {
    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format (one row per billing line).
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();
        csv.push_str("visit_id,patient_id,patient_name,item_id,description,amount,subtotal,discount_percent,payable\n");
        append_csv_lines(&mut csv, self);
        csv
    }
}

fn append_csv_lines(csv: &mut String, export: &InvoiceExport) {
    for line in &export.summary.lines {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{}\n",
            escape_csv(&export.metadata.visit_id),
            escape_csv(&export.metadata.patient_id),
            escape_csv(&export.metadata.patient_name),
            escape_csv(&line.item_id),
            escape_csv(&line.name),
            line.amount,
            export.summary.subtotal,
            export.summary.discount_percent,
            export.summary.payable,
        ));
    }
}

/// Batch invoice export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchInvoiceExport {
    /// Export timestamp
    pub exported_at: String,
    /// Individual invoices
    pub invoices: Vec<InvoiceExport>,
    /// Total payable across all invoices
    pub total_payable: f64,
}

impl BatchInvoiceExport {
    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();
        csv.push_str("visit_id,patient_id,patient_name,item_id,description,amount,subtotal,discount_percent,payable\n");
        for invoice in &self.invoices {
            append_csv_lines(&mut csv, invoice);
        }
        csv
    }
}

/// Invoice exporter.
pub struct InvoiceExporter<'a> {
    db: &'a Database,
}

impl<'a> InvoiceExporter<'a> {
    /// Create a new invoice exporter.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Export the invoice for one visit.
    pub fn export_visit(&self, visit_id: &str) -> DbResult<InvoiceExport> {
        let visit = self
            .db
            .get_visit(visit_id)?
            .ok_or_else(|| DbError::NotFound(format!("visit {visit_id}")))?;
        self.build(&visit)
    }

    /// Export invoices for every visit of a patient.
    pub fn export_for_patient(&self, patient_id: &str) -> DbResult<BatchInvoiceExport> {
        let visits = self.db.list_visits_for_patient(patient_id)?;
        self.batch(visits)
    }

    fn build(&self, visit: &Visit) -> DbResult<InvoiceExport> {
        let patient = self
            .db
            .get_patient(&visit.patient_id)?
            .ok_or_else(|| DbError::NotFound(format!("patient {}", visit.patient_id)))?;

        let mut tests = Vec::with_capacity(visit.test_ids.len());
        for test_id in &visit.test_ids {
            let test = self
                .db
                .get_lab_test(test_id)?
                .ok_or_else(|| DbError::NotFound(format!("lab test {test_id}")))?;
            tests.push(test);
        }

        let mut packages = Vec::with_capacity(visit.package_ids.len());
        for package_id in &visit.package_ids {
            let package = self
                .db
                .get_package(package_id)?
                .ok_or_else(|| DbError::NotFound(format!("package {package_id}")))?;
            let member_prices = self.db.package_member_prices(&package)?;
            packages.push((package, member_prices));
        }

        let summary = BillingSummary::build(visit, &tests, &packages, 0.0);

        Ok(InvoiceExport {
            metadata: InvoiceMetadata {
                visit_id: visit.visit_id.clone(),
                patient_id: visit.patient_id.clone(),
                patient_name: patient.name,
                status: visit.status.as_str().to_string(),
                booking_type: visit.booking_type.as_str().to_string(),
                exported_at: chrono::Utc::now().to_rfc3339(),
            },
            summary,
        })
    }

    fn batch(&self, visits: Vec<Visit>) -> DbResult<BatchInvoiceExport> {
        let mut invoices = Vec::with_capacity(visits.len());
        let mut total_payable = 0.0;
        for visit in &visits {
            let invoice = self.build(visit)?;
            total_payable += invoice.summary.payable;
            invoices.push(invoice);
        }
        Ok(BatchInvoiceExport {
            exported_at: chrono::Utc::now().to_rfc3339(),
            invoices,
            total_payable,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingType, LabTest, Patient, TestPackage};

    fn setup() -> (Database, Patient, Visit) {
        let db = Database::open_in_memory().unwrap();
        let patient = Patient::new("Asha Rao".into(), "asha@example.com".into(), "98765".into());
        db.insert_patient(&patient).unwrap();

        let t1 = LabTest::new("CBC".into(), "Blood".into(), 100.0);
        let t2 = LabTest::new("ESR".into(), "Blood".into(), 200.0);
        db.upsert_lab_test(&t1).unwrap();
        db.upsert_lab_test(&t2).unwrap();

        let mut visit = Visit::new(patient.patient_id.clone(), BookingType::Offline);
        visit.test_ids = vec![t1.test_id, t2.test_id];
        visit.discount_percent = 10.0;
        visit.reprice(&[100.0, 200.0], &[]);
        db.insert_visit(&visit).unwrap();

        (db, patient, visit)
    }

    #[test]
    fn test_export_visit() {
        let (db, patient, visit) = setup();
        let exporter = InvoiceExporter::new(&db);

        let invoice = exporter.export_visit(&visit.visit_id).unwrap();
        assert_eq!(invoice.metadata.patient_name, patient.name);
        assert_eq!(invoice.summary.lines.len(), 2);
        assert_eq!(invoice.summary.subtotal, 300.0);
        assert_eq!(invoice.summary.payable, 270.0);
        // Invoice agrees with the cached figure on the visit
        assert_eq!(invoice.summary.payable, visit.final_amount);
    }

    #[test]
    fn test_export_with_package() {
        let (db, _, mut visit) = setup();
        let t3 = LabTest::new("TSH".into(), "Blood".into(), 300.0);
        let t4 = LabTest::new("T3".into(), "Blood".into(), 200.0);
        db.upsert_lab_test(&t3).unwrap();
        db.upsert_lab_test(&t4).unwrap();

        let mut pkg = TestPackage::new("Thyroid Panel".into());
        pkg.test_ids = vec![t3.test_id, t4.test_id];
        pkg.discount_percent = 10.0;
        db.upsert_package(&pkg).unwrap();

        visit.test_ids.clear();
        visit.package_ids = vec![pkg.package_id];
        visit.discount_percent = 0.0;
        db.update_visit(&visit).unwrap();

        let invoice = InvoiceExporter::new(&db).export_visit(&visit.visit_id).unwrap();
        assert_eq!(invoice.summary.lines.len(), 1);
        assert_eq!(invoice.summary.payable, 450.0);
    }

    #[test]
    fn test_export_missing_visit() {
        let (db, _, _) = setup();
        let exporter = InvoiceExporter::new(&db);
        assert!(matches!(
            exporter.export_visit("nope"),
            Err(DbError::NotFound(_))
        ));
    }

    #[test]
    fn test_batch_for_patient() {
        let (db, patient, _) = setup();
        let second = Visit::new(patient.patient_id.clone(), BookingType::Online);
        db.insert_visit(&second).unwrap();

        let batch = InvoiceExporter::new(&db)
            .export_for_patient(&patient.patient_id)
            .unwrap();
        assert_eq!(batch.invoices.len(), 2);
        assert_eq!(batch.total_payable, 270.0);
    }

    #[test]
    fn test_csv_shape() {
        let (db, _, visit) = setup();
        let invoice = InvoiceExporter::new(&db).export_visit(&visit.visit_id).unwrap();

        let csv = invoice.to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3); // Header + 2 items
        assert!(lines[0].starts_with("visit_id,"));
        assert!(lines[1].contains("CBC"));
    }
}
