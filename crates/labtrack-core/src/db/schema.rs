//! SQLite schema definition.

/// Complete database schema for labtrack.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Test Catalog
-- ============================================================================

CREATE TABLE IF NOT EXISTS lab_tests (
    test_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    sample_type TEXT NOT NULL,
    price REAL NOT NULL,
    active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- FTS5 virtual table for catalog search
CREATE VIRTUAL TABLE IF NOT EXISTS lab_tests_fts USING fts5(
    test_id,
    name,
    sample_type,
    content='lab_tests',
    content_rowid='rowid'
);

-- Triggers to keep FTS5 in sync with main table
CREATE TRIGGER IF NOT EXISTS lab_tests_ai AFTER INSERT ON lab_tests BEGIN
    INSERT INTO lab_tests_fts(rowid, test_id, name, sample_type)
    VALUES (new.rowid, new.test_id, new.name, new.sample_type);
END;

CREATE TRIGGER IF NOT EXISTS lab_tests_ad AFTER DELETE ON lab_tests BEGIN
    INSERT INTO lab_tests_fts(lab_tests_fts, rowid, test_id, name, sample_type)
    VALUES ('delete', old.rowid, old.test_id, old.name, old.sample_type);
END;

CREATE TRIGGER IF NOT EXISTS lab_tests_au AFTER UPDATE ON lab_tests BEGIN
    INSERT INTO lab_tests_fts(lab_tests_fts, rowid, test_id, name, sample_type)
    VALUES ('delete', old.rowid, old.test_id, old.name, old.sample_type);
    INSERT INTO lab_tests_fts(rowid, test_id, name, sample_type)
    VALUES (new.rowid, new.test_id, new.name, new.sample_type);
END;

-- ============================================================================
-- Test Packages
-- ============================================================================

CREATE TABLE IF NOT EXISTS test_packages (
    package_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT,
    test_ids TEXT NOT NULL DEFAULT '[]',          -- JSON array of test ids
    discount_percent REAL NOT NULL DEFAULT 0,
    active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_packages_name ON test_packages(name);

-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    patient_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    mobile TEXT NOT NULL,
    address TEXT,
    age INTEGER,
    gender TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_patients_name ON patients(name);
CREATE INDEX IF NOT EXISTS idx_patients_email ON patients(email);

-- FTS5 virtual table for patient search
CREATE VIRTUAL TABLE IF NOT EXISTS patients_fts USING fts5(
    patient_id,
    name,
    email,
    mobile,
    content='patients',
    content_rowid='rowid'
);

CREATE TRIGGER IF NOT EXISTS patients_ai AFTER INSERT ON patients BEGIN
    INSERT INTO patients_fts(rowid, patient_id, name, email, mobile)
    VALUES (new.rowid, new.patient_id, new.name, new.email, new.mobile);
END;

CREATE TRIGGER IF NOT EXISTS patients_ad AFTER DELETE ON patients BEGIN
    INSERT INTO patients_fts(patients_fts, rowid, patient_id, name, email, mobile)
    VALUES ('delete', old.rowid, old.patient_id, old.name, old.email, old.mobile);
END;

CREATE TRIGGER IF NOT EXISTS patients_au AFTER UPDATE ON patients BEGIN
    INSERT INTO patients_fts(patients_fts, rowid, patient_id, name, email, mobile)
    VALUES ('delete', old.rowid, old.patient_id, old.name, old.email, old.mobile);
    INSERT INTO patients_fts(rowid, patient_id, name, email, mobile)
    VALUES (new.rowid, new.patient_id, new.name, new.email, new.mobile);
END;

-- ============================================================================
-- Visits
-- ============================================================================

CREATE TABLE IF NOT EXISTS visits (
    visit_id TEXT PRIMARY KEY,
    patient_id TEXT NOT NULL REFERENCES patients(patient_id) ON DELETE CASCADE,
    status TEXT NOT NULL DEFAULT 'Booked',
    booking_type TEXT NOT NULL DEFAULT 'Offline',
    test_ids TEXT NOT NULL DEFAULT '[]',          -- JSON array of test ids
    package_ids TEXT NOT NULL DEFAULT '[]',       -- JSON array of package ids
    discount_percent REAL NOT NULL DEFAULT 0,
    total_amount REAL NOT NULL DEFAULT 0,
    final_amount REAL NOT NULL DEFAULT 0,
    report TEXT,                                  -- JSON object {file_name, sha256, uploaded_at}
    remarks TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_visits_patient ON visits(patient_id);
CREATE INDEX IF NOT EXISTS idx_visits_status ON visits(status);

-- ============================================================================
-- Staff Users
-- ============================================================================

CREATE TABLE IF NOT EXISTS staff_users (
    user_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    phone TEXT NOT NULL,
    role TEXT NOT NULL,
    password_digest TEXT NOT NULL,
    active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_users_role ON staff_users(role);
"#;
