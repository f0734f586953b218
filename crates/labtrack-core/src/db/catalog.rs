//! Catalog database operations (tests and packages).

use rusqlite::{params, OptionalExtension};
use strsim::jaro_winkler;

use super::{fts_prefix_query, Database, DbError, DbResult};
use crate::models::{LabTest, TestPackage};

impl Database {
    /// Insert or update a catalog test.
    pub fn upsert_lab_test(&self, test: &LabTest) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO lab_tests (
                test_id, name, sample_type, price, active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, datetime('now'))
            ON CONFLICT(test_id) DO UPDATE SET
                name = excluded.name,
                sample_type = excluded.sample_type,
                price = excluded.price,
                active = excluded.active,
                updated_at = datetime('now')
            "#,
            params![
                test.test_id,
                test.name,
                test.sample_type,
                test.price,
                test.active,
                test.created_at,
            ],
        )?;
        Ok(())
    }

    /// Get a catalog test by id.
    pub fn get_lab_test(&self, test_id: &str) -> DbResult<Option<LabTest>> {
        self.conn
            .query_row(
                r#"
                SELECT test_id, name, sample_type, price, active, created_at, updated_at
                FROM lab_tests
                WHERE test_id = ?
                "#,
                [test_id],
                map_lab_test,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all catalog tests, active first.
    pub fn list_lab_tests(&self) -> DbResult<Vec<LabTest>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT test_id, name, sample_type, price, active, created_at, updated_at
            FROM lab_tests
            ORDER BY active DESC, name
            "#,
        )?;
        let rows = stmt.query_map([], map_lab_test)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Search active catalog tests by name/sample type.
    ///
    /// FTS5 retrieves candidates; results are re-ranked by name similarity
    /// so "lipid" puts "Lipid Profile" ahead of incidental matches.
    pub fn search_lab_tests(&self, query: &str, limit: usize) -> DbResult<Vec<LabTest>> {
        let fts_query = fts_prefix_query(query);
        if fts_query.is_empty() {
            return Ok(Vec::new());
        }

        let mut stmt = self.conn.prepare(
            r#"
            SELECT t.test_id, t.name, t.sample_type, t.price, t.active, t.created_at, t.updated_at
            FROM lab_tests t
            JOIN lab_tests_fts fts ON t.rowid = fts.rowid
            WHERE lab_tests_fts MATCH ?
            AND t.active = 1
            "#,
        )?;
        let rows = stmt.query_map([&fts_query], map_lab_test)?;
        let mut tests = rows.collect::<Result<Vec<_>, _>>()?;

        let query_lower = query.to_lowercase();
        tests.sort_by(|a, b| {
            let sa = jaro_winkler(&query_lower, &a.name.to_lowercase());
            let sb = jaro_winkler(&query_lower, &b.name.to_lowercase());
            sb.partial_cmp(&sa).unwrap_or(std::cmp::Ordering::Equal)
        });
        tests.truncate(limit);
        Ok(tests)
    }

    /// Delete a catalog test.
    pub fn delete_lab_test(&self, test_id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM lab_tests WHERE test_id = ?", [test_id])?;
        Ok(rows_affected > 0)
    }

    /// Insert or update a package.
    pub fn upsert_package(&self, package: &TestPackage) -> DbResult<()> {
        let test_ids_json = serde_json::to_string(&package.test_ids)?;
        self.conn.execute(
            r#"
            INSERT INTO test_packages (
                package_id, name, description, test_ids, discount_percent,
                active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, datetime('now'))
            ON CONFLICT(package_id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                test_ids = excluded.test_ids,
                discount_percent = excluded.discount_percent,
                active = excluded.active,
                updated_at = datetime('now')
            "#,
            params![
                package.package_id,
                package.name,
                package.description,
                test_ids_json,
                package.discount_percent,
                package.active,
                package.created_at,
            ],
        )?;
        Ok(())
    }

    /// Get a package by id.
    pub fn get_package(&self, package_id: &str) -> DbResult<Option<TestPackage>> {
        let row = self
            .conn
            .query_row(
                r#"
                SELECT package_id, name, description, test_ids, discount_percent,
                       active, created_at, updated_at
                FROM test_packages
                WHERE package_id = ?
                "#,
                [package_id],
                map_package_row,
            )
            .optional()?;
        row.map(package_from_row).transpose()
    }

    /// List all packages.
    pub fn list_packages(&self) -> DbResult<Vec<TestPackage>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT package_id, name, description, test_ids, discount_percent,
                   active, created_at, updated_at
            FROM test_packages
            ORDER BY active DESC, name
            "#,
        )?;
        let rows = stmt.query_map([], map_package_row)?;
        rows.map(|r| package_from_row(r?))
            .collect::<DbResult<Vec<_>>>()
    }

    /// Delete a package.
    pub fn delete_package(&self, package_id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM test_packages WHERE package_id = ?", [package_id])?;
        Ok(rows_affected > 0)
    }

    /// Resolve a package's member test prices against the catalog.
    ///
    /// Errors if a member test has been deleted from the catalog.
    pub fn package_member_prices(&self, package: &TestPackage) -> DbResult<Vec<f64>> {
        package
            .test_ids
            .iter()
            .map(|test_id| {
                self.get_lab_test(test_id)?
                    .map(|t| t.price)
                    .ok_or_else(|| DbError::NotFound(format!("lab test {test_id}")))
            })
            .collect()
    }

    /// A package's derived final price.
    pub fn package_final_price(&self, package: &TestPackage) -> DbResult<f64> {
        let prices = self.package_member_prices(package)?;
        Ok(package.final_price(&prices))
    }
}

/// Intermediate row for packages (test_ids still JSON).
struct PackageRow {
    package_id: String,
    name: String,
    description: Option<String>,
    test_ids: String,
    discount_percent: f64,
    active: bool,
    created_at: String,
    updated_at: String,
}

fn map_package_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PackageRow> {
    Ok(PackageRow {
        package_id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        test_ids: row.get(3)?,
        discount_percent: row.get(4)?,
        active: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

fn package_from_row(row: PackageRow) -> DbResult<TestPackage> {
    Ok(TestPackage {
        package_id: row.package_id,
        name: row.name,
        description: row.description,
        test_ids: serde_json::from_str(&row.test_ids)?,
        discount_percent: row.discount_percent,
        active: row.active,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn map_lab_test(row: &rusqlite::Row<'_>) -> rusqlite::Result<LabTest> {
    Ok(LabTest {
        test_id: row.get(0)?,
        name: row.get(1)?,
        sample_type: row.get(2)?,
        price: row.get(3)?,
        active: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}
