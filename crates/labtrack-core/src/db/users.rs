//! Staff user database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::{Role, StaffUser};

impl Database {
    /// Insert or update a staff user.
    pub fn upsert_user(&self, user: &StaffUser) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO staff_users (
                user_id, name, email, phone, role, password_digest, active,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, datetime('now'))
            ON CONFLICT(user_id) DO UPDATE SET
                name = excluded.name,
                email = excluded.email,
                phone = excluded.phone,
                role = excluded.role,
                password_digest = excluded.password_digest,
                active = excluded.active,
                updated_at = datetime('now')
            "#,
            params![
                user.user_id,
                user.name,
                user.email,
                user.phone,
                user.role.as_str(),
                user.password_digest,
                user.active,
                user.created_at,
            ],
        )?;
        Ok(())
    }

    /// Get a user by id.
    pub fn get_user(&self, user_id: &str) -> DbResult<Option<StaffUser>> {
        let row = self
            .conn
            .query_row(
                r#"
                SELECT user_id, name, email, phone, role, password_digest, active,
                       created_at, updated_at
                FROM staff_users
                WHERE user_id = ?
                "#,
                [user_id],
                map_user_row,
            )
            .optional()?;
        row.map(user_from_row).transpose()
    }

    /// Get a user by login email.
    pub fn get_user_by_email(&self, email: &str) -> DbResult<Option<StaffUser>> {
        let row = self
            .conn
            .query_row(
                r#"
                SELECT user_id, name, email, phone, role, password_digest, active,
                       created_at, updated_at
                FROM staff_users
                WHERE email = ?
                "#,
                [email],
                map_user_row,
            )
            .optional()?;
        row.map(user_from_row).transpose()
    }

    /// List all staff users.
    pub fn list_users(&self) -> DbResult<Vec<StaffUser>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT user_id, name, email, phone, role, password_digest, active,
                   created_at, updated_at
            FROM staff_users
            ORDER BY name
            "#,
        )?;
        let rows = stmt.query_map([], map_user_row)?;
        rows.map(|r| user_from_row(r?)).collect::<DbResult<Vec<_>>>()
    }

    /// Delete a staff user.
    pub fn delete_user(&self, user_id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM staff_users WHERE user_id = ?", [user_id])?;
        Ok(rows_affected > 0)
    }

    /// Check staff credentials. `None` for unknown email, wrong password, or
    /// a deactivated account.
    pub fn verify_staff_login(&self, email: &str, password: &str) -> DbResult<Option<StaffUser>> {
        let user = self.get_user_by_email(email)?;
        Ok(user.filter(|u| u.active && u.verify_password(password)))
    }
}

/// Intermediate row for users (role still raw).
struct UserRow {
    user_id: String,
    name: String,
    email: String,
    phone: String,
    role: String,
    password_digest: String,
    active: bool,
    created_at: String,
    updated_at: String,
}

fn map_user_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        user_id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        role: row.get(4)?,
        password_digest: row.get(5)?,
        active: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

fn user_from_row(row: UserRow) -> DbResult<StaffUser> {
    let role = Role::parse(&row.role).ok_or(DbError::BadColumn {
        field: "role",
        value: row.role.clone(),
    })?;
    Ok(StaffUser {
        user_id: row.user_id,
        name: row.name,
        email: row.email,
        phone: row.phone,
        role,
        password_digest: row.password_digest,
        active: row.active,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn make_user(email: &str, role: Role) -> StaffUser {
        StaffUser::new("Staff".into(), email.into(), "9000000000".into(), role, "pw")
    }

    #[test]
    fn test_upsert_and_get() {
        let db = setup_db();
        let user = make_user("tech@lab.test", Role::Technician);
        db.upsert_user(&user).unwrap();

        let retrieved = db.get_user(&user.user_id).unwrap().unwrap();
        assert_eq!(retrieved.role, Role::Technician);
        assert_eq!(retrieved.email, "tech@lab.test");
    }

    #[test]
    fn test_get_by_email() {
        let db = setup_db();
        let user = make_user("admin@lab.test", Role::Admin);
        db.upsert_user(&user).unwrap();

        let retrieved = db.get_user_by_email("admin@lab.test").unwrap().unwrap();
        assert_eq!(retrieved.user_id, user.user_id);
        assert!(db.get_user_by_email("nobody@lab.test").unwrap().is_none());
    }

    #[test]
    fn test_verify_staff_login() {
        let db = setup_db();
        let user = make_user("path@lab.test", Role::Pathologist);
        db.upsert_user(&user).unwrap();

        assert!(db.verify_staff_login("path@lab.test", "pw").unwrap().is_some());
        assert!(db.verify_staff_login("path@lab.test", "wrong").unwrap().is_none());
        assert!(db.verify_staff_login("nobody@lab.test", "pw").unwrap().is_none());
    }

    #[test]
    fn test_deactivated_user_cannot_login() {
        let db = setup_db();
        let mut user = make_user("old@lab.test", Role::Receptionist);
        user.active = false;
        db.upsert_user(&user).unwrap();

        assert!(db.verify_staff_login("old@lab.test", "pw").unwrap().is_none());
    }

    #[test]
    fn test_delete_user() {
        let db = setup_db();
        let user = make_user("gone@lab.test", Role::Admin);
        db.upsert_user(&user).unwrap();

        assert!(db.delete_user(&user.user_id).unwrap());
        assert!(db.get_user(&user.user_id).unwrap().is_none());
    }
}
