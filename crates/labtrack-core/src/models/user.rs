//! Staff user and role models.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Staff role — the sole authorization axis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Receptionist,
    Technician,
    Pathologist,
}

impl Role {
    /// All staff roles.
    pub const ALL: [Role; 4] = [
        Role::Admin,
        Role::Receptionist,
        Role::Technician,
        Role::Pathologist,
    ];

    /// Canonical display name, as stored and exchanged with the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Receptionist => "Receptionist",
            Role::Technician => "Technician",
            Role::Pathologist => "Pathologist",
        }
    }

    /// Parse a role from its canonical name.
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "Admin" => Some(Role::Admin),
            "Receptionist" => Some(Role::Receptionist),
            "Technician" => Some(Role::Technician),
            "Pathologist" => Some(Role::Pathologist),
            _ => None,
        }
    }

    /// Router subtree this role may enter.
    pub fn route_prefix(&self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::Receptionist => "/receptionist",
            Role::Technician => "/technician",
            Role::Pathologist => "/pathologist",
        }
    }

    /// Landing page after login.
    pub fn dashboard_path(&self) -> String {
        format!("{}/dashboard", self.route_prefix())
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A staff account. The password is write-only: only its SHA-256 digest is
/// ever stored or exposed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaffUser {
    /// Unique user identifier
    pub user_id: String,
    /// Full name
    pub name: String,
    /// Login email (unique)
    pub email: String,
    /// Contact phone
    pub phone: String,
    /// Authorization role
    pub role: Role,
    /// SHA-256 digest of the password, hex encoded
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub password_digest: String,
    /// Whether this account may log in
    pub active: bool,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl StaffUser {
    /// Create a new staff user with a freshly digested password.
    pub fn new(name: String, email: String, phone: String, role: Role, password: &str) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            user_id: uuid::Uuid::new_v4().to_string(),
            name,
            email,
            phone,
            role,
            password_digest: digest_password(password),
            active: true,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Replace the password, storing only its digest.
    pub fn set_password(&mut self, password: &str) {
        self.password_digest = digest_password(password);
        self.touch();
    }

    /// Check a candidate password against the stored digest.
    pub fn verify_password(&self, password: &str) -> bool {
        !self.password_digest.is_empty() && self.password_digest == digest_password(password)
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

/// Hex-encoded SHA-256 of a password.
fn digest_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("Patient"), None);
        assert_eq!(Role::parse("admin"), None);
    }

    #[test]
    fn test_route_prefix() {
        assert_eq!(Role::Pathologist.route_prefix(), "/pathologist");
        assert_eq!(Role::Admin.dashboard_path(), "/admin/dashboard");
    }

    #[test]
    fn test_password_is_write_only() {
        let user = StaffUser::new(
            "Dr. Mehta".into(),
            "mehta@lab.test".into(),
            "9000000000".into(),
            Role::Pathologist,
            "s3cret",
        );
        assert!(user.verify_password("s3cret"));
        assert!(!user.verify_password("wrong"));
        assert_ne!(user.password_digest, "s3cret");
        assert_eq!(user.password_digest.len(), 64); // hex sha256
    }

    #[test]
    fn test_set_password_rotates_digest() {
        let mut user = StaffUser::new(
            "Tech".into(),
            "tech@lab.test".into(),
            "9111111111".into(),
            Role::Technician,
            "old",
        );
        let before = user.password_digest.clone();
        user.set_password("new");
        assert_ne!(user.password_digest, before);
        assert!(user.verify_password("new"));
        assert!(!user.verify_password("old"));
    }
}
