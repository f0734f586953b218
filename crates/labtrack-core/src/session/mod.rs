//! Session resolution and role gating.
//!
//! The session is constructed once at startup from the persisted store and
//! passed down, instead of being re-read ad hoc by every screen. A corrupt
//! persisted value is discarded and treated as unauthenticated.

mod otp;
mod store;

pub use otp::*;
pub use store::*;

use crate::models::{Patient, Role, StaffUser};

/// The resolved identity of the current actor.
#[derive(Debug, Clone, PartialEq)]
pub enum Session {
    /// Staff login (password flow)
    Staff { token: String, user: StaffUser },
    /// Patient login (OTP flow)
    Patient { token: String, patient: Patient },
}

impl Session {
    /// Bearer token for backend calls.
    pub fn token(&self) -> &str {
        match self {
            Session::Staff { token, .. } => token,
            Session::Patient { token, .. } => token,
        }
    }

    /// Staff role, if this is a staff session.
    pub fn role(&self) -> Option<Role> {
        match self {
            Session::Staff { user, .. } => Some(user.role),
            Session::Patient { .. } => None,
        }
    }

    /// Router subtree this session may enter.
    pub fn route_prefix(&self) -> &str {
        match self {
            Session::Staff { user, .. } => user.role.route_prefix(),
            Session::Patient { .. } => "/patient",
        }
    }

    /// Whether this session may enter a role-gated path.
    pub fn can_access(&self, path: &str) -> bool {
        path.starts_with(self.route_prefix())
    }

    /// Landing page after login.
    pub fn dashboard_path(&self) -> String {
        format!("{}/dashboard", self.route_prefix())
    }
}

/// Resolve the persisted session, staff first.
///
/// Unparseable stored JSON removes the offending key and that identity is
/// treated as absent. Returns `None` when neither identity is usable — the
/// router must redirect to login.
pub fn bootstrap(store: &mut dyn SessionStore) -> Option<Session> {
    if let Some(token) = store.get(keys::TOKEN) {
        if let Some(raw) = store.get(keys::USER) {
            match serde_json::from_str::<StaffUser>(&raw) {
                Ok(user) => return Some(Session::Staff { token, user }),
                Err(_) => store.remove(keys::USER),
            }
        }
    }

    if let Some(token) = store.get(keys::PATIENT_TOKEN) {
        if let Some(raw) = store.get(keys::PATIENT_DATA) {
            match serde_json::from_str::<Patient>(&raw) {
                Ok(patient) => return Some(Session::Patient { token, patient }),
                Err(_) => store.remove(keys::PATIENT_DATA),
            }
        }
    }

    None
}

/// Persist a staff login.
pub fn persist_staff(store: &mut dyn SessionStore, token: &str, user: &StaffUser) {
    store.set(keys::TOKEN, token);
    if let Ok(json) = serde_json::to_string(user) {
        store.set(keys::USER, &json);
    }
}

/// Persist a patient login.
pub fn persist_patient(store: &mut dyn SessionStore, token: &str, patient: &Patient) {
    store.set(keys::PATIENT_TOKEN, token);
    store.set(keys::PATIENT_ID, &patient.patient_id);
    if let Ok(json) = serde_json::to_string(patient) {
        store.set(keys::PATIENT_DATA, &json);
    }
}

/// Clear every persisted session key. The UI asks for confirmation before
/// calling this; the store side is unconditional.
pub fn logout(store: &mut dyn SessionStore) {
    for key in keys::ALL {
        store.remove(key);
    }
}

/// Handle a backend 401: the staff token is dead, force re-login.
pub fn handle_unauthorized(store: &mut dyn SessionStore) {
    store.remove(keys::TOKEN);
}
