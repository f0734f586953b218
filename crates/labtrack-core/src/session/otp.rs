//! Patient OTP login flow state.
//!
//! Two steps: request an OTP for an email, then verify the entered code.
//! The HTTP calls live in the sync crate; this models the form state the
//! login screen steps through and validates input before any request is
//! sent.

use thiserror::Error;

use crate::models::Patient;
use crate::session::{persist_patient, SessionStore};

/// OTP flow errors (validation; never sent to the backend).
#[derive(Error, Debug, PartialEq)]
pub enum OtpError {
    #[error("Email is required")]
    EmailRequired,

    #[error("Please enter OTP")]
    OtpRequired,

    #[error("OTP was not requested yet")]
    NotRequested,
}

/// Which step the login screen is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpStep {
    /// Collecting email / name / mobile
    Email,
    /// OTP sent, collecting the code
    Verify,
}

/// State machine for the patient login form.
#[derive(Debug, Clone, PartialEq)]
pub struct OtpLogin {
    step: OtpStep,
    email: String,
    full_name: String,
    mobile: String,
}

impl OtpLogin {
    /// Fresh flow at the email step.
    pub fn new() -> Self {
        Self {
            step: OtpStep::Email,
            email: String::new(),
            full_name: String::new(),
            mobile: String::new(),
        }
    }

    /// Current step.
    pub fn step(&self) -> OtpStep {
        self.step
    }

    /// Email the OTP was requested for.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Validate the request form and advance to the verify step. The caller
    /// sends the actual send-OTP request on `Ok`.
    pub fn request(&mut self, email: &str, full_name: &str, mobile: &str) -> Result<(), OtpError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(OtpError::EmailRequired);
        }
        self.email = email.to_string();
        self.full_name = full_name.trim().to_string();
        self.mobile = mobile.trim().to_string();
        self.step = OtpStep::Verify;
        Ok(())
    }

    /// Validate the entered code before the verify request goes out.
    pub fn verify_input(&self, otp: &str) -> Result<(), OtpError> {
        if self.step != OtpStep::Verify {
            return Err(OtpError::NotRequested);
        }
        if otp.trim().is_empty() {
            return Err(OtpError::OtpRequired);
        }
        Ok(())
    }

    /// Persist a successful verification's payload as the patient session.
    pub fn complete(self, store: &mut dyn SessionStore, token: &str, patient: &Patient) {
        persist_patient(store, token, patient);
    }
}

impl Default for OtpLogin {
    fn default() -> Self {
        Self::new()
    }
}
