//! Backend sync layer for LabTrack.
//!
//! This crate speaks the lab backend's REST API: endpoint paths, the
//! response envelope, and a thin client. The `http` feature gates the real
//! network client; without it the crate still provides the wire types and a
//! mock backend for tests.

pub mod client;
pub mod endpoints;

pub use client::*;
pub use endpoints::*;
