//! Domain models for the labtrack system.

mod catalog;
mod patient;
mod user;
mod visit;

pub use catalog::*;
pub use patient::*;
pub use user::*;
pub use visit::*;
