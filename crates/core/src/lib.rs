//! Domain core for the Jupiter Automation project portal.
//!
//! Pure types and logic shared by the repository and API layers: the closed
//! role set, authorization policy predicates, phase status and templates,
//! progress aggregation, and input validation. No I/O lives here.

pub mod audit;
pub mod error;
pub mod phase;
pub mod policy;
pub mod progress;
pub mod project;
pub mod roles;
pub mod types;
pub mod validate;
