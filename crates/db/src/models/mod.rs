//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Role and status columns are stored as TEXT (constrained by CHECK
//! constraints); the closed enums in `jupiter-core` own parsing, and
//! conversions happen at the handler boundary.

pub mod activity;
pub mod comment;
pub mod file;
pub mod phase;
pub mod profile;
pub mod project;
pub mod session;
pub mod time_entry;
