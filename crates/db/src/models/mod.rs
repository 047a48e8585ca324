//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! JSON field names are camelCase throughout.

pub mod activity_log;
pub mod assignment;
pub mod dashboard;
pub mod document;
pub mod finance_request;
pub mod meeting;
pub mod role;
pub mod session;
pub mod tender;
pub mod user;
