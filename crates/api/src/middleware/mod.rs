//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the caller, from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- requires the `admin` role.
//! - [`rbac::RequireTenderManager`] -- requires `admin` or `manager`.
//! - [`rbac::RequireFinanceApprover`] -- requires `admin` or `finance`.

pub mod auth;
pub mod rbac;
