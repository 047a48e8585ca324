//! Well-known role names and the action permissions derived from them.
//!
//! Role names must match the seed data in `0001_create_users.sql`.

use serde::Serialize;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MANAGER: &str = "manager";
pub const ROLE_BIDDER: &str = "bidder";
pub const ROLE_FINANCE: &str = "finance";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_MANAGER, ROLE_BIDDER, ROLE_FINANCE];

/// Check whether a role name is known.
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

/// Whether the role may create, edit, import and assign tenders.
pub fn can_manage_tenders(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_MANAGER
}

/// Whether the role may approve, reject and complete finance requests.
pub fn can_decide_finance(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_FINANCE
}

/// Whether listings for this role are restricted to the caller's own
/// assignments.
pub fn sees_only_own_tenders(role: &str) -> bool {
    role == ROLE_BIDDER
}

/// Action flags the frontend uses to decide which controls to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    pub can_manage_tenders: bool,
    pub can_assign: bool,
    pub can_delete: bool,
    pub can_mark_not_relevant: bool,
    pub can_approve_not_relevant: bool,
    pub can_approve_finance: bool,
    pub can_manage_users: bool,
}

impl Permissions {
    pub fn for_role(role: &str) -> Self {
        let admin = role == ROLE_ADMIN;
        Self {
            can_manage_tenders: can_manage_tenders(role),
            can_assign: can_manage_tenders(role),
            can_delete: admin,
            can_mark_not_relevant: is_valid_role(role),
            can_approve_not_relevant: admin,
            can_approve_finance: can_decide_finance(role),
            can_manage_users: admin,
        }
    }
}
