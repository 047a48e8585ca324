//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod activity_log_repo;
pub mod assignment_repo;
pub mod dashboard_repo;
pub mod document_repo;
pub mod finance_request_repo;
pub mod meeting_repo;
pub mod role_repo;
pub mod session_repo;
pub mod tender_repo;
pub mod user_repo;

pub use activity_log_repo::ActivityLogRepo;
pub use assignment_repo::AssignmentRepo;
pub use dashboard_repo::DashboardRepo;
pub use document_repo::DocumentRepo;
pub use finance_request_repo::FinanceRequestRepo;
pub use meeting_repo::MeetingRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use tender_repo::TenderRepo;
pub use user_repo::UserRepo;
