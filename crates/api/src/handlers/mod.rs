pub mod ai;
pub mod auth;
pub mod dashboard;
pub mod documents;
pub mod finance;
pub mod import;
pub mod meetings;
pub mod not_relevant;
pub mod tenders;
pub mod users;

use bidtrack_core::types::DbId;
use bidtrack_db::models::activity_log::CreateActivityLog;
use bidtrack_db::repositories::ActivityLogRepo;

use crate::state::AppState;

/// Append an activity log entry.
///
/// The log is an audit aid; a failed insert is reported but never fails
/// the request that caused it.
pub(crate) async fn record_activity(
    state: &AppState,
    tender_id: Option<DbId>,
    user_id: DbId,
    action: &'static str,
    details: serde_json::Value,
) {
    let entry = CreateActivityLog {
        tender_id,
        user_id: Some(user_id),
        action,
        details,
    };
    if let Err(e) = ActivityLogRepo::create(&state.pool, &entry).await {
        tracing::warn!(error = %e, action, ?tender_id, "Failed to record activity");
    }
}
