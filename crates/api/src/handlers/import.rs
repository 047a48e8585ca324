//! Spreadsheet import of tenders.
//!
//! The first worksheet is read with calamine on the blocking pool, mapped
//! through [`ColumnMap`], and inserted row by row. Rows that fail to parse
//! or insert are reported back instead of aborting the import.

use std::io::Cursor;

use axum::extract::{Multipart, State};
use axum::Json;
use bidtrack_core::activity::ACTION_TENDER_IMPORTED;
use bidtrack_core::error::CoreError;
use bidtrack_core::import::{
    excel_serial_to_datetime, CellValue, ColumnMap, SkippedRow, MAX_IMPORT_ROWS,
};
use bidtrack_db::models::tender::CreateTender;
use bidtrack_db::repositories::TenderRepo;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use serde::Serialize;
use serde_json::json;

use super::record_activity;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireTenderManager;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::uploads::receive_spreadsheet;

#[derive(Debug, Serialize)]
pub struct ImportResult {
    pub imported: usize,
    pub skipped: Vec<SkippedRow>,
}

/// POST /api/tenders/import
///
/// Multipart upload with a single `file` field (`.xlsx` or `.xls`).
pub async fn import_tenders(
    State(state): State<AppState>,
    RequireTenderManager(user): RequireTenderManager,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<ImportResult>>> {
    let upload = receive_spreadsheet(&state.config, &mut multipart).await?;
    let filename = upload.filename.clone();

    let rows = tokio::task::spawn_blocking(move || read_first_sheet(upload.bytes))
        .await
        .map_err(|e| AppError::InternalError(format!("Spreadsheet reader panicked: {e}")))??;

    let mut rows = rows.into_iter();
    let header = rows
        .next()
        .ok_or_else(|| CoreError::Validation("Spreadsheet is empty".into()))?;
    let columns = ColumnMap::from_header(&header)?;

    let mut imported = 0usize;
    let mut skipped = Vec::new();

    // Sheet row numbers are 1-based and the header occupies row 1.
    for (idx, row) in rows.enumerate().take(MAX_IMPORT_ROWS) {
        let row_number = idx + 2;
        let parsed = match columns.parse_row(&row) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => continue,
            Err(reason) => {
                skipped.push(SkippedRow {
                    row: row_number,
                    reason,
                });
                continue;
            }
        };

        let input = CreateTender::from(parsed);

        match TenderRepo::create(&state.pool, &input, Some(user.user_id)).await {
            Ok(_) => imported += 1,
            Err(e) => {
                tracing::warn!(row = row_number, error = %e, "Import row failed to insert");
                skipped.push(SkippedRow {
                    row: row_number,
                    reason: "could not be saved".to_string(),
                });
            }
        }
    }

    tracing::info!(
        user_id = user.user_id,
        file = %filename,
        imported,
        skipped = skipped.len(),
        "Tender import finished",
    );
    record_activity(
        &state,
        None,
        user.user_id,
        ACTION_TENDER_IMPORTED,
        json!({ "file": filename, "imported": imported, "skipped": skipped.len() }),
    )
    .await;

    Ok(Json(DataResponse {
        data: ImportResult { imported, skipped },
    }))
}

/// Read every row of the first worksheet as library-independent cells.
fn read_first_sheet(bytes: Vec<u8>) -> AppResult<Vec<Vec<CellValue>>> {
    let unreadable = |e: calamine::Error| {
        AppError::BadRequest(format!("Could not read spreadsheet: {e}"))
    };

    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(unreadable)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::BadRequest("Spreadsheet has no worksheets".into()))?
        .map_err(unreadable)?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(to_cell).collect())
        .collect())
}

fn to_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => excel_serial_to_datetime(dt.as_f64())
            .map(|ts| CellValue::DateTime(ts.naive_utc()))
            .unwrap_or(CellValue::Empty),
    }
}
