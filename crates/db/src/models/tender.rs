//! Tender entity model and DTOs.

use bidtrack_core::currency::format_amount;
use bidtrack_core::import::ImportedTender;
use bidtrack_core::tender::STATUS_PUBLISHED;
use bidtrack_core::types::{DbId, MinorUnits, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A tender row from the `tenders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tender {
    pub id: DbId,
    pub title: String,
    pub organization: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub reference_number: Option<String>,
    /// Minor currency units.
    pub value: MinorUnits,
    pub currency: String,
    pub estimated_value: Option<MinorUnits>,
    pub emd_amount: Option<MinorUnits>,
    pub win_probability: Option<i32>,
    pub deadline: Option<Timestamp>,
    pub publish_date: Option<Timestamp>,
    pub submission_deadline: Option<Timestamp>,
    pub status: String,
    pub source: String,
    pub assigned_to: Option<DbId>,
    pub ai_score: Option<i32>,
    pub not_relevant_status: Option<String>,
    pub not_relevant_reason: Option<String>,
    pub not_relevant_requested_by: Option<DbId>,
    pub not_relevant_requested_at: Option<Timestamp>,
    pub not_relevant_decided_by: Option<DbId>,
    pub not_relevant_decided_at: Option<Timestamp>,
    pub not_relevant_comments: Option<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Tender as returned by the API: the row plus its display value.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderResponse {
    #[serde(flatten)]
    pub tender: Tender,
    pub formatted_value: String,
}

impl From<Tender> for TenderResponse {
    fn from(tender: Tender) -> Self {
        let formatted_value = format_amount(tender.value, &tender.currency);
        Self {
            tender,
            formatted_value,
        }
    }
}

/// DTO for creating a new tender.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTender {
    pub title: String,
    pub organization: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub reference_number: Option<String>,
    /// Defaults to 0 if omitted.
    pub value: Option<MinorUnits>,
    /// Defaults to `INR` if omitted.
    pub currency: Option<String>,
    pub estimated_value: Option<MinorUnits>,
    pub emd_amount: Option<MinorUnits>,
    pub win_probability: Option<i32>,
    pub deadline: Option<Timestamp>,
    pub publish_date: Option<Timestamp>,
    pub submission_deadline: Option<Timestamp>,
    /// Defaults to `draft` if omitted.
    pub status: Option<String>,
    /// Defaults to `portal` if omitted.
    pub source: Option<String>,
}

impl From<ImportedTender> for CreateTender {
    fn from(row: ImportedTender) -> Self {
        Self {
            title: row.title,
            organization: row.organization,
            description: row.description,
            category: row.category,
            location: row.location,
            reference_number: row.reference_number,
            value: Some(row.value),
            currency: Some(row.currency),
            estimated_value: row.estimated_value,
            emd_amount: row.emd_amount,
            win_probability: None,
            deadline: row.deadline,
            publish_date: row.publish_date,
            submission_deadline: row.submission_deadline,
            status: Some(STATUS_PUBLISHED.to_string()),
            source: Some(row.source),
        }
    }
}

/// DTO for updating an existing tender. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTender {
    pub title: Option<String>,
    pub organization: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub reference_number: Option<String>,
    pub value: Option<MinorUnits>,
    pub currency: Option<String>,
    pub estimated_value: Option<MinorUnits>,
    pub emd_amount: Option<MinorUnits>,
    pub win_probability: Option<i32>,
    pub deadline: Option<Timestamp>,
    pub publish_date: Option<Timestamp>,
    pub submission_deadline: Option<Timestamp>,
    pub status: Option<String>,
    pub source: Option<String>,
}
