//! Spreadsheet row mapping for the tender import.
//!
//! The HTTP layer reads the first worksheet into [`CellValue`] rows; this
//! module maps the header row onto known columns and turns each data row
//! into an [`ImportedTender`] or a human-readable skip reason.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use crate::currency::major_to_minor;
use crate::error::CoreError;
use crate::tender::{
    is_valid_source, normalize_currency, DEFAULT_CURRENCY, MAX_TITLE_LEN, SOURCE_PORTAL,
};
use crate::types::{MinorUnits, Timestamp};

/// Upper bound on data rows processed from one file.
pub const MAX_IMPORT_ROWS: usize = 5000;

/// A spreadsheet cell, independent of the reader library.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl CellValue {
    fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Some(format!("{}", *n as i64))
            }
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::Bool(b) => Some(b.to_string()),
            CellValue::DateTime(dt) => Some(dt.to_string()),
        }
    }
}

/// Columns the import understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportColumn {
    Title,
    Organization,
    Description,
    Category,
    Location,
    Reference,
    Value,
    EstimatedValue,
    Emd,
    Currency,
    Deadline,
    PublishDate,
    SubmissionDeadline,
    Source,
}

/// Header aliases, matched after [`normalize_header`].
const HEADER_ALIASES: &[(ImportColumn, &[&str])] = &[
    (ImportColumn::Title, &["title", "tender title", "tender name", "name", "item"]),
    (
        ImportColumn::Organization,
        &["organization", "organisation", "department", "buyer", "ministry"],
    ),
    (ImportColumn::Description, &["description", "details", "scope", "work description"]),
    (ImportColumn::Category, &["category", "type", "tender type"]),
    (ImportColumn::Location, &["location", "state", "city", "place"]),
    (
        ImportColumn::Reference,
        &["reference", "reference number", "ref no", "tender id", "bid number", "bid no"],
    ),
    (ImportColumn::Value, &["value", "tender value", "amount", "estimated cost"]),
    (ImportColumn::EstimatedValue, &["estimated value", "ecv"]),
    (ImportColumn::Emd, &["emd", "emd amount", "earnest money"]),
    (ImportColumn::Currency, &["currency"]),
    (
        ImportColumn::Deadline,
        &["deadline", "end date", "bid end date", "closing date", "due date"],
    ),
    (
        ImportColumn::PublishDate,
        &["publish date", "published", "published date", "start date", "bid start date"],
    ),
    (
        ImportColumn::SubmissionDeadline,
        &["submission deadline", "submission date", "bid submission date"],
    ),
    (ImportColumn::Source, &["source", "portal"]),
];

/// Lower-case, collapse separators and strip trailing punctuation.
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(['.', ':', '*'])
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub fn map_header(raw: &str) -> Option<ImportColumn> {
    let normalized = normalize_header(raw);
    HEADER_ALIASES
        .iter()
        .find(|(_, aliases)| aliases.contains(&normalized.as_str()))
        .map(|(col, _)| *col)
}

/// A tender parsed from one spreadsheet row, ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedTender {
    pub title: String,
    pub organization: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub reference_number: Option<String>,
    pub value: MinorUnits,
    pub estimated_value: Option<MinorUnits>,
    pub emd_amount: Option<MinorUnits>,
    pub currency: String,
    pub deadline: Option<Timestamp>,
    pub publish_date: Option<Timestamp>,
    pub submission_deadline: Option<Timestamp>,
    pub source: String,
}

/// A row that could not be imported. `row` is the 1-based sheet row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    pub row: usize,
    pub reason: String,
}

/// Column positions resolved from the header row.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    columns: Vec<Option<ImportColumn>>,
}

impl ColumnMap {
    /// Resolve the header row. Title and organization columns are required.
    pub fn from_header(header: &[CellValue]) -> Result<Self, CoreError> {
        let columns: Vec<Option<ImportColumn>> = header
            .iter()
            .map(|c| c.as_text().and_then(|t| map_header(&t)))
            .collect();

        for (required, label) in [
            (ImportColumn::Title, "title"),
            (ImportColumn::Organization, "organization"),
        ] {
            if !columns.contains(&Some(required)) {
                return Err(CoreError::Validation(format!(
                    "Spreadsheet is missing a '{label}' column"
                )));
            }
        }

        Ok(Self { columns })
    }

    fn cell<'a>(&self, row: &'a [CellValue], col: ImportColumn) -> Option<&'a CellValue> {
        let idx = self.columns.iter().position(|c| *c == Some(col))?;
        row.get(idx)
    }

    fn text(&self, row: &[CellValue], col: ImportColumn) -> Option<String> {
        self.cell(row, col).and_then(CellValue::as_text)
    }

    /// Parse one data row. `Ok(None)` means the row is blank and should be
    /// ignored silently.
    pub fn parse_row(&self, row: &[CellValue]) -> Result<Option<ImportedTender>, String> {
        if row.iter().all(|c| c.as_text().is_none()) {
            return Ok(None);
        }

        let title = self
            .text(row, ImportColumn::Title)
            .ok_or_else(|| "missing title".to_string())?;
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(format!("title longer than {MAX_TITLE_LEN} characters"));
        }
        let organization = self
            .text(row, ImportColumn::Organization)
            .ok_or_else(|| "missing organization".to_string())?;

        let amount = |col: ImportColumn, label: &str| -> Result<Option<MinorUnits>, String> {
            match self.cell(row, col) {
                None => Ok(None),
                Some(cell) => parse_amount_cell(cell).map_err(|_| format!("invalid {label}")),
            }
        };
        let date = |col: ImportColumn, label: &str| -> Result<Option<Timestamp>, String> {
            match self.cell(row, col) {
                None => Ok(None),
                Some(cell) => parse_date_cell(cell).map_err(|_| format!("invalid {label}")),
            }
        };

        let source = self
            .text(row, ImportColumn::Source)
            .map(|s| s.to_lowercase().replace([' ', '-'], "_"))
            .filter(|s| is_valid_source(s))
            .unwrap_or_else(|| SOURCE_PORTAL.to_string());
        let currency = match self.text(row, ImportColumn::Currency) {
            Some(c) => normalize_currency(&c).map_err(|_| "invalid currency".to_string())?,
            None => DEFAULT_CURRENCY.to_string(),
        };

        Ok(Some(ImportedTender {
            title,
            organization,
            description: self.text(row, ImportColumn::Description),
            category: self.text(row, ImportColumn::Category),
            location: self.text(row, ImportColumn::Location),
            reference_number: self.text(row, ImportColumn::Reference),
            value: amount(ImportColumn::Value, "value")?.unwrap_or(0),
            estimated_value: amount(ImportColumn::EstimatedValue, "estimated value")?,
            emd_amount: amount(ImportColumn::Emd, "EMD amount")?,
            currency,
            deadline: date(ImportColumn::Deadline, "deadline")?,
            publish_date: date(ImportColumn::PublishDate, "publish date")?,
            submission_deadline: date(ImportColumn::SubmissionDeadline, "submission deadline")?,
            source,
        }))
    }
}

/// Parse a money cell in major units. Empty cells are `Ok(None)`.
fn parse_amount_cell(cell: &CellValue) -> Result<Option<MinorUnits>, ()> {
    let major = match cell {
        CellValue::Empty => return Ok(None),
        CellValue::Number(n) => *n,
        CellValue::Text(s) => {
            let cleaned: String = s
                .to_lowercase()
                .replace("inr", "")
                .replace("rs.", "")
                .replace("rs", "")
                .chars()
                .filter(|c| !matches!(c, '₹' | ',' | ' ' | '\u{a0}'))
                .collect();
            if cleaned.is_empty() {
                return Ok(None);
            }
            cleaned.parse::<f64>().map_err(|_| ())?
        }
        CellValue::Bool(_) | CellValue::DateTime(_) => return Err(()),
    };
    if major < 0.0 {
        return Err(());
    }
    major_to_minor(major).map(Some).ok_or(())
}

/// Accepted textual date/time layouts, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%b-%Y %I:%M %p",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%d.%m.%Y", "%d-%b-%Y"];

fn parse_date_cell(cell: &CellValue) -> Result<Option<Timestamp>, ()> {
    match cell {
        CellValue::Empty => Ok(None),
        CellValue::DateTime(dt) => Ok(Some(dt.and_utc())),
        CellValue::Number(serial) => excel_serial_to_datetime(*serial).map(Some).ok_or(()),
        CellValue::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            parse_date_text(s).map(Some).ok_or(())
        }
        CellValue::Bool(_) => Err(()),
    }
}

/// Parse a textual date in any of the accepted layouts (UTC).
pub fn parse_date_text(s: &str) -> Option<Timestamp> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }
    None
}

/// Convert an Excel serial date (days since 1899-12-30) to a timestamp.
pub fn excel_serial_to_datetime(serial: f64) -> Option<Timestamp> {
    if !serial.is_finite() || !(1.0..2_958_466.0).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let millis = (serial * 86_400_000.0).round() as i64;
    epoch
        .checked_add_signed(Duration::milliseconds(millis))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn header() -> Vec<CellValue> {
        vec![
            text("Tender Title"),
            text("Organisation"),
            text("Tender Value"),
            text("Bid End Date"),
            text("Source"),
            text("Unrelated column"),
        ]
    }

    #[test]
    fn headers_are_normalized() {
        assert_eq!(normalize_header("  Bid_End-Date: "), "bid end date");
        assert_eq!(map_header("EMD Amount"), Some(ImportColumn::Emd));
        assert_eq!(map_header("Remarks"), None);
    }

    #[test]
    fn missing_organization_column_is_rejected() {
        let err = ColumnMap::from_header(&[text("Title"), text("Value")]).unwrap_err();
        assert!(matches!(err, CoreError::Validation(msg) if msg.contains("organization")));
    }

    #[test]
    fn full_row_parses() {
        let map = ColumnMap::from_header(&header()).unwrap();
        let row = vec![
            text("Road Construction"),
            text("PWD Kerala"),
            text("₹ 5,000.50"),
            text("15-01-2026"),
            text("GeM"),
            text("ignored"),
        ];
        let t = map.parse_row(&row).unwrap().unwrap();
        assert_eq!(t.title, "Road Construction");
        assert_eq!(t.organization, "PWD Kerala");
        assert_eq!(t.value, 500_050);
        assert_eq!(t.source, "gem");
        assert_eq!(t.currency, "INR");
        assert_eq!(
            t.deadline,
            Some(Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn numeric_cells_are_major_units_and_serial_dates() {
        let map = ColumnMap::from_header(&header()).unwrap();
        let row = vec![
            text("Bridge"),
            text("NHAI"),
            CellValue::Number(1250.0),
            CellValue::Number(46037.5),
            text("non-gem"),
        ];
        let t = map.parse_row(&row).unwrap().unwrap();
        assert_eq!(t.value, 125_000);
        assert_eq!(t.source, "non_gem");
        assert_eq!(
            t.deadline,
            Some(Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn unknown_source_defaults_to_portal() {
        let map = ColumnMap::from_header(&header()).unwrap();
        let row = vec![text("A"), text("B"), CellValue::Empty, CellValue::Empty, text("fax")];
        assert_eq!(map.parse_row(&row).unwrap().unwrap().source, "portal");
    }

    #[test]
    fn blank_row_is_ignored() {
        let map = ColumnMap::from_header(&header()).unwrap();
        let row = vec![CellValue::Empty, text("  "), CellValue::Empty];
        assert_eq!(map.parse_row(&row).unwrap(), None);
    }

    #[test]
    fn missing_title_is_reported() {
        let map = ColumnMap::from_header(&header()).unwrap();
        let row = vec![CellValue::Empty, text("PWD")];
        assert_eq!(map.parse_row(&row).unwrap_err(), "missing title");
    }

    #[test]
    fn garbage_value_is_reported() {
        let map = ColumnMap::from_header(&header()).unwrap();
        let row = vec![text("A"), text("B"), text("a lot")];
        assert_eq!(map.parse_row(&row).unwrap_err(), "invalid value");
    }

    #[test]
    fn currency_column_is_checked() {
        let map = ColumnMap::from_header(&[text("Title"), text("Organization"), text("Currency")])
            .unwrap();
        let t = map.parse_row(&[text("A"), text("B"), text("usd")]).unwrap().unwrap();
        assert_eq!(t.currency, "USD");
        let err = map.parse_row(&[text("A"), text("B"), text("Rupees")]).unwrap_err();
        assert_eq!(err, "invalid currency");
    }

    #[test]
    fn short_rows_leave_fields_empty() {
        let map = ColumnMap::from_header(&header()).unwrap();
        let t = map.parse_row(&[text("A"), text("B")]).unwrap().unwrap();
        assert_eq!(t.value, 0);
        assert_eq!(t.deadline, None);
    }

    #[test]
    fn text_date_layouts() {
        let expected = Utc.with_ymd_and_hms(2026, 2, 3, 0, 0, 0).unwrap();
        for s in ["2026-02-03", "03-02-2026", "03/02/2026", "03.02.2026", "03-Feb-2026"] {
            assert_eq!(parse_date_text(s), Some(expected), "{s}");
        }
        assert_eq!(
            parse_date_text("03-02-2026 17:30"),
            Some(Utc.with_ymd_and_hms(2026, 2, 3, 17, 30, 0).unwrap())
        );
        assert_eq!(parse_date_text("next tuesday"), None);
    }

    #[test]
    fn serial_out_of_range_is_rejected() {
        assert_eq!(excel_serial_to_datetime(-3.0), None);
        assert_eq!(excel_serial_to_datetime(f64::NAN), None);
    }
}
