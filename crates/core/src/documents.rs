//! Upload allow-lists for documents and spreadsheet imports.
//!
//! A file is accepted when its extension is allow-listed and the declared
//! content type (if any) agrees with it. Browsers frequently send
//! `application/octet-stream` for office formats, so that is tolerated.

use crate::error::CoreError;

/// Default maximum upload size (25 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Maximum length of a document category label.
pub const MAX_CATEGORY_LEN: usize = 100;

const MIME_PDF: &str = "application/pdf";
const MIME_DOC: &str = "application/msword";
const MIME_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const MIME_XLS: &str = "application/vnd.ms-excel";
const MIME_XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const MIME_OCTET_STREAM: &str = "application/octet-stream";

/// `(extension, canonical MIME type)` pairs accepted as documents.
pub const DOCUMENT_TYPES: &[(&str, &str)] = &[
    ("pdf", MIME_PDF),
    ("doc", MIME_DOC),
    ("docx", MIME_DOCX),
    ("xls", MIME_XLS),
    ("xlsx", MIME_XLSX),
];

/// `(extension, canonical MIME type)` pairs accepted by the tender import.
pub const SPREADSHEET_TYPES: &[(&str, &str)] = &[("xls", MIME_XLS), ("xlsx", MIME_XLSX)];

/// Lower-cased extension of a file name, without the dot.
pub fn extension_of(filename: &str) -> Option<String> {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let (stem, ext) = base.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Validate a document upload, returning `(extension, canonical MIME type)`.
pub fn validate_document(
    filename: &str,
    declared: Option<&str>,
) -> Result<(String, &'static str), CoreError> {
    validate_against(DOCUMENT_TYPES, filename, declared)
}

/// Validate a spreadsheet upload for the tender import.
pub fn validate_spreadsheet(
    filename: &str,
    declared: Option<&str>,
) -> Result<(String, &'static str), CoreError> {
    validate_against(SPREADSHEET_TYPES, filename, declared)
}

fn validate_against(
    allowed: &[(&'static str, &'static str)],
    filename: &str,
    declared: Option<&str>,
) -> Result<(String, &'static str), CoreError> {
    let allowed_list = || {
        allowed
            .iter()
            .map(|(ext, _)| *ext)
            .collect::<Vec<_>>()
            .join(", ")
    };

    let ext = extension_of(filename).ok_or_else(|| {
        CoreError::Validation(format!(
            "File '{filename}' has no extension. Allowed: {}",
            allowed_list()
        ))
    })?;

    let (_, mime) = allowed
        .iter()
        .find(|(e, _)| *e == ext)
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "File type '.{ext}' is not allowed. Allowed: {}",
                allowed_list()
            ))
        })?;

    if let Some(declared) = declared {
        let declared = declared
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if !declared.is_empty() && declared != *mime && declared != MIME_OCTET_STREAM {
            return Err(CoreError::Validation(format!(
                "Content type '{declared}' does not match '.{ext}'"
            )));
        }
    }

    Ok((ext, *mime))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(extension_of("Bid.PDF").as_deref(), Some("pdf"));
        assert_eq!(extension_of("dir/sub/boq.xlsx").as_deref(), Some("xlsx"));
    }

    #[test]
    fn dotfiles_and_bare_names_have_no_extension() {
        assert_eq!(extension_of(".env"), None);
        assert_eq!(extension_of("README"), None);
        assert_eq!(extension_of("trailing."), None);
    }

    #[test]
    fn pdf_with_matching_mime_is_accepted() {
        let (ext, mime) = validate_document("rfp.pdf", Some("application/pdf")).unwrap();
        assert_eq!(ext, "pdf");
        assert_eq!(mime, "application/pdf");
    }

    #[test]
    fn octet_stream_is_tolerated() {
        assert!(validate_document("boq.xlsx", Some("application/octet-stream")).is_ok());
    }

    #[test]
    fn mime_parameters_are_ignored() {
        assert!(validate_document("rfp.pdf", Some("application/pdf; charset=binary")).is_ok());
    }

    #[test]
    fn executable_is_rejected() {
        assert_matches!(
            validate_document("setup.exe", None),
            Err(CoreError::Validation(msg)) if msg.contains(".exe")
        );
    }

    #[test]
    fn mismatched_mime_is_rejected() {
        assert!(validate_document("rfp.pdf", Some("text/html")).is_err());
    }

    #[test]
    fn spreadsheet_import_rejects_pdf() {
        assert!(validate_spreadsheet("tenders.pdf", None).is_err());
        assert!(validate_spreadsheet("tenders.xls", None).is_ok());
    }
}
