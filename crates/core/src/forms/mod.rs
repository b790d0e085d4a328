//! Per-form extraction drivers and the whole-document aggregate.
//!
//! Each driver isolates its form, runs the segmentation appropriate to
//! that form's part layout, and returns a [`FormResult`]. Drivers are
//! independent: one form failing to isolate never prevents the others
//! from returning their results.

pub mod property;
pub mod secured;
pub mod summary;
pub mod unsecured;

use serde::Serialize;
use tracing::info;

use crate::error::{ExtractError, Result};
use crate::layout::Document;

pub use property::{PropertyForm, extract_form_106_ab};
pub use secured::{SecuredForm, extract_form_106_d};
pub use summary::{SummaryForm, extract_form_106_sum};
pub use unsecured::{UnsecuredForm, extract_form_106_ef};

/// Error value surfaced for a form that could not be located.
pub const FAILED_TO_FIND: &str = "Failed to find document.";

/// Shortest extractable first-page text. Anything below this is a scan.
const MIN_FIRST_PAGE_CHARS: usize = 100;

/// One form's outcome: the extracted record, or a per-form error value.
/// Serializes untagged, so the error arm is `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FormResult<T> {
    Ok(T),
    Error { error: String },
}

impl<T> FormResult<T> {
    pub fn not_found() -> Self {
        FormResult::Error {
            error: FAILED_TO_FIND.to_string(),
        }
    }

    pub fn as_ok(&self) -> Option<&T> {
        match self {
            FormResult::Ok(value) => Some(value),
            FormResult::Error { .. } => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, FormResult::Error { .. })
    }
}

impl<T> From<Result<T>> for FormResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => FormResult::Ok(value),
            Err(_) => FormResult::not_found(),
        }
    }
}

/// The debtor identity block, read once from the E/F header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DebtorInfo {
    pub debtor_1: String,
    pub debtor_2: String,
}

/// Results for every form in the filing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extraction {
    pub info: DebtorInfo,
    pub form_106_ab: FormResult<PropertyForm>,
    pub form_106_d: FormResult<SecuredForm>,
    pub form_106_ef: FormResult<UnsecuredForm>,
    pub form_106_sum: FormResult<SummaryForm>,
}

/// Whether the document has an extractable text layer at all.
pub fn can_process(doc: &Document) -> bool {
    doc.pages
        .first()
        .is_some_and(|p| p.extract_text().chars().count() >= MIN_FIRST_PAGE_CHARS)
}

/// Extract every available form.
///
/// A document without a text layer fails outright before any form work.
/// After that, each form is attempted independently and failures stay
/// scoped to their form.
pub fn extract_all(doc: &Document) -> Result<Extraction> {
    if !can_process(doc) {
        info!("first page has no usable text layer, refusing to extract");
        return Err(ExtractError::NotProcessable);
    }

    let form_106_ef = extract_form_106_ef(doc);
    let form_106_sum = extract_form_106_sum(doc);
    let form_106_ab = extract_form_106_ab(doc);
    let form_106_d = extract_form_106_d(doc);

    let info = match form_106_ef.as_ok() {
        Some(ef) => DebtorInfo {
            debtor_1: ef.debtor1.clone(),
            debtor_2: ef.debtor2.clone(),
        },
        None => DebtorInfo::default(),
    };

    Ok(Extraction {
        info,
        form_106_ab,
        form_106_d,
        form_106_ef,
        form_106_sum,
    })
}
