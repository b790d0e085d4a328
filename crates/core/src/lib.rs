//! form106 - layout-driven extraction of U.S. bankruptcy Official Form 106
//! filings from digitally generated PDFs.
//!
//! The engine works on geometry alone: positioned glyphs and rule lines
//! supplied by an external layout source. Rule-line widths drive section
//! segmentation, underline rules anchor field reads, and Wingdings glyphs
//! decode to checkbox answers. No OCR, no semantic tagging.

pub mod checkbox;
pub mod error;
pub mod filters;
pub mod forms;
pub mod isolate;
pub mod layout;
pub mod records;
pub mod region;
pub mod sections;

pub use error::{ExtractError, Result};
pub use forms::{
    Extraction, FormResult, PropertyForm, SecuredForm, SummaryForm, UnsecuredForm, extract_all,
    extract_form_106_ab, extract_form_106_d, extract_form_106_ef, extract_form_106_sum,
};
pub use layout::{BBox, Document, Glyph, Page, RuleLine};
