//! Form 106Sum: summary of assets, liabilities and statistical
//! information.
//!
//! The summary is a flat form: every answer sits on an underline rule in
//! the right-hand column, and four checkboxes mark the filing kind. It is
//! read page by page in place, never merged.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::info;

use crate::checkbox::summary_checkbox_rows;
use crate::filters::summary_line;
use crate::forms::FormResult;
use crate::isolate::find_summary_pages;
use crate::layout::Document;
use crate::records::SUMMARY_TEXT_INPUTS;
use crate::region::{ReadRegion, crop_and_extract};

/// Extracted Form 106Sum content: the named dollar inputs plus the four
/// filing-kind checkboxes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryForm {
    #[serde(flatten)]
    pub inputs: IndexMap<String, String>,
    #[serde(rename = "7/11/13")]
    pub chapter_7_11_13: bool,
    pub amended: bool,
    pub consumer_debts: bool,
    pub non_consumer_debts: bool,
}

/// Read-order slots that are always blank on this form and never map to a
/// named input. Removed in sequence, so later indices account for the
/// earlier removals.
const BLANK_SLOTS: [usize; 3] = [6, 7, 10];

pub fn extract_form_106_sum(doc: &Document) -> FormResult<SummaryForm> {
    let pages = find_summary_pages(doc);
    if pages.is_empty() {
        info!("summary pages not found, may not be a vector pdf");
        return FormResult::not_found();
    }

    let mut boxes: Vec<String> = Vec::new();
    let mut inputs: Vec<String> = Vec::new();
    for &page in &pages {
        boxes.extend(summary_checkbox_rows(page));
        for line in page.filter_lines(summary_line).lines_sorted() {
            let region = ReadRegion::default().left(5.0).adjusted();
            inputs.push(crop_and_extract(page, &line, region));
        }
    }

    if inputs.is_empty() {
        return FormResult::Ok(SummaryForm::default());
    }

    for idx in BLANK_SLOTS {
        if idx < inputs.len() {
            inputs.remove(idx);
        }
    }
    inputs.pop();
    if inputs.len() >= 2 {
        inputs.remove(inputs.len() - 2);
    }

    let checked = |idx: usize| boxes.get(idx).is_some_and(|row| row.contains('√'));

    FormResult::Ok(SummaryForm {
        inputs: SUMMARY_TEXT_INPUTS
            .iter()
            .zip(&inputs)
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect(),
        chapter_7_11_13: checked(2),
        amended: checked(0),
        consumer_debts: checked(3),
        non_consumer_debts: checked(4),
    })
}
