//! Form 106 E/F: creditors who have unsecured claims.
//!
//! Parts 1 and 2 hold the repeating creditor entries (priority and
//! nonpriority), part 3 lists secondary notice parties keyed back to their
//! primary creditor, and part 4 is a flat block of ten statistics rows.

use indexmap::IndexMap;
use serde::Serialize;

use crate::checkbox::decode_checkboxes;
use crate::filters::{just_text, key_filter, keys_and_input_text, real_line, remove_margin_lines};
use crate::forms::FormResult;
use crate::isolate::{FORM_106_EF, isolate_form};
use crate::layout::{BBox, Document, Page};
use crate::records::{NoticeParty, STATS_EF, UnsecuredCreditor};
use crate::region::{ReadRegion, crop_and_extract};
use crate::sections::{MarkerBuffer, PairBuffer, PartTracker};

/// Extracted Form 106 E/F content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnsecuredForm {
    pub debtor1: String,
    pub debtor2: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<IndexMap<String, String>>,
    pub creditors: Vec<UnsecuredCreditor>,
}

/// Rows in the statistics block of part 4.
const STATS_ROWS: usize = 10;

pub fn extract_form_106_ef(doc: &Document) -> FormResult<UnsecuredForm> {
    let page = match isolate_form(doc, FORM_106_EF) {
        Ok(page) => page,
        Err(_) => return FormResult::not_found(),
    };
    let lines = page.filter_lines(real_line).lines_sorted();

    let header_read = |idx: usize| {
        lines
            .get(idx)
            .map(|l| crop_and_extract(&page, l, ReadRegion::up(30.0).adjusted()))
            .unwrap_or_default()
    };
    let debtor1 = header_read(0);
    let debtor2 = header_read(1);

    let mut tracker = PartTracker::new();
    let mut entries = MarkerBuffer::new();
    let mut notice_pairs = PairBuffer::new();
    let mut creditors: Vec<UnsecuredCreditor> = Vec::new();
    let mut stats: Vec<String> = Vec::new();
    let mut statistics: Option<IndexMap<String, String>> = None;

    for line in &lines {
        tracker.advance(line);
        let part = tracker.part();

        // Final part: a flat run of statistics rows.
        if part == 4 && line.width() < 110.0 && stats.len() < STATS_ROWS {
            stats.push(crop_and_extract(&page, line, ReadRegion::up(10.0)));
            if stats.len() == STATS_ROWS {
                statistics = Some(
                    STATS_EF
                        .iter()
                        .zip(&stats)
                        .map(|(key, value)| (key.to_string(), value.clone()))
                        .collect(),
                );
            }
        }

        if part == 3
            && let Some((start, stop)) = notice_pairs.offer(line)
        {
            attach_notice_party(&page, &start, &stop, &mut creditors);
        }

        if line.x0 < 50.0
            && (part == 1 || part == 2)
            && let Some((top, bottom)) = entries.push(line)
            && let Some(creditor) = parse_unsecured_creditor(&page, top, bottom)
        {
            creditors.push(creditor);
        }
    }

    FormResult::Ok(UnsecuredForm {
        debtor1,
        debtor2,
        statistics,
        creditors,
    })
}

/// Extract one creditor entry spanning `[top, bottom)`.
///
/// The section's printed key is read from the left-edge item number; entry
/// fields are read off the anchor lines inside the span, against a wider
/// context crop so the nearest-line adjustment can see the row above. The
/// field list only starts collecting once a read echoes the key back,
/// which skips the row of column headers above the first anchor.
fn parse_unsecured_creditor(page: &Page, top: f64, bottom: f64) -> Option<UnsecuredCreditor> {
    let context = page.crop(BBox::new(0.0, (top - 500.0).max(100.0), page.width, bottom));
    let section = context.crop(BBox::new(0.0, top, page.width, bottom));
    let key = section.filter(key_filter).extract_text().replace('\n', "");
    let boxes = decode_checkboxes(&section);

    let mut data: Vec<String> = Vec::new();
    for line in section.filter_lines(remove_margin_lines).lines_sorted() {
        if data.is_empty() && line.width() > 20.0 {
            continue;
        }
        let output = crop_and_extract(&context, &line, ReadRegion::up(100.0).adjusted());
        if !data.is_empty() || output.replace('\n', "") == key {
            // Priority entries carry ten fields, nonpriority item-4 rows
            // eight; reads past that are checkbox underline artifacts.
            if (data.len() == 10 && key.contains("2."))
                || (data.len() == 8 && key.contains("4."))
            {
                continue;
            }
            data.push(output);
        }
    }
    if data.is_empty() {
        return None;
    }
    UnsecuredCreditor::assemble(&data, &boxes, &key)
}

/// Read one part-3 notice party between its `start`/`stop` markers and
/// attach it to the primary creditor sharing its key.
fn attach_notice_party(
    page: &Page,
    start: &crate::layout::RuleLine,
    stop: &crate::layout::RuleLine,
    creditors: &mut [UnsecuredCreditor],
) {
    let key_bbox = BBox::new(start.x0, start.top - 20.0, start.x1, start.top);
    let addy_bbox = BBox::new(0.0, start.top - 20.0, start.x0 - 20.0, stop.top);
    let acct_bbox = BBox::new(start.x1 + 150.0, start.top + 20.0, page.width, stop.top);

    let key = page.crop(key_bbox).filter(just_text).extract_text();
    let address = page
        .crop(addy_bbox)
        .filter(keys_and_input_text)
        .extract_text();
    let acct = page
        .crop(acct_bbox)
        .filter(keys_and_input_text)
        .extract_text();

    for creditor in creditors.iter_mut() {
        if creditor.key == key {
            creditor.other_creditors.push(NoticeParty {
                key: key.clone(),
                address: address.clone(),
                acct: acct.clone(),
            });
        }
    }
}
