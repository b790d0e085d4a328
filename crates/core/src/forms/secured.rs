//! Form 106D: creditors who have claims secured by property.
//!
//! Part 1 holds the repeating secured-creditor entries; part 2 lists the
//! parties to be notified for a debt already listed, keyed back to the
//! primary creditor.

use serde::Serialize;

use crate::checkbox::decode_checkboxes;
use crate::filters::{key_filter, keys_and_input_text, real_line, remove_margin_lines};
use crate::forms::FormResult;
use crate::isolate::{FORM_106_D, isolate_form};
use crate::layout::{BBox, Document, Page, RuleLine};
use crate::records::{NoticeParty, SecuredCreditor};
use crate::region::secured_field_read;
use crate::sections::{GroupBuffer, MarkerBuffer, PartTracker};

/// Extracted Form 106D content.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SecuredForm {
    pub creditors: Vec<SecuredCreditor>,
}

pub fn extract_form_106_d(doc: &Document) -> FormResult<SecuredForm> {
    let page = match isolate_form(doc, FORM_106_D) {
        Ok(page) => page,
        Err(_) => return FormResult::not_found(),
    };
    let lines = page.filter_lines(real_line).lines_sorted();

    let mut tracker = PartTracker::new();
    let mut entries = MarkerBuffer::new();
    let mut notice_groups = GroupBuffer::new();
    let mut creditors: Vec<SecuredCreditor> = Vec::new();

    for line in &lines {
        tracker.advance(line);
        let part = tracker.part();

        if part == 2
            && let Some(group) = notice_groups.offer(line)
        {
            attach_notice_party(&page, &group, &mut creditors);
        }

        if line.x0 < 50.0
            && part == 1
            && let Some((top, bottom)) = entries.push(line)
            && let Some(creditor) = parse_secured_creditor(&page, top, bottom)
        {
            creditors.push(creditor);
        }
    }

    FormResult::Ok(SecuredForm { creditors })
}

/// Extract one secured-creditor entry spanning `[top, bottom)`. Field
/// collection starts once a read echoes the section key; the per-field
/// crop shapes live in [`secured_field_read`].
fn parse_secured_creditor(page: &Page, top: f64, bottom: f64) -> Option<SecuredCreditor> {
    let context = page.crop(BBox::new(0.0, (top - 500.0).max(100.0), page.width, bottom));
    let section = context.crop(BBox::new(0.0, top, page.width, bottom));
    let key = section.filter(key_filter).extract_text();
    let boxes = decode_checkboxes(&section);

    let mut data: Vec<String> = Vec::new();
    for line in section.filter_lines(remove_margin_lines).lines_sorted() {
        if data.is_empty() && line.width() > 20.0 {
            continue;
        }
        let output = secured_field_read(&context, &line, data.len());
        if !data.is_empty() || output == key {
            data.push(output);
        }
    }
    SecuredCreditor::assemble(&data, &boxes)
}

/// Read one part-2 notice party from its marker group. The group's last
/// marker is the full-width rule that closed it; five-marker groups read
/// their key box flush, six-marker groups 12 pt higher.
fn attach_notice_party(page: &Page, markers: &[RuleLine], creditors: &mut [SecuredCreditor]) {
    let (Some(first), Some(last)) = (markers.first(), markers.last()) else {
        return;
    };
    if markers.len() < 3 {
        return;
    }
    let key_line = markers[markers.len() - 3];
    let acct_line = markers[1];
    let adjust = if markers.len() == 5 { 0.0 } else { 12.0 };

    let addy_bbox = BBox::new(0.0, first.top, last.x1 * 0.35, last.top);
    let key_bbox = BBox::new(key_line.x0, first.top - adjust, key_line.x1, key_line.top);
    let acct_bbox = BBox::new(acct_line.x0, acct_line.top - 12.0, acct_line.x1, acct_line.top);

    let address = page
        .crop(addy_bbox)
        .filter(keys_and_input_text)
        .extract_text();
    let key = page
        .crop(key_bbox)
        .filter(keys_and_input_text)
        .extract_text()
        .trim()
        .to_string();
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
