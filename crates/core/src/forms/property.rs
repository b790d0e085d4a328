//! Form 106A/B: property of the debtor.
//!
//! Parts 1 and 2 (real estate, then vehicles and other crafts) are laid
//! out as repeating sections located by hidden white index words. Parts
//! 3 through 7 are flat item lists and part 8 the grand totals; those are
//! read as filtered text rows through a row state machine.

use serde::Serialize;

use crate::checkbox::{decode_checkboxes, normalize_marks};
use crate::filters::{MarkStyle, ab_content};
use crate::forms::FormResult;
use crate::isolate::{FORM_106_AB, isolate_form};
use crate::layout::{BBox, Document, Page};
use crate::records::{
    AbTotals, OtherProperty, OtherPropertyEntry, PropertyEntry, RealEstate, Vehicle,
};
use crate::region::collect_line_values;
use crate::sections::{ab_debtor_rows, find_property_sections, scan_ab_rows};

/// Extracted Form 106A/B content.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PropertyForm {
    pub cars_land_and_crafts: Vec<PropertyEntry>,
    pub debtors: Vec<String>,
    pub other_property: Vec<OtherPropertyEntry>,
    pub totals: Option<AbTotals>,
}

pub fn extract_form_106_ab(doc: &Document) -> FormResult<PropertyForm> {
    let page = match isolate_form(doc, FORM_106_AB) {
        Ok(page) => page,
        Err(_) => return FormResult::not_found(),
    };

    let cars_land_and_crafts = parse_property_entries(&page);

    let rows: Vec<String> = normalize_marks(&page, MarkStyle::Standard)
        .filter(ab_content)
        .extract_text()
        .lines()
        .map(str::to_string)
        .collect();
    let debtors = ab_debtor_rows(&rows);
    let rows: Vec<String> = rows
        .into_iter()
        .filter(|row| !debtors.iter().any(|d| row.contains(d.as_str())))
        .collect();
    let scan = scan_ab_rows(&rows);

    FormResult::Ok(PropertyForm {
        cars_land_and_crafts,
        debtors,
        other_property: scan.entries,
        totals: scan.totals,
    })
}

/// Extract the part 1–2 sections: real estate (item 1), vehicles (item 3)
/// and other crafts (item 4). Field values are read off each section's
/// anchor lines against the full page so the nearest-line adjustment can
/// see above the section top.
fn parse_property_entries(page: &Page) -> Vec<PropertyEntry> {
    let mut entries = Vec::new();
    for section in find_property_sections(page) {
        let crop = page.crop(BBox::new(0.0, section.top, page.width, section.bottom));
        let data = collect_line_values(page, &crop.lines_sorted());
        let boxes = decode_checkboxes(&crop);
        let key = section.key.as_str();

        if key.contains("1.")
            && let Some(entry) = RealEstate::assemble(key, &data, &boxes)
        {
            entries.push(PropertyEntry::RealEstate(entry));
        }
        if key.contains("3.")
            && let Some(entry) = Vehicle::assemble(key, &data, &boxes)
        {
            entries.push(PropertyEntry::Vehicle(entry));
        } else if key.contains("4.")
            && let Some(entry) = OtherProperty::assemble(key, &data, &boxes)
        {
            entries.push(PropertyEntry::Other(entry));
        }
    }
    entries
}
