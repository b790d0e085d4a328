//! Checkbox decoding.
//!
//! Checkboxes on these forms are Wingdings glyphs followed by a printed
//! label. Decoding runs at several vertical tolerances because label text
//! wraps at slightly different baselines across form revisions; a looser
//! tolerance merges more glyphs into one row. Each checked box is mapped to
//! one or more semantic categories by keyword match against fixed
//! vocabularies.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::filters::{CheckState, MarkStyle, checkbox_mark};
use crate::layout::{DEFAULT_X_TOLERANCE, Glyph, Page};

/// Tolerances tried in order, strictest first.
const TOLERANCES: [f64; 3] = [3.0, 4.0, 5.0];

/// Normalized marker tokens.
pub const CHECKED_TOKEN: &str = "[√]";
pub const UNCHECKED_TOKEN: &str = "[]";

/// Printed header that can merge into a checked row at loose tolerances.
const NONPRIORITY_HEADER: &str = "Type of NONPRIORITY unsecured claim:";

static YES_NO: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(Yes|No)$").unwrap());

const DEBTOR_WORDS: [&str; 1] = ["debtor"];
const COMMUNITY_WORDS: [&str; 3] = ["community", "see instructions", "claim relates"];
const OFFSET_WORDS: [&str; 2] = ["No", "Yes"];
const INFO_WORDS: [&str; 3] = ["contingent", "unliquidated", "disputed"];
const CLAIM_TYPE_WORDS: [&str; 11] = [
    "domestic",
    "taxes",
    "death",
    "specify",
    "loans",
    "obligations",
    "pension",
    "including",
    "judgment",
    "statutory",
    "agreement",
];

/// The fixed real-estate property-type labels of Form 106A/B part 1.
pub const PROPERTY_OPTIONS: [&str; 8] = [
    "Single-family home",
    "Duplex or multi-unit building",
    "Condominium or cooperative",
    "Manufactured or mobile home",
    "Land",
    "Investment property",
    "Timeshare",
    "Other",
];

/// Checked labels grouped by semantic category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckboxSet {
    pub debtor: Vec<String>,
    pub community: Vec<String>,
    pub offset: Vec<String>,
    pub info: Vec<String>,
    pub claim_type: Vec<String>,
    pub property: Vec<String>,
}

impl CheckboxSet {
    fn fill_empty_from(&mut self, other: CheckboxSet) {
        fn fill(dst: &mut Vec<String>, src: Vec<String>) {
            if dst.is_empty() && !src.is_empty() {
                *dst = src;
            }
        }
        fill(&mut self.debtor, other.debtor);
        fill(&mut self.community, other.community);
        fill(&mut self.offset, other.offset);
        fill(&mut self.info, other.info);
        fill(&mut self.claim_type, other.claim_type);
        fill(&mut self.property, other.property);
    }
}

/// Decoder outcome. `Unreadable` is deliberately distinct from a readable
/// region with nothing checked, so callers can surface an explicit
/// sentinel instead of a silently empty answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Checkboxes {
    Readable(CheckboxSet),
    Unreadable,
}

impl Checkboxes {
    pub fn as_readable(&self) -> Option<&CheckboxSet> {
        match self {
            Checkboxes::Readable(set) => Some(set),
            Checkboxes::Unreadable => None,
        }
    }
}

/// One marker and the label text following it on the same row.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MarkSegment {
    state: CheckState,
    label: String,
}

/// Decode every checkbox in `region`.
///
/// A region with no recognizable empty box is declared unreadable as a
/// whole: a region we cannot see unchecked boxes in is never partially
/// trusted. Results from stricter tolerances take precedence; looser
/// passes only fill categories still empty.
pub fn decode_checkboxes(region: &Page) -> Checkboxes {
    let has_unchecked = region
        .glyphs
        .iter()
        .any(|g| checkbox_mark(g, MarkStyle::Standard) == Some(CheckState::Unchecked));
    if !has_unchecked {
        return Checkboxes::Unreadable;
    }

    let mut results: Option<CheckboxSet> = None;
    for tolerance in TOLERANCES {
        let segments = mark_segments(region, tolerance);
        let set = classify(&segments);
        match &mut results {
            None => results = Some(set),
            Some(existing) => existing.fill_empty_from(set),
        }
    }
    match results {
        Some(set) => Checkboxes::Readable(set),
        None => Checkboxes::Unreadable,
    }
}

/// Split each glyph row at marker glyphs: every marker opens a segment that
/// collects the trailing label text up to the next marker or end of row.
/// Text preceding the first marker of a row belongs to no segment.
fn mark_segments(region: &Page, y_tolerance: f64) -> Vec<MarkSegment> {
    let rows = crate::layout::cluster_rows(&region.glyphs, y_tolerance);
    let mut segments = Vec::new();
    for row in rows {
        let mut current: Option<MarkSegment> = None;
        let mut prev_x1: Option<f64> = None;
        for g in row {
            if let Some(state) = checkbox_mark(&g, MarkStyle::Standard) {
                if let Some(seg) = current.take() {
                    segments.push(finish_segment(seg));
                }
                current = Some(MarkSegment {
                    state,
                    label: String::new(),
                });
                prev_x1 = Some(g.x1);
                continue;
            }
            if let Some(seg) = &mut current {
                if let Some(px1) = prev_x1
                    && g.x0 - px1 > DEFAULT_X_TOLERANCE
                    && !seg.label.is_empty()
                {
                    seg.label.push(' ');
                }
                seg.label.push_str(&g.text);
            }
            prev_x1 = Some(g.x1);
        }
        if let Some(seg) = current {
            segments.push(finish_segment(seg));
        }
    }
    segments
}

fn finish_segment(mut seg: MarkSegment) -> MarkSegment {
    seg.label = seg.label.replace(NONPRIORITY_HEADER, "").trim().to_string();
    seg
}

fn classify(segments: &[MarkSegment]) -> CheckboxSet {
    let checked: Vec<&str> = segments
        .iter()
        .filter(|s| s.state == CheckState::Checked)
        .map(|s| s.label.as_str())
        .collect();

    let contains_any_ci = |label: &str, words: &[&str]| {
        let lower = label.to_lowercase();
        words.iter().any(|w| lower.contains(w))
    };

    let mut set = CheckboxSet {
        debtor: checked
            .iter()
            .filter(|l| contains_any_ci(l, &DEBTOR_WORDS))
            .map(|l| (*l).to_string())
            .collect(),
        community: checked
            .iter()
            .filter(|l| contains_any_ci(l, &COMMUNITY_WORDS))
            .map(|l| (*l).to_string())
            .collect(),
        offset: checked
            .iter()
            .filter(|l| OFFSET_WORDS.iter().any(|w| l.contains(w)))
            .map(|l| l.trim().to_string())
            .filter(|l| YES_NO.is_match(l))
            .collect(),
        info: checked
            .iter()
            .filter(|l| contains_any_ci(l, &INFO_WORDS))
            .map(|l| (*l).to_string())
            .collect(),
        claim_type: checked
            .iter()
            .filter(|l| contains_any_ci(l, &CLAIM_TYPE_WORDS))
            .map(|l| (*l).to_string())
            .collect(),
        // Canonical option names in their printed order, not the raw labels.
        property: PROPERTY_OPTIONS
            .iter()
            .filter(|opt| checked.iter().any(|l| l.contains(*opt)))
            .map(|opt| (*opt).to_string())
            .collect(),
    };

    if set.claim_type.first().is_some_and(|c| c.contains("Specify")) {
        set.claim_type = vec!["Other. Specify".to_string()];
    }
    set
}

/// Rows of normalized marker tokens for Form 106Sum, top to bottom.
/// Each returned string is one visual row of boxes, e.g. `"[√]"`.
pub fn summary_checkbox_rows(page: &Page) -> Vec<String> {
    let markers = page.filter(|g| checkbox_mark(g, MarkStyle::Summary).is_some());
    let rows = crate::layout::cluster_rows(&markers.glyphs, 3.0);
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|g| match checkbox_mark(g, MarkStyle::Summary) {
                    Some(CheckState::Checked) => CHECKED_TOKEN,
                    _ => UNCHECKED_TOKEN,
                })
                .collect::<String>()
        })
        .collect()
}

/// Replace checkbox glyphs with their normalized token text, leaving all
/// other glyphs untouched. Used where marker tokens need to appear inside
/// reassembled row text.
pub fn normalize_marks(page: &Page, style: MarkStyle) -> Page {
    let glyphs = page
        .glyphs
        .iter()
        .map(|g| match checkbox_mark(g, style) {
            Some(CheckState::Checked) => Glyph {
                text: CHECKED_TOKEN.to_string(),
                ..g.clone()
            },
            Some(CheckState::Unchecked) => Glyph {
                text: UNCHECKED_TOKEN.to_string(),
                ..g.clone()
            },
            None => g.clone(),
        })
        .collect();
    Page {
        glyphs,
        ..page.clone()
    }
}
