//! Section segmentation.
//!
//! The forms draw a full-width rule between parts and shorter rules inside
//! them; walking a page's lines top to bottom with these state objects
//! recovers the part structure and the per-entry spans. All state is
//! explicit and local to one scan, so a scan can be re-entered or tested
//! in isolation.

use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;

use crate::filters::white_text_and_left_side;
use crate::layout::{Page, RuleLine};
use crate::records::{AbTotals, AbValue, OtherPropertyEntry, clean_ab_data};

static PART_ROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"^Part \d:").unwrap());
// Item rows are "NN." prefixes; bare "5"-prefixed rows also occur where the
// generator drops the dot on the 5x series.
static ITEM_ROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,2}\. ?|^5").unwrap());

/// Counts part boundaries: one increment per rule line in the
/// part-boundary width band, monotonic over a single scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartTracker {
    part: u32,
}

impl PartTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance past `line`; returns true when it was a part boundary.
    pub fn advance(&mut self, line: &RuleLine) -> bool {
        let w = line.width();
        if w > 498.0 && w < 510.0 {
            self.part += 1;
            true
        } else {
            false
        }
    }

    pub fn part(&self) -> u32 {
        self.part
    }
}

/// Collects entry-anchor marker triples.
///
/// An entry is delimited by three short left-margin rules: the first is its
/// top, the middle carries no field of its own, the third is its bottom.
/// A stray wide rule arriving before any marker is buffered is decorative
/// and skipped.
#[derive(Debug, Clone, Default)]
pub struct MarkerBuffer {
    tops: SmallVec<[f64; 3]>,
}

impl MarkerBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next left-margin line; yields the `(top, bottom)` span of
    /// a complete entry once three markers are buffered.
    pub fn push(&mut self, line: &RuleLine) -> Option<(f64, f64)> {
        if self.tops.is_empty() && line.width() > 20.0 {
            return None;
        }
        self.tops.push(line.top);
        if self.tops.len() == 3 {
            let span = (self.tops[0], self.tops[2]);
            self.tops.clear();
            Some(span)
        } else {
            None
        }
    }
}

/// Pairs of notice-party markers on Form 106 E/F part 3: short ticks or a
/// full-width rule, extracted two at a time.
#[derive(Debug, Clone, Default)]
pub struct PairBuffer {
    markers: Vec<RuleLine>,
}

impl PairBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offer(&mut self, line: &RuleLine) -> Option<(RuleLine, RuleLine)> {
        let w = line.width();
        if !((w > 10.0 && w < 20.0) || w > 530.0) {
            return None;
        }
        self.markers.push(*line);
        if self.markers.len() == 2 {
            let stop = self.markers.pop()?;
            let start = self.markers.pop()?;
            Some((start, stop))
        } else {
            None
        }
    }
}

/// Notice-party marker groups on Form 106D part 2. A full-width rule closes
/// the group it terminates; groups of fewer than five markers are page
/// artifacts (boxes are not lines) and dropped.
#[derive(Debug, Clone, Default)]
pub struct GroupBuffer {
    markers: Vec<RuleLine>,
}

impl GroupBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offer(&mut self, line: &RuleLine) -> Option<Vec<RuleLine>> {
        let w = line.width();
        if (w > 5.0 && w < 120.0) || w > 530.0 {
            self.markers.push(*line);
        }
        if w > 530.0 {
            let group = std::mem::take(&mut self.markers);
            if group.len() > 4 {
                return Some(group);
            }
        }
        None
    }
}

/// A property section of Form 106A/B parts 1–2: its vertical span and the
/// hidden index key that names it.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySection {
    pub top: f64,
    pub bottom: f64,
    pub key: String,
}

/// Locate the property sections of Form 106A/B.
///
/// The generator writes a white-on-white index word (`P1.`, `1.1`, ...) at
/// the head of each section; each section ends at the next full-width rule.
pub fn find_property_sections(page: &Page) -> Vec<PropertySection> {
    let words = page.filter(white_text_and_left_side).extract_words();
    let rows: Vec<_> = words
        .iter()
        .filter(|w| {
            let mut chars = w.text.chars();
            w.text.chars().count() > 2
                && chars.next().is_some_and(|c| "P12345".contains(c))
                && chars.next() == Some('.')
        })
        .collect();
    if rows.is_empty() {
        return Vec::new();
    }
    let bottoms: Vec<f64> = page
        .lines_sorted()
        .iter()
        .filter(|l| l.top > rows[0].top && l.width() > 530.0)
        .map(|l| l.top)
        .take(rows.len())
        .collect();
    rows.iter()
        .zip(bottoms)
        .map(|(row, bottom)| PropertySection {
            top: row.top,
            bottom,
            key: row.text.clone(),
        })
        .collect()
}

/// Outcome of the parts 3–8 row scan of Form 106A/B.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AbScan {
    pub entries: Vec<OtherPropertyEntry>,
    pub totals: Option<AbTotals>,
}

/// Walk the filtered content rows of Form 106A/B below parts 1–2.
///
/// `Part N:` rows advance the part counter. Inside parts 3–7 an item row
/// (`NN.`) closes the previous item, flushing its accumulated data rows;
/// checkbox rows never count as data. Part 8 accumulates rows until the
/// final `63.` row and builds the grand totals. The first row is the page
/// header and is skipped.
pub fn scan_ab_rows(rows: &[String]) -> AbScan {
    let mut part = 0u32;
    let mut key: Option<String> = None;
    let mut section: Option<String> = None;
    let mut data: Vec<String> = Vec::new();
    let mut part_eight: Vec<String> = Vec::new();
    let mut scan = AbScan::default();

    for row in rows.iter().skip(1) {
        if PART_ROW.is_match(row) {
            part += 1;
            continue;
        }
        if (3..=7).contains(&part) {
            if !ITEM_ROW.is_match(row) {
                data.push(row.clone());
                continue;
            }
            if section.as_deref() == Some(row.as_str()) {
                continue;
            }
            if row.contains("54. ") {
                let value = row.split(' ').nth(1).unwrap_or("").to_string();
                scan.entries.push(OtherPropertyEntry {
                    key: "54.".to_string(),
                    value: AbValue::Text(value),
                });
            }
            if let Some(k) = key.clone() {
                data.retain(|d| !d.contains('['));
                if !data.is_empty() {
                    // A lone "2" under item 24 is a page artifact, and the
                    // row that exposed it is not a fresh item either.
                    if k == "24." && data == ["2"] {
                        data.clear();
                        continue;
                    }
                    scan.entries.push(OtherPropertyEntry {
                        key: k,
                        value: clean_ab_data(&data),
                    });
                }
                data.clear();
                section = Some(row.clone());
            }
            key = Some(row.clone());
        }
        if part == 8 {
            part_eight.push(row.clone());
            if row.contains("63. ") {
                scan.totals = AbTotals::assemble(&part_eight);
            }
        }
    }
    scan
}

/// The debtor names printed in the A/B header; their rows are stripped
/// before the parts 3–8 scan so names never masquerade as field data.
pub fn ab_debtor_rows(rows: &[String]) -> Vec<String> {
    let Some(first) = rows.get(1) else {
        return Vec::new();
    };
    let mut debtors = vec![first.clone()];
    if let Some(second) = rows.get(2)
        && !second.contains('[')
        && !second.starts_with(|c: char| c.is_ascii_digit())
    {
        debtors.push(second.clone());
    }
    debtors
}
