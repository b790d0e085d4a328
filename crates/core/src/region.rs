//! Anchor-relative field reading.
//!
//! Every scalar field on these forms sits just above an underline rule.
//! Reading a field means cropping a box that extends up (and optionally
//! left) from the anchor line, shrinking it back to the nearest other rule
//! inside the box so the read does not bleed into the row above, and
//! reassembling the filtered answer text.

use ordered_float::OrderedFloat;

use crate::filters::keys_and_input_text;
use crate::layout::{BBox, Page, RuleLine};

/// How far out from the anchor line to read, and whether to narrow the
/// region against the nearest enclosing rule line.
#[derive(Debug, Clone, Copy)]
pub struct ReadRegion {
    pub left_shift: f64,
    pub up_shift: f64,
    pub adjust: bool,
}

impl Default for ReadRegion {
    fn default() -> Self {
        Self {
            left_shift: 0.0,
            up_shift: 20.0,
            adjust: false,
        }
    }
}

impl ReadRegion {
    pub fn up(up_shift: f64) -> Self {
        Self {
            up_shift,
            ..Self::default()
        }
    }

    pub fn adjusted(mut self) -> Self {
        self.adjust = true;
        self
    }

    pub fn left(mut self, left_shift: f64) -> Self {
        self.left_shift = left_shift;
        self
    }
}

/// The top of the nearest rule line strictly inside `bbox` other than the
/// anchor itself, i.e. the lowest such line above the anchor.
fn nearest_inner_line_top(page: &Page, bbox: BBox, anchor: &RuleLine) -> Option<f64> {
    page.crop(bbox)
        .lines
        .iter()
        .filter(|l| l.top != anchor.top)
        .map(|l| OrderedFloat(l.top))
        .max()
        .map(|t| t.0)
}

/// Read the field anchored on `line`: crop above it per `region`, narrow to
/// the nearest enclosing rule if asked, and return the filtered text.
/// An empty region reads as an empty string.
pub fn crop_and_extract(page: &Page, line: &RuleLine, region: ReadRegion) -> String {
    let mut bbox = BBox::new(
        line.x0 - region.left_shift,
        line.top - region.up_shift,
        line.x1,
        line.top,
    );
    if region.adjust
        && let Some(top) = nearest_inner_line_top(page, bbox, line)
    {
        bbox.top = top;
    }
    page.crop(bbox).filter(keys_and_input_text).extract_text()
}

/// Read one field of each anchor line in `lines`, in the order given.
/// Lines too short to anchor a field (< 10 pt) are skipped.
pub fn collect_line_values(page: &Page, lines: &[RuleLine]) -> Vec<String> {
    lines
        .iter()
        .filter(|l| l.width() >= 10.0)
        .map(|l| crop_and_extract(page, l, ReadRegion::up(100.0).adjusted()))
        .collect()
}

/// Schedule D field read. Row heights on the secured-creditor table are
/// irregular, so the crop shape depends on which field (by collection
/// order) is being read.
pub fn secured_field_read(page: &Page, line: &RuleLine, fields_so_far: usize) -> String {
    let probe = BBox::new(line.x0, line.top - 200.0, line.x1, line.top);
    let nearest = nearest_inner_line_top(page, probe, line);
    let bbox = match (nearest, fields_so_far) {
        (Some(top), 6) => BBox::new(line.x0, top - 20.0, line.x1, line.top),
        (Some(_), 8) => BBox::new(line.x0, line.top - 50.0, line.x1, line.top),
        (Some(top), _) => BBox::new(line.x0, top, line.x1, line.top),
        (None, _) => probe,
    };
    page.crop(bbox).filter(keys_and_input_text).extract_text()
}
