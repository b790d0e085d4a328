//! Geometric page model: positioned glyphs, rule lines and croppable pages.
//!
//! Pages arrive from an external layout source (a pdfplumber-style dump of
//! character and line bounding boxes); this module gives them the operations
//! the extraction engine needs: cropping to a region, filtering by
//! predicate, and tolerance-based text reassembly. Coordinates are in PDF
//! points with the origin at the top-left of the page, `top` increasing
//! downward.

use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Horizontal gap above which two glyphs on the same row are separated by
/// a space during text reassembly.
pub const DEFAULT_X_TOLERANCE: f64 = 3.0;

/// Vertical window within which glyphs are merged into one row.
pub const DEFAULT_Y_TOLERANCE: f64 = 3.0;

/// Device color as reported by the layout source. Grayscale white is `[1.0]`.
pub type Color = Option<Vec<f64>>;

/// A rectangular region, `top < bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
}

impl BBox {
    pub fn new(x0: f64, top: f64, x1: f64, bottom: f64) -> Self {
        Self { x0, top, x1, bottom }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Whether two regions overlap (shared edges count as overlap).
    pub fn intersects(&self, other: &BBox) -> bool {
        self.x0 <= other.x1
            && other.x0 <= self.x1
            && self.top <= other.bottom
            && other.top <= self.bottom
    }
}

/// One rendered character with its font metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    pub text: String,
    pub x0: f64,
    pub x1: f64,
    pub top: f64,
    pub bottom: f64,
    pub size: f64,
    pub fontname: String,
    #[serde(default)]
    pub stroking_color: Color,
    #[serde(default)]
    pub non_stroking_color: Color,
}

impl Glyph {
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn bbox(&self) -> BBox {
        BBox::new(self.x0, self.top, self.x1, self.bottom)
    }

    /// Whether the glyph is painted white-on-white. Forms hide their
    /// machine-readable section indices this way.
    pub fn is_white(&self) -> bool {
        match &self.non_stroking_color {
            Some(components) if !components.is_empty() => {
                components.iter().all(|c| (*c - 1.0).abs() < 1e-9)
            }
            _ => false,
        }
    }
}

/// A drawn straight line segment. Never rendered here; widths are the
/// structural signal that drives section segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleLine {
    pub x0: f64,
    pub x1: f64,
    pub top: f64,
    pub bottom: f64,
}

impl RuleLine {
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn bbox(&self) -> BBox {
        BBox::new(self.x0, self.top, self.x1, self.bottom)
    }
}

/// A word reassembled from adjacent glyphs on one row.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    pub x0: f64,
    pub x1: f64,
    pub top: f64,
    pub bottom: f64,
}

/// An ordered, croppable, filterable collection of glyphs and rule lines.
///
/// Cropping and filtering return owned sub-pages; the extraction pipeline
/// never mutates a page it was given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub page_number: usize,
    pub width: f64,
    pub height: f64,
    #[serde(alias = "chars")]
    pub glyphs: Vec<Glyph>,
    #[serde(default)]
    pub lines: Vec<RuleLine>,
}

impl Page {
    /// Sub-page containing the glyphs and lines intersecting `bbox`.
    pub fn crop(&self, bbox: BBox) -> Page {
        Page {
            page_number: self.page_number,
            width: self.width,
            height: self.height,
            glyphs: self
                .glyphs
                .iter()
                .filter(|g| g.bbox().intersects(&bbox))
                .cloned()
                .collect(),
            lines: self
                .lines
                .iter()
                .filter(|l| l.bbox().intersects(&bbox))
                .copied()
                .collect(),
        }
    }

    /// Sub-page keeping only the glyphs accepted by `pred`. Lines pass
    /// through untouched; use [`Page::filter_lines`] for those.
    pub fn filter<F>(&self, pred: F) -> Page
    where
        F: Fn(&Glyph) -> bool,
    {
        Page {
            page_number: self.page_number,
            width: self.width,
            height: self.height,
            glyphs: self.glyphs.iter().filter(|g| pred(g)).cloned().collect(),
            lines: self.lines.clone(),
        }
    }

    /// Sub-page keeping only the lines accepted by `pred`.
    pub fn filter_lines<F>(&self, pred: F) -> Page
    where
        F: Fn(&RuleLine) -> bool,
    {
        Page {
            page_number: self.page_number,
            width: self.width,
            height: self.height,
            glyphs: self.glyphs.clone(),
            lines: self.lines.iter().filter(|l| pred(l)).copied().collect(),
        }
    }

    /// Rule lines in top-to-bottom order.
    pub fn lines_sorted(&self) -> Vec<RuleLine> {
        self.lines
            .iter()
            .copied()
            .sorted_by_key(|l| (OrderedFloat(l.top), OrderedFloat(l.x0)))
            .collect()
    }

    /// Reassembled page text with the default tolerances.
    pub fn extract_text(&self) -> String {
        self.extract_text_with(DEFAULT_Y_TOLERANCE)
    }

    /// Reassembled page text: glyphs are clustered into rows within
    /// `y_tolerance`, x-sorted within a row, separated by a space at gaps
    /// wider than [`DEFAULT_X_TOLERANCE`], and rows joined with newlines.
    pub fn extract_text_with(&self, y_tolerance: f64) -> String {
        let rows = cluster_rows(&self.glyphs, y_tolerance);
        let mut out = String::new();
        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let mut prev_x1: Option<f64> = None;
            for g in row {
                if let Some(px1) = prev_x1
                    && g.x0 - px1 > DEFAULT_X_TOLERANCE
                {
                    out.push(' ');
                }
                out.push_str(&g.text);
                prev_x1 = Some(g.x1);
            }
        }
        out
    }

    /// Words in reading order: rows within `DEFAULT_Y_TOLERANCE`, split at
    /// horizontal gaps wider than `DEFAULT_X_TOLERANCE`.
    pub fn extract_words(&self) -> Vec<Word> {
        let rows = cluster_rows(&self.glyphs, DEFAULT_Y_TOLERANCE);
        let mut words = Vec::new();
        for row in rows {
            let mut current: Vec<&Glyph> = Vec::new();
            for g in &row {
                let gap = current
                    .last()
                    .is_some_and(|last| g.x0 - last.x1 > DEFAULT_X_TOLERANCE);
                if gap {
                    words.push(merge_word(&current));
                    current.clear();
                }
                current.push(g);
            }
            if !current.is_empty() {
                words.push(merge_word(&current));
            }
        }
        words
    }

    /// The same page shifted down by `dy` points.
    pub fn translated(&self, dy: f64) -> Page {
        Page {
            page_number: self.page_number,
            width: self.width,
            height: self.height,
            glyphs: self
                .glyphs
                .iter()
                .map(|g| Glyph {
                    top: g.top + dy,
                    bottom: g.bottom + dy,
                    ..g.clone()
                })
                .collect(),
            lines: self
                .lines
                .iter()
                .map(|l| RuleLine {
                    top: l.top + dy,
                    bottom: l.bottom + dy,
                    ..*l
                })
                .collect(),
        }
    }
}

/// A whole layout dump: the ordered pages of one source PDF.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub pages: Vec<Page>,
}

/// Cluster glyphs into visual rows. Rows come back in top-to-bottom order,
/// each row x-sorted; a new row starts when the vertical gap between
/// successive glyph tops exceeds `y_tolerance`.
pub(crate) fn cluster_rows(glyphs: &[Glyph], y_tolerance: f64) -> Vec<Vec<Glyph>> {
    let mut sorted: Vec<&Glyph> = glyphs.iter().collect();
    sorted.sort_by_key(|g| OrderedFloat(g.top));

    let mut rows: Vec<Vec<Glyph>> = Vec::new();
    let mut current: Vec<Glyph> = Vec::new();
    let mut anchor_top: Option<f64> = None;
    for g in sorted {
        match anchor_top {
            Some(t) if g.top - t <= y_tolerance => current.push(g.clone()),
            Some(_) => {
                rows.push(std::mem::take(&mut current));
                current.push(g.clone());
                anchor_top = Some(g.top);
            }
            None => {
                current.push(g.clone());
                anchor_top = Some(g.top);
            }
        }
    }
    if !current.is_empty() {
        rows.push(current);
    }
    for row in &mut rows {
        row.sort_by_key(|g| OrderedFloat(g.x0));
    }
    rows
}

fn merge_word(glyphs: &[&Glyph]) -> Word {
    let text: String = glyphs.iter().map(|g| g.text.as_str()).collect();
    Word {
        text,
        x0: glyphs.iter().map(|g| OrderedFloat(g.x0)).min().unwrap().0,
        x1: glyphs.iter().map(|g| OrderedFloat(g.x1)).max().unwrap().0,
        top: glyphs.iter().map(|g| OrderedFloat(g.top)).min().unwrap().0,
        bottom: glyphs
            .iter()
            .map(|g| OrderedFloat(g.bottom))
            .max()
            .unwrap()
            .0,
    }
}
