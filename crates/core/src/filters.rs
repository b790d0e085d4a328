//! Geometric filter predicates over glyphs and rule lines.
//!
//! Every filter is a pure predicate. The Form 106 family distinguishes
//! filled-in answers from printed boilerplate by font size band
//! (8.5–9.1 pt) and by the left-margin item-number glyphs (digits and dots
//! left of x = 50), and marks section boundaries with rule lines of known
//! width bands. Checkbox glyphs are classified here but normalized
//! elsewhere; see [`checkbox_mark`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::layout::{Glyph, RuleLine};

/// A digit or dot, the only glyphs that count as item-number labels.
static KEY_GLYPH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9.]").unwrap());

/// Body font of the printed form text; never a filled-in answer.
const BODY_FONT: &str = "ArialMT";

/// Fonts that only ever carry boilerplate on Form 106A/B.
const AB_BOILERPLATE_FONTS: [&str; 3] = ["ArialMT", "Arial-ItalicMT", "WQPAYT+LiberationSans"];

/// Checked/unchecked state of a checkbox glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Checked,
    Unchecked,
}

/// Which Wingdings encoding a form uses for its boxes.
///
/// The summary form renders its boxes with a different generator than the
/// schedule forms, so the checked marker differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkStyle {
    /// Schedule forms (A/B, D, E/F).
    Standard,
    /// Form 106Sum.
    Summary,
}

/// Classify a glyph as a checkbox marker, if it is one.
///
/// Only Wingdings-font glyphs qualify. This is the pure half of checkbox
/// handling; turning marks into `[√]` / `[]` tokens happens in the decoder.
pub fn checkbox_mark(glyph: &Glyph, style: MarkStyle) -> Option<CheckState> {
    if !glyph.fontname.contains("Wingdings") {
        return None;
    }
    let text = glyph.text.as_str();
    let checked = match style {
        MarkStyle::Summary => text.contains('2') || text == "\u{f06e}",
        MarkStyle::Standard => {
            text.contains("(cid:132)") || text.contains('\u{f06e}') || text.contains('n')
        }
    };
    if checked {
        return Some(CheckState::Checked);
    }
    match style {
        // Any other Wingdings glyph on the summary form is an empty box.
        MarkStyle::Summary => Some(CheckState::Unchecked),
        MarkStyle::Standard => {
            if text.contains("(cid:134)") || text.contains('\u{f06f}') || text.contains('o') {
                Some(CheckState::Unchecked)
            } else {
                None
            }
        }
    }
}

/// Keep rule lines wide enough to be structural (>= 10 pt).
pub fn real_line(line: &RuleLine) -> bool {
    line.width() >= 10.0
}

/// Keep the field-row anchor lines of Form 106Sum: wide enough, below the
/// header, and in the right-hand answer column.
pub fn summary_line(line: &RuleLine) -> bool {
    line.width() >= 20.0 && line.top >= 60.0 && line.x0 >= 360.0
}

/// Reject the split-page rule artifacts drawn inside the margin bands.
/// Without this, schedule D and E/F sections double-count their anchors.
pub fn remove_margin_lines(line: &RuleLine) -> bool {
    if line.width() < 10.0 {
        return false;
    }
    if line.x0 > 70.0 && line.x0 < 75.0 {
        return false;
    }
    if line.x0 > 435.0 && line.x0 < 445.0 {
        return false;
    }
    true
}

/// Keep item-number labels and filled-in answer text.
///
/// Answers are in the 8.5–9.1 pt band in any font except the body font;
/// labels are digit/dot glyphs left of x = 50.
pub fn keys_and_input_text(glyph: &Glyph) -> bool {
    if glyph.x0 < 50.0 && KEY_GLYPH.is_match(&glyph.text) {
        return true;
    }
    glyph.size > 8.5 && glyph.size < 9.1 && glyph.fontname != BODY_FONT
}

/// Keep only digit/dot answer glyphs in the answer size band.
pub fn just_text(glyph: &Glyph) -> bool {
    glyph.size > 8.5 && glyph.size < 9.1 && KEY_GLYPH.is_match(&glyph.text)
}

/// Keep the item-number labels on the left edge of the page.
pub fn key_filter(glyph: &Glyph) -> bool {
    glyph.x0 < 50.0 && KEY_GLYPH.is_match(&glyph.text)
}

/// Keep the white-on-white section indices and left-edge item numbers,
/// both only below the page header.
pub fn white_text_and_left_side(glyph: &Glyph) -> bool {
    if glyph.is_white() && glyph.top > 100.0 {
        return true;
    }
    glyph.x0 < 50.0 && glyph.top > 100.0 && KEY_GLYPH.is_match(&glyph.text)
}

/// Content filter for Form 106A/B parts 3–8: white section markers,
/// item-number labels, checkbox glyphs, and answer-band text that is not
/// printed boilerplate.
pub fn ab_content(glyph: &Glyph) -> bool {
    if glyph.is_white() {
        return true;
    }
    if glyph.x0 < 50.0 && KEY_GLYPH.is_match(&glyph.text) {
        return true;
    }
    if glyph.fontname.contains("Wingdings") {
        return true;
    }
    if AB_BOILERPLATE_FONTS.contains(&glyph.fontname.as_str()) {
        return false;
    }
    glyph.size > 8.5 && glyph.size < 9.1
}
