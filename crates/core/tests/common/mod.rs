//! Shared fixture builders: synthetic glyph rows and rule lines laid out
//! the way the form generator positions them.

#![allow(dead_code)]

use form106_core::{Glyph, Page, RuleLine};

pub const ANSWER_SIZE: f64 = 8.8;
pub const ANSWER_FONT: &str = "Helvetica";

pub fn page(page_number: usize, width: f64, height: f64) -> Page {
    Page {
        page_number,
        width,
        height,
        glyphs: Vec::new(),
        lines: Vec::new(),
    }
}

pub fn hline(x0: f64, x1: f64, top: f64) -> RuleLine {
    RuleLine {
        x0,
        x1,
        top,
        bottom: top,
    }
}

/// One row of characters at 5 pt pitch, 8 pt tall. Space characters become
/// gaps so text reassembly re-inserts them.
pub fn styled_word(text: &str, x0: f64, top: f64, size: f64, fontname: &str) -> Vec<Glyph> {
    let mut glyphs = Vec::new();
    let mut x = x0;
    for c in text.chars() {
        if c != ' ' {
            glyphs.push(Glyph {
                text: c.to_string(),
                x0: x,
                x1: x + 5.0,
                top,
                bottom: top + 8.0,
                size,
                fontname: fontname.to_string(),
                stroking_color: None,
                non_stroking_color: None,
            });
        }
        x += 5.0;
    }
    glyphs
}

/// Filled-in answer text: the 8.5-9.1 pt band in a non-body font.
pub fn word(text: &str, x0: f64, top: f64) -> Vec<Glyph> {
    styled_word(text, x0, top, ANSWER_SIZE, ANSWER_FONT)
}

/// Printed boilerplate in the body font; invisible to the answer filters.
pub fn boiler(text: &str, x0: f64, top: f64) -> Vec<Glyph> {
    styled_word(text, x0, top, 9.0, "ArialMT")
}

/// A white-on-white index word.
pub fn white_word(text: &str, x0: f64, top: f64) -> Vec<Glyph> {
    word(text, x0, top)
        .into_iter()
        .map(|mut g| {
            g.non_stroking_color = Some(vec![1.0]);
            g
        })
        .collect()
}

/// A single Wingdings checkbox glyph.
pub fn wingding(text: &str, x0: f64, top: f64) -> Glyph {
    Glyph {
        text: text.to_string(),
        x0,
        x1: x0 + 6.0,
        top,
        bottom: top + 8.0,
        size: 9.5,
        fontname: "Wingdings-Regular".to_string(),
        stroking_color: None,
        non_stroking_color: None,
    }
}

/// Small print at the bottom of a page naming the form.
pub fn footer(text: &str, x0: f64, top: f64) -> Vec<Glyph> {
    styled_word(text, x0, top, 6.0, "ArialMT")
}
