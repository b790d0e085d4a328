//! Locating a form inside a multi-form document and producing one
//! canonical page for it.
//!
//! Every page of these filings carries a footer naming the form it belongs
//! to; the trailing window of a page's text identifies it. Forms that span
//! several physical pages are stacked into a single tall page so the rest
//! of the engine never reasons across a page boundary.

use tracing::{debug, info};

use crate::error::{ExtractError, Result};
use crate::layout::{Document, Page};

pub const FORM_106_SUM: &str = "Official Form 106Sum";
pub const FORM_106_AB: &str = "Official Form 106A/B";
pub const FORM_106_D: &str = "Official Form 106D";
pub const FORM_106_EF: &str = "Official Form 106 E/F";

/// How much of a page's trailing text is searched for the footer.
const FOOTER_WINDOW: usize = 300;

/// The last `n` characters of `s`.
fn text_tail(s: &str, n: usize) -> &str {
    match s.char_indices().rev().nth(n.saturating_sub(1)) {
        Some((idx, _)) => &s[idx..],
        None => s,
    }
}

/// Indices of the pages whose footer names `title`.
///
/// Requiring the literal token "page" alongside the title guards against
/// title mentions in unrelated running text (a footer always reads
/// "page N of M").
pub fn find_form_pages(doc: &Document, title: &str) -> Vec<usize> {
    doc.pages
        .iter()
        .enumerate()
        .filter(|(_, page)| {
            let text = page.extract_text();
            let tail = text_tail(&text, FOOTER_WINDOW);
            tail.contains(title) && tail.to_lowercase().contains("page")
        })
        .map(|(idx, _)| idx)
        .collect()
}

/// The pages of Form 106Sum, which is read in place and never merged.
/// Its footer carries no "page N of M" marker, so only the title matches.
pub fn find_summary_pages(doc: &Document) -> Vec<&Page> {
    doc.pages
        .iter()
        .filter(|page| {
            let text = page.extract_text();
            text_tail(&text, FOOTER_WINDOW).contains(FORM_106_SUM)
        })
        .collect()
}

/// Produce the single canonical page of `title`.
///
/// A one-page form is returned as-is. A form spanning several pages is
/// merged by vertically stacking the contiguous run from its first to its
/// last matching page, first page on top, onto a canvas of the combined
/// height. Failure is contained to this form: callers map
/// [`ExtractError::DocumentNotFound`] to their per-form error value.
pub fn isolate_form(doc: &Document, title: &str) -> Result<Page> {
    let matches = find_form_pages(doc, title);
    let (first, last) = match (matches.first(), matches.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => {
            debug!(form = title, "no page footer matched");
            return Err(ExtractError::DocumentNotFound(title.to_string()));
        }
    };

    if first == last {
        info!(form = title, page = first, "extracted single page form");
        return Ok(doc.pages[first].clone());
    }

    let span = &doc.pages[first..=last];
    let height = span[0].height;
    let mut merged = Page {
        page_number: span[0].page_number,
        width: span[0].width,
        height: height * span.len() as f64,
        glyphs: Vec::new(),
        lines: Vec::new(),
    };
    for (offset, page) in span.iter().enumerate() {
        let shifted = page.translated(height * offset as f64);
        merged.glyphs.extend(shifted.glyphs);
        merged.lines.extend(shifted.lines);
    }
    info!(
        form = title,
        pages = span.len(),
        from = first,
        to = last,
        "merged multi page form"
    );
    Ok(merged)
}
