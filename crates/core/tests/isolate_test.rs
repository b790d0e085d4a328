mod common;

use common::{footer, hline, page, word};
use form106_core::isolate::{
    FORM_106_D, FORM_106_EF, FORM_106_SUM, find_form_pages, find_summary_pages, isolate_form,
};
use form106_core::{Document, ExtractError};

#[test]
fn footer_title_and_page_token_locate_a_form() {
    let mut p = page(0, 612.0, 792.0);
    p.glyphs.extend(footer("Official Form 106D page 1 of 1", 50.0, 780.0));
    let doc = Document { pages: vec![p] };

    assert_eq!(find_form_pages(&doc, FORM_106_D), [0]);
    assert!(find_form_pages(&doc, FORM_106_EF).is_empty());
}

#[test]
fn a_title_mention_without_the_page_token_is_not_a_footer() {
    let mut p = page(0, 612.0, 792.0);
    p.glyphs.extend(footer("see Official Form 106D for details", 50.0, 780.0));
    let doc = Document { pages: vec![p] };

    assert!(find_form_pages(&doc, FORM_106_D).is_empty());
    let err = isolate_form(&doc, FORM_106_D).unwrap_err();
    assert!(matches!(err, ExtractError::DocumentNotFound(_)));
}

#[test]
fn only_the_trailing_window_counts() {
    let mut p = page(0, 612.0, 792.0);
    // the title sits at the top of the page, followed by enough running
    // text to push it out of the footer window
    p.glyphs.extend(footer("Official Form 106D page 1 of 1", 50.0, 10.0));
    let filler = "x".repeat(80);
    for i in 0..5 {
        p.glyphs.extend(word(&filler, 50.0, 100.0 + 20.0 * i as f64));
    }
    let doc = Document { pages: vec![p] };

    assert!(find_form_pages(&doc, FORM_106_D).is_empty());
}

#[test]
fn summary_pages_match_on_the_title_alone() {
    let mut p = page(0, 612.0, 792.0);
    p.glyphs.extend(footer("Official Form 106Sum", 50.0, 780.0));
    let doc = Document { pages: vec![p] };

    assert_eq!(find_summary_pages(&doc).len(), 1);
    assert!(find_form_pages(&doc, FORM_106_SUM).is_empty());
}

#[test]
fn a_single_page_form_is_returned_unchanged() {
    let mut p = page(3, 612.0, 792.0);
    p.glyphs.extend(footer("Official Form 106D page 1 of 1", 50.0, 780.0));
    p.lines.push(hline(100.0, 200.0, 100.0));
    let doc = Document {
        pages: vec![page(0, 612.0, 792.0), p.clone()],
    };

    let isolated = isolate_form(&doc, FORM_106_D).unwrap();
    assert_eq!(isolated, p);
}

#[test]
fn a_multi_page_form_is_stacked_into_one_tall_page() {
    let mut first = page(0, 612.0, 792.0);
    first.glyphs.extend(footer("Official Form 106D page 1 of 2", 50.0, 780.0));
    first.lines.push(hline(100.0, 200.0, 100.0));

    let mut second = page(1, 612.0, 792.0);
    second.glyphs.extend(footer("Official Form 106D page 2 of 2", 50.0, 780.0));
    second.glyphs.extend(word("Marker", 100.0, 10.0));
    second.lines.push(hline(100.0, 200.0, 100.0));

    let doc = Document {
        pages: vec![first, second],
    };
    let merged = isolate_form(&doc, FORM_106_D).unwrap();

    assert_eq!(merged.page_number, 0);
    assert_eq!(merged.height, 1584.0);
    assert_eq!(merged.width, 612.0);
    // the second page's content lands one page height lower
    assert!(merged.glyphs.iter().any(|g| g.text == "M" && g.top == 802.0));
    assert!(merged.lines.iter().any(|l| l.top == 892.0));
    assert!(merged.lines.iter().any(|l| l.top == 100.0));
}

#[test]
fn an_empty_document_has_no_forms() {
    let doc = Document { pages: Vec::new() };
    assert!(isolate_form(&doc, FORM_106_D).is_err());
}
