mod common;

use common::fixtures::*;
use common::{TestResult, approx_eq, paginate, paginate_with, words};
use serde_json::json;
use verso::{BoxKind, Flow, LayoutConfig, VersoError};

#[test]
fn test_single_page_document() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let doc = body(vec![paragraph("Hello world"), paragraph("Second paragraph")]);
    let pages = paginate(&doc, &page(200.0, 200.0))?;

    assert_eq!(pages.len(), 1);
    let root = &pages[0].root;
    assert_eq!(root.children().len(), 2);
    assert_eq!(words(root), vec!["Hello", "world", "Second", "paragraph"]);
    Ok(())
}

#[test]
fn test_page_margins_shrink_the_content_area() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    // 80x40 content area: four words per line, two lines per page.
    let doc = body(vec![paragraph("aa bb cc dd ee ff gg hh ii jj")]);
    let layout = json!({ "size": { "width": 100, "height": 60 }, "margins": "10pt" });
    let pages = paginate(&doc, &layout)?;

    assert_eq!(pages.len(), 2);
    assert_eq!(words(&pages[0].root), vec!["aa", "bb", "cc", "dd", "ee", "ff", "gg", "hh"]);
    assert_eq!(words(&pages[1].root), vec!["ii", "jj"]);
    assert_eq!(pages[1].index, 1);
    Ok(())
}

#[test]
fn test_line_breaks_and_edges() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let doc = body(vec![json!({
        "name": "section",
        "style": { "padding": "4pt", "border": 1 },
        "children": ["first", { "name": "br" }, "second"]
    })]);
    let pages = paginate(&doc, &page(200.0, 200.0))?;

    let section = &pages[0].root.children()[0];
    assert_eq!(section.name, "section");
    assert_eq!(section.children().len(), 2);
    assert!(approx_eq(section.content_extent(), 28.8));
    assert!(approx_eq(section.box_extent(), 28.8 + 10.0));
    Ok(())
}

#[test]
fn test_vertical_flow_stacks_lines_horizontally() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let doc = body(vec![paragraph("aa bb cc dd ee ff gg")]);
    let layout = json!({ "size": { "width": 100, "height": 60 }, "flow": "vertical-rl" });
    let pages = paginate(&doc, &layout)?;

    assert_eq!(pages.len(), 1);
    let root = &pages[0].root;
    assert_eq!(root.flow(), Flow::VerticalRl);
    assert!(approx_eq(root.content_size().width, 43.2));
    let p = &root.children()[0];
    assert!(p.children().iter().all(|line| line.kind == BoxKind::Line));
    assert!(approx_eq(p.children()[0].content_size().height, 60.0));
    Ok(())
}

#[test]
fn test_oversized_content_is_dropped_after_retries() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let doc = body(vec![paragraph("too tall")]);
    let config = LayoutConfig::default().with_max_rollback_count(1);
    let pages = paginate_with(&doc, &page(100.0, 10.0), config)?;

    assert!(pages.is_empty());
    Ok(())
}

#[test]
fn test_invalid_json_is_reported() {
    let result = verso::paginate_json("{ not json", &page(100.0, 100.0).to_string(), LayoutConfig::default());
    assert!(matches!(result, Err(VersoError::Json(_))));

    let bad_margins = json!({ "size": "A4", "margins": "ten points" });
    let result = paginate(&body(vec![]), &bad_margins);
    assert!(matches!(result, Err(VersoError::Json(_))));
}

#[test]
fn test_margin_shorthand() -> TestResult {
    let edges = verso::margins("10pt 5pt")?;
    assert_eq!(edges.top, 10.0);
    assert_eq!(edges.left, 5.0);
    assert!(matches!(verso::margins("wide"), Err(VersoError::Style(_))));
    Ok(())
}
