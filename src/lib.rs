//! Paginated box layout.
//!
//! A document is a tree of [`Markup`] nodes. [`LayoutEngine`] turns it into a
//! lazy sequence of pages, each a tree of [`LayoutBox`]es, by driving one
//! resumable generator per node. Content that does not fit a page is pushed
//! back and replayed on the next one.

pub mod error;

pub use error::VersoError;
pub use verso_layout::{
    BoxKind, DynamicStyle, Generator, GeneratorHandle, LayoutBox, LayoutConfig, LayoutContext,
    LayoutEngine, LayoutError, LayoutOutcome, Page, Paginator, SelectorPropContext,
};
pub use verso_style::{
    ComputedStyle, Dimension, Edges, ListStyleType, Markup, Node, PageLayout, PageSize,
    StyleOptions, parsers::parse_edges, parsers::parse_length,
};
pub use verso_types::{Flow, Size};

use std::sync::Arc;

/// Lays out a JSON document onto pages described by a JSON page layout.
pub fn paginate_json(
    document: &str,
    page: &str,
    config: LayoutConfig,
) -> Result<Vec<Page>, VersoError> {
    let document: Markup = serde_json::from_str(document)?;
    let page: PageLayout = serde_json::from_str(page)?;
    log::info!(
        "laying out <{}> on a {:?} page",
        document.name,
        page.size
    );
    let pages = LayoutEngine::new(config).layout(Arc::new(document), &page)?;
    log::info!("laid out {} page(s)", pages.len());
    Ok(pages)
}

/// Parses a CSS-style edge shorthand such as `"10pt 5pt"` into page margins.
pub fn margins(shorthand: &str) -> Result<Edges, VersoError> {
    Ok(parse_edges(shorthand)?)
}
