//! Resolved style of one markup node.
//!
//! The cascade here is deliberately small: a child inherits flow, font metrics
//! and list style from its parent, takes its edges from the options carried on
//! its markup, and sizes its content box from the parent's content box.

use crate::dimension::{Dimension, Edges};
use crate::list::ListStyleType;
use crate::markup::{Markup, Node};
use crate::options::StyleOptions;
use crate::page::PageLayout;
use std::sync::Arc;
use unicode_width::UnicodeWidthStr;
use verso_types::Flow;

pub const DEFAULT_FONT_SIZE: f32 = 12.0;
pub const DEFAULT_LINE_HEIGHT: f32 = 14.4;
const LINE_HEIGHT_FACTOR: f32 = 1.2;

#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyle {
    markup: Arc<Markup>,
    pub flow: Flow,
    /// Content measure (inline axis).
    pub measure: f32,
    /// Content extent (block axis).
    pub extent: f32,
    pub margin: Edges,
    pub border: Edges,
    pub padding: Edges,
    pub font_size: f32,
    pub line_height: f32,
    pub list_style_type: ListStyleType,
    pub content: Option<String>,
    pub child_index: usize,
    pub child_index_of_type: usize,
    pub parent: Option<Arc<ComputedStyle>>,
}

impl ComputedStyle {
    /// Style of the document root, sized to the page content area.
    pub fn root(markup: Arc<Markup>, page: &PageLayout) -> Self {
        let options = markup.style.clone();
        let flow = options.flow.unwrap_or(page.flow);
        let area = page.content_size();
        let mut style = Self {
            markup,
            flow,
            measure: flow.measure_of(area),
            extent: flow.extent_of(area),
            margin: Edges::default(),
            border: Edges::default(),
            padding: Edges::default(),
            font_size: DEFAULT_FONT_SIZE,
            line_height: DEFAULT_LINE_HEIGHT,
            list_style_type: ListStyleType::default(),
            content: None,
            child_index: 0,
            child_index_of_type: 0,
            parent: None,
        };
        style.apply_inherited(&options);
        style.fit_content_box(&options, flow.measure_of(area), flow.extent_of(area));
        style
    }

    /// Style of `markup` placed inside `parent`.
    pub fn for_child(
        parent: &Arc<ComputedStyle>,
        markup: Arc<Markup>,
        child_index: usize,
        child_index_of_type: usize,
    ) -> Self {
        let options = markup.style.clone();
        let mut style = Self {
            markup,
            flow: parent.flow,
            measure: parent.measure,
            extent: parent.extent,
            margin: Edges::default(),
            border: Edges::default(),
            padding: Edges::default(),
            font_size: parent.font_size,
            line_height: parent.line_height,
            list_style_type: parent.list_style_type,
            content: None,
            child_index,
            child_index_of_type,
            parent: Some(Arc::clone(parent)),
        };
        style.apply_inherited(&options);
        style.fit_content_box(&options, parent.measure, parent.extent);
        style
    }

    /// Returns a new style with `options` applied on top of this one.
    /// Explicit sizes replace the content box; edges do not shrink it.
    pub fn clone_with(&self, options: &StyleOptions) -> Self {
        let mut style = self.clone();
        style.apply_inherited(options);
        let (base_measure, base_extent) = match &self.parent {
            Some(p) => (p.measure, p.extent),
            None => (self.measure, self.extent),
        };
        if let Some(m) = options.measure.as_ref().and_then(|d| d.resolve(base_measure)) {
            style.measure = m.max(0.0);
        }
        if let Some(e) = options.extent.as_ref().and_then(|d| d.resolve(base_extent)) {
            style.extent = e.max(0.0);
        }
        style
    }

    fn apply_inherited(&mut self, options: &StyleOptions) {
        if let Some(flow) = options.flow {
            self.flow = flow;
        }
        if let Some(m) = options.margin {
            self.margin = m;
        }
        if let Some(b) = options.border {
            self.border = b;
        }
        if let Some(p) = options.padding {
            self.padding = p;
        }
        if let Some(size) = options.font_size {
            self.font_size = size;
            self.line_height = size * LINE_HEIGHT_FACTOR;
        }
        if let Some(lh) = options.line_height {
            self.line_height = lh;
        }
        if let Some(t) = options.list_style_type {
            self.list_style_type = t;
        }
        if let Some(content) = &options.content {
            self.content = Some(content.clone());
        }
    }

    fn fit_content_box(&mut self, options: &StyleOptions, avail_measure: f32, avail_extent: f32) {
        let edge_measure = self.edge_measure();
        let edge_extent = self.edge_extent();
        self.measure = resolve_or(options.measure.as_ref(), avail_measure, avail_measure - edge_measure);
        self.extent = resolve_or(options.extent.as_ref(), avail_extent, avail_extent - edge_extent);
    }

    pub fn markup(&self) -> &Arc<Markup> {
        &self.markup
    }

    pub fn markup_name(&self) -> &str {
        &self.markup.name
    }

    pub fn content_extent(&self) -> f32 {
        self.extent
    }

    pub fn content_measure(&self) -> f32 {
        self.measure
    }

    /// Margin, border and padding combined.
    pub fn edges(&self) -> Edges {
        self.margin + self.border + self.padding
    }

    pub fn edge_extent(&self) -> f32 {
        self.edges().extent(self.flow)
    }

    pub fn edge_measure(&self) -> f32 {
        self.edges().measure(self.flow)
    }

    /// Content nodes to lay out for `markup`, honouring a `content` override.
    pub fn content(&self, markup: &Markup) -> Vec<Node> {
        match &self.content {
            Some(text) => vec![Node::Text(text.clone())],
            None => markup.children.clone(),
        }
    }

    /// Inline advance of `text`: half an em per display column.
    pub fn measure_text(&self, text: &str) -> f32 {
        text.width() as f32 * self.font_size * 0.5
    }
}

fn resolve_or(dim: Option<&Dimension>, base: f32, fallback: f32) -> f32 {
    dim.and_then(|d| d.resolve(base)).unwrap_or(fallback).max(0.0)
}
