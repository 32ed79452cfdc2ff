//! Layout output boxes.

use verso_style::{ComputedStyle, Edges};
use verso_types::{Flow, Size};

#[derive(Debug, Clone, PartialEq)]
pub enum BoxKind {
    Block,
    Line,
    Text(String),
    Ruby { base: String, annotation: String },
    /// Wrapper holding side-by-side branch boxes.
    Parallel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBox {
    pub kind: BoxKind,
    /// Name of the markup that produced this box.
    pub name: String,
    flow: Flow,
    content_size: Size,
    edges: Edges,
    /// Position along the parent's progression axis, relative to the parent's content origin.
    pub offset: f32,
    children: Vec<LayoutBox>,
    cursor: f32,
}

impl LayoutBox {
    pub fn new(kind: BoxKind, name: impl Into<String>, flow: Flow, content_size: Size) -> Self {
        Self {
            kind,
            name: name.into(),
            flow,
            content_size,
            edges: Edges::default(),
            offset: 0.0,
            children: Vec::new(),
            cursor: 0.0,
        }
    }

    /// An empty block box carrying the edges of `style`.
    pub fn block(style: &ComputedStyle, measure: f32) -> Self {
        let mut b = Self::new(
            BoxKind::Block,
            style.markup_name(),
            style.flow,
            style.flow.box_size(measure, 0.0),
        );
        b.edges = style.edges();
        b
    }

    pub fn line(style: &ComputedStyle, measure: f32, extent: f32) -> Self {
        Self::new(
            BoxKind::Line,
            style.markup_name(),
            style.flow,
            style.flow.box_size(measure, extent),
        )
    }

    pub fn flow(&self) -> Flow {
        self.flow
    }

    pub fn edges(&self) -> Edges {
        self.edges
    }

    pub fn set_edges(&mut self, edges: Edges) {
        self.edges = edges;
    }

    pub fn content_size(&self) -> Size {
        self.content_size
    }

    pub fn children(&self) -> &[LayoutBox] {
        &self.children
    }

    pub fn content_extent(&self) -> f32 {
        self.flow.extent_of(self.content_size)
    }

    pub fn content_measure(&self) -> f32 {
        self.flow.measure_of(self.content_size)
    }

    /// Physical size including edges.
    pub fn box_size(&self) -> Size {
        Size::new(
            self.content_size.width + self.edges.left + self.edges.right,
            self.content_size.height + self.edges.top + self.edges.bottom,
        )
    }

    /// Content extent plus the edges along this box's own block axis.
    pub fn box_extent(&self) -> f32 {
        self.content_extent() + self.edges.extent(self.flow)
    }

    /// Size including edges along the block axis of `flow`.
    pub fn extent_in(&self, flow: Flow) -> f32 {
        flow.extent_of(self.box_size())
    }

    pub fn set_content_extent(&mut self, flow: Flow, extent: f32) {
        flow.set_extent(&mut self.content_size, extent);
    }

    /// Appends a child along this box's block axis.
    pub fn add_child(&mut self, mut child: LayoutBox) {
        child.offset = self.cursor;
        self.cursor += child.extent_in(self.flow);
        self.children.push(child);
    }

    /// Appends a child along this box's inline axis.
    pub fn add_inline_child(&mut self, mut child: LayoutBox) {
        child.offset = self.cursor;
        self.cursor += self.flow.measure_of(child.box_size());
        self.children.push(child);
    }

    /// Space consumed by children so far along the progression axis.
    pub fn used(&self) -> f32 {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// All text carried by this box and its descendants, in document order.
    pub fn texts(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_texts(&mut out);
        out
    }

    fn collect_texts(&self, out: &mut Vec<String>) {
        match &self.kind {
            BoxKind::Text(t) => out.push(t.clone()),
            BoxKind::Ruby { base, .. } => out.push(base.clone()),
            _ => {}
        }
        for child in &self.children {
            child.collect_texts(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_extent_adds_block_axis_edges() {
        let mut b = LayoutBox::new(BoxKind::Block, "div", Flow::HorizontalTb, Size::new(100.0, 40.0));
        b.set_edges(Edges {
            top: 2.0,
            right: 1.0,
            bottom: 3.0,
            left: 1.0,
        });
        assert_eq!(b.box_extent(), 45.0);
        assert_eq!(b.box_size(), Size::new(102.0, 45.0));
        assert_eq!(b.extent_in(Flow::VerticalLr), 102.0);
    }

    #[test]
    fn children_are_offset_along_progression_axis() {
        let mut parent = LayoutBox::new(BoxKind::Block, "div", Flow::HorizontalTb, Size::default());
        for h in [10.0, 15.0] {
            parent.add_child(LayoutBox::new(BoxKind::Line, "div", Flow::HorizontalTb, Size::new(50.0, h)));
        }
        let offsets: Vec<f32> = parent.children().iter().map(|c| c.offset).collect();
        assert_eq!(offsets, vec![0.0, 10.0]);
        assert_eq!(parent.used(), 25.0);
    }

    #[test]
    fn inline_children_advance_by_measure() {
        let mut line = LayoutBox::new(BoxKind::Line, "p", Flow::HorizontalTb, Size::new(100.0, 14.0));
        line.add_inline_child(LayoutBox::new(BoxKind::Text("a".into()), "p", Flow::HorizontalTb, Size::new(6.0, 14.0)));
        line.add_inline_child(LayoutBox::new(BoxKind::Text("b".into()), "p", Flow::HorizontalTb, Size::new(6.0, 14.0)));
        assert_eq!(line.children()[1].offset, 6.0);
        assert_eq!(line.texts(), vec!["a".to_string(), "b".to_string()]);
    }
}
