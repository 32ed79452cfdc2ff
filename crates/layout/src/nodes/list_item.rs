use crate::builder::GeneratorFactory;
use crate::config::LayoutConfig;
use crate::context::LayoutContext;
use crate::generator::GeneratorHandle;
use crate::nodes::list_utils::get_marker_text;
use crate::parallel::{BranchBuilder, Partition};
use crate::LayoutError;
use std::rc::Rc;
use std::sync::Arc;
use verso_style::{ComputedStyle, Dimension, Edges, StyleOptions};
use verso_types::Flow;

/// Gap between the marker and the item body, in ems.
const MARKER_SPACING_FACTOR: f32 = 0.4;

/// Splits a list item into a marker branch and a body branch.
#[derive(Debug)]
pub struct ListItemBranches {
    factory: Rc<GeneratorFactory>,
}

impl ListItemBranches {
    pub fn new(factory: Rc<GeneratorFactory>) -> Self {
        Self { factory }
    }
}

/// Nesting depth of a list item: zero inside a top-level list.
pub fn list_depth(style: &ComputedStyle) -> usize {
    let mut depth: usize = 0;
    let mut current = style.parent.as_ref();
    while let Some(ancestor) = current {
        if matches!(ancestor.markup_name(), "ul" | "ol") {
            depth += 1;
        }
        current = ancestor.parent.as_ref();
    }
    depth.saturating_sub(1)
}

/// Options carrying the item's edges with one inline side dropped, so that
/// marker and body together span the item's box.
fn branch_edges(style: &ComputedStyle, strip: fn(Edges, Flow) -> Edges) -> StyleOptions {
    StyleOptions {
        margin: Some(strip(style.margin, style.flow)),
        border: Some(strip(style.border, style.flow)),
        padding: Some(strip(style.padding, style.flow)),
        ..Default::default()
    }
}

impl BranchBuilder for ListItemBranches {
    fn build_branches(
        &self,
        style: &Arc<ComputedStyle>,
        _context: &LayoutContext,
        _config: LayoutConfig,
    ) -> Result<(Vec<GeneratorHandle>, Partition), LayoutError> {
        let marker = get_marker_text(
            style.list_style_type,
            style.child_index_of_type + 1,
            list_depth(style),
        );
        let total = style.content_measure();
        let marker_measure = if marker.is_empty() {
            0.0
        } else {
            (style.measure_text(&marker) + style.font_size * MARKER_SPACING_FACTOR).min(total)
        };
        let body_measure = total - marker_measure;

        // Both branches keep the item's block-axis edges; the marker takes the
        // start side and the body the end side.
        let marker_style = Arc::new(style.clone_with(&StyleOptions {
            measure: Some(Dimension::Pt(marker_measure)),
            content: Some(marker),
            ..branch_edges(style, Edges::without_end)
        }));
        let marker_branch = self.factory.block_generator(marker_style);

        let body_style = Arc::new(style.clone_with(&StyleOptions {
            measure: Some(Dimension::Pt(body_measure)),
            ..branch_edges(style, Edges::without_start)
        }));
        let body_branch = self.factory.block_generator(body_style);

        Ok((
            vec![marker_branch, body_branch],
            Partition::new(vec![marker_measure, body_measure]),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boxes::BoxKind;
    use crate::test_utils::{context_for, el, text};
    use verso_style::{ListStyleType, Markup, PageLayout, PageSize};

    fn item_style(list: &str, list_style: ListStyleType, index: usize) -> Arc<ComputedStyle> {
        item_style_with(list, list_style, index, el("li", vec![text("item")]))
    }

    fn item_style_with(
        list: &str,
        list_style: ListStyleType,
        index: usize,
        item: Markup,
    ) -> Arc<ComputedStyle> {
        let page = PageLayout {
            size: PageSize::Custom {
                width: 200.0,
                height: 400.0,
            },
            margins: None,
            ..Default::default()
        };
        let mut list_markup = el(list, vec![]);
        list_markup.style.list_style_type = Some(list_style);
        let root = Arc::new(ComputedStyle::root(Arc::new(el("body", vec![])), &page));
        let list = Arc::new(ComputedStyle::for_child(&root, Arc::new(list_markup), 0, 0));
        Arc::new(ComputedStyle::for_child(&list, Arc::new(item), index, index))
    }

    #[test]
    fn marker_and_body_share_the_item_measure() {
        let factory = Rc::new(GeneratorFactory::default());
        let style = item_style("ol", ListStyleType::Decimal, 1);
        let (branches, partition) = ListItemBranches::new(factory)
            .build_branches(&style, &context_for(200.0, 400.0), LayoutConfig::default())
            .unwrap();
        assert_eq!(branches.len(), 2);
        // "2." is two columns at 6pt, plus 0.4em of spacing.
        assert!((partition.size(0) - (12.0 + 4.8)).abs() < 0.001);
        assert!((partition.total() - 200.0).abs() < 0.001);
        assert_eq!(branches[0].borrow().style().content.as_deref(), Some("2."));
    }

    #[test]
    fn depth_counts_enclosing_lists() {
        let style = item_style("ul", ListStyleType::Disc, 0);
        assert_eq!(list_depth(&style), 0);
    }

    #[test]
    fn no_marker_for_list_style_none() {
        let factory = Rc::new(GeneratorFactory::default());
        let style = item_style("ul", ListStyleType::None, 0);
        let (_, partition) = ListItemBranches::new(factory)
            .build_branches(&style, &context_for(200.0, 400.0), LayoutConfig::default())
            .unwrap();
        assert_eq!(partition.size(0), 0.0);
        assert_eq!(partition.size(1), 200.0);
    }

    #[test]
    fn item_edges_are_carried_by_the_branches() {
        let factory = Rc::new(GeneratorFactory::default());
        let mut item = el("li", vec![text("x")]);
        item.style.padding = Some(Edges::all(10.0));
        let style = item_style_with("ul", ListStyleType::Disc, 0, item);
        let context = context_for(200.0, 400.0);
        let handle = factory.create(Arc::clone(&style), &context).unwrap();

        let wrap = handle
            .borrow_mut()
            .yield_box(Some(&context))
            .unwrap()
            .into_box()
            .unwrap();

        assert_eq!(wrap.kind, BoxKind::Parallel);
        let line_height = style.line_height;
        assert!((wrap.extent_in(Flow::HorizontalTb) - (line_height + 20.0)).abs() < 0.001);
        let [marker, body] = wrap.children() else {
            panic!("expected marker and body");
        };
        assert_eq!((marker.edges().left, marker.edges().right), (10.0, 0.0));
        assert_eq!((body.edges().left, body.edges().right), (0.0, 10.0));
        assert_eq!(marker.edges().extent(Flow::HorizontalTb), 20.0);
        assert!((body.box_extent() - (line_height + 20.0)).abs() < 0.001);
    }
}
