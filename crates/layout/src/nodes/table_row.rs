use crate::builder::GeneratorFactory;
use crate::config::LayoutConfig;
use crate::context::LayoutContext;
use crate::generator::GeneratorHandle;
use crate::nodes::partition_solver::{BranchMeasureInfo, PartitionSolver};
use crate::parallel::{BranchBuilder, Partition};
use crate::LayoutError;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;
use verso_style::{ComputedStyle, Dimension, Markup, Node, StyleOptions};

/// Lays the cells of a table row side by side, one branch per cell.
#[derive(Debug)]
pub struct TableRowBranches {
    factory: Rc<GeneratorFactory>,
}

impl TableRowBranches {
    pub fn new(factory: Rc<GeneratorFactory>) -> Self {
        Self { factory }
    }
}

struct CellInfo {
    style: ComputedStyle,
    preferred: f32,
}

impl BranchMeasureInfo for &CellInfo {
    fn declared_measure(&self) -> Option<Dimension> {
        self.style.markup().style.measure
    }

    fn preferred_measure(&self) -> f32 {
        self.preferred + self.style.edge_measure()
    }
}

fn is_cell(markup: &Markup) -> bool {
    matches!(markup.name.as_str(), "td" | "th")
}

impl BranchBuilder for TableRowBranches {
    fn build_branches(
        &self,
        style: &Arc<ComputedStyle>,
        _context: &LayoutContext,
        _config: LayoutConfig,
    ) -> Result<(Vec<GeneratorHandle>, Partition), LayoutError> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut cells = Vec::new();
        let content = style.content(style.markup());
        for node in &content {
            let Node::Element(markup) = node else {
                continue;
            };
            if !is_cell(markup) {
                log::warn!("[{}] skipping non-cell child <{}>", style.markup_name(), markup.name);
                continue;
            }
            let of_type = counts.entry(markup.name.as_str()).or_default();
            let cell_style = ComputedStyle::for_child(style, Arc::clone(markup), cells.len(), *of_type);
            *of_type += 1;
            let preferred = cell_style.measure_text(&markup.text_content());
            cells.push(CellInfo {
                style: cell_style,
                preferred,
            });
        }

        let sizes = PartitionSolver::new(style.content_measure()).resolve(cells.iter());
        let branches: Vec<GeneratorHandle> = cells
            .into_iter()
            .zip(&sizes)
            .map(|(cell, &size)| {
                let measure = (size - cell.style.edge_measure()).max(0.0);
                let cell_style = cell.style.clone_with(&StyleOptions::with_measure(measure));
                self.factory.block_generator(Arc::new(cell_style))
            })
            .collect();
        Ok((branches, Partition::new(sizes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{context_for, el, root_style, text};

    #[test]
    fn one_branch_per_cell() {
        let factory = Rc::new(GeneratorFactory::default());
        let mut fixed = el("td", vec![text("a")]);
        fixed.style.measure = Some(Dimension::Pt(40.0));
        let row = el(
            "tr",
            vec![
                Node::Element(Arc::new(fixed)),
                text(" "),
                Node::Element(Arc::new(el("td", vec![text("bb")]))),
                Node::Element(Arc::new(el("th", vec![text("bbbb")]))),
            ],
        );
        let table = root_style(el("table", vec![]), 160.0, 400.0);
        let style = Arc::new(ComputedStyle::for_child(&table, Arc::new(row), 0, 0));
        let (branches, partition) = TableRowBranches::new(factory)
            .build_branches(&style, &context_for(160.0, 400.0), LayoutConfig::default())
            .unwrap();
        assert_eq!(branches.len(), 3);
        assert_eq!(partition.size(0), 40.0);
        // 120pt left, shared 12:24 between the auto cells.
        assert!((partition.size(1) - 40.0).abs() < 0.001);
        assert!((partition.size(2) - 80.0).abs() < 0.001);
        assert!((branches[2].borrow().style().content_measure() - 80.0).abs() < 0.001);
    }
}
