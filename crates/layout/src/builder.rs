use crate::config::LayoutConfig;
use crate::context::LayoutContext;
use crate::generator::{DynamicStyle, GeneratorHandle, LayoutGenerator, LayoutStrategy};
use crate::node_kind::NodeKind;
use crate::nodes::block::BlockStrategy;
use crate::nodes::line::LineStrategy;
use crate::nodes::list_item::ListItemBranches;
use crate::nodes::table_row::TableRowBranches;
use crate::parallel::{BranchBuilder, ParallelGenerator};
use crate::stream::{create_stream, ContentStream};
use crate::LayoutError;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use verso_style::ComputedStyle;

/// Creates the generator for a markup node according to its [`NodeKind`].
///
/// Container strategies hold an `Rc` to the factory so they can create
/// generators for their children lazily, as the stream reaches them.
#[derive(Default)]
pub struct GeneratorFactory {
    config: LayoutConfig,
    dynamic_styles: HashMap<String, DynamicStyle>,
}

impl fmt::Debug for GeneratorFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorFactory")
            .field("config", &self.config)
            .field("dynamic_styles", &self.dynamic_styles.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl GeneratorFactory {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            dynamic_styles: HashMap::new(),
        }
    }

    /// Registers dynamic styles by markup name.
    pub fn with_dynamic_styles(mut self, styles: HashMap<String, DynamicStyle>) -> Self {
        self.dynamic_styles.extend(styles);
        self
    }

    pub fn config(&self) -> LayoutConfig {
        self.config
    }

    /// Creates the generator for `style`'s markup. `context` is the context the
    /// new generator's first yield will be derived from.
    ///
    /// A dynamic style registered for the markup name is attached here, to the
    /// generator that owns the node. Generators derived from it (anonymous
    /// lines, list and table branches) do not run it themselves.
    pub fn create(
        self: &Rc<Self>,
        style: Arc<ComputedStyle>,
        context: &LayoutContext,
    ) -> Result<GeneratorHandle, LayoutError> {
        let kind = NodeKind::from_markup(style.markup());
        log::debug!("creating {} generator for <{}>", kind.as_str(), style.markup_name());
        let dynamic_style = self.dynamic_styles.get(style.markup_name()).cloned();
        match kind {
            NodeKind::Ruby => {
                let stream = create_stream(&style, style.markup());
                let generator = self.generator(style, stream, LineStrategy);
                Ok(with_dynamic_style(generator, dynamic_style).into_handle())
            }
            NodeKind::ListItem => {
                let branches = ListItemBranches::new(Rc::clone(self));
                self.parallel_generator(style, &branches, context, dynamic_style)
            }
            NodeKind::TableRow => {
                let branches = TableRowBranches::new(Rc::clone(self));
                self.parallel_generator(style, &branches, context, dynamic_style)
            }
            NodeKind::Block | NodeKind::LineBreak => {
                let stream = create_stream(&style, style.markup());
                let generator = self.generator(style, stream, BlockStrategy::new(Rc::clone(self)));
                Ok(with_dynamic_style(generator, dynamic_style).into_handle())
            }
        }
    }

    /// A block generator over the content of `style`'s markup.
    pub fn block_generator(self: &Rc<Self>, style: Arc<ComputedStyle>) -> GeneratorHandle {
        let stream = create_stream(&style, style.markup());
        self.generator(style, stream, BlockStrategy::new(Rc::clone(self)))
            .into_handle()
    }

    /// A line generator over `stream`.
    pub fn line_generator(&self, style: Arc<ComputedStyle>, stream: Box<dyn ContentStream>) -> GeneratorHandle {
        self.generator(style, stream, LineStrategy).into_handle()
    }

    fn generator<S: LayoutStrategy>(
        &self,
        style: Arc<ComputedStyle>,
        stream: Box<dyn ContentStream>,
        strategy: S,
    ) -> LayoutGenerator<S> {
        LayoutGenerator::new(style, Some(stream), strategy, self.config)
    }

    fn parallel_generator(
        &self,
        style: Arc<ComputedStyle>,
        branches: &dyn BranchBuilder,
        context: &LayoutContext,
        dynamic_style: Option<DynamicStyle>,
    ) -> Result<GeneratorHandle, LayoutError> {
        let mut generator = ParallelGenerator::build(style, branches, context, self.config)?;
        if let Some(callback) = dynamic_style {
            generator = generator.with_dynamic_style(callback);
        }
        Ok(Rc::new(RefCell::new(generator)))
    }
}

fn with_dynamic_style<S: LayoutStrategy>(
    generator: LayoutGenerator<S>,
    dynamic_style: Option<DynamicStyle>,
) -> LayoutGenerator<S> {
    match dynamic_style {
        Some(callback) => generator.with_dynamic_style(callback),
        None => generator,
    }
}
