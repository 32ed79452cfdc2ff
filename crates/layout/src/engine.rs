use crate::algorithms::pagination::{Page, Paginator};
use crate::builder::GeneratorFactory;
use crate::config::LayoutConfig;
use crate::context::{BlockContext, InlineContext, LayoutContext};
use crate::generator::DynamicStyle;
use crate::LayoutError;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use verso_style::{ComputedStyle, Markup, PageLayout};

/// Entry point: lays a markup document out onto pages.
#[derive(Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
    dynamic_styles: HashMap<String, DynamicStyle>,
}

impl fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutEngine")
            .field("config", &self.config)
            .field("dynamic_styles", &self.dynamic_styles.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            dynamic_styles: HashMap::new(),
        }
    }

    pub fn config(&self) -> LayoutConfig {
        self.config
    }

    /// Registers a style callback re-evaluated each time a generator for
    /// `markup_name` yields.
    pub fn with_dynamic_style(mut self, markup_name: impl Into<String>, callback: DynamicStyle) -> Self {
        self.dynamic_styles.insert(markup_name.into(), callback);
        self
    }

    /// Returns a lazy iterator over the pages of `document`.
    pub fn paginate(&self, document: Arc<Markup>, page: &PageLayout) -> Result<Paginator, LayoutError> {
        let factory = Rc::new(
            GeneratorFactory::new(self.config).with_dynamic_styles(self.dynamic_styles.clone()),
        );
        let style = Arc::new(ComputedStyle::root(document, page));
        log::debug!(
            "paginating <{}> into {:.2}x{:.2} content area",
            style.markup_name(),
            style.content_measure(),
            style.content_extent()
        );
        let context = LayoutContext::new(
            style.flow,
            BlockContext::new(style.content_extent()),
            InlineContext::new(style.content_measure()),
        );
        let root = factory.create(style, &context)?;
        Ok(Paginator::new(root))
    }

    /// Lays out every page of `document`.
    pub fn layout(&self, document: Arc<Markup>, page: &PageLayout) -> Result<Vec<Page>, LayoutError> {
        self.paginate(document, page)?.collect()
    }
}
