//! The producer protocol shared by every layout generator.
//!
//! A generator turns a style plus a content stream into a lazy sequence of
//! boxes, one per [`Generator::yield_box`] call. Output that did not fit is
//! pushed back onto the generator's retry buffer and replayed before anything
//! else; delegated child output comes next, fresh stream tokens last.

use crate::boxes::LayoutBox;
use crate::config::LayoutConfig;
use crate::context::{BlockContext, InlineContext, LayoutContext};
use crate::outcome::LayoutOutcome;
use crate::retry::RetryBuffer;
use crate::selector_context::SelectorPropContext;
use crate::stream::ContentStream;
use crate::LayoutError;
use std::cell::RefCell;
use std::fmt::{self, Debug};
use std::rc::Rc;
use std::sync::Arc;
use verso_style::{ComputedStyle, StyleOptions};

/// Shared handle to a generator. A parent delegates to, but does not own, its child.
pub type GeneratorHandle = Rc<RefCell<dyn Generator>>;

/// Style callback evaluated on every yield with the derived context.
pub type DynamicStyle = Arc<dyn Fn(&SelectorPropContext<'_>) -> Option<StyleOptions>>;

/// Resumable state of a generator, used to undo a step.
#[derive(Debug, Clone)]
pub enum GeneratorSnapshot {
    Layout {
        stream_position: Option<usize>,
        cache: RetryBuffer<LayoutBox>,
        child: Option<(GeneratorHandle, Box<GeneratorSnapshot>)>,
    },
    Parallel {
        branches: Vec<GeneratorSnapshot>,
        retries: usize,
        retry_pending: bool,
    },
}

impl GeneratorSnapshot {
    pub(crate) fn variant_name(&self) -> &'static str {
        match self {
            GeneratorSnapshot::Layout { .. } => "Layout",
            GeneratorSnapshot::Parallel { .. } => "Parallel",
        }
    }
}

pub trait Generator: Debug {
    /// Produces the next box. Without a parent context the generator starts
    /// from its own style; with one, it derives a child context from it.
    fn yield_box(&mut self, parent: Option<&LayoutContext>) -> Result<LayoutOutcome, LayoutError>;

    fn has_next(&self) -> bool;

    /// Forces permanent exhaustion.
    fn set_terminate(&mut self, status: bool);

    fn is_terminated(&self) -> bool;

    fn set_child_layout(&mut self, child: GeneratorHandle);

    /// Replaces the style with a derived clone. A child layout that shared the
    /// old style object is moved to the new one.
    fn clone_style(&mut self, options: &StyleOptions);

    fn style(&self) -> &Arc<ComputedStyle>;

    /// Swaps the style reference without deriving a new one.
    fn replace_style(&mut self, style: Arc<ComputedStyle>);

    fn push_cache(&mut self, element: LayoutBox);

    fn pop_cache(&mut self) -> Option<LayoutBox>;

    fn peek_last_cache(&self) -> Option<&LayoutBox>;

    fn clear_cache(&mut self);

    /// Undoes the most recent step. Does nothing if there is nothing to undo.
    fn rollback(&mut self);

    fn snapshot(&self) -> GeneratorSnapshot;

    fn restore(&mut self, snapshot: GeneratorSnapshot) -> Result<(), LayoutError>;
}

/// State every stream-driven generator carries: style, stream, delegated
/// child, retry buffer and the terminate flag.
#[derive(Debug)]
pub struct GeneratorCore {
    style: Arc<ComputedStyle>,
    stream: Option<Box<dyn ContentStream>>,
    child_layout: Option<GeneratorHandle>,
    cache: RetryBuffer<LayoutBox>,
    terminate: bool,
    config: LayoutConfig,
}

impl GeneratorCore {
    pub fn new(
        style: Arc<ComputedStyle>,
        stream: Option<Box<dyn ContentStream>>,
        config: LayoutConfig,
    ) -> Self {
        Self {
            style,
            stream,
            child_layout: None,
            cache: RetryBuffer::new(config.max_rollback_count),
            terminate: false,
            config,
        }
    }

    pub fn style(&self) -> &Arc<ComputedStyle> {
        &self.style
    }

    pub fn config(&self) -> LayoutConfig {
        self.config
    }

    pub fn stream_mut(&mut self) -> Option<&mut (dyn ContentStream + 'static)> {
        self.stream.as_deref_mut()
    }

    pub fn child_layout(&self) -> Option<&GeneratorHandle> {
        self.child_layout.as_ref()
    }

    pub fn set_child_layout(&mut self, child: GeneratorHandle) {
        self.child_layout = Some(child);
    }

    pub fn is_terminated(&self) -> bool {
        self.terminate
    }

    pub fn set_terminate(&mut self, status: bool) {
        self.terminate = status;
    }

    pub fn has_cache(&self) -> bool {
        !self.cache.is_empty()
    }

    /// True if a delegated child generator still has output.
    pub fn has_child_layout(&self) -> bool {
        self.child_layout
            .as_ref()
            .is_some_and(|child| child.borrow().has_next())
    }

    /// Retry output first, then delegated child output, then the stream.
    pub fn has_next(&self) -> bool {
        if self.terminate {
            return false;
        }
        if self.has_cache() {
            return true;
        }
        if self.has_child_layout() {
            return true;
        }
        self.stream.as_ref().is_some_and(|s| s.has_next())
    }

    pub fn yield_child_layout(&mut self, context: &LayoutContext) -> Result<LayoutOutcome, LayoutError> {
        match &self.child_layout {
            Some(child) => child.borrow_mut().yield_box(Some(context)),
            None => Ok(LayoutOutcome::Empty),
        }
    }

    /// Hands a box that did not fit back to the delegated child.
    pub fn push_child_cache(&mut self, element: LayoutBox) {
        if let Some(child) = &self.child_layout {
            child.borrow_mut().push_cache(element);
        }
    }

    pub fn push_cache(&mut self, element: LayoutBox) {
        if let Err(exhausted) = self.cache.push(element) {
            log::error!(
                "[{}] too many cache count({}), force terminate",
                self.style.markup_name(),
                exhausted.attempts
            );
            self.set_terminate(true);
        }
    }

    pub fn pop_cache(&mut self) -> Option<LayoutBox> {
        self.cache.pop()
    }

    pub fn peek_last_cache(&self) -> Option<&LayoutBox> {
        self.cache.peek_last()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn clone_style(&mut self, options: &StyleOptions) {
        let old_style = Arc::clone(&self.style);
        let new_style = Arc::new(old_style.clone_with(options));
        self.style = Arc::clone(&new_style);

        if let Some(child) = &self.child_layout {
            let shared = Arc::ptr_eq(child.borrow().style(), &old_style);
            if shared {
                child.borrow_mut().replace_style(new_style);
            }
        }
    }

    pub fn replace_style(&mut self, style: Arc<ComputedStyle>) {
        self.style = style;
    }

    pub fn start_context(&self) -> LayoutContext {
        LayoutContext::new(
            self.style.flow,
            BlockContext::new(self.style.content_extent()),
            InlineContext::new(self.style.content_measure()),
        )
    }

    pub fn child_context(&self, parent: &LayoutContext) -> LayoutContext {
        LayoutContext::new(
            self.style.flow,
            BlockContext::new(parent.block_rest_extent() - self.style.edge_extent()),
            InlineContext::new(self.style.content_measure()),
        )
    }

    pub fn snapshot(&self) -> GeneratorSnapshot {
        GeneratorSnapshot::Layout {
            stream_position: self.stream.as_ref().map(|s| s.position()),
            cache: self.cache.clone(),
            child: self
                .child_layout
                .as_ref()
                .map(|c| (Rc::clone(c), Box::new(c.borrow().snapshot()))),
        }
    }

    pub fn restore(&mut self, snapshot: GeneratorSnapshot) -> Result<(), LayoutError> {
        let (stream_position, cache, child) = match snapshot {
            GeneratorSnapshot::Layout {
                stream_position,
                cache,
                child,
            } => (stream_position, cache, child),
            other => return Err(LayoutError::SnapshotMismatch("Layout", other.variant_name())),
        };
        if let (Some(stream), Some(pos)) = (self.stream.as_mut(), stream_position) {
            stream.seek(pos);
        }
        self.cache = cache;
        self.child_layout = match child {
            Some((handle, child_snapshot)) => {
                handle.borrow_mut().restore(*child_snapshot)?;
                Some(handle)
            }
            None => None,
        };
        Ok(())
    }
}

/// A concrete layout algorithm plugged into a [`LayoutGenerator`].
pub trait LayoutStrategy: Debug {
    /// Produces one box for `context`. Retry output has already been replayed
    /// by the generator when this is called.
    fn produce_next(
        &mut self,
        core: &mut GeneratorCore,
        context: LayoutContext,
    ) -> Result<LayoutOutcome, LayoutError>;

    /// Called by container strategies for every child box they place.
    fn on_add_element(&mut self, _core: &GeneratorCore, _element: &LayoutBox) {}

    /// Called each time a box is produced.
    fn on_create(&mut self, _core: &GeneratorCore, _output: &LayoutBox) {}

    /// Called when the final box is produced.
    fn on_complete(&mut self, _core: &GeneratorCore, _output: &LayoutBox) {}
}

pub struct LayoutGenerator<S: LayoutStrategy> {
    core: GeneratorCore,
    strategy: S,
    dynamic_style: Option<DynamicStyle>,
    last_step: Option<GeneratorSnapshot>,
}

impl<S: LayoutStrategy> Debug for LayoutGenerator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutGenerator")
            .field("core", &self.core)
            .field("strategy", &self.strategy)
            .field("dynamic_style", &self.dynamic_style.is_some())
            .finish()
    }
}

impl<S: LayoutStrategy> LayoutGenerator<S> {
    pub fn new(
        style: Arc<ComputedStyle>,
        stream: Option<Box<dyn ContentStream>>,
        strategy: S,
        config: LayoutConfig,
    ) -> Self {
        Self {
            core: GeneratorCore::new(style, stream, config),
            strategy,
            dynamic_style: None,
            last_step: None,
        }
    }

    pub fn with_dynamic_style(mut self, callback: DynamicStyle) -> Self {
        self.dynamic_style = Some(callback);
        self
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn into_handle(self) -> GeneratorHandle
    where
        S: 'static,
    {
        Rc::new(RefCell::new(self))
    }

    fn derive_context(&self, parent: Option<&LayoutContext>) -> LayoutContext {
        match parent {
            Some(p) => self.core.child_context(p),
            None => self.core.start_context(),
        }
    }

    /// Runs the dynamic style callback. Returns true if the style changed.
    fn apply_dynamic_style(&mut self, context: &LayoutContext) -> bool {
        let Some(callback) = self.dynamic_style.clone() else {
            return false;
        };
        let options = callback(&SelectorPropContext::new(&self.core.style, Some(context)));
        match options {
            Some(options) => {
                self.core.clone_style(&options);
                true
            }
            None => false,
        }
    }
}

impl<S: LayoutStrategy> Generator for LayoutGenerator<S> {
    fn yield_box(&mut self, parent: Option<&LayoutContext>) -> Result<LayoutOutcome, LayoutError> {
        if self.core.is_terminated() {
            self.last_step = None;
            return Ok(LayoutOutcome::Empty);
        }
        let mut context = self.derive_context(parent);
        if self.apply_dynamic_style(&context) {
            context = self.derive_context(parent);
        }
        log::trace!(
            "[{}] yield with rest extent {:.2}, measure {:.2}",
            self.core.style.markup_name(),
            context.block_rest_extent(),
            context.inline_rest_measure()
        );

        // Whatever was replayed last time has been accepted by now.
        self.core.cache.settle();
        self.last_step = Some(self.core.snapshot());

        if let Some(cached) = self.core.pop_cache() {
            return Ok(LayoutOutcome::Produced(cached));
        }

        let outcome = self.strategy.produce_next(&mut self.core, context)?;
        if let LayoutOutcome::Produced(output) = &outcome {
            self.strategy.on_create(&self.core, output);
            if !self.core.has_next() {
                self.strategy.on_complete(&self.core, output);
            }
        }
        Ok(outcome)
    }

    fn has_next(&self) -> bool {
        self.core.has_next()
    }

    fn set_terminate(&mut self, status: bool) {
        self.core.set_terminate(status);
    }

    fn is_terminated(&self) -> bool {
        self.core.is_terminated()
    }

    fn set_child_layout(&mut self, child: GeneratorHandle) {
        self.core.set_child_layout(child);
    }

    fn clone_style(&mut self, options: &StyleOptions) {
        self.core.clone_style(options);
    }

    fn style(&self) -> &Arc<ComputedStyle> {
        self.core.style()
    }

    fn replace_style(&mut self, style: Arc<ComputedStyle>) {
        self.core.replace_style(style);
    }

    fn push_cache(&mut self, element: LayoutBox) {
        self.core.push_cache(element);
    }

    fn pop_cache(&mut self) -> Option<LayoutBox> {
        self.core.pop_cache()
    }

    fn peek_last_cache(&self) -> Option<&LayoutBox> {
        self.core.peek_last_cache()
    }

    fn clear_cache(&mut self) {
        self.core.clear_cache();
    }

    fn rollback(&mut self) {
        let Some(snapshot) = self.last_step.take() else {
            return;
        };
        log::debug!("[{}] rollback", self.core.style.markup_name());
        if let Err(e) = self.core.restore(snapshot) {
            log::warn!("[{}] rollback failed: {}", self.core.style.markup_name(), e);
        }
    }

    fn snapshot(&self) -> GeneratorSnapshot {
        self.core.snapshot()
    }

    fn restore(&mut self, snapshot: GeneratorSnapshot) -> Result<(), LayoutError> {
        self.last_step = None;
        self.core.restore(snapshot)
    }
}
