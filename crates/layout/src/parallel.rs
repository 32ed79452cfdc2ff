//! Side-by-side composition of branch generators.

use crate::boxes::{BoxKind, LayoutBox};
use crate::config::LayoutConfig;
use crate::context::{BlockContext, InlineContext, LayoutContext};
use crate::generator::{DynamicStyle, Generator, GeneratorHandle, GeneratorSnapshot};
use crate::outcome::LayoutOutcome;
use crate::retry::retry_exhausted;
use crate::selector_context::SelectorPropContext;
use crate::LayoutError;
use std::fmt;
use std::sync::Arc;
use verso_style::{ComputedStyle, StyleOptions};

/// Inline-axis sizes assigned to parallel branches, by branch index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Partition {
    sizes: Vec<f32>,
}

impl Partition {
    pub fn new(sizes: Vec<f32>) -> Self {
        Self { sizes }
    }

    /// Size of branch `index`, or zero if there is no such branch.
    pub fn size(&self, index: usize) -> f32 {
        self.sizes.get(index).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn total(&self) -> f32 {
        self.sizes.iter().sum()
    }
}

/// Builds the branch generators of a parallel container along with their partition.
pub trait BranchBuilder {
    fn build_branches(
        &self,
        style: &Arc<ComputedStyle>,
        context: &LayoutContext,
        config: LayoutConfig,
    ) -> Result<(Vec<GeneratorHandle>, Partition), LayoutError>;
}

/// Runs several generators in lockstep, one per partition slot, and wraps
/// each round of their output in a single box of uniform extent.
///
/// The wrapper keeps no boxes of its own. A push-back rolls every branch back
/// so the whole round is regenerated on the next yield. [`rollback`] only
/// undoes a round that is still being composed; a returned round is settled.
///
/// [`rollback`]: Generator::rollback
pub struct ParallelGenerator {
    style: Arc<ComputedStyle>,
    generators: Vec<GeneratorHandle>,
    partition: Partition,
    child_layout: Option<GeneratorHandle>,
    terminate: bool,
    config: LayoutConfig,
    retries: usize,
    retry_pending: bool,
    round_open: bool,
    dynamic_style: Option<DynamicStyle>,
}

impl fmt::Debug for ParallelGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParallelGenerator")
            .field("style", &self.style.markup_name())
            .field("generators", &self.generators)
            .field("partition", &self.partition)
            .field("terminate", &self.terminate)
            .field("retries", &self.retries)
            .field("dynamic_style", &self.dynamic_style.is_some())
            .finish()
    }
}

impl ParallelGenerator {
    pub fn new(
        style: Arc<ComputedStyle>,
        generators: Vec<GeneratorHandle>,
        partition: Partition,
        config: LayoutConfig,
    ) -> Result<Self, LayoutError> {
        if generators.len() != partition.len() {
            return Err(LayoutError::PartitionMismatch {
                branches: generators.len(),
                partitions: partition.len(),
            });
        }
        Ok(Self {
            style,
            generators,
            partition,
            child_layout: None,
            terminate: false,
            config,
            retries: 0,
            retry_pending: false,
            round_open: false,
            dynamic_style: None,
        })
    }

    pub fn build(
        style: Arc<ComputedStyle>,
        builder: &dyn BranchBuilder,
        context: &LayoutContext,
        config: LayoutConfig,
    ) -> Result<Self, LayoutError> {
        let (generators, partition) = builder.build_branches(&style, context, config)?;
        Self::new(style, generators, partition, config)
    }

    /// Runs `callback` on every round, before the branches are driven.
    pub fn with_dynamic_style(mut self, callback: DynamicStyle) -> Self {
        self.dynamic_style = Some(callback);
        self
    }

    pub fn branches(&self) -> &[GeneratorHandle] {
        &self.generators
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Hook run before the branches are stepped. Branch state is captured by
    /// the branches themselves, so there is nothing to save here.
    fn backup(&mut self) {}

    fn start_context(&self) -> LayoutContext {
        LayoutContext::new(
            self.style.flow,
            BlockContext::new(self.style.content_extent()),
            InlineContext::new(self.style.content_measure()),
        )
    }

    fn branch_context(&self, index: usize, parent: &LayoutContext) -> LayoutContext {
        LayoutContext::new(
            parent.flow(),
            BlockContext::new(parent.rest_content_extent()),
            InlineContext::new(self.partition.size(index)),
        )
    }

    /// The wrapper spans the parent's remaining space and has no edges.
    fn create_wrap_box(&self, parent: &LayoutContext) -> LayoutBox {
        LayoutBox::new(
            BoxKind::Parallel,
            self.style.markup_name(),
            parent.parallel_flow(),
            parent.rest_size(),
        )
    }

    fn rollback_branches(&mut self) {
        for generator in &self.generators {
            generator.borrow_mut().rollback();
        }
    }

    /// Counts a failed round. Terminates once the bound is reached.
    fn record_retry(&mut self) {
        if retry_exhausted(self.retries, self.config.max_rollback_count) {
            log::error!(
                "[{}] too many cache count({}), force terminate",
                self.style.markup_name(),
                self.retries
            );
            self.set_terminate(true);
            return;
        }
        self.retries += 1;
        self.retry_pending = true;
    }

    fn yield_branches(
        &mut self,
        mut wrap: LayoutBox,
        parent: &LayoutContext,
    ) -> Result<LayoutOutcome, LayoutError> {
        let flow = parent.flow();
        let mut outcomes = Vec::with_capacity(self.generators.len());
        for (index, generator) in self.generators.iter().enumerate() {
            let context = self.branch_context(index, parent);
            outcomes.push(generator.borrow_mut().yield_box(Some(&context))?);
        }

        if outcomes.iter().all(LayoutOutcome::is_blank) {
            log::warn!(
                "[{}] no branch could place anything, break",
                self.style.markup_name()
            );
            self.rollback();
            self.record_retry();
            return Ok(LayoutOutcome::Break);
        }

        // First branch with the largest content extent wins.
        let mut tallest: Option<&LayoutBox> = None;
        for candidate in outcomes.iter().filter_map(LayoutOutcome::as_box) {
            if tallest.is_none_or(|t| candidate.content_extent() > t.content_extent()) {
                tallest = Some(candidate);
            }
        }
        let (max_content_extent, max_box_extent) = tallest
            .map(|t| (t.content_extent(), t.box_extent()))
            .unwrap_or((0.0, 0.0));

        wrap.set_content_extent(flow, max_box_extent);
        for outcome in outcomes {
            if let LayoutOutcome::Produced(mut child) = outcome {
                child.set_content_extent(flow, max_content_extent);
                wrap.add_child(child);
            }
        }
        Ok(LayoutOutcome::Produced(wrap))
    }
}

impl Generator for ParallelGenerator {
    fn yield_box(&mut self, parent: Option<&LayoutContext>) -> Result<LayoutOutcome, LayoutError> {
        if self.terminate {
            return Ok(LayoutOutcome::Empty);
        }
        if !self.retry_pending {
            self.retries = 0;
        }
        self.retry_pending = false;

        let parent = match parent {
            Some(p) => *p,
            None => self.start_context(),
        };
        if let Some(callback) = self.dynamic_style.clone() {
            let options = callback(&SelectorPropContext::new(&self.style, Some(&parent)));
            if let Some(options) = options {
                self.clone_style(&options);
            }
        }
        self.backup();
        let wrap = self.create_wrap_box(&parent);
        self.round_open = true;
        let outcome = self.yield_branches(wrap, &parent);
        self.round_open = false;
        outcome
    }

    fn has_next(&self) -> bool {
        if self.terminate {
            return false;
        }
        self.generators.iter().any(|g| g.borrow().has_next())
    }

    fn set_terminate(&mut self, status: bool) {
        self.terminate = status;
    }

    fn is_terminated(&self) -> bool {
        self.terminate
    }

    fn set_child_layout(&mut self, child: GeneratorHandle) {
        self.child_layout = Some(child);
    }

    fn clone_style(&mut self, options: &StyleOptions) {
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

    fn style(&self) -> &Arc<ComputedStyle> {
        &self.style
    }

    fn replace_style(&mut self, style: Arc<ComputedStyle>) {
        self.style = style;
    }

    /// The rejected round is regenerated from the branches on the next yield.
    fn push_cache(&mut self, element: LayoutBox) {
        log::debug!(
            "[{}] round of extent {:.2} rejected, rolling back",
            self.style.markup_name(),
            element.box_extent()
        );
        self.rollback_branches();
        self.record_retry();
    }

    fn pop_cache(&mut self) -> Option<LayoutBox> {
        None
    }

    fn peek_last_cache(&self) -> Option<&LayoutBox> {
        None
    }

    fn clear_cache(&mut self) {
        self.retries = 0;
        self.retry_pending = false;
    }

    /// Rolls every branch back while a round is being composed. Outside a
    /// round there is nothing to undo.
    fn rollback(&mut self) {
        if !self.round_open {
            log::trace!("[{}] rollback outside a round ignored", self.style.markup_name());
            return;
        }
        self.rollback_branches();
    }

    fn snapshot(&self) -> GeneratorSnapshot {
        GeneratorSnapshot::Parallel {
            branches: self.generators.iter().map(|g| g.borrow().snapshot()).collect(),
            retries: self.retries,
            retry_pending: self.retry_pending,
        }
    }

    fn restore(&mut self, snapshot: GeneratorSnapshot) -> Result<(), LayoutError> {
        match snapshot {
            GeneratorSnapshot::Parallel {
                branches,
                retries,
                retry_pending,
            } => {
                for (generator, branch) in self.generators.iter().zip(branches) {
                    generator.borrow_mut().restore(branch)?;
                }
                self.retries = retries;
                self.retry_pending = retry_pending;
                Ok(())
            }
            other => Err(LayoutError::SnapshotMismatch("Parallel", other.variant_name())),
        }
    }
}
