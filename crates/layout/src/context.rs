//! Measurement records handed to generators at each step.

use verso_types::{Flow, Size};

/// Consumption along the block axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockContext {
    max_extent: f32,
    cur_extent: f32,
}

impl BlockContext {
    pub fn new(max_extent: f32) -> Self {
        Self {
            max_extent,
            cur_extent: 0.0,
        }
    }

    pub fn max_extent(&self) -> f32 {
        self.max_extent
    }

    pub fn cur_extent(&self) -> f32 {
        self.cur_extent
    }

    pub fn rest_extent(&self) -> f32 {
        self.max_extent - self.cur_extent
    }

    pub fn add_extent(&mut self, extent: f32) {
        self.cur_extent += extent.max(0.0);
    }
}

/// Consumption along the inline axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InlineContext {
    max_measure: f32,
    cur_measure: f32,
}

impl InlineContext {
    pub fn new(max_measure: f32) -> Self {
        Self {
            max_measure,
            cur_measure: 0.0,
        }
    }

    pub fn max_measure(&self) -> f32 {
        self.max_measure
    }

    pub fn cur_measure(&self) -> f32 {
        self.cur_measure
    }

    pub fn rest_measure(&self) -> f32 {
        self.max_measure - self.cur_measure
    }

    pub fn add_measure(&mut self, measure: f32) {
        self.cur_measure += measure.max(0.0);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutContext {
    pub block: BlockContext,
    pub inline: InlineContext,
    flow: Flow,
}

impl LayoutContext {
    pub fn new(flow: Flow, block: BlockContext, inline: InlineContext) -> Self {
        Self {
            block,
            inline,
            flow,
        }
    }

    pub fn flow(&self) -> Flow {
        self.flow
    }

    /// Flow used to place parallel branches inside this context.
    pub fn parallel_flow(&self) -> Flow {
        self.flow.parallel()
    }

    pub fn block_rest_extent(&self) -> f32 {
        self.block.rest_extent()
    }

    pub fn inline_rest_measure(&self) -> f32 {
        self.inline.rest_measure()
    }

    /// Remaining room for content along the block axis.
    pub fn rest_content_extent(&self) -> f32 {
        self.block.rest_extent().max(0.0)
    }

    /// Remaining room as a physical size.
    pub fn rest_size(&self) -> Size {
        self.flow.box_size(
            self.inline.rest_measure().max(0.0),
            self.block.rest_extent().max(0.0),
        )
    }
}
