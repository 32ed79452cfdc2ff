use crate::context::LayoutContext;
use std::sync::Arc;
use verso_style::{ComputedStyle, Markup};

/// Read-only view handed to dynamic style callbacks.
pub struct SelectorPropContext<'a> {
    style: &'a ComputedStyle,
    layout_context: Option<&'a LayoutContext>,
}

impl<'a> SelectorPropContext<'a> {
    pub fn new(style: &'a ComputedStyle, layout_context: Option<&'a LayoutContext>) -> Self {
        Self {
            style,
            layout_context,
        }
    }

    pub fn parent_style(&self) -> Option<&Arc<ComputedStyle>> {
        self.style.parent.as_ref()
    }

    pub fn markup(&self) -> &Markup {
        self.style.markup()
    }

    pub fn rest_measure(&self) -> Option<f32> {
        self.layout_context.map(|c| c.inline_rest_measure())
    }

    pub fn rest_extent(&self) -> Option<f32> {
        self.layout_context.map(|c| c.block_rest_extent())
    }

    pub fn child_index(&self) -> usize {
        self.style.child_index
    }

    pub fn child_index_of_type(&self) -> usize {
        self.style.child_index_of_type
    }
}
