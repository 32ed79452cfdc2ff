//! Writing-direction abstraction.
//!
//! A `Flow` decides which physical axis is the block (stacking) axis and which
//! is the inline axis. Layout code speaks in flow-relative terms, *extent* along
//! the block axis and *measure* along the inline axis, and converts to physical
//! `Size` values only through the helpers below.

use crate::geometry::Size;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Flow {
    /// Lines run left to right, blocks stack top to bottom.
    #[default]
    HorizontalTb,
    /// Lines run top to bottom, blocks stack right to left.
    VerticalRl,
    /// Lines run top to bottom, blocks stack left to right.
    VerticalLr,
}

impl Flow {
    pub fn is_vertical(self) -> bool {
        !matches!(self, Flow::HorizontalTb)
    }

    /// Size along the block axis.
    pub fn extent_of(self, size: Size) -> f32 {
        if self.is_vertical() {
            size.width
        } else {
            size.height
        }
    }

    /// Size along the inline axis.
    pub fn measure_of(self, size: Size) -> f32 {
        if self.is_vertical() {
            size.height
        } else {
            size.width
        }
    }

    pub fn box_size(self, measure: f32, extent: f32) -> Size {
        if self.is_vertical() {
            Size::new(extent, measure)
        } else {
            Size::new(measure, extent)
        }
    }

    pub fn set_extent(self, size: &mut Size, extent: f32) {
        if self.is_vertical() {
            size.width = extent;
        } else {
            size.height = extent;
        }
    }

    pub fn set_measure(self, size: &mut Size, measure: f32) {
        if self.is_vertical() {
            size.height = measure;
        } else {
            size.width = measure;
        }
    }

    /// The flow used to place parallel branches side by side: its block axis is
    /// this flow's inline axis.
    pub fn parallel(self) -> Flow {
        match self {
            Flow::HorizontalTb => Flow::VerticalLr,
            Flow::VerticalRl | Flow::VerticalLr => Flow::HorizontalTb,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_flow_maps_extent_to_height() {
        let size = Flow::HorizontalTb.box_size(100.0, 40.0);
        assert_eq!(size, Size::new(100.0, 40.0));
        assert_eq!(Flow::HorizontalTb.extent_of(size), 40.0);
        assert_eq!(Flow::HorizontalTb.measure_of(size), 100.0);
    }

    #[test]
    fn vertical_flow_maps_extent_to_width() {
        let mut size = Flow::VerticalRl.box_size(100.0, 40.0);
        assert_eq!(size, Size::new(40.0, 100.0));
        Flow::VerticalRl.set_extent(&mut size, 60.0);
        assert_eq!(size.width, 60.0);
        Flow::VerticalRl.set_measure(&mut size, 20.0);
        assert_eq!(size.height, 20.0);
    }

    #[test]
    fn parallel_flow_swaps_axes() {
        let flow = Flow::HorizontalTb;
        let size = Size::new(30.0, 10.0);
        // Branches advance along the parent's inline axis.
        assert_eq!(flow.parallel().extent_of(size), flow.measure_of(size));
        assert_eq!(Flow::VerticalRl.parallel(), Flow::HorizontalTb);
    }
}
