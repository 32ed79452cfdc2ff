pub mod flow;
pub mod geometry;

pub use flow::Flow;
pub use geometry::Size;
