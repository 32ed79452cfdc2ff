pub mod computed;
pub mod dimension;
pub mod list;
pub mod markup;
pub mod options;
pub mod page;
pub mod parsers;

pub use computed::ComputedStyle;
pub use dimension::{Dimension, Edges, PageSize};
pub use list::ListStyleType;
pub use markup::{Markup, Node};
pub use options::StyleOptions;
pub use page::PageLayout;
pub use parsers::StyleParseError;
