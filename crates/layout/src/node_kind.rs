use verso_style::Markup;

/// Layout strategy family selected for a markup node.
///
/// Replaces stringly-typed markup names for strategy lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Block,
    Ruby,
    ListItem,
    TableRow,
    LineBreak,
}

impl NodeKind {
    /// Determines the `NodeKind` from the markup's declared name.
    pub fn from_markup(markup: &Markup) -> Self {
        Self::from_name(&markup.name)
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "ruby" => NodeKind::Ruby,
            "li" => NodeKind::ListItem,
            "tr" => NodeKind::TableRow,
            "br" => NodeKind::LineBreak,
            _ => NodeKind::Block,
        }
    }

    /// Returns a string representation, primarily for debugging or error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Block => "Block",
            NodeKind::Ruby => "Ruby",
            NodeKind::ListItem => "ListItem",
            NodeKind::TableRow => "TableRow",
            NodeKind::LineBreak => "LineBreak",
        }
    }
}
