use crate::boxes::LayoutBox;

/// What a single generator step yielded.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutOutcome {
    Produced(LayoutBox),
    /// No parallel branch could place anything; the container should stop here.
    Break,
    /// Nothing was produced this step.
    Empty,
}

impl LayoutOutcome {
    pub fn as_box(&self) -> Option<&LayoutBox> {
        match self {
            LayoutOutcome::Produced(b) => Some(b),
            _ => None,
        }
    }

    pub fn into_box(self) -> Option<LayoutBox> {
        match self {
            LayoutOutcome::Produced(b) => Some(b),
            _ => None,
        }
    }

    /// True when the outcome carries no box or a box with zero content extent.
    pub fn is_blank(&self) -> bool {
        match self {
            LayoutOutcome::Produced(b) => b.content_extent() == 0.0,
            _ => true,
        }
    }
}
