use crate::dimension::{Edges, PageSize};
use serde::{Deserialize, Serialize};
use verso_types::{Flow, Size};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageLayout {
    #[serde(default)]
    pub size: PageSize,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margins: Option<Edges>,
    #[serde(default)]
    pub flow: Flow,
}

impl PageLayout {
    /// Physical size of the area inside the page margins.
    pub fn content_size(&self) -> Size {
        let (width, height) = self.size.dimensions_pt();
        let margins = self.margins.unwrap_or_default();
        Size::new(width, height).shrink(margins.left + margins.right, margins.top + margins.bottom)
    }
}
