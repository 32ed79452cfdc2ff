use crate::dimension::{Dimension, Edges};
use crate::list::ListStyleType;
use serde::{Deserialize, Serialize};
use verso_types::Flow;

/// A partial set of style values. Carried inline on markup and used to derive
/// new styles through `ComputedStyle::clone_with`.
#[derive(Deserialize, Serialize, Default, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StyleOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow: Option<Flow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measure: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extent: Option<Dimension>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Edges>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<Edges>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Edges>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_style_type: Option<ListStyleType>,
    /// Replaces the markup's own children as the content to lay out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl StyleOptions {
    /// Options that only override the measure.
    pub fn with_measure(measure: f32) -> Self {
        Self {
            measure: Some(Dimension::Pt(measure)),
            ..Default::default()
        }
    }
}
