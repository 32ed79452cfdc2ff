pub mod fixtures;

use serde_json::Value;
use verso::{LayoutBox, LayoutConfig, Page, VersoError};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Lays out `document` on `page` with the default configuration.
pub fn paginate(document: &Value, page: &Value) -> Result<Vec<Page>, VersoError> {
    paginate_with(document, page, LayoutConfig::default())
}

pub fn paginate_with(
    document: &Value,
    page: &Value,
    config: LayoutConfig,
) -> Result<Vec<Page>, VersoError> {
    verso::paginate_json(&document.to_string(), &page.to_string(), config)
}

/// Every word placed in `b`, in document order, without the spaces between them.
pub fn words(b: &LayoutBox) -> Vec<String> {
    b.texts().into_iter().filter(|t| t != " ").collect()
}

pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.001
}
