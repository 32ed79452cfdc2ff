//! The source content tree handed to the layout engine.

use crate::options::StyleOptions;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Markup {
    pub name: String,
    #[serde(default)]
    pub style: StyleOptions,
    #[serde(default)]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Text(String),
    Element(Arc<Markup>),
}

impl Markup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style: StyleOptions) -> Self {
        self.style = style;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn with_child(mut self, child: Markup) -> Self {
        self.children.push(Node::Element(Arc::new(child)));
        self
    }

    pub fn elements(&self) -> impl Iterator<Item = &Arc<Markup>> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(m) => Some(m),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(t) => out.push_str(t),
            Node::Element(m) => collect_text(&m.children, out),
        }
    }
}
