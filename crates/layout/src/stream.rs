//! Resumable token sources feeding the generators.

use crate::node_kind::NodeKind;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;
use verso_style::{ComputedStyle, Markup, Node};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Word(String),
    Space,
    LineBreak,
    Ruby { base: String, annotation: String },
    Element {
        markup: Arc<Markup>,
        index: usize,
        index_of_type: usize,
    },
}

impl Token {
    pub fn is_inline(&self) -> bool {
        !matches!(self, Token::Element { .. })
    }
}

pub trait ContentStream: Debug {
    fn has_next(&self) -> bool;
    fn peek(&self) -> Option<&Token>;
    fn next_token(&mut self) -> Option<Token>;
    /// Current read position, usable with [`seek`](Self::seek).
    fn position(&self) -> usize;
    fn seek(&mut self, position: usize);
}

/// Generic stream over a node list: text is split into words and spaces,
/// elements are passed through as single tokens.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenStream {
    pub fn new(nodes: &[Node]) -> Self {
        let mut tokens = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut index = 0;
        for node in nodes {
            match node {
                // Formatting whitespace between elements collapses to one space.
                Node::Text(text) if text.chars().all(char::is_whitespace) => {
                    if !text.is_empty() && !matches!(tokens.last(), Some(Token::Space)) {
                        tokens.push(Token::Space);
                    }
                }
                Node::Text(text) => push_text(&mut tokens, text),
                Node::Element(m) if NodeKind::from_markup(m) == NodeKind::LineBreak => {
                    tokens.push(Token::LineBreak)
                }
                Node::Element(m) => {
                    let of_type = counts.entry(m.name.as_str()).or_default();
                    tokens.push(Token::Element {
                        markup: Arc::clone(m),
                        index,
                        index_of_type: *of_type,
                    });
                    *of_type += 1;
                    index += 1;
                }
            }
        }
        Self { tokens, pos: 0 }
    }

    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }
}

impl ContentStream for TokenStream {
    fn has_next(&self) -> bool {
        self.pos < self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next_token(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned()?;
        self.pos += 1;
        Some(token)
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn seek(&mut self, position: usize) {
        self.pos = position.min(self.tokens.len());
    }
}

/// Splits text at word boundaries. Segments without any alphanumeric
/// character (punctuation) stick to the word before them.
fn push_text(tokens: &mut Vec<Token>, text: &str) {
    let mut word = String::new();
    let flush = |word: &mut String, tokens: &mut Vec<Token>| {
        if !word.is_empty() {
            tokens.push(Token::Word(std::mem::take(word)));
        }
    };
    for segment in text.split_word_bounds() {
        if segment.contains(['\n', '\r']) {
            flush(&mut word, tokens);
            tokens.push(Token::LineBreak);
        } else if segment.chars().all(char::is_whitespace) {
            flush(&mut word, tokens);
            if !matches!(tokens.last(), Some(Token::Space)) {
                tokens.push(Token::Space);
            }
        } else if segment.chars().any(char::is_alphanumeric) || word.is_empty() {
            flush(&mut word, tokens);
            word.push_str(segment);
        } else {
            word.push_str(segment);
        }
    }
    flush(&mut word, tokens);
}

/// Stream over ruby markup: each `rt` annotates the base text collected
/// since the previous annotation.
#[derive(Debug, Clone, Default)]
pub struct RubyTokenStream {
    tokens: Vec<Token>,
    pos: usize,
}

impl RubyTokenStream {
    pub fn new(markup: &Markup) -> Self {
        let mut tokens = Vec::new();
        let mut base = String::new();
        for node in &markup.children {
            match node {
                Node::Text(t) => base.push_str(t.trim()),
                Node::Element(m) => match m.name.as_str() {
                    "rt" => {
                        let annotation = m.text_content();
                        if !base.is_empty() || !annotation.is_empty() {
                            tokens.push(Token::Ruby {
                                base: std::mem::take(&mut base),
                                annotation,
                            });
                        }
                    }
                    "rp" => {}
                    _ => base.push_str(m.text_content().trim()),
                },
            }
        }
        if !base.is_empty() {
            tokens.push(Token::Word(base));
        }
        Self { tokens, pos: 0 }
    }
}

impl ContentStream for RubyTokenStream {
    fn has_next(&self) -> bool {
        self.pos < self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next_token(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned()?;
        self.pos += 1;
        Some(token)
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn seek(&mut self, position: usize) {
        self.pos = position.min(self.tokens.len());
    }
}

/// Picks the stream implementation for `markup`: ruby markup gets a
/// [`RubyTokenStream`], everything else a [`TokenStream`] over the style's content.
pub fn create_stream(style: &ComputedStyle, markup: &Markup) -> Box<dyn ContentStream> {
    match NodeKind::from_markup(markup) {
        NodeKind::Ruby => Box::new(RubyTokenStream::new(markup)),
        _ => Box::new(TokenStream::new(&style.content(markup))),
    }
}
