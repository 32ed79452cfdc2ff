use crate::boxes::{BoxKind, LayoutBox};
use crate::context::{BlockContext, InlineContext, LayoutContext};
use crate::generator::{Generator, GeneratorCore, GeneratorHandle, GeneratorSnapshot, LayoutStrategy};
use crate::outcome::LayoutOutcome;
use crate::retry::RetryBuffer;
use crate::stream::Token;
use crate::LayoutError;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;
use verso_style::{ComputedStyle, Markup, Node, PageLayout, PageSize, StyleOptions};
use verso_types::Flow;

pub fn el(name: &str, children: Vec<Node>) -> Markup {
    Markup {
        name: name.to_string(),
        children,
        ..Default::default()
    }
}

pub fn text(s: &str) -> Node {
    Node::Text(s.to_string())
}

pub fn page(width: f32, height: f32) -> PageLayout {
    PageLayout {
        size: PageSize::Custom { width, height },
        margins: None,
        flow: Flow::HorizontalTb,
    }
}

/// Root style for `markup` on a margin-less page of the given size.
pub fn root_style(markup: Markup, width: f32, height: f32) -> Arc<ComputedStyle> {
    Arc::new(ComputedStyle::root(Arc::new(markup), &page(width, height)))
}

pub fn test_style(name: &str, measure: f32, extent: f32) -> Arc<ComputedStyle> {
    root_style(el(name, vec![]), measure, extent)
}

pub fn context_for(measure: f32, extent: f32) -> LayoutContext {
    LayoutContext::new(
        Flow::HorizontalTb,
        BlockContext::new(extent),
        InlineContext::new(measure),
    )
}

/// A block box with the given content extent.
pub fn block_of(name: &str, extent: f32) -> LayoutBox {
    LayoutBox::new(BoxKind::Block, name, Flow::HorizontalTb, Flow::HorizontalTb.box_size(10.0, extent))
}

/// Generator replaying a fixed list of outcomes, counting rollbacks.
#[derive(Debug)]
pub struct ScriptedGenerator {
    style: Arc<ComputedStyle>,
    script: Vec<LayoutOutcome>,
    pos: usize,
    last_pos: Option<usize>,
    cache: RetryBuffer<LayoutBox>,
    terminate: bool,
    child: Option<GeneratorHandle>,
    pub rollbacks: Rc<Cell<usize>>,
    pub contexts: Rc<RefCell<Vec<Option<LayoutContext>>>>,
}

impl ScriptedGenerator {
    pub fn new(name: &str, script: Vec<LayoutOutcome>) -> Self {
        Self {
            style: test_style(name, 100.0, 100.0),
            script,
            pos: 0,
            last_pos: None,
            cache: RetryBuffer::new(5),
            terminate: false,
            child: None,
            rollbacks: Rc::new(Cell::new(0)),
            contexts: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn with_style(mut self, style: Arc<ComputedStyle>) -> Self {
        self.style = style;
        self
    }

    pub fn into_handle(self) -> GeneratorHandle {
        Rc::new(RefCell::new(self))
    }
}

impl Generator for ScriptedGenerator {
    fn yield_box(&mut self, parent: Option<&LayoutContext>) -> Result<LayoutOutcome, LayoutError> {
        self.contexts.borrow_mut().push(parent.copied());
        self.last_pos = Some(self.pos);
        if let Some(cached) = self.cache.pop() {
            return Ok(LayoutOutcome::Produced(cached));
        }
        let outcome = self.script.get(self.pos).cloned().unwrap_or(LayoutOutcome::Empty);
        if self.pos < self.script.len() {
            self.pos += 1;
        }
        Ok(outcome)
    }

    fn has_next(&self) -> bool {
        !self.terminate && (!self.cache.is_empty() || self.pos < self.script.len())
    }

    fn set_terminate(&mut self, status: bool) {
        self.terminate = status;
    }

    fn is_terminated(&self) -> bool {
        self.terminate
    }

    fn set_child_layout(&mut self, child: GeneratorHandle) {
        self.child = Some(child);
    }

    fn clone_style(&mut self, options: &StyleOptions) {
        self.style = Arc::new(self.style.clone_with(options));
    }

    fn style(&self) -> &Arc<ComputedStyle> {
        &self.style
    }

    fn replace_style(&mut self, style: Arc<ComputedStyle>) {
        self.style = style;
    }

    fn push_cache(&mut self, element: LayoutBox) {
        if self.cache.push(element).is_err() {
            self.terminate = true;
        }
    }

    fn pop_cache(&mut self) -> Option<LayoutBox> {
        self.cache.pop()
    }

    fn peek_last_cache(&self) -> Option<&LayoutBox> {
        self.cache.peek_last()
    }

    fn clear_cache(&mut self) {
        self.cache.clear();
    }

    fn rollback(&mut self) {
        self.rollbacks.set(self.rollbacks.get() + 1);
        if let Some(pos) = self.last_pos.take() {
            self.pos = pos;
        }
    }

    fn snapshot(&self) -> GeneratorSnapshot {
        GeneratorSnapshot::Layout {
            stream_position: Some(self.pos),
            cache: self.cache.clone(),
            child: None,
        }
    }

    fn restore(&mut self, snapshot: GeneratorSnapshot) -> Result<(), LayoutError> {
        match snapshot {
            GeneratorSnapshot::Layout {
                stream_position,
                cache,
                ..
            } => {
                self.pos = stream_position.unwrap_or(self.pos);
                self.cache = cache;
                Ok(())
            }
            GeneratorSnapshot::Parallel { .. } => Err(LayoutError::SnapshotMismatch("Layout", "Parallel")),
        }
    }
}

/// Emits one line box per word and records what it was given.
#[derive(Debug, Default)]
pub struct RecordingStrategy {
    pub contexts: Rc<RefCell<Vec<LayoutContext>>>,
    pub created: Rc<Cell<usize>>,
    pub completed: Rc<Cell<usize>>,
}

impl LayoutStrategy for RecordingStrategy {
    fn produce_next(
        &mut self,
        core: &mut GeneratorCore,
        context: LayoutContext,
    ) -> Result<LayoutOutcome, LayoutError> {
        self.contexts.borrow_mut().push(context);
        let style = Arc::clone(core.style());
        let token = loop {
            match core.stream_mut().and_then(|s| s.next_token()) {
                Some(Token::Space) => continue,
                other => break other,
            }
        };
        let Some(token) = token else {
            return Ok(LayoutOutcome::Empty);
        };
        let mut line = LayoutBox::line(&style, context.inline.max_measure(), style.line_height);
        if let Token::Word(word) = token {
            line.kind = BoxKind::Text(word);
        }
        Ok(LayoutOutcome::Produced(line))
    }

    fn on_create(&mut self, _core: &GeneratorCore, _output: &LayoutBox) {
        self.created.set(self.created.get() + 1);
    }

    fn on_complete(&mut self, _core: &GeneratorCore, _output: &LayoutBox) {
        self.completed.set(self.completed.get() + 1);
    }
}
