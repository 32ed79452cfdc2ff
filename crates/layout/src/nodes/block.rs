use crate::algorithms::pagination::check_fit;
use crate::boxes::LayoutBox;
use crate::builder::GeneratorFactory;
use crate::context::LayoutContext;
use crate::generator::{GeneratorCore, GeneratorHandle, LayoutStrategy};
use crate::outcome::LayoutOutcome;
use crate::stream::{Token, TokenStream};
use crate::LayoutError;
use std::rc::Rc;
use std::sync::Arc;
use verso_style::ComputedStyle;

/// Stacks child boxes along the block axis until the remaining extent runs out.
///
/// Child elements get their own generator from the factory. Runs of inline
/// tokens between elements are laid out by an anonymous line generator that
/// shares this block's style object.
#[derive(Debug)]
pub struct BlockStrategy {
    factory: Rc<GeneratorFactory>,
}

impl BlockStrategy {
    pub fn new(factory: Rc<GeneratorFactory>) -> Self {
        Self { factory }
    }

    /// Creates the generator for the next piece of content, if any remains.
    fn next_child(
        &self,
        core: &mut GeneratorCore,
        context: &LayoutContext,
    ) -> Result<Option<GeneratorHandle>, LayoutError> {
        loop {
            let Some(stream) = core.stream_mut() else {
                return Ok(None);
            };
            match stream.next_token() {
                None => return Ok(None),
                Some(Token::Element {
                    markup,
                    index,
                    index_of_type,
                }) => {
                    let style = ComputedStyle::for_child(core.style(), markup, index, index_of_type);
                    return self.factory.create(Arc::new(style), context).map(Some);
                }
                Some(first) => {
                    let mut run = vec![first];
                    while stream.peek().is_some_and(Token::is_inline) {
                        run.extend(stream.next_token());
                    }
                    // Inter-element whitespace.
                    if run.iter().all(|t| *t == Token::Space) {
                        continue;
                    }
                    let lines = self
                        .factory
                        .line_generator(Arc::clone(core.style()), Box::new(TokenStream::from_tokens(run)));
                    return Ok(Some(lines));
                }
            }
        }
    }
}

impl LayoutStrategy for BlockStrategy {
    fn produce_next(
        &mut self,
        core: &mut GeneratorCore,
        mut context: LayoutContext,
    ) -> Result<LayoutOutcome, LayoutError> {
        let mut block = LayoutBox::block(core.style(), context.inline.max_measure());
        let flow = context.flow();

        loop {
            if !core.has_child_layout() {
                match self.next_child(core, &context)? {
                    Some(child) => core.set_child_layout(child),
                    None => break,
                }
            }
            match core.yield_child_layout(&context)? {
                LayoutOutcome::Produced(element) => {
                    let extent = element.extent_in(flow);
                    if check_fit(context.block_rest_extent(), extent).should_break {
                        log::debug!(
                            "[{}] <{}> of extent {:.2} does not fit in {:.2}",
                            core.style().markup_name(),
                            element.name,
                            extent,
                            context.block_rest_extent()
                        );
                        core.push_child_cache(element);
                        break;
                    }
                    context.block.add_extent(extent);
                    self.on_add_element(core, &element);
                    block.add_child(element);
                }
                LayoutOutcome::Break => break,
                LayoutOutcome::Empty => {
                    if core.has_child_layout() {
                        break;
                    }
                }
            }
        }

        if block.is_empty() {
            return Ok(LayoutOutcome::Empty);
        }
        let used = block.used();
        block.set_content_extent(flow, used);
        Ok(LayoutOutcome::Produced(block))
    }

    fn on_add_element(&mut self, core: &GeneratorCore, element: &LayoutBox) {
        log::trace!(
            "[{}] placed <{}> of extent {:.2}",
            core.style().markup_name(),
            element.name,
            element.box_extent()
        );
    }

    fn on_complete(&mut self, core: &GeneratorCore, output: &LayoutBox) {
        log::debug!(
            "[{}] complete, last box extent {:.2}",
            core.style().markup_name(),
            output.box_extent()
        );
    }
}
