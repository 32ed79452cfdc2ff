use crate::boxes::{BoxKind, LayoutBox};
use crate::context::{InlineContext, LayoutContext};
use crate::generator::{GeneratorCore, LayoutStrategy};
use crate::outcome::LayoutOutcome;
use crate::stream::Token;
use crate::LayoutError;
use verso_style::ComputedStyle;

const EPSILON: f32 = 0.01;

/// Annotation glyphs are set at half the base font size.
pub const RUBY_FONT_SCALE: f32 = 0.5;

/// Fills one line per step from inline tokens.
///
/// Words are never split: a word that does not fit ends the line, unless the
/// line is still empty, in which case it is placed anyway and overflows.
#[derive(Debug, Default, Clone, Copy)]
pub struct LineStrategy;

/// Accumulates the items of a single line.
struct LineBuilder<'a> {
    style: &'a ComputedStyle,
    line: LayoutBox,
    inline: InlineContext,
    extent: f32,
    pending_space: f32,
}

impl<'a> LineBuilder<'a> {
    fn new(style: &'a ComputedStyle, context: &LayoutContext) -> Self {
        let measure = context.inline.max_measure();
        Self {
            style,
            line: LayoutBox::line(style, measure, style.line_height),
            inline: context.inline,
            extent: style.line_height,
            pending_space: 0.0,
        }
    }

    fn is_empty(&self) -> bool {
        self.line.is_empty()
    }

    /// Leading spaces are dropped; others wait until the next item is placed.
    fn space(&mut self) {
        if !self.is_empty() {
            self.pending_space = self.style.measure_text(" ");
        }
    }

    fn fits(&self, advance: f32) -> bool {
        self.is_empty() || advance + self.pending_space <= self.inline.rest_measure() + EPSILON
    }

    fn place(&mut self, kind: BoxKind, advance: f32, extent: f32) {
        let flow = self.style.flow;
        if self.pending_space > 0.0 {
            let space = std::mem::take(&mut self.pending_space);
            self.inline.add_measure(space);
            self.line.add_inline_child(LayoutBox::new(
                BoxKind::Text(" ".to_string()),
                self.style.markup_name(),
                flow,
                flow.box_size(space, self.style.line_height),
            ));
        }
        self.inline.add_measure(advance);
        self.extent = self.extent.max(extent);
        self.line.add_inline_child(LayoutBox::new(
            kind,
            self.style.markup_name(),
            flow,
            flow.box_size(advance, extent),
        ));
    }

    fn finish(mut self) -> LayoutBox {
        let flow = self.style.flow;
        self.line.set_content_extent(flow, self.extent);
        self.line
    }
}

impl LayoutStrategy for LineStrategy {
    fn produce_next(
        &mut self,
        core: &mut GeneratorCore,
        context: LayoutContext,
    ) -> Result<LayoutOutcome, LayoutError> {
        let style = std::sync::Arc::clone(core.style());
        let Some(stream) = core.stream_mut() else {
            return Ok(LayoutOutcome::Empty);
        };
        let mut builder = LineBuilder::new(&style, &context);
        let mut forced_break = false;

        while let Some(token) = stream.peek().cloned() {
            match token {
                Token::LineBreak => {
                    stream.next_token();
                    forced_break = true;
                    break;
                }
                Token::Space => {
                    stream.next_token();
                    builder.space();
                }
                Token::Word(word) => {
                    let advance = style.measure_text(&word);
                    if !builder.fits(advance) {
                        break;
                    }
                    stream.next_token();
                    builder.place(BoxKind::Text(word), advance, style.line_height);
                }
                Token::Ruby { base, annotation } => {
                    let advance = style
                        .measure_text(&base)
                        .max(style.measure_text(&annotation) * RUBY_FONT_SCALE);
                    if !builder.fits(advance) {
                        break;
                    }
                    stream.next_token();
                    let extent = style.line_height + style.font_size * RUBY_FONT_SCALE;
                    builder.place(BoxKind::Ruby { base, annotation }, advance, extent);
                }
                Token::Element { .. } => break,
            }
        }

        if builder.is_empty() && !forced_break {
            return Ok(LayoutOutcome::Empty);
        }
        Ok(LayoutOutcome::Produced(builder.finish()))
    }
}
