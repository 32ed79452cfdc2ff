use crate::boxes::LayoutBox;
use crate::generator::GeneratorHandle;
use crate::outcome::LayoutOutcome;
use crate::LayoutError;

pub struct BreakAnalysis {
    pub should_break: bool,
    pub remaining_extent: f32,
}

/// Centralized logic to check if a child fits in the remaining space.
///
/// * `rest_extent`: Space left along the container's block axis.
/// * `extent`: The extent the child needs, edges included.
pub fn check_fit(rest_extent: f32, extent: f32) -> BreakAnalysis {
    let available = rest_extent.max(0.0);
    // Use a small epsilon to handle floating point inaccuracies
    const EPSILON: f32 = 0.01;
    BreakAnalysis {
        should_break: extent > available + EPSILON,
        remaining_extent: available,
    }
}

/// One page: the root box produced by a single yield of the root generator.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub index: usize,
    pub root: LayoutBox,
}

/// Drives the root generator, one page per produced box.
///
/// Steps that produce nothing are skipped. Iteration ends when the root is
/// exhausted or terminated, or after the first error.
pub struct Paginator {
    root: GeneratorHandle,
    next_index: usize,
    failed: bool,
}

impl Paginator {
    pub fn new(root: GeneratorHandle) -> Self {
        Self {
            root,
            next_index: 0,
            failed: false,
        }
    }
}

impl Iterator for Paginator {
    type Item = Result<Page, LayoutError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if !self.root.borrow().has_next() {
                return None;
            }
            let outcome = self.root.borrow_mut().yield_box(None);
            match outcome {
                Ok(LayoutOutcome::Produced(root)) => {
                    let index = self.next_index;
                    self.next_index += 1;
                    log::debug!("page {} laid out, extent {:.2}", index, root.box_extent());
                    return Some(Ok(Page { index, root }));
                }
                Ok(LayoutOutcome::Break) | Ok(LayoutOutcome::Empty) => continue,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
