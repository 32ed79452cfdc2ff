//! Physical sizes.

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Shrinks both sides by the given amounts, never going below zero.
    pub fn shrink(self, dw: f32, dh: f32) -> Self {
        Self {
            width: (self.width - dw).max(0.0),
            height: (self.height - dh).max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shrink_clamps_at_zero() {
        assert_eq!(Size::new(10.0, 4.0).shrink(3.0, 6.0), Size::new(7.0, 0.0));
    }
}
