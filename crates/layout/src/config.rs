#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    /// How many times a single box may be pushed back for a retry before the
    /// generator that owns it is forcibly terminated.
    ///
    /// Defaults to `5`.
    pub max_rollback_count: usize,
}

impl LayoutConfig {
    pub fn with_max_rollback_count(mut self, count: usize) -> Self {
        self.max_rollback_count = count;
        self
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_rollback_count: 5,
        }
    }
}
