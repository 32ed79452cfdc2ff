//! Bounded undo buffer for boxes that did not fit.

/// Returned by [`RetryBuffer::push`] when an item has used up its attempts.
#[derive(Debug)]
pub struct RetryExhausted<T> {
    pub item: T,
    pub attempts: usize,
}

/// True when an item already retried `attempts` times may not be retried again.
pub fn retry_exhausted(attempts: usize, limit: usize) -> bool {
    attempts > 0 && attempts >= limit
}

#[derive(Debug, Clone)]
struct Pending<T> {
    item: T,
    attempts: usize,
}

/// LIFO buffer of items waiting to be re-emitted, each with the number of
/// times it has been pushed.
///
/// The most recently popped item stays "in flight": a push that follows a pop
/// is counted as another attempt at that item. Call [`settle`](Self::settle)
/// once the popped item has been accepted.
#[derive(Debug, Clone)]
pub struct RetryBuffer<T> {
    entries: Vec<Pending<T>>,
    limit: usize,
    in_flight: Option<usize>,
}

impl<T> RetryBuffer<T> {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
            in_flight: None,
        }
    }

    /// Buffers `item` and returns its attempt count. Fails without buffering
    /// once the bound is reached.
    pub fn push(&mut self, item: T) -> Result<usize, RetryExhausted<T>> {
        let attempts = self.in_flight.take().unwrap_or(0);
        if retry_exhausted(attempts, self.limit) {
            return Err(RetryExhausted { item, attempts });
        }
        self.entries.push(Pending {
            item,
            attempts: attempts + 1,
        });
        Ok(attempts + 1)
    }

    pub fn pop(&mut self) -> Option<T> {
        let entry = self.entries.pop()?;
        self.in_flight = Some(entry.attempts);
        Some(entry.item)
    }

    pub fn peek_last(&self) -> Option<&T> {
        self.entries.last().map(|e| &e.item)
    }

    /// Attempt count of the last buffered item.
    pub fn last_attempts(&self) -> Option<usize> {
        self.entries.last().map(|e| e.attempts)
    }

    pub fn settle(&mut self) {
        self.in_flight = None;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.in_flight = None;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_lifo_order() {
        let mut buf = RetryBuffer::new(5);
        for item in ["a", "b", "c"] {
            buf.push(item).unwrap();
        }
        assert_eq!(buf.peek_last(), Some(&"c"));
        assert_eq!(buf.pop(), Some("c"));
        buf.settle();
        assert_eq!(buf.pop(), Some("b"));
        buf.settle();
        assert_eq!(buf.pop(), Some("a"));
        assert_eq!(buf.pop(), None);
    }

    #[test]
    fn repush_after_pop_counts_as_another_attempt() {
        let mut buf = RetryBuffer::new(5);
        assert_eq!(buf.push("x").unwrap(), 1);
        buf.pop();
        assert_eq!(buf.push("x").unwrap(), 2);
        buf.pop();
        buf.settle();
        // Accepted, so a new push starts over.
        assert_eq!(buf.push("y").unwrap(), 1);
    }

    #[test]
    fn push_fails_once_limit_is_reached() {
        let mut buf = RetryBuffer::new(3);
        buf.push(7).unwrap();
        for _ in 0..2 {
            let item = buf.pop().unwrap();
            buf.push(item).unwrap();
        }
        assert_eq!(buf.last_attempts(), Some(3));
        let item = buf.pop().unwrap();
        let err = buf.push(item).unwrap_err();
        assert_eq!(err.item, 7);
        assert_eq!(err.attempts, 3);
        assert!(buf.is_empty());
    }

    #[test]
    fn zero_limit_still_accepts_fresh_items() {
        let mut buf = RetryBuffer::new(0);
        assert!(buf.push(1).is_ok());
        buf.pop();
        assert!(buf.push(1).is_err());
    }
}
