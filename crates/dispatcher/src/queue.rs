use std::collections::VecDeque;

/// Unbounded first-in-first-out queue backing the standard lane.
#[derive(Debug, Clone)]
pub struct FifoQueue<T> {
    inner: VecDeque<T>,
}

impl<T> Default for FifoQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FifoQueue<T> {
    pub fn new() -> Self {
        Self { inner: VecDeque::new() }
    }

    pub fn enqueue(&mut self, item: T) {
        self.inner.push_back(item);
    }

    /// Insert ahead of everything already waiting.
    pub fn enqueue_front(&mut self, item: T) {
        self.inner.push_front(item);
    }

    pub fn dequeue(&mut self) -> Option<T> {
        self.inner.pop_front()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.inner.iter()
    }

    /// Backing sequence, front first. Reordering it changes serve order.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.inner.make_contiguous()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enqueue_dequeue_fifo() {
        let mut q = FifoQueue::new();
        q.enqueue("a");
        q.enqueue("b");
        q.enqueue("c");
        assert_eq!(q.len(), 3);
        assert_eq!(q.dequeue(), Some("a"));
        assert_eq!(q.dequeue(), Some("b"));
        assert_eq!(q.dequeue(), Some("c"));
        assert_eq!(q.dequeue(), None);
        assert!(q.is_empty());
    }

    #[test]
    fn enqueue_front_jumps_the_line() {
        let mut q = FifoQueue::new();
        q.enqueue(1);
        q.enqueue(2);
        q.enqueue_front(0);
        assert_eq!(q.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn slice_reorder_is_visible_to_dequeue() {
        let mut q = FifoQueue::new();
        q.enqueue(3);
        q.enqueue(1);
        // force the deque to wrap before taking the slice
        q.enqueue_front(2);
        q.as_mut_slice().sort();
        assert_eq!(q.dequeue(), Some(1));
        assert_eq!(q.dequeue(), Some(2));
        assert_eq!(q.dequeue(), Some(3));
    }
}
