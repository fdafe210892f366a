/// Unbounded last-in-first-out stack holding resolved tickets.
#[derive(Debug, Clone)]
pub struct LifoStack<T> {
    items: Vec<T>,
}

impl<T> Default for LifoStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LifoStack<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter()
    }

    /// Backing sequence, bottom first. The last element is popped next.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }
}
