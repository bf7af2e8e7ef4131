/// Fixed-capacity circular log of past samples. Pre-allocated, no heap allocs
/// after init. Pushing into a full buffer overwrites the oldest sample.
#[derive(Debug, Clone)]
pub struct HistoryBuffer<T> {
    buf: Vec<T>,
    capacity: usize,
    /// Slot the next push writes to.
    head: usize,
    len: usize,
}

impl<T: Copy + Default> HistoryBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buf: vec![T::default(); capacity],
            capacity,
            head: 0,
            len: 0,
        }
    }

    /// Buffer pre-seeded with `count` copies of `sample` (capped at capacity).
    pub fn seeded(capacity: usize, sample: T, count: usize) -> Self {
        let mut history = Self::new(capacity);
        for _ in 0..count.min(history.capacity) {
            history.push(sample);
        }
        history
    }

    pub fn push(&mut self, value: T) {
        self.buf[self.head] = value;
        self.head = (self.head + 1) % self.capacity;
        if self.len < self.capacity {
            self.len += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Sample `delay` pushes before the most recent one. `delayed(0)` is the
    /// latest sample. `None` once `delay >= len`.
    pub fn delayed(&self, delay: usize) -> Option<T> {
        if delay >= self.len {
            return None;
        }
        let idx = (self.head + self.capacity - 1 - delay) % self.capacity;
        Some(self.buf[idx])
    }

    pub fn latest(&self) -> Option<T> {
        self.delayed(0)
    }

    pub fn oldest(&self) -> Option<T> {
        self.len.checked_sub(1).and_then(|d| self.delayed(d))
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let start = if self.len < self.capacity {
            0
        } else {
            self.head
        };
        let cap = self.capacity;
        let len = self.len;
        (0..len).map(move |i| &self.buf[(start + i) % cap])
    }
}
