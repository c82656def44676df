use std::collections::HashMap;

/// Binary max-heap over distinct integers that can remove any member.
///
/// `index` maps every value to its position in `data`, which makes
/// [`contains`](Self::contains) O(1) and [`remove`](Self::remove) O(log n).
#[derive(Clone, Debug, Default)]
pub struct IndexedUniqueMaxHeap {
    data: Vec<u64>,
    index: HashMap<u64, usize>,
}

impl IndexedUniqueMaxHeap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn contains(&self, value: u64) -> bool {
        self.index.contains_key(&value)
    }

    pub fn max(&self) -> Option<u64> {
        self.data.first().copied()
    }

    /// Inserts `value`; no-op if it is already present.
    pub fn add(&mut self, value: u64) {
        if self.contains(value) {
            return;
        }
        let ix = self.data.len();
        self.data.push(value);
        self.index.insert(value, ix);
        self.sift_up(ix);
    }

    /// Removes `value`; no-op if it is absent.
    pub fn remove(&mut self, value: u64) {
        let Some(ix) = self.index.remove(&value) else {
            return;
        };
        let last = self.data.len() - 1;
        if ix != last {
            let moved = self.data[last];
            self.data[ix] = moved;
            self.index.insert(moved, ix);
        }
        self.data.pop();
        if ix < self.data.len() {
            let ix = self.sift_down(ix);
            self.sift_up(ix);
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
        self.index.insert(self.data[a], a);
        self.index.insert(self.data[b], b);
    }

    fn sift_up(&mut self, mut child: usize) -> usize {
        while child > 0 {
            let parent = (child - 1) / 2;
            if self.data[child] <= self.data[parent] {
                break;
            }
            self.swap(child, parent);
            child = parent;
        }
        child
    }

    fn sift_down(&mut self, mut ix: usize) -> usize {
        let len = self.data.len();
        loop {
            let right = 2 * (ix + 1);
            let left = right - 1;
            if left >= len {
                break;
            }
            // Ties go to the right child.
            let selected = if right < len && self.data[right] >= self.data[left] {
                right
            } else {
                left
            };
            if self.data[selected] <= self.data[ix] {
                break;
            }
            self.swap(ix, selected);
            ix = selected;
        }
        ix
    }
}
