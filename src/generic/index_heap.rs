/*!
A max-heap on some subset of elements with fixed indicies.

The heap is backed by a vector of values, indexed by the (fixed) index of each element, with a companion vector recording where, if anywhere, each index sits on the heap.
So, the values of every element are stored regardless of whether the element is *active* on the heap, and an element may be moved on and off the heap without losing its value.

[IndexHeap] is used to order the atoms of a context by activity, as the activity of an atom persists while the atom has a value and is not a candidate for a decision.

```rust
# use otter_smt::generic::index_heap::IndexHeap;
let mut heap = IndexHeap::default();

heap.add(600, 10);
heap.add(0, 70);

heap.activate(600);
heap.activate(0);

assert_eq!(heap.count(), 601);
assert_eq!(heap.value_at(5), &i32::default());

assert_eq!(heap.pop_max(), Some(0));
assert_eq!(heap.pop_max(), Some(600));
assert!(heap.pop_max().is_none());
```
*/

/// The index heap struct.
pub struct IndexHeap<V: PartialOrd + Default> {
    /// Values, indexed by element.
    values: Vec<V>,

    /// The position of each element on the heap, if active.
    position: Vec<Option<usize>>,

    /// The active elements, in heap order.
    heap: Vec<usize>,
}

impl<V: PartialOrd + Default> Default for IndexHeap<V> {
    fn default() -> Self {
        IndexHeap {
            values: Vec::default(),
            position: Vec::default(),
            heap: Vec::default(),
        }
    }
}

impl<V: PartialOrd + Default> IndexHeap<V> {
    /// Sets the value of `index` to `value`, growing the structure if `index` is fresh.
    /// Returns true if `index` was fresh, false otherwise.
    ///
    /// The element is not activated, though if already active its position is revised.
    pub fn add(&mut self, index: usize, value: V) -> bool {
        let fresh = index >= self.values.len();
        if fresh {
            self.values.resize_with(index + 1, V::default);
            self.position.resize(index + 1, None);
        }
        self.values[index] = value;
        if !fresh {
            self.heapify_if_active(index);
        }
        fresh
    }

    /// Places `index` on the heap, if not already present.
    /// Returns true if `index` was placed on the heap, false otherwise.
    pub fn activate(&mut self, index: usize) -> bool {
        match self.position[index] {
            Some(_) => false,
            None => {
                self.heap.push(index);
                let heap_index = self.heap.len() - 1;
                self.position[index] = Some(heap_index);
                self.sift_up(heap_index);
                true
            }
        }
    }

    /// Removes `index` from the heap, if present.
    /// Returns true if `index` was removed, false otherwise.
    pub fn remove(&mut self, index: usize) -> bool {
        let Some(heap_index) = self.position[index] else {
            return false;
        };

        let last = self.heap.len() - 1;
        self.swap(heap_index, last);
        self.heap.pop();
        self.position[index] = None;

        if heap_index < self.heap.len() {
            self.sift_down(heap_index);
            self.sift_up(heap_index);
        }
        true
    }

    /// True if `index` is on the heap.
    pub fn is_active(&self, index: usize) -> bool {
        self.position.get(index).is_some_and(|p| p.is_some())
    }

    /// Restores the heap property around `index`, if active.
    pub fn heapify_if_active(&mut self, index: usize) {
        if let Some(heap_index) = self.position[index] {
            self.sift_up(heap_index);
            if let Some(heap_index) = self.position[index] {
                self.sift_down(heap_index);
            }
        }
    }

    /// The element with maximum value on the heap.
    pub fn peek_max(&self) -> Option<usize> {
        self.heap.first().copied()
    }

    /// The maximum value on the heap.
    pub fn peek_max_value(&self) -> Option<&V> {
        self.peek_max().map(|index| &self.values[index])
    }

    /// Removes and returns the element with maximum value on the heap.
    pub fn pop_max(&mut self) -> Option<usize> {
        let max = self.peek_max()?;
        self.remove(max);
        Some(max)
    }

    /// Restores the heap property for every active element.
    pub fn heapify(&mut self) {
        for heap_index in (0..self.heap.len() / 2).rev() {
            self.sift_down(heap_index)
        }
    }

    /// The value of `index`.
    pub fn value_at(&self, index: usize) -> &V {
        &self.values[index]
    }

    /// Sets the value of `index` to `value`, without restoring the heap property.
    pub fn revalue(&mut self, index: usize, value: V) {
        self.values[index] = value
    }

    /// Applies `f` to every value, without restoring the heap property.
    ///
    /// Intended for order preserving maps, such as scaling.
    pub fn apply_to_all(&mut self, f: impl Fn(&V) -> V) {
        for value in self.values.iter_mut() {
            *value = f(value)
        }
    }

    /// A count of elements indexed by the structure.
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// A count of elements on the heap.
    pub fn active_count(&self) -> usize {
        self.heap.len()
    }

    /// True if no element is indexed.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<V: PartialOrd + Default> IndexHeap<V> {
    fn value_on_heap(&self, heap_index: usize) -> &V {
        &self.values[self.heap[heap_index]]
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position[self.heap[a]] = Some(a);
        self.position[self.heap[b]] = Some(b);
    }

    fn sift_up(&mut self, mut heap_index: usize) {
        while heap_index > 0 {
            let parent = (heap_index - 1) / 2;
            if self.value_on_heap(heap_index) > self.value_on_heap(parent) {
                self.swap(heap_index, parent);
                heap_index = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut heap_index: usize) {
        loop {
            let left = 2 * heap_index + 1;
            if left >= self.heap.len() {
                break;
            }
            let right = left + 1;

            let mut largest = heap_index;
            if self.value_on_heap(left) > self.value_on_heap(largest) {
                largest = left;
            }
            if right < self.heap.len() && self.value_on_heap(right) > self.value_on_heap(largest)
            {
                largest = right;
            }

            if largest == heap_index {
                break;
            }
            self.swap(heap_index, largest);
            heap_index = largest;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_simple() {
        let mut heap = IndexHeap::default();
        for (index, value) in [(6, 10), (5, 20), (4, 30), (1, 60), (0, 70)] {
            heap.add(index, value);
            heap.activate(index);
        }

        assert_eq!(heap.pop_max(), Some(0));
        assert_eq!(heap.pop_max(), Some(1));
        assert_eq!(heap.pop_max(), Some(4));
        assert_eq!(heap.pop_max(), Some(5));
        assert_eq!(heap.pop_max(), Some(6));
        assert_eq!(heap.pop_max(), None);
    }

    #[test]
    fn heap_revalue() {
        let mut heap = IndexHeap::default();
        for (index, value) in [(6, 10), (4, 30), (1, 60), (0, 70)] {
            heap.add(index, value);
            heap.activate(index);
        }

        for index in [0, 1, 4, 6] {
            heap.revalue(index, index as i32);
        }
        heap.heapify();

        assert_eq!(heap.pop_max(), Some(6));
        assert_eq!(heap.pop_max(), Some(4));
        assert_eq!(heap.pop_max(), Some(1));
        assert_eq!(heap.pop_max(), Some(0));
        assert!(heap.pop_max().is_none());
    }

    #[test]
    fn heap_remove_and_reactivate() {
        let mut heap = IndexHeap::default();
        for index in [6, 5, 4, 1, 0] {
            heap.add(index, index as i32);
            heap.activate(index);
        }

        assert!(heap.remove(4));
        assert!(!heap.remove(4));
        assert!(heap.remove(6));
        assert!(!heap.is_active(6));

        assert!(!heap.add(4, 10));
        assert!(!heap.is_active(4));
        heap.add(4, 1);
        heap.activate(4);

        assert_eq!(heap.pop_max(), Some(5));
        assert!(matches!(heap.pop_max(), Some(1) | Some(4)));
        assert!(matches!(heap.pop_max(), Some(1) | Some(4)));
        assert_eq!(heap.pop_max(), Some(0));
    }

    #[test]
    fn heap_add_while_active() {
        let mut heap = IndexHeap::default();
        for index in 0..8 {
            heap.add(index, 1.0);
            heap.activate(index);
        }
        heap.add(3, 9.0);
        assert_eq!(heap.peek_max(), Some(3));
        assert_eq!(heap.peek_max_value(), Some(&9.0));
        assert_eq!(heap.active_count(), 8);
    }
}
