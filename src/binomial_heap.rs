use crate::arena::{NodeAllocator, NIL};
use crate::comparator::Comparator;
use crate::traversal::{self, Order, Tree};
use std::cmp::Ordering;

/// Mergeable priority queue backed by a forest of binomial trees.
///
/// The forest is a root list linked through sibling pointers, holding at most
/// one tree per degree in strictly ascending degree order. A node of degree k
/// has exactly k children of degrees k-1 down to 0, linked as a sibling chain
/// off its child pointer. Insert and extract both run in O(log n) by merging
/// root lists and linking equal-degree roots; peeking the extremal value is
/// O(1) through a cached root.
///
/// Nodes are arena-allocated like the search trees, with `parent`/`child`/
/// `sibling` columns instead of `left`/`right`.
#[derive(Clone, Debug)]
pub struct BinomialHeap<T> {
    node_allocator: NodeAllocator,
    head: u32,
    /// Cached extremal root, kept exact by [`BinomialHeap::refresh_top`].
    top: u32,
    /// Cached extremal value, reset to the sentinel extreme when empty.
    top_value: T,
    extreme: T,
    min_heap: bool,
    parent: Vec<u32>,
    child: Vec<u32>,
    sibling: Vec<u32>,
    degree: Vec<u8>,
    values: Vec<Option<T>>,
    compare: Comparator<T>,
}

impl<T> BinomialHeap<T>
where
    T: Clone,
{
    /// A heap whose extremal value is the least under `compare`.
    /// `extreme` is the caller's stand-in for "no value yet", e.g. `i64::MAX`.
    pub fn min_heap(compare: Comparator<T>, extreme: T) -> Self {
        Self::with_ordering(true, compare, extreme)
    }

    /// A heap whose extremal value is the greatest under `compare`.
    pub fn max_heap(compare: Comparator<T>, extreme: T) -> Self {
        Self::with_ordering(false, compare, extreme)
    }

    fn with_ordering(min_heap: bool, compare: Comparator<T>, extreme: T) -> Self {
        let mut heap = BinomialHeap {
            node_allocator: NodeAllocator::new(),
            head: NIL,
            top: NIL,
            top_value: extreme.clone(),
            extreme,
            min_heap,
            parent: Vec::new(),
            child: Vec::new(),
            sibling: Vec::new(),
            degree: Vec::new(),
            values: Vec::new(),
            compare,
        };
        heap.resize(16);
        heap
    }

    /// Resize all columns to the `new_capacity`
    /// The extra link slots are filled with NIL, degrees with 0, values with None
    fn resize(&mut self, new_capacity: usize) {
        self.parent.resize(new_capacity, NIL);
        self.child.resize(new_capacity, NIL);
        self.sibling.resize(new_capacity, NIL);
        self.degree.resize(new_capacity, 0);
        self.values.resize_with(new_capacity, || None);
    }

    fn capacity(&self) -> usize {
        self.parent.len()
    }

    fn allocate(&mut self) -> u32 {
        let node = self.node_allocator.new_node();
        if node as usize >= self.capacity() {
            self.resize(2 * node as usize);
        }
        node
    }

    #[inline]
    fn get_parent(&self, node: u32) -> u32 {
        self.parent[node as usize]
    }

    #[inline]
    fn set_parent(&mut self, node: u32, item: u32) {
        assert!(node != NIL);
        self.parent[node as usize] = item;
    }

    #[inline]
    fn get_child(&self, node: u32) -> u32 {
        self.child[node as usize]
    }

    #[inline]
    fn set_child(&mut self, node: u32, item: u32) {
        assert!(node != NIL);
        self.child[node as usize] = item;
    }

    #[inline]
    fn get_sibling(&self, node: u32) -> u32 {
        self.sibling[node as usize]
    }

    #[inline]
    fn set_sibling(&mut self, node: u32, item: u32) {
        assert!(node != NIL);
        self.sibling[node as usize] = item;
    }

    #[inline]
    fn get_degree(&self, node: u32) -> u8 {
        self.degree[node as usize]
    }

    fn value_at(&self, node: u32) -> &T {
        self.values[node as usize].as_ref().unwrap()
    }

    /// Number of stored values
    pub fn size(&self) -> usize {
        self.node_allocator.size() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.head == NIL
    }

    /// The extremal value, or None when the heap is empty. O(1) through the
    /// cached copy maintained by union.
    pub fn peek_extreme(&self) -> Option<&T> {
        if self.head == NIL {
            return None;
        }
        Some(&self.top_value)
    }

    /// Drop every value, keeping the allocated capacity.
    pub fn clear(&mut self) {
        let capacity = self.capacity();
        self.node_allocator = NodeAllocator::new();
        self.head = NIL;
        self.top = NIL;
        self.top_value = self.extreme.clone();
        self.parent.clear();
        self.child.clear();
        self.sibling.clear();
        self.degree.clear();
        self.values.clear();
        self.resize(capacity);
    }

    /// Whether `x` should sit above `y` under this heap's ordering
    /// (<= for a min heap, >= for a max heap).
    fn dominates(&self, x: &T, y: &T) -> bool {
        match (self.compare)(x, y) {
            Ordering::Less => self.min_heap,
            Ordering::Greater => !self.min_heap,
            Ordering::Equal => true,
        }
    }

    fn dominates_node(&self, x: u32, y: u32) -> bool {
        self.dominates(self.value_at(x), self.value_at(y))
    }

    /// Insert `value` by unioning a singleton tree into the forest. O(log n).
    pub fn insert(&mut self, value: T) {
        let node = self.allocate();
        self.values[node as usize] = Some(value);
        self.union(node);
    }

    /// Remove and return the extremal value, or None when the heap is empty.
    /// O(log n).
    pub fn extract(&mut self) -> Option<T> {
        if self.head == NIL {
            return None;
        }

        // splice the cached extremal root out of the root list
        let top = self.top;
        if self.head == top {
            self.head = self.get_sibling(top);
        } else {
            let mut prev = self.head;
            while self.get_sibling(prev) != top {
                prev = self.get_sibling(prev);
            }
            let after = self.get_sibling(top);
            self.set_sibling(prev, after);
        }

        // relink the children as their own root list in reversed sibling
        // order, so their degrees ascend again
        let mut reversed = NIL;
        let mut curr = self.get_child(top);
        while curr != NIL {
            let next = self.get_sibling(curr);
            self.set_parent(curr, NIL);
            self.set_sibling(curr, reversed);
            reversed = curr;
            curr = next;
        }

        self.union(reversed);

        let value = self.values[top as usize].take();
        self.release(top);
        value
    }

    /// Merge two root lists, both strictly ascending by degree, into one
    /// combined ascending list. No linking happens here. O(trees).
    fn merge(&mut self, h1: u32, h2: u32) -> u32 {
        if h1 == NIL {
            return h2;
        }
        if h2 == NIL {
            return h1;
        }

        let mut a = h1;
        let mut b = h2;
        let head;
        if self.get_degree(a) < self.get_degree(b) {
            head = a;
            a = self.get_sibling(a);
        } else {
            head = b;
            b = self.get_sibling(b);
        }

        let mut tail = head;
        while a != NIL && b != NIL {
            if self.get_degree(a) < self.get_degree(b) {
                self.set_sibling(tail, a);
                tail = a;
                a = self.get_sibling(a);
            } else {
                self.set_sibling(tail, b);
                tail = b;
                b = self.get_sibling(b);
            }
        }

        if a != NIL {
            self.set_sibling(tail, a);
        } else {
            self.set_sibling(tail, b);
        }

        head
    }

    /// Link the tree rooted at `y` under the equal-degree root `z`: `z`
    /// becomes `y`'s parent and gains one degree.
    fn link(&mut self, y: u32, z: u32) {
        assert!(self.get_degree(y) == self.get_degree(z));
        self.set_parent(y, z);
        let first_child = self.get_child(z);
        self.set_sibling(y, first_child);
        self.set_child(z, y);
        self.degree[z as usize] += 1;
    }

    /// Unite the root list beginning at `other` into this forest: merge the
    /// two degree-ascending lists, then sweep with prev/curr/next pointers
    /// coalescing consecutive equal-degree roots until every degree is
    /// unique. The cached extremal root is recomputed afterwards.
    fn union(&mut self, other: u32) {
        self.head = self.merge(self.head, other);

        let mut prev = NIL;
        let mut curr = self.head;
        while curr != NIL {
            let next = self.get_sibling(curr);
            if next == NIL {
                break;
            }
            let third = self.get_sibling(next);

            if self.get_degree(curr) != self.get_degree(next)
                || (third != NIL && self.get_degree(third) == self.get_degree(curr))
            {
                // cases 1 + 2: unequal degrees, or the first of three equal
                // degrees whose link is deferred one step
                prev = curr;
                curr = next;
            } else if self.dominates_node(curr, next) {
                // case 3: next joins curr's children, curr stays in place
                self.set_sibling(curr, third);
                self.link(next, curr);
            } else {
                // case 4: curr joins next's children and leaves the root list
                if prev == NIL {
                    self.head = next;
                } else {
                    self.set_sibling(prev, next);
                }
                self.link(curr, next);
                curr = next;
            }
        }

        self.refresh_top();
    }

    /// Rescan the root list so the cached extremal root is exact.
    fn refresh_top(&mut self) {
        self.top = self.head;
        if self.head == NIL {
            self.top_value = self.extreme.clone();
            return;
        }
        let mut node = self.get_sibling(self.head);
        while node != NIL {
            if self.dominates_node(node, self.top) {
                self.top = node;
            }
            node = self.get_sibling(node);
        }
        self.top_value = self.value_at(self.top).clone();
    }

    /// Release the node
    /// Marks the node as unused in the node allocator
    fn release(&mut self, node: u32) {
        self.set_parent(node, NIL);
        self.set_child(node, NIL);
        self.set_sibling(node, NIL);
        self.degree[node as usize] = 0;
        self.values[node as usize] = None;
        self.node_allocator.release(node);
    }

    /// Materialize the values in the given traversal order.
    pub fn traverse(&self, order: Order) -> Vec<T> {
        traversal::traverse(self, order)
    }

    /// The values in level order over the first-child/next-sibling encoding.
    pub fn values(&self) -> Vec<T> {
        self.traverse(Order::Level)
    }
}

impl<T> Tree<T> for BinomialHeap<T>
where
    T: Clone,
{
    fn root(&self) -> u32 {
        self.head
    }

    fn size(&self) -> usize {
        self.node_allocator.size() as usize
    }

    fn value(&self, node: u32) -> Option<&T> {
        self.values[node as usize].as_ref()
    }

    /// First-child/next-sibling encoding: the forest is walked as a binary
    /// tree whose two slots are the child chain and the sibling chain.
    fn children(&self, node: u32) -> Vec<u32> {
        if node == NIL {
            return Vec::new();
        }
        vec![self.get_child(node), self.get_sibling(node)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::comparator::natural_order;
    use crate::util::{gen_shuffled_range, gen_uniform_vec};

    /// Checks the binomial shape below `node`: a degree-k node has exactly k
    /// children of degrees k-1 down to 0, each dominated by its parent.
    fn check_subtree(heap: &BinomialHeap<i64>, node: u32) {
        let mut expected = heap.get_degree(node) as i32 - 1;
        let mut child = heap.get_child(node);
        while child != NIL {
            assert_eq!(heap.get_degree(child) as i32, expected);
            assert_eq!(heap.get_parent(child), node);
            assert!(heap.dominates_node(node, child), "heap order violated");
            check_subtree(heap, child);
            expected -= 1;
            child = heap.get_sibling(child);
        }
        assert_eq!(expected, -1, "degree does not match child count");
    }

    /// Checks the whole forest: strictly ascending root degrees (hence no
    /// duplicates) and an exact cached extremal root.
    fn check_forest(heap: &BinomialHeap<i64>) {
        let mut last_degree = -1i32;
        let mut node = heap.head;
        let mut best = None;
        while node != NIL {
            assert!(
                (heap.get_degree(node) as i32) > last_degree,
                "root degrees not strictly ascending"
            );
            last_degree = heap.get_degree(node) as i32;
            assert_eq!(heap.get_parent(node), NIL);
            check_subtree(heap, node);
            if best.map_or(true, |b| heap.dominates_node(node, b)) {
                best = Some(node);
            }
            node = heap.get_sibling(node);
        }
        match best {
            Some(best) => {
                assert_eq!(heap.value_at(heap.top), heap.value_at(best));
            }
            None => assert_eq!(heap.top, NIL),
        }
    }

    #[test]
    fn peek_tracks_the_minimum() {
        let mut heap = BinomialHeap::min_heap(natural_order, i64::MAX);
        heap.insert(32);
        for value in vec![117i64, 176, 48, 191, 123, 190, 79] {
            heap.insert(value);
            assert_eq!(heap.peek_extreme(), Some(&32));
            check_forest(&heap);
        }
        assert_eq!(heap.size(), 8);
        assert_eq!(heap.extract(), Some(32));
        assert_eq!(heap.peek_extreme(), Some(&48));
        check_forest(&heap);
    }

    #[test]
    fn min_heap_drains_in_ascending_order() {
        let values = gen_shuffled_range(400);
        let mut heap = BinomialHeap::min_heap(natural_order, i64::MAX);
        for value in &values {
            heap.insert(*value);
        }
        check_forest(&heap);

        let mut drained = Vec::new();
        while let Some(value) = heap.extract() {
            check_forest(&heap);
            drained.push(value);
        }
        let mut expected = values;
        expected.sort_unstable();
        assert_eq!(drained, expected);
        assert!(heap.is_empty());
    }

    #[test]
    fn extract_on_empty_heap_returns_none() {
        let mut heap: BinomialHeap<i64> = BinomialHeap::min_heap(natural_order, i64::MAX);
        assert_eq!(heap.extract(), None);
        assert_eq!(heap.peek_extreme(), None);
        assert_eq!(heap.size(), 0);
        assert!(heap.is_empty());
    }

    #[test]
    fn max_heap_drains_in_descending_order() {
        let values = gen_uniform_vec(300);
        let mut heap = BinomialHeap::max_heap(natural_order, i64::MIN);
        for value in &values {
            heap.insert(*value);
            check_forest(&heap);
        }

        let mut expected = values.clone();
        expected.sort_unstable_by(|a, b| b.cmp(a));
        let mut drained = Vec::new();
        while let Some(value) = heap.extract() {
            check_forest(&heap);
            drained.push(value);
        }
        assert_eq!(drained, expected);
        assert!(heap.is_empty());
    }

    #[test]
    fn size_tracks_inserts_and_extracts() {
        let mut heap = BinomialHeap::min_heap(natural_order, i64::MAX);
        for (i, value) in gen_shuffled_range(100).into_iter().enumerate() {
            heap.insert(value);
            assert_eq!(heap.size(), i + 1);
        }
        for i in (0..100).rev() {
            assert!(heap.extract().is_some());
            assert_eq!(heap.size(), i as usize);
        }
        assert_eq!(heap.extract(), None);
    }

    #[test]
    fn duplicate_values_are_all_kept() {
        let mut heap = BinomialHeap::min_heap(natural_order, i64::MAX);
        for value in vec![5i64, 5, 5, 1, 1] {
            heap.insert(value);
        }
        assert_eq!(heap.size(), 5);
        assert_eq!(heap.extract(), Some(1));
        assert_eq!(heap.extract(), Some(1));
        assert_eq!(heap.extract(), Some(5));
        assert_eq!(heap.size(), 2);
    }

    #[test]
    fn level_order_covers_every_value() {
        let values = gen_shuffled_range(64);
        let mut heap = BinomialHeap::min_heap(natural_order, i64::MAX);
        for value in &values {
            heap.insert(*value);
        }
        let mut traversed = heap.values();
        assert_eq!(traversed.len(), heap.size());
        traversed.sort_unstable();
        let mut expected = values;
        expected.sort_unstable();
        assert_eq!(traversed, expected);
    }

    #[test]
    fn clear_resets_and_allows_reuse() {
        let mut heap = BinomialHeap::min_heap(natural_order, i64::MAX);
        for value in gen_shuffled_range(20) {
            heap.insert(value);
        }
        heap.clear();
        assert!(heap.is_empty());
        assert_eq!(heap.peek_extreme(), None);
        heap.insert(3);
        assert_eq!(heap.extract(), Some(3));
    }
}
