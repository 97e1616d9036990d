use crate::arena::{node_id_to_option, NodeAllocator, NIL};
use crate::comparator::Comparator;
use crate::traversal::{self, Order, Tree};
use std::cmp::Ordering;

/// Self-balancing binary search tree keyed by a [`Comparator`].
///
/// Nodes are arena-allocated: structural links live in parallel `Vec<u32>`
/// columns indexed by node id and `NIL` (slot 0) stands in for every absent
/// child. Heights are stored per node, 1 for a leaf and 0 for `NIL`, and the
/// AVL invariant |height(left) - height(right)| <= 1 is restored after every
/// mutation by rotating on the path back to the root.
#[derive(Clone, Debug)]
pub struct AvlTree<T> {
    node_allocator: NodeAllocator,
    root: u32,
    parent: Vec<u32>,
    left: Vec<u32>,
    right: Vec<u32>,
    height: Vec<u8>,
    values: Vec<Option<T>>,
    compare: Comparator<T>,
}

impl<T> AvlTree<T> {
    pub fn new(compare: Comparator<T>) -> Self {
        Self::with_capacity(compare, 16)
    }

    pub fn with_capacity(compare: Comparator<T>, capacity: usize) -> Self {
        let mut tree = AvlTree {
            node_allocator: NodeAllocator::new(),
            root: NIL,
            parent: Vec::with_capacity(capacity),
            left: Vec::with_capacity(capacity),
            right: Vec::with_capacity(capacity),
            height: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            compare,
        };
        tree.resize(capacity.max(1));
        tree
    }

    /// Build a tree by inserting `values` one at a time.
    pub fn with_values<I>(compare: Comparator<T>, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = Self::new(compare);
        for value in values {
            tree.insert(value);
        }
        tree
    }

    /// Resize all columns to the `new_capacity`
    /// The extra link slots are filled with NIL, the extra value slots with None
    fn resize(&mut self, new_capacity: usize) {
        self.parent.resize(new_capacity, NIL);
        self.left.resize(new_capacity, NIL);
        self.right.resize(new_capacity, NIL);
        self.height.resize(new_capacity, 0);
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
    fn get_left(&self, node: u32) -> u32 {
        self.left[node as usize]
    }

    #[inline]
    fn set_left(&mut self, node: u32, item: u32) {
        assert!(node != NIL);
        self.left[node as usize] = item;
    }

    #[inline]
    fn get_right(&self, node: u32) -> u32 {
        self.right[node as usize]
    }

    #[inline]
    fn set_right(&mut self, node: u32, item: u32) {
        assert!(node != NIL);
        self.right[node as usize] = item;
    }

    #[inline]
    fn get_height(&self, node: u32) -> u8 {
        self.height[node as usize]
    }

    #[inline]
    fn set_height(&mut self, node: u32, item: u8) {
        assert!(node != NIL);
        self.height[node as usize] = item;
    }

    fn value_at(&self, node: u32) -> &T {
        self.values[node as usize].as_ref().unwrap()
    }

    /// Number of stored values
    pub fn size(&self) -> usize {
        self.node_allocator.size() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.root == NIL
    }

    /// Drop every value, keeping the allocated capacity.
    pub fn clear(&mut self) {
        let capacity = self.capacity();
        self.node_allocator = NodeAllocator::new();
        self.root = NIL;
        self.parent.clear();
        self.left.clear();
        self.right.clear();
        self.height.clear();
        self.values.clear();
        self.resize(capacity);
    }

    /// Insert `value`, rebalancing every ancestor on the way back up.
    /// Returns false and leaves the tree untouched when an equal value is
    /// already present.
    pub fn insert(&mut self, value: T) -> bool {
        if self.root == NIL {
            let node = self.allocate();
            self.values[node as usize] = Some(value);
            self.set_height(node, 1);
            self.root = node;
            return true;
        }

        let mut node = self.root;
        let parent;
        let mut comparison;
        loop {
            comparison = (self.compare)(&value, self.value_at(node));
            let next = match comparison {
                Ordering::Less => self.get_left(node),
                Ordering::Greater => self.get_right(node),
                Ordering::Equal => return false,
            };
            if next == NIL {
                parent = node;
                break;
            }
            node = next;
        }

        let node = self.allocate();
        self.values[node as usize] = Some(value);
        self.set_parent(node, parent);
        match comparison {
            Ordering::Less => self.set_left(parent, node),
            _ => self.set_right(parent, node),
        }

        self.rebalance(node);
        true
    }

    /// Whether a value comparing equal to `value` is present.
    pub fn contains(&self, value: &T) -> bool {
        self.find(value) != NIL
    }

    fn find(&self, value: &T) -> u32 {
        let mut node = self.root;
        while node != NIL {
            node = match (self.compare)(value, self.value_at(node)) {
                Ordering::Less => self.get_left(node),
                Ordering::Greater => self.get_right(node),
                Ordering::Equal => return node,
            };
        }
        NIL
    }

    /// Remove the node comparing equal to `value`, rebalancing on the way up.
    /// Removing an absent value is a no-op returning false.
    pub fn remove(&mut self, value: &T) -> bool {
        let node = self.find(value);
        if node == NIL {
            return false;
        }
        self.remove_node(node);
        true
    }

    fn remove_node(&mut self, node: u32) {
        if self.get_left(node) != NIL && self.get_right(node) != NIL {
            // inner node, two children: trade places with the in-order
            // successor so the node to splice has at most one child
            let next = self.next(node);
            assert!(next.is_some());
            self.swap(node, next.unwrap());
        }

        assert!(self.get_left(node) == NIL || self.get_right(node) == NIL);

        let parent = self.get_parent(node);
        let mut child = self.get_left(node);
        if child == NIL {
            child = self.get_right(node);
        }

        if child == NIL {
            // no children
            if node == self.root {
                self.root = NIL;
            } else if node == self.get_left(parent) {
                self.set_left(parent, NIL);
            } else {
                assert!(node == self.get_right(parent));
                self.set_right(parent, NIL);
            }
        } else {
            // one child
            if node == self.root {
                self.root = child;
            } else if node == self.get_left(parent) {
                self.set_left(parent, child);
            } else {
                assert!(node == self.get_right(parent));
                self.set_right(parent, child);
            }
            self.set_parent(child, parent);
        }

        self.release(node);
        self.rebalance(parent);
    }

    /// Release the node
    /// Marks the node as unused in the node allocator
    fn release(&mut self, node: u32) {
        self.set_left(node, NIL);
        self.set_right(node, NIL);
        self.set_parent(node, NIL);
        self.set_height(node, 0);
        self.values[node as usize] = None;
        self.node_allocator.release(node);
    }

    /// Returns the least node under `node` or None if not found
    fn first(&self, mut node: u32) -> Option<u32> {
        if node == NIL {
            return None;
        }
        loop {
            let left = self.get_left(node);
            if left == NIL {
                break;
            }
            node = left;
        }
        Some(node)
    }

    /// Returns the least node that is strictly greater than `node` or None if not found
    fn next(&self, mut node: u32) -> Option<u32> {
        let right = self.get_right(node);
        if right != NIL {
            self.first(right)
        } else {
            let mut parent = self.get_parent(node);
            while parent != NIL && node == self.get_right(parent) {
                node = parent;
                parent = self.get_parent(parent);
            }
            node_id_to_option(parent)
        }
    }

    /// Swap the structural positions of two nodes. Values stay attached to
    /// their ids, so the two payloads trade places in the tree.
    fn swap(&mut self, node1: u32, node2: u32) {
        assert!(node1 != NIL && node2 != NIL);

        let parent1 = self.get_parent(node1);
        let parent2 = self.get_parent(node2);

        if parent1 != NIL {
            if node1 == self.get_left(parent1) {
                self.set_left(parent1, node2);
            } else {
                assert!(node1 == self.get_right(parent1));
                self.set_right(parent1, node2);
            }
        } else {
            assert!(self.root == node1);
            self.root = node2;
        }

        if parent2 != NIL {
            if node2 == self.get_left(parent2) {
                self.set_left(parent2, node1);
            } else {
                assert!(node2 == self.get_right(parent2));
                self.set_right(parent2, node1);
            }
        } else {
            assert!(self.root == node2);
            self.root = node1;
        }

        self.set_parent(node1, parent2);
        self.set_parent(node2, parent1);

        let left1 = self.get_left(node1);
        let left2 = self.get_left(node2);
        self.set_left(node1, left2);
        if left2 != NIL {
            self.set_parent(left2, node1);
        }
        self.set_left(node2, left1);
        if left1 != NIL {
            self.set_parent(left1, node2);
        }

        let right1 = self.get_right(node1);
        let right2 = self.get_right(node2);
        self.set_right(node1, right2);
        if right2 != NIL {
            self.set_parent(right2, node1);
        }
        self.set_right(node2, right1);
        if right1 != NIL {
            self.set_parent(right1, node2);
        }

        let height1 = self.get_height(node1);
        let height2 = self.get_height(node2);
        self.set_height(node1, height2);
        self.set_height(node2, height1);
    }

    /// Returns the balance of the node: height(left) - height(right)
    fn balance_factor(&self, node: u32) -> i16 {
        self.get_height(self.get_left(node)) as i16 - self.get_height(self.get_right(node)) as i16
    }

    /// Walk from `node` to the root, fixing heights and rotating wherever a
    /// subtree has tipped over to a balance factor of +-2.
    fn rebalance(&mut self, node: u32) {
        let mut n = node;
        while n != NIL {
            let p = self.get_parent(n);

            self.fix_height(n);

            match self.balance_factor(n) {
                -2 => {
                    let right = self.get_right(n);
                    if self.balance_factor(right) == 1 {
                        self.rotate_right(right);
                    }
                    self.rotate_left(n);
                }
                2 => {
                    let left = self.get_left(n);
                    if self.balance_factor(left) == -1 {
                        self.rotate_left(left);
                    }
                    self.rotate_right(n);
                }
                -1 | 0 | 1 => { // Balance is alright
                }
                factor => {
                    panic!("AVL tree has a balance factor of {}. This should not be possible. Please file a bug report", factor);
                }
            }

            n = p;
        }
    }

    /// Fix the height for a node
    fn fix_height(&mut self, node: u32) {
        let left_height = self.get_height(self.get_left(node));
        let right_height = self.get_height(self.get_right(node));
        self.set_height(node, 1 + u8::max(left_height, right_height));
    }

    /// Rotate the subtree under node `n` left
    fn rotate_left(&mut self, n: u32) {
        let r = self.get_right(n);
        let lr = self.get_left(r);

        self.set_right(n, lr);
        if lr != NIL {
            self.set_parent(lr, n);
        }

        let p = self.get_parent(n);
        self.set_parent(r, p);
        if p == NIL {
            self.root = r;
        } else if self.get_left(p) == n {
            self.set_left(p, r);
        } else {
            assert!(self.get_right(p) == n);
            self.set_right(p, r);
        }

        self.set_left(r, n);
        self.set_parent(n, r);
        self.fix_height(n);
        self.fix_height(self.get_parent(n));
    }

    /// Rotate the subtree under node `n` right
    fn rotate_right(&mut self, n: u32) {
        let l = self.get_left(n);
        let rl = self.get_right(l);

        self.set_left(n, rl);
        if rl != NIL {
            self.set_parent(rl, n);
        }

        let p = self.get_parent(n);
        self.set_parent(l, p);
        if p == NIL {
            self.root = l;
        } else if self.get_right(p) == n {
            self.set_right(p, l);
        } else {
            assert!(self.get_left(p) == n);
            self.set_left(p, l);
        }

        self.set_right(l, n);
        self.set_parent(n, l);
        self.fix_height(n);
        self.fix_height(self.get_parent(n));
    }
}

impl<T> AvlTree<T>
where
    T: Clone,
{
    /// Materialize the values in the given traversal order.
    pub fn traverse(&self, order: Order) -> Vec<T> {
        traversal::traverse(self, order)
    }

    /// The values in comparator order.
    pub fn values(&self) -> Vec<T> {
        self.traverse(Order::In)
    }
}

impl<T> Tree<T> for AvlTree<T> {
    fn root(&self) -> u32 {
        self.root
    }

    fn size(&self) -> usize {
        self.node_allocator.size() as usize
    }

    fn value(&self, node: u32) -> Option<&T> {
        self.values[node as usize].as_ref()
    }

    fn children(&self, node: u32) -> Vec<u32> {
        if node == NIL {
            return Vec::new();
        }
        vec![self.get_left(node), self.get_right(node)]
    }
}

impl<'a, T> IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = AvlTreeRefIterator<'a, T>;

    fn into_iter(self) -> AvlTreeRefIterator<'a, T> {
        AvlTreeRefIterator::new(self)
    }
}

/// Iterates the values in comparator order by following successor links.
pub struct AvlTreeRefIterator<'a, T> {
    current_node: Option<u32>,
    tree: &'a AvlTree<T>,
}

impl<'a, T> AvlTreeRefIterator<'a, T> {
    fn new(tree: &'a AvlTree<T>) -> Self {
        AvlTreeRefIterator {
            current_node: tree.first(tree.root),
            tree,
        }
    }
}

impl<'a, T> Iterator for AvlTreeRefIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let result = self.current_node;
        if let Some(current_node) = self.current_node {
            self.current_node = self.tree.next(current_node);
        }
        result.map(|node| self.tree.value_at(node))
    }
}
