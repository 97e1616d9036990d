use crate::arena::{NodeAllocator, NIL};
use crate::comparator::Comparator;
use crate::traversal::{self, Order, Tree};
use std::cmp::Ordering;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

/// Self-balancing binary search tree maintaining the red-black invariants:
/// the root is black, a red node never has a red child, and every path from a
/// node down to the sentinel crosses the same number of black nodes.
///
/// Nodes are arena-allocated like [`crate::avl_tree::AvlTree`]; slot 0 is the
/// shared black sentinel standing in for every "nil" leaf and for the parent
/// of the root. All nil tests compare ids against `NIL`, never against a
/// language-level null.
#[derive(Clone, Debug)]
pub struct RbTree<T> {
    node_allocator: NodeAllocator,
    root: u32,
    parent: Vec<u32>,
    left: Vec<u32>,
    right: Vec<u32>,
    color: Vec<Color>,
    values: Vec<Option<T>>,
    compare: Comparator<T>,
}

impl<T> RbTree<T> {
    pub fn new(compare: Comparator<T>) -> Self {
        Self::with_capacity(compare, 16)
    }

    pub fn with_capacity(compare: Comparator<T>, capacity: usize) -> Self {
        let mut tree = RbTree {
            node_allocator: NodeAllocator::new(),
            root: NIL,
            parent: Vec::with_capacity(capacity),
            left: Vec::with_capacity(capacity),
            right: Vec::with_capacity(capacity),
            color: Vec::with_capacity(capacity),
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
    /// The extra slots are filled with NIL links, black color and None values
    fn resize(&mut self, new_capacity: usize) {
        self.parent.resize(new_capacity, NIL);
        self.left.resize(new_capacity, NIL);
        self.right.resize(new_capacity, NIL);
        self.color.resize(new_capacity, Color::Black);
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

    // No NIL guard here: the sentinel's parent is written transiently during
    // removal, exactly as CLRS permits for T.nil.
    #[inline]
    fn set_parent(&mut self, node: u32, item: u32) {
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
    fn get_color(&self, node: u32) -> Color {
        self.color[node as usize]
    }

    #[inline]
    fn set_color(&mut self, node: u32, item: Color) {
        // The sentinel is permanently black; forcing it black is a no-op
        if node == NIL {
            assert!(item == Color::Black);
            return;
        }
        self.color[node as usize] = item;
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
        self.color.clear();
        self.values.clear();
        self.resize(capacity);
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

    /// Insert `value` as a red node at the usual BST position, then repair
    /// the color invariants. Returns false and leaves the tree untouched when
    /// an equal value is already present.
    pub fn insert(&mut self, value: T) -> bool {
        let mut node = self.root;
        let mut parent = NIL;
        let mut comparison = Ordering::Equal;
        while node != NIL {
            parent = node;
            comparison = (self.compare)(&value, self.value_at(node));
            node = match comparison {
                Ordering::Less => self.get_left(node),
                Ordering::Greater => self.get_right(node),
                Ordering::Equal => return false,
            };
        }

        let node = self.allocate();
        self.values[node as usize] = Some(value);
        self.color[node as usize] = Color::Red;
        self.set_left(node, NIL);
        self.set_right(node, NIL);
        self.set_parent(node, parent);

        if parent == NIL {
            self.root = node;
        } else if comparison == Ordering::Less {
            self.set_left(parent, node);
        } else {
            self.set_right(parent, node);
        }

        self.fix_post_insert(node);
        true
    }

    /// Repair the invariants after inserting the red node `n`:
    /// - case 1: red uncle, recolor and continue from the grandparent
    /// - case 2: black uncle and a triangle shape, rotate the parent away
    ///   from `n` to fall through to case 3
    /// - case 3: black uncle and a line shape, recolor and rotate the
    ///   grandparent away from the parent
    /// The root is forced black unconditionally at the end.
    fn fix_post_insert(&mut self, n: u32) {
        let mut node = n;
        while self.get_color(self.get_parent(node)) == Color::Red {
            let parent = self.get_parent(node);
            let grandparent = self.get_parent(parent);
            if parent == self.get_left(grandparent) {
                let uncle = self.get_right(grandparent);
                if self.get_color(uncle) == Color::Red {
                    // case 1
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    if node == self.get_right(parent) {
                        // case 2
                        node = parent;
                        self.left_rotate(node);
                    }
                    // case 3
                    let parent = self.get_parent(node);
                    let grandparent = self.get_parent(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.right_rotate(grandparent);
                }
            } else {
                let uncle = self.get_left(grandparent);
                if self.get_color(uncle) == Color::Red {
                    // case 1
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    if node == self.get_left(parent) {
                        // case 2
                        node = parent;
                        self.right_rotate(node);
                    }
                    // case 3
                    let parent = self.get_parent(node);
                    let grandparent = self.get_parent(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.left_rotate(grandparent);
                }
            }
        }
        self.set_color(self.root, Color::Black);
    }

    /// Remove the node comparing equal to `value`.
    /// Removing an absent value is a no-op returning false.
    pub fn remove(&mut self, value: &T) -> bool {
        let removed = self.find(value);
        if removed == NIL {
            return false;
        }
        self.remove_node(removed);
        true
    }

    fn remove_node(&mut self, removed: u32) {
        let mut successor = removed;
        let mut successor_color = self.get_color(successor);
        let replacement;

        if self.get_left(removed) == NIL {
            // case 1: left subtree is nil
            replacement = self.get_right(removed);
            self.transplant(removed, replacement);
        } else if self.get_right(removed) == NIL {
            // case 2: right subtree is nil
            replacement = self.get_left(removed);
            self.transplant(removed, replacement);
        } else {
            // case 3: neither subtree is nil, detach the in-order successor
            // and re-attach it in the removed node's position and color
            successor = self.minimum(self.get_right(removed));
            successor_color = self.get_color(successor);
            replacement = self.get_right(successor);

            if successor != self.get_right(removed) {
                self.transplant(successor, self.get_right(successor));
                let right = self.get_right(removed);
                self.set_right(successor, right);
                self.set_parent(right, successor);
            } else {
                // replacement may be the sentinel, its parent matters to the fixup
                self.set_parent(replacement, successor);
            }

            self.transplant(removed, successor);
            let left = self.get_left(removed);
            self.set_left(successor, left);
            self.set_parent(left, successor);
            self.set_color(successor, self.get_color(removed));
        }

        if successor_color == Color::Black {
            self.fix_post_remove(replacement);
        }
        self.release(removed);
    }

    /// Repair the invariants after a black node left the tree, starting from
    /// the node now occupying the deficient slot (possibly the sentinel).
    /// Per side there are four sibling cases: red sibling, both nephews
    /// black, near nephew red and far nephew red.
    fn fix_post_remove(&mut self, n: u32) {
        let mut node = n;
        while node != self.root && self.get_color(node) == Color::Black {
            let parent = self.get_parent(node);
            if node == self.get_left(parent) {
                let mut sibling = self.get_right(parent);
                if self.get_color(sibling) == Color::Red {
                    // case 1
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.left_rotate(parent);
                    sibling = self.get_right(parent);
                }
                if self.get_color(self.get_left(sibling)) == Color::Black
                    && self.get_color(self.get_right(sibling)) == Color::Black
                {
                    // case 2: move the deficiency up
                    self.set_color(sibling, Color::Red);
                    node = parent;
                } else {
                    if self.get_color(self.get_right(sibling)) == Color::Black {
                        // case 3
                        self.set_color(self.get_left(sibling), Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.right_rotate(sibling);
                        sibling = self.get_right(parent);
                    }
                    // case 4
                    self.set_color(sibling, self.get_color(parent));
                    self.set_color(parent, Color::Black);
                    self.set_color(self.get_right(sibling), Color::Black);
                    self.left_rotate(parent);
                    node = self.root;
                }
            } else {
                let mut sibling = self.get_left(parent);
                if self.get_color(sibling) == Color::Red {
                    // case 1
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.right_rotate(parent);
                    sibling = self.get_left(parent);
                }
                if self.get_color(self.get_right(sibling)) == Color::Black
                    && self.get_color(self.get_left(sibling)) == Color::Black
                {
                    // case 2
                    self.set_color(sibling, Color::Red);
                    node = parent;
                } else {
                    if self.get_color(self.get_left(sibling)) == Color::Black {
                        // case 3
                        self.set_color(self.get_right(sibling), Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.left_rotate(sibling);
                        sibling = self.get_left(parent);
                    }
                    // case 4
                    self.set_color(sibling, self.get_color(parent));
                    self.set_color(parent, Color::Black);
                    self.set_color(self.get_left(sibling), Color::Black);
                    self.right_rotate(parent);
                    node = self.root;
                }
            }
        }
        self.set_color(node, Color::Black);
    }

    /// Rewire `original`'s parent to point at `replacement` in `original`'s
    /// former slot. `replacement`'s own children are the caller's
    /// responsibility.
    fn transplant(&mut self, original: u32, replacement: u32) {
        let parent = self.get_parent(original);
        if parent == NIL {
            self.root = replacement;
        } else if original == self.get_left(parent) {
            self.set_left(parent, replacement);
        } else {
            self.set_right(parent, replacement);
        }
        self.set_parent(replacement, parent);
    }

    fn minimum(&self, mut node: u32) -> u32 {
        while self.get_left(node) != NIL {
            node = self.get_left(node);
        }
        node
    }

    /// Rotate the subtree under node `n` left
    fn left_rotate(&mut self, n: u32) {
        let new_root = self.get_right(n);
        let carried = self.get_left(new_root);

        self.set_right(n, carried);
        if carried != NIL {
            self.set_parent(carried, n);
        }

        let p = self.get_parent(n);
        self.set_parent(new_root, p);
        if p == NIL {
            self.root = new_root;
        } else if self.get_left(p) == n {
            self.set_left(p, new_root);
        } else {
            assert!(self.get_right(p) == n);
            self.set_right(p, new_root);
        }

        self.set_left(new_root, n);
        self.set_parent(n, new_root);
    }

    /// Rotate the subtree under node `n` right
    fn right_rotate(&mut self, n: u32) {
        let new_root = self.get_left(n);
        let carried = self.get_right(new_root);

        self.set_left(n, carried);
        if carried != NIL {
            self.set_parent(carried, n);
        }

        let p = self.get_parent(n);
        self.set_parent(new_root, p);
        if p == NIL {
            self.root = new_root;
        } else if self.get_right(p) == n {
            self.set_right(p, new_root);
        } else {
            assert!(self.get_left(p) == n);
            self.set_left(p, new_root);
        }

        self.set_right(new_root, n);
        self.set_parent(n, new_root);
    }

    /// Release the node
    /// Marks the node as unused in the node allocator
    fn release(&mut self, node: u32) {
        self.set_left(node, NIL);
        self.set_right(node, NIL);
        self.set_parent(node, NIL);
        self.color[node as usize] = Color::Black;
        self.values[node as usize] = None;
        self.node_allocator.release(node);
    }
}

impl<T> RbTree<T>
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

impl<T> Tree<T> for RbTree<T> {
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
