use crate::arena::NIL;
use std::collections::VecDeque;

/// Capability interface over any tree shape in the crate.
///
/// Nodes are arena ids. Binary trees report exactly two child slots
/// (`[left, right]`, `NIL`-filled); the binomial forest reports its
/// first-child/next-sibling encoding as `[child, sibling]`. The sentinel
/// reports no value and no children.
pub trait Tree<T> {
    /// Root node id, `NIL` when the tree is empty.
    fn root(&self) -> u32;

    /// Number of stored values.
    fn size(&self) -> usize;

    /// Payload of `node`, `None` for the sentinel.
    fn value(&self, node: u32) -> Option<&T>;

    /// Ordered child slots of `node`. Empty for the sentinel.
    fn children(&self, node: u32) -> Vec<u32>;
}

/// Traversal orders supported by [`traverse`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Order {
    Pre,
    In,
    Post,
    Level,
}

/// Walk `tree` in the given `order`, materializing the values.
/// Traversal never mutates the tree; calling it twice on an unmodified tree
/// yields identical sequences.
pub fn traverse<T, W>(tree: &W, order: Order) -> Vec<T>
where
    T: Clone,
    W: Tree<T>,
{
    match order {
        Order::Pre => pre_order(tree),
        Order::In => in_order(tree),
        Order::Post => post_order(tree),
        Order::Level => level_order(tree),
    }
}

/// Node first, then each child left to right.
pub fn pre_order<T, W>(tree: &W) -> Vec<T>
where
    T: Clone,
    W: Tree<T>,
{
    let mut values = Vec::with_capacity(tree.size());
    walk_pre(tree, tree.root(), &mut values);
    values
}

/// All children but the last, then the node, then the last child.
/// For binary trees: left subtree, node, right subtree.
pub fn in_order<T, W>(tree: &W) -> Vec<T>
where
    T: Clone,
    W: Tree<T>,
{
    let mut values = Vec::with_capacity(tree.size());
    walk_in(tree, tree.root(), &mut values);
    values
}

/// Each child left to right, then the node.
pub fn post_order<T, W>(tree: &W) -> Vec<T>
where
    T: Clone,
    W: Tree<T>,
{
    let mut values = Vec::with_capacity(tree.size());
    walk_post(tree, tree.root(), &mut values);
    values
}

/// Breadth-first via an explicit FIFO queue seeded with the root.
pub fn level_order<T, W>(tree: &W) -> Vec<T>
where
    T: Clone,
    W: Tree<T>,
{
    let mut values = Vec::with_capacity(tree.size());
    let mut queue = VecDeque::new();
    queue.push_back(tree.root());
    while let Some(node) = queue.pop_front() {
        if let Some(value) = tree.value(node) {
            values.push(value.clone());
        }
        for child in tree.children(node) {
            if child != NIL {
                queue.push_back(child);
            }
        }
    }
    values
}

fn walk_pre<T, W>(tree: &W, node: u32, values: &mut Vec<T>)
where
    T: Clone,
    W: Tree<T>,
{
    if let Some(value) = tree.value(node) {
        values.push(value.clone());
    }
    for child in tree.children(node) {
        walk_pre(tree, child, values);
    }
}

fn walk_in<T, W>(tree: &W, node: u32, values: &mut Vec<T>)
where
    T: Clone,
    W: Tree<T>,
{
    let children = tree.children(node);
    match children.split_last() {
        Some((last, rest)) => {
            for child in rest {
                walk_in(tree, *child, values);
            }
            if let Some(value) = tree.value(node) {
                values.push(value.clone());
            }
            walk_in(tree, *last, values);
        }
        None => {
            if let Some(value) = tree.value(node) {
                values.push(value.clone());
            }
        }
    }
}

fn walk_post<T, W>(tree: &W, node: u32, values: &mut Vec<T>)
where
    T: Clone,
    W: Tree<T>,
{
    for child in tree.children(node) {
        walk_post(tree, child, values);
    }
    if let Some(value) = tree.value(node) {
        values.push(value.clone());
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Hand-built binary tree:
    ///
    /// ```text
    ///       a
    ///      / \
    ///     b   c
    ///    / \
    ///   d   e
    /// ```
    struct Fixture {
        root: u32,
        values: Vec<Option<char>>,
        children: Vec<Vec<u32>>,
    }

    impl Tree<char> for Fixture {
        fn root(&self) -> u32 {
            self.root
        }

        fn size(&self) -> usize {
            self.values.iter().filter(|v| v.is_some()).count()
        }

        fn value(&self, node: u32) -> Option<&char> {
            self.values[node as usize].as_ref()
        }

        fn children(&self, node: u32) -> Vec<u32> {
            self.children[node as usize].clone()
        }
    }

    fn fixture() -> Fixture {
        Fixture {
            root: 1,
            values: vec![None, Some('a'), Some('b'), Some('c'), Some('d'), Some('e')],
            children: vec![
                vec![],
                vec![2, 3],
                vec![4, 5],
                vec![NIL, NIL],
                vec![NIL, NIL],
                vec![NIL, NIL],
            ],
        }
    }

    fn empty_fixture() -> Fixture {
        Fixture {
            root: NIL,
            values: vec![None],
            children: vec![vec![]],
        }
    }

    #[test]
    fn pre_order_emits_node_before_children() {
        assert_eq!(pre_order(&fixture()), vec!['a', 'b', 'd', 'e', 'c']);
    }

    #[test]
    fn in_order_emits_node_between_children() {
        assert_eq!(in_order(&fixture()), vec!['d', 'b', 'e', 'a', 'c']);
    }

    #[test]
    fn post_order_emits_node_after_children() {
        assert_eq!(post_order(&fixture()), vec!['d', 'e', 'b', 'c', 'a']);
    }

    #[test]
    fn level_order_emits_breadth_first() {
        assert_eq!(level_order(&fixture()), vec!['a', 'b', 'c', 'd', 'e']);
    }

    #[test]
    fn traverse_dispatches_on_order() {
        let tree = fixture();
        assert_eq!(traverse(&tree, Order::Pre), pre_order(&tree));
        assert_eq!(traverse(&tree, Order::In), in_order(&tree));
        assert_eq!(traverse(&tree, Order::Post), post_order(&tree));
        assert_eq!(traverse(&tree, Order::Level), level_order(&tree));
    }

    #[test]
    fn traversal_is_restartable() {
        let tree = fixture();
        assert_eq!(in_order(&tree), in_order(&tree));
        assert_eq!(level_order(&tree), level_order(&tree));
    }

    #[test]
    fn empty_tree_yields_no_values() {
        let tree = empty_fixture();
        assert_eq!(pre_order(&tree), Vec::<char>::new());
        assert_eq!(in_order(&tree), Vec::<char>::new());
        assert_eq!(post_order(&tree), Vec::<char>::new());
        assert_eq!(level_order(&tree), Vec::<char>::new());
    }
}
