pub mod arena;
pub mod avl_tree;
pub mod binomial_heap;
pub mod comparator;
pub mod rb_tree;
pub mod traversal;
pub mod util;
