/// Indicates an absent node without the overhead of Some/None.
/// Slot 0 of every arena is reserved so that `NIL` doubles as the shared
/// sentinel: its value column entry is permanently `None`.
pub const NIL: u32 = 0;

/// Converts a raw node id into an option
/// None if node == NIL
/// Some(node) otherwise
pub fn node_id_to_option(node: u32) -> Option<u32> {
    if node != NIL {
        Some(node)
    } else {
        None
    }
}

/// Allocates ids either by creating a new id or using a released/marked as unused id
#[derive(Clone, Debug)]
pub struct NodeAllocator {
    /// The next node id which will be allocated.
    next_node: u32,
    /// Vector of released nodes. Used as a stack.
    released_nodes: Vec<u32>,
}

impl NodeAllocator {
    pub fn new() -> Self {
        NodeAllocator {
            next_node: NIL + 1,
            released_nodes: Vec::new(),
        }
    }

    /// Returns a new node
    /// Either generates a new value or uses a released node
    pub fn new_node(&mut self) -> u32 {
        match self.released_nodes.pop() {
            Some(node) => node,
            None => {
                assert!(self.next_node < u32::MAX);
                let node = self.next_node;
                self.next_node += 1;
                node
            }
        }
    }

    /// Mark a node for reuse
    /// # Arguments
    /// `node` The node to release
    pub fn release(&mut self, node: u32) {
        assert!(node != NIL && node < self.next_node);
        self.released_nodes.push(node);
    }

    /// Number of live nodes
    pub fn size(&self) -> u32 {
        self.next_node - self.released_nodes.len() as u32 - 1
    }
}

impl Default for NodeAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn allocates_from_one_and_recycles() {
        let mut allocator = NodeAllocator::new();
        assert_eq!(allocator.new_node(), 1);
        assert_eq!(allocator.new_node(), 2);
        assert_eq!(allocator.size(), 2);

        allocator.release(1);
        assert_eq!(allocator.size(), 1);
        assert_eq!(allocator.new_node(), 1);
        assert_eq!(allocator.size(), 2);
    }

    #[test]
    fn nil_converts_to_none() {
        assert_eq!(node_id_to_option(NIL), None);
        assert_eq!(node_id_to_option(7), Some(7));
    }
}
