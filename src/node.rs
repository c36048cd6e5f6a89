/// Handle to a node stored in a tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    Leaf(u8),
    Internal(NodeId, NodeId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub node_type: NodeType,
    pub freq: usize,
}

impl Node {
    pub fn new_leaf(symbol: u8, freq: usize) -> Self {
        Node {
            node_type: NodeType::Leaf(symbol),
            freq,
        }
    }

    /// The caller passes the children's combined frequency; the arena owns
    /// the children themselves.
    pub fn new_internal(left: NodeId, right: NodeId, freq: usize) -> Self {
        Node {
            node_type: NodeType::Internal(left, right),
            freq,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node_type, NodeType::Leaf(_))
    }

    pub fn symbol(&self) -> Option<u8> {
        match self.node_type {
            NodeType::Leaf(symbol) => Some(symbol),
            NodeType::Internal(..) => None,
        }
    }

    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        match self.node_type {
            NodeType::Leaf(_) => None,
            NodeType::Internal(left, right) => Some((left, right)),
        }
    }
}
