use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::{debug, trace};

use crate::bits::parse_bit;
use crate::code::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::node::{Node, NodeId, NodeType};

/// Queue entry for the merge loop. Lowest frequency pops first; among equal
/// frequencies the node created earlier (lower arena index) pops first.
#[derive(Debug, PartialEq, Eq)]
struct Pending {
    freq: usize,
    id: NodeId,
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .freq
            .cmp(&self.freq)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A built Huffman tree: an arena of nodes, the root handle, and the code
/// table derived from it. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
    codes: CodeTable,
}

impl HuffmanTree {
    /// Counts `bytes` and builds a tree from the counts.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let frequencies = FrequencyTable::from_bytes(bytes)?;
        Self::from_frequencies(&frequencies)
    }

    /// Builds the tree by repeatedly merging the two lightest nodes. The
    /// heavier of the pair becomes the left child; on equal weight the one
    /// popped first does.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(HuffmanError::EmptyInput);
        }

        // Leaves go in by ascending symbol, so their arena index doubles as
        // the tie-break order.
        let mut nodes: Vec<Node> = frequencies
            .iter()
            .filter(|&(_, freq)| freq > 0)
            .map(|(symbol, freq)| Node::new_leaf(symbol, freq))
            .collect();

        let mut pqueue: BinaryHeap<Pending> = nodes
            .iter()
            .enumerate()
            .map(|(index, node)| Pending {
                freq: node.freq,
                id: NodeId(index),
            })
            .collect();

        while pqueue.len() > 1 {
            let first = pqueue.pop().expect("checked with while loop condition");
            let second = pqueue.pop().expect("checked with while loop condition");

            let (left, right) = if first.freq < second.freq {
                (second, first)
            } else {
                (first, second)
            };

            let id = NodeId(nodes.len());
            let freq = left.freq + right.freq;
            nodes.push(Node::new_internal(left.id, right.id, freq));
            pqueue.push(Pending { freq, id });
        }

        let root = pqueue.pop().ok_or(HuffmanError::EmptyInput)?.id;
        let codes = CodeTable::derive(&nodes, root);

        let tree = Self { nodes, root, codes };
        debug!(
            symbols = tree.len(),
            depth = tree.depth(),
            total = tree.total_frequency(),
            "built huffman tree"
        );
        for (symbol, code) in tree.codes.iter() {
            trace!(symbol, code, "assigned code");
        }

        Ok(tree)
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn root(&self) -> &Node {
        self.node(self.root)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    pub fn code(&self, symbol: u8) -> Result<&str> {
        self.codes.get(symbol)
    }

    /// Alphabet size.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn total_frequency(&self) -> usize {
        self.root().freq
    }

    /// Longest code length in bits.
    pub fn depth(&self) -> usize {
        self.codes.iter().map(|(_, code)| code.len()).max().unwrap_or(0)
    }

    /// Frequencies recovered from the leaves. Rebuilding from this table
    /// yields an identical tree.
    pub fn frequencies(&self) -> FrequencyTable {
        let mut table = FrequencyTable::new();
        for node in &self.nodes {
            if let NodeType::Leaf(symbol) = node.node_type {
                // Leaves were built from a validated table.
                let _ = table.add(symbol, node.freq);
            }
        }
        table
    }

    /// Code bits needed to encode the input the tree was built from.
    pub fn encoded_bits(&self) -> usize {
        self.nodes
            .iter()
            .filter_map(|node| {
                let symbol = node.symbol()?;
                let code = self.codes.get(symbol).ok()?;
                Some(node.freq * code.len())
            })
            .sum()
    }

    /// Walks from the root consuming one bit per edge until a leaf. Returns
    /// the symbol and the number of bits consumed, or `None` if the bits run
    /// out first. A lone root leaf accepts exactly one `0` bit.
    pub fn walk<I>(&self, bits: &mut I) -> Option<(u8, usize)>
    where
        I: Iterator<Item = bool>,
    {
        let mut current = self.root();

        if let NodeType::Leaf(symbol) = current.node_type {
            return match bits.next()? {
                false => Some((symbol, 1)),
                true => None,
            };
        }

        let mut consumed = 0;
        loop {
            match current.node_type {
                NodeType::Leaf(symbol) => return Some((symbol, consumed)),
                NodeType::Internal(left, right) => {
                    let bit = bits.next()?;
                    consumed += 1;
                    current = self.node(if bit { right } else { left });
                }
            }
        }
    }

    /// Matches the leading code of a `'0'`/`'1'` string. Returns the symbol
    /// and the length of the matched code.
    pub fn match_prefix(&self, bits: &str) -> Result<(u8, usize)> {
        let parsed = bits.chars().map(parse_bit).collect::<Result<Vec<bool>>>()?;
        self.walk(&mut parsed.into_iter())
            .ok_or(HuffmanError::InvalidCode { offset: 0 })
    }
}
