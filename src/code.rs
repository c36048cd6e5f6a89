use std::collections::BTreeMap;

use crate::error::{HuffmanError, Result};
use crate::node::{Node, NodeId, NodeType};

/// Symbol to bit-code mapping derived from a tree. Codes are strings of
/// `'0'` and `'1'`, most significant (closest to the root) first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    by_symbol: BTreeMap<u8, String>,
}

impl CodeTable {
    /// Walks the tree depth first, `'0'` going left and `'1'` going right.
    /// A lone root leaf gets the code `"0"` so each symbol still costs a bit.
    pub(crate) fn derive(nodes: &[Node], root: NodeId) -> Self {
        let mut by_symbol = BTreeMap::new();

        if let NodeType::Leaf(symbol) = nodes[root.index()].node_type {
            by_symbol.insert(symbol, String::from("0"));
            return Self { by_symbol };
        }

        let mut stack = vec![(root, String::new())];
        while let Some((id, code)) = stack.pop() {
            match nodes[id.index()].node_type {
                NodeType::Leaf(symbol) => {
                    by_symbol.insert(symbol, code);
                }
                NodeType::Internal(left, right) => {
                    stack.push((right, format!("{code}1")));
                    stack.push((left, format!("{code}0")));
                }
            }
        }

        Self { by_symbol }
    }

    pub fn get(&self, symbol: u8) -> Result<&str> {
        self.by_symbol
            .get(&symbol)
            .map(String::as_str)
            .ok_or(HuffmanError::SymbolNotFound(symbol))
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.by_symbol.contains_key(&symbol)
    }

    /// Exact reverse lookup. Decoding walks the tree instead.
    pub fn symbol(&self, code: &str) -> Option<u8> {
        self.by_symbol
            .iter()
            .find(|(_, c)| c.as_str() == code)
            .map(|(&symbol, _)| symbol)
    }

    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }

    /// Entries in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> {
        self.by_symbol
            .iter()
            .map(|(&symbol, code)| (symbol, code.as_str()))
    }

    /// Entries ordered by code length, then symbol. Shortest codes come
    /// first, which is how the table is reported.
    pub fn by_length(&self) -> Vec<(u8, &str)> {
        let mut entries: Vec<(u8, &str)> = self.iter().collect();
        entries.sort_by_key(|&(symbol, code)| (code.len(), symbol));
        entries
    }
}

/// Printable label for a symbol; whitespace and control bytes show their
/// numeric value as `<n>`.
pub fn display_symbol(symbol: u8) -> String {
    let ch = symbol as char;
    if ch.is_whitespace() || ch.is_control() {
        format!("<{symbol}>")
    } else {
        ch.to_string()
    }
}
