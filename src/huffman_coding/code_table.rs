//! Per-symbol huffman codes, derived from the tree in one depth first walk.
//!
//! Codes grow as needed; a tree built from 256 symbols can be up to 255 levels deep.

use log::debug;
use std::fmt;

use super::huffman::{HuffmanTree, Node, NodeData};
use crate::tools::freq_count::FreqTable;

/// One code, root to leaf. `false` is a step left, `true` a step right.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn pop(&mut self) -> Option<bool> {
        self.bits.pop()
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Codes for all present symbols, indexed by symbol value.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl CodeTable {
    /// Walk the tree and record the path to every leaf. A tree that is a single
    /// leaf gives that symbol an empty code.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = vec![None; 256];
        if let Some(root) = tree.root() {
            let mut path = Code::new();
            return_leaves(root, &mut path, &mut codes);
        }
        Self { codes }
    }

    /// Code for a symbol, or None if the symbol was not in the tree.
    pub fn get(&self, sym: u8) -> Option<&Code> {
        self.codes[sym as usize].as_ref()
    }

    /// Symbols with codes, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(s, c)| c.as_ref().map(|c| (s as u8, c)))
    }

    /// Length of the longest code.
    pub fn max_len(&self) -> usize {
        self.iter().map(|(_, c)| c.len()).max().unwrap_or(0)
    }

    /// Number of body bits needed to encode data with these frequencies.
    pub fn encoded_bits(&self, freqs: &FreqTable) -> u64 {
        self.iter()
            .map(|(s, c)| freqs.count(s) as u64 * c.len() as u64)
            .sum()
    }
}

/// Recursively walk the tree, pushing 0 going left and 1 going right, and store the
/// path at each leaf.
fn return_leaves(node: &Node, path: &mut Code, codes: &mut [Option<Code>]) {
    match &node.node_data {
        NodeData::Kids(left, right) => {
            path.push(false);
            return_leaves(left, path, codes);
            path.pop();
            path.push(true);
            return_leaves(right, path, codes);
            path.pop();
        }
        NodeData::Leaf(sym) => {
            if path.is_empty() {
                debug!("Symbol 0x{:02x} is the only one and gets an empty code", sym);
            }
            codes[*sym as usize] = Some(path.clone());
        }
    }
}
