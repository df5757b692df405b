use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::io::{self, Read};

use crate::bitstream::bitreader::BitReader;
use crate::tools::freq_count::FreqTable;

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum NodeData {
    /// Left child (bit 0) and right child (bit 1).
    Kids(Box<Node>, Box<Node>),
    Leaf(u8),
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Node {
    pub weight: u64,
    pub node_data: NodeData,
}

impl Node {
    /// Create a leaf for one symbol
    pub fn leaf(sym: u8, weight: u64) -> Node {
        Node {
            weight,
            node_data: NodeData::Leaf(sym),
        }
    }

    /// Join two nodes. The first becomes the left child, the second the right.
    pub fn join(left: Node, right: Node) -> Node {
        Node {
            weight: left.weight + right.weight,
            node_data: NodeData::Kids(Box::new(left), Box::new(right)),
        }
    }

    /// Longest path from this node down to a leaf.
    pub fn depth(&self) -> usize {
        match &self.node_data {
            NodeData::Kids(left, right) => 1 + left.depth().max(right.depth()),
            NodeData::Leaf(_) => 0,
        }
    }
}

/// A node waiting in the build queue.
///
/// `rank` settles equal weights. Leaves rank 256 + symbol, so equal leaves leave the
/// queue in ascending symbol order. The k-th joined node ranks 255 - k, so a joined
/// node leaves before every leaf of the same weight and before any node joined
/// earlier with the same weight.
#[derive(Debug)]
struct Queued {
    rank: u16,
    node: Node,
}

impl Ord for Queued {
    /// Reverse order on (weight, rank) so the max-heap pops the lightest node.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .node
            .weight
            .cmp(&self.node.weight)
            .then_with(|| other.rank.cmp(&self.rank))
    }
}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Queued {}

const LEAF_RANK: u16 = 256;

/// Huffman tree over the symbols present in a frequency table. The tree owns all of
/// its nodes; an empty table gives an empty tree and a single symbol gives a lone leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Option<Node>,
}

impl HuffmanTree {
    /// Build the tree. Equal frequencies always resolve the same way, so an encoder
    /// and a decoder holding the same table build identical trees.
    pub fn build(freqs: &FreqTable) -> Self {
        let mut queue: BinaryHeap<Queued> = freqs
            .present()
            .map(|(sym, count)| Queued {
                rank: LEAF_RANK + sym as u16,
                node: Node::leaf(sym, count as u64),
            })
            .collect();

        // Pull off the two lightest nodes and queue their parent until one node is left.
        let mut joined: u16 = 0;
        while queue.len() > 1 {
            let (left, right) = match (queue.pop(), queue.pop()) {
                (Some(left), Some(right)) => (left.node, right.node),
                _ => break,
            };
            trace!(
                "Joining weights {} and {} as node {}",
                left.weight,
                right.weight,
                joined
            );
            queue.push(Queued {
                rank: LEAF_RANK - 1 - joined,
                node: Node::join(left, right),
            });
            joined += 1;
        }

        let root = queue.pop().map(|q| q.node);
        if let Some(node) = &root {
            debug!(
                "Built huffman tree: {} symbols, weight {}, depth {}",
                freqs.symbols(),
                node.weight,
                node.depth()
            );
        }
        Self { root }
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// Longest code length in the tree.
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, Node::depth)
    }

    /// Walk from the root one bit at a time (0 left, 1 right) and return the symbol
    /// at the leaf reached. A lone leaf is returned without reading any bits.
    /// Returns None if the tree is empty or the bits run out before a leaf.
    pub fn decode_symbol<R: Read>(&self, br: &mut BitReader<R>) -> io::Result<Option<u8>> {
        let mut node = match &self.root {
            Some(root) => root,
            None => return Ok(None),
        };
        loop {
            match &node.node_data {
                NodeData::Leaf(sym) => return Ok(Some(*sym)),
                NodeData::Kids(left, right) => {
                    node = match br.bit()? {
                        Some(false) => left.as_ref(),
                        Some(true) => right.as_ref(),
                        None => return Ok(None),
                    };
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{HuffmanTree, Node, NodeData};
    use crate::bitstream::bitreader::BitReader;
    use crate::tools::freq_count::FreqTable;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn table(pairs: &[(u8, u32)]) -> FreqTable {
        let mut counts = [0_u32; 256];
        pairs.iter().for_each(|&(s, c)| counts[s as usize] = c);
        FreqTable::from_counts(counts)
    }

    fn leaf(sym: u8, weight: u64) -> Node {
        Node::leaf(sym, weight)
    }

    #[test]
    fn empty_tree_test() {
        let tree = HuffmanTree::build(&FreqTable::default());
        assert_eq!(tree.root(), None);
        assert_eq!(tree.depth(), 0);
        let mut br = BitReader::new([0xff_u8].as_slice());
        assert_eq!(tree.decode_symbol(&mut br).unwrap(), None);
    }

    #[test]
    fn singleton_tree_test() {
        let tree = HuffmanTree::build(&table(&[(b'A', 100)]));
        assert_eq!(tree.root(), Some(&leaf(b'A', 100)));
        assert_eq!(tree.depth(), 0);
        // No bits are needed to reach the lone leaf.
        let mut br = BitReader::new(std::io::empty());
        assert_eq!(tree.decode_symbol(&mut br).unwrap(), Some(b'A'));
    }

    #[test]
    fn small_tree_test() {
        // C(2) and B(3) join first; the joined 5 goes ahead of A(5).
        let tree = HuffmanTree::build(&table(&[(b'A', 5), (b'B', 3), (b'C', 2)]));
        let expect = Node::join(Node::join(leaf(b'C', 2), leaf(b'B', 3)), leaf(b'A', 5));
        assert_eq!(tree.root(), Some(&expect));
    }

    #[test]
    fn equal_leaves_keep_symbol_order_test() {
        let tree = HuffmanTree::build(&table(&[(b'd', 1), (b'c', 1), (b'b', 1), (b'a', 1)]));
        // a+b join first, then c+d. The later node (c,d) sits ahead of (a,b).
        let expect = Node::join(
            Node::join(leaf(b'c', 1), leaf(b'd', 1)),
            Node::join(leaf(b'a', 1), leaf(b'b', 1)),
        );
        assert_eq!(tree.root(), Some(&expect));
    }

    #[test]
    fn joined_node_goes_before_equal_leaf_test() {
        // x(1)+y(1) = 2 is queued ahead of z(2), so it becomes the left child.
        let tree = HuffmanTree::build(&table(&[(b'x', 1), (b'y', 1), (b'z', 2)]));
        let expect = Node::join(Node::join(leaf(b'x', 1), leaf(b'y', 1)), leaf(b'z', 2));
        assert_eq!(tree.root(), Some(&expect));
    }

    #[test]
    fn skewed_tree_test() {
        // Weights 1, 1, 2, 4 ... 2^31 build a chain 32 levels deep.
        let mut pairs = vec![(0_u8, 1_u32)];
        for s in 1..=32_u8 {
            pairs.push((s, 1 << (s - 1)));
        }
        let tree = HuffmanTree::build(&table(&pairs));
        assert_eq!(tree.depth(), 32);
        let root = tree.root().unwrap();
        assert_eq!(root.weight, 1 << 32);
        match &root.node_data {
            NodeData::Kids(left, right) => {
                assert_eq!(**right, leaf(32, 1 << 31));
                assert!(matches!(left.node_data, NodeData::Kids(..)));
            }
            NodeData::Leaf(_) => panic!("root should not be a leaf"),
        }
    }

    #[test]
    fn decode_walk_test() {
        // Codes: C=00, B=01, A=1
        let tree = HuffmanTree::build(&table(&[(b'A', 5), (b'B', 3), (b'C', 2)]));
        let mut br = BitReader::new([0b1_01_00_1_00_u8, 0b0100_0000].as_slice());
        let mut out = vec![];
        for _ in 0..5 {
            out.push(tree.decode_symbol(&mut br).unwrap().unwrap());
        }
        assert_eq!(out, b"ABCAC");
        assert_eq!(tree.decode_symbol(&mut br).unwrap(), Some(b'B'));
    }

    #[test]
    fn rebuild_is_identical_test() {
        let freqs = FreqTable::from_bytes(b"she sells sea shells by the sea shore").unwrap();
        assert_eq!(HuffmanTree::build(&freqs), HuffmanTree::build(&freqs));
    }

    /// Reference build over an ordered list: a leaf is inserted after every node of
    /// equal weight, a joined node before every node of equal weight, and the two
    /// nodes at the head of the list are always joined first-left.
    fn sorted_list_build(freqs: &FreqTable) -> Option<Node> {
        let mut list: Vec<Node> = vec![];
        for (sym, count) in freqs.present() {
            let weight = count as u64;
            let at = list.iter().position(|n| weight < n.weight).unwrap_or(list.len());
            list.insert(at, leaf(sym, weight));
        }
        while list.len() > 1 {
            let left = list.remove(0);
            let right = list.remove(0);
            let joined = Node::join(left, right);
            let at = list
                .iter()
                .position(|n| joined.weight <= n.weight)
                .unwrap_or(list.len());
            list.insert(at, joined);
        }
        list.pop()
    }

    #[test]
    fn matches_sorted_list_build_test() {
        let mut rng = StdRng::seed_from_u64(0x7ee);
        for round in 0..3000 {
            let mut counts = [0_u32; 256];
            let symbols = rng.gen_range(1..=40);
            // Small weights give plenty of ties; every tenth table uses wide weights.
            let max_weight = if round % 10 == 0 { 100_000 } else { 6 };
            for _ in 0..symbols {
                let sym: u8 = rng.gen();
                counts[sym as usize] = rng.gen_range(1..=max_weight);
            }
            let freqs = FreqTable::from_counts(counts);
            let tree = HuffmanTree::build(&freqs);
            assert_eq!(
                tree.root(),
                sorted_list_build(&freqs).as_ref(),
                "round {}: {:?}",
                round,
                freqs.present().collect::<Vec<_>>()
            );
        }
        assert_eq!(sorted_list_build(&FreqTable::default()), None);
    }
}
