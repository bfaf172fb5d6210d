//! Huffman tree construction and code table derivation.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;

use log::trace;

use crate::error::{CodecError, Result};
use crate::frequency::FrequencyCharPair;


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {

    Internal { frequency: u64, left: Box<Node>, right: Box<Node> },
    Leaf { frequency: u64, character: Option<char> },

}

impl Node {

    pub const fn frequency(&self) -> u64 {
        match self {
            Node::Internal { frequency, .. } |
            Node::Leaf { frequency, .. }
                => *frequency
        }
    }


    pub const fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

}


/// Code of a single symbol, read from the root: `false` goes left, `true` goes right
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Code {

    bits: Vec<bool>

}

impl Code {

    pub const fn new_empty() -> Self {
        Self {
            bits: Vec::new()
        }
    }


    pub fn step_left(&self) -> Self {
        self.step(false)
    }


    pub fn step_right(&self) -> Self {
        self.step(true)
    }


    fn step(&self, bit: bool) -> Self {
        let mut bits = Vec::with_capacity(self.bits.len() + 1);
        bits.extend_from_slice(&self.bits);
        bits.push(bit);
        Self { bits }
    }


    pub fn len(&self) -> usize {
        self.bits.len()
    }


    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }


    pub fn iter_bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }


    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
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


/// Maps every symbol of a tree, the terminator included, to its code
pub type CodeTable = HashMap<Option<char>, Code>;


/// Priority queue item. Ordered by frequency, then leaves before internal nodes,
/// then by the order in which items entered the queue.
struct QueueItem {

    node: Node,
    sequence: usize

}

impl QueueItem {

    fn key(&self) -> (u64, bool, usize) {
        (self.node.frequency(), !self.node.is_leaf(), self.sequence)
    }

}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so that BinaryHeap pops the smallest key
        other.key().cmp(&self.key())
    }
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {

    root: Node

}

impl HuffmanTree {

    /// Builds the tree by repeatedly merging the two lowest-priority items.
    /// The same pair list always yields the same tree.
    pub fn build(pairs: &[FrequencyCharPair]) -> Result<Self> {

        let mut queue: BinaryHeap<QueueItem> = pairs.iter()
            .enumerate()
            .map(|(sequence, pair)| QueueItem {
                node: Node::Leaf { frequency: u64::from(pair.frequency), character: pair.character },
                sequence
            })
            .collect();

        let mut sequence = pairs.len();

        let root = loop {

            let left = queue.pop().ok_or(CodecError::EmptyAlphabet)?;
            let Some(right) = queue.pop() else {
                break left.node;
            };

            let frequency = left.node.frequency() + right.node.frequency();
            trace!("merging {} + {} into internal node #{sequence}", left.node.frequency(), right.node.frequency());

            queue.push(QueueItem {
                node: Node::Internal {
                    frequency,
                    left: Box::new(left.node),
                    right: Box::new(right.node)
                },
                sequence
            });

            sequence += 1;
        };

        Ok(Self { root })
    }


    pub const fn root(&self) -> &Node {
        &self.root
    }


    /// Walks the tree with an explicit stack. A tree made of a single leaf has no codes.
    pub fn code_table(&self) -> CodeTable {

        let mut table = CodeTable::new();

        if self.root.is_leaf() {
            return table;
        }

        let mut stack = vec![(&self.root, Code::new_empty())];

        while let Some((node, code)) = stack.pop() {

            match node {

                Node::Internal { left, right, .. } => {
                    stack.push((right, code.step_right()));
                    stack.push((left, code.step_left()));
                },

                Node::Leaf { character, .. } => {
                    table.insert(*character, code);
                },
            }
        }

        table
    }

}
