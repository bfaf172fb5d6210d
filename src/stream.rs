//! Data section: symbols to packed bits and back.

use std::iter;

use log::warn;

use crate::bitvec::{BitIterator, BitVec};
use crate::config::BitOrder;
use crate::error::{CodecError, Result};
use crate::tree::{CodeTable, Node};


/// Packs `text` followed by the terminator. An empty table (single-leaf tree) packs to nothing.
pub fn pack(text: &str, table: &CodeTable, order: BitOrder) -> Result<Vec<u8>> {

    if table.is_empty() {
        return Ok(Vec::new());
    }

    let mut bits = BitVec::new(order);

    for symbol in text.chars().map(Some).chain([None]) {

        let code = table.get(&symbol)
            .ok_or(CodecError::UnknownSymbol { character: symbol })?;

        bits.extend_from_bits(code.iter_bits())?;
    }

    Ok(bits.into_bytes())
}


/// Walks the tree bit by bit until the terminator leaf is reached. Bits after it are ignored.
///
/// A single-leaf tree has no codes: a terminator leaf decodes to nothing, a character leaf
/// repeats as often as its frequency says, and `data` is not read.
pub fn unpack(root: &Node, data: &[u8], order: BitOrder) -> Result<String> {

    let (root_left, root_right) = match root {

        Node::Internal { left, right, .. } => (left, right),

        Node::Leaf { frequency, character } => {

            if !data.is_empty() {
                warn!("ignoring {} data bytes after a single-symbol tree", data.len());
            }

            return Ok(match character {
                Some(ch) => iter::repeat(*ch).take(*frequency as usize).collect(),
                None => String::new(),
            });
        },
    };

    let mut decoded = String::new();
    let mut decoded_count = 0;
    let (mut left, mut right) = (root_left, root_right);

    for bit in BitIterator::new(data, order) {

        let next_node: &Node = if bit? { right } else { left };

        match next_node {

            Node::Internal { left: next_left, right: next_right, .. } => {
                left = next_left;
                right = next_right;
            },

            Node::Leaf { character: None, .. } => {
                return Ok(decoded);
            },

            Node::Leaf { character: Some(ch), .. } => {
                decoded.push(*ch);
                decoded_count += 1;
                left = root_left;
                right = root_right;
            },
        }
    }

    Err(CodecError::TruncatedStream { decoded: decoded_count })
}


#[cfg(test)]
mod tests {

    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::frequency::{count_frequencies, format_pairs, to_pairs, FrequencyCharPair, PairOrder};
    use crate::tree::HuffmanTree;


    fn tree_for(text: &str) -> HuffmanTree {
        let pairs = format_pairs(to_pairs(&count_frequencies(text)).unwrap(), PairOrder::Sorted);
        HuffmanTree::build(&pairs).unwrap()
    }


    #[test]
    fn known_bytes() {

        let tree = tree_for("aabbc");
        let packed = pack("aabbc", &tree.code_table(), BitOrder::MsbFirst).unwrap();

        // 11 11 0 0 101 100, padded with zeros
        assert_eq!(packed, [0b1111_0010, 0b1100_0000]);
        assert_eq!(unpack(tree.root(), &packed, BitOrder::MsbFirst).unwrap(), "aabbc");
    }


    #[test]
    fn empty_table_packs_nothing() {
        assert!(pack("", &CodeTable::new(), BitOrder::MsbFirst).unwrap().is_empty());
    }


    #[test]
    fn unknown_symbol() {

        let tree = tree_for("ab");

        let result = pack("abc", &tree.code_table(), BitOrder::MsbFirst);
        assert!(matches!(result, Err(CodecError::UnknownSymbol { character: Some('c') })));
    }


    #[test]
    fn stops_at_terminator() {

        let tree = tree_for("aabbc");
        let mut packed = pack("aabbc", &tree.code_table(), BitOrder::MsbFirst).unwrap();
        packed.extend_from_slice(&[0xFF, 0xFF]);

        assert_eq!(unpack(tree.root(), &packed, BitOrder::MsbFirst).unwrap(), "aabbc");
    }


    #[test]
    fn missing_terminator_is_truncation() {

        let tree = tree_for("aabbc");
        let packed = pack("aabbc", &tree.code_table(), BitOrder::MsbFirst).unwrap();

        let result = unpack(tree.root(), &packed[..1], BitOrder::MsbFirst);
        assert!(matches!(result, Err(CodecError::TruncatedStream { decoded: 4 })));

        let result = unpack(tree.root(), &[], BitOrder::MsbFirst);
        assert!(matches!(result, Err(CodecError::TruncatedStream { decoded: 0 })));
    }


    #[test]
    fn terminator_only_tree_decodes_to_nothing() {

        let tree = HuffmanTree::build(&[FrequencyCharPair::TERMINATOR]).unwrap();

        assert_eq!(unpack(tree.root(), &[0x00], BitOrder::MsbFirst).unwrap(), "");
        assert_eq!(unpack(tree.root(), &[], BitOrder::MsbFirst).unwrap(), "");
    }


    #[test]
    fn character_leaf_repeats_by_frequency() {

        let tree = HuffmanTree::build(&[FrequencyCharPair::new(4, 'z')]).unwrap();

        assert!(tree.code_table().is_empty());
        assert_eq!(unpack(tree.root(), &[], BitOrder::MsbFirst).unwrap(), "zzzz");
        assert_eq!(unpack(tree.root(), &[0xFF], BitOrder::LsbFirst).unwrap(), "zzzz");
    }


    #[test]
    fn random_text_both_bit_orders() {

        let mut rng = StdRng::seed_from_u64(0);

        for order in [BitOrder::MsbFirst, BitOrder::LsbFirst] {
            for _ in 0..30 {

                let text: String = (0..rng.gen_range(1..300))
                    .map(|_| rng.gen_range('a'..='z'))
                    .collect();

                let tree = tree_for(&text);
                let packed = pack(&text, &tree.code_table(), order).unwrap();

                assert_eq!(unpack(tree.root(), &packed, order).unwrap(), text);
            }
        }
    }

}
