//! Character counting and the ordered pair list both sides rebuild the tree from.

use std::collections::HashMap;

use crate::error::{CodecError, Result};


/// A symbol and how often it occurs. `character == None` is the terminator,
/// a reserved symbol no decoded `char` can collide with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyCharPair {

    pub frequency: u32,
    pub character: Option<char>

}

impl FrequencyCharPair {

    pub const TERMINATOR: Self = Self {
        frequency: 0,
        character: None
    };


    pub const fn new(frequency: u32, character: char) -> Self {
        Self {
            frequency,
            character: Some(character)
        }
    }


    pub const fn is_terminator(&self) -> bool {
        self.character.is_none()
    }

}


/// How the terminator is merged into a pair list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOrder {

    /// Append the terminator, then sort by ascending frequency
    Sorted,
    /// Pairs are already in header order, prepend the terminator
    HeaderOrder,

}


/// Counts every character occurrence. Characters are listed in order of first appearance,
/// which keeps the output independent of hashing.
pub fn count_frequencies(text: &str) -> Vec<(char, u64)> {

    let mut index: HashMap<char, usize> = HashMap::new();
    let mut frequencies: Vec<(char, u64)> = Vec::new();

    for ch in text.chars() {

        let slot = *index.entry(ch)
            .or_insert_with(|| {
                frequencies.push((ch, 0));
                frequencies.len() - 1
            });

        frequencies[slot].1 += 1;
    }

    frequencies
}


/// Adds counts gathered from separate shards of the same text
pub fn merge_frequencies(into: &mut Vec<(char, u64)>, other: &[(char, u64)]) {

    let mut index: HashMap<char, usize> = into.iter()
        .enumerate()
        .map(|(i, (ch, _))| (*ch, i))
        .collect();

    for &(ch, count) in other {
        match index.get(&ch) {
            Some(&slot) => into[slot].1 += count,
            None => {
                index.insert(ch, into.len());
                into.push((ch, count));
            }
        }
    }
}


/// Converts counts to pairs, rejecting counts that do not fit a 4-byte frequency field
pub fn to_pairs(frequencies: &[(char, u64)]) -> Result<Vec<FrequencyCharPair>> {
    frequencies.iter()
        .map(|&(ch, count)| {
            u32::try_from(count)
                .map(|frequency| FrequencyCharPair::new(frequency, ch))
                .map_err(|_| CodecError::FrequencyOverflow { value: count })
        })
        .collect()
}


/// Adds the terminator to `pairs` according to `order`
pub fn format_pairs(mut pairs: Vec<FrequencyCharPair>, order: PairOrder) -> Vec<FrequencyCharPair> {

    match order {

        PairOrder::Sorted => {
            pairs.push(FrequencyCharPair::TERMINATOR);
            // Stable, and the terminator is the only zero so it always ends up first
            pairs.sort_by_key(|pair| pair.frequency);
        },

        PairOrder::HeaderOrder => {
            pairs.insert(0, FrequencyCharPair::TERMINATOR);
        },
    }

    pairs
}
