//! Lossless text compression with Huffman codes.
//!
//! The container is self-describing: it stores the symbol frequencies in the order the
//! encoder built its tree from, so the decoder rebuilds the identical tree instead of
//! reading it. The end of the data is marked by a reserved terminator symbol.
//!
//! ```
//! let bytes = huffman_text_compression::encode("abracadabra").unwrap();
//! assert_eq!(huffman_text_compression::decode(&bytes).unwrap(), "abracadabra");
//! ```

pub mod bitvec;
pub mod config;
pub mod container;
pub mod error;
pub mod frequency;
pub mod stream;
pub mod tree;

use std::fs;
use std::path::Path;

use log::debug;

pub use config::{BitOrder, ByteOrder, CodecConfig};
pub use error::{CodecError, Result};
pub use frequency::FrequencyCharPair;
pub use tree::{Code, CodeTable, HuffmanTree, Node};

use container::{decode_container, encode_header};
use frequency::{count_frequencies, format_pairs, to_pairs, PairOrder};


#[derive(Debug, Clone, Copy, Default)]
pub struct TextCodec {

    config: CodecConfig

}

impl TextCodec {

    pub const fn new(config: CodecConfig) -> Self {
        Self {
            config
        }
    }


    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }


    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {

        let pairs = format_pairs(to_pairs(&count_frequencies(text))?, PairOrder::Sorted);

        let tree = HuffmanTree::build(&pairs)?;
        let table = tree.code_table();

        let mut encoded = encode_header(&pairs, self.config.byte_order)?;
        let header_len = encoded.len();

        encoded.extend(stream::pack(text, &table, self.config.bit_order)?);

        debug!("encoded {} bytes of text over {} symbols: {} header bytes, {} data bytes",
            text.len(), pairs.len(), header_len, encoded.len() - header_len);

        Ok(encoded)
    }


    pub fn decode(&self, bytes: &[u8]) -> Result<String> {

        let container = decode_container(bytes, self.config.byte_order)?;

        let pairs: Vec<FrequencyCharPair> = container.frequencies.iter()
            .zip(&container.characters)
            .map(|(&frequency, &ch)| FrequencyCharPair::new(frequency, ch))
            .collect();
        let pairs = format_pairs(pairs, PairOrder::HeaderOrder);

        let tree = HuffmanTree::build(&pairs)?;

        debug!("decoding {} data bytes over {} symbols", container.data.len(), pairs.len());

        stream::unpack(tree.root(), container.data, self.config.bit_order)
    }


    /// Reads a UTF-8 text file and returns its encoding
    pub fn encode_file<P>(&self, path: P) -> Result<Vec<u8>>
    where
        P: AsRef<Path>
    {
        let text = fs::read_to_string(path)?;
        self.encode(&text)
    }


    pub fn encode_file_to<P, Q>(&self, input: P, output: Q) -> Result<()>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>
    {
        let encoded = self.encode_file(input)?;
        fs::write(output, encoded)?;
        Ok(())
    }


    /// Reads an encoded file and returns the decoded text
    pub fn decode_file<P>(&self, path: P) -> Result<String>
    where
        P: AsRef<Path>
    {
        let bytes = fs::read(path)?;
        self.decode(&bytes)
    }


    pub fn decode_file_to<P, Q>(&self, input: P, output: Q) -> Result<()>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>
    {
        let decoded = self.decode_file(input)?;
        fs::write(output, decoded)?;
        Ok(())
    }

}


/// Encodes with the default configuration
pub fn encode(text: &str) -> Result<Vec<u8>> {
    TextCodec::default().encode(text)
}


/// Decodes with the default configuration
pub fn decode(bytes: &[u8]) -> Result<String> {
    TextCodec::default().decode(bytes)
}


/// Ratio of original to compressed size, 0 when nothing was compressed
pub fn compression_ratio(original_len: usize, compressed_len: usize) -> f64 {
    if compressed_len == 0 {
        0.0
    } else {
        original_len as f64 / compressed_len as f64
    }
}
