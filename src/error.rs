//! Error type shared by every stage of the codec.

use std::str::Utf8Error;

use thiserror::Error;


pub type Result<T> = std::result::Result<T, CodecError>;


#[derive(Error, Debug)]
pub enum CodecError {

    /// The fixed header or one of the sections it declares cannot be read
    #[error("Malformed header: {message}")]
    MalformedHeader {
        message: String
    },

    /// The character array and the frequency array disagree in length
    #[error("Length mismatch: {characters} characters but {frequencies} frequencies")]
    LengthMismatch {
        characters: usize,
        frequencies: usize
    },

    /// The data section ran out before the terminator was decoded
    #[error("Truncated stream: data ended after {decoded} characters without a terminator")]
    TruncatedStream {
        decoded: usize
    },

    /// A bit index outside 0..=7 reached the bit helpers
    #[error("Invalid bit index {index}, must be between 0 and 7")]
    InvalidBitIndex {
        index: u8
    },

    #[error("Character array is not valid UTF-8: {0}")]
    InvalidCharacters(#[from] Utf8Error),

    /// A count or a section length does not fit in a 4-byte header field
    #[error("Value {value} does not fit in a 32-bit header field")]
    FrequencyOverflow {
        value: u64
    },

    #[error("Cannot build a tree from an empty alphabet")]
    EmptyAlphabet,

    #[error("No code for symbol {character:?}")]
    UnknownSymbol {
        character: Option<char>
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        message: String
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

}

impl CodecError {

    pub fn malformed_header<S: Into<String>>(message: S) -> Self {
        Self::MalformedHeader { message: message.into() }
    }


    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig { message: message.into() }
    }

}
