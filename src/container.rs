//! Container layout, all integers in the configured byte order:
//!
//! | field           | size                          |
//! |-----------------|-------------------------------|
//! | char_byte_count | 4                             |
//! | freq_count      | 4                             |
//! | freq_byte_width | 1                             |
//! | frequencies     | freq_count * freq_byte_width  |
//! | characters      | char_byte_count (UTF-8)       |
//! | data            | remainder                     |
//!
//! The frequency array starts with the terminator's 0 and follows the sorted pair order.
//! The character array holds the same symbols minus the terminator.

use std::str;

use log::debug;

use crate::config::ByteOrder;
use crate::error::{CodecError, Result};
use crate::frequency::FrequencyCharPair;


pub const HEADER_LEN: usize = 9;
pub const MAX_FREQUENCY_WIDTH: u8 = 4;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {

    pub char_byte_count: u32,
    pub freq_count: u32,
    pub freq_byte_width: u8

}

impl Header {

    pub fn write(&self, buf: &mut Vec<u8>, order: ByteOrder) {
        order.write_u32(buf, self.char_byte_count);
        order.write_u32(buf, self.freq_count);
        buf.push(self.freq_byte_width);
    }


    pub fn read(input: &[u8], order: ByteOrder) -> Result<Self> {

        if input.len() < HEADER_LEN {
            return Err(CodecError::malformed_header(
                format!("container is {} bytes, the header alone needs {HEADER_LEN}", input.len())
            ));
        }

        Ok(Self {
            char_byte_count: order.read_u32(&input[0..4]),
            freq_count: order.read_u32(&input[4..8]),
            freq_byte_width: input[8]
        })
    }

}


/// Frequencies and characters recovered from a container, plus the untouched data section
#[derive(Debug, PartialEq, Eq)]
pub struct Container<'a> {

    /// Symbol frequencies in header order, terminator excluded
    pub frequencies: Vec<u32>,
    pub characters: Vec<char>,
    pub data: &'a [u8]

}


/// Fewest bytes (at least one) that hold `value`
pub const fn frequency_width(value: u32) -> u8 {
    let bits = u32::BITS - value.leading_zeros();
    if bits == 0 {
        1
    } else {
        bits.div_ceil(8) as u8
    }
}


fn header_field(value: usize) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| CodecError::FrequencyOverflow { value: value as u64 })
}


/// Serializes the header, frequency array and character array for `pairs`,
/// which must be the sorted pair list with the terminator first.
pub fn encode_header(pairs: &[FrequencyCharPair], order: ByteOrder) -> Result<Vec<u8>> {

    let max_frequency = pairs.iter()
        .map(|pair| pair.frequency)
        .max()
        .unwrap_or(0);
    let width = frequency_width(max_frequency);

    let characters: String = pairs.iter()
        .filter_map(|pair| pair.character)
        .collect();

    let header = Header {
        char_byte_count: header_field(characters.len())?,
        freq_count: header_field(pairs.len())?,
        freq_byte_width: width
    };

    debug!("header: {} frequencies of {} bytes, {} character bytes", header.freq_count, width, header.char_byte_count);

    let mut buf = Vec::with_capacity(HEADER_LEN + pairs.len() * width as usize + characters.len());

    header.write(&mut buf, order);

    for pair in pairs {
        order.write_uint(&mut buf, u64::from(pair.frequency), width as usize);
    }

    buf.extend_from_slice(characters.as_bytes());

    Ok(buf)
}


/// Splits a frequency buffer into fixed-width values
pub fn decode_frequencies(buffer: &[u8], width: u8, order: ByteOrder) -> Result<Vec<u32>> {

    if width == 0 || width > MAX_FREQUENCY_WIDTH {
        return Err(CodecError::malformed_header(
            format!("frequency byte width {width} is outside 1..={MAX_FREQUENCY_WIDTH}")
        ));
    }
    if buffer.len() % width as usize != 0 {
        return Err(CodecError::malformed_header(
            format!("frequency buffer of {} bytes is not a multiple of {width}", buffer.len())
        ));
    }

    // At most 4 bytes per value, so the result always fits
    Ok(
        buffer.chunks_exact(width as usize)
            .map(|chunk| order.read_uint(chunk) as u32)
            .collect()
    )
}


/// Returns `len` bytes of `input` starting at `offset`, or a MalformedHeader naming the section
fn section<'a>(input: &'a [u8], offset: usize, len: usize, name: &str) -> Result<&'a [u8]> {

    let end = offset.checked_add(len)
        .filter(|&end| end <= input.len())
        .ok_or_else(|| CodecError::malformed_header(
            format!("{name} section needs {len} bytes at offset {offset}, container has {}", input.len())
        ))?;

    Ok(&input[offset..end])
}


pub fn decode_container(input: &[u8], order: ByteOrder) -> Result<Container<'_>> {

    let header = Header::read(input, order)?;
    let mut offset = HEADER_LEN;

    debug!("reading container: {header:?}");

    if header.freq_count == 0 {
        return Err(CodecError::malformed_header("frequency array has no terminator entry"));
    }

    let freq_len = (header.freq_count as usize)
        .checked_mul(header.freq_byte_width as usize)
        .ok_or_else(|| CodecError::malformed_header("frequency section length overflows"))?;

    let freq_buffer = section(input, offset, freq_len, "frequency")?;
    let mut frequencies = decode_frequencies(freq_buffer, header.freq_byte_width, order)?;
    offset += freq_len;

    if frequencies.first() != Some(&0) {
        return Err(CodecError::malformed_header("first frequency must be the terminator's 0"));
    }
    frequencies.remove(0);

    let char_buffer = section(input, offset, header.char_byte_count as usize, "character")?;
    let characters: Vec<char> = str::from_utf8(char_buffer)?.chars().collect();
    offset += char_buffer.len();

    if characters.len() != frequencies.len() {
        return Err(CodecError::LengthMismatch {
            characters: characters.len(),
            frequencies: frequencies.len()
        });
    }

    Ok(Container {
        frequencies,
        characters,
        data: &input[offset..]
    })
}
