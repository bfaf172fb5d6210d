use crate::config::BitOrder;
use crate::error::{CodecError, Result};


/// Sets the `index`-th bit of `byte` in stream order
pub fn set_bit(byte: u8, index: u8, order: BitOrder) -> Result<u8> {

    if index > 7 {
        return Err(CodecError::InvalidBitIndex { index });
    }

    Ok(byte | order.mask(index))
}


/// Reads the `index`-th bit of `byte` in stream order
pub fn get_bit(byte: u8, index: u8, order: BitOrder) -> Result<bool> {

    if index > 7 {
        return Err(CodecError::InvalidBitIndex { index });
    }

    Ok(byte & order.mask(index) != 0)
}


/// Growable bit buffer. The unused tail of the last byte stays zero.
#[derive(Debug, PartialEq)]
pub struct BitVec {

    raw_data: Vec<u8>,
    /// Unfilled bits left in the last byte
    free_bits: u8,
    order: BitOrder

}

impl BitVec {

    pub fn new(order: BitOrder) -> Self {
        Self {
            raw_data: Vec::new(),
            free_bits: 0,
            order
        }
    }


    pub fn append_bit(&mut self, bit: bool) -> Result<()> {

        if self.free_bits == 0 {
            self.raw_data.push(0);
            self.free_bits = 8;
        }

        let index = 8 - self.free_bits;

        if bit {
            // A byte was pushed above whenever the buffer was full or empty
            if let Some(last_byte) = self.raw_data.last_mut() {
                *last_byte = set_bit(*last_byte, index, self.order)?;
            }
        }

        self.free_bits -= 1;

        Ok(())
    }


    pub fn extend_from_bits(&mut self, bits: impl IntoIterator<Item = bool>) -> Result<()> {
        for bit in bits {
            self.append_bit(bit)?;
        }
        Ok(())
    }


    pub fn into_bytes(self) -> Vec<u8> {
        self.raw_data
    }

}


/// Reads every bit of a byte slice in stream order, trailing zero bits included
pub struct BitIterator<'a> {

    bytes: &'a [u8],
    order: BitOrder,
    position: usize

}

impl<'a> BitIterator<'a> {

    pub const fn new(bytes: &'a [u8], order: BitOrder) -> Self {
        Self {
            bytes,
            order,
            position: 0
        }
    }

}

impl Iterator for BitIterator<'_> {
    type Item = Result<bool>;

    fn next(&mut self) -> Option<Self::Item> {

        let byte = *self.bytes.get(self.position / 8)?;
        let index = (self.position % 8) as u8;

        self.position += 1;

        Some(get_bit(byte, index, self.order))
    }
}
