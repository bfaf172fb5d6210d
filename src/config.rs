//! Codec settings. Encoder and decoder must agree on them, the container does not record them.

use std::env;
use std::str::FromStr;

use byteorder::{BigEndian, ByteOrder as _, LittleEndian};

use crate::error::{CodecError, Result};


pub const BYTE_ORDER_ENV: &str = "HUFFMAN_BYTE_ORDER";
pub const BIT_ORDER_ENV: &str = "HUFFMAN_BIT_ORDER";


/// Byte order of every multi-byte integer in the header and frequency array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {

    #[default]
    Little,
    Big,

}

impl ByteOrder {

    pub fn read_u32(self, buf: &[u8]) -> u32 {
        match self {
            ByteOrder::Little => LittleEndian::read_u32(buf),
            ByteOrder::Big => BigEndian::read_u32(buf),
        }
    }


    pub fn write_u32(self, buf: &mut Vec<u8>, value: u32) {
        let mut field = [0_u8; 4];
        match self {
            ByteOrder::Little => LittleEndian::write_u32(&mut field, value),
            ByteOrder::Big => BigEndian::write_u32(&mut field, value),
        }
        buf.extend_from_slice(&field);
    }


    /// Reads an unsigned integer stored in `buf.len()` bytes (1 to 8)
    pub fn read_uint(self, buf: &[u8]) -> u64 {
        match self {
            ByteOrder::Little => LittleEndian::read_uint(buf, buf.len()),
            ByteOrder::Big => BigEndian::read_uint(buf, buf.len()),
        }
    }


    /// Appends `value` using exactly `width` bytes. `value` must fit in `width` bytes.
    pub fn write_uint(self, buf: &mut Vec<u8>, value: u64, width: usize) {
        let mut field = [0_u8; 8];
        match self {
            ByteOrder::Little => LittleEndian::write_uint(&mut field[..width], value, width),
            ByteOrder::Big => BigEndian::write_uint(&mut field[..width], value, width),
        }
        buf.extend_from_slice(&field[..width]);
    }

}

impl FromStr for ByteOrder {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "little" | "le" => Ok(ByteOrder::Little),
            "big" | "be" => Ok(ByteOrder::Big),
            other => Err(CodecError::invalid_config(format!("unknown byte order '{other}'"))),
        }
    }
}


/// Order in which the bits of a data byte are filled and read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitOrder {

    #[default]
    MsbFirst,
    LsbFirst,

}

impl BitOrder {

    /// Mask selecting the `index`-th bit of a byte in stream order
    pub const fn mask(self, index: u8) -> u8 {
        match self {
            BitOrder::MsbFirst => 1_u8 << (7 - index),
            BitOrder::LsbFirst => 1_u8 << index,
        }
    }

}

impl FromStr for BitOrder {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "msb" | "msb-first" => Ok(BitOrder::MsbFirst),
            "lsb" | "lsb-first" => Ok(BitOrder::LsbFirst),
            other => Err(CodecError::invalid_config(format!("unknown bit order '{other}'"))),
        }
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodecConfig {

    pub byte_order: ByteOrder,
    pub bit_order: BitOrder,

}

impl CodecConfig {

    pub const fn new(byte_order: ByteOrder, bit_order: BitOrder) -> Self {
        Self {
            byte_order,
            bit_order
        }
    }


    /// Reads `HUFFMAN_BYTE_ORDER` and `HUFFMAN_BIT_ORDER`, keeping the default for unset variables
    pub fn from_env() -> Result<Self> {

        let mut config = Self::default();

        if let Ok(value) = env::var(BYTE_ORDER_ENV) {
            config.byte_order = value.parse()?;
        }
        if let Ok(value) = env::var(BIT_ORDER_ENV) {
            config.bit_order = value.parse()?;
        }

        Ok(config)
    }

}


#[cfg(test)]
mod tests {

    use super::*;


    #[test]
    fn default_is_little_endian_msb_first() {

        let config = CodecConfig::default();

        assert_eq!(config.byte_order, ByteOrder::Little);
        assert_eq!(config.bit_order, BitOrder::MsbFirst);
    }


    #[test]
    fn parse_orders() {

        assert_eq!("big".parse::<ByteOrder>().unwrap(), ByteOrder::Big);
        assert_eq!(" Little ".parse::<ByteOrder>().unwrap(), ByteOrder::Little);
        assert_eq!("lsb".parse::<BitOrder>().unwrap(), BitOrder::LsbFirst);
        assert_eq!("MSB-first".parse::<BitOrder>().unwrap(), BitOrder::MsbFirst);

        assert!(matches!("middle".parse::<ByteOrder>(), Err(CodecError::InvalidConfig { .. })));
        assert!(matches!("".parse::<BitOrder>(), Err(CodecError::InvalidConfig { .. })));
    }


    #[test]
    fn environment_overrides() {

        // Only this test touches these variables
        env::remove_var(BYTE_ORDER_ENV);
        env::remove_var(BIT_ORDER_ENV);
        assert_eq!(CodecConfig::from_env().unwrap(), CodecConfig::default());

        env::set_var(BYTE_ORDER_ENV, "big");
        assert_eq!(CodecConfig::from_env().unwrap(), CodecConfig::new(ByteOrder::Big, BitOrder::MsbFirst));

        env::set_var(BIT_ORDER_ENV, "lsb");
        assert_eq!(CodecConfig::from_env().unwrap(), CodecConfig::new(ByteOrder::Big, BitOrder::LsbFirst));

        env::set_var(BYTE_ORDER_ENV, "sideways");
        assert!(matches!(CodecConfig::from_env(), Err(CodecError::InvalidConfig { .. })));

        env::remove_var(BYTE_ORDER_ENV);
        env::remove_var(BIT_ORDER_ENV);
    }


    #[test]
    fn fixed_width_integers() {

        let mut buf = Vec::new();
        ByteOrder::Little.write_u32(&mut buf, 0x0102_0304);
        ByteOrder::Big.write_u32(&mut buf, 0x0102_0304);

        assert_eq!(buf, [4, 3, 2, 1, 1, 2, 3, 4]);
        assert_eq!(ByteOrder::Little.read_u32(&buf[..4]), 0x0102_0304);
        assert_eq!(ByteOrder::Big.read_u32(&buf[4..]), 0x0102_0304);
    }


    #[test]
    fn variable_width_integers() {

        for width in 1..=4 {
            for order in [ByteOrder::Little, ByteOrder::Big] {

                let value = (1_u64 << (8 * width - 1)) + 5;

                let mut buf = Vec::new();
                order.write_uint(&mut buf, value, width);

                assert_eq!(buf.len(), width);
                assert_eq!(order.read_uint(&buf), value);
            }
        }

        let mut buf = Vec::new();
        ByteOrder::Big.write_uint(&mut buf, 0x0102, 3);
        assert_eq!(buf, [0, 1, 2]);
    }


    #[test]
    fn bit_masks() {

        assert_eq!(BitOrder::MsbFirst.mask(0), 0b1000_0000);
        assert_eq!(BitOrder::MsbFirst.mask(7), 0b0000_0001);
        assert_eq!(BitOrder::LsbFirst.mask(0), 0b0000_0001);
        assert_eq!(BitOrder::LsbFirst.mask(7), 0b1000_0000);
    }

}
