//! Bit packing with a leading sentinel.
//!
//! A packed payload is the code bits prefixed by a single `1` and left padded
//! with zeros to a whole number of bytes, most significant bit first:
//!
//! ```text
//! codes "100100001101" -> 000 1 100100001101 -> [0b0001_1001, 0b0000_1101]
//! ```
//!
//! The reader skips everything up to and including the first set bit, so no
//! length header is needed and leading zero bits in the codes survive.

use crate::error::{HuffmanError, Result};

/// Accumulates code bits and frames them on [`finish`](BitWriter::finish).
#[derive(Debug, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    bit_count: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            bit_count: 0,
        }
    }

    /// Number of code bits written so far, sentinel excluded.
    pub fn len(&self) -> usize {
        self.bit_count
    }

    pub fn is_empty(&self) -> bool {
        self.bit_count == 0
    }

    pub fn push_bit(&mut self, bit: bool) {
        let byte_index = self.bit_count / 8;
        let bit_offset = self.bit_count % 8;

        if byte_index >= self.bytes.len() {
            self.bytes.push(0);
        }
        if bit {
            self.bytes[byte_index] |= 1 << (7 - bit_offset);
        }

        self.bit_count += 1;
    }

    /// Appends a code written as `'0'`/`'1'` characters.
    pub fn push_code(&mut self, code: &str) -> Result<()> {
        for ch in code.chars() {
            self.push_bit(parse_bit(ch)?);
        }
        Ok(())
    }

    fn bit(&self, index: usize) -> bool {
        self.bytes[index / 8] & (1 << (7 - index % 8)) != 0
    }

    /// Prepends the sentinel, left pads to a byte boundary and returns the
    /// packed bytes.
    pub fn finish(self) -> Vec<u8> {
        let framed_bits = self.bit_count + 1;
        let padding = (8 - framed_bits % 8) % 8;

        let mut framed = BitWriter::with_capacity(framed_bits + padding);
        for _ in 0..padding {
            framed.push_bit(false);
        }
        framed.push_bit(true);
        for index in 0..self.bit_count {
            framed.push_bit(self.bit(index));
        }

        debug_assert_eq!(framed.bit_count % 8, 0);
        framed.bytes
    }
}

/// Reads the code bits of a packed payload, MSB first, starting right after
/// the sentinel.
#[derive(Debug, Clone)]
pub struct BitStream<'a> {
    bytes: &'a [u8],
    bit_pos: usize,
    start: usize,
}

impl<'a> BitStream<'a> {
    /// Locates the sentinel. Fails if no bit in `bytes` is set.
    pub fn new(bytes: &'a [u8]) -> Result<Self> {
        let (byte_index, byte) = bytes
            .iter()
            .enumerate()
            .find(|&(_, &byte)| byte != 0)
            .ok_or(HuffmanError::MissingSentinel)?;

        let sentinel = byte_index * 8 + byte.leading_zeros() as usize;
        Ok(Self {
            bytes,
            bit_pos: sentinel + 1,
            start: sentinel + 1,
        })
    }

    /// Bits consumed since the sentinel.
    pub fn position(&self) -> usize {
        self.bit_pos - self.start
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() * 8 - self.bit_pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_bit(&mut self) -> Option<bool> {
        if self.is_empty() {
            return None;
        }
        let byte = self.bytes[self.bit_pos / 8];
        let bit = byte & (1 << (7 - self.bit_pos % 8)) != 0;
        self.bit_pos += 1;
        Some(bit)
    }
}

impl Iterator for BitStream<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.read_bit()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BitStream<'_> {}

pub(crate) fn parse_bit(ch: char) -> Result<bool> {
    match ch {
        '0' => Ok(false),
        '1' => Ok(true),
        other => Err(HuffmanError::InvalidBit(other)),
    }
}

/// Packs a `'0'`/`'1'` string into framed bytes.
pub fn pack(bits: &str) -> Result<Vec<u8>> {
    let mut writer = BitWriter::with_capacity(bits.len());
    writer.push_code(bits)?;
    Ok(writer.finish())
}

/// Inverse of [`pack`]: the code bits of a framed payload as a string.
pub fn unpack(bytes: &[u8]) -> Result<String> {
    let stream = BitStream::new(bytes)?;
    Ok(stream.map(|bit| if bit { '1' } else { '0' }).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_pads_to_byte_boundary() {
        assert_eq!(pack("100100001101").unwrap(), vec![25, 13]);
    }

    #[test]
    fn pack_keeps_leading_zero_bits() {
        assert_eq!(pack("0000100100001101").unwrap(), vec![1, 9, 13]);
    }

    #[test]
    fn pack_without_padding() {
        assert_eq!(pack("1111111").unwrap(), vec![0xFF]);
        assert_eq!(pack("0000000").unwrap(), vec![0x80]);
    }

    #[test]
    fn pack_empty_is_sentinel_only() {
        assert_eq!(pack("").unwrap(), vec![1]);
        assert_eq!(unpack(&[1]).unwrap(), "");
    }

    #[test]
    fn pack_rejects_non_binary() {
        assert_eq!(pack("10a1"), Err(HuffmanError::InvalidBit('a')));
    }

    #[test]
    fn unpack_inverts_pack() {
        assert_eq!(unpack(&[25, 13]).unwrap(), "100100001101");
        assert_eq!(unpack(&[1, 9, 13]).unwrap(), "0000100100001101");
    }

    #[test]
    fn unpack_scans_past_zero_bytes() {
        assert_eq!(unpack(&[0, 0, 0b0000_0101]).unwrap(), "01");
    }

    #[test]
    fn unpack_without_sentinel_fails() {
        assert_eq!(unpack(&[]), Err(HuffmanError::MissingSentinel));
        assert_eq!(unpack(&[0, 0]), Err(HuffmanError::MissingSentinel));
    }

    #[test]
    fn stream_tracks_position() {
        let mut stream = BitStream::new(&[0b0001_1011]).unwrap();
        assert_eq!(stream.remaining(), 4);
        assert_eq!(stream.read_bit(), Some(true));
        assert_eq!(stream.read_bit(), Some(false));
        assert_eq!(stream.position(), 2);
        assert_eq!(stream.len(), 2);
        assert_eq!(stream.read_bit(), Some(true));
        assert_eq!(stream.read_bit(), Some(true));
        assert!(stream.is_empty());
        assert_eq!(stream.read_bit(), None);
    }

    #[test]
    fn writer_counts_code_bits() {
        let mut writer = BitWriter::new();
        writer.push_code("110").unwrap();
        writer.push_bit(true);
        assert_eq!(writer.len(), 4);
        // 000 1 1101
        assert_eq!(writer.finish(), vec![0b0001_1101]);
    }
}
