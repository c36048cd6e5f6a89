use tracing::debug;

use crate::bits::{BitStream, BitWriter};
use crate::error::{HuffmanError, Result};
use crate::huffman::HuffmanTree;

/// Output of [`compress`]. The payload carries no code table; keep `tree`
/// (or regenerate it from the same frequencies) to decompress.
#[derive(Debug, Clone)]
pub struct Compressed {
    pub bytes: Vec<u8>,
    pub tree: HuffmanTree,
}

impl Compressed {
    pub fn stats(&self) -> CompressionStats {
        CompressionStats {
            original_len: self.tree.total_frequency(),
            compressed_len: self.bytes.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionStats {
    pub original_len: usize,
    pub compressed_len: usize,
}

impl CompressionStats {
    /// Bytes saved relative to the compressed size.
    pub fn rate(&self) -> f64 {
        if self.compressed_len == 0 {
            return 0.0;
        }
        (self.original_len as f64 - self.compressed_len as f64) / self.compressed_len as f64
    }
}

/// Encodes bytes against a fixed tree.
#[derive(Debug, Clone, Copy)]
pub struct Compressor<'t> {
    tree: &'t HuffmanTree,
}

impl<'t> Compressor<'t> {
    pub fn new(tree: &'t HuffmanTree) -> Self {
        Self { tree }
    }

    pub fn compress(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        let mut writer = BitWriter::with_capacity(bytes.len());
        for &byte in bytes {
            writer.push_code(self.tree.code(byte)?)?;
        }

        let code_bits = writer.len();
        let packed = writer.finish();
        debug!(
            input = bytes.len(),
            code_bits,
            output = packed.len(),
            "compressed"
        );

        Ok(packed)
    }
}

/// Decodes payloads produced with the same tree.
#[derive(Debug, Clone, Copy)]
pub struct Decompressor<'t> {
    tree: &'t HuffmanTree,
}

impl<'t> Decompressor<'t> {
    pub fn new(tree: &'t HuffmanTree) -> Self {
        Self { tree }
    }

    pub fn decompress(&self, packed: &[u8]) -> Result<Vec<u8>> {
        let mut stream = BitStream::new(packed)?;
        let mut output = Vec::new();

        while !stream.is_empty() {
            let offset = stream.position();
            let (symbol, _) = self
                .tree
                .walk(&mut stream)
                .ok_or(HuffmanError::InvalidCode { offset })?;
            output.push(symbol);
        }

        debug!(input = packed.len(), output = output.len(), "decompressed");
        Ok(output)
    }
}

/// Counts frequencies, builds a tree and encodes `bytes` with it.
pub fn compress(bytes: &[u8]) -> Result<Compressed> {
    let tree = HuffmanTree::from_bytes(bytes)?;
    let bytes = Compressor::new(&tree).compress(bytes)?;
    Ok(Compressed { bytes, tree })
}

pub fn decompress(packed: &[u8], tree: &HuffmanTree) -> Result<Vec<u8>> {
    Decompressor::new(tree).decompress(packed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::pack;

    #[test]
    fn round_trips_digit_runs() {
        let input = b"1111111111111111111111111111111111111111111111222222222222223333334";
        let tree = HuffmanTree::from_bytes(input).unwrap();
        let packed = Compressor::new(&tree).compress(input).unwrap();
        // 46 + 14*2 + 6*3 + 3 code bits plus the sentinel fill 12 bytes exactly.
        assert_eq!(packed.len(), 12);
        assert_eq!(decompress(&packed, &tree).unwrap(), input.to_vec());
    }

    #[test]
    fn round_trips_single_byte() {
        let compressed = compress(b"a").unwrap();
        assert_eq!(compressed.bytes, vec![0b0000_0010]);
        assert_eq!(decompress(&compressed.bytes, &compressed.tree).unwrap(), b"a");
    }

    #[test]
    fn round_trips_repeated_symbol() {
        let compressed = compress(b"aaaa").unwrap();
        assert_eq!(decompress(&compressed.bytes, &compressed.tree).unwrap(), b"aaaa");
    }

    #[test]
    fn skewed_input_shrinks() {
        let input = b"aaaaaaaabbbbcccd";
        let compressed = compress(input).unwrap();
        assert!(compressed.bytes.len() < input.len());
        assert_eq!(decompress(&compressed.bytes, &compressed.tree).unwrap(), input);
    }

    #[test]
    fn packed_size_follows_encoded_bits() {
        let compressed = compress(b"hello, huffman").unwrap();
        let expected = (compressed.tree.encoded_bits() + 1).div_ceil(8);
        assert_eq!(compressed.bytes.len(), expected);
    }

    #[test]
    fn foreign_tree_is_rejected() {
        let tree = HuffmanTree::from_bytes(b"abc").unwrap();
        assert_eq!(
            Compressor::new(&tree).compress(b"abd"),
            Err(HuffmanError::SymbolNotFound(b'd'))
        );
    }

    #[test]
    fn high_bytes_are_rejected() {
        assert_eq!(
            compress(&[b'a', 0xFF]).unwrap_err(),
            HuffmanError::UnsupportedSymbol {
                byte: 0xFF,
                offset: 1
            }
        );
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(compress(b"").unwrap_err(), HuffmanError::EmptyInput);
    }

    #[test]
    fn truncated_code_is_reported() {
        let tree = HuffmanTree::from_bytes(b"11111111111111111111111111222222222222223333334").unwrap();
        // "0" decodes '1', then "11" stops short of a leaf.
        let packed = pack("011").unwrap();
        assert_eq!(
            decompress(&packed, &tree),
            Err(HuffmanError::InvalidCode { offset: 1 })
        );
    }

    #[test]
    fn single_leaf_rejects_set_bit() {
        let tree = HuffmanTree::from_bytes(b"zz").unwrap();
        let packed = pack("01").unwrap();
        assert_eq!(
            decompress(&packed, &tree),
            Err(HuffmanError::InvalidCode { offset: 1 })
        );
    }

    #[test]
    fn payload_without_sentinel_is_rejected() {
        let tree = HuffmanTree::from_bytes(b"ab").unwrap();
        assert_eq!(decompress(&[0, 0], &tree), Err(HuffmanError::MissingSentinel));
    }

    #[test]
    fn stats_report_rate() {
        let stats = CompressionStats {
            original_len: 30,
            compressed_len: 10,
        };
        assert!((stats.rate() - 2.0).abs() < f64::EPSILON);

        let compressed = compress(b"aaaaaaaabbbbcccd").unwrap();
        assert_eq!(compressed.stats().original_len, 16);
        assert_eq!(compressed.stats().compressed_len, compressed.bytes.len());
    }
}
