//! Static Huffman compression for 7-bit byte data.
//!
//! ```
//! use huffpack::{compress, decompress};
//!
//! let input = b"aaaaaaaabbbbcccd";
//! let compressed = compress(input)?;
//! assert!(compressed.bytes.len() < input.len());
//! assert_eq!(decompress(&compressed.bytes, &compressed.tree)?, input);
//! # Ok::<(), huffpack::HuffmanError>(())
//! ```
//!
//! The packed payload holds no code table. Decompression needs the same
//! tree, either kept from [`compress`] or rebuilt from the same frequencies.

pub mod bits;
pub mod code;
pub mod codec;
pub mod error;
pub mod frequency;
pub mod huffman;
pub mod node;

pub use code::CodeTable;
pub use codec::{Compressed, CompressionStats, Compressor, Decompressor, compress, decompress};
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use huffman::HuffmanTree;
