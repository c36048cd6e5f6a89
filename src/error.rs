//! Error types for building trees and encoding/decoding payloads.

/// Errors raised by the codec. None of them are recoverable in place:
/// retrying with the same inputs yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HuffmanError {
    /// The frequency table had no entries.
    #[error("cannot build a tree from empty input")]
    EmptyInput,

    /// Encoding hit a byte that has no leaf in the tree.
    #[error("symbol {0:#04x} has no code in this tree")]
    SymbolNotFound(u8),

    /// The bitstream ran out before the walk reached a leaf.
    #[error("invalid code at bit offset {offset}")]
    InvalidCode { offset: usize },

    /// Input byte outside the 7-bit alphabet.
    #[error("byte {byte:#04x} at offset {offset} is outside the 7-bit range")]
    UnsupportedSymbol { byte: u8, offset: usize },

    /// Packed payload contains no start marker.
    #[error("compressed payload has no start marker")]
    MissingSentinel,

    /// Bit string contains something other than '0' or '1'.
    #[error("invalid bit character {0:?}")]
    InvalidBit(char),
}

pub type Result<T, E = HuffmanError> = std::result::Result<T, E>;
