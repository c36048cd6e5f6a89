use std::collections::BTreeMap;

use crate::error::{HuffmanError, Result};

/// Highest symbol the codec accepts.
pub const MAX_SYMBOL: u8 = 0x7F;

/// Occurrence counts for one input, keyed by symbol in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<u8, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every byte of `bytes`. Bytes above [`MAX_SYMBOL`] are rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut table = Self::new();
        for (offset, &byte) in bytes.iter().enumerate() {
            if byte > MAX_SYMBOL {
                return Err(HuffmanError::UnsupportedSymbol { byte, offset });
            }
            *table.counts.entry(byte).or_default() += 1;
        }

        Ok(table)
    }

    /// Adds `count` occurrences of `symbol`. A zero count is ignored so the
    /// table never holds symbols absent from the input.
    pub fn add(&mut self, symbol: u8, count: usize) -> Result<()> {
        if symbol > MAX_SYMBOL {
            return Err(HuffmanError::UnsupportedSymbol {
                byte: symbol,
                offset: 0,
            });
        }
        if count > 0 {
            *self.counts.entry(symbol).or_default() += count;
        }
        Ok(())
    }

    pub fn get(&self, symbol: u8) -> usize {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the length of the counted input.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }
}
