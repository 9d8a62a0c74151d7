use thiserror::Error;

pub type Result<T, E = HuffmanError> = std::result::Result<T, E>;

// offsets are zero-based bit indices
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HuffmanError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("symbol {symbol} has no code word")]
    Lookup { symbol: String },

    #[error("tree has no child for bit at offset {offset}")]
    CorruptTree { offset: usize },

    #[error("malformed stream at bit {offset}: {reason}")]
    MalformedStream { offset: usize, reason: &'static str },

    #[error("invalid bit {ch:?} at offset {offset}")]
    InvalidBit { ch: char, offset: usize },
}
