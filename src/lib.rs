//! Huffman coding over arbitrary ordered symbols.
//!
//! ```
//! use huffcode::Huffman;
//!
//! let huffman = Huffman::new("aaab".chars())?;
//! let encoded = huffman.encode("aaab".chars())?;
//! assert_eq!(encoded.to_string(), "1110");
//! assert_eq!(huffman.decode(&encoded)?, vec!['a', 'a', 'a', 'b']);
//! # Ok::<(), huffcode::HuffmanError>(())
//! ```

pub mod codec;
pub mod error;
pub mod frequency;
pub mod tree;

pub use codec::{
    Bit, CodeTable, CodeWord, EncodedStream, Huffman, decode, decode_str, derive_codes, encode,
    encode_str, format_bits,
};
pub use error::{HuffmanError, Result};
pub use frequency::{FrequencyTable, count_frequencies, parse_frequencies};
pub use tree::{TreeNode, build_tree};
