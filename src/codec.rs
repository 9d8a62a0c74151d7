use std::collections::BTreeMap;
use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use tracing::{debug, warn};

use crate::error::{HuffmanError, Result};
use crate::frequency::{FrequencyTable, count_frequencies};
use crate::tree::{TreeNode, build_tree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

impl Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// root-to-leaf path, Zero for left
pub type CodeWord = Vec<Bit>;

pub type CodeTable<S> = BTreeMap<S, CodeWord>;

pub fn format_bits(bits: &[Bit]) -> String {
    bits.iter().map(|b| b.as_char()).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedStream(Vec<Bit>);

impl EncodedStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bits(&self) -> &[Bit] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn extend_from_slice(&mut self, bits: &[Bit]) {
        self.0.extend_from_slice(bits);
    }
}

impl From<Vec<Bit>> for EncodedStream {
    fn from(bits: Vec<Bit>) -> Self {
        Self(bits)
    }
}

impl Display for EncodedStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_bits(&self.0))
    }
}

impl FromStr for EncodedStream {
    type Err = HuffmanError;

    fn from_str(s: &str) -> Result<Self> {
        s.chars()
            .enumerate()
            .map(|(offset, ch)| match ch {
                '0' => Ok(Bit::Zero),
                '1' => Ok(Bit::One),
                _ => Err(HuffmanError::InvalidBit { ch, offset }),
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}

// a lone leaf root gets code word 0
pub fn derive_codes<S: Ord + Clone>(root: &TreeNode<S>) -> CodeTable<S> {
    let mut codes = CodeTable::new();
    match root {
        TreeNode::Leaf { symbol, .. } => {
            warn!("single-symbol alphabet, forcing code word 0");
            codes.insert(symbol.clone(), vec![Bit::Zero]);
        }
        TreeNode::Internal { .. } => fill(root, Vec::new(), &mut codes),
    }
    debug!(symbols = codes.len(), "derived code table");
    codes
}

fn fill<S: Ord + Clone>(node: &TreeNode<S>, code: CodeWord, codes: &mut CodeTable<S>) {
    match node {
        TreeNode::Leaf { symbol, .. } => {
            codes.insert(symbol.clone(), code);
        }
        TreeNode::Internal { left, right, .. } => {
            let mut left_code = code.clone();
            left_code.push(Bit::Zero);
            fill(left, left_code, codes);

            let mut right_code = code;
            right_code.push(Bit::One);
            fill(right, right_code, codes);
        }
    }
}

pub fn encode<S, I>(input: I, codes: &CodeTable<S>) -> Result<EncodedStream>
where
    S: Ord + Debug,
    I: IntoIterator<Item = S>,
{
    let mut encoded = EncodedStream::new();
    let mut symbols = 0usize;
    for symbol in input {
        let Some(code) = codes.get(&symbol) else {
            return Err(HuffmanError::Lookup {
                symbol: format!("{symbol:?}"),
            });
        };
        encoded.extend_from_slice(code);
        symbols += 1;
    }

    debug!(symbols, bits = encoded.len(), "encoded message");
    Ok(encoded)
}

pub fn decode<S: Clone>(stream: &EncodedStream, root: &TreeNode<S>) -> Result<Vec<S>> {
    let mut decoded = Vec::new();

    // lone leaf: every 0 bit is one occurrence
    if let TreeNode::Leaf { symbol, .. } = root {
        for (offset, bit) in stream.bits().iter().enumerate() {
            if *bit != Bit::Zero {
                return Err(HuffmanError::MalformedStream {
                    offset,
                    reason: "single-symbol code only uses bit 0",
                });
            }
            decoded.push(symbol.clone());
        }
        return Ok(decoded);
    }

    let mut current_node = root;
    for (offset, bit) in stream.bits().iter().enumerate() {
        current_node = match (current_node, bit) {
            (TreeNode::Internal { left, .. }, Bit::Zero) => left.as_ref(),
            (TreeNode::Internal { right, .. }, Bit::One) => right.as_ref(),
            (TreeNode::Leaf { .. }, _) => return Err(HuffmanError::CorruptTree { offset }),
        };

        if let TreeNode::Leaf { symbol, .. } = current_node {
            decoded.push(symbol.clone());
            current_node = root;
        }
    }

    if !std::ptr::eq(current_node, root) {
        return Err(HuffmanError::MalformedStream {
            offset: stream.len(),
            reason: "stream ends inside a code word",
        });
    }

    debug!(bits = stream.len(), symbols = decoded.len(), "decoded message");
    Ok(decoded)
}

pub fn encode_str(text: &str) -> Result<(EncodedStream, CodeTable<char>)> {
    let huffman = Huffman::new(text.chars())?;
    let encoded = huffman.encode(text.chars())?;
    Ok((encoded, huffman.codes))
}

pub fn decode_str(stream: &EncodedStream, root: &TreeNode<char>) -> Result<String> {
    Ok(decode(stream, root)?.into_iter().collect())
}

#[derive(Debug, Clone)]
pub struct Huffman<S> {
    root: TreeNode<S>,
    codes: CodeTable<S>,
}

impl<S: Ord + Clone + Debug> Huffman<S> {
    pub fn new<I: IntoIterator<Item = S>>(input: I) -> Result<Self> {
        Self::from_frequencies(&count_frequencies(input))
    }

    pub fn from_frequencies(freq: &FrequencyTable<S>) -> Result<Self> {
        let root = build_tree(freq)?;
        let codes = derive_codes(&root);
        Ok(Self { root, codes })
    }

    pub fn root(&self) -> &TreeNode<S> {
        &self.root
    }

    pub fn codes(&self) -> &CodeTable<S> {
        &self.codes
    }

    pub fn encode<I: IntoIterator<Item = S>>(&self, input: I) -> Result<EncodedStream> {
        encode(input, &self.codes)
    }

    pub fn decode(&self, stream: &EncodedStream) -> Result<Vec<S>> {
        decode(stream, &self.root)
    }
}
