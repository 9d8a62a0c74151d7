use std::collections::BTreeMap;

use crate::error::{HuffmanError, Result};

pub type FrequencyTable<S> = BTreeMap<S, u64>;

pub fn count_frequencies<S, I>(input: I) -> FrequencyTable<S>
where
    S: Ord,
    I: IntoIterator<Item = S>,
{
    let mut freq = FrequencyTable::new();
    for symbol in input {
        *freq.entry(symbol).or_default() += 1;
    }
    freq
}

/// Parses `h=1,e=1,l=3`. Keys are not trimmed, so `" =1"` is the space.
pub fn parse_frequencies(literal: &str) -> Result<FrequencyTable<char>> {
    let mut freq = FrequencyTable::new();

    for entry in literal.split(',').filter(|e| !e.is_empty()) {
        let Some((key, count)) = entry.rsplit_once('=') else {
            return Err(HuffmanError::InvalidInput(format!(
                "expected symbol=count, got {entry:?}"
            )));
        };

        let mut chars = key.chars();
        let (Some(symbol), None) = (chars.next(), chars.next()) else {
            return Err(HuffmanError::InvalidInput(format!(
                "symbol must be a single character, got {key:?}"
            )));
        };

        let count: u64 = count.trim().parse().map_err(|e| {
            HuffmanError::InvalidInput(format!("bad count for {symbol:?}: {e}"))
        })?;
        if count == 0 {
            return Err(HuffmanError::InvalidInput(format!(
                "count for {symbol:?} must be positive"
            )));
        }

        if freq.insert(symbol, count).is_some() {
            return Err(HuffmanError::InvalidInput(format!(
                "symbol {symbol:?} listed twice"
            )));
        }
    }

    Ok(freq)
}
