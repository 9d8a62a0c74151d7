use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::{self, Debug, Display};

use tracing::{debug, trace};

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode<S> {
    Leaf {
        symbol: S,
        freq: u64,
    },
    Internal {
        freq: u64,
        left: Box<TreeNode<S>>,
        right: Box<TreeNode<S>>,
    },
}

impl<S> TreeNode<S> {
    pub fn new_leaf(symbol: S, freq: u64) -> Self {
        TreeNode::Leaf { symbol, freq }
    }

    pub fn new_internal(left: TreeNode<S>, right: TreeNode<S>) -> Self {
        TreeNode::Internal {
            freq: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            TreeNode::Leaf { freq, .. } | TreeNode::Internal { freq, .. } => *freq,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }
}

impl<S: Debug> TreeNode<S> {
    pub fn render(&self) -> String {
        self.to_string()
    }
}

// one node per line, branches labelled with the bit that selects them
impl<S: Debug> Display for TreeNode<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_node(self, 0, "root", f)
    }
}

fn fmt_node<S: Debug>(
    node: &TreeNode<S>,
    depth: usize,
    label: &str,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    let indent = "  ".repeat(depth);
    match node {
        TreeNode::Leaf { symbol, freq } => {
            writeln!(f, "{indent}{label}: {symbol:?} (freq: {freq})")
        }
        TreeNode::Internal { freq, left, right } => {
            writeln!(f, "{indent}{label}: * (freq: {freq})")?;
            fmt_node(left, depth + 1, "0", f)?;
            fmt_node(right, depth + 1, "1", f)
        }
    }
}

// `seq` is push order; equal weights pop first-in first-out
#[derive(Debug)]
struct Pending<S> {
    node: TreeNode<S>,
    seq: usize,
}

impl<S> Eq for Pending<S> {}

impl<S> PartialEq for Pending<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S> Ord for Pending<S> {
    // reversed: BinaryHeap is a max-heap
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .node
            .weight()
            .cmp(&self.node.weight())
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<S> PartialOrd for Pending<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Leaves enter the queue in ascending symbol order and the first node
/// popped in each merge becomes the left child.
pub fn build_tree<S: Ord + Clone>(freq: &FrequencyTable<S>) -> Result<TreeNode<S>> {
    if freq.values().any(|&count| count == 0) {
        return Err(HuffmanError::InvalidInput(
            "frequency table contains a zero count".into(),
        ));
    }
    // every merged weight is bounded by the total
    if freq
        .values()
        .try_fold(0u64, |total, &count| total.checked_add(count))
        .is_none()
    {
        return Err(HuffmanError::InvalidInput(
            "total frequency overflows u64".into(),
        ));
    }

    let mut seq = 0;
    let mut pqueue = BinaryHeap::with_capacity(freq.len());
    for (symbol, &count) in freq {
        pqueue.push(Pending {
            node: TreeNode::new_leaf(symbol.clone(), count),
            seq,
        });
        seq += 1;
    }

    while pqueue.len() > 1 {
        let (Some(left), Some(right)) = (pqueue.pop(), pqueue.pop()) else {
            break;
        };
        trace!(
            left = left.node.weight(),
            right = right.node.weight(),
            "merging nodes"
        );
        pqueue.push(Pending {
            node: TreeNode::new_internal(left.node, right.node),
            seq,
        });
        seq += 1;
    }

    let root = pqueue.pop().map(|p| p.node).ok_or_else(|| {
        HuffmanError::InvalidInput("cannot build a tree from an empty frequency table".into())
    })?;

    debug!(
        symbols = freq.len(),
        weight = root.weight(),
        depth = root.depth(),
        "built huffman tree"
    );
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::count_frequencies;

    fn assert_full_binary<S>(node: &TreeNode<S>) {
        if let TreeNode::Internal { freq, left, right } = node {
            assert_eq!(*freq, left.weight() + right.weight());
            assert_full_binary(left);
            assert_full_binary(right);
        }
    }

    #[test]
    fn root_weight_is_total_count() {
        let freq = count_frequencies("hello world".chars());
        let root = build_tree(&freq).unwrap();
        assert_eq!(root.weight(), 11);
        assert_eq!(root.leaf_count(), 8);
        assert_full_binary(&root);
    }

    #[test]
    fn two_symbols_lighter_goes_left() {
        let freq = count_frequencies("aaab".chars());
        let root = build_tree(&freq).unwrap();
        let TreeNode::Internal { freq, left, right } = root else {
            panic!("expected internal root");
        };
        assert_eq!(freq, 4);
        assert_eq!(*left, TreeNode::new_leaf('b', 1));
        assert_eq!(*right, TreeNode::new_leaf('a', 3));
    }

    #[test]
    fn ties_pop_in_insertion_order() {
        let freq = count_frequencies("abcd".chars());
        let first = build_tree(&freq).unwrap();
        let second = build_tree(&freq).unwrap();
        assert_eq!(first, second);
        // a,b merge first, then c,d, then the two pairs
        let expected = TreeNode::new_internal(
            TreeNode::new_internal(TreeNode::new_leaf('a', 1), TreeNode::new_leaf('b', 1)),
            TreeNode::new_internal(TreeNode::new_leaf('c', 1), TreeNode::new_leaf('d', 1)),
        );
        assert_eq!(first, expected);
        assert_eq!(first.depth(), 2);
    }

    #[test]
    fn single_symbol_is_leaf_root() {
        let freq = count_frequencies("zzz".chars());
        let root = build_tree(&freq).unwrap();
        assert!(root.is_leaf());
        assert_eq!(root.weight(), 3);
        assert_eq!(root.depth(), 0);
    }

    #[test]
    fn empty_table_is_invalid() {
        let freq = FrequencyTable::<char>::new();
        assert!(matches!(
            build_tree(&freq),
            Err(HuffmanError::InvalidInput(_))
        ));
    }

    #[test]
    fn zero_count_is_invalid() {
        let freq = FrequencyTable::from([('a', 2), ('b', 0)]);
        assert!(matches!(
            build_tree(&freq),
            Err(HuffmanError::InvalidInput(_))
        ));
    }

    #[test]
    fn overflowing_total_is_invalid() {
        let freq = FrequencyTable::from([('a', u64::MAX), ('b', 1)]);
        assert_eq!(
            build_tree(&freq),
            Err(HuffmanError::InvalidInput(
                "total frequency overflows u64".into()
            ))
        );
    }

    #[test]
    fn max_total_still_builds() {
        let freq = FrequencyTable::from([('a', u64::MAX - 1), ('b', 1)]);
        let root = build_tree(&freq).unwrap();
        assert_eq!(root.weight(), u64::MAX);
    }

    #[test]
    fn render_lists_every_node() {
        let freq = count_frequencies("aaab".chars());
        let root = build_tree(&freq).unwrap();
        let dump = root.render();
        assert_eq!(
            dump,
            "root: * (freq: 4)\n  0: 'b' (freq: 1)\n  1: 'a' (freq: 3)\n"
        );
        assert_eq!(root.to_string(), dump);
    }
}
