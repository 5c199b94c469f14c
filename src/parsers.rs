pub(crate) mod newick;

use crate::EdgeLabel;

/// Errors raised while reading the structure of a NEWICK tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeParseError {
    #[error("The tree does not start with \"(\".")]
    MissingOpenParen,
    #[error("Unbalanced \")\" at token {0}.")]
    UnbalancedClose(usize),
    #[error("Tree ended with {0} unclosed \"(\".")]
    UnclosedParen(usize),
    #[error("Unexpected content after the tree was closed: \"{0}\".")]
    TrailingContent(String),
    #[error("Leaf token \"{0}\" has an empty name.")]
    EmptyLeafName(String),
    #[error("Edges {first} and {second} both separate the leaves {leaves}.")]
    DuplicateBipartition {
        first: EdgeLabel,
        second: EdgeLabel,
        leaves: String,
    },
    #[error("The tree has no leaves.")]
    NoLeaves,
}
