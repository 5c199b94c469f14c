use std::fmt::Display;
use std::str::FromStr;

/// Identifier a tool run attached to a tree edge.
///
/// Labels are only meaningful within the tree that carries them. Edges
/// without a parseable number are [EdgeLabel::Unlabeled], written as `?`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeLabel {
    #[default]
    Unlabeled,
    Number(u64),
}

impl EdgeLabel {
    pub fn number(&self) -> Option<u64> {
        match self {
            EdgeLabel::Number(n) => Some(*n),
            EdgeLabel::Unlabeled => None,
        }
    }

    pub fn is_labeled(&self) -> bool {
        matches!(self, EdgeLabel::Number(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid edge label: \"{0}\".")]
pub struct ParseEdgeLabelError(pub String);

impl FromStr for EdgeLabel {
    type Err = ParseEdgeLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "?" => Ok(EdgeLabel::Unlabeled),
            digits if !digits.is_empty()
                && digits.bytes().all(|b| b.is_ascii_digit()) =>
            {
                digits
                    .parse::<u64>()
                    .map(EdgeLabel::Number)
                    .map_err(|_| ParseEdgeLabelError(s.to_string()))
            }
            _ => Err(ParseEdgeLabelError(s.to_string())),
        }
    }
}

impl From<u64> for EdgeLabel {
    fn from(value: u64) -> Self {
        EdgeLabel::Number(value)
    }
}

impl Display for EdgeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeLabel::Number(n) => write!(f, "{n}"),
            EdgeLabel::Unlabeled => write!(f, "?"),
        }
    }
}
