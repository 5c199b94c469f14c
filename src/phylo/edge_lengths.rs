use super::TreeFloat;
use super::edge_label::EdgeLabel;
use log::debug;
use rustc_hash::FxHashMap;

/// Nominal branch length of every numbered edge of the base tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeLengthTable {
    lengths: FxHashMap<EdgeLabel, TreeFloat>,
}

impl EdgeLengthTable {
    /// Collects every `:<length>[<edge>]` segment of a NEWICK string.
    ///
    /// Segments whose length is not a number, or whose bracket does not hold
    /// an edge number, are skipped.
    pub fn from_newick(tree: &str) -> Self {
        let mut lengths = FxHashMap::default();
        for (colon, _) in tree.match_indices(':') {
            let rest = &tree[colon + 1..];
            let Some(length_end) =
                rest.find(['[', ',', '(', ')', ';', ':', '{'])
            else {
                continue;
            };
            if !rest[length_end..].starts_with('[') {
                continue;
            }
            let Some(label_len) = rest[length_end + 1..].find(']') else {
                continue;
            };
            let length_text = rest[..length_end].trim();
            let label_text = &rest[length_end + 1..length_end + 1 + label_len];
            match (
                length_text.parse::<TreeFloat>(),
                label_text.parse::<EdgeLabel>(),
            ) {
                (Ok(length), Ok(label)) if label.is_labeled() => {
                    _ = lengths.insert(label, length);
                }
                _ => debug!(
                    "Skipping branch annotation \":{length_text}[{label_text}]\"."
                ),
            }
        }
        Self { lengths }
    }

    pub fn get(&self, label: EdgeLabel) -> Option<TreeFloat> {
        self.lengths.get(&label).copied()
    }

    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }
}
