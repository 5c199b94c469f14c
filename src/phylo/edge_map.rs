use super::bipartition::{BipartitionTable, build_bipartitions};
use super::edge_label::EdgeLabel;
use crate::TreeParseError;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;

/// Result of translating one edge label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Translation {
    /// The edge exists in the base tree under this label.
    Mapped(EdgeLabel),
    /// The edge's bipartition has no counterpart in the base tree.
    NoMatch,
    /// Several edges share the label and do not translate to the same base
    /// edge.
    Ambiguous,
    /// The label does not occur in the relabeled tree.
    UnknownLabel,
}

/// Old edge label to base edge label, built for one pair of trees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationMap {
    labels: FxHashMap<EdgeLabel, Translation>,
}

impl TranslationMap {
    pub fn translate(&self, label: EdgeLabel) -> Translation {
        self.labels.get(&label).copied().unwrap_or(Translation::UnknownLabel)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EdgeLabel, Translation)> {
        self.labels.iter().map(|(old, new)| (*old, *new))
    }

    /// Labels of the relabeled tree that have no single base edge.
    pub fn unmatched(&self) -> Vec<EdgeLabel> {
        let mut unmatched: Vec<EdgeLabel> = self
            .labels
            .iter()
            .filter_map(|(old, new)| {
                (!matches!(new, Translation::Mapped(_))).then_some(*old)
            })
            .collect();
        unmatched.sort_unstable();
        unmatched
    }

    fn record(&mut self, old: EdgeLabel, new: Option<EdgeLabel>) {
        let outcome = match new {
            Some(new_label) => Translation::Mapped(new_label),
            None => Translation::NoMatch,
        };
        match self.labels.entry(old) {
            Entry::Vacant(entry) => {
                _ = entry.insert(outcome);
            }
            Entry::Occupied(mut entry) => {
                if *entry.get() != outcome {
                    _ = entry.insert(Translation::Ambiguous);
                }
            }
        }
    }
}

/// Aligns a relabeled table with a completed base table by bipartition.
///
/// Every label of `relabeled` appears in the result; bipartitions missing
/// from `completed_base` are `NoMatch`. A label shared by several
/// bipartitions (unlabeled edges) translates only if all of them reach the
/// same base edge, otherwise it is `Ambiguous`.
pub fn map_bipartitions(
    relabeled: &BipartitionTable,
    completed_base: &BipartitionTable,
) -> TranslationMap {
    let mut map = TranslationMap::default();
    for (key, old_label) in relabeled.iter() {
        map.record(old_label, completed_base.get(key));
    }
    map
}

/// Builds the translation from `relabeled`'s edge numbering to `base`'s.
///
/// Only the base table is completed. Any bipartition of the relabeled tree,
/// whichever side its rooting exposes, is then found either as an original
/// base key or as its complement.
pub fn map_edge_labels(
    relabeled: &str,
    base: &str,
) -> Result<TranslationMap, TreeParseError> {
    let relabeled = build_bipartitions(relabeled)?;
    let base = build_bipartitions(base)?;
    Ok(map_bipartitions(&relabeled.table, &base.completed()))
}
