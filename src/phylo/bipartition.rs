use super::edge_label::EdgeLabel;
use crate::TreeParseError;
use crate::parsers::newick::{NewickTokenizer, Token, edge_number, leaf_name};
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::sync::Arc;

pub type LeafName = Arc<str>;
pub type LeafSet = BTreeSet<LeafName>;

/// Canonical identity of one side of an edge: its sorted, de-duplicated
/// leaf names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BipartitionKey(Box<[LeafName]>);

impl BipartitionKey {
    pub fn new<I, S>(leaves: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<LeafName>,
    {
        let mut leaves: Vec<LeafName> =
            leaves.into_iter().map(Into::into).collect();
        leaves.sort_unstable();
        leaves.dedup();
        Self(leaves.into_boxed_slice())
    }

    fn from_set(leaves: &LeafSet) -> Self {
        Self(leaves.iter().cloned().collect())
    }

    fn singleton(leaf: LeafName) -> Self {
        Self(Box::new([leaf]))
    }

    pub fn leaves(&self) -> &[LeafName] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, leaf: &str) -> bool {
        self.0.binary_search_by(|l| (**l).cmp(leaf)).is_ok()
    }

    /// Leaves of `universe` that are not on this side of the edge.
    pub fn complement(&self, universe: &LeafSet) -> Self {
        Self(universe.iter().filter(|l| !self.contains(l)).cloned().collect())
    }
}

impl Display for BipartitionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.0.join(","))
    }
}

/// Maps each bipartition of a tree to the label of the edge inducing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BipartitionTable {
    entries: FxHashMap<BipartitionKey, EdgeLabel>,
}

impl BipartitionTable {
    pub fn get(&self, key: &BipartitionKey) -> Option<EdgeLabel> {
        self.entries.get(key).copied()
    }

    /// Looks up the edge separating `leaves` from the rest of the tree.
    pub fn lookup<I, S>(&self, leaves: I) -> Option<EdgeLabel>
    where
        I: IntoIterator<Item = S>,
        S: Into<LeafName>,
    {
        self.get(&BipartitionKey::new(leaves))
    }

    pub fn contains_key(&self, key: &BipartitionKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BipartitionKey, EdgeLabel)> {
        self.entries.iter().map(|(key, label)| (key, *label))
    }

    pub fn labels(&self) -> impl Iterator<Item = EdgeLabel> + '_ {
        self.entries.values().copied()
    }

    fn insert_new(
        &mut self,
        key: BipartitionKey,
        label: EdgeLabel,
    ) -> Result<(), TreeParseError> {
        if let Some(first) = self.entries.get(&key) {
            return Err(TreeParseError::DuplicateBipartition {
                first: *first,
                second: label,
                leaves: key.to_string(),
            });
        }
        _ = self.entries.insert(key, label);
        Ok(())
    }
}

/// Bipartitions discovered while reading one tree, together with every
/// leaf name the tree contains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeBipartitions {
    pub table: BipartitionTable,
    pub leaves: LeafSet,
}

impl TreeBipartitions {
    pub fn completed(&self) -> BipartitionTable {
        complete_bipartitions(&self.table, &self.leaves)
    }
}

/// Reads a NEWICK string and records the leaf set below every edge.
///
/// Each `(` pushes a frame that collects the leaves seen at that depth. A
/// leaf is added to the top frame and recorded as a singleton bipartition
/// for its pendant edge. A `)` pops the top frame, records it under the
/// edge number written after the parenthesis and folds its leaves into the
/// frame below. The outermost frame spans every leaf, so closing it records
/// nothing.
///
/// Nesting is tracked on an explicit stack; input depth never grows the
/// call stack.
pub fn build_bipartitions(
    tree: &str,
) -> Result<TreeBipartitions, TreeParseError> {
    let tokens = NewickTokenizer::new(tree)?;
    let mut frames: Vec<LeafSet> = Vec::new();
    let mut table = BipartitionTable::default();
    let mut leaves = LeafSet::new();

    for (position, token) in tokens.enumerate() {
        // Only the terminator may follow the closing of the root.
        if position > 0 && frames.is_empty() {
            match token {
                Token::Terminator => break,
                Token::Close(_) => {
                    return Err(TreeParseError::UnbalancedClose(position));
                }
                _ => {
                    return Err(TreeParseError::TrailingContent(
                        token.to_string(),
                    ));
                }
            }
        }
        match token {
            Token::Open => frames.push(LeafSet::new()),
            Token::Leaf(raw) => {
                let name: LeafName = leaf_name(raw).into();
                if name.is_empty() {
                    return Err(TreeParseError::EmptyLeafName(raw.to_string()));
                }
                if let Some(top) = frames.last_mut() {
                    _ = top.insert(name.clone());
                }
                table.insert_new(
                    BipartitionKey::singleton(name.clone()),
                    edge_number(raw),
                )?;
                _ = leaves.insert(name);
            }
            Token::Close(annotation) => {
                let frame = frames
                    .pop()
                    .ok_or(TreeParseError::UnbalancedClose(position))?;
                if let Some(parent) = frames.last_mut() {
                    if !frame.is_empty() {
                        table.insert_new(
                            BipartitionKey::from_set(&frame),
                            edge_number(annotation),
                        )?;
                    }
                    parent.extend(frame);
                }
            }
            Token::Terminator => break,
        }
    }

    if !frames.is_empty() {
        return Err(TreeParseError::UnclosedParen(frames.len()));
    }
    if leaves.is_empty() {
        return Err(TreeParseError::NoLeaves);
    }

    Ok(TreeBipartitions { table, leaves })
}

/// Adds the other side of every non-trivial bipartition to a copy of
/// `table`.
///
/// Entries with a single leaf, or spanning the whole `universe`, are not
/// complemented. A complement that is already a key keeps its own label.
pub fn complete_bipartitions(
    table: &BipartitionTable,
    universe: &LeafSet,
) -> BipartitionTable {
    let mut completed = table.clone();
    for (key, label) in table.iter() {
        if key.len() > 1 && key.len() < universe.len() {
            _ = completed
                .entries
                .entry(key.complement(universe))
                .or_insert(label);
        }
    }
    completed
}
