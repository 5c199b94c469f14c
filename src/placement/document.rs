use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const EDGE_FIELD: &str = "edge_num";
const DISTAL_FIELD: &str = "distal_length";
const DEFAULT_EDGE_COLUMN: usize = 0;
const DEFAULT_DISTAL_COLUMN: usize = 3;

pub const MERGED_INVOCATION: &str = "SEPP-generated json file.";
pub const MERGED_VERSION: u32 = 1;

/// One query sequence and its candidate attachment points.
///
/// Each row of `p` follows the document's `fields` schema. Any other keys
/// (`n`, `nm`, ...) are carried through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub p: Vec<Vec<Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Placement {
    /// Sort key made of the `n` field followed by the `nm` field.
    pub fn sort_key(&self) -> String {
        let mut key = key_text(self.extra.get("n"));
        key.push_str(&key_text(self.extra.get("nm")));
        key
    }
}

fn key_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Stable sort of placements by [Placement::sort_key].
pub fn sort_placements(placements: &mut [Placement]) {
    placements.par_sort_by_cached_key(Placement::sort_key);
}

/// A single placement result file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementDocument {
    pub tree: String,
    pub placements: Vec<Placement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Columns of a placement row that relabeling touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub edge: usize,
    pub distal: usize,
}

impl Default for FieldLayout {
    fn default() -> Self {
        Self { edge: DEFAULT_EDGE_COLUMN, distal: DEFAULT_DISTAL_COLUMN }
    }
}

impl FieldLayout {
    /// Resolves the columns by name, falling back to the default column for
    /// any name the schema lacks.
    pub fn from_fields(fields: Option<&[String]>) -> Self {
        let position = |name: &str| {
            fields.and_then(|fields| fields.iter().position(|f| f == name))
        };
        Self {
            edge: position(EDGE_FIELD).unwrap_or(DEFAULT_EDGE_COLUMN),
            distal: position(DISTAL_FIELD).unwrap_or(DEFAULT_DISTAL_COLUMN),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub invocation: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Self { invocation: MERGED_INVOCATION.to_string() }
    }
}

/// The combined output of a merge run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedDocument {
    pub tree: String,
    pub placements: Vec<Placement>,
    pub metadata: Metadata,
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

/// Accumulates the placements of successive files.
#[derive(Debug, Clone, Default)]
pub struct MergedPlacements {
    placements: Vec<Placement>,
    fields: Option<Vec<String>>,
}

impl MergedPlacements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a file's placements; its `fields`, when present, replace any
    /// earlier schema.
    pub fn append(&mut self, document: PlacementDocument) {
        self.placements.extend(document.placements);
        if document.fields.is_some() {
            self.fields = document.fields;
        }
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn fields(&self) -> Option<&[String]> {
        self.fields.as_deref()
    }

    pub fn sort(&mut self) {
        sort_placements(&mut self.placements);
    }

    pub fn into_document(self, tree: String) -> MergedDocument {
        MergedDocument {
            tree,
            placements: self.placements,
            metadata: Metadata::default(),
            version: MERGED_VERSION,
            fields: self.fields,
        }
    }
}
