use super::document::{FieldLayout, Placement};
use crate::TreeFloat;
use crate::phylo::edge_label::EdgeLabel;
use crate::phylo::edge_lengths::EdgeLengthTable;
use crate::phylo::edge_map::{Translation, TranslationMap};
use log::{debug, warn};
use serde_json::Value;

/// Fraction of the nominal edge length a clamped distal length is set to.
pub const DISTAL_CLAMP_FACTOR: TreeFloat = 0.99;

/// Counts gathered while relabeling one set of placements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelabelSummary {
    pub rows: usize,
    pub relabeled: usize,
    pub unmatched: usize,
    pub clamped: usize,
}

/// Pulls a distal length that overshoots its edge back onto the edge.
///
/// Values not exceeding `nominal` are returned unchanged, so clamping twice
/// gives the same result as clamping once.
pub fn clamp_distal_length(
    distal: TreeFloat,
    nominal: TreeFloat,
    factor: TreeFloat,
) -> TreeFloat {
    if distal > nominal { nominal * factor } else { distal }
}

/// Rewrites the edge column of every placement row into the base numbering
/// and clamps distal lengths against the base tree's edges.
///
/// Rows whose edge cannot be translated are left untouched.
pub fn relabel_placements(
    placements: &mut [Placement],
    map: &TranslationMap,
    lengths: &EdgeLengthTable,
    layout: FieldLayout,
    clamp_factor: TreeFloat,
) -> RelabelSummary {
    let mut summary = RelabelSummary::default();
    for row in placements.iter_mut().flat_map(|placement| placement.p.iter_mut())
    {
        summary.rows += 1;
        let Some(old_label) = row.get(layout.edge).and_then(edge_label_from_json)
        else {
            warn!("Placement row {row:?} has no readable edge label.");
            summary.unmatched += 1;
            continue;
        };
        let new_label = match map.translate(old_label) {
            Translation::Mapped(new_label) => new_label,
            Translation::NoMatch => {
                warn!("Edge {old_label} has no matching bipartition in the base tree.");
                summary.unmatched += 1;
                continue;
            }
            Translation::Ambiguous => {
                warn!("Edge label {old_label} is shared by edges with different base edges.");
                summary.unmatched += 1;
                continue;
            }
            Translation::UnknownLabel => {
                warn!("Edge {old_label} does not occur in the placement tree.");
                summary.unmatched += 1;
                continue;
            }
        };
        row[layout.edge] = edge_label_to_json(new_label);
        summary.relabeled += 1;

        let Some(distal) = row.get(layout.distal).and_then(Value::as_f64) else {
            continue;
        };
        match lengths.get(new_label) {
            Some(nominal) => {
                let clamped = clamp_distal_length(distal, nominal, clamp_factor);
                if clamped != distal {
                    debug!(
                        "Clamping distal length {distal} on edge {new_label} to {clamped}."
                    );
                    row[layout.distal] = Value::from(clamped);
                    summary.clamped += 1;
                }
            }
            None => warn!("Base tree has no length for edge {new_label}."),
        }
    }
    summary
}

fn edge_label_from_json(value: &Value) -> Option<EdgeLabel> {
    match value {
        Value::Number(n) => n.as_u64().map(EdgeLabel::Number),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn edge_label_to_json(label: EdgeLabel) -> Value {
    match label {
        EdgeLabel::Number(n) => Value::from(n),
        EdgeLabel::Unlabeled => Value::from(label.to_string()),
    }
}
