mod document;
mod relabel;

pub use document::FieldLayout;
pub use document::MergedDocument;
pub use document::MergedPlacements;
pub use document::Metadata;
pub use document::Placement;
pub use document::PlacementDocument;
pub use document::sort_placements;
pub use relabel::DISTAL_CLAMP_FACTOR;
pub use relabel::RelabelSummary;
pub use relabel::clamp_distal_length;
pub use relabel::relabel_placements;
