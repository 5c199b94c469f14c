// -------------------------------------
// #![allow(dead_code)]
// #![allow(unused_mut)]
// #![allow(unused_imports)]
// #![allow(unused_variables)]
// #![allow(clippy::type_complexity)]
// #![allow(clippy::too_many_arguments)]
// -------------------------------------

mod io;
mod merge;
mod parsers;
mod phylo;
mod placement;

pub type TreeFloat = f64;

pub use io::json::to_string_pretty_compact_arrays;
pub use merge::BaseTree;
pub use merge::FileError;
pub use merge::MergeError;
pub use merge::MergeOptions;
pub use merge::MergeOutcome;
pub use merge::merge_directory;
pub use merge::placement_files;
pub use merge::sibling_path;
pub use merge::write_merged;
pub use parsers::TreeParseError;
pub use parsers::newick::NewickTokenizer;
pub use parsers::newick::Token;
pub use parsers::newick::edge_number;
pub use parsers::newick::leaf_name;
pub use phylo::bipartition::BipartitionKey;
pub use phylo::bipartition::BipartitionTable;
pub use phylo::bipartition::LeafName;
pub use phylo::bipartition::LeafSet;
pub use phylo::bipartition::TreeBipartitions;
pub use phylo::bipartition::build_bipartitions;
pub use phylo::bipartition::complete_bipartitions;
pub use phylo::edge_label::EdgeLabel;
pub use phylo::edge_label::ParseEdgeLabelError;
pub use phylo::edge_lengths::EdgeLengthTable;
pub use phylo::edge_map::Translation;
pub use phylo::edge_map::TranslationMap;
pub use phylo::edge_map::map_bipartitions;
pub use phylo::edge_map::map_edge_labels;
pub use placement::DISTAL_CLAMP_FACTOR;
pub use placement::FieldLayout;
pub use placement::MergedDocument;
pub use placement::MergedPlacements;
pub use placement::Metadata;
pub use placement::Placement;
pub use placement::PlacementDocument;
pub use placement::RelabelSummary;
pub use placement::clamp_distal_length;
pub use placement::relabel_placements;
pub use placement::sort_placements;
