pub(crate) mod bipartition;
pub(crate) mod edge_label;
pub(crate) mod edge_lengths;
pub(crate) mod edge_map;

use super::TreeFloat;
