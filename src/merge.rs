use crate::TreeFloat;
use crate::TreeParseError;
use crate::io::json::write_json_file;
use crate::io::read_first_line;
use crate::phylo::bipartition::build_bipartitions;
use crate::phylo::edge_lengths::EdgeLengthTable;
use crate::phylo::edge_map::map_edge_labels;
use crate::placement::{
    DISTAL_CLAMP_FACTOR, FieldLayout, MergedDocument, MergedPlacements,
    PlacementDocument, relabel_placements,
};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Errors that stop a merge run.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("Cannot read base tree file {}: {source}.", .path.display())]
    BaseTree {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Base tree in {} is malformed: {source}", .path.display())]
    MalformedBaseTree {
        path: PathBuf,
        source: TreeParseError,
    },
    #[error("Input directory {} does not exist or is not a directory.", .0.display())]
    NotADirectory(PathBuf),
    #[error("Cannot read input directory {}: {source}.", .path.display())]
    InputDir {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[error("Cannot write output file {}: {source}.", .path.display())]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors that cause a single placement file to be skipped.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("Cannot read companion tree {}: {source}.", .path.display())]
    CompanionTree {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot read {}: {source}.", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid placement JSON in {}: {source}.", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Malformed tree for {}: {source}", .path.display())]
    MalformedTree {
        path: PathBuf,
        source: TreeParseError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergeOptions {
    /// Sort the merged placements by fragment name.
    pub sort: bool,
    /// Replaces `.json` in a result file name to find its labeled tree.
    pub companion_suffix: String,
    /// Replaces `.json` in a result file name for its relabeled copy.
    pub merged_suffix: String,
    pub clamp_factor: TreeFloat,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            sort: false,
            companion_suffix: ".labeled.tree".to_string(),
            merged_suffix: ".merged.json".to_string(),
            clamp_factor: DISTAL_CLAMP_FACTOR,
        }
    }
}

/// The reference tree every result set is translated into.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseTree {
    pub newick: String,
    pub lengths: EdgeLengthTable,
}

impl BaseTree {
    /// Quote characters are removed before the tree is checked.
    pub fn from_newick(newick: &str) -> Result<Self, TreeParseError> {
        let newick = newick.trim().replace('\'', "");
        _ = build_bipartitions(&newick)?;
        let lengths = EdgeLengthTable::from_newick(&newick);
        Ok(Self { newick, lengths })
    }

    /// Reads the tree on the first line of `path`.
    pub fn read(path: &Path) -> Result<Self, MergeError> {
        let line = read_first_line(path).map_err(|source| {
            MergeError::BaseTree { path: path.to_path_buf(), source }
        })?;
        Self::from_newick(&line).map_err(|source| {
            MergeError::MalformedBaseTree { path: path.to_path_buf(), source }
        })
    }
}

#[derive(Debug)]
pub struct MergeOutcome {
    pub document: MergedDocument,
    pub processed: Vec<PathBuf>,
    pub skipped: Vec<(PathBuf, FileError)>,
}

/// Replaces the first `.json` in the file name of `path` with `suffix`.
pub fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(name.replacen(".json", suffix, 1))
}

/// Placement result files directly inside `dir`, sorted by name.
///
/// A result file has `.json` in its name; files mentioning `merged` are
/// outputs of an earlier run and are left out.
pub fn placement_files(dir: &Path) -> Result<Vec<PathBuf>, MergeError> {
    if !dir.is_dir() {
        return Err(MergeError::NotADirectory(dir.to_path_buf()));
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name()
    {
        let entry = entry.map_err(|source| MergeError::InputDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let is_result = {
            let name = entry.file_name().to_string_lossy();
            name.contains(".json") && !name.contains("merged")
        };
        if is_result && entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn relabel_file(
    path: &Path,
    base: &BaseTree,
    options: &MergeOptions,
) -> Result<PlacementDocument, FileError> {
    let companion_path = sibling_path(path, &options.companion_suffix);
    let companion = read_first_line(&companion_path).map_err(|source| {
        FileError::CompanionTree { path: companion_path.clone(), source }
    })?;
    let content = std::fs::read_to_string(path).map_err(|source| {
        FileError::Read { path: path.to_path_buf(), source }
    })?;
    let mut document: PlacementDocument = serde_json::from_str(&content)
        .map_err(|source| FileError::Json { path: path.to_path_buf(), source })?;

    let map = map_edge_labels(&document.tree, &companion).map_err(|source| {
        FileError::MalformedTree { path: path.to_path_buf(), source }
    })?;
    let unmatched = map.unmatched();
    if !unmatched.is_empty() {
        debug!(
            "{}: {} edge labels without a single base edge: {unmatched:?}.",
            path.display(),
            unmatched.len()
        );
    }

    let layout = FieldLayout::from_fields(document.fields.as_deref());
    let summary = relabel_placements(
        &mut document.placements,
        &map,
        &base.lengths,
        layout,
        options.clamp_factor,
    );
    info!(
        "{}: relabeled {} of {} placement rows ({} unmatched, {} clamped).",
        path.display(),
        summary.relabeled,
        summary.rows,
        summary.unmatched,
        summary.clamped
    );

    document.tree.clone_from(&base.newick);
    Ok(document)
}

/// Translates every placement file in `input_dir` into the numbering of the
/// base tree and merges them.
///
/// Files are processed in parallel; a file that cannot be read, parsed or
/// mapped is skipped with a warning. Each processed file also gets a
/// relabeled copy next to it. The merged placements keep file-name order
/// unless `options.sort` is set.
pub fn merge_directory(
    input_dir: &Path,
    base_tree: &Path,
    options: &MergeOptions,
) -> Result<MergeOutcome, MergeError> {
    let base = BaseTree::read(base_tree)?;
    info!(
        "Base tree {} has {} numbered edge lengths.",
        base_tree.display(),
        base.lengths.len()
    );
    let files = placement_files(input_dir)?;
    info!("Merging {} placement files from {}.", files.len(), input_dir.display());

    let results: Vec<(PathBuf, Result<PlacementDocument, FileError>)> = files
        .into_par_iter()
        .map(|path| {
            let result = relabel_file(&path, &base, options);
            if let Ok(document) = &result {
                let merged_path = sibling_path(&path, &options.merged_suffix);
                if let Err(err) = write_json_file(&merged_path, document) {
                    warn!(
                        "Cannot write {}: {err}. The placements are still merged.",
                        merged_path.display()
                    );
                }
            }
            (path, result)
        })
        .collect();

    let mut merged = MergedPlacements::new();
    let mut processed = Vec::new();
    let mut skipped = Vec::new();
    for (path, result) in results {
        match result {
            Ok(document) => {
                merged.append(document);
                processed.push(path);
            }
            Err(err) => {
                warn!("{err} Skipping {}.", path.display());
                skipped.push((path, err));
            }
        }
    }

    if options.sort {
        merged.sort();
    }
    info!(
        "Merged {} placements from {} files; skipped {} files.",
        merged.len(),
        processed.len(),
        skipped.len()
    );

    Ok(MergeOutcome {
        document: merged.into_document(base.newick),
        processed,
        skipped,
    })
}

/// Writes the merged document to `path`.
pub fn write_merged(
    path: &Path,
    document: &MergedDocument,
) -> Result<(), MergeError> {
    write_json_file(path, document)
        .map_err(|source| MergeError::Output { path: path.to_path_buf(), source })
}
