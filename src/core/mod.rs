pub mod metrics;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Sentinel bucket for files without an extension.
pub const NO_EXTENSION: &str = "no_extension";

/// Metadata facts about one discovered file. Captured once from a stat
/// call; the analysis core never re-derives them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: PathBuf,
    pub size: u64,
    /// Lowercased extension, `None` when the file has none.
    pub extension: Option<String>,
    pub directory: Option<PathBuf>,
    pub basename: String,
}

impl SourceFile {
    /// Stat `path` for the distribution pass. A file that vanished between
    /// discovery and stat keeps a zero size rather than failing the batch.
    pub fn from_path(path: &Path) -> Self {
        let size = std::fs::metadata(path).map(|meta| meta.len()).unwrap_or(0);
        Self::with_size(path, size)
    }

    pub fn with_size(path: &Path, size: u64) -> Self {
        SourceFile {
            path: path.to_path_buf(),
            size,
            extension: path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.to_ascii_lowercase()),
            directory: path.parent().map(Path::to_path_buf),
            basename: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }

    /// Basename with the extension stripped, as the naming patterns see it.
    pub fn stem(&self) -> &str {
        match self.basename.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => &self.basename,
        }
    }
}

/// Root aggregate produced by one analysis invocation. A pure function of
/// the input file lists; nothing here persists between runs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub project_path: PathBuf,
    pub timestamp: DateTime<Utc>,
    pub loc: LocStats,
    pub complexity: ComplexityStats,
    pub nesting: NestingStats,
    pub structure: StructureStats,
    pub file_types: Vec<FileTypeCount>,
    pub size_buckets: SizeBuckets,
    pub directories: Vec<DirectoryCount>,
    pub naming: NamingStats,
    pub largest_files: Vec<FileSizeEntry>,
    pub dependencies: DependencyReport,
    pub diagnostics: Diagnostics,
    pub summary: Summary,
}

/// Corpus line counts. `total_lines` always equals
/// `code_lines + comment_lines + blank_lines`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LocStats {
    pub total_lines: usize,
    pub code_lines: usize,
    pub comment_lines: usize,
    pub blank_lines: usize,
    /// `comment_lines / total_lines * 100`, two decimals, 0 when empty.
    pub comment_ratio: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplexityStats {
    pub total_complexity: u64,
    pub average_complexity: f64,
    pub files_analyzed: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NestingStats {
    /// Corpus-wide maximum depth.
    pub max_nesting_depth: u32,
    /// Mean of the per-file maxima.
    pub average_nesting_depth: f64,
}

/// Method/class density. Totals count declarations; the averages derive
/// only from extents that actually closed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureStats {
    pub total_methods: usize,
    pub total_classes: usize,
    pub average_method_length: f64,
    pub average_class_size: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTypeCount {
    pub extension: String,
    pub count: usize,
}

/// Half-open size buckets; each boundary belongs to the bucket above it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeBuckets {
    /// < 1 KiB
    pub tiny: usize,
    /// 1 KiB .. 10 KiB
    pub small: usize,
    /// 10 KiB .. 100 KiB
    pub medium: usize,
    /// 100 KiB .. 1 MiB
    pub large: usize,
    /// >= 1 MiB
    pub huge: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryCount {
    pub directory: PathBuf,
    pub count: usize,
}

/// Naming-pattern counters over the basename without extension. The
/// counters are independent; one file may increment several.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingStats {
    pub snake_case: usize,
    pub camel_case: usize,
    pub mixed_case: usize,
    pub with_numbers: usize,
    pub test_files: usize,
    pub spec_files: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSizeEntry {
    pub path: PathBuf,
    pub size: u64,
}

/// Gems declared across the discovered manifests.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyReport {
    pub manifests_analyzed: usize,
    pub runtime_gems: Vec<String>,
    pub development_gems: Vec<String>,
}

/// Per-run bookkeeping. `files_analyzed` may sit below `files_discovered`
/// when paths were skipped; that is a valid outcome, not an error.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub files_discovered: usize,
    pub files_analyzed: usize,
    pub files_skipped: Vec<PathBuf>,
}

/// Representative values picked from the already-computed aggregates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_files: usize,
    pub total_lines: usize,
    pub total_methods: usize,
    pub total_classes: usize,
    pub average_complexity: f64,
    pub most_common_extension: Option<String>,
    pub largest_directory: Option<PathBuf>,
}
