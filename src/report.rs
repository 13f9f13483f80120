//! Report composition.
//!
//! Merges the corpus fold, the metadata distributions, and the manifest
//! results into one `AnalysisReport`, then derives the summary by picking
//! representative values. No metric is computed here that was not already
//! computed upstream.

use crate::aggregate::{self, CorpusMetrics};
use crate::core::{
    AnalysisReport, ComplexityStats, DependencyReport, Diagnostics, FileTypeCount, LocStats,
    NestingStats, SourceFile, StructureStats, Summary,
};
use crate::distribution;
use crate::manifest;
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Tunables for one analysis invocation.
#[derive(Clone, Debug)]
pub struct AnalyzeOptions {
    /// Entries kept in the largest-files listing.
    pub largest_files: usize,
    /// Run the per-file pass on the rayon pool.
    pub parallel: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            largest_files: 10,
            parallel: true,
        }
    }
}

/// Run the whole engine over already-discovered file lists.
///
/// `sources` and `manifests` come from the discovery collaborator; this
/// function never walks directories itself. An empty input produces a
/// zero-valued report.
pub fn analyze(
    project_path: &Path,
    sources: &[PathBuf],
    manifests: &[PathBuf],
    options: &AnalyzeOptions,
) -> AnalysisReport {
    let corpus = aggregate::analyze_files(sources, options.parallel);
    let metadata: Vec<SourceFile> = sources.iter().map(|path| SourceFile::from_path(path)).collect();
    let dependencies = manifest::analyze_manifests(manifests);
    compose_report(project_path, sources.len(), corpus, &metadata, dependencies, options)
}

/// Merge already-computed aggregates into the final report.
pub fn compose_report(
    project_path: &Path,
    files_discovered: usize,
    corpus: CorpusMetrics,
    metadata: &[SourceFile],
    dependencies: DependencyReport,
    options: &AnalyzeOptions,
) -> AnalysisReport {
    let file_types = distribution::file_type_counts(metadata);
    let directories = distribution::directory_counts(metadata);

    let summary = Summary {
        total_files: corpus.files_analyzed,
        total_lines: corpus.lines.total,
        total_methods: corpus.method_declarations,
        total_classes: corpus.class_declarations,
        average_complexity: corpus.average_complexity(),
        most_common_extension: most_common_extension(&file_types),
        largest_directory: directories.first().map(|entry| entry.directory.clone()),
    };

    AnalysisReport {
        project_path: project_path.to_path_buf(),
        timestamp: Utc::now(),
        loc: LocStats {
            total_lines: corpus.lines.total,
            code_lines: corpus.lines.code,
            comment_lines: corpus.lines.comment,
            blank_lines: corpus.lines.blank,
            comment_ratio: corpus.comment_ratio(),
        },
        complexity: ComplexityStats {
            total_complexity: corpus.total_complexity,
            average_complexity: corpus.average_complexity(),
            files_analyzed: corpus.files_analyzed,
        },
        nesting: NestingStats {
            max_nesting_depth: corpus.max_nesting_depth,
            average_nesting_depth: corpus.average_nesting_depth(),
        },
        structure: StructureStats {
            total_methods: corpus.method_declarations,
            total_classes: corpus.class_declarations,
            average_method_length: corpus.average_method_length(),
            average_class_size: corpus.average_class_size(),
        },
        file_types,
        size_buckets: distribution::size_buckets(metadata),
        directories,
        naming: distribution::naming_stats(metadata),
        largest_files: distribution::largest_files(metadata, options.largest_files),
        dependencies,
        diagnostics: Diagnostics {
            files_discovered,
            files_analyzed: corpus.files_analyzed,
            files_skipped: corpus.files_skipped,
        },
        summary,
    }
}

/// Max by count; ties go to the earliest-seen extension because
/// `file_types` is in first-seen order and only a strictly greater count
/// replaces the candidate.
fn most_common_extension(file_types: &[FileTypeCount]) -> Option<String> {
    let mut best: Option<&FileTypeCount> = None;
    for entry in file_types {
        if best.map_or(true, |current| entry.count > current.count) {
            best = Some(entry);
        }
    }
    best.map(|entry| entry.extension.clone())
}
