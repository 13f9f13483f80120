//! Per-file metric extraction and the corpus fold.
//!
//! Each file is analyzed independently in a single pass over its classified
//! lines. The corpus totals are folded only after all per-file results are
//! collected, so the parallel map shares no mutable state and the derived
//! ratios are computed exactly once, at the corpus level.

use crate::classify::LineKind;
use crate::core::metrics::{percentage, safe_average};
use crate::extent::{BlockTracker, FileStructure};
use crate::scanner::{self, FileScan};
use lazy_static::lazy_static;
use log::warn;
use rayon::prelude::*;
use regex::Regex;
use std::path::{Path, PathBuf};

lazy_static! {
    static ref BRANCH_KEYWORDS: Regex =
        Regex::new(r"\b(if|unless|while|until|for|case)\b").unwrap();
    static ref RESCUE_KEYWORDS: Regex = Regex::new(r"\b(rescue|ensure)\b").unwrap();
}

/// Per-file line counts. `total == code + comment + blank` by construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineCounts {
    pub total: usize,
    pub code: usize,
    pub comment: usize,
    pub blank: usize,
}

/// Everything extracted from one file in one pass.
#[derive(Clone, Debug)]
pub struct FileAnalysis {
    pub path: PathBuf,
    pub lines: LineCounts,
    pub complexity: u64,
    pub structure: FileStructure,
}

/// Analyze one scanned file: LOC counts, the complexity proxy, and the
/// block structure, all from a single pass over the classified lines.
pub fn analyze_content(path: &Path, scan: &FileScan) -> FileAnalysis {
    let mut lines = LineCounts::default();
    // McCabe-style proxy: base 1, plus one per branch keyword, rescue or
    // ensure, and logical operator. A linear token count, not a
    // control-flow graph.
    let mut complexity: u64 = 1;
    let mut tracker = BlockTracker::new();

    for (index, line) in scan.lines().enumerate() {
        lines.total += 1;
        match line.kind {
            LineKind::Blank => lines.blank += 1,
            LineKind::Comment => lines.comment += 1,
            LineKind::Code => {
                lines.code += 1;
                complexity += line_complexity(line.trimmed);
                tracker.observe(index + 1, line.tag);
            }
        }
    }

    FileAnalysis {
        path: path.to_path_buf(),
        lines,
        complexity,
        structure: tracker.finish(),
    }
}

/// Scan and analyze a path, or `None` when the file had to be skipped.
pub fn analyze_path(path: &Path) -> Option<FileAnalysis> {
    scanner::scan_file(path).map(|scan| analyze_content(path, &scan))
}

/// Branch keywords, rescue/ensure, and logical operators on one code line.
/// Occurrence-based, so a modifier-form `if` still counts here even though
/// it carries no structural tag.
fn line_complexity(trimmed: &str) -> u64 {
    let branches = BRANCH_KEYWORDS.find_iter(trimmed).count();
    let rescues = RESCUE_KEYWORDS.find_iter(trimmed).count();
    let logical = trimmed.matches("&&").count() + trimmed.matches("||").count();
    (branches + rescues + logical) as u64
}

/// Corpus-wide accumulator. All fields are sums, counts, or maxima, so the
/// fold is associative and the per-file order does not matter.
#[derive(Clone, Debug, Default)]
pub struct CorpusMetrics {
    pub files_analyzed: usize,
    pub files_skipped: Vec<PathBuf>,
    pub lines: LineCounts,
    pub total_complexity: u64,
    pub max_nesting_depth: u32,
    nesting_depth_sum: u64,
    pub method_declarations: usize,
    pub class_declarations: usize,
    method_length_sum: u64,
    closed_methods: usize,
    class_size_sum: u64,
    closed_classes: usize,
}

impl CorpusMetrics {
    pub fn absorb(&mut self, analysis: &FileAnalysis) {
        self.files_analyzed += 1;
        self.lines.total += analysis.lines.total;
        self.lines.code += analysis.lines.code;
        self.lines.comment += analysis.lines.comment;
        self.lines.blank += analysis.lines.blank;
        self.total_complexity += analysis.complexity;

        let structure = &analysis.structure;
        self.max_nesting_depth = self.max_nesting_depth.max(structure.max_depth);
        self.nesting_depth_sum += u64::from(structure.max_depth);
        self.method_declarations += structure.method_declarations;
        self.class_declarations += structure.class_declarations;
        self.closed_methods += structure.methods.len();
        self.closed_classes += structure.classes.len();
        for extent in &structure.methods {
            self.method_length_sum += extent.line_count() as u64;
        }
        for extent in &structure.classes {
            self.class_size_sum += extent.line_count() as u64;
        }
    }

    pub fn comment_ratio(&self) -> f64 {
        percentage(self.lines.comment, self.lines.total)
    }

    pub fn average_complexity(&self) -> f64 {
        safe_average(self.total_complexity, self.files_analyzed)
    }

    /// Mean of the per-file nesting maxima.
    pub fn average_nesting_depth(&self) -> f64 {
        safe_average(self.nesting_depth_sum, self.files_analyzed)
    }

    pub fn average_method_length(&self) -> f64 {
        safe_average(self.method_length_sum, self.closed_methods)
    }

    pub fn average_class_size(&self) -> f64 {
        safe_average(self.class_size_sum, self.closed_classes)
    }
}

/// Analyze a batch of files and fold the results.
///
/// The per-file pass is embarrassingly parallel; skipped files are recorded
/// in input order either way, so the fold after collection is
/// deterministic.
pub fn analyze_files(paths: &[PathBuf], parallel: bool) -> CorpusMetrics {
    let results: Vec<Option<FileAnalysis>> = if parallel {
        paths.par_iter().map(|path| analyze_path(path)).collect()
    } else {
        paths.iter().map(|path| analyze_path(path)).collect()
    };

    let mut corpus = CorpusMetrics::default();
    for (path, analysis) in paths.iter().zip(results) {
        match analysis {
            Some(analysis) => corpus.absorb(&analysis),
            None => {
                warn!("skipped {}", path.display());
                corpus.files_skipped.push(path.clone());
            }
        }
    }
    corpus
}
