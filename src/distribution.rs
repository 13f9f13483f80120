//! Pure distributions over file metadata. Nothing here reads file content;
//! every function is a plain fold over the stat facts captured at
//! discovery time.

use crate::core::{
    DirectoryCount, FileSizeEntry, FileTypeCount, NamingStats, SizeBuckets, SourceFile,
    NO_EXTENSION,
};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SNAKE_CASE: Regex = Regex::new(r"^[a-z][a-z0-9_]*$").unwrap();
    static ref CAMEL_CASE: Regex = Regex::new(r"^[A-Z][a-zA-Z0-9]*$").unwrap();
}

const KIB: u64 = 1024;

/// Count files per lowercase extension, in first-seen order. Files without
/// an extension land in the `no_extension` bucket.
///
/// The first-seen order is what makes the summary's most-common-extension
/// tie-break deterministic.
pub fn file_type_counts(files: &[SourceFile]) -> Vec<FileTypeCount> {
    let mut counts: Vec<FileTypeCount> = Vec::new();
    for file in files {
        let key = file.extension.as_deref().unwrap_or(NO_EXTENSION);
        match counts.iter_mut().find(|entry| entry.extension == key) {
            Some(entry) => entry.count += 1,
            None => counts.push(FileTypeCount {
                extension: key.to_string(),
                count: 1,
            }),
        }
    }
    counts
}

/// Bucket files by byte size. Intervals are half-open; an exactly 1 KiB
/// file is small, not tiny.
pub fn size_buckets(files: &[SourceFile]) -> SizeBuckets {
    let mut buckets = SizeBuckets::default();
    for file in files {
        match file.size {
            s if s < KIB => buckets.tiny += 1,
            s if s < 10 * KIB => buckets.small += 1,
            s if s < 100 * KIB => buckets.medium += 1,
            s if s < KIB * KIB => buckets.large += 1,
            _ => buckets.huge += 1,
        }
    }
    buckets
}

/// Count files per parent directory, descending by count. The sort is
/// stable, so directories with equal counts keep first-seen order.
pub fn directory_counts(files: &[SourceFile]) -> Vec<DirectoryCount> {
    let mut counts: Vec<DirectoryCount> = Vec::new();
    for file in files {
        let Some(directory) = &file.directory else {
            continue;
        };
        match counts.iter_mut().find(|entry| &entry.directory == directory) {
            Some(entry) => entry.count += 1,
            None => counts.push(DirectoryCount {
                directory: directory.clone(),
                count: 1,
            }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Naming-pattern counters over the basename without extension. The
/// categories overlap on purpose; a single name may tick several.
pub fn naming_stats(files: &[SourceFile]) -> NamingStats {
    let mut stats = NamingStats::default();
    for file in files {
        let stem = file.stem();
        if SNAKE_CASE.is_match(stem) {
            stats.snake_case += 1;
        }
        if CAMEL_CASE.is_match(stem) {
            stats.camel_case += 1;
        }
        let has_upper = stem.chars().any(|c| c.is_ascii_uppercase());
        let has_lower = stem.chars().any(|c| c.is_ascii_lowercase());
        if has_upper && has_lower {
            stats.mixed_case += 1;
        }
        if stem.chars().any(|c| c.is_ascii_digit()) {
            stats.with_numbers += 1;
        }
        if stem.contains("test") {
            stats.test_files += 1;
        }
        if stem.contains("spec") {
            stats.spec_files += 1;
        }
    }
    stats
}

/// The `limit` largest files by byte size. The sort is stable, so files of
/// equal size keep their input order.
pub fn largest_files(files: &[SourceFile], limit: usize) -> Vec<FileSizeEntry> {
    let mut entries: Vec<FileSizeEntry> = files
        .iter()
        .map(|file| FileSizeEntry {
            path: file.path.clone(),
            size: file.size,
        })
        .collect();
    entries.sort_by(|a, b| b.size.cmp(&a.size));
    entries.truncate(limit);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    fn file(path: &str, size: u64) -> SourceFile {
        SourceFile::with_size(Path::new(path), size)
    }

    #[test]
    fn test_file_type_counts_first_seen_order() {
        let files = vec![
            file("/a/one.rb", 1),
            file("/a/two.rake", 1),
            file("/a/three.rb", 1),
            file("/a/Rakefile", 1),
        ];
        let counts = file_type_counts(&files);
        assert_eq!(counts.len(), 3);
        assert_eq!(counts[0].extension, "rb");
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].extension, "rake");
        assert_eq!(counts[2].extension, NO_EXTENSION);
    }

    #[test]
    fn test_size_bucket_boundaries() {
        let files = vec![
            file("/a/tiny.rb", 1023),
            file("/a/small.rb", 1024),
            file("/a/medium.rb", 10 * 1024),
            file("/a/large.rb", 100 * 1024),
            file("/a/huge.rb", 1024 * 1024),
        ];
        let buckets = size_buckets(&files);
        assert_eq!(buckets.tiny, 1);
        assert_eq!(buckets.small, 1);
        assert_eq!(buckets.medium, 1);
        assert_eq!(buckets.large, 1);
        assert_eq!(buckets.huge, 1);
    }

    #[test]
    fn test_zero_byte_file_is_tiny() {
        let buckets = size_buckets(&[file("/a/empty.rb", 0)]);
        assert_eq!(buckets.tiny, 1);
    }

    #[test]
    fn test_directory_counts_descending_with_stable_ties() {
        let files = vec![
            file("/app/models/a.rb", 1),
            file("/app/helpers/b.rb", 1),
            file("/app/views/c.rb", 1),
            file("/app/views/d.rb", 1),
        ];
        let counts = directory_counts(&files);
        assert_eq!(counts[0].directory, PathBuf::from("/app/views"));
        assert_eq!(counts[0].count, 2);
        // models before helpers: equal counts keep first-seen order
        assert_eq!(counts[1].directory, PathBuf::from("/app/models"));
        assert_eq!(counts[2].directory, PathBuf::from("/app/helpers"));
    }

    #[test]
    fn test_naming_counters_are_independent() {
        let stats = naming_stats(&[file("/a/Test123.rb", 1)]);
        assert_eq!(stats.with_numbers, 1);
        assert_eq!(stats.mixed_case, 1);
        assert_eq!(stats.camel_case, 1);
        assert_eq!(stats.snake_case, 0);
    }

    #[test]
    fn test_naming_snake_case() {
        let stats = naming_stats(&[file("/a/user_model.rb", 1), file("/a/user_spec.rb", 1)]);
        assert_eq!(stats.snake_case, 2);
        assert_eq!(stats.spec_files, 1);
        assert_eq!(stats.camel_case, 0);
        assert_eq!(stats.mixed_case, 0);
    }

    #[test]
    fn test_naming_test_and_spec_substrings() {
        let stats = naming_stats(&[
            file("/a/integration_test.rb", 1),
            file("/a/user_spec.rb", 1),
            file("/a/spec_helper.rb", 1),
        ]);
        assert_eq!(stats.test_files, 1);
        assert_eq!(stats.spec_files, 2);
    }

    #[test]
    fn test_largest_files_stable_ties() {
        let files = vec![
            file("/a/a.rb", 10),
            file("/a/b.rb", 10),
            file("/a/c.rb", 5),
        ];
        let top = largest_files(&files, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].path, PathBuf::from("/a/a.rb"));
        assert_eq!(top[1].path, PathBuf::from("/a/b.rb"));
    }

    #[test]
    fn test_largest_files_limit_beyond_input() {
        let top = largest_files(&[file("/a/a.rb", 1)], 10);
        assert_eq!(top.len(), 1);
    }

    #[test]
    fn test_empty_input_yields_empty_distributions() {
        assert!(file_type_counts(&[]).is_empty());
        assert_eq!(size_buckets(&[]), SizeBuckets::default());
        assert!(directory_counts(&[]).is_empty());
        assert_eq!(naming_stats(&[]), NamingStats::default());
        assert!(largest_files(&[], 10).is_empty());
    }
}
