//! End-to-end runs over an on-disk fixture tree: discovery, analysis, and
//! report composition together.

use pretty_assertions::assert_eq;
use rubymetrics::io::walker::FileWalker;
use rubymetrics::report::{analyze, AnalyzeOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture_project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("app/models")).unwrap();
    fs::create_dir_all(root.join("lib")).unwrap();

    fs::write(
        root.join("app/models/user.rb"),
        "# A user record\nclass User\n  def name\n    @name\n  end\nend\n",
    )
    .unwrap();
    fs::write(
        root.join("app/models/account.rb"),
        "class Account\n  def active?\n    status == :active || trial?\n  end\nend\n",
    )
    .unwrap();
    fs::write(
        root.join("lib/tasks.rake"),
        "task :default do\n  puts 'ok'\nend\n",
    )
    .unwrap();
    fs::write(
        root.join("Gemfile"),
        "source 'https://rubygems.org'\n\ngem 'rails'\ngem 'puma'\n",
    )
    .unwrap();
    dir
}

#[test]
fn test_full_analysis_of_fixture_tree() {
    let dir = fixture_project();
    let discovered = FileWalker::new(dir.path().to_path_buf()).walk().unwrap();
    assert_eq!(discovered.sources.len(), 3);
    assert_eq!(discovered.manifests.len(), 1);

    let report = analyze(
        dir.path(),
        &discovered.sources,
        &discovered.manifests,
        &AnalyzeOptions::default(),
    );

    // Line accounting.
    assert_eq!(
        report.loc.total_lines,
        report.loc.code_lines + report.loc.comment_lines + report.loc.blank_lines
    );
    assert_eq!(report.loc.comment_lines, 1);

    // Structure: two classes with one method each, nothing in the rake task.
    assert_eq!(report.structure.total_classes, 2);
    assert_eq!(report.structure.total_methods, 2);
    assert_eq!(report.nesting.max_nesting_depth, 2);

    // Distributions.
    assert_eq!(report.summary.most_common_extension.as_deref(), Some("rb"));
    assert_eq!(
        report.summary.largest_directory,
        Some(dir.path().join("app/models"))
    );

    // Dependencies from the Gemfile.
    assert_eq!(report.dependencies.manifests_analyzed, 1);
    assert_eq!(
        report.dependencies.runtime_gems,
        vec!["puma".to_string(), "rails".to_string()]
    );

    // Nothing was skipped.
    assert_eq!(report.diagnostics.files_discovered, 3);
    assert_eq!(report.diagnostics.files_analyzed, 3);
    assert!(report.diagnostics.files_skipped.is_empty());
}

#[test]
fn test_vanished_file_is_reported_not_fatal() {
    let dir = fixture_project();
    let discovered = FileWalker::new(dir.path().to_path_buf()).walk().unwrap();

    let mut sources = discovered.sources.clone();
    sources.push(dir.path().join("app/models/ghost.rb"));

    let report = analyze(dir.path(), &sources, &[], &AnalyzeOptions::default());
    assert_eq!(report.diagnostics.files_discovered, 4);
    assert_eq!(report.diagnostics.files_analyzed, 3);
    assert_eq!(
        report.diagnostics.files_skipped,
        vec![dir.path().join("app/models/ghost.rb")]
    );
    // The vanished file stats as size zero and lands in the tiny bucket.
    assert_eq!(report.size_buckets.tiny, 4);
}

#[test]
fn test_size_bucket_boundary_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("boundary.rb"), vec![b'#'; 1024]).unwrap();
    fs::write(dir.path().join("under.rb"), vec![b'#'; 1023]).unwrap();

    let discovered = FileWalker::new(dir.path().to_path_buf()).walk().unwrap();
    let report = analyze(
        dir.path(),
        &discovered.sources,
        &[],
        &AnalyzeOptions::default(),
    );
    assert_eq!(report.size_buckets.tiny, 1);
    assert_eq!(report.size_buckets.small, 1);
}

#[test]
fn test_largest_files_respects_option() {
    let dir = fixture_project();
    let discovered = FileWalker::new(dir.path().to_path_buf()).walk().unwrap();
    let options = AnalyzeOptions {
        largest_files: 1,
        ..AnalyzeOptions::default()
    };
    let report = analyze(dir.path(), &discovered.sources, &[], &options);
    assert_eq!(report.largest_files.len(), 1);
}

#[test]
fn test_parallel_and_sequential_agree() {
    let dir = fixture_project();
    let discovered = FileWalker::new(dir.path().to_path_buf()).walk().unwrap();

    let parallel = analyze(
        dir.path(),
        &discovered.sources,
        &discovered.manifests,
        &AnalyzeOptions {
            parallel: true,
            ..AnalyzeOptions::default()
        },
    );
    let sequential = analyze(
        dir.path(),
        &discovered.sources,
        &discovered.manifests,
        &AnalyzeOptions {
            parallel: false,
            ..AnalyzeOptions::default()
        },
    );

    assert_eq!(parallel.loc, sequential.loc);
    assert_eq!(parallel.complexity, sequential.complexity);
    assert_eq!(parallel.nesting, sequential.nesting);
    assert_eq!(parallel.structure, sequential.structure);
    assert_eq!(parallel.summary, sequential.summary);
}

#[test]
fn test_empty_directory_yields_zero_report() {
    let dir = tempfile::tempdir().unwrap();
    let discovered = FileWalker::new(dir.path().to_path_buf()).walk().unwrap();
    let report = analyze(
        dir.path(),
        &discovered.sources,
        &discovered.manifests,
        &AnalyzeOptions::default(),
    );
    assert_eq!(report.summary.total_files, 0);
    assert_eq!(report.loc.comment_ratio, 0.0);
    assert!(report.file_types.is_empty());
}

#[test]
fn test_naming_patterns_over_fixture() {
    let files: Vec<rubymetrics::SourceFile> = [
        "/x/user_model.rb",
        "/x/UserModel.rb",
        "/x/Test123.rb",
        "/x/api_spec.rb",
    ]
    .iter()
    .map(|p| rubymetrics::SourceFile::with_size(Path::new(p), 1))
    .collect();

    let naming = rubymetrics::distribution::naming_stats(&files);
    assert_eq!(naming.snake_case, 2);
    assert_eq!(naming.camel_case, 2);
    assert_eq!(naming.mixed_case, 2);
    assert_eq!(naming.with_numbers, 1);
    assert_eq!(naming.spec_files, 1);
    assert_eq!(naming.test_files, 0);
}

#[test]
fn test_largest_files_tie_break_is_input_order() {
    let files: Vec<rubymetrics::SourceFile> = vec![
        rubymetrics::SourceFile::with_size(Path::new("/x/a.rb"), 10),
        rubymetrics::SourceFile::with_size(Path::new("/x/b.rb"), 10),
        rubymetrics::SourceFile::with_size(Path::new("/x/c.rb"), 5),
    ];
    let top = rubymetrics::distribution::largest_files(&files, 2);
    let paths: Vec<PathBuf> = top.into_iter().map(|e| e.path).collect();
    assert_eq!(paths, vec![PathBuf::from("/x/a.rb"), PathBuf::from("/x/b.rb")]);
}
