//! File discovery for the CLI layer.
//!
//! The analysis core consumes already-discovered path lists; this walker is
//! the collaborator that produces them. It honors gitignore rules and
//! splits what it finds into Ruby sources and dependency manifests.

use anyhow::Result;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

const SOURCE_EXTENSIONS: &[&str] = &["rb", "rake"];
const SOURCE_BASENAMES: &[&str] = &["Rakefile"];
const MANIFEST_BASENAMES: &[&str] = &["Gemfile"];
const MANIFEST_EXTENSIONS: &[&str] = &["gemspec"];

/// The two ordered path lists the engine consumes.
#[derive(Clone, Debug, Default)]
pub struct DiscoveredFiles {
    pub sources: Vec<PathBuf>,
    pub manifests: Vec<PathBuf>,
}

pub struct FileWalker {
    root: PathBuf,
    extra_extensions: Vec<String>,
    ignore_patterns: Vec<String>,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            extra_extensions: vec![],
            ignore_patterns: vec![],
        }
    }

    pub fn with_extra_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extra_extensions = extensions;
        self
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    /// Walk the root and collect sources and manifests. Paths are sorted so
    /// repeated runs see the same input order.
    pub fn walk(&self) -> Result<DiscoveredFiles> {
        let mut discovered = DiscoveredFiles::default();
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .build();

        for entry in walker {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || self.is_excluded(path) {
                continue;
            }

            if is_manifest(path) {
                discovered.manifests.push(path.to_path_buf());
            } else if self.is_source(path) {
                discovered.sources.push(path.to_path_buf());
            }
        }

        discovered.sources.sort();
        discovered.manifests.sort();
        Ok(discovered)
    }

    fn is_source(&self, path: &Path) -> bool {
        if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
            return SOURCE_EXTENSIONS.contains(&ext)
                || self.extra_extensions.iter().any(|extra| extra == ext);
        }
        path.file_name()
            .and_then(|name| name.to_str())
            .map_or(false, |name| SOURCE_BASENAMES.contains(&name))
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.ignore_patterns.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .map(|p| p.matches(&path_str))
                .unwrap_or(false)
        })
    }
}

fn is_manifest(path: &Path) -> bool {
    if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
        if MANIFEST_EXTENSIONS.contains(&ext) {
            return true;
        }
    }
    path.file_name()
        .and_then(|name| name.to_str())
        .map_or(false, |name| MANIFEST_BASENAMES.contains(&name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::write(path, "x = 1\n").unwrap();
    }

    #[test]
    fn test_walk_splits_sources_and_manifests() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("app.rb"));
        touch(&dir.path().join("tasks.rake"));
        touch(&dir.path().join("Rakefile"));
        touch(&dir.path().join("Gemfile"));
        touch(&dir.path().join("tool.gemspec"));
        touch(&dir.path().join("README.md"));

        let discovered = FileWalker::new(dir.path().to_path_buf()).walk().unwrap();
        assert_eq!(discovered.sources.len(), 3);
        assert_eq!(discovered.manifests.len(), 2);
        assert!(discovered
            .sources
            .iter()
            .all(|p| !p.ends_with("README.md")));
    }

    #[test]
    fn test_ignore_patterns_exclude() {
        let dir = tempfile::tempdir().unwrap();
        let vendored = dir.path().join("vendor");
        fs::create_dir(&vendored).unwrap();
        touch(&vendored.join("dep.rb"));
        touch(&dir.path().join("main.rb"));

        let discovered = FileWalker::new(dir.path().to_path_buf())
            .with_ignore_patterns(vec!["*/vendor/*".to_string()])
            .walk()
            .unwrap();
        assert_eq!(discovered.sources.len(), 1);
        assert!(discovered.sources[0].ends_with("main.rb"));
    }

    #[test]
    fn test_extra_extensions() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("script.thor"));

        let walker = FileWalker::new(dir.path().to_path_buf());
        assert_eq!(walker.walk().unwrap().sources.len(), 0);

        let walker = FileWalker::new(dir.path().to_path_buf())
            .with_extra_extensions(vec!["thor".to_string()]);
        assert_eq!(walker.walk().unwrap().sources.len(), 1);
    }

    #[test]
    fn test_walk_order_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("b.rb"));
        touch(&dir.path().join("a.rb"));
        let discovered = FileWalker::new(dir.path().to_path_buf()).walk().unwrap();
        assert!(discovered.sources[0].ends_with("a.rb"));
        assert!(discovered.sources[1].ends_with("b.rb"));
    }
}
