//! Dependency-manifest extraction for Gemfiles and gemspecs.
//!
//! Line-by-line regex matching, the same discipline as the source metrics:
//! no Ruby evaluation, so conditional gem declarations and interpolated
//! names are invisible. Good enough to list what a project pulls in.

use crate::core::DependencyReport;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::path::PathBuf;

lazy_static! {
    static ref GEM_DECL: Regex = Regex::new(r#"^\s*gem\s+['"]([\w.-]+)['"]"#).unwrap();
    static ref RUNTIME_DEP: Regex =
        Regex::new(r#"add(_runtime)?_dependency\s*\(?\s*['"]([\w.-]+)['"]"#).unwrap();
    static ref DEV_DEP: Regex =
        Regex::new(r#"add_development_dependency\s*\(?\s*['"]([\w.-]+)['"]"#).unwrap();
}

/// Extract declared gems from the discovered manifest files.
///
/// Unreadable manifests are skipped exactly like unreadable sources; the
/// resulting lists are deduplicated and sorted.
pub fn analyze_manifests(paths: &[PathBuf]) -> DependencyReport {
    let mut report = DependencyReport::default();
    let mut runtime: Vec<String> = Vec::new();
    let mut development: Vec<String> = Vec::new();

    for path in paths {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                debug!("skipping unreadable manifest {}: {}", path.display(), err);
                continue;
            }
        };
        report.manifests_analyzed += 1;
        extract_declarations(&content, &mut runtime, &mut development);
    }

    runtime.sort();
    development.sort();
    report.runtime_gems = runtime;
    report.development_gems = development;
    report
}

fn extract_declarations(content: &str, runtime: &mut Vec<String>, development: &mut Vec<String>) {
    for line in content.lines() {
        if let Some(captures) = DEV_DEP.captures(line) {
            push_unique(development, &captures[1]);
        } else if let Some(captures) = RUNTIME_DEP.captures(line) {
            push_unique(runtime, &captures[2]);
        } else if let Some(captures) = GEM_DECL.captures(line) {
            push_unique(runtime, &captures[1]);
        }
    }
}

fn push_unique(list: &mut Vec<String>, name: &str) {
    if !list.iter().any(|existing| existing == name) {
        list.push(name.to_string());
    }
}
