//! File discovery for directory runs.
//!
//! Runs are driven by result documents: every document in the reports
//! directory that matches the configured pattern is parsed, and each suite
//! it holds is paired with its test source. A suite `a.b.CTest` maps to
//! `<sources>/a/b/CTest.<ext>`; when that path does not exist, a unique
//! `CTest.<ext>` anywhere under the sources root is used instead.
//!
//! Every source file is processed at most once. Suites that resolve to the
//! same file (an outer class and its `$`-nested classes) share one input
//! whose result entries are concatenated in document order. Source files
//! that no document claims still run, with every case defaulting to Pass.

use super::{Pipeline, RunReport, SuiteInput};
use crate::config::TestdocConfig;
use crate::core::TestResult;
use crate::errors::{Diagnostic, DiagnosticKind, Error, Result};
use crate::results::ResultDocumentParser;
use indexmap::map::Entry;
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Result documents in `reports_dir` whose file name matches `pattern`,
/// sorted by file name.
pub fn discover_report_files(reports_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = glob::Pattern::new(pattern)
        .map_err(|e| Error::Config(format!("invalid report pattern '{pattern}': {e}")))?;
    let entries = fs::read_dir(reports_dir).map_err(|e| Error::io(reports_dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(reports_dir, e))?;
        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| matcher.matches(name));
        if matches && path.is_file() {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Test sources under one root, indexed by file name.
#[derive(Debug, Clone)]
pub struct SourceIndex {
    root: PathBuf,
    extension: String,
    by_file_name: BTreeMap<String, Vec<PathBuf>>,
}

impl SourceIndex {
    /// Walk `root` once and index every file with `extension`.
    pub fn build(root: &Path, extension: &str) -> Self {
        let mut by_file_name: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
        let mut skipped = 0usize;

        for entry in WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    skipped += 1;
                    tracing::debug!("Skipping directory entry: {err}");
                    None
                }
            })
        {
            let path = entry.path();
            let has_extension = path.extension().and_then(|e| e.to_str()) == Some(extension);
            if !entry.file_type().is_file() || !has_extension {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                by_file_name
                    .entry(name.to_string())
                    .or_default()
                    .push(path.to_path_buf());
            }
        }

        if skipped > 0 {
            tracing::warn!("Skipped {skipped} unreadable entries under {}", root.display());
        }
        tracing::debug!(
            "Indexed {} source file names under {}",
            by_file_name.len(),
            root.display()
        );

        Self {
            root: root.to_path_buf(),
            extension: extension.to_string(),
            by_file_name,
        }
    }

    /// Every indexed file, ordered by file name.
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.by_file_name.values().flatten().map(PathBuf::as_path)
    }

    /// Dotted suite name for a file under the root: `a/b/CTest.java`
    /// becomes `a.b.CTest`.
    pub fn suite_name_for(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative
            .with_extension("")
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Source file for a fully qualified suite name.
    ///
    /// Nested-class suites (`Outer$Inner`) resolve to the outer class file.
    /// An ambiguous simple-name fallback resolves to nothing.
    pub fn resolve(&self, suite_name: &str) -> Option<PathBuf> {
        let outer = suite_name.split('$').next().unwrap_or(suite_name).trim();
        if outer.is_empty() {
            return None;
        }

        let mut direct = self.root.clone();
        for segment in outer.split('.') {
            direct.push(segment);
        }
        direct.set_extension(&self.extension);
        if direct.is_file() {
            return Some(direct);
        }

        let simple = outer.rsplit('.').next().unwrap_or(outer);
        let file_name = format!("{simple}.{}", self.extension);
        match self.by_file_name.get(&file_name).map(Vec::as_slice) {
            Some([only]) => Some(only.clone()),
            Some(candidates) => {
                tracing::debug!(
                    "{} candidates for {file_name}; not guessing",
                    candidates.len()
                );
                None
            }
            None => None,
        }
    }
}

/// Suites that resolved to one source file.
#[derive(Debug)]
struct SourceGroup {
    suite_name: String,
    results: Vec<TestResult>,
}

/// Read and pair every suite found in the reports directory, then add the
/// source files no document claimed.
///
/// Unreadable or malformed documents, suites without a source file, and
/// unreadable sources are reported and skipped. Only an unreadable reports
/// directory fails the call.
pub fn load_suite_inputs(
    sources_root: &Path,
    reports_dir: &Path,
    config: &TestdocConfig,
) -> Result<(Vec<SuiteInput>, Vec<Diagnostic>)> {
    let report_files = discover_report_files(reports_dir, &config.results.report_pattern)?;
    tracing::info!(
        "Found {} result documents in {}",
        report_files.len(),
        reports_dir.display()
    );

    let index = SourceIndex::build(sources_root, &config.results.source_extension);
    let parser = ResultDocumentParser::new(config.results.max_message_lines);
    let mut groups: IndexMap<PathBuf, SourceGroup> = IndexMap::new();
    let mut diagnostics = Vec::new();

    for report_path in report_files {
        let suites = match fs::read_to_string(&report_path)
            .map_err(|e| Error::io(&report_path, e))
            .and_then(|xml| parser.parse(&xml).map_err(|e| e.with_path(&report_path)))
        {
            Ok(suites) => suites,
            Err(error) => {
                tracing::warn!("Skipping result document: {error}");
                diagnostics.push(Diagnostic::from_error(&error));
                continue;
            }
        };

        for suite in suites {
            let suite_name = if suite.name.is_empty() {
                suite.class_name.clone().unwrap_or_default()
            } else {
                suite.name.clone()
            };

            let Some(source_path) = index.resolve(&suite_name) else {
                tracing::warn!("No source file for suite {suite_name}; excluded");
                diagnostics.push(
                    Diagnostic::new(
                        DiagnosticKind::MissingCounterpart,
                        "no matching test source; suite excluded",
                    )
                    .with_subject(suite_name)
                    .with_path(&report_path),
                );
                continue;
            };

            match groups.entry(source_path) {
                Entry::Occupied(mut entry) => {
                    tracing::debug!(
                        "Suite {suite_name} shares {} with {}",
                        entry.key().display(),
                        entry.get().suite_name
                    );
                    entry.get_mut().results.extend(suite.results);
                }
                Entry::Vacant(entry) => {
                    let outer = suite_name.split('$').next().unwrap_or(&suite_name);
                    entry.insert(SourceGroup {
                        suite_name: outer.to_string(),
                        results: suite.results,
                    });
                }
            }
        }
    }

    let claimed: HashSet<PathBuf> = groups.keys().cloned().collect();
    let mut inputs = Vec::new();

    for (source_path, group) in groups {
        match fs::read_to_string(&source_path) {
            Ok(source_text) => inputs.push(
                SuiteInput::new(group.suite_name, source_text)
                    .with_source_path(source_path)
                    .with_results(group.results),
            ),
            Err(e) => {
                let error = Error::io(&source_path, e);
                tracing::warn!("Skipping suite {}: {error}", group.suite_name);
                diagnostics.push(Diagnostic::from_error(&error).with_subject(group.suite_name));
            }
        }
    }

    for source_path in index.files().filter(|path| !claimed.contains(*path)) {
        let source_text = match fs::read_to_string(source_path) {
            Ok(text) => text,
            Err(e) => {
                let error = Error::io(source_path, e);
                tracing::warn!("Skipping source without results: {error}");
                diagnostics.push(Diagnostic::from_error(&error));
                continue;
            }
        };
        if !source_text.contains("@Test") {
            continue;
        }
        let suite_name = index.suite_name_for(source_path);
        tracing::warn!("No result document for {suite_name}; cases default to Pass");
        inputs.push(SuiteInput::new(suite_name, source_text).with_source_path(source_path));
    }

    Ok((inputs, diagnostics))
}

/// Run `pipeline` over a sources tree and a reports directory.
pub fn run_directories(
    pipeline: &Pipeline,
    sources_root: &Path,
    reports_dir: &Path,
) -> Result<RunReport> {
    let (inputs, diagnostics) = load_suite_inputs(sources_root, reports_dir, pipeline.config())?;
    Ok(pipeline.run_with_diagnostics(inputs, diagnostics))
}
