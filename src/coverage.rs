//! Coverage checking — diff the documented symbol set against the
//! extractor's public symbol set for a type.
//!
//! Gaps are reported as warnings and never fail a run.

use crate::mangle::mangle;
use crate::model::{SymbolRecord, TypeSpec};
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Exclusion predicate for the default checker.
///
/// Skips symbols the extractor reports but which are not documentable
/// entries of the type itself: scope-resolution artifacts (leading `:`),
/// nested types (leading uppercase letter that is not the enclosing type's
/// own name — an approximate heuristic), and destructors (leading `~`).
/// Swap the `exclude` field on [`CoverageChecker`] to override.
pub fn nested_or_internal_symbol(record: &SymbolRecord) -> bool {
    let mut chars = record.name.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return true,
    };
    first == ':'
        || first == '~'
        || (first.is_uppercase() && record.name != record.enclosing_type_name())
}

/// Outcome of one coverage check.
#[derive(Debug, Default)]
pub struct CoverageReport {
    /// Public extracted symbols with no spec entry, sorted.
    pub missing: Vec<String>,
    /// Spec entries with no extracted symbol, sorted.
    pub unknown: Vec<String>,
}

pub struct CoverageChecker {
    pub exclude: fn(&SymbolRecord) -> bool,
}

impl Default for CoverageChecker {
    fn default() -> Self {
        CoverageChecker {
            exclude: nested_or_internal_symbol,
        }
    }
}

impl CoverageChecker {
    /// Database file for a type: `<dir>/<mangled type name>.json`.
    pub fn database_path(database_dir: &Path, type_name: &str) -> PathBuf {
        database_dir.join(format!("{}.json", mangle(type_name)))
    }

    /// Load the extracted symbol records for a type.
    pub fn load_records(path: &Path) -> Result<Vec<SymbolRecord>> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read symbol database: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("invalid symbol database: {}", path.display()))
    }

    /// Diff the documented set against the extracted public set.
    pub fn check(&self, spec: &TypeSpec, records: &[SymbolRecord]) -> CoverageReport {
        let expected: BTreeSet<String> = records
            .iter()
            .filter(|r| r.is_public() && !(self.exclude)(r))
            .map(|r| r.qualified_name())
            .collect();

        // Hidden sections count as documented: they still produce pages.
        let documented: BTreeSet<String> = spec
            .sections
            .iter()
            .flat_map(|section| section.entries.iter())
            .map(|entry| {
                let name = entry
                    .name
                    .split_once('(')
                    .map_or(entry.name.as_str(), |(bare, _)| bare);
                format!("{}::{}", spec.name, name)
            })
            .collect();

        CoverageReport {
            missing: expected.difference(&documented).cloned().collect(),
            unknown: documented.difference(&expected).cloned().collect(),
        }
    }
}

/// Run the coverage check for one spec document and print its warnings.
///
/// A missing database file is itself only a warning: the extractor may not
/// have been run over this type yet.
pub fn report_gaps(checker: &CoverageChecker, spec: &TypeSpec, database_dir: &Path) {
    let db_path = CoverageChecker::database_path(database_dir, &spec.name);
    if !db_path.is_file() {
        eprintln!("warning: no symbol database for {}", spec.name);
        return;
    }
    let records = match CoverageChecker::load_records(&db_path) {
        Ok(records) => records,
        Err(e) => {
            eprintln!("warning: {:#}", e);
            return;
        }
    };

    let report = checker.check(spec, &records);
    for name in &report.unknown {
        eprintln!("warning: {}: no extracted symbol for {}", spec.name, name);
    }
    if !report.missing.is_empty() {
        eprintln!("warning: {}: undocumented public symbols:", spec.name);
        for name in &report.missing {
            eprintln!("  - {}", name);
        }
    }
}
