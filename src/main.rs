//! refgen — maintain generated API reference pages from YAML page specs.
//!
//! Each page spec documents one type: which symbols get a page and how they
//! are grouped. refgen emits one reStructuredText page per documented symbol
//! plus one overview page per type, cross-references the extractor's symbol
//! database to warn about undocumented public symbols, and removes pages no
//! longer produced by the current spec set. Regeneration is incremental:
//! a page is only rewritten when its spec, or refgen itself, is newer.

mod coverage;
mod emit;
mod mangle;
mod model;
mod registry;
mod spec;
mod staleness;

use anyhow::{Context, Result};
use clap::Parser;
use registry::ArtifactRegistry;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[derive(Parser)]
#[command(
    name = "refgen",
    about = "Generate API reference pages from YAML page specs and an extracted symbol database"
)]
struct Cli {
    /// Page spec files, directories, or glob patterns.
    #[arg(required = true)]
    specs: Vec<String>,

    /// Output directory (created if absent)
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Symbol database directory; coverage checking runs only when given
    #[arg(short = 'd', long)]
    database: Option<PathBuf>,

    /// Project name placed in every directive block
    #[arg(long, default_value = "api")]
    project: String,

    /// Rewrite every artifact regardless of staleness
    #[arg(long)]
    force: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    fs::create_dir_all(&cli.output)
        .with_context(|| format!("failed to create output directory: {}", cli.output.display()))?;

    let generator_mtime = staleness::generator_mtime();
    let spec_files = expand_globs(&cli.specs)?;

    let checker = coverage::CoverageChecker::default();
    let mut registry = ArtifactRegistry::new();
    let mut failed = 0usize;

    for path in &spec_files {
        let type_spec = match spec::load(path) {
            Ok(type_spec) => type_spec,
            Err(e) => {
                // A malformed document aborts only itself.
                eprintln!("error: {}: {}", path.display(), e);
                failed += 1;
                continue;
            }
        };
        let spec_mtime = staleness::file_mtime(path)
            .with_context(|| format!("failed to stat {}", path.display()))?;

        generate_pages(&cli, &type_spec, spec_mtime, generator_mtime, &mut registry)?;

        if let Some(database_dir) = &cli.database {
            coverage::report_gaps(&checker, &type_spec, database_dir);
        }
    }

    if failed > 0 {
        // A failed document's artifacts were never recorded; sweeping now
        // would delete them even though the spec still wants them.
        eprintln!("warning: skipping orphan sweep ({} spec document(s) failed)", failed);
        anyhow::bail!("{} spec document(s) failed to load", failed);
    }

    // Only now is an unrecorded file known to be an orphan.
    for removed in registry.sweep(&cli.output)? {
        println!("removing {}", removed.display());
    }
    Ok(())
}

/// Emit the per-symbol pages and the overview page for one type, recording
/// every artifact path whether or not it needed rewriting.
fn generate_pages(
    cli: &Cli,
    type_spec: &model::TypeSpec,
    spec_mtime: SystemTime,
    generator_mtime: SystemTime,
    registry: &mut ArtifactRegistry,
) -> Result<()> {
    // mangled page name -> raw spelling that claimed it
    let mut claimed: BTreeMap<String, String> = BTreeMap::new();

    for section in &type_spec.sections {
        for entry in &section.entries {
            let file_name = emit::symbol_page_name(&type_spec.name, &entry.name);
            if let Some(first) = claimed.get(&file_name) {
                if *first != entry.name {
                    eprintln!(
                        "warning: {}: `{}` and `{}` both mangle to {}; keeping the first",
                        type_spec.name, first, entry.name, file_name
                    );
                }
                continue;
            }
            claimed.insert(file_name.clone(), entry.name.clone());

            let out_path = cli.output.join(&file_name);
            registry.record(&out_path);
            write_if_stale(&out_path, spec_mtime, generator_mtime, cli.force, || {
                emit::symbol_page(&cli.project, &type_spec.name, entry)
            })?;
        }
    }

    let overview_path = cli.output.join(emit::overview_page_name(&type_spec.name));
    registry.record(&overview_path);
    write_if_stale(&overview_path, spec_mtime, generator_mtime, cli.force, || {
        emit::overview_page(&cli.project, type_spec)
    })?;

    Ok(())
}

fn write_if_stale(
    path: &Path,
    spec_mtime: SystemTime,
    generator_mtime: SystemTime,
    force: bool,
    render: impl FnOnce() -> String,
) -> Result<()> {
    let output_mtime = staleness::file_mtime(path);
    if !force && !staleness::should_regenerate(output_mtime, spec_mtime, generator_mtime) {
        return Ok(());
    }
    println!("rebuilding {}", path.display());
    fs::write(path, render()).with_context(|| format!("failed to write {}", path.display()))
}

/// File extensions recognized as page specs.
const SPEC_EXTENSIONS: &[&str] = &["yml", "yaml"];

/// Expand glob patterns into a list of real spec files.
/// Also handles bare directory paths by scanning for spec file types.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // If it's a directory, scan for spec extensions (non-recursive)
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() {
                    if let Some(ext) = p.extension().and_then(|e| e.to_str()) {
                        if SPEC_EXTENSIONS.contains(&ext) {
                            files.push(p);
                        }
                    }
                }
            }
            continue;
        }
        // Try as glob
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            eprintln!("warning: no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic processing order
    files.sort();
    files.dedup();
    Ok(files)
}
