//! Page spec loader — YAML document to `TypeSpec`.
//!
//! A page spec documents exactly one type:
//!
//! ```yaml
//! containers::BitSet:
//!   - _kind: class
//!   - Capacity:
//!       - size
//!       - [function, "operator<<"]
//!   - _deprecated:
//! ```
//!
//! Sections are single-key mappings kept in document order. A `_`-prefixed
//! key is hidden; `_kind` is meta and sets the type's documentation kind.
//! Null bodies (root or section) load as empty.

use crate::model::{FunctionEntry, Section, TypeSpec, DEFAULT_TYPE_KIND, KIND_KEY};
use serde_yaml::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Load-time failure for a single page spec document.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("failed to read spec: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("expected a mapping with exactly one type key, found {0} keys")]
    TypeKeyCount(usize),
    #[error("the type key must be a string")]
    TypeKeyNotString,
    #[error("section entry must be a single-key mapping")]
    SectionShape,
    #[error("section key must be a string")]
    SectionKeyNotString,
    #[error("`_kind` must be a string")]
    KindNotString,
    #[error("section `{0}` must hold a list of entries (or nothing)")]
    SectionBodyShape(String),
    #[error("explicit entry in `{0}` must be a [kind, name] pair, found {1} elements")]
    EntryArity(String, usize),
    #[error("entry in `{0}` must be a name or a [kind, name] pair of strings")]
    EntryShape(String),
}

/// Read and parse one page spec file.
pub fn load(path: &Path) -> Result<TypeSpec, SpecError> {
    let text = fs::read_to_string(path)?;
    parse(&text)
}

/// Parse a page spec document.
pub fn parse(text: &str) -> Result<TypeSpec, SpecError> {
    let root: Value = serde_yaml::from_str(text)?;

    let mapping = match root {
        Value::Mapping(mapping) => mapping,
        _ => return Err(SpecError::TypeKeyCount(0)),
    };
    if mapping.len() != 1 {
        return Err(SpecError::TypeKeyCount(mapping.len()));
    }
    let (key, body) = mapping.into_iter().next().expect("len checked above");
    let name = match key {
        Value::String(name) => name,
        _ => return Err(SpecError::TypeKeyNotString),
    };

    let mut spec = TypeSpec {
        name,
        kind: DEFAULT_TYPE_KIND.to_string(),
        sections: Vec::new(),
    };

    let items = match body {
        // A type documented with no sections yet.
        Value::Null => return Ok(spec),
        Value::Sequence(items) => items,
        _ => return Err(SpecError::SectionShape),
    };

    for item in items {
        let section_mapping = match item {
            Value::Mapping(m) => m,
            _ => return Err(SpecError::SectionShape),
        };
        if section_mapping.len() != 1 {
            return Err(SpecError::SectionShape);
        }
        let (key, body) = section_mapping.into_iter().next().expect("len checked above");
        let section_name = match key {
            Value::String(name) => name,
            _ => return Err(SpecError::SectionKeyNotString),
        };

        if section_name == KIND_KEY {
            match body {
                Value::String(kind) => spec.kind = kind,
                _ => return Err(SpecError::KindNotString),
            }
            continue;
        }

        spec.sections.push(Section {
            entries: parse_entries(&section_name, body)?,
            name: section_name,
        });
    }

    Ok(spec)
}

fn parse_entries(section: &str, body: Value) -> Result<Vec<FunctionEntry>, SpecError> {
    let items = match body {
        Value::Null => return Ok(Vec::new()),
        Value::Sequence(items) => items,
        _ => return Err(SpecError::SectionBodyShape(section.to_string())),
    };

    let mut entries = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(name) => entries.push(FunctionEntry::bare(name)),
            Value::Sequence(pair) => {
                if pair.len() != 2 {
                    return Err(SpecError::EntryArity(section.to_string(), pair.len()));
                }
                let mut pair = pair.into_iter();
                match (pair.next(), pair.next()) {
                    (Some(Value::String(kind)), Some(Value::String(name))) => {
                        entries.push(FunctionEntry { kind, name })
                    }
                    _ => return Err(SpecError::EntryShape(section.to_string())),
                }
            }
            _ => return Err(SpecError::EntryShape(section.to_string())),
        }
    }
    Ok(entries)
}
