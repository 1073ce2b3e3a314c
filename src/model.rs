//! Data model for page specs and symbol database records.

use serde::Deserialize;

/// Marker character for hidden sections and meta keys in a page spec.
pub const HIDDEN_MARKER: char = '_';

/// Section key that sets the documentation kind of the type itself.
pub const KIND_KEY: &str = "_kind";

/// Documentation kind used for the type-level directive when the spec
/// carries no `_kind` meta section.
pub const DEFAULT_TYPE_KIND: &str = "class";

/// Documentation kind for entries given as a bare name.
pub const DEFAULT_ENTRY_KIND: &str = "function";

/// One page spec document: a single documented type and its grouped symbols.
#[derive(Debug)]
pub struct TypeSpec {
    /// Qualified type name, e.g. `containers::BitSet`.
    pub name: String,
    /// Documentation kind for the type-level directive (`class`, `struct`, ...).
    pub kind: String,
    /// Sections in document order.
    pub sections: Vec<Section>,
}

impl TypeSpec {
    /// Last `::` component of the qualified name.
    pub fn unqualified_name(&self) -> &str {
        self.name.rsplit("::").next().unwrap_or(&self.name)
    }
}

/// A named group of documented symbols.
#[derive(Debug)]
pub struct Section {
    pub name: String,
    /// Entries in document order. Empty for null-bodied sections.
    pub entries: Vec<FunctionEntry>,
}

impl Section {
    /// Hidden sections still produce symbol pages and count as documented,
    /// but are left out of the overview page.
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with(HIDDEN_MARKER)
    }
}

/// A single documented symbol within a section.
#[derive(Debug)]
pub struct FunctionEntry {
    /// Documentation kind (`function` unless given as a `[kind, name]` pair).
    pub kind: String,
    /// Raw symbol spelling, e.g. `size`, `operator<<`, `at(size_t)`.
    pub name: String,
}

impl FunctionEntry {
    pub fn bare(name: impl Into<String>) -> Self {
        FunctionEntry {
            kind: DEFAULT_ENTRY_KIND.to_string(),
            name: name.into(),
        }
    }
}

/// One extracted symbol from the symbol database.
///
/// The database is produced by the external extraction tool, one JSON array
/// of records per type; refgen only consumes it.
#[derive(Debug, Clone, Deserialize)]
pub struct SymbolRecord {
    /// Unqualified symbol name.
    pub name: String,
    /// Symbol kind reported by the extractor (`function`, `variable`, ...).
    #[allow(dead_code)]
    pub kind: String,
    /// Visibility reported by the extractor (`public`, `protected`, `private`).
    pub visibility: String,
    /// Qualified enclosing scope, e.g. `containers::BitSet`.
    pub scope: String,
}

impl SymbolRecord {
    pub fn is_public(&self) -> bool {
        self.visibility == "public"
    }

    /// `scope::name`.
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.scope, self.name)
    }

    /// Last `::` component of the scope — the name of the type the symbol
    /// belongs to.
    pub fn enclosing_type_name(&self) -> &str {
        self.scope.rsplit("::").next().unwrap_or(&self.scope)
    }
}
