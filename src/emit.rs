//! Page emitter — artifact text assembly and output-name derivation.
//!
//! Emits reStructuredText skeletons: a provenance header, an underlined
//! title, and `api:*` directive blocks. Turning the directives into final
//! markup is the downstream renderer's job, not ours.

use crate::mangle::mangle;
use crate::model::{FunctionEntry, TypeSpec};

/// Every generated artifact starts with this comment block.
pub const GENERATED_HEADER: &str = "\
.. Auto-generated by refgen; do not edit.

   Edit the page spec this file was derived from instead.
";

/// Output file name for a per-symbol page.
pub fn symbol_page_name(type_name: &str, entry_name: &str) -> String {
    format!("{}.rst", mangle(&format!("{}::{}", type_name, entry_name)))
}

/// Output file name for a type overview page.
pub fn overview_page_name(type_name: &str) -> String {
    format!("{}.rst", mangle(type_name))
}

/// Full text of the page for one documented symbol.
pub fn symbol_page(project: &str, type_name: &str, entry: &FunctionEntry) -> String {
    let mut out = String::from(GENERATED_HEADER);
    out.push_str(&title(&entry.name, '='));
    out.push_str(&directive(
        project,
        &entry.kind,
        &format!("{}::{}", type_name, entry.name),
    ));
    out
}

/// Full text of the overview page for a type.
///
/// Hidden sections are omitted. Within a section, cross-reference lines are
/// ordered by mangled identifier so the page is stable under reordering of
/// the spec entries.
pub fn overview_page(project: &str, spec: &TypeSpec) -> String {
    let mut out = String::from(GENERATED_HEADER);
    out.push_str(&title(spec.unqualified_name(), '='));
    out.push_str(&directive(project, &spec.kind, &spec.name));

    for section in spec.sections.iter().filter(|s| !s.is_hidden()) {
        out.push_str(&title(&section.name, '-'));
        out.push_str("\n.. toctree::\n   :maxdepth: 2\n\n");

        let mut targets: Vec<String> = section
            .entries
            .iter()
            .map(|entry| mangle(&format!("{}::{}", spec.name, entry.name)))
            .collect();
        targets.sort();
        for target in targets {
            out.push_str("   ");
            out.push_str(&target);
            out.push('\n');
        }
    }
    out
}

fn title(text: &str, underline: char) -> String {
    format!(
        "\n{}\n{}\n",
        text,
        underline.to_string().repeat(text.chars().count())
    )
}

fn directive(project: &str, kind: &str, target: &str) -> String {
    format!("\n.. api:{}:: {}\n   :project: {}\n", kind, target, project)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Section, TypeSpec};

    fn bitset_spec() -> TypeSpec {
        TypeSpec {
            name: "containers::BitSet".to_string(),
            kind: "class".to_string(),
            sections: vec![
                Section {
                    name: "Capacity".to_string(),
                    entries: vec![
                        FunctionEntry::bare("size"),
                        FunctionEntry::bare("operator<<"),
                    ],
                },
                Section {
                    name: "_deprecated".to_string(),
                    entries: vec![FunctionEntry::bare("old_size")],
                },
            ],
        }
    }

    #[test]
    fn symbol_page_names() {
        assert_eq!(
            symbol_page_name("containers::BitSet", "size"),
            "containers__bitset__size.rst"
        );
        assert_eq!(
            symbol_page_name("containers::BitSet", "operator<<"),
            "containers__bitset__insertion_operator.rst"
        );
        assert_eq!(overview_page_name("containers::BitSet"), "containers__bitset.rst");
    }

    #[test]
    fn symbol_page_layout() {
        let page = symbol_page(
            "demo",
            "containers::BitSet",
            &FunctionEntry::bare("operator<<"),
        );
        assert_eq!(
            page,
            "\
.. Auto-generated by refgen; do not edit.

   Edit the page spec this file was derived from instead.

operator<<
==========

.. api:function:: containers::BitSet::operator<<
   :project: demo
"
        );
    }

    #[test]
    fn symbol_page_uses_entry_kind() {
        let page = symbol_page(
            "demo",
            "M",
            &FunctionEntry {
                kind: "typedef".to_string(),
                name: "const_iterator".to_string(),
            },
        );
        assert!(page.contains(".. api:typedef:: M::const_iterator"));
    }

    #[test]
    fn overview_title_is_unqualified() {
        let page = overview_page("demo", &bitset_spec());
        assert!(page.contains("\nBitSet\n======\n"));
        assert!(page.contains(".. api:class:: containers::BitSet"));
    }

    #[test]
    fn overview_sorts_by_mangled_target() {
        // raw order is size, operator<< — mangled order flips it
        let page = overview_page("demo", &bitset_spec());
        let insertion = page.find("containers__bitset__insertion_operator").unwrap();
        let size = page.find("containers__bitset__size").unwrap();
        assert!(insertion < size);
    }

    #[test]
    fn overview_omits_hidden_sections() {
        let page = overview_page("demo", &bitset_spec());
        assert!(!page.contains("_deprecated"));
        assert!(!page.contains("old_size"));
    }

    #[test]
    fn overview_keeps_empty_visible_sections() {
        let spec = TypeSpec {
            name: "M".to_string(),
            kind: "class".to_string(),
            sections: vec![Section {
                name: "Planned".to_string(),
                entries: Vec::new(),
            }],
        };
        let page = overview_page("demo", &spec);
        assert!(page.contains("\nPlanned\n-------\n"));
        assert!(page.contains(".. toctree::"));
    }
}
