//! Canonical name mangling — qualified symbol spelling to a stable,
//! filesystem-safe identifier.
//!
//! Operator spellings are rewritten by an ordered rule table before the
//! generic fallback. Declared order is priority order: `operator<<` must be
//! tried before `operator<`, which it contains as a prefix.

use regex::Regex;
use std::sync::LazyLock;

/// Special-spelling rules, tried in declared order. Each rule replaces all
/// occurrences of its pattern.
const RULES: &[(&str, &str)] = &[
    (r"operator\s*\*", "operator_star"),
    (r"operator!=", "operator_not_eq"),
    (r"operator\(\)", "call_operator"),
    (r"operator<<", "insertion_operator"),
    (r"operator<", "operator_less"),
    (r"operator==", "operator_equal_to"),
    (r"operator>", "operator_greater"),
];

static COMPILED_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    RULES
        .iter()
        .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), *replacement))
        .collect()
});

static RE_NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W").unwrap());

/// Mangle a qualified symbol spelling into a lowercase identifier containing
/// only alphanumerics and `_`.
///
/// Deterministic and pure. Distinct spellings may mangle to the same
/// identifier; collisions are the caller's concern.
pub fn mangle(qualified: &str) -> String {
    let mut out = qualified.to_string();
    for (pattern, replacement) in COMPILED_RULES.iter() {
        out = pattern.replace_all(&out, *replacement).into_owned();
    }
    RE_NON_WORD.replace_all(&out, "_").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- one test per rule --

    #[test]
    fn star_operator() {
        assert_eq!(mangle("operator*"), "operator_star");
        assert_eq!(mangle("operator *"), "operator_star");
    }

    #[test]
    fn not_equal_operator() {
        assert_eq!(mangle("operator!="), "operator_not_eq");
    }

    #[test]
    fn call_operator() {
        assert_eq!(mangle("operator()"), "call_operator");
    }

    #[test]
    fn insertion_operator() {
        assert_eq!(mangle("operator<<"), "insertion_operator");
    }

    #[test]
    fn less_operator() {
        assert_eq!(mangle("operator<"), "operator_less");
    }

    #[test]
    fn equal_operator() {
        assert_eq!(mangle("operator=="), "operator_equal_to");
    }

    #[test]
    fn greater_operator() {
        assert_eq!(mangle("operator>"), "operator_greater");
    }

    // -- priority ordering --

    #[test]
    fn insertion_beats_less() {
        // `operator<<` contains `operator<` as a prefix; the insertion rule
        // must win because it is declared first.
        assert_eq!(
            mangle("containers::BitSet::operator<<"),
            "containers__bitset__insertion_operator"
        );
        assert!(!mangle("operator<<").contains("operator_less"));
    }

    // -- fallback and casing --

    #[test]
    fn scope_separators_become_underscores() {
        assert_eq!(mangle("containers::BitSet::size"), "containers__bitset__size");
    }

    #[test]
    fn parameter_list_is_flattened() {
        assert_eq!(mangle("BitSet::at(size_t)"), "bitset__at_size_t_");
    }

    #[test]
    fn lowercase_alnum_underscore_only() {
        for input in ["A::B", "operator<<", "x-y.z", "Weird  Name!"] {
            let mangled = mangle(input);
            assert_eq!(mangled, mangled.to_lowercase());
            assert!(
                mangled.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
                "unexpected character in {:?}",
                mangled
            );
        }
    }

    #[test]
    fn deterministic() {
        assert_eq!(mangle("Matrix::operator()"), mangle("Matrix::operator()"));
    }
}
