//! Staleness policy — decide whether an artifact must be rewritten.

use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// True when an artifact has to be (re)written.
///
/// Regenerate if the output is missing, the spec is strictly newer than the
/// output, or the generator itself is newer than either — so rebuilding the
/// generator invalidates every artifact without touching the specs.
pub fn should_regenerate(
    output_mtime: Option<SystemTime>,
    spec_mtime: SystemTime,
    generator_mtime: SystemTime,
) -> bool {
    match output_mtime {
        None => true,
        Some(output_mtime) => {
            spec_mtime > output_mtime
                || generator_mtime > spec_mtime
                || generator_mtime > output_mtime
        }
    }
}

/// Modification time of a file, `None` when it does not exist (or is not a
/// regular file with readable metadata).
pub fn file_mtime(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Modification time of the running generator binary.
///
/// Falls back to the epoch when the executable cannot be stat'd, so an
/// unknown generator age never forces rebuilds on its own.
pub fn generator_mtime() -> SystemTime {
    std::env::current_exe()
        .ok()
        .and_then(|exe| file_mtime(&exe))
        .unwrap_or(UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn t(seconds: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(seconds)
    }

    #[test]
    fn missing_output_regenerates() {
        assert!(should_regenerate(None, t(10), t(5)));
    }

    #[test]
    fn up_to_date_output_is_kept() {
        // output newer than both inputs
        assert!(!should_regenerate(Some(t(20)), t(10), t(5)));
    }

    #[test]
    fn newer_spec_regenerates() {
        assert!(should_regenerate(Some(t(10)), t(11), t(5)));
    }

    #[test]
    fn equal_mtimes_are_not_stale() {
        // comparisons are strict
        assert!(!should_regenerate(Some(t(10)), t(10), t(10)));
    }

    #[test]
    fn newer_generator_than_spec_regenerates() {
        assert!(should_regenerate(Some(t(20)), t(10), t(15)));
    }

    #[test]
    fn newer_generator_than_output_regenerates() {
        assert!(should_regenerate(Some(t(10)), t(5), t(12)));
    }

    #[test]
    fn file_mtime_of_missing_path() {
        assert!(file_mtime(Path::new("/nonexistent/refgen-mtime-probe")).is_none());
    }
}
