//! Canonical entry names.
//!
//! Index pages decorate labels with level ranges (`Ignifaxus I-III`),
//! a `(*)` marker or a trailing ellipsis. The canonical name drops all of
//! them and is used both for dedup comparison and as the storage key.

use std::sync::LazyLock;

use regex::Regex;

/// Strip decorative suffixes from a raw index label.
///
/// Idempotent: `canonicalize_name(canonicalize_name(x)) == canonicalize_name(x)`.
pub fn canonicalize_name(raw: &str) -> String {
    let mut name = raw.trim().to_string();

    // Suffixes may be stacked in any order, e.g. `Foo I-III (*)`.
    loop {
        let stripped = strip_suffixes(&name);
        if stripped == name {
            return name;
        }
        name = stripped;
    }
}

fn strip_suffixes(name: &str) -> String {
    static LEVEL_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"\s+I\s*[-–]\s*[IVX]+$").expect("valid regex")
    });
    static STAR_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\s*\(\*\)$").expect("valid regex"));
    static DOTS_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\s*(?:\.\.\.|…)$").expect("valid regex"));

    let name = LEVEL_RE.replace(name, "");
    let name = STAR_RE.replace(&name, "");
    let name = DOTS_RE.replace(&name, "");
    name.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_level_range() {
        assert_eq!(canonicalize_name("Ignifaxus I-III"), "Ignifaxus");
        assert_eq!(canonicalize_name("Verbesserte Regeneration I–III"), "Verbesserte Regeneration");
        assert_eq!(canonicalize_name("Begabung I-V"), "Begabung");
    }

    #[test]
    fn canonical_names_are_stable() {
        for raw in ["Ignifaxus I-III", "Ignifaxus", "Sword (*)", "Axe ...", "  Spear  "] {
            let once = canonicalize_name(raw);
            assert_eq!(canonicalize_name(&once), once, "not idempotent for {raw:?}");
        }
        assert_eq!(canonicalize_name("Ignifaxus"), "Ignifaxus");
    }

    #[test]
    fn strips_star_and_ellipsis() {
        assert_eq!(canonicalize_name("Zwergennase (*)"), "Zwergennase");
        assert_eq!(canonicalize_name("Aberglaube ..."), "Aberglaube");
        assert_eq!(canonicalize_name("Aberglaube…"), "Aberglaube");
    }

    #[test]
    fn strips_stacked_suffixes() {
        assert_eq!(canonicalize_name("Waffenbegabung I-III (*)"), "Waffenbegabung");
        assert_eq!(canonicalize_name("Fluch (*) ..."), "Fluch");
    }

    #[test]
    fn leaves_plain_names_alone() {
        assert_eq!(canonicalize_name("Inquisition"), "Inquisition");
        assert_eq!(canonicalize_name("Schutz I"), "Schutz I");
        assert_eq!(canonicalize_name("Hand (rechts)"), "Hand (rechts)");
        assert_eq!(canonicalize_name("   "), "");
    }
}
