//! Sanitized relative path built from an untrusted embedded name.

use std::fmt;
use std::path::PathBuf;

/// Segment used in place of anything that sanitizes to nothing.
pub const PLACEHOLDER: &str = "_unnamed";

/// Characters that are never allowed inside a segment.
pub const RESERVED_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// An embedded entry name converted into filesystem-legal path segments.
///
/// `SanitizedName` can only be built through [`sanitize`], so every segment
/// is guaranteed to:
/// - be non-empty
/// - contain no reserved character (`\ / : * ? " < > |`)
/// - contain no non-printable character
/// - have no surrounding whitespace
/// - not be `.` or `..`
///
/// Joining the segments under a destination directory therefore can never
/// leave that directory.
///
/// # Examples
///
/// ```
/// use sffx_core::sanitize;
///
/// let name = sanitize("textures\\hero?.png");
/// assert_eq!(name.segments(), ["textures", "hero.png"]);
/// assert!(!name.is_unrecoverable());
///
/// let garbage = sanitize("\u{1}\u{2}/  ");
/// assert!(garbage.is_unrecoverable());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SanitizedName {
    segments: Vec<String>,
    unrecoverable: bool,
}

impl SanitizedName {
    /// Returns the sanitized segments in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns `true` if no segment carries usable information.
    ///
    /// Such entries come from corrupted records and are skipped rather than
    /// written.
    #[must_use]
    pub const fn is_unrecoverable(&self) -> bool {
        self.unrecoverable
    }

    /// Returns the segments as a relative path.
    #[must_use]
    pub fn to_relative_path(&self) -> PathBuf {
        self.segments.iter().collect()
    }
}

impl fmt::Display for SanitizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// Sanitizes an embedded entry name.
///
/// Both `\` and `/` act as separators. Each segment loses its non-printable
/// and reserved characters and surrounding whitespace; a segment left empty,
/// or consisting only of `.`/`..`, becomes [`PLACEHOLDER`].
///
/// The result is marked unrecoverable when every segment is the
/// placeholder. Sanitization is deterministic and idempotent:
/// sanitizing `sanitize(x).to_string()` yields the same segments again.
#[must_use]
pub fn sanitize(raw: &str) -> SanitizedName {
    let segments: Vec<String> = raw.split(['\\', '/']).map(sanitize_segment).collect();
    let unrecoverable = segments
        .iter()
        .all(|s| s.is_empty() || s == PLACEHOLDER);

    SanitizedName {
        segments,
        unrecoverable,
    }
}

fn sanitize_segment(segment: &str) -> String {
    let cleaned: String = segment
        .chars()
        .filter(|&c| is_printable(c) && !RESERVED_CHARS.contains(&c))
        .collect();

    match cleaned.trim() {
        "" | "." | ".." => PLACEHOLDER.to_string(),
        trimmed => trimmed.to_string(),
    }
}

/// Returns `true` for characters that render as visible text.
///
/// ASCII space is printable; every other whitespace and control character
/// is not. Decoded names only ever hold ASCII and U+FFFD.
pub(crate) fn is_printable(c: char) -> bool {
    if c.is_ascii() {
        return c == ' ' || c.is_ascii_graphic();
    }
    !(c.is_control() || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name() {
        let name = sanitize("readme.txt");
        assert_eq!(name.segments(), ["readme.txt"]);
        assert!(!name.is_unrecoverable());
    }

    #[test]
    fn test_both_separators() {
        let name = sanitize("a\\b/c.bin");
        assert_eq!(name.segments(), ["a", "b", "c.bin"]);
        assert_eq!(name.to_string(), "a/b/c.bin");
    }

    #[test]
    fn test_reserved_chars_removed() {
        let name = sanitize("we:ird*na?me\"<x>|.dat");
        assert_eq!(name.segments(), ["weirdnamex.dat"]);
    }

    #[test]
    fn test_control_chars_removed() {
        let name = sanitize("fi\u{0}le\u{7}\t.txt");
        assert_eq!(name.segments(), ["file.txt"]);
    }

    #[test]
    fn test_whitespace_trimmed() {
        let name = sanitize("  spaced name  ");
        assert_eq!(name.segments(), ["spaced name"]);
    }

    #[test]
    fn test_empty_segments_become_placeholder() {
        let name = sanitize("/a//b");
        assert_eq!(name.segments(), [PLACEHOLDER, "a", PLACEHOLDER, "b"]);
        assert!(!name.is_unrecoverable());
    }

    #[test]
    fn test_dot_segments_become_placeholder() {
        let name = sanitize("..\\..\\etc/passwd");
        assert_eq!(name.segments(), [PLACEHOLDER, PLACEHOLDER, "etc", "passwd"]);
        assert!(!sanitize("./x").segments().contains(&".".to_string()));
    }

    #[test]
    fn test_fully_unrecoverable() {
        assert!(sanitize("").is_unrecoverable());
        assert!(sanitize("\u{1}\u{2}\u{3}").is_unrecoverable());
        assert!(sanitize("::/**/  ").is_unrecoverable());
        assert!(sanitize("..").is_unrecoverable());
        assert!(sanitize(PLACEHOLDER).is_unrecoverable());
    }

    #[test]
    fn test_replacement_char_is_kept() {
        let name = sanitize("bad\u{FFFD}name");
        assert_eq!(name.segments(), ["bad\u{FFFD}name"]);
        assert!(!name.is_unrecoverable());
    }

    #[test]
    fn test_relative_path() {
        let name = sanitize("dir\\file.txt");
        let path = name.to_relative_path();
        assert_eq!(path, PathBuf::from("dir").join("file.txt"));
    }

    #[test]
    fn test_idempotent_examples() {
        for raw in ["a\\b", " x / y ", "..", "q?\u{FFFD}", "/", "a/./b"] {
            let once = sanitize(raw);
            let twice = sanitize(&once.to_string());
            assert_eq!(once, twice, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_is_printable() {
        assert!(is_printable('a'));
        assert!(is_printable(' '));
        assert!(is_printable('é'));
        assert!(!is_printable('\n'));
        assert!(!is_printable('\u{00A0}'));
        assert!(is_printable('\u{FFFD}'));
        assert!(!is_printable('\u{7F}'));
    }
}
