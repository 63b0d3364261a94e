//! Content classification for captured text.
//!
//! Pure domain logic - no I/O. The rules are ordered; the first match wins.

use crate::model::ClipKind;

/// Prefix of file references placed on the clipboard by file managers.
pub const FILE_URL_PREFIX: &str = "file://";

/// Prefixes that mark a web link.
pub const LINK_PREFIXES: &[&str] = &["http://", "https://", "www."];

/// Opening fence of a fenced code block.
pub const CODE_FENCE: &str = "```";

/// Tokens that mark multi-line text as source code.
pub const CODE_MARKERS: &[&str] = &["{", ";", "=>", "def ", "class ", "import ", "#include"];

/// Classify captured text.
///
/// Total: every input maps to a kind. Image captures never pass through
/// here; they are always [`ClipKind::Image`].
pub fn classify(text: &str) -> ClipKind {
    let s = text.trim();

    if is_file_url(s) {
        ClipKind::File
    } else if is_link(s) {
        ClipKind::Link
    } else if is_code(s) {
        ClipKind::Code
    } else {
        ClipKind::Text
    }
}

fn is_file_url(s: &str) -> bool {
    s.starts_with(FILE_URL_PREFIX)
}

fn is_link(s: &str) -> bool {
    LINK_PREFIXES.iter().any(|prefix| s.starts_with(prefix))
}

fn is_code(s: &str) -> bool {
    if s.starts_with(CODE_FENCE) {
        return true;
    }

    let multi_line = s.contains('\n') || s.contains('\r');
    multi_line && CODE_MARKERS.iter().any(|marker| s.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links() {
        assert_eq!(classify("https://x.com"), ClipKind::Link);
        assert_eq!(classify("http://example.org/a?b=c"), ClipKind::Link);
        assert_eq!(classify("www.rust-lang.org"), ClipKind::Link);
    }

    #[test]
    fn test_file_url() {
        assert_eq!(classify("file:///Users/a/b.txt"), ClipKind::File);
    }

    #[test]
    fn test_fenced_code() {
        assert_eq!(classify("```\nlet x=1\n```"), ClipKind::Code);
        // A fence alone is enough, even without a line break
        assert_eq!(classify("```rust"), ClipKind::Code);
    }

    #[test]
    fn test_multiline_code_markers() {
        assert_eq!(
            classify("function f(){ return 1; }\nconsole.log(f())"),
            ClipKind::Code
        );
        assert_eq!(classify("import os\nprint(os.name)"), ClipKind::Code);
        assert_eq!(classify("#include <stdio.h>\nint main()"), ClipKind::Code);
        assert_eq!(classify("const f = () => 1\nf()"), ClipKind::Code);
    }

    #[test]
    fn test_single_line_markers_are_text() {
        assert_eq!(classify("let x = 1;"), ClipKind::Text);
        assert_eq!(classify("a {b}"), ClipKind::Text);
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(classify("just a plain sentence"), ClipKind::Text);
        assert_eq!(classify("two lines\nof prose"), ClipKind::Text);
        assert_eq!(classify(""), ClipKind::Text);
    }

    #[test]
    fn test_first_match_wins() {
        // A file URL spanning lines with code markers is still a file
        assert_eq!(classify("file:///tmp/a.rs\n{"), ClipKind::File);
        // Surrounding whitespace is ignored
        assert_eq!(classify("   https://x.com  \n"), ClipKind::Link);
    }
}
