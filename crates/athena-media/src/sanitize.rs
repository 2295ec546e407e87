//! Tool diagnostic sanitization.

use std::sync::LazyLock;

use regex::Regex;

/// SGR color/formatting sequences emitted by yt-dlp when a TTY is assumed.
static ANSI_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("valid ANSI regex"));

/// Remove terminal escape sequences from tool output so diagnostics can be
/// surfaced to users without formatting garbage.
pub fn strip_ansi_codes(text: &str) -> String {
    ANSI_ESCAPE.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_color_codes() {
        let raw = "\x1b[0;31mERROR:\x1b[0m unable to download video";
        assert_eq!(strip_ansi_codes(raw), "ERROR: unable to download video");
    }

    #[test]
    fn test_plain_text_unchanged() {
        let raw = "HTTP Error 403: Forbidden";
        assert_eq!(strip_ansi_codes(raw), raw);
    }
}
