//! Link and emoji removal applied to emitted units

use std::sync::OnceLock;

use regex::Regex;

static LINK_PATTERN: OnceLock<Regex> = OnceLock::new();
static EMOJI_PATTERN: OnceLock<Regex> = OnceLock::new();

fn link_pattern() -> &'static Regex {
    LINK_PATTERN.get_or_init(|| {
        Regex::new(r"https?://[^\s]+").expect("link pattern is a valid regex")
    })
}

fn emoji_pattern() -> &'static Regex {
    // Pictographs with their modifiers, flags and joiners
    EMOJI_PATTERN.get_or_init(|| {
        Regex::new(concat!(
            r"[\p{Extended_Pictographic}\p{Emoji_Modifier}\p{Regional_Indicator}",
            r"\u{FE0F}\u{200D}\u{20E3}]",
        ))
        .expect("emoji pattern is a valid regex")
    })
}

/// Which cleanup passes run on each unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextSanitizer {
    pub remove_links: bool,
    pub remove_emojis: bool,
}

impl TextSanitizer {
    pub fn new(remove_links: bool, remove_emojis: bool) -> Self {
        Self {
            remove_links,
            remove_emojis,
        }
    }

    /// Apply the enabled passes and trim the result.
    ///
    /// Whitespace around removed spans is left untouched, so removing a link
    /// between two words leaves two spaces behind.
    pub fn clean(&self, text: &str) -> String {
        let mut out = text.to_string();
        if self.remove_links {
            out = link_pattern().replace_all(&out, "").into_owned();
        }
        if self.remove_emojis {
            out = emoji_pattern().replace_all(&out, "").into_owned();
        }
        out.trim().to_string()
    }

    /// Clean `text` and drop it when nothing is left
    pub fn clean_unit(&self, text: &str) -> Option<String> {
        let cleaned = self.clean(text);
        (!cleaned.is_empty()).then_some(cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_only_trims() {
        let sanitizer = TextSanitizer::default();
        assert_eq!(
            sanitizer.clean("  see https://example.com 😀 "),
            "see https://example.com 😀"
        );
    }

    #[test]
    fn test_links_and_emojis() {
        let sanitizer = TextSanitizer::new(true, true);
        assert_eq!(
            sanitizer.clean("Text with link: https://www.example.com and emoji 😀"),
            "Text with link:  and emoji"
        );
    }

    #[test]
    fn test_compound_emoji_removed() {
        let sanitizer = TextSanitizer::new(false, true);
        assert_eq!(sanitizer.clean("family 👨‍👩‍👧 and thumbs 👍🏽 ok"), "family  and thumbs  ok");
        assert_eq!(sanitizer.clean("flag 🇩🇪"), "flag");
    }

    #[test]
    fn test_plain_text_untouched() {
        let sanitizer = TextSanitizer::new(true, true);
        assert_eq!(sanitizer.clean("Price: $3.88 (approx.)"), "Price: $3.88 (approx.)");
    }

    #[test]
    fn test_empty_unit_dropped() {
        let sanitizer = TextSanitizer::new(true, true);
        assert_eq!(sanitizer.clean_unit("https://example.com 🎉"), None);
        assert_eq!(sanitizer.clean_unit(" ok "), Some("ok".to_string()));
    }
}
