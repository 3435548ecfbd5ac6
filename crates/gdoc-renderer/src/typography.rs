//! Text-level rules applied after parsing.
//!
//! pulldown-cmark already handles quotes, dashes and ellipses through
//! `ENABLE_SMART_PUNCTUATION`. This module adds the two text rules it lacks:
//! fractions and autolinking of bare URLs. Input is plain text, output is
//! escaped HTML.

use std::fmt::Write;

use crate::state::escape_html;

/// URL prefixes recognized by the autolinker, with the scheme to prepend.
const URL_PREFIXES: &[(&str, &str)] = &[
    ("https://", ""),
    ("http://", ""),
    ("ftp://", ""),
    ("www.", "http://"),
];

/// Longest numerator or denominator turned into a fraction.
const MAX_FRACTION_DIGITS: usize = 4;

/// Convert a run of plain text to HTML.
///
/// # Arguments
///
/// * `text` - Unescaped text as produced by the parser
/// * `autolink` - Wrap bare URLs in `<a>` (false inside links and headings)
pub(crate) fn text_to_html(text: &str, autolink: bool) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut rest = text;
    let mut prev: Option<char> = None;

    while let Some(c) = rest.chars().next() {
        let at_boundary = prev.is_none_or(|p| !p.is_alphanumeric() && p != '/');

        if autolink
            && at_boundary
            && let Some(len) = url_len(rest)
        {
            let url = &rest[..len];
            write_link(url, &mut out);
            prev = url.chars().next_back();
            rest = &rest[len..];
            continue;
        }

        if at_boundary
            && c.is_ascii_digit()
            && let Some((numerator, denominator, len)) = fraction(rest)
        {
            write_fraction(numerator, denominator, &mut out);
            prev = rest[..len].chars().next_back();
            rest = &rest[len..];
            continue;
        }

        out.push_str(&escape_html(&rest[..c.len_utf8()]));
        prev = Some(c);
        rest = &rest[c.len_utf8()..];
    }

    out
}

/// Length in bytes of a URL starting at the beginning of `text`, if any.
fn url_len(text: &str) -> Option<usize> {
    let (prefix, _) = URL_PREFIXES
        .iter()
        .find(|(prefix, _)| starts_with_ignore_case(text, prefix))?;

    let mut end = text
        .find(|c: char| c.is_whitespace() || c == '<' || c == '>' || c == '"')
        .unwrap_or(text.len());

    // Trailing punctuation belongs to the sentence, not the URL.
    loop {
        let candidate = &text[..end];
        let Some(last) = candidate.chars().next_back() else {
            break;
        };
        let unbalanced_paren =
            last == ')' && candidate.matches('(').count() < candidate.matches(')').count();
        if matches!(
            last,
            '.' | ',' | ':' | ';' | '!' | '?' | '\'' | '\u{2019}' | '\u{201d}'
        ) || unbalanced_paren
        {
            end -= last.len_utf8();
        } else {
            break;
        }
    }

    // A bare prefix with nothing after it is not a link.
    (end > prefix.len()).then_some(end)
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn write_link(url: &str, out: &mut String) {
    let scheme = URL_PREFIXES
        .iter()
        .find(|(prefix, _)| starts_with_ignore_case(url, prefix))
        .map_or("", |(_, scheme)| *scheme);
    let escaped = escape_html(url);
    write!(out, r#"<a href="{scheme}{escaped}">{escaped}</a>"#).unwrap();
}

/// Parse `n/d` at the start of `text`, followed by a word boundary.
///
/// Returns `(numerator, denominator, byte length)`.
fn fraction(text: &str) -> Option<(&str, &str, usize)> {
    let num_len = text.bytes().take_while(u8::is_ascii_digit).count();
    if num_len == 0 || num_len > MAX_FRACTION_DIGITS {
        return None;
    }
    let after_num = &text[num_len..];
    let after_slash = after_num.strip_prefix('/')?;
    let den_len = after_slash.bytes().take_while(u8::is_ascii_digit).count();
    if den_len == 0 || den_len > MAX_FRACTION_DIGITS {
        return None;
    }

    let total = num_len + 1 + den_len;
    let followed_by_word = text[total..]
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '/');
    if followed_by_word {
        return None;
    }

    Some((&text[..num_len], &after_slash[..den_len], total))
}

fn write_fraction(numerator: &str, denominator: &str, out: &mut String) {
    match (numerator, denominator) {
        ("1", "2") => out.push_str("&frac12;"),
        ("1", "4") => out.push_str("&frac14;"),
        ("3", "4") => out.push_str("&frac34;"),
        _ => write!(out, "<sup>{numerator}</sup>&frasl;<sub>{denominator}</sub>").unwrap(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_plain_text_is_escaped() {
        assert_eq!(text_to_html("a < b & c", true), "a &lt; b &amp; c");
    }

    #[test]
    fn test_common_fractions() {
        assert_eq!(
            text_to_html("1/2 cup, 1/4 and 3/4", false),
            "&frac12; cup, &frac14; and &frac34;"
        );
    }

    #[test]
    fn test_general_fraction() {
        assert_eq!(
            text_to_html("open 24/7.", false),
            "open <sup>24</sup>&frasl;<sub>7</sub>."
        );
    }

    #[test]
    fn test_dates_are_not_fractions() {
        assert_eq!(text_to_html("on 10/16/2026", false), "on 10/16/2026");
    }

    #[test]
    fn test_fraction_inside_word_untouched() {
        assert_eq!(text_to_html("v1/2x and a1/2", false), "v1/2x and a1/2");
    }

    #[test]
    fn test_autolink_https() {
        assert_eq!(
            text_to_html("see https://example.com/docs for more", true),
            r#"see <a href="https://example.com/docs">https://example.com/docs</a> for more"#
        );
    }

    #[test]
    fn test_autolink_trailing_punctuation() {
        assert_eq!(
            text_to_html("Visit http://example.com.", true),
            r#"Visit <a href="http://example.com">http://example.com</a>."#
        );
    }

    #[test]
    fn test_autolink_balanced_parens() {
        assert_eq!(
            text_to_html("(https://en.wikipedia.org/wiki/Rust_(language))", true),
            r#"(<a href="https://en.wikipedia.org/wiki/Rust_(language)">https://en.wikipedia.org/wiki/Rust_(language)</a>)"#
        );
    }

    #[test]
    fn test_autolink_www_gets_scheme() {
        assert_eq!(
            text_to_html("www.example.com", true),
            r#"<a href="http://www.example.com">www.example.com</a>"#
        );
    }

    #[test]
    fn test_autolink_escapes_ampersand() {
        assert_eq!(
            text_to_html("https://x.io/?a=1&b=2", true),
            r#"<a href="https://x.io/?a=1&amp;b=2">https://x.io/?a=1&amp;b=2</a>"#
        );
    }

    #[test]
    fn test_autolink_disabled() {
        assert_eq!(
            text_to_html("https://example.com", false),
            "https://example.com"
        );
    }

    #[test]
    fn test_bare_prefix_not_linked() {
        assert_eq!(text_to_html("http:// is a scheme", true), "http:// is a scheme");
    }

    #[test]
    fn test_url_fractions_left_alone() {
        let html = text_to_html("https://example.com/1/2", true);
        assert!(html.contains(r#"href="https://example.com/1/2""#));
        assert!(!html.contains("frac"));
    }
}
