//! Text normalization for approximate quote matching.
//!
//! Model-emitted quotes routinely differ from the source text in case,
//! accents, quote glyphs, character width, and whitespace. Both sides of
//! every comparison are folded through [`normalize`] first so those
//! differences disappear.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold text into its canonical comparison form.
///
/// Applied, in order: NFKC composition (which also folds full-width
/// Latin/punctuation U+FF01-FF5E and ideographic space U+3000), NFD with
/// combining marks stripped (so `é` equals `e`), smart-quote and katakana
/// middle-dot folding, lowercasing, whitespace runs collapsed to a single
/// space, and trimming.
pub(crate) fn normalize(text: &str) -> String {
    let composed: String = text.nfkc().collect();

    let mut out = String::with_capacity(composed.len());
    let mut pending_space = false;

    for c in composed.nfd() {
        if is_combining_mark(c) {
            continue;
        }
        let c = fold_char(c);
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        for lc in c.to_lowercase() {
            out.push(lc);
        }
    }

    out
}

/// Per-character folding NFKC does not already cover.
fn fold_char(c: char) -> char {
    match c {
        // curly/smart quotes to straight
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' => '\'',
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' => '"',
        // ideographic space
        '\u{3000}' => ' ',
        // katakana middle dot
        '\u{30FB}' => '\u{00B7}',
        // full-width Latin/punctuation to half-width
        c @ '\u{FF01}'..='\u{FF5E}' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
        c => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases() {
        assert_eq!(normalize("Hello World"), "hello world");
    }

    #[test]
    fn test_strips_accents() {
        assert_eq!(normalize("Café"), "cafe");
        assert_eq!(normalize("naïve résumé"), "naive resume");
    }

    #[test]
    fn test_folds_smart_quotes() {
        assert_eq!(normalize("\u{201C}don\u{2019}t\u{201D}"), "\"don't\"");
    }

    #[test]
    fn test_folds_full_width_forms() {
        // "ＨＥＬＬＯ！" in full-width forms
        assert_eq!(normalize("\u{FF28}\u{FF25}\u{FF2C}\u{FF2C}\u{FF2F}\u{FF01}"), "hello!");
    }

    #[test]
    fn test_ideographic_space_and_middle_dot() {
        assert_eq!(normalize("東京\u{3000}大阪"), "東京 大阪");
        assert_eq!(normalize("ラン\u{30FB}ダム"), "ラン\u{00B7}ダム");
    }

    #[test]
    fn test_collapses_and_trims_whitespace() {
        assert_eq!(normalize("  a \t\n  b  "), "a b");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_idempotent() {
        for s in ["Café  du\u{3000}Monde", "ＡＢＣ", "\u{201C}x\u{201D}"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }
}
