use crate::domain::selection::{RegionRole, SelectionSnapshot};
use ratatui::layout::Rect;
use regex::Regex;
use std::sync::LazyLock;

/// Thresholds for the classifier. Kept as one injectable value so tests can
/// tighten or relax individual rules without touching the rule order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifierTuning {
    /// Minimum trimmed length for text containing CJK characters.
    pub min_chars_cjk: usize,
    /// Minimum trimmed length otherwise.
    pub min_chars: usize,
    /// Ceiling guarding against whole-pane drags.
    pub max_chars: usize,
    /// Single tokens at least this long count as identifiers.
    pub identifier_min_chars: usize,
}

pub const DEFAULT_TUNING: ClassifierTuning = ClassifierTuning {
    min_chars_cjk: 1,
    min_chars: 3,
    max_chars: 2000,
    identifier_min_chars: 8,
};

/// Surrounding facts the classifier needs beyond the snapshot itself:
/// rectangles of visible input-like regions (the composer), used by the
/// accidental-drag overlap rule.
#[derive(Debug, Clone, Default)]
pub struct ClassifyContext {
    pub input_rects: Vec<Rect>,
}

static EXPLANATORY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(for example|such as|in other words|that is|note that|in summary|therefore|because|this means)\b",
    )
    .unwrap()
});

static CAMEL_CASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9]*(?:[A-Z][a-zA-Z0-9]*)+$").unwrap());

static CONSTANT_CASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9]*(?:_[A-Z0-9]+)+$").unwrap());

static KEBAB_OR_SNAKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9]*(?:[-_][a-z0-9]+)+$").unwrap());

static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[-*•]\s+|\d{1,3}[.)]\s+)").unwrap());

/// Decide whether a selection is follow-up-worthy response content.
///
/// Rules run in order, first match wins: cheap structural rejections first,
/// then geometry, then the content heuristics. Pure; the only outcome is the
/// boolean.
#[must_use]
pub fn classify(snapshot: &SelectionSnapshot, ctx: &ClassifyContext) -> bool {
    classify_with(snapshot, ctx, &DEFAULT_TUNING)
}

#[must_use]
pub fn classify_with(
    snapshot: &SelectionSnapshot,
    ctx: &ClassifyContext,
    tuning: &ClassifierTuning,
) -> bool {
    let text = snapshot.text.trim();

    // 1. Length band.
    let len = text.chars().count();
    let min = if contains_cjk(text) {
        tuning.min_chars_cjk
    } else {
        tuning.min_chars
    };
    if len < min || len > tuning.max_chars {
        return false;
    }

    // 2. Selections anchored in editable regions are never eligible,
    // regardless of content.
    if snapshot.origin != RegionRole::Readonly {
        return false;
    }

    // 3. Not renderable.
    if snapshot.rect.width == 0 || snapshot.rect.height == 0 {
        return false;
    }

    // 4. Drags that visually cross an input boundary are usually accidents.
    if ctx
        .input_rects
        .iter()
        .any(|input| snapshot.rect.intersects(*input))
    {
        return false;
    }

    // 5. Content signals.
    if has_content_signal(text) {
        return true;
    }

    // 6. Identifier-shaped single tokens are valuable follow-up targets even
    // without surrounding punctuation.
    if is_identifier_like(text, tuning) {
        return true;
    }

    false
}

fn has_content_signal(text: &str) -> bool {
    if text
        .chars()
        .any(|c| matches!(c, '.' | '!' | '?' | '。' | '！' | '？'))
    {
        return true;
    }
    if text.split_whitespace().count() >= 2 {
        return true;
    }
    // CJK text carries word-level meaning without spaces, so the word-count
    // rule above never fires for it.
    if contains_cjk(text) {
        return true;
    }
    if LIST_MARKER.is_match(text) || text.contains('`') {
        return true;
    }
    EXPLANATORY.is_match(text)
}

fn is_identifier_like(text: &str, tuning: &ClassifierTuning) -> bool {
    if text.split_whitespace().count() != 1 {
        return false;
    }
    CAMEL_CASE.is_match(text)
        || CONSTANT_CASE.is_match(text)
        || KEBAB_OR_SNAKE.is_match(text)
        || (text.chars().count() >= tuning.identifier_min_chars
            && text.chars().all(|c| !c.is_whitespace()))
}

/// CJK in the length-rule sense: Han, kana, Hangul. A single ideograph is a
/// meaningful selection where a single Latin letter is not.
#[must_use]
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk)
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3400}'..='\u{4DBF}'    // CJK extension A
        | '\u{4E00}'..='\u{9FFF}'  // CJK unified
        | '\u{3040}'..='\u{309F}'  // hiragana
        | '\u{30A0}'..='\u{30FF}'  // katakana
        | '\u{AC00}'..='\u{D7AF}'  // hangul syllables
        | '\u{F900}'..='\u{FAFF}'  // CJK compat
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::selection::SelectionSnapshot;

    fn readonly(text: &str) -> SelectionSnapshot {
        SelectionSnapshot::new(text, Rect::new(2, 2, 20, 1), RegionRole::Readonly)
    }

    #[test]
    fn rejects_selection_in_editable_region() {
        let snap =
            SelectionSnapshot::new("A full sentence here.", Rect::new(0, 20, 20, 1), RegionRole::Editable);
        assert!(!classify(&snap, &ClassifyContext::default()));
    }

    #[test]
    fn rejects_below_minimum_length_regardless_of_content() {
        assert!(!classify(&readonly("a."), &ClassifyContext::default()));
        assert!(!classify(&readonly("ab"), &ClassifyContext::default()));
    }

    #[test]
    fn single_cjk_char_is_enough() {
        assert!(classify(&readonly("光"), &ClassifyContext::default()));
    }

    #[test]
    fn rejects_above_maximum_length() {
        let huge = "word ".repeat(500);
        assert!(!classify(&readonly(&huge), &ClassifyContext::default()));
    }

    #[test]
    fn rejects_zero_area_rect() {
        let snap = SelectionSnapshot::new(
            "A full sentence here.",
            Rect::new(2, 2, 0, 0),
            RegionRole::Readonly,
        );
        assert!(!classify(&snap, &ClassifyContext::default()));
    }

    #[test]
    fn rejects_overlap_with_input_rect() {
        let ctx = ClassifyContext {
            input_rects: vec![Rect::new(0, 2, 30, 3)],
        };
        assert!(!classify(&readonly("A full sentence here."), &ctx));
    }

    #[test]
    fn accepts_sentence_punctuation() {
        let snap = readonly("Photosynthesis converts light into chemical energy.");
        assert!(classify(&snap, &ClassifyContext::default()));
    }

    #[test]
    fn accepts_multi_word_without_punctuation() {
        assert!(classify(&readonly("chemical energy"), &ClassifyContext::default()));
    }

    #[test]
    fn accepts_list_markers_and_code_tokens() {
        assert!(classify(&readonly("- bullet"), &ClassifyContext::default()));
        assert!(classify(&readonly("3. step"), &ClassifyContext::default()));
        assert!(classify(&readonly("`foo`"), &ClassifyContext::default()));
    }

    #[test]
    fn accepts_identifier_shapes() {
        for token in ["camelCaseName", "MAX_RETRY_COUNT", "kebab-case-name", "snake_case_name"] {
            assert!(classify(&readonly(token), &ClassifyContext::default()), "{token}");
        }
    }

    #[test]
    fn accepts_long_opaque_token() {
        assert!(classify(&readonly("x86interp"), &ClassifyContext::default()));
    }

    #[test]
    fn rejects_short_plain_word() {
        assert!(!classify(&readonly("okay"), &ClassifyContext::default()));
    }

    #[test]
    fn rule_order_editable_beats_content() {
        // Content signals never rescue an editable-origin selection.
        let snap = SelectionSnapshot::new(
            "for example this one.",
            Rect::new(0, 0, 10, 1),
            RegionRole::Editable,
        );
        assert!(!classify(&snap, &ClassifyContext::default()));
    }
}
