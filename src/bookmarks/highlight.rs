//! Split display text into plain and matched segments for search highlighting.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Plain,
    Match,
}

/// A run of display text. `text` keeps the casing of the source string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self {
            kind: SegmentKind::Plain,
            text: text.to_string(),
        }
    }

    fn matched(text: &str) -> Self {
        Self {
            kind: SegmentKind::Match,
            text: text.to_string(),
        }
    }

    pub fn is_match(&self) -> bool {
        self.kind == SegmentKind::Match
    }
}

/// Lower-cased copy of a string with a byte map back into the source.
///
/// `starts[i]` and `ends[i]` are the byte range of the source char that
/// produced byte `i` of `lower`. Needed because lower-casing can change the
/// byte length of a char.
struct LowerView {
    lower: String,
    starts: Vec<usize>,
    ends: Vec<usize>,
}

impl LowerView {
    fn new(text: &str) -> Self {
        let mut lower = String::with_capacity(text.len());
        let mut starts = Vec::with_capacity(text.len());
        let mut ends = Vec::with_capacity(text.len());

        for (start, c) in text.char_indices() {
            let end = start + c.len_utf8();
            for lc in c.to_lowercase() {
                for _ in 0..lc.len_utf8() {
                    starts.push(start);
                    ends.push(end);
                }
                lower.push(lc);
            }
        }

        // Per-char lowering misses final sigma (Σ → ς at a word end), which
        // `str::to_lowercase` and the filter apply. Both forms encode to the
        // same length, so the byte maps still line up.
        let contextual = text.to_lowercase();
        if contextual.len() == lower.len() {
            lower = contextual;
        }

        Self { lower, starts, ends }
    }
}

/// Split `text` into segments, marking every case-insensitive occurrence of
/// `query`.
///
/// Matches are found left to right and never overlap: scanning resumes after
/// the end of each match. Concatenating the segment texts always yields
/// `text` unchanged.
pub fn highlight(text: &str, query: &str) -> Vec<Segment> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return vec![Segment::plain(text)];
    }

    let view = LowerView::new(text);
    let mut segments = Vec::new();
    let mut emitted = 0; // source bytes already covered by segments
    let mut from = 0; // search position in `view.lower`

    while let Some(found) = view.lower[from..].find(&needle) {
        let lower_start = from + found;
        let lower_end = lower_start + needle.len();

        let start = view.starts[lower_start].max(emitted);
        let end = view.ends[lower_end - 1];

        if start > emitted {
            segments.push(Segment::plain(&text[emitted..start]));
        }
        if end > start {
            segments.push(Segment::matched(&text[start..end]));
            emitted = end;
        }

        // Skip lower-case bytes that map back into the matched source range
        from = lower_end;
        while from < view.lower.len() && view.starts[from] < emitted {
            from += 1;
        }
    }

    if segments.is_empty() {
        return vec![Segment::plain(text)];
    }
    if emitted < text.len() {
        segments.push(Segment::plain(&text[emitted..]));
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(segments: &[Segment]) -> String {
        segments.iter().map(|s| s.text.as_str()).collect()
    }

    fn matches(segments: &[Segment]) -> Vec<&str> {
        segments
            .iter()
            .filter(|s| s.is_match())
            .map(|s| s.text.as_str())
            .collect()
    }

    #[test]
    fn test_empty_query_is_single_plain_segment() {
        let segments = highlight("Email", "");
        assert_eq!(segments, vec![Segment::plain("Email")]);
    }

    #[test]
    fn test_no_occurrence_is_single_plain_segment() {
        let segments = highlight("Email", "news");
        assert_eq!(segments, vec![Segment::plain("Email")]);
    }

    #[test]
    fn test_preserves_source_casing() {
        let segments = highlight("My WORK Folder", "work");
        assert_eq!(
            segments,
            vec![
                Segment::plain("My "),
                Segment::matched("WORK"),
                Segment::plain(" Folder"),
            ]
        );
    }

    #[test]
    fn test_match_at_both_ends() {
        let segments = highlight("abXYab", "ab");
        assert_eq!(
            segments,
            vec![
                Segment::matched("ab"),
                Segment::plain("XY"),
                Segment::matched("ab"),
            ]
        );
    }

    #[test]
    fn test_whole_text_match() {
        assert_eq!(highlight("News", "news"), vec![Segment::matched("News")]);
    }

    #[test]
    fn test_non_overlapping_leftmost_first() {
        let segments = highlight("aaaa", "aa");
        assert_eq!(matches(&segments), vec!["aa", "aa"]);

        let segments = highlight("aaa", "aa");
        assert_eq!(segments, vec![Segment::matched("aa"), Segment::plain("a")]);
    }

    #[test]
    fn test_non_ascii_lowercase_keeps_offsets() {
        // 'İ' lower-cases to two chars, shifting byte offsets
        let text = "İstanbul and İzmir";
        let segments = highlight(text, "i\u{307}z");
        assert_eq!(joined(&segments), text);
        assert_eq!(matches(&segments), vec!["İz"]);

        let segments = highlight("ÄRGER über ärger", "ärger");
        assert_eq!(matches(&segments), vec!["ÄRGER", "ärger"]);
    }

    #[test]
    fn test_final_sigma_matches_what_the_filter_keeps() {
        use crate::bookmarks::{BookmarkNode, filter_tree, normalize_query};

        let title = "ΟΔΟΣ ΣΟΦΙΑΣ";
        let nodes = vec![BookmarkNode::bookmark("1", title, "https://example.gr")];

        for raw in ["ΟΔΟΣ", "οδος", "ΣΟΦΙΑΣ"] {
            let query = normalize_query(raw);
            assert_eq!(filter_tree(&nodes, &query, &[]).len(), 1, "query {:?}", raw);

            let segments = highlight(title, &query);
            assert_eq!(joined(&segments), title);
            assert!(
                segments.iter().any(Segment::is_match),
                "nothing marked for query {:?}",
                raw
            );
        }
        assert_eq!(matches(&highlight(title, &normalize_query("ΟΔΟΣ"))), vec!["ΟΔΟΣ"]);
    }

    #[test]
    fn test_round_trip_for_many_queries() {
        let texts = ["", "Email", "https://mail.example.com/a?b=c", "ÅÅå straße", "aaaa"];
        let queries = ["", "a", "aa", "mail", ".", "ss", "å", "straße", "zzz"];

        for text in texts {
            for query in queries {
                let segments = highlight(text, query);
                assert_eq!(joined(&segments), text, "text {:?} query {:?}", text, query);
                assert!(
                    segments.iter().filter(|s| s.is_match()).all(|s| !s.text.is_empty()),
                    "empty match for text {:?} query {:?}",
                    text,
                    query
                );
            }
        }
    }
}
