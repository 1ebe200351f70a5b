//! Character-offset word indexing and selection resolution.
//!
//! A rendered sentence is addressed by the UI as a character range. This
//! module recovers which words that range covers, widening partial-word
//! selections to whole words. Offsets are `char` indices, matching what a
//! text renderer reports; they are not byte offsets.

/// One rendered word and the character span it occupies in its sentence.
///
/// `end_char` is the offset one past the word's last character, which is
/// also the offset of the following space; containment checks treat it as
/// inclusive so a selection ending on the space still maps to the word
/// before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSpan {
    pub text: String,
    pub index: usize,
    pub start_char: usize,
    pub end_char: usize,
}

/// A resolved selection, in sentence-local word indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start_word: usize,
    pub end_word: usize,
}

/// Derive the character span of every word in a sentence.
///
/// Sentences are built by joining words with single spaces, so splitting on
/// single spaces and accumulating offsets recovers exactly the spans the
/// segmenter produced.
pub fn index_words(text: &str) -> Vec<WordSpan> {
    let mut spans = Vec::new();
    let mut pos = 0;

    for (index, word) in text.split(' ').enumerate() {
        let len = word.chars().count();
        spans.push(WordSpan {
            text: word.to_string(),
            index,
            start_char: pos,
            end_char: pos + len,
        });
        pos += len + 1;
    }

    spans
}

/// Map a character-range selection to the word-index range it covers.
///
/// The range is first snapped outward to whole words: the start expands left
/// and the end expands right until a space (or the sentence edge) is hit. A
/// partial-word selection is always widened, never narrowed.
///
/// Offsets that fall outside the sentence clamp to the nearest valid word:
/// past the end resolves to the last word, and an offset no span contains
/// resolves to the next word after it. The result always satisfies
/// `start_word <= end_word`.
pub fn resolve_selection(text: &str, sel_start: usize, sel_end: usize) -> Selection {
    let chars: Vec<char> = text.chars().collect();

    let mut start = sel_start.min(chars.len());
    let mut end = sel_end.min(chars.len());
    if end < start {
        std::mem::swap(&mut start, &mut end);
    }

    while start > 0 && chars[start - 1] != ' ' {
        start -= 1;
    }
    while end < chars.len() && chars[end] != ' ' {
        end += 1;
    }

    let spans = index_words(text);
    let start_word = word_at(&spans, start);
    let end_word = word_at(&spans, end);

    Selection {
        start_word: start_word.min(end_word),
        end_word: start_word.max(end_word),
    }
}

/// The word index covering `pos`, clamped to the nearest span when no span
/// contains it.
fn word_at(spans: &[WordSpan], pos: usize) -> usize {
    if let Some(span) = spans
        .iter()
        .find(|s| pos >= s.start_char && pos <= s.end_char)
    {
        return span.index;
    }

    spans
        .iter()
        .find(|s| s.start_char > pos)
        .map(|s| s.index)
        .unwrap_or_else(|| spans.len().saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_words_accumulates_offsets() {
        let spans = index_words("Hi there.");
        assert_eq!(
            spans,
            vec![
                WordSpan {
                    text: "Hi".into(),
                    index: 0,
                    start_char: 0,
                    end_char: 2,
                },
                WordSpan {
                    text: "there.".into(),
                    index: 1,
                    start_char: 3,
                    end_char: 9,
                },
            ]
        );
    }

    #[test]
    fn index_words_counts_chars_not_bytes() {
        let spans = index_words("héllo wörld");
        assert_eq!(spans[0].end_char, 5);
        assert_eq!(spans[1].start_char, 6);
        assert_eq!(spans[1].end_char, 11);
    }

    #[test]
    fn exact_word_selection_resolves_to_that_word() {
        // "there" inside "Hi there." is chars 3..8
        let sel = resolve_selection("Hi there.", 3, 8);
        assert_eq!(sel, Selection { start_word: 1, end_word: 1 });
    }

    #[test]
    fn partial_selection_widens_to_whole_words() {
        // "i th" straddles both words
        let sel = resolve_selection("Hi there.", 1, 5);
        assert_eq!(sel, Selection { start_word: 0, end_word: 1 });
    }

    #[test]
    fn word_ranges_round_trip() {
        let text = "one two three four five";
        let spans = index_words(text);

        for a in 0..spans.len() {
            for b in a..spans.len() {
                let sel = resolve_selection(text, spans[a].start_char, spans[b].end_char);
                assert_eq!(
                    sel,
                    Selection { start_word: a, end_word: b },
                    "span {a}..{b}"
                );
            }
        }
    }

    #[test]
    fn selection_ending_on_a_space_maps_to_preceding_word() {
        // chars 0..2 is "Hi" plus the boundary; char 2 is the space
        let sel = resolve_selection("Hi there.", 0, 2);
        assert_eq!(sel, Selection { start_word: 0, end_word: 0 });
    }

    #[test]
    fn out_of_range_offsets_clamp_to_last_word() {
        let sel = resolve_selection("Hi there.", 40, 80);
        assert_eq!(sel, Selection { start_word: 1, end_word: 1 });
    }

    #[test]
    fn reversed_offsets_are_reordered() {
        let sel = resolve_selection("Hi there.", 8, 3);
        assert_eq!(sel, Selection { start_word: 1, end_word: 1 });
    }

    #[test]
    fn empty_sentence_resolves_to_word_zero() {
        let sel = resolve_selection("", 0, 0);
        assert_eq!(sel, Selection { start_word: 0, end_word: 0 });
    }
}
