//! Sentence segmentation over a flat word-level transcript.
//!
//! The word sequence is scanned once, accumulating a text buffer per
//! speaker. A sentence boundary is forced by a speaker change, by terminal
//! punctuation (`.`, `!`, `?`), or by the end of the input. Segmentation is
//! pure: the same word sequence always yields the same sentences.

use crate::types::{Sentence, Speaker, Word};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TranscriptError {
    #[error("word {index} has negative start time {start}")]
    NegativeTimestamp { index: usize, start: f64 },

    #[error("word {index} ends before it starts ({start} > {end})")]
    InvertedSpan { index: usize, start: f64, end: f64 },

    #[error("word {index} starts before its predecessor ({start} < {prev})")]
    OutOfOrder { index: usize, start: f64, prev: f64 },
}

/// A segmented sentence plus the global word range it was built from.
///
/// `first_word` is the index into the version's transcript of the first word
/// that contributed to this sentence; selection resolution needs it to map
/// sentence-local word indices to global ones.
#[derive(Debug, Clone, PartialEq)]
pub struct SentenceSpan {
    pub sentence: Sentence,
    pub first_word: usize,
    pub word_count: usize,
}

/// Reject transcripts a well-behaved backend can never produce.
///
/// A failure here is fatal to the load: there is no sensible view to build
/// over words with negative or non-monotonic timing.
pub fn validate(words: &[Word]) -> Result<(), TranscriptError> {
    let mut prev_start = 0.0f64;

    for (index, word) in words.iter().enumerate() {
        if word.start_time < 0.0 {
            return Err(TranscriptError::NegativeTimestamp {
                index,
                start: word.start_time,
            });
        }
        if word.end_time < word.start_time {
            return Err(TranscriptError::InvertedSpan {
                index,
                start: word.start_time,
                end: word.end_time,
            });
        }
        if word.start_time < prev_start {
            return Err(TranscriptError::OutOfOrder {
                index,
                start: word.start_time,
                prev: prev_start,
            });
        }
        prev_start = word.start_time;
    }

    Ok(())
}

/// Segment a word sequence into speaker-attributed sentences, keeping the
/// global word range each sentence covers.
///
/// A speaker change flushes the running buffer as a sentence of the
/// *previous* speaker, ended at the new word's start time. Terminal
/// punctuation and end-of-input flush as the *current* speaker, ended at the
/// current word's end time. Empty buffers never emit.
pub fn segment_spans(words: &[Word]) -> Vec<SentenceSpan> {
    let mut spans = Vec::new();
    let mut buffer = String::new();
    let mut speaker = String::new();
    let mut start_time = 0.0;
    let mut first_word = 0;

    for (i, word) in words.iter().enumerate() {
        if speaker != word.speaker {
            if !buffer.is_empty() {
                spans.push(SentenceSpan {
                    sentence: Sentence {
                        text: buffer.trim().to_string(),
                        speaker: speaker.clone(),
                        start_time,
                        end_time: word.start_time,
                    },
                    first_word,
                    word_count: i - first_word,
                });
            }
            buffer.clear();
            speaker = word.speaker.clone();
            start_time = word.start_time;
        }

        if buffer.is_empty() {
            first_word = i;
        } else {
            buffer.push(' ');
        }
        buffer.push_str(&word.text);

        let terminal = word.text.ends_with(['.', '!', '?']);
        if (terminal || i == words.len() - 1) && !buffer.is_empty() {
            spans.push(SentenceSpan {
                sentence: Sentence {
                    text: buffer.trim().to_string(),
                    speaker: speaker.clone(),
                    start_time,
                    end_time: word.end_time,
                },
                first_word,
                word_count: i - first_word + 1,
            });
            buffer.clear();
            start_time = word.end_time;
        }
    }

    spans
}

/// Sentence view of [`segment_spans`], for callers that don't need offsets.
pub fn segment(words: &[Word]) -> Vec<Sentence> {
    segment_spans(words)
        .into_iter()
        .map(|span| span.sentence)
        .collect()
}

/// Derive the live speaker list from a sentence view: first-seen order,
/// 1-based ids.
pub fn speakers_of(sentences: &[Sentence]) -> Vec<Speaker> {
    let mut speakers: Vec<Speaker> = Vec::new();

    for sentence in sentences {
        if !speakers.iter().any(|s| s.name == sentence.speaker) {
            speakers.push(Speaker {
                id: speakers.len() as u32 + 1,
                name: sentence.speaker.clone(),
            });
        }
    }

    speakers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, start: f64, end: f64, speaker: &str) -> Word {
        Word {
            text: text.to_string(),
            start_time: start,
            end_time: end,
            speaker: speaker.to_string(),
        }
    }

    fn two_speaker_words() -> Vec<Word> {
        vec![
            word("Hi", 0.0, 0.5, "A"),
            word("there.", 0.5, 1.0, "A"),
            word("Bye", 1.0, 1.5, "B"),
        ]
    }

    #[test]
    fn punctuation_and_end_of_input_bound_sentences() {
        let sentences = segment(&two_speaker_words());
        assert_eq!(
            sentences,
            vec![
                Sentence {
                    text: "Hi there.".into(),
                    speaker: "A".into(),
                    start_time: 0.0,
                    end_time: 1.0,
                },
                Sentence {
                    text: "Bye".into(),
                    speaker: "B".into(),
                    start_time: 1.0,
                    end_time: 1.5,
                },
            ]
        );
    }

    #[test]
    fn speaker_change_flushes_open_buffer_with_previous_speaker() {
        let words = vec![
            word("so", 0.0, 0.3, "A"),
            word("anyway", 0.3, 0.8, "A"),
            word("right.", 0.8, 1.2, "B"),
        ];
        let sentences = segment(&words);

        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text, "so anyway");
        assert_eq!(sentences[0].speaker, "A");
        // open buffer ends where the new speaker's first word starts
        assert_eq!(sentences[0].end_time, 0.8);
        assert_eq!(sentences[1].text, "right.");
        assert_eq!(sentences[1].speaker, "B");
    }

    #[test]
    fn spans_carry_global_word_offsets() {
        let words = vec![
            word("Hi", 0.0, 0.5, "A"),
            word("there.", 0.5, 1.0, "A"),
            word("All", 1.0, 1.3, "A"),
            word("good.", 1.3, 1.6, "A"),
            word("Bye", 1.6, 2.0, "B"),
        ];
        let spans = segment_spans(&words);

        assert_eq!(spans.len(), 3);
        assert_eq!((spans[0].first_word, spans[0].word_count), (0, 2));
        assert_eq!((spans[1].first_word, spans[1].word_count), (2, 2));
        assert_eq!((spans[2].first_word, spans[2].word_count), (4, 1));
    }

    #[test]
    fn segmentation_is_deterministic() {
        let words = two_speaker_words();
        assert_eq!(segment(&words), segment(&words));
    }

    #[test]
    fn empty_input_yields_no_sentences() {
        assert!(segment(&[]).is_empty());
    }

    #[test]
    fn blank_words_never_emit_empty_sentences() {
        let words = vec![word("", 0.0, 0.0, "A")];
        assert!(segment(&words).is_empty());
    }

    #[test]
    fn speakers_are_numbered_in_first_seen_order() {
        let sentences = segment(&two_speaker_words());
        let speakers = speakers_of(&sentences);
        assert_eq!(
            speakers,
            vec![
                Speaker { id: 1, name: "A".into() },
                Speaker { id: 2, name: "B".into() },
            ]
        );
    }

    #[test]
    fn speaker_ids_do_not_repeat_for_returning_speakers() {
        let words = vec![
            word("Hi.", 0.0, 0.5, "A"),
            word("Hello.", 0.5, 1.0, "B"),
            word("Back.", 1.0, 1.5, "A"),
        ];
        let speakers = speakers_of(&segment(&words));
        assert_eq!(speakers.len(), 2);
    }

    #[test]
    fn validate_accepts_well_formed_input() {
        assert_eq!(validate(&two_speaker_words()), Ok(()));
        assert_eq!(validate(&[]), Ok(()));
    }

    #[test]
    fn validate_rejects_negative_start() {
        let words = vec![word("x", -0.1, 0.2, "A")];
        assert!(matches!(
            validate(&words),
            Err(TranscriptError::NegativeTimestamp { index: 0, .. })
        ));
    }

    #[test]
    fn validate_rejects_inverted_span() {
        let words = vec![word("x", 0.5, 0.2, "A")];
        assert!(matches!(
            validate(&words),
            Err(TranscriptError::InvertedSpan { index: 0, .. })
        ));
    }

    #[test]
    fn validate_rejects_decreasing_starts() {
        let words = vec![word("x", 1.0, 1.5, "A"), word("y", 0.5, 2.0, "A")];
        assert!(matches!(
            validate(&words),
            Err(TranscriptError::OutOfOrder { index: 1, .. })
        ));
    }
}
