//! Boundary-aware character splitter.
//!
//! Cuts text into chunks of at most `chunk_size` characters, preferring to end
//! a chunk on a paragraph break, then a line break, then a sentence end, then
//! any whitespace, and only then mid-word. Each chunk after the first starts
//! exactly `chunk_overlap` characters before the end of the previous one.

use super::{Chunk, ChunkingConfig};
use crate::error::Result;
use crate::video_id::VideoId;
use tracing::debug;

/// Kinds of split points, most preferred first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    Paragraph,
    Line,
    Sentence,
    Word,
}

impl Boundary {
    const ORDER: [Boundary; 4] = [
        Boundary::Paragraph,
        Boundary::Line,
        Boundary::Sentence,
        Boundary::Word,
    ];

    /// Whether a chunk may end right before `chars[end]`.
    fn ends_at(self, chars: &[char], end: usize) -> bool {
        match self {
            Boundary::Paragraph => end >= 2 && chars[end - 2] == '\n' && chars[end - 1] == '\n',
            Boundary::Line => end >= 1 && chars[end - 1] == '\n',
            Boundary::Sentence => {
                end >= 2
                    && matches!(chars[end - 2], '.' | '!' | '?')
                    && chars[end - 1].is_whitespace()
            }
            Boundary::Word => end >= 1 && chars[end - 1].is_whitespace(),
        }
    }
}

/// Splits text on natural boundaries with a fixed overlap.
#[derive(Debug, Clone)]
pub struct RecursiveSplitter {
    config: ChunkingConfig,
}

impl RecursiveSplitter {
    pub fn new(config: ChunkingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Split `text` into ordered chunks tagged with `video_id`.
    pub fn split(&self, text: &str, video_id: &VideoId) -> Vec<Chunk> {
        let chunks: Vec<Chunk> = self
            .spans(text)
            .into_iter()
            .enumerate()
            .map(|(order, (start, content))| Chunk {
                video_id: video_id.clone(),
                content,
                order,
                start_char: start,
            })
            .collect();

        debug!("Split {} characters into {} chunks", text.chars().count(), chunks.len());
        chunks
    }

    /// Character ranges of each chunk, as (start offset, text).
    fn spans(&self, text: &str) -> Vec<(usize, String)> {
        let chars: Vec<char> = text.chars().collect();
        let size = self.config.chunk_size;
        let overlap = self.config.chunk_overlap;

        let mut spans = Vec::new();
        if chars.is_empty() {
            return spans;
        }

        let mut start = 0;
        loop {
            if chars.len() - start <= size {
                spans.push((start, chars[start..].iter().collect()));
                break;
            }

            let hard_end = start + size;
            // Short chunks would waste most of their length on overlap.
            let min_end = start + (overlap + 1).max(size / 2);
            let end = Self::find_boundary(&chars, min_end, hard_end).unwrap_or(hard_end);

            spans.push((start, chars[start..end].iter().collect()));
            start = end - overlap;
        }

        spans
    }

    /// Latest end position in `min_end..=max_end` on the best boundary kind.
    fn find_boundary(chars: &[char], min_end: usize, max_end: usize) -> Option<usize> {
        Boundary::ORDER.iter().find_map(|boundary| {
            (min_end..=max_end)
                .rev()
                .find(|&end| boundary.ends_at(chars, end))
        })
    }
}

impl Default for RecursiveSplitter {
    fn default() -> Self {
        Self {
            config: ChunkingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video() -> VideoId {
        VideoId::parse("dQw4w9WgXcQ").unwrap()
    }

    fn splitter(size: usize, overlap: usize) -> RecursiveSplitter {
        RecursiveSplitter::new(ChunkingConfig {
            chunk_size: size,
            chunk_overlap: overlap,
        })
        .unwrap()
    }

    fn sample_text(sentences: usize) -> String {
        (0..sentences)
            .map(|i| format!("Sentence number {} talks about topic {} in some detail.", i, i % 7))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// First chunk plus every later chunk minus its overlap.
    fn reconstruct(chunks: &[Chunk], overlap: usize) -> String {
        let mut text = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            if i == 0 {
                text.push_str(&chunk.content);
            } else {
                text.extend(chunk.content.chars().skip(overlap));
            }
        }
        text
    }

    fn assert_chunk_properties(text: &str, chunks: &[Chunk], size: usize, overlap: usize) {
        assert!(!chunks.is_empty());
        for chunk in chunks {
            assert!(chunk.char_len() <= size, "chunk too long: {}", chunk.char_len());
        }
        for pair in chunks.windows(2) {
            let prev: Vec<char> = pair[0].content.chars().collect();
            let next: Vec<char> = pair[1].content.chars().collect();
            assert_eq!(pair[1].start_char, pair[0].start_char + prev.len() - overlap);
            assert_eq!(&prev[prev.len() - overlap..], &next[..overlap]);
        }
        assert_eq!(reconstruct(chunks, overlap), text);
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let chunks = RecursiveSplitter::default().split("Hello world", &video());
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "Hello world");
        assert_eq!(chunks[0].order, 0);
        assert_eq!(chunks[0].start_char, 0);
    }

    #[test]
    fn test_exactly_chunk_size_is_single_chunk() {
        let text = "a".repeat(1000);
        let chunks = RecursiveSplitter::default().split(&text, &video());
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        assert!(RecursiveSplitter::default().split("", &video()).is_empty());
    }

    #[test]
    fn test_default_properties_on_long_transcript() {
        let text = sample_text(200);
        let chunks = RecursiveSplitter::default().split(&text, &video());

        assert!(chunks.len() > 5);
        assert_chunk_properties(&text, &chunks, 1000, 200);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.order, i);
            assert_eq!(chunk.video_id, video());
        }
    }

    #[test]
    fn test_prefers_sentence_end_over_word() {
        let text = sample_text(60);
        let chunks = splitter(300, 50).split(&text, &video());

        for chunk in &chunks[..chunks.len() - 1] {
            assert!(chunk.content.ends_with(". "), "chunk ends mid-sentence: {:?}", chunk.content);
        }
        assert_chunk_properties(&text, &chunks, 300, 50);
    }

    #[test]
    fn test_prefers_paragraph_break() {
        let paragraph = "word ".repeat(30);
        let text = format!("{}\n\n{}. More text follows here. {}", paragraph, paragraph, paragraph);
        let chunks = splitter(200, 20).split(&text, &video());

        assert!(chunks[0].content.ends_with("\n\n"));
        assert_chunk_properties(&text, &chunks, 200, 20);
    }

    #[test]
    fn test_hard_cut_without_whitespace() {
        let text = "x".repeat(2500);
        let chunks = RecursiveSplitter::default().split(&text, &video());

        assert_eq!(chunks[0].char_len(), 1000);
        assert_eq!(chunks[1].start_char, 800);
        assert_chunk_properties(&text, &chunks, 1000, 200);
    }

    #[test]
    fn test_multibyte_characters_count_as_one() {
        let text = "こんにちは世界。".repeat(300);
        let chunks = splitter(100, 10).split(&text, &video());
        assert_chunk_properties(&text, &chunks, 100, 10);
    }

    #[test]
    fn test_zero_overlap() {
        let text = sample_text(40);
        let chunks = splitter(250, 0).split(&text, &video());
        let joined: String = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = RecursiveSplitter::new(ChunkingConfig {
            chunk_size: 10,
            chunk_overlap: 20,
        });
        assert!(result.is_err());
    }
}
