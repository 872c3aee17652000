//! Clause segmentation.
//!
//! Legal documents arrive as one text blob. Before any clause can be embedded
//! or judged, the blob has to be cut into clause-sized strings. Two modes are
//! supported: splitting at numbered clause headings, and greedy paragraph
//! packing up to a character budget for documents without usable numbering.


use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_CHUNK_CHARS, PARAGRAPH_SEPARATOR_LEN};

/// How a document is cut into clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentMode {
    /// Split at numbered clause headings (`"12. "` at the start of a line).
    #[default]
    Clause,
    /// Pack blank-line paragraphs greedily up to a character budget.
    Size,
}

impl std::fmt::Display for SegmentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clause => write!(f, "clause"),
            Self::Size => write!(f, "size"),
        }
    }
}

/// Splits raw document text into clause strings.
///
/// Stateless apart from its configuration; the boundary pattern is compiled
/// once at construction.
#[derive(Debug, Clone)]
pub struct Segmenter {
    mode: SegmentMode,
    max_chars: usize,
    boundary: Regex,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(SegmentMode::default(), DEFAULT_MAX_CHUNK_CHARS)
    }
}

impl Segmenter {
    /// Creates a segmenter. `max_chars` only applies to [`SegmentMode::Size`]
    /// and counts characters, not bytes.
    pub fn new(mode: SegmentMode, max_chars: usize) -> Self {
        // A boundary is a line that opens with optional indentation, an
        // integer, a dot, and at least one whitespace character.
        let boundary = Regex::new(r"(?m)^\s*\d+\.\s+").expect("invalid clause boundary pattern");

        Self {
            mode,
            max_chars,
            boundary,
        }
    }

    pub fn mode(&self) -> SegmentMode {
        self.mode
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Cuts `text` into clauses according to the configured mode.
    ///
    /// Every returned clause is trimmed and non-empty; empty or
    /// whitespace-only input yields an empty vector in either mode.
    pub fn segment(&self, text: &str) -> Vec<String> {
        match self.mode {
            SegmentMode::Clause => self.split_at_headings(text),
            SegmentMode::Size => self.pack_paragraphs(text),
        }
    }

    /// Splits at numbered headings. Text ahead of the first heading belongs
    /// to no clause and is dropped, as are segments that trim to nothing.
    fn split_at_headings(&self, text: &str) -> Vec<String> {
        self.boundary
            .split(text)
            .skip(1)
            .filter_map(|segment| {
                let segment = segment.trim();
                (!segment.is_empty()).then(|| segment.to_string())
            })
            .collect()
    }

    /// Greedily accumulates blank-line paragraphs into chunks of at most
    /// `max_chars` characters. A single paragraph over the budget becomes its
    /// own oversized chunk rather than being split mid-sentence.
    fn pack_paragraphs(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut buffer = String::new();
        let mut buffer_chars = 0usize;

        for paragraph in text.split("\n\n") {
            let paragraph_chars = paragraph.chars().count();

            if buffer_chars + paragraph_chars + PARAGRAPH_SEPARATOR_LEN <= self.max_chars {
                buffer.push_str(paragraph);
                buffer.push_str("\n\n");
                buffer_chars += paragraph_chars + PARAGRAPH_SEPARATOR_LEN;
            } else {
                push_trimmed(&mut chunks, &buffer);
                buffer.clear();
                buffer.push_str(paragraph);
                buffer.push_str("\n\n");
                buffer_chars = paragraph_chars + PARAGRAPH_SEPARATOR_LEN;
            }
        }

        push_trimmed(&mut chunks, &buffer);
        chunks
    }
}

fn push_trimmed(chunks: &mut Vec<String>, buffer: &str) {
    let trimmed = buffer.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}
