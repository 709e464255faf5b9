//! Types for the compound name segmentation system.

use unicode_normalization::UnicodeNormalization;

/// One hyphen-delimited piece of a name.
///
/// Offsets point into the original name so merged tokens can be cut out
/// verbatim, including whatever spacing surrounded the inner hyphens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Trimmed segment text.
    pub text: &'a str,

    /// Byte offset of `text` in the source name.
    pub start: usize,

    /// NFC form of `text`, used for word-list comparisons.
    key: String,
}

impl<'a> Segment<'a> {
    /// Create a segment starting at `start` in the source name.
    #[must_use]
    pub fn new(text: &'a str, start: usize) -> Self {
        Self {
            text,
            start,
            key: normalize_word(text),
        }
    }

    /// Byte offset just past the end of `text` in the source name.
    #[must_use]
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    /// Normalized text for matching against word lists.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Split a name on hyphens into trimmed, non-empty segments.
#[must_use]
pub fn split_segments(name: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut offset = 0;

    for raw in name.split('-') {
        let text = raw.trim();
        if !text.is_empty() {
            let leading = raw.len() - raw.trim_start().len();
            segments.push(Segment::new(text, offset + leading));
        }
        offset += raw.len() + 1;
    }

    segments
}

/// Normalize a word to NFC so composed and decomposed umlauts compare equal.
#[must_use]
pub fn normalize_word(word: &str) -> String {
    word.nfc().collect()
}

/// How to pair Finnish and Swedish tokens when their counts differ.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum AlignmentPolicy {
    /// Pair by Finnish position; missing Swedish tokens become absent names,
    /// surplus Swedish tokens are dropped.
    #[default]
    Pad,

    /// Keep the neighborhood unsplit when the counts differ.
    KeepWhole,
}
