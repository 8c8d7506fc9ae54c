use super::model::{Script, Segment};
use super::phonetic::PhoneticRules;
use regex::Regex;
use std::sync::LazyLock;

/// Bracketed stage directions such as `[laughs]` are never spoken
static STAGE_DIRECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]").expect("stage direction pattern is valid"));

/// Splits a drafted script into speech-service-sized segments.
///
/// Fragments are separated by an explicit delimiter. Each surviving fragment
/// is phonetically corrected and then cut into pieces no longer than
/// `max_chunk_length` characters, preferring sentence ends, then word
/// boundaries, then a hard cut.
#[derive(Debug, Clone)]
pub struct Chunker {
    delimiter: String,
    max_chunk_length: usize,
    min_fragment_length: usize,
    rules: PhoneticRules,
}

impl Chunker {
    pub fn new(
        delimiter: impl Into<String>,
        max_chunk_length: usize,
        min_fragment_length: usize,
        rules: PhoneticRules,
    ) -> Self {
        Self {
            delimiter: delimiter.into(),
            max_chunk_length: max_chunk_length.max(1),
            min_fragment_length,
            rules,
        }
    }

    pub fn chunk(&self, script: &Script) -> Vec<Segment> {
        let mut segments: Vec<Segment> = Vec::new();

        for (fragment, raw) in script.as_str().split(self.delimiter.as_str()).enumerate() {
            let source = raw.trim();
            let source_length = source.chars().count();

            if source_length < self.min_fragment_length {
                tracing::debug!(
                    fragment = fragment,
                    fragment_length = source_length,
                    min_fragment_length = self.min_fragment_length,
                    "Dropping fragment below minimum length"
                );
                continue;
            }

            let corrected = self.correct(source);
            if corrected.is_empty() {
                tracing::debug!(fragment = fragment, "Dropping fragment empty after correction");
                continue;
            }

            for text in self.split_to_limit(&corrected) {
                segments.push(Segment {
                    position: segments.len(),
                    fragment,
                    source: source.to_string(),
                    text,
                });
            }
        }

        tracing::info!(
            script_length = script.as_str().len(),
            segment_count = segments.len(),
            max_chunk_length = self.max_chunk_length,
            "Script split into segments"
        );

        segments
    }

    /// Phonetic rewrite, stage direction removal, trim
    fn correct(&self, fragment: &str) -> String {
        let rewritten = self.rules.apply(fragment);
        STAGE_DIRECTION
            .replace_all(&rewritten, "")
            .trim()
            .to_string()
    }

    fn split_to_limit(&self, text: &str) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut remaining = text.trim();

        while !remaining.is_empty() {
            // Byte offset of the first character past the limit
            let Some((limit, _)) = remaining.char_indices().nth(self.max_chunk_length) else {
                pieces.push(remaining.to_string());
                break;
            };

            let window = &remaining[..limit];
            let cut = window
                .rfind('.')
                .map(|idx| idx + 1)
                .or_else(|| window.rfind(char::is_whitespace))
                .filter(|&idx| idx > 0)
                .unwrap_or(limit);

            let piece = remaining[..cut].trim_end();
            if !piece.is_empty() {
                pieces.push(piece.to_string());
            }
            remaining = remaining[cut..].trim_start();
        }

        pieces
    }
}
