//! Intra-turn merging.
//!
//! Walks one turn's fragments in order, keeping a buffer of the sentence
//! being rebuilt. At each boundary the buffer and the next fragment are
//! scored:
//!
//! ```text
//! score >= theta   cut:   emit buffer, start a new one with the fragment
//! score <  theta   merge: buffer + separator + fragment
//! ```
//!
//! ## Separators
//!
//! Chat fragments carry no punctuation between them, so a separator is
//! chosen when joining:
//!
//! | Buffer ends with | Fragment starts with | Separator |
//! |------------------|----------------------|-----------|
//! | `.` `?` `!` `…` or a closing quote | anything | `" "` |
//! | anything else | `,` `.` `?` `!` `…` | `""` |
//! | anything else | anything else | `", "` |
//!
//! ```text
//! "안녕" + "밥 먹었어" + "?"  →  "안녕, 밥 먹었어?"
//! ```

use chrono::NaiveDateTime;
use tracing::trace;

use crate::score::boundary_score;
use crate::timestamp::elapsed_seconds;
use crate::SbdConfig;

/// Characters that close a sentence-like unit in the buffer.
const SENTENCE_CLOSERS: &[char] = &['.', '?', '!', '…', '\'', '\u{2019}', '"', '\u{201D}'];

/// Characters that let a fragment attach without a separator.
const LEADING_PUNCT: &[char] = &[',', '.', '?', '!', '…'];

/// Choose the separator for appending `next` to `buffer`.
///
/// ```rust
/// use chatmerge::join_separator;
///
/// assert_eq!(join_separator("갔어.", "근데"), " ");
/// assert_eq!(join_separator("밥 먹었어", "?"), "");
/// assert_eq!(join_separator("안녕", "밥 먹었어"), ", ");
/// ```
#[must_use]
pub fn join_separator(buffer: &str, next: &str) -> &'static str {
    if buffer.is_empty() {
        ""
    } else if buffer.ends_with(SENTENCE_CLOSERS) {
        " "
    } else if next.starts_with(LEADING_PUNCT) {
        ""
    } else {
        ", "
    }
}

/// Fold state for one turn.
#[derive(Debug)]
struct MergeState {
    sentences: Vec<String>,
    buffer: String,
    prev_ts: Option<NaiveDateTime>,
}

impl MergeState {
    fn start(ts: Option<NaiveDateTime>, text: &str) -> Self {
        Self {
            sentences: Vec::new(),
            buffer: text.trim().to_string(),
            prev_ts: ts,
        }
    }

    fn step(mut self, ts: Option<NaiveDateTime>, text: &str, config: &SbdConfig) -> Self {
        let next = text.trim();
        if next.is_empty() {
            self.prev_ts = ts;
            return self;
        }
        let elapsed = elapsed_seconds(self.prev_ts, ts);
        let score = boundary_score(&self.buffer, next, elapsed, false, config);

        if score >= config.theta {
            trace!(score, buffer = %self.buffer, next, "cut");
            self.emit();
            self.buffer = next.to_string();
        } else {
            trace!(score, buffer = %self.buffer, next, "merge");
            let sep = join_separator(&self.buffer, next);
            self.buffer.push_str(sep);
            self.buffer.push_str(next);
        }

        self.prev_ts = ts;
        self
    }

    fn emit(&mut self) {
        let sentence = self.buffer.trim();
        if !sentence.is_empty() {
            self.sentences.push(sentence.to_string());
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.emit();
        self.sentences
    }
}

/// Merge one turn's fragments into sentences.
///
/// `messages` must be a single turn: same speaker, time-ordered. No
/// validation is done here; [`crate::group_turns`] guarantees both.
/// Whitespace-only fragments are skipped, so no sentence is ever empty or
/// picks up a dangling separator.
///
/// ```rust
/// use chatmerge::{merge_within_turn, parse_timestamp, SbdConfig};
///
/// let turn = [
///     (parse_timestamp("2024-05-01 21:00:00"), "안녕"),
///     (parse_timestamp("2024-05-01 21:00:05"), "밥 먹었어"),
///     (parse_timestamp("2024-05-01 21:00:08"), "?"),
/// ];
/// let sentences = merge_within_turn(&turn, &SbdConfig::default());
/// assert_eq!(sentences, ["안녕, 밥 먹었어?"]);
/// ```
#[must_use]
pub fn merge_within_turn(
    messages: &[(Option<NaiveDateTime>, &str)],
    config: &SbdConfig,
) -> Vec<String> {
    let Some(((ts, text), rest)) = messages.split_first() else {
        return Vec::new();
    };

    rest.iter()
        .fold(MergeState::start(*ts, text), |state, (ts, text)| {
            state.step(*ts, text, config)
        })
        .finish()
}
