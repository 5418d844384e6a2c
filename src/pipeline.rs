//! End-to-end merging: group turns, merge within each, flatten.
//!
//! Merging is enrichment, not a requirement of the surrounding ETL. The
//! best-effort entry points never fail: on any error they log a warning
//! and hand the input back untouched.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::merge::merge_within_turn;
use crate::message::{Message, Turn};
use crate::turn::{group_turns, split_turns};
use crate::{Error, Result, SbdConfig};

/// Counts from one merge run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Messages in.
    pub input: usize,
    /// Sentences out.
    pub output: usize,
    /// Turns found.
    pub turns: usize,
}

impl std::fmt::Display for MergeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} messages -> {} sentences ({} turns)",
            self.input, self.output, self.turns
        )
    }
}

/// A sentence merger bound to one configuration.
///
/// ```rust
/// use chatmerge::{Message, SbdMerger};
///
/// let merger = SbdMerger::default();
/// let merged = merger.merge_or_passthrough(vec![
///     Message::new("2024-05-01 21:00:00", "민지", "안녕"),
///     Message::new("2024-05-01 21:00:05", "민지", "밥 먹었어"),
///     Message::new("2024-05-01 21:00:08", "민지", "?"),
/// ]);
///
/// assert_eq!(merged.len(), 1);
/// assert_eq!(merged[0].message, "안녕, 밥 먹었어?");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SbdMerger {
    config: SbdConfig,
}

impl SbdMerger {
    /// Create a merger with the given configuration.
    #[must_use]
    pub fn new(config: SbdConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &SbdConfig {
        &self.config
    }

    /// Merge messages, reporting failures.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTurn`] if grouping produced a turn with no
    /// messages.
    pub fn merge(&self, messages: &[Message]) -> Result<(Vec<Message>, MergeStats)> {
        let annotated = group_turns(messages, &self.config);
        let turns = split_turns(&annotated);

        let mut merged = Vec::with_capacity(messages.len());
        for turn in &turns {
            merged.extend(self.merge_turn(turn)?);
        }

        let stats = MergeStats {
            input: messages.len(),
            output: merged.len(),
            turns: turns.len(),
        };
        Ok((merged, stats))
    }

    /// Merge messages, falling back to the input on failure.
    #[must_use]
    pub fn merge_or_passthrough(&self, messages: Vec<Message>) -> Vec<Message> {
        info!(messages = messages.len(), "sentence merge started");
        match self.merge(&messages) {
            Ok((merged, stats)) => {
                info!(%stats, "sentence merge finished");
                merged
            }
            Err(e) => {
                warn!(error = %e, "sentence merge failed, keeping original messages");
                messages
            }
        }
    }

    fn merge_turn(&self, turn: &Turn<'_>) -> Result<Vec<Message>> {
        let first = turn.first().ok_or(Error::EmptyTurn(turn.id))?;

        let fragments: Vec<_> = turn
            .messages
            .iter()
            .map(|m| (m.timestamp, m.text()))
            .collect();

        Ok(merge_within_turn(&fragments, &self.config)
            .into_iter()
            .map(|sentence| Message::new(&first.message.date, first.user(), sentence))
            .collect())
    }
}

/// Merge chat fragments into sentences, or report why not.
///
/// Output order follows turn order, then emission order within a turn.
/// Every sentence carries the `date` and `user` of its turn's first
/// message.
///
/// # Errors
///
/// See [`SbdMerger::merge`].
pub fn sbd_merge_messages(messages: &[Message], config: &SbdConfig) -> Result<Vec<Message>> {
    SbdMerger::new(*config).merge(messages).map(|(merged, _)| merged)
}

/// Merge chat fragments into sentences, best effort.
///
/// Uses the default configuration when `config` is `None`. Never fails:
/// on error the input is returned unchanged and a warning is logged.
///
/// ```rust
/// use chatmerge::process_sbd_merge;
///
/// assert!(process_sbd_merge(Vec::new(), None).is_empty());
/// ```
#[must_use]
pub fn process_sbd_merge(messages: Vec<Message>, config: Option<&SbdConfig>) -> Vec<Message> {
    SbdMerger::new(config.copied().unwrap_or_default()).merge_or_passthrough(messages)
}

/// Merge loosely-typed records, best effort.
///
/// This is the boundary an ETL step feeds: each record should be an object
/// with string `date`, `user` and `message` fields (missing fields read as
/// empty). If any record has another shape, the whole batch is returned
/// unchanged. Merged records carry only the three fields.
///
/// ```rust
/// use chatmerge::process_sbd_merge_records;
/// use serde_json::json;
///
/// let records = vec![
///     json!({"date": "2024-05-01 21:00:00", "user": "a", "message": "안녕"}),
///     json!({"date": "2024-05-01 21:00:05", "user": "a", "message": "밥 먹었어"}),
/// ];
/// let merged = process_sbd_merge_records(records, None);
/// assert_eq!(merged[0]["message"], "안녕, 밥 먹었어");
///
/// // A record that is not a message leaves the batch untouched.
/// let bad = vec![json!({"user": "a", "message": "안녕"}), json!(42)];
/// assert_eq!(process_sbd_merge_records(bad.clone(), None), bad);
/// ```
#[must_use]
pub fn process_sbd_merge_records(records: Vec<Value>, config: Option<&SbdConfig>) -> Vec<Value> {
    let merger = SbdMerger::new(config.copied().unwrap_or_default());
    info!(records = records.len(), "sentence merge started");

    match merge_records(&merger, &records) {
        Ok((merged, stats)) => {
            info!(%stats, "sentence merge finished");
            merged
        }
        Err(e) => {
            warn!(error = %e, "sentence merge failed, keeping original records");
            records
        }
    }
}

fn merge_records(merger: &SbdMerger, records: &[Value]) -> Result<(Vec<Value>, MergeStats)> {
    let messages = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            Message::deserialize(record).map_err(|source| Error::Record { index, source })
        })
        .collect::<Result<Vec<_>>>()?;

    let (merged, stats) = merger.merge(&messages)?;
    let merged = merged
        .into_iter()
        .map(|m| json!({"date": m.date, "user": m.user, "message": m.message}))
        .collect();

    Ok((merged, stats))
}
