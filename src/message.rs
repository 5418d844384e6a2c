//! Message types: the raw chat record and its annotated form.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single chat message as exported from a chat log.
///
/// The same three-field shape is used for input and output: merged
/// sentences are `Message`s whose `message` is one or more original
/// fragments joined together.
///
/// ```rust
/// use chatmerge::Message;
///
/// let msg = Message::new("2024-05-01 21:03:00", "민지", "밥 먹었어?");
/// assert_eq!(msg.user, "민지");
/// ```
///
/// Missing keys decode as empty strings, so a record without a `date`
/// still takes part in merging (it sorts first and opens its own turn):
///
/// ```rust
/// use chatmerge::Message;
///
/// let msg: Message = serde_json::from_str(r#"{"user": "a", "message": "hi"}"#).unwrap();
/// assert!(msg.date.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// ISO-8601-like timestamp string, kept verbatim.
    #[serde(default)]
    pub date: String,
    /// Speaker identifier.
    #[serde(default)]
    pub user: String,
    /// Message text.
    #[serde(default)]
    pub message: String,
}

impl Message {
    /// Create a new message.
    #[must_use]
    pub fn new(date: impl Into<String>, user: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            user: user.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.date, self.user, self.message)
    }
}

/// A message after turn grouping.
///
/// `turn_id` is non-decreasing along the time-sorted sequence. The
/// backchannel flag is informational: the merger re-checks the *next*
/// fragment's text instead of reading this field.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedMessage {
    /// The original record.
    pub message: Message,
    /// Parsed `date`, or `None` when it did not parse.
    pub timestamp: Option<NaiveDateTime>,
    /// Index of the turn this message belongs to.
    pub turn_id: usize,
    /// Whether the text is a short acknowledgement such as "ㅇㅇ" or "네".
    pub is_backchannel: bool,
}

impl AnnotatedMessage {
    /// The speaker of this message.
    #[must_use]
    pub fn user(&self) -> &str {
        &self.message.user
    }

    /// The message text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.message.message
    }
}

/// A maximal run of same-speaker messages within the merge window.
///
/// Borrows a contiguous slice of the annotated sequence; every message in
/// it shares `id` as its `turn_id`.
#[derive(Debug, Clone, Copy)]
pub struct Turn<'a> {
    /// The shared turn id.
    pub id: usize,
    /// Messages of the turn, in time order.
    pub messages: &'a [AnnotatedMessage],
}

impl<'a> Turn<'a> {
    /// The first message of the turn, whose `date` and `user` label every
    /// sentence the turn produces.
    #[must_use]
    pub fn first(&self) -> Option<&'a AnnotatedMessage> {
        self.messages.first()
    }

    /// The speaker of the turn.
    #[must_use]
    pub fn speaker(&self) -> Option<&'a str> {
        self.first().map(AnnotatedMessage::user)
    }

    /// Number of messages in the turn.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the turn is empty. Turns built by the grouper never are.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl std::fmt::Display for Turn<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Turn {{ id: {}, speaker: {}, messages: {} }}",
            self.id,
            self.speaker().unwrap_or("<none>"),
            self.len()
        )
    }
}
