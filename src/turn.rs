//! Speaker-time turn grouping.
//!
//! Chat users type in bursts. Before deciding where sentences end we
//! partition the log into *turns*: maximal runs where the same person keeps
//! typing without a long pause.
//!
//! ```text
//! 21:00:00 민지  안녕        turn 0
//! 21:00:05 민지  밥 먹었어    turn 0   same speaker, 5s
//! 21:00:08 준호  아직        turn 1   speaker changed
//! 21:02:30 준호  지금 먹으러   turn 2   same speaker, 142s > 60s
//! ```
//!
//! Messages whose date does not parse are kept, sorted first, and always
//! open a new turn: they are never merged on faith.

use tracing::debug;

use crate::message::{AnnotatedMessage, Message, Turn};
use crate::signals::is_backchannel;
use crate::timestamp::{elapsed_seconds, parse_timestamp};
use crate::SbdConfig;

/// Sort messages by time and assign turn ids.
///
/// The sort is stable, so messages with equal timestamps keep their input
/// order. The first message always gets turn 0.
///
/// ```rust
/// use chatmerge::{group_turns, Message, SbdConfig};
///
/// let messages = vec![
///     Message::new("2024-05-01 21:00:05", "민지", "밥 먹었어"),
///     Message::new("2024-05-01 21:00:00", "민지", "안녕"),
///     Message::new("2024-05-01 21:00:08", "준호", "아직"),
/// ];
/// let annotated = group_turns(&messages, &SbdConfig::default());
///
/// let ids: Vec<usize> = annotated.iter().map(|m| m.turn_id).collect();
/// assert_eq!(ids, [0, 0, 1]);
/// assert_eq!(annotated[0].text(), "안녕");
/// ```
#[must_use]
pub fn group_turns(messages: &[Message], config: &SbdConfig) -> Vec<AnnotatedMessage> {
    let mut annotated: Vec<AnnotatedMessage> = messages
        .iter()
        .map(|m| {
            let timestamp = parse_timestamp(&m.date);
            if timestamp.is_none() {
                debug!(date = %m.date, user = %m.user, "unparseable date, sorting first");
            }
            AnnotatedMessage {
                message: m.clone(),
                timestamp,
                turn_id: 0,
                is_backchannel: is_backchannel(&m.message),
            }
        })
        .collect();

    // `None < Some(_)`, so unparseable dates sort first.
    annotated.sort_by_key(|m| m.timestamp);

    let mut turn_id = 0;
    for i in 1..annotated.len() {
        let (prev, cur) = (&annotated[i - 1], &annotated[i]);
        let same_speaker = prev.user() == cur.user();
        let gap_ok = elapsed_seconds(prev.timestamp, cur.timestamp)
            .is_some_and(|gap| config.within_merge_window(gap));

        if !(same_speaker && gap_ok) {
            turn_id += 1;
        }
        annotated[i].turn_id = turn_id;
    }

    debug!(
        messages = annotated.len(),
        turns = annotated.last().map_or(0, |m| m.turn_id + 1),
        "grouped turns"
    );

    annotated
}

/// Split a grouped sequence into its turns, in ascending turn order.
///
/// Relies on turn ids being contiguous, which [`group_turns`] guarantees.
#[must_use]
pub fn split_turns(annotated: &[AnnotatedMessage]) -> Vec<Turn<'_>> {
    annotated
        .chunk_by(|a, b| a.turn_id == b.turn_id)
        .map(|messages| Turn {
            id: messages[0].turn_id,
            messages,
        })
        .collect()
}
