//! # chatmerge
//!
//! Sentence boundary detection for chat logs.
//!
//! ## The Problem
//!
//! People don't type sentences in chat. They type fragments, each sent as its
//! own message, seconds apart:
//!
//! ```text
//! 21:00:00 민지  안녕
//! 21:00:05 민지  밥 먹었어
//! 21:00:08 민지  ?
//! ```
//!
//! Downstream consumers (analytics, retrieval, persona building) want
//! "안녕, 밥 먹었어?" as one unit. But blindly gluing every burst together
//! is wrong too: "오늘 집에 갔어." and "비가 왔어" are two sentences even
//! when typed three seconds apart.
//!
//! ## Two Stages
//!
//! ### Turn Grouping
//!
//! Partition the time-sorted log into *turns*: maximal runs where the same
//! speaker keeps typing with no gap longer than `t_merge_seconds`. Sentences
//! never cross a turn.
//!
//! ### Intra-Turn Merging
//!
//! Walk each turn, scoring every boundary between the text so far and the
//! next fragment. Signals that say "the sentence ended here" vote up,
//! signals that say "it continues" vote down:
//!
//! ```text
//! ending (+)                      continuing (-)
//! ─────────────────────────────   ─────────────────────────────
//! . ? !               +2          continuative ending  -고 -는데  -2
//! terminal ending -다 -요  +2     bare particle  -을 -에서        -2
//! ㅋㅋ / ㅎㅎ           +1          next opens with 근데, 그래서   -1
//! … / ~~              +1          next is a backchannel (ㅇㅇ)   -1
//! pause > 25s         +1
//! ```
//!
//! A score at or above `theta` (2) cuts; anything lower merges.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatmerge::{process_sbd_merge, Message};
//!
//! let log = vec![
//!     Message::new("2024-05-01 21:00:00", "민지", "안녕"),
//!     Message::new("2024-05-01 21:00:05", "민지", "밥 먹었어"),
//!     Message::new("2024-05-01 21:00:08", "민지", "?"),
//!     Message::new("2024-05-01 21:00:20", "준호", "아니 아직"),
//! ];
//!
//! let merged = process_sbd_merge(log, None);
//! assert_eq!(merged[0].message, "안녕, 밥 먹었어?");
//! assert_eq!(merged[1].message, "아니 아직");
//! ```
//!
//! ## Failure Policy
//!
//! [`process_sbd_merge`] and [`process_sbd_merge_records`] never fail. If
//! anything goes wrong they log a warning and return the input unchanged:
//! merged sentences are an enrichment, and an ETL run should not die over
//! them. Use [`sbd_merge_messages`] or [`SbdMerger::merge`] to see errors.
//!
//! Unparseable dates are not errors. Such messages sort first and each opens
//! its own turn.
//!
//! ## Logging
//!
//! Progress and fallbacks are reported through `tracing`. The library does
//! not install a subscriber.

mod config;
mod error;
mod merge;
mod message;
mod pipeline;
mod score;
pub mod signals;
mod timestamp;
mod turn;

pub use config::SbdConfig;
pub use error::{Error, Result};
pub use merge::{join_separator, merge_within_turn};
pub use message::{AnnotatedMessage, Message, Turn};
pub use pipeline::{
    process_sbd_merge, process_sbd_merge_records, sbd_merge_messages, MergeStats, SbdMerger,
};
pub use score::{boundary_score, BoundarySignals};
pub use signals::{is_backchannel, strip_emojis};
pub use timestamp::{elapsed_seconds, parse_timestamp};
pub use turn::{group_turns, split_turns};
