//! Boundary scoring.
//!
//! A boundary sits between the text accumulated so far and the next
//! fragment. Every signal that fires adds its weight; the sum is compared
//! against `theta` by the merger.
//!
//! ```text
//! "나 숙제 다 했어" | "오"
//!   terminal eomi  +2
//!   next backchannel -1
//!   ─────────────────
//!   score 1 < theta 2  → merge
//! ```
//!
//! Signals are independent: one text can fire several at once, and the
//! weights are summed without clamping or normalisation.

use crate::signals::{
    ends_with_bare_particle, ends_with_continuative_eomi, ends_with_ellipsis_or_tilde,
    ends_with_laughter, ends_with_strong_punctuation, ends_with_terminal_eomi, is_backchannel,
    starts_with_connective_adverb,
};
use crate::SbdConfig;

/// Which signals fired at a boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundarySignals {
    /// Previous ends with `.`, `?` or `!`.
    pub end_punct: bool,
    /// Previous ends with a terminal eomi.
    pub end_eomi: bool,
    /// Previous ends with laughter.
    pub laughter_end: bool,
    /// Previous ends with an ellipsis or tilde run.
    pub ellipsis_end: bool,
    /// Pause exceeded the long-gap threshold.
    pub long_gap: bool,
    /// Speaker changed across the boundary.
    pub speaker_change: bool,
    /// Previous ends with a continuative eomi.
    pub cont_eomi: bool,
    /// Previous ends with a bare particle.
    pub particle_end: bool,
    /// Next starts with a connective adverb.
    pub next_connective: bool,
    /// Next is a backchannel.
    pub next_backchannel: bool,
}

impl BoundarySignals {
    /// Detect the signals at the boundary between `prev` and `next`.
    ///
    /// Both texts are trimmed first. `elapsed` is `None` when either
    /// timestamp is unknown, in which case the long-gap signal cannot fire.
    #[must_use]
    pub fn detect(
        prev: &str,
        next: &str,
        elapsed: Option<f64>,
        speaker_changed: bool,
        config: &SbdConfig,
    ) -> Self {
        let prev = prev.trim();
        let next = next.trim();

        Self {
            end_punct: ends_with_strong_punctuation(prev),
            end_eomi: ends_with_terminal_eomi(prev),
            laughter_end: ends_with_laughter(prev),
            ellipsis_end: ends_with_ellipsis_or_tilde(prev),
            long_gap: elapsed.is_some_and(|e| config.is_long_gap(e)),
            speaker_change: speaker_changed,
            cont_eomi: ends_with_continuative_eomi(prev),
            particle_end: ends_with_bare_particle(prev),
            next_connective: starts_with_connective_adverb(next),
            next_backchannel: is_backchannel(next),
        }
    }

    /// Sum the weights of the signals that fired.
    #[must_use]
    pub fn score(&self, config: &SbdConfig) -> i32 {
        [
            (self.end_punct, config.w_end_punct),
            (self.end_eomi, config.w_end_eomi),
            (self.laughter_end, config.w_laughter_end),
            (self.ellipsis_end, config.w_ellipsis_end),
            (self.long_gap, config.w_long_gap),
            (self.speaker_change, config.w_speaker_change),
            (self.cont_eomi, config.w_cont_eomi),
            (self.particle_end, config.w_particle_end),
            (self.next_connective, config.w_next_connective),
            (self.next_backchannel, config.w_next_backchannel),
        ]
        .into_iter()
        .filter_map(|(fired, weight)| fired.then_some(weight))
        .sum()
    }
}

/// Score the boundary between `prev` and `next`.
///
/// Pure function of its inputs. `speaker_changed` is part of the signature
/// for completeness, but turns are single-speaker so the merger always
/// passes `false`.
///
/// ```rust
/// use chatmerge::{boundary_score, SbdConfig};
///
/// let cfg = SbdConfig::default();
/// // Strong punctuation (+2) against a connective opener (-1).
/// assert_eq!(boundary_score("오늘 집에 갔어.", "근데 비가 왔어", Some(3.0), false, &cfg), 1);
/// ```
#[must_use]
pub fn boundary_score(
    prev: &str,
    next: &str,
    elapsed: Option<f64>,
    speaker_changed: bool,
    config: &SbdConfig,
) -> i32 {
    BoundarySignals::detect(prev, next, elapsed, speaker_changed, config).score(config)
}
