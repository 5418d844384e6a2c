//! Merge configuration.
//!
//! ## Two Windows
//!
//! Two time thresholds play different roles and are easy to confuse:
//!
//! - `t_merge_seconds` (60s): how far apart two same-speaker messages may be
//!   and still belong to the same *turn*. Crossing it always splits.
//! - `t_gap_seconds` (25s): inside a turn, a pause longer than this is one
//!   more vote for a sentence boundary. It only nudges the score.
//!
//! ```text
//! 0s "오늘 뭐해"   ─┐
//! 30s "나는 집"     │ same turn (gap 30 ≤ 60), long-gap vote (+1, 30 > 25)
//! 100s "심심하다"  ─┘ new turn (gap 70 > 60)
//! ```
//!
//! ## Weights
//!
//! Boundary signals vote with integer weights. Ending signals are positive,
//! continuation signals negative. A boundary whose summed score reaches
//! `theta` is cut; anything lower is merged. Raising `theta` biases towards
//! longer merged sentences.
//!
//! The defaults reproduce the behaviour existing chat exports were
//! processed with; changing them changes output.

use serde::{Deserialize, Serialize};

use crate::Result;

/// Configuration for turn grouping and boundary scoring.
///
/// Built once per run and read-only afterwards.
///
/// # Examples
///
/// ```rust
/// use chatmerge::SbdConfig;
///
/// let cfg = SbdConfig::default();
/// assert_eq!(cfg.t_merge_seconds, 60);
/// assert_eq!(cfg.theta, 2);
///
/// // Bias towards merging.
/// let cfg = SbdConfig::default().with_theta(3);
/// assert_eq!(cfg.theta, 3);
///
/// // Partial JSON overrides only what it names.
/// let cfg = SbdConfig::from_json(r#"{"t_gap_seconds": 10}"#).unwrap();
/// assert_eq!(cfg.t_gap_seconds, 10);
/// assert_eq!(cfg.t_merge_seconds, 60);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SbdConfig {
    /// Same-speaker turn window.
    pub t_merge_seconds: u64,
    /// Pause above which a boundary gets the long-gap vote.
    pub t_gap_seconds: u64,

    /// Previous fragment ends with `.`, `?` or `!`.
    pub w_end_punct: i32,
    /// Previous fragment ends with a terminal eomi.
    pub w_end_eomi: i32,
    /// Previous fragment ends with laughter.
    pub w_laughter_end: i32,
    /// Previous fragment ends with an ellipsis or tilde run.
    pub w_ellipsis_end: i32,
    /// Pause longer than `t_gap_seconds`.
    pub w_long_gap: i32,
    /// Speaker changed across the boundary. Turns are single-speaker, so the
    /// merger never sets this; kept for configuration compatibility.
    pub w_speaker_change: i32,

    /// Previous fragment ends with a continuative eomi.
    pub w_cont_eomi: i32,
    /// Previous fragment ends with a bare particle.
    pub w_particle_end: i32,
    /// Next fragment starts with a connective adverb.
    pub w_next_connective: i32,
    /// Next fragment is a backchannel.
    pub w_next_backchannel: i32,

    /// Cut threshold: `score >= theta` splits.
    pub theta: i32,
}

impl SbdConfig {
    /// Load a configuration from JSON, filling unnamed fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] if the JSON is malformed or a field
    /// has the wrong type (e.g. a negative window).
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the same-speaker turn window.
    #[must_use]
    pub const fn with_merge_window(self, seconds: u64) -> Self {
        Self {
            t_merge_seconds: seconds,
            ..self
        }
    }

    /// Set the long-gap threshold.
    #[must_use]
    pub const fn with_gap_threshold(self, seconds: u64) -> Self {
        Self {
            t_gap_seconds: seconds,
            ..self
        }
    }

    /// Set the cut threshold.
    #[must_use]
    pub const fn with_theta(self, theta: i32) -> Self {
        Self { theta, ..self }
    }

    /// Whether `elapsed` seconds counts as a long pause.
    #[must_use]
    pub fn is_long_gap(&self, elapsed: f64) -> bool {
        elapsed > self.t_gap_seconds as f64
    }

    /// Whether two same-speaker messages `elapsed` seconds apart share a turn.
    #[must_use]
    pub fn within_merge_window(&self, elapsed: f64) -> bool {
        elapsed <= self.t_merge_seconds as f64
    }
}

impl Default for SbdConfig {
    fn default() -> Self {
        Self {
            t_merge_seconds: 60,
            t_gap_seconds: 25,

            w_end_punct: 2,
            w_end_eomi: 2,
            w_laughter_end: 1,
            w_ellipsis_end: 1,
            w_long_gap: 1,
            w_speaker_change: 1,

            w_cont_eomi: -2,
            w_particle_end: -2,
            w_next_connective: -1,
            w_next_backchannel: -1,

            theta: 2,
        }
    }
}
