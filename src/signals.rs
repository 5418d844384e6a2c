//! Text signals used to score a boundary between two chat fragments.
//!
//! Each detector answers one question about the *end* of the text before a
//! boundary or the *start* of the text after it:
//!
//! ```text
//! "오늘 집에 갔어." | "근데 비가 왔어"
//!               ^     ^^
//!   strong punctuation  connective adverb
//!   (sentence is done)  (but the thought continues)
//! ```
//!
//! The pattern sets are hand-picked for Korean chat. They are deliberately
//! shallow: a suffix match, not morphological analysis. A word like
//! "학교에서" fires both the continuative-ending detector ("서") and the
//! bare-particle detector ("에서"); the scorer adds both weights.
//!
//! ## Pattern Sets
//!
//! | Detector | Matches |
//! |----------|---------|
//! | strong punctuation | `.` `?` `!` at the end |
//! | ellipsis / tilde | `…`, `...`+, `~~`+ at the end |
//! | laughter | runs of `ㅋ` / `ㅎ` at the end |
//! | terminal eomi | `다`, `요`, `죠`, `습니다`, `했어`, `구나`, ... |
//! | continuative eomi | `는데`, `고`, `서`, `면서`, `지만`, `니까`, ... |
//! | bare particle | `은/는`, `이/가`, `을/를`, `에서`, `으로`, `까지`, ... |
//! | connective adverb | `그리고`, `근데`, `그래서`, `하지만`, ... at the start |
//! | backchannel | whole text is `응`, `ㅇㅇ`, `ㅋㅋ`, `네`, `헐`, ... |

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

/// Texts longer than this (in characters, after trimming) are never
/// backchannels.
pub const BACKCHANNEL_MAX_CHARS: usize = 6;

/// Short acknowledgement tokens, matched against the whole stripped text.
pub const BACKCHANNEL_TOKENS: &str =
    r"웅|응|엉|어|아|오|헉|헐|앗|와|ㅋ+|ㅎ+|ㅠ+|ㅜ+|ㅇㅇ|ㅇㅋ|넵+|네+";

/// Sentence-final verb and adjective endings.
pub const TERMINAL_EOMI: &[&str] = &[
    "다", "요", "죠", "네", "네요", "습니다", "습니까", "했어", "했네", "겠네", "랬어", "랐어",
    "군요", "구나", "구요", "같아", "같네요",
];

/// Connective endings that leave the clause open.
pub const CONTINUATIVE_EOMI: &[&str] = &[
    "는데", "고", "서", "면서", "다가", "더니", "자", "며", "지만", "라고", "니까", "다니",
    "든지", "거나", "려니",
];

/// Grammatical particles that leave a phrase incomplete when nothing follows.
pub const BARE_PARTICLES: &[&str] = &[
    "은", "는", "이", "가", "을", "를", "에", "에서", "으로", "로", "와", "과", "랑", "하고",
    "보다", "처럼", "까지", "부터", "밖에", "에게", "께", "께서", "의",
];

/// Sentence-initial adverbs that carry the previous thought forward.
pub const CONNECTIVE_ADVERBS: &[&str] = &[
    "그리고", "근데", "그래서", "그런데", "그때", "그다음", "또", "게다가", "하지만", "그러다가",
    "그러면", "그러니까",
];

fn alternation(words: &[&str]) -> String {
    words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|")
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid built-in pattern {pattern:?}: {e}"))
}

static BACKCHANNEL_RE: Lazy<Regex> = Lazy::new(|| compile(&format!("^(?:{BACKCHANNEL_TOKENS})$")));

// Punctuation, symbols, whitespace, plus the invisible emoji glue.
static STRIP_RE: Lazy<Regex> = Lazy::new(|| compile(r"[\p{P}\p{S}\s\x{FE0E}\x{FE0F}\x{200D}]+"));

static END_PUNCT_RE: Lazy<Regex> = Lazy::new(|| compile(r"[.?!]+$"));
static ELLIPSIS_RE: Lazy<Regex> = Lazy::new(|| compile(r"(?:…|\.{3,}|~{2,})$"));
static LAUGHTER_RE: Lazy<Regex> = Lazy::new(|| compile(r"[ㅋㅎ]+$"));

static TERMINAL_EOMI_RE: Lazy<Regex> =
    Lazy::new(|| compile(&format!("(?:{})$", alternation(TERMINAL_EOMI))));
static CONTINUATIVE_EOMI_RE: Lazy<Regex> =
    Lazy::new(|| compile(&format!("(?:{})$", alternation(CONTINUATIVE_EOMI))));
static BARE_PARTICLE_RE: Lazy<Regex> =
    Lazy::new(|| compile(&format!("(?:{})$", alternation(BARE_PARTICLES))));
static CONNECTIVE_RE: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"^(?:{})\b", alternation(CONNECTIVE_ADVERBS))));

static PICTOGRAPH_RE: Lazy<Regex> = Lazy::new(|| compile(r"^\p{Extended_Pictographic}"));

/// Whether `text` is a short acknowledgement ("응", "ㅇㅇ", "ㅋㅋㅋ", "네!").
///
/// Punctuation, symbols, whitespace, variation selectors and zero-width
/// joiners are stripped before matching, but the length cap applies to the
/// trimmed original, so "응 그래 알았어" is never a backchannel.
///
/// ```rust
/// use chatmerge::signals::is_backchannel;
///
/// assert!(is_backchannel("ㅇㅇ"));
/// assert!(is_backchannel(" 네!! "));
/// assert!(!is_backchannel("응 그래 알았어"));
/// ```
#[must_use]
pub fn is_backchannel(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed.chars().count() > BACKCHANNEL_MAX_CHARS {
        return false;
    }
    let residue = STRIP_RE.replace_all(trimmed, "");
    BACKCHANNEL_RE.is_match(&residue)
}

/// Ends with `.`, `?` or `!`.
#[must_use]
pub fn ends_with_strong_punctuation(text: &str) -> bool {
    END_PUNCT_RE.is_match(text)
}

/// Ends with `…`, three or more dots, or two or more tildes.
#[must_use]
pub fn ends_with_ellipsis_or_tilde(text: &str) -> bool {
    ELLIPSIS_RE.is_match(text)
}

/// Ends with a run of `ㅋ` or `ㅎ`.
#[must_use]
pub fn ends_with_laughter(text: &str) -> bool {
    LAUGHTER_RE.is_match(text)
}

/// Ends with a sentence-final ending from [`TERMINAL_EOMI`].
#[must_use]
pub fn ends_with_terminal_eomi(text: &str) -> bool {
    TERMINAL_EOMI_RE.is_match(text)
}

/// Ends with a connective ending from [`CONTINUATIVE_EOMI`].
#[must_use]
pub fn ends_with_continuative_eomi(text: &str) -> bool {
    CONTINUATIVE_EOMI_RE.is_match(text)
}

/// Ends with a particle from [`BARE_PARTICLES`].
#[must_use]
pub fn ends_with_bare_particle(text: &str) -> bool {
    BARE_PARTICLE_RE.is_match(text)
}

/// Starts with a whole-word adverb from [`CONNECTIVE_ADVERBS`].
///
/// "또" matches, "또한" does not.
#[must_use]
pub fn starts_with_connective_adverb(text: &str) -> bool {
    CONNECTIVE_RE.is_match(text)
}

/// Remove emoji from `text` and trim the result.
///
/// Works on grapheme clusters, so a ZWJ family, a skin-toned
/// variant or a pictograph with a variation selector goes as one unit.
///
/// ```rust
/// use chatmerge::signals::strip_emojis;
///
/// assert_eq!(strip_emojis("좋아 👍🏻"), "좋아");
/// assert_eq!(strip_emojis("👨‍👩‍👧 가족여행 ❤️"), "가족여행");
/// ```
#[must_use]
pub fn strip_emojis(text: &str) -> String {
    text.graphemes(true)
        .filter(|g| !PICTOGRAPH_RE.is_match(g))
        .collect::<String>()
        .trim()
        .to_string()
}
