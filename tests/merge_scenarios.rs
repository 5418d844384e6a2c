//! End-to-end scenarios for chat sentence merging.
//!
//! Each test feeds a small chat log through the public entry points and
//! checks the merged sentences against the default-weight arithmetic.

use serde_json::json;

use chatmerge::{
    process_sbd_merge, process_sbd_merge_records, sbd_merge_messages, strip_emojis, Message,
    SbdConfig, SbdMerger,
};

fn at(secs: u32) -> String {
    format!("2024-05-01 21:{:02}:{:02}", secs / 60, secs % 60)
}

fn log(rows: &[(u32, &str, &str)]) -> Vec<Message> {
    rows.iter()
        .map(|&(secs, user, text)| Message::new(at(secs), user, text))
        .collect()
}

fn texts(messages: &[Message]) -> Vec<&str> {
    messages.iter().map(|m| m.message.as_str()).collect()
}

// =============================================================================
// Cut / merge decisions
// =============================================================================

#[test]
fn fragments_merge_into_question() {
    let merged = process_sbd_merge(
        log(&[(0, "a", "안녕"), (5, "a", "밥 먹었어"), (8, "a", "?")]),
        None,
    );
    assert_eq!(texts(&merged), ["안녕, 밥 먹었어?"]);
    assert_eq!(merged[0].date, at(0));
}

#[test]
fn strong_punctuation_cuts() {
    let merged = process_sbd_merge(
        log(&[(0, "a", "오늘 집에 갔어."), (3, "a", "비가 왔어")]),
        None,
    );
    assert_eq!(texts(&merged), ["오늘 집에 갔어.", "비가 왔어"]);
}

#[test]
fn connective_opener_outvotes_punctuation() {
    // "." is +2, "근데" is -1: score 1 stays below theta 2.
    let merged = process_sbd_merge(
        log(&[(0, "a", "오늘 집에 갔어."), (3, "a", "근데 비가 왔어")]),
        None,
    );
    assert_eq!(texts(&merged), ["오늘 집에 갔어. 근데 비가 왔어"]);
}

#[test]
fn backchannel_suppresses_cut() {
    // "했어" is +2, backchannel "오" is -1: merged.
    let merged = process_sbd_merge(
        log(&[(0, "a", "나 숙제 다 했어"), (2, "a", "오"), (4, "a", "잘했네")]),
        None,
    );
    assert_eq!(texts(&merged), ["나 숙제 다 했어, 오, 잘했네"]);
}

#[test]
fn long_gap_does_not_override_continuative() {
    // "는데" is -2, 40s > 25s is +1: net -1, merged.
    let merged = process_sbd_merge(
        log(&[(0, "a", "학교 갔는데"), (40, "a", "비가 왔어")]),
        None,
    );
    assert_eq!(texts(&merged), ["학교 갔는데, 비가 왔어"]);
}

#[test]
fn long_gap_tips_laughter_over_threshold() {
    // "ㅋㅋ" is +1 alone; with a 30s pause it reaches 2.
    let short = process_sbd_merge(log(&[(0, "a", "웃기다ㅋㅋ"), (5, "a", "진짜로")]), None);
    assert_eq!(texts(&short), ["웃기다ㅋㅋ, 진짜로"]);

    let long = process_sbd_merge(log(&[(0, "a", "웃기다ㅋㅋ"), (30, "a", "진짜로")]), None);
    assert_eq!(texts(&long), ["웃기다ㅋㅋ", "진짜로"]);
}

#[test]
fn every_sentence_carries_turn_start() {
    let merged = process_sbd_merge(
        log(&[(0, "a", "밥 먹었다"), (10, "a", "이제 잘래."), (20, "a", "내일 봐")]),
        None,
    );
    assert_eq!(texts(&merged), ["밥 먹었다", "이제 잘래.", "내일 봐"]);
    assert!(merged.iter().all(|m| m.date == at(0) && m.user == "a"));
}

// =============================================================================
// Turns
// =============================================================================

#[test]
fn speakers_never_share_a_sentence() {
    let merged = process_sbd_merge(
        log(&[
            (0, "a", "뭐해"),
            (2, "b", "그냥"),
            (3, "b", "누워있어"),
            (5, "a", "나도"),
        ]),
        None,
    );
    let rows: Vec<(&str, &str)> = merged
        .iter()
        .map(|m| (m.user.as_str(), m.message.as_str()))
        .collect();
    assert_eq!(rows, [("a", "뭐해"), ("b", "그냥, 누워있어"), ("a", "나도")]);
}

#[test]
fn window_splits_same_speaker() {
    let merged = process_sbd_merge(log(&[(0, "a", "안녕"), (61, "a", "뭐해")]), None);
    assert_eq!(texts(&merged), ["안녕", "뭐해"]);
    assert_eq!(merged[1].date, at(61));
}

#[test]
fn input_order_does_not_matter() {
    let ordered = log(&[(0, "a", "안녕"), (5, "a", "밥 먹었어"), (8, "a", "?")]);
    let mut reversed = ordered.clone();
    reversed.reverse();
    assert_eq!(
        process_sbd_merge(reversed, None),
        process_sbd_merge(ordered, None)
    );
}

#[test]
fn unparseable_dates_are_kept_alone_and_first() {
    let mut messages = log(&[(0, "a", "안녕"), (5, "a", "뭐해")]);
    messages.push(Message::new("어제", "a", "잘 자"));
    messages.push(Message::new("", "a", "좋은 꿈"));

    let merged = process_sbd_merge(messages, None);
    assert_eq!(texts(&merged), ["잘 자", "좋은 꿈", "안녕, 뭐해"]);
    assert_eq!(merged[0].date, "어제");
}

#[test]
fn offset_dates_align_with_naive_utc() {
    let messages = vec![
        Message::new("2024-05-01T21:00:00+09:00", "a", "안녕"),
        Message::new("2024-05-01T12:00:05Z", "a", "뭐해"),
    ];
    let merged = process_sbd_merge(messages, None);
    assert_eq!(texts(&merged), ["안녕, 뭐해"]);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn higher_theta_merges_more() {
    let messages = log(&[(0, "a", "오늘 집에 갔어."), (3, "a", "비가 왔어")]);
    let cfg = SbdConfig::default().with_theta(3);
    assert_eq!(
        texts(&process_sbd_merge(messages, Some(&cfg))),
        ["오늘 집에 갔어. 비가 왔어"]
    );
}

#[test]
fn json_config_drives_merger() {
    let cfg = SbdConfig::from_json(r#"{"w_next_connective": 0}"#).unwrap();
    let merger = SbdMerger::new(cfg);
    let merged = merger.merge_or_passthrough(log(&[
        (0, "a", "오늘 집에 갔어."),
        (3, "a", "근데 비가 왔어"),
    ]));
    assert_eq!(texts(&merged), ["오늘 집에 갔어.", "근데 비가 왔어"]);
    assert_eq!(merger.config().w_next_connective, 0);
}

#[test]
fn speaker_change_weight_is_inert_within_turns() {
    let messages = log(&[(0, "a", "안녕"), (5, "a", "뭐해")]);
    let cfg = SbdConfig {
        w_speaker_change: 100,
        ..SbdConfig::default()
    };
    assert_eq!(
        sbd_merge_messages(&messages, &cfg).unwrap(),
        sbd_merge_messages(&messages, &SbdConfig::default()).unwrap()
    );
}

// =============================================================================
// Fallback and records
// =============================================================================

#[test]
fn empty_input_is_empty_output() {
    assert!(process_sbd_merge(Vec::new(), None).is_empty());
    assert!(process_sbd_merge_records(Vec::new(), None).is_empty());
}

#[test]
fn records_merge_like_messages() {
    let records = vec![
        json!({"date": at(0), "user": "a", "message": "안녕"}),
        json!({"date": at(5), "user": "a", "message": "밥 먹었어"}),
        json!({"date": at(8), "user": "a", "message": "?"}),
    ];
    let merged = process_sbd_merge_records(records, None);
    assert_eq!(
        merged,
        [json!({"date": at(0), "user": "a", "message": "안녕, 밥 먹었어?"})]
    );
}

#[test]
fn records_with_missing_fields_still_merge() {
    let records = vec![json!({"message": "안녕"}), json!({"user": "a"})];
    let merged = process_sbd_merge_records(records, None);
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0]["message"], "안녕");
}

#[test]
fn malformed_records_fall_back_unchanged() {
    let records = vec![
        json!({"date": at(0), "user": "a", "message": "안녕"}),
        json!({"date": at(5), "user": "a", "message": ["not", "text"]}),
        json!({"date": at(8), "user": "a", "message": "?"}),
    ];
    assert_eq!(process_sbd_merge_records(records.clone(), None), records);

    let records = vec![json!(null), json!({"message": "안녕"})];
    assert_eq!(process_sbd_merge_records(records.clone(), None), records);
}

// =============================================================================
// Preprocessing helper
// =============================================================================

#[test]
fn emoji_stripped_backchannel_still_merges() {
    let raw = ["나 숙제 다 했어", "오 👏🏻"];
    let messages: Vec<Message> = raw
        .iter()
        .enumerate()
        .map(|(i, t)| Message::new(at(i as u32 * 2), "a", strip_emojis(t)))
        .collect();
    assert_eq!(
        texts(&process_sbd_merge(messages, None)),
        ["나 숙제 다 했어, 오"]
    );
}
