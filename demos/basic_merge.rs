//! Basic Sentence Merging
//!
//! Rebuild sentences from a burst of chat fragments.
//!
//! ```bash
//! cargo run --example basic_merge
//! ```

use chatmerge::{boundary_score, process_sbd_merge, Message, SbdConfig};

fn main() {
    let log = vec![
        Message::new("2024-05-01 21:00:00", "민지", "안녕"),
        Message::new("2024-05-01 21:00:05", "민지", "밥 먹었어"),
        Message::new("2024-05-01 21:00:08", "민지", "?"),
        Message::new("2024-05-01 21:00:20", "준호", "아니 아직"),
        Message::new("2024-05-01 21:00:24", "준호", "오늘 집에 갔어."),
        Message::new("2024-05-01 21:00:27", "준호", "비가 왔어"),
        Message::new("2024-05-01 21:00:30", "민지", "헐"),
    ];

    println!("Fragments: {}", log.len());
    let merged = process_sbd_merge(log, None);
    println!("Sentences: {}\n", merged.len());

    for m in &merged {
        println!("{m}");
    }

    // Why "오늘 집에 갔어." was cut but would not be before "근데 ...":
    let cfg = SbdConfig::default();
    println!();
    for next in ["비가 왔어", "근데 비가 왔어"] {
        let score = boundary_score("오늘 집에 갔어.", next, Some(3.0), false, &cfg);
        let verdict = if score >= cfg.theta { "cut" } else { "merge" };
        println!("\"오늘 집에 갔어.\" | \"{next}\" -> score {score} ({verdict})");
    }
}
