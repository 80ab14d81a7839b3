//! Integration tests: parse a realistic export file end to end.

use chatlens::prelude::*;
use chatlens::core::stats::{
    activity_heatmap, daily_timeline, emoji_counts, fetch_stats, monthly_timeline,
    most_busy_users, most_common_words, week_activity_map, word_corpus,
};
use std::fs;
use tempfile::TempDir;

const CHAT: &str = "\u{feff}Messages to this group are now secured with end-to-end encryption.\n\
12/31/23, 11:58 PM - Alice created group \"Road Trip\"\n\
12/31/23, 11:59 PM - Alice: Happy new year everyone! 🎉🎉\n\
1/1/24, 12:01 AM - Bob: Happy new year! 🎉\n\
1/1/24, 12:02 AM - Bob: Trip plan:\n\
day one: drive\n\
day two: hike\n\
1/1/24, 9:15 AM - Carol: <Media omitted>\n\
1/2/24, 6:45 PM - Alice: route is here https://maps.example.com/route\n\
1/2/24, 6:46 PM - Bob added Dave\n\
2/14/24, 8:00 PM - Dave: hike hike hike\n";

fn write_chat(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn parse_chat() -> Transcript {
    let dir = TempDir::new().unwrap();
    let path = write_chat(&dir, "chat.txt", CHAT);
    TranscriptParser::new().parse(&path).unwrap()
}

#[test]
fn test_parse_file_records() {
    let transcript = parse_chat();
    assert_eq!(transcript.len(), 8);
    assert!(transcript.skipped().is_empty());

    let records = transcript.records();
    assert_eq!(records[0].kind(), MessageKind::SystemNotification);
    assert_eq!(records[0].body(), "Alice created group \"Road Trip\"");
    assert_eq!(records[1].author(), Some("Alice"));
    assert_eq!(records[3].body(), "Trip plan:\nday one: drive\nday two: hike");
    assert_eq!(records[6].author_label(), chatlens::GROUP_NOTIFICATION);
}

#[test]
fn test_authors_and_reconstruct() {
    let transcript = parse_chat();
    assert_eq!(transcript.authors(), vec!["Alice", "Bob", "Carol", "Dave"]);

    let first_header = CHAT.find("12/31/23").unwrap();
    assert_eq!(transcript.reconstruct(), &CHAT[first_header..]);
}

#[test]
fn test_record_spans_cover_input() {
    let transcript = parse_chat();
    let records = transcript.records();
    for pair in records.windows(2) {
        assert_eq!(pair[0].span.end, pair[1].span.start);
    }
    assert_eq!(records.last().unwrap().span.end, CHAT.len());
    for record in records {
        assert_eq!(&CHAT[record.span.clone()], record.reconstruct());
    }
}

#[test]
fn test_stats_over_file() {
    let transcript = parse_chat();
    let records = transcript.records();
    let config = StatsConfig::new();

    let overall = fetch_stats(records, &Selection::Overall, &config);
    assert_eq!(overall.messages, 8);
    assert_eq!(overall.media, 1);
    assert_eq!(overall.links, 1);

    let bob = fetch_stats(records, &Selection::author("Bob"), &config);
    assert_eq!(bob.messages, 2);

    let months = monthly_timeline(records, &Selection::Overall);
    let labels: Vec<_> = months.iter().map(|m| m.label.as_str()).collect();
    assert_eq!(labels, vec!["December-2023", "January-2024", "February-2024"]);
    assert_eq!(months[1].messages, 5);

    assert_eq!(daily_timeline(records, &Selection::Overall).len(), 4);

    // 12/31/23 is a Sunday, 1/1/24 a Monday. Ties keep calendar order.
    let days = week_activity_map(records, &Selection::Overall);
    assert_eq!(
        days,
        vec![("Monday", 3), ("Tuesday", 2), ("Sunday", 2), ("Wednesday", 1)]
    );

    let heatmap = activity_heatmap(records, &Selection::Overall);
    assert_eq!(heatmap.get("Sunday", "23-00"), 2);
    assert_eq!(heatmap.get("Monday", "00-1"), 2);
}

#[test]
fn test_busy_users_over_file() {
    let transcript = parse_chat();
    let users = most_busy_users(transcript.records());
    let ranked: Vec<_> = users.iter().map(|u| (u.author.as_str(), u.messages)).collect();
    assert_eq!(ranked, vec![("Alice", 2), ("Bob", 2), ("Carol", 1), ("Dave", 1)]);
    assert!((users[0].percent - 25.0).abs() < f64::EPSILON);
    assert!((users[2].percent - 12.5).abs() < f64::EPSILON);
}

#[test]
fn test_words_and_emoji_over_file() {
    let transcript = parse_chat();
    let records = transcript.records();
    let config = StatsConfig::new();

    let words = most_common_words(records, &Selection::Overall, &config);
    assert_eq!(words[0], ("hike".to_string(), 4));
    assert!(words.iter().all(|(w, _)| w != "<media" && w != "added"));

    let corpus = word_corpus(records, &Selection::author("Dave"), &config);
    assert_eq!(corpus, "hike hike hike");

    let emojis = emoji_counts(records, &Selection::Overall);
    assert_eq!(emojis, vec![('🎉', 3)]);
}

#[test]
fn test_filter_then_report() {
    let transcript = parse_chat();
    let config = FilterConfig::new()
        .with_date_from("2024-01-01")
        .unwrap()
        .with_date_to("2024-01-31")
        .unwrap()
        .without_notifications();
    let records = apply_filters(transcript.into_records(), &config);
    assert_eq!(records.len(), 4);

    let report = Report::build(&records, Selection::Overall, &StatsConfig::new());
    assert_eq!(report.stats.messages, 4);
    assert_eq!(report.busiest_months, vec![("January", 4)]);
}

#[test]
fn test_custom_stopwords_file() {
    let dir = TempDir::new().unwrap();
    let stopwords = write_chat(&dir, "stop.txt", "hike\nHAPPY\n\n");
    let config = StatsConfig::new().with_stopwords_file(&stopwords).unwrap();

    let transcript = parse_chat();
    let words = most_common_words(transcript.records(), &Selection::Overall, &config);
    assert!(words.iter().all(|(w, _)| w != "hike" && w != "happy"));
    // Built-in list replaced, so function words come back.
    assert!(words.iter().any(|(w, _)| w == "is"));
}

#[test]
fn test_strict_file_with_bad_date() {
    let dir = TempDir::new().unwrap();
    let path = write_chat(
        &dir,
        "bad.txt",
        "1/2/24, 10:30 AM - Alice: ok\n13/45/24, 10:31 AM - Bob: broken\n",
    );

    let lenient = TranscriptParser::new().parse(&path).unwrap();
    assert_eq!(lenient.len(), 1);
    assert_eq!(lenient.skipped().len(), 1);
    assert_eq!(lenient.skipped()[0].header, "13/45/24, 10:31 AM - ");

    let err = TranscriptParser::with_config(TranscriptConfig::strict())
        .parse(&path)
        .unwrap_err();
    assert!(err.is_malformed_timestamp());
}

#[test]
fn test_missing_and_binary_files() {
    let dir = TempDir::new().unwrap();
    let err = TranscriptParser::new()
        .parse(&dir.path().join("missing.txt"))
        .unwrap_err();
    assert!(err.is_io());

    let path = dir.path().join("binary.txt");
    fs::write(&path, [0xff, 0xfe, 0x00, 0x31]).unwrap();
    let err = TranscriptParser::new().parse(&path).unwrap_err();
    assert!(err.is_utf8());
}

#[cfg(all(feature = "csv-output", feature = "json-output"))]
#[test]
fn test_export_round_trip_through_writers() {
    let transcript = parse_chat();
    let dir = TempDir::new().unwrap();

    for format in ExportFormat::all() {
        let path = dir.path().join(format!("records.{}", format.extension()));
        let path = path.to_str().unwrap();
        write_to_format(transcript.records(), path, *format, &OutputConfig::all()).unwrap();
        let content = fs::read_to_string(path).unwrap();
        assert!(
            content.contains("Trip plan:\nday one: drive")
                || content.contains("Trip plan:\\nday one: drive")
        );
    }
}
