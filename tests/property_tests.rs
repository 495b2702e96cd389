//! Property-based tests for fanlog using proptest

use chrono::{FixedOffset, TimeZone};
use fanlog::prelude::*;
use fanlog::render_template;
use fanlog::sinks::file::generated_file_name;
use proptest::prelude::*;
use std::path::Path;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::None),
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
    ]
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Level ordering follows the numeric rank
    #[test]
    fn test_log_level_ordering(a in any_level(), b in any_level()) {
        prop_assert_eq!(a < b, (a as u8) < (b as u8));
        prop_assert_eq!(a == b, (a as u8) == (b as u8));
    }

    /// Parsing the display name gives the level back, in any case
    #[test]
    fn test_log_level_str_roundtrip(level in any_level(), lower in any::<bool>()) {
        let name = if lower { level.to_str().to_lowercase() } else { level.to_str().to_string() };
        let parsed: LogLevel = name.parse().unwrap();
        prop_assert_eq!(level, parsed);
    }
}

// ============================================================================
// File Naming Tests
// ============================================================================

proptest! {
    /// The generated name depends only on name, rotation and timestamp
    #[test]
    fn test_file_name_is_pure(
        name in "[a-z][a-z0-9_-]{0,15}",
        offset_hours in -12i32..=12,
        secs in 0i64..4_102_444_800,
        hourly in any::<bool>(),
    ) {
        let tz = FixedOffset::east_opt(offset_hours * 3600).unwrap();
        let ts = tz.timestamp_opt(secs, 0).unwrap();
        let rotation = if hourly { RotationMode::Hourly } else { RotationMode::Daily };
        let dir = Path::new("/logs");

        let first = generated_file_name(dir, &name, rotation, &ts);
        let second = generated_file_name(dir, &name, rotation, &ts);
        prop_assert_eq!(&first, &second);

        let expected = if hourly {
            format!("{}.{}.log", name, ts.format("%Y-%m-%d-%H"))
        } else {
            format!("{}.{}.log", name, ts.format("%Y-%m-%d"))
        };
        prop_assert_eq!(first, dir.join(expected));
    }

    /// Entries in the same hour share a file, in both rotation modes
    #[test]
    fn test_same_hour_same_file(secs in 0i64..4_102_444_800, delta in 0i64..60) {
        let tz = FixedOffset::east_opt(0).unwrap();
        let hour_start = secs - secs.rem_euclid(3600);
        let a = tz.timestamp_opt(hour_start, 0).unwrap();
        let b = tz.timestamp_opt(hour_start + delta * 60, 0).unwrap();
        for rotation in [RotationMode::Daily, RotationMode::Hourly] {
            prop_assert_eq!(
                generated_file_name(Path::new("d"), "n", rotation, &a),
                generated_file_name(Path::new("d"), "n", rotation, &b)
            );
        }
    }
}

// ============================================================================
// Template Tests
// ============================================================================

proptest! {
    /// Sequential placeholders are replaced in order
    #[test]
    fn test_sequential_placeholders(args in prop::collection::vec("[a-z0-9 ]{0,8}", 0..6)) {
        let template = vec!["{}"; args.len()].join("|");
        prop_assert_eq!(render_template(&template, &args), args.join("|"));
    }

    /// Text without braces passes through unchanged whatever the arguments
    #[test]
    fn test_plain_text_unchanged(
        text in "[^{}]{0,40}",
        args in prop::collection::vec(".{0,8}", 0..4),
    ) {
        prop_assert_eq!(render_template(&text, &args), text);
    }

    /// Placeholders past the end of the arguments stay verbatim
    #[test]
    fn test_missing_arguments_kept(n in 0usize..4) {
        let args: Vec<String> = (0..n).map(|i| i.to_string()).collect();
        let template = format!("{}{{{}}}", "{}".repeat(n), n);
        let expected = format!("{}{{{}}}", args.concat(), n);
        prop_assert_eq!(render_template(&template, &args), expected);
    }

    /// The JSON formatter emits one valid object per line
    #[test]
    fn test_json_formatter_is_valid_json(level in any_level(), message in ".{0,64}") {
        let ts = FixedOffset::east_opt(0).unwrap().timestamp_opt(0, 0).unwrap();
        let line = Formatter::json().format(&ts, level, "{}", &[message.clone()]);
        prop_assert!(line.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        prop_assert_eq!(value["message"].as_str().unwrap(), message.as_str());
        prop_assert_eq!(value["level"].as_str().unwrap(), level.to_str());
    }
}
