//! Property tests for template parsing and time decomposition.
//!
//! 1. A unit is shown exactly when its token is in the template.
//! 2. Each suffix is the exact text between its token and the next one.
//! 3. Decomposing seconds and recombining them is lossless.
//! 4. Zero padding never truncates.

use bubbletea_countdown::format::{parse, Unit};
use bubbletea_countdown::remaining::{time_string, Remaining};
use proptest::prelude::*;

// ── Strategies ────────────────────────────────────────────────────────────

/// Suffix text that can never form a unit token.
fn suffix() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![":", " ", "天", "小时", "分钟", "秒", "'", "\"", "a", "x", "-"]),
        0..4,
    )
    .prop_map(|parts| parts.concat())
}

/// A non-empty selection of units, each with a suffix.
fn template_parts() -> impl Strategy<Value = Vec<(Unit, String)>> {
    (any::<[bool; 4]>(), prop::collection::vec(suffix(), 4))
        .prop_filter("at least one unit", |(mask, _)| mask.iter().any(|shown| *shown))
        .prop_map(|(mask, suffixes)| {
            Unit::ALL
                .into_iter()
                .zip(suffixes)
                .zip(mask)
                .filter(|(_, shown)| *shown)
                .map(|(part, _)| part)
                .collect()
        })
}

proptest! {
    #[test]
    fn parsed_units_match_tokens(parts in template_parts()) {
        let template: String = parts
            .iter()
            .map(|(unit, suffix)| format!("{}{}", unit.token(), suffix))
            .collect();
        let format = parse(&template).unwrap();

        for unit in Unit::ALL {
            let expected = parts.iter().find(|(shown, _)| *shown == unit);
            prop_assert_eq!(format.shows(unit), expected.is_some());
            prop_assert_eq!(format.suffix(unit), expected.map_or("", |(_, suffix)| suffix.as_str()));
        }
        prop_assert_eq!(format.unit_count(), parts.len());
        prop_assert_eq!(format.template(), template.as_str());
    }

    #[test]
    fn decomposition_round_trips(total in 0u64..10_000_000_000_000) {
        let remaining = Remaining::from_secs(total);
        prop_assert_eq!(remaining.total_secs(), total);
        prop_assert!(remaining.hours < 24);
        prop_assert!(remaining.minutes < 60);
        prop_assert!(remaining.seconds < 60);
    }

    #[test]
    fn millis_truncate_to_whole_seconds(millis in 1i64..1_000_000_000_000) {
        let remaining = Remaining::from_millis(millis).unwrap();
        prop_assert_eq!(remaining.total_secs(), millis as u64 / 1000);
    }

    #[test]
    fn time_string_pads_without_truncating(value in any::<u32>(), min_len in 0usize..8) {
        let text = time_string(u64::from(value), min_len);
        prop_assert_eq!(text.len(), value.to_string().len().max(min_len));
        prop_assert_eq!(text.parse::<u64>().unwrap(), u64::from(value));
    }
}
