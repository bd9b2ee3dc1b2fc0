//! Integration tests for quarter labels and quarter arithmetic.

use proptest::prelude::*;
use qp_time::{format_quarter, next_quarter, parse_quarter, quarters_until_year_end, Quarter};

// ─── Codec ────────────────────────────────────────────────────────────────────

#[test]
fn spec_examples() {
    let q = parse_quarter("Q3 2024").unwrap();
    assert_eq!((q.year(), q.quarter()), (2024, 3));
    assert_eq!(parse_quarter("2024 Q3"), Some(q));
    assert_eq!(parse_quarter("garbage"), None);
    assert_eq!(format_quarter(2024, 3), "Q3 2024");

    let q4 = Quarter::new(2024, 4).unwrap();
    let next = next_quarter(q4);
    assert_eq!((next.year(), next.quarter()), (2025, 1));
}

#[test]
fn walking_a_decade() {
    let mut q = Quarter::new(2020, 1).unwrap();
    let mut labels = Vec::new();
    for _ in 0..40 {
        labels.push(q.label());
        q = next_quarter(q);
    }
    assert_eq!(labels.first().map(String::as_str), Some("Q1 2020"));
    assert_eq!(labels.last().map(String::as_str), Some("Q4 2029"));
    assert_eq!(q, Quarter::new(2030, 1).unwrap());

    // Walking forward from Q1 2020 up to Q4 2029 is exactly what the horizon
    // helper predicts from the quarter before.
    let before = Quarter::new(2019, 4).unwrap();
    assert_eq!(quarters_until_year_end(before, 2029), labels.len());
}

// ─── Properties ───────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn format_parse_round_trip(year in 1000i32..=9999, quarter in 1u8..=4) {
        let label = format_quarter(year, quarter);
        let q = parse_quarter(&label).unwrap();
        prop_assert_eq!(q.year(), year);
        prop_assert_eq!(q.quarter(), quarter);
        prop_assert_eq!(q.key(), year * 4 + quarter as i32 - 1);
    }

    #[test]
    fn reversed_forms_agree(year in 1000i32..=9999, quarter in 1u8..=4, sep in "[ /-]") {
        let canonical = parse_quarter(&format!("Q{quarter} {year}"));
        let reversed = parse_quarter(&format!("{year}{sep}q{quarter}"));
        prop_assert_eq!(canonical, reversed);
    }

    #[test]
    fn successor_is_key_plus_one(year in 1000i32..=9998, quarter in 1u8..=4) {
        let q = Quarter::new(year, quarter).unwrap();
        let n = next_quarter(q);
        prop_assert_eq!(n.key(), q.key() + 1);
        prop_assert!(n > q);
        prop_assert!((1..=4).contains(&n.quarter()));
    }
}
