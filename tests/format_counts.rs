use covid_tracker::format::{format_count, format_count_locale, format_count_str, pretty_print_stat};

#[test]
fn grouped_counts() {
    assert_eq!(format_count(Some(0)), "0");
    assert_eq!(format_count(Some(999)), "999");
    assert_eq!(format_count(Some(1_000)), "1,000");
    assert_eq!(format_count(Some(1_234_567)), "1,234,567");
    assert_eq!(format_count(None), "0");
}

#[test]
fn non_numeric_input_counts_as_absent() {
    assert_eq!(format_count_str("1234567"), "1,234,567");
    assert_eq!(format_count_str(" 42 "), "42");
    assert_eq!(format_count_str("n/a"), "0");
    assert_eq!(format_count_str("-3"), "0");
    assert_eq!(format_count_str(""), "0");
}

#[test]
fn locale_separators() {
    assert_eq!(format_count_locale(Some(1_234_567), "de"), "1.234.567");
    assert_eq!(format_count_locale(Some(1_234_567), "EN"), "1,234,567");
    // unknown tags fall back to English
    assert_eq!(format_count_locale(Some(1_234_567), "xx"), "1,234,567");
}

#[test]
fn compact_deltas() {
    assert_eq!(pretty_print_stat(None), "+0");
    assert_eq!(pretty_print_stat(Some(0)), "+0");
    assert_eq!(pretty_print_stat(Some(7)), "+7");
    assert_eq!(pretty_print_stat(Some(999)), "+999");
    assert_eq!(pretty_print_stat(Some(1_234)), "+1.2k");
    assert_eq!(pretty_print_stat(Some(3_456_789)), "+3.5m");
    assert_eq!(pretty_print_stat(Some(999_960)), "+1.0m");
    assert_eq!(pretty_print_stat(Some(2_000_000_000)), "+2.0b");
}
