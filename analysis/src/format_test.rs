use crate::format::{format_count, format_throughput, format_time, is_slow};

#[test]
pub fn time_units_by_magnitude() {
    assert_eq!(format_time(999.0, true), "999ns");
    assert_eq!(format_time(1_000.0, true), "1.00μs");
    assert_eq!(format_time(1_500.0, true), "1.50μs");
    // rounds up but stays in microseconds
    assert_eq!(format_time(999_999.0, true), "1000.00μs");
    assert_eq!(format_time(1_000_000.0, true), "1.00ms");
    assert_eq!(format_time(2_345_678.0, true), "2.35ms");
    assert_eq!(format_time(0.0, true), "0ns");
}

#[test]
pub fn seconds_use_three_decimals() {
    assert_eq!(format_time(1_000_000_000.0, false), "1.000s");
    assert_eq!(format_time(12_345_000_000.0, false), "12.345s");
}

#[test]
pub fn slow_queries_are_marked() {
    assert_eq!(format_time(150_000_000.0, true), "⚠️ 150.00ms");
    assert_eq!(format_time(99_000_000.0, true), "99.00ms");
    assert_eq!(format_time(100_000_000.0, true), "100.00ms");
    // threshold is checked in milliseconds even when seconds are displayed
    assert_eq!(format_time(2_000_000_000.0, true), "⚠️ 2.000s");
}

#[test]
pub fn indicator_can_be_disabled() {
    assert_eq!(format_time(150_000_000.0, false), "150.00ms");
}

#[test]
pub fn slow_threshold() {
    assert!(!is_slow(100_000_000.0));
    assert!(is_slow(100_000_001.0));
}

#[test]
pub fn throughput_units() {
    assert_eq!(format_throughput(500.0), "500.00");
    assert_eq!(format_throughput(1_500.0), "1.50K");
    assert_eq!(format_throughput(2_500_000.0), "2.50M");
    assert_eq!(format_throughput(999.994), "999.99");
}

#[test]
pub fn thousands_separators() {
    assert_eq!(format_count(0), "0");
    assert_eq!(format_count(999), "999");
    assert_eq!(format_count(1_000), "1,000");
    assert_eq!(format_count(100_000), "100,000");
    assert_eq!(format_count(1_234_567), "1,234,567");
}
