use certstat::core::AxisUnit;
use certstat::stats::{MISSING_VALUE, format_tick, format_value};

#[test]
fn counts_get_grouping_and_suffix() {
    let unit = AxisUnit::count("명");
    assert_eq!(format_value(Some(0.0), &unit), "0명");
    assert_eq!(format_value(Some(999.0), &unit), "999명");
    assert_eq!(format_value(Some(1234.0), &unit), "1,234명");
    assert_eq!(format_value(Some(1_234_567.0), &unit), "1,234,567명");
    assert_eq!(format_value(Some(-4200.0), &unit), "-4,200명");
}

#[test]
fn counts_keep_at_most_three_fraction_digits() {
    let unit = AxisUnit::count("");
    assert_eq!(format_value(Some(1234.5), &unit), "1,234.5");
    assert_eq!(format_value(Some(0.12345), &unit), "0.123");
    assert_eq!(format_value(Some(2.0625), &unit), "2.063");
}

#[test]
fn percentages_get_exactly_one_decimal() {
    assert_eq!(format_value(Some(40.0), &AxisUnit::Percent), "40.0%");
    assert_eq!(format_value(Some(33.333), &AxisUnit::Percent), "33.3%");
    assert_eq!(format_value(Some(66.66), &AxisUnit::Percent), "66.7%");
    assert_eq!(format_value(Some(100.0), &AxisUnit::Percent), "100.0%");
}

#[test]
fn missing_and_non_finite_values_render_placeholder() {
    assert_eq!(format_value(None, &AxisUnit::Percent), MISSING_VALUE);
    assert_eq!(format_value(Some(f64::NAN), &AxisUnit::default()), MISSING_VALUE);
    assert_eq!(format_value(Some(f64::INFINITY), &AxisUnit::default()), "-");
}

#[test]
fn count_ticks_are_rounded_to_whole_units() {
    let unit = AxisUnit::default();
    assert_eq!(format_tick(308.625, &unit), "309명");
    assert_eq!(format_tick(2.5, &unit), "3명");
    assert_eq!(format_tick(37.5, &AxisUnit::Percent), "37.5%");
}

#[test]
fn large_counts_group_every_three_digits() {
    let unit = AxisUnit::count("");
    assert_eq!(format_value(Some(12_345_678_901.0), &unit), "12,345,678,901");
    assert_eq!(format_value(Some(-1_000_000.25), &unit), "-1,000,000.25");
    assert_eq!(format_value(Some(100_000.0), &unit), "100,000");
}
