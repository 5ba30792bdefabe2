use num_format::{Locale, ToFormattedString};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::AxisUnit;

/// Placeholder shown for absent readings.
pub const MISSING_VALUE: &str = "-";

/// Formats a reading for display.
///
/// Percentages get one decimal place; counts get `,` thousands separators,
/// at most three fraction digits and the unit suffix.
#[must_use]
pub fn format_value(value: Option<f64>, unit: &AxisUnit) -> String {
    match value.filter(|value| value.is_finite()) {
        None => MISSING_VALUE.to_owned(),
        Some(value) => match unit {
            AxisUnit::Percent => format_percent(value),
            AxisUnit::Count { suffix } => format_count(value, suffix),
        },
    }
}

/// Formats a value-axis tick; count ticks are rounded to whole units first.
#[must_use]
pub fn format_tick(value: f64, unit: &AxisUnit) -> String {
    let value = if unit.is_percent() {
        value
    } else {
        value.round()
    };
    format_value(Some(value), unit)
}

fn rounded(value: f64, dp: u32) -> Option<Decimal> {
    Decimal::from_f64_retain(value)
        .map(|decimal| decimal.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
}

fn format_percent(value: f64) -> String {
    match rounded(value, 1) {
        Some(mut decimal) => {
            decimal.rescale(1);
            format!("{decimal}%")
        }
        None => format!("{value:.1}%"),
    }
}

fn format_count(value: f64, suffix: &str) -> String {
    let text = rounded(value, 3).map_or_else(
        || format!("{}", value.round()),
        |decimal| decimal.normalize().to_string(),
    );
    let (sign, magnitude) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (integer, fraction) = match magnitude.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (magnitude, None),
    };

    let mut out = String::with_capacity(text.len() + integer.len() / 3 + suffix.len());
    out.push_str(sign);
    out.push_str(&grouped_integer(integer));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out.push_str(suffix);
    out
}

/// Digit runs wider than `u128` are left ungrouped.
fn grouped_integer(digits: &str) -> String {
    digits.parse::<u128>().map_or_else(
        |_| digits.to_owned(),
        |integer| integer.to_formatted_string(&Locale::ko),
    )
}
