//! Lexicographic sort key encoding.
//!
//! Produces a plain string whose byte-wise comparison reproduces
//! chronological order, suitable for external sort contexts such as a
//! search index. CE years zero-pad to four digits. BCE years (year <= 0)
//! are encoded so that they sort before every CE year, longer magnitudes
//! sort first, and within a digit count larger magnitudes sort first:
//! the absolute value has each digit inverted (0<->9, 1<->8, 2<->7,
//! 3<->6, 4<->5), is prefixed with a hyphen (which sorts before any
//! digit), and then with a digit-inverted length indicator.
//!
//! Decade precision truncates the final year digit and century precision
//! the final two, leaving hyphen markers, so truncated keys group
//! contiguously before any more-precise date sharing the same leading
//! digits ("19--" < "196-" < "1960").

use crate::calendrical::CalendricalValue;

/// Encodes a resolved value as a sort key.
pub(crate) fn encode(value: &CalendricalValue) -> String {
    match value {
        CalendricalValue::Day { year, month, day } => {
            format!("{}-{:02}-{:02}", year_segment(*year, 0), month, day)
        }
        CalendricalValue::Month { year, month } => {
            format!("{}-{:02}-00", year_segment(*year, 0), month)
        }
        CalendricalValue::Year(year) => format!("{}-00-00", year_segment(*year, 0)),
        CalendricalValue::Decade(year) => format!("{}-00-00", year_segment(*year, 1)),
        CalendricalValue::Century(year) => format!("{}-00-00", year_segment(*year, 2)),
        CalendricalValue::Season { year, season } => {
            format!("{}-{:02}-00", year_segment(*year, 0), season.first_month())
        }
        // Intervals and sets sort by their earliest bound.
        CalendricalValue::Interval { lower, upper } => lower
            .as_deref()
            .or(upper.as_deref())
            .map(encode)
            .unwrap_or_default(),
        CalendricalValue::Set(members) => members.first().map(encode).unwrap_or_default(),
    }
}

/// The year portion of the key. `truncate` is the number of trailing
/// digits replaced with hyphen markers for decade/century precision.
fn year_segment(year: i32, truncate: usize) -> String {
    if year >= 1 {
        let mut base = format!("{year:04}");
        base.truncate(base.len() - truncate);
        for _ in 0..truncate {
            base.push('-');
        }
        return base;
    }
    // BCE encoding; precision truncation does not apply to the inverted
    // form, where trailing digits are already order-reversed.
    let digits = year.unsigned_abs().to_string();
    let length = invert_digits(&digits.len().to_string());
    format!("-{}{}", length, invert_digits(&digits))
}

fn invert_digits(digits: &str) -> String {
    digits
        .chars()
        .map(|c| match c {
            '0' => '9',
            '1' => '8',
            '2' => '7',
            '3' => '6',
            '4' => '5',
            '5' => '4',
            '6' => '3',
            '7' => '2',
            '8' => '1',
            '9' => '0',
            other => other,
        })
        .collect()
}
