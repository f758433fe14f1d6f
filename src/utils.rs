//! Utility calendar equations.

use std::time::{SystemTime, UNIX_EPOCH};

pub(crate) const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Returns whether the astronomical year is a leap year in the proleptic
/// Gregorian calendar. Year 0 exists and is a leap year.
pub(crate) fn is_leap_year(y: i32) -> bool {
    y.rem_euclid(4) == 0 && (y.rem_euclid(100) != 0 || y.rem_euclid(400) == 0)
}

/// Returns the number of days in a month for a given year.
pub(crate) fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => 28 + is_leap_year(year) as u8,
        _ => unreachable!("days_in_month called with an invalid month."),
    }
}

/// Returns the epoch day number for a given year.
fn epoch_day_number_for_year(y: f64) -> f64 {
    365.0f64.mul_add(y - 1970.0, ((y - 1969.0) / 4.0).floor()) - ((y - 1901.0) / 100.0).floor()
        + ((y - 1601.0) / 400.0).floor()
}

fn epoch_time_for_year(y: i32) -> f64 {
    MS_PER_DAY as f64 * epoch_day_number_for_year(f64::from(y))
}

/// Computes the calendar year containing an epoch-millisecond timestamp.
pub(crate) fn epoch_time_to_epoch_year(t: f64) -> i32 {
    // roughly calculate the largest possible year given the time t,
    // then check and refine the year.
    let day_count = (t / MS_PER_DAY as f64).floor() as i32;
    let mut year = (day_count / 365) + 1970;
    loop {
        if epoch_time_for_year(year) <= t {
            break;
        }
        year -= 1;
    }

    year
}

/// Returns the current calendar year, used for two-digit century inference.
pub(crate) fn current_year() -> i32 {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0);
    epoch_time_to_epoch_year(millis)
}

/// English month name, `month` is `1..=12`.
pub(crate) fn month_name(month: u8) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => unreachable!("month_name called with an invalid month."),
    }
}

/// Ordinal suffix for a positive number ("st", "nd", "rd", "th").
pub(crate) fn ordinal_suffix(n: i32) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
