//! Calendrical resolution of normalized date strings.
//!
//! Parses a normalized form under its declared or detected encoding into a
//! [`CalendricalValue`]. All failures here are absorbed as `None`: a date
//! statement that does not parse is expected bad data, never an error.

use std::fmt;
use std::str::FromStr;

use ixdtf::parsers::IxdtfParser;

use crate::calendrical::{CalendricalValue, Season};
use crate::utils;

/// A declared date encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Strict ISO 8601 calendar dates.
    Iso8601,
    /// The W3CDTF profile, with `-00` month/day placeholders.
    W3cdtf,
    /// MARC21 date conventions, `u` as the unspecified digit.
    Marc,
    /// Extended Date/Time Format (ISO 8601-2).
    Edtf,
}

/// A parsing error for [`Encoding`].
#[derive(Debug, Clone, Copy)]
pub struct ParseEncodingError;

impl fmt::Display for ParseEncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid Encoding")
    }
}

impl FromStr for Encoding {
    type Err = ParseEncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "iso8601" => Ok(Self::Iso8601),
            "w3cdtf" => Ok(Self::W3cdtf),
            "marc" => Ok(Self::Marc),
            "edtf" => Ok(Self::Edtf),
            _ => Err(ParseEncodingError),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iso8601 => "iso8601",
            Self::W3cdtf => "w3cdtf",
            Self::Marc => "marc",
            Self::Edtf => "edtf",
        }
        .fmt(f)
    }
}

/// Known-bad sentinel values short-circuited before any parse attempt.
fn is_sentinel(text: &str) -> bool {
    text == "9999" || text == "0000-00-00" || text == "||||" || text.eq_ignore_ascii_case("uuuu")
}

/// Resolves a normalized date string under the given encoding.
pub(crate) fn resolve(text: &str, encoding: Encoding) -> Option<CalendricalValue> {
    let trimmed = text.trim();
    if trimmed.is_empty() || is_sentinel(trimmed) {
        return None;
    }
    match encoding {
        // "1uuu" has a hard-coded millennium boundary in MARC usage,
        // bypassing generic wildcard handling.
        Encoding::Marc if trimmed.eq_ignore_ascii_case("1uuu") => {
            Some(CalendricalValue::Interval {
                lower: Some(Box::new(CalendricalValue::Year(1000))),
                upper: Some(Box::new(CalendricalValue::Year(1999))),
            })
        }
        Encoding::Marc | Encoding::Edtf => parse_edtf(trimmed),
        Encoding::W3cdtf => parse_edtf(strip_w3c_placeholders(trimmed)),
        Encoding::Iso8601 => parse_iso(trimmed),
    }
}

/// W3CDTF writes unknown month/day slots as `-00`; EDTF has no such
/// notation, so they are stripped before parsing.
fn strip_w3c_placeholders(text: &str) -> &str {
    let mut out = text;
    while let Some(stripped) = out.strip_suffix("-00") {
        out = stripped;
    }
    out
}

/// Strict ISO 8601 calendar parse, by way of `ixdtf`.
fn parse_iso(text: &str) -> Option<CalendricalValue> {
    let body = text.strip_prefix(['+', '-']).unwrap_or(text);
    let separators = body.matches('-').count();

    if separators == 0 {
        // Year precision. Strictly four digits.
        if body.len() != 4 || !body.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let year: i32 = text.parse().ok()?;
        return Some(CalendricalValue::Year(year));
    }

    if separators == 1 {
        let record = IxdtfParser::from_utf8(text.as_bytes())
            .parse_year_month()
            .ok()?;
        let date = record.date?;
        return Some(CalendricalValue::Month {
            year: date.year,
            month: date.month,
        });
    }

    let record = IxdtfParser::from_utf8(text.as_bytes()).parse().ok()?;
    let date = record.date?;
    Some(CalendricalValue::Day {
        year: date.year,
        month: date.month,
        day: date.day,
    })
}

/// Parses an EDTF-compatible string: single dates with unspecified-digit
/// masks, seasons, `/`-separated intervals with open (`..`) or unknown
/// (empty) sides, and bracketed sets.
pub(crate) fn parse_edtf(text: &str) -> Option<CalendricalValue> {
    if let Some((lhs, rhs)) = text.split_once('/') {
        let lower = parse_interval_side(lhs)?;
        let upper = parse_interval_side(rhs)?;
        if lower.is_none() && upper.is_none() {
            return None;
        }
        return Some(CalendricalValue::Interval { lower, upper });
    }

    let set_inner = text
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .or_else(|| text.strip_prefix('{').and_then(|t| t.strip_suffix('}')));
    if let Some(inner) = set_inner {
        let mut members = Vec::new();
        for member in inner.split(',') {
            let member = member.trim();
            if member == ".." {
                continue;
            }
            members.push(parse_edtf_date(member)?);
        }
        if members.is_empty() {
            return None;
        }
        return Some(CalendricalValue::Set(members));
    }

    parse_edtf_date(text)
}

fn parse_interval_side(side: &str) -> Option<Option<Box<CalendricalValue>>> {
    match side.trim() {
        "" | ".." => Some(None),
        s => parse_edtf_date(s).map(|v| Some(Box::new(v))),
    }
}

fn is_mask(c: char) -> bool {
    matches!(c, 'u' | 'U' | 'x' | 'X')
}

fn all_masked(part: &str) -> bool {
    !part.is_empty() && part.chars().all(is_mask)
}

/// Parses a single EDTF date (no interval or set structure).
fn parse_edtf_date(text: &str) -> Option<CalendricalValue> {
    // Trailing certainty markers are carried as statement qualifiers, not
    // in the calendrical value; tolerate and discard them here.
    let text = text.trim().trim_end_matches(['?', '~', '%']);
    if text.is_empty() {
        return None;
    }
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let mut parts = body.splitn(3, '-');
    let year_part = parts.next()?;
    let month_part = parts.next();
    let day_part = parts.next();

    let year_value = parse_year_part(year_part, negative)?;

    let Some(month_part) = month_part else {
        return Some(year_value);
    };
    // Unspecified digits below year precision never extend it.
    let CalendricalValue::Year(year) = year_value else {
        return None;
    };

    if all_masked(month_part) {
        // Unspecified month; the day must be absent or unspecified too.
        return match day_part {
            None => Some(CalendricalValue::Year(year)),
            Some(day) if all_masked(day) => Some(CalendricalValue::Year(year)),
            Some(_) => None,
        };
    }

    let month_num: u8 = parse_two_digits(month_part)?;
    if let Some(season) = Season::from_code(month_num) {
        // Season codes take the month slot and admit no day.
        return day_part
            .is_none()
            .then_some(CalendricalValue::Season { year, season });
    }
    if !(1..=12).contains(&month_num) {
        return None;
    }

    let Some(day_part) = day_part else {
        return Some(CalendricalValue::Month {
            year,
            month: month_num,
        });
    };
    if all_masked(day_part) {
        return Some(CalendricalValue::Month {
            year,
            month: month_num,
        });
    }
    let day_num: u8 = parse_two_digits(day_part)?;
    if !(1..=utils::days_in_month(year, month_num)).contains(&day_num) {
        return None;
    }
    Some(CalendricalValue::Day {
        year,
        month: month_num,
        day: day_num,
    })
}

/// Parses the year slot: plain digit years of 1-4 digits (zero-padding
/// preserves sign, bare "0" is the year 0), or a 4-character year with
/// one or two trailing unspecified digits yielding decade or century
/// precision.
fn parse_year_part(part: &str, negative: bool) -> Option<CalendricalValue> {
    if part.is_empty() || part.len() > 4 {
        return None;
    }
    if part.chars().all(|c| c.is_ascii_digit()) {
        let n: i32 = part.parse().ok()?;
        return Some(CalendricalValue::Year(if negative { -n } else { n }));
    }

    // Masked years must be 4 characters with the masks trailing.
    if part.len() != 4 {
        return None;
    }
    let mask_count = part.chars().rev().take_while(|&c| is_mask(c)).count();
    let digits = &part[..part.len() - mask_count];
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let base: i32 = digits.parse().ok()?;
    match mask_count {
        1 => {
            let decade = base * 10;
            Some(CalendricalValue::Decade(if negative { -decade } else { decade }))
        }
        2 => {
            let century = base * 100;
            Some(CalendricalValue::Century(if negative {
                -century
            } else {
                century
            }))
        }
        _ => None,
    }
}

fn parse_two_digits(part: &str) -> Option<u8> {
    if part.is_empty() || part.len() > 2 || !part.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
