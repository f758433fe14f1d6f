//! Format detection for free-text date statements.
//!
//! An ordered chain of pattern recognizers. Each detector tests the
//! sanitized text and, on match, normalizes it into an EDTF-compatible
//! string for the resolver. The chain order is a correctness-critical
//! total order: several patterns deliberately overlap and the most
//! specific must win.
//!
//! The `regex` crate has no lookaround, so the boundary assertions the
//! patterns need (e.g. the trailing-letter guard on Roman-numeral
//! centuries) are emulated with `\b` and anchored context classes.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::utils;

/// One recognizable legacy date notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pattern {
    /// Already-valid EDTF `Y`, `Y-M`, or `Y-M-D`.
    Edtf,
    /// `MM/DD/YYYY`.
    UsDate,
    /// `MM/DD/YY` with century inference.
    UsDateShortYear,
    /// `YYYY-YYYY` or `YYY-YYY` year range.
    YearRange,
    /// `YYY-` decade shorthand.
    DecadeDash,
    /// `YYY0s` decade string.
    DecadeString,
    /// Embedded `NNN B.C.`.
    BeforeCommonEra,
    /// Embedded 4-digit year.
    EmbeddedYear,
    /// Embedded 3-digit year.
    EmbeddedThreeDigitYear,
    /// A 6-character year obscured by brackets, e.g. `[1820]` or `18[20]`.
    BracketedYear,
    /// `NN--` mystery-century marker.
    MysteryCentury,
    /// `NNth century`.
    OrdinalCentury,
    /// Lowercase Roman-numeral century, e.g. `xvi`.
    RomanCentury,
    /// Roman-numeral year, e.g. `MDCCLXXVI`.
    RomanYear,
    /// Bare 1-2 digit year.
    ShortYear,
}

/// Detector priority, most specific first. Do not reorder.
pub(crate) const DETECTOR_CHAIN: &[Pattern] = &[
    Pattern::Edtf,
    Pattern::UsDate,
    Pattern::UsDateShortYear,
    Pattern::YearRange,
    Pattern::DecadeDash,
    Pattern::DecadeString,
    Pattern::BeforeCommonEra,
    Pattern::EmbeddedYear,
    Pattern::EmbeddedThreeDigitYear,
    Pattern::BracketedYear,
    Pattern::MysteryCentury,
    Pattern::OrdinalCentury,
    Pattern::RomanCentury,
    Pattern::RomanYear,
    Pattern::ShortYear,
];

static EDTF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-?\d{4})(?:-(\d{2})(?:-(\d{2}))?)?$").unwrap());
static US_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").unwrap());
static US_DATE_SHORT_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{2})$").unwrap());
static YEAR_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{3,4})\s*-\s*(\d{3,4})$").unwrap());
static DECADE_DASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{3})-$").unwrap());
static DECADE_STRING: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{3})0'?s\b").unwrap());
static BEFORE_COMMON_ERA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,4})\s*[Bb]\.?\s*[Cc]\.?").unwrap());
static EMBEDDED_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{4})\b").unwrap());
static EMBEDDED_THREE_DIGIT_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{3})\b").unwrap());
static BRACKETED_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^0-9\[\]])([0-9\[\]]{6})(?:[^0-9\[\]]|$)").unwrap());
static MYSTERY_CENTURY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{2})--$").unwrap());
static ORDINAL_CENTURY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\s+century").unwrap());
static ROMAN_CENTURY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^a-z])([ivx]+)(?:[^a-z]|$)").unwrap());
static ROMAN_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([MDCLXVI]+)\.?$").unwrap());
static SHORT_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{1,2})$").unwrap());

static HEBREW_SCRIPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x{0590}-\x{05FF}]").unwrap());

impl Pattern {
    fn regex(self) -> &'static Regex {
        match self {
            Self::Edtf => &EDTF,
            Self::UsDate => &US_DATE,
            Self::UsDateShortYear => &US_DATE_SHORT_YEAR,
            Self::YearRange => &YEAR_RANGE,
            Self::DecadeDash => &DECADE_DASH,
            Self::DecadeString => &DECADE_STRING,
            Self::BeforeCommonEra => &BEFORE_COMMON_ERA,
            Self::EmbeddedYear => &EMBEDDED_YEAR,
            Self::EmbeddedThreeDigitYear => &EMBEDDED_THREE_DIGIT_YEAR,
            Self::BracketedYear => &BRACKETED_YEAR,
            Self::MysteryCentury => &MYSTERY_CENTURY,
            Self::OrdinalCentury => &ORDINAL_CENTURY,
            Self::RomanCentury => &ROMAN_CENTURY,
            Self::RomanYear => &ROMAN_YEAR,
            Self::ShortYear => &SHORT_YEAR,
        }
    }

    /// Whether this detector recognizes the text.
    pub(crate) fn supports(self, text: &str) -> bool {
        self.regex().is_match(text)
    }

    /// Normalizes matched text into an EDTF-compatible string.
    ///
    /// Pure and total over the detector's matched domain; out-of-range
    /// calendar components (e.g. month 13 in a slash date) are passed
    /// through and rejected later at the calendar-parse boundary.
    pub(crate) fn normalize(self, text: &str) -> Option<String> {
        let caps = self.regex().captures(text)?;
        match self {
            Self::Edtf => Some(text.to_owned()),
            Self::UsDate => {
                let month: u8 = caps[1].parse().ok()?;
                let day: u8 = caps[2].parse().ok()?;
                let year: i32 = caps[3].parse().ok()?;
                Some(format!("{year:04}-{month:02}-{day:02}"))
            }
            Self::UsDateShortYear => {
                let month: u8 = caps[1].parse().ok()?;
                let day: u8 = caps[2].parse().ok()?;
                let short: i32 = caps[3].parse().ok()?;
                let year = infer_century(short);
                Some(format!("{year:04}-{month:02}-{day:02}"))
            }
            Self::YearRange => {
                let lower: i32 = caps[1].parse().ok()?;
                let upper: i32 = caps[2].parse().ok()?;
                Some(format!("{lower:04}/{upper:04}"))
            }
            Self::DecadeDash | Self::DecadeString => Some(format!("{}X", &caps[1])),
            Self::BeforeCommonEra => {
                let n: i32 = caps[1].parse().ok()?;
                // N BCE is astronomical year -(N-1); year 0 exists.
                Some(format!("{}{:04}", if n > 1 { "-" } else { "" }, (n - 1).abs()))
            }
            Self::EmbeddedYear => Some(caps[1].to_owned()),
            Self::EmbeddedThreeDigitYear => Some(format!("0{}", &caps[1])),
            Self::BracketedYear => {
                let digits: String = caps[1].chars().filter(char::is_ascii_digit).collect();
                (digits.len() == 4).then_some(digits)
            }
            Self::MysteryCentury => Some(format!("{}XX", &caps[1])),
            Self::OrdinalCentury => {
                let n: i32 = caps[1].parse().ok()?;
                (n >= 1).then(|| format!("{:02}XX", n - 1))
            }
            Self::RomanCentury => {
                let n = roman_to_int(&caps[1])?;
                (1..=99).contains(&n).then(|| format!("{:02}XX", n - 1))
            }
            Self::RomanYear => {
                let n = roman_to_int(&caps[1])?;
                (1..=9999).contains(&n).then(|| format!("{n:04}"))
            }
            Self::ShortYear => {
                let n: i32 = caps[1].parse().ok()?;
                Some(format!("{n:04}"))
            }
        }
    }
}

/// Maps a two-digit year onto a century: the previous century when the
/// resulting year would land in the future, else the current one.
fn infer_century(short: i32) -> i32 {
    if short > utils::current_year() - 2000 {
        1900 + short
    } else {
        2000 + short
    }
}

fn roman_to_int(numeral: &str) -> Option<i32> {
    let mut total = 0;
    let mut prev = 0;
    for ch in numeral.chars().rev() {
        let value = match ch.to_ascii_uppercase() {
            'I' => 1,
            'V' => 5,
            'X' => 10,
            'L' => 50,
            'C' => 100,
            'D' => 500,
            'M' => 1000,
            _ => return None,
        };
        if value < prev {
            total -= value;
        } else {
            total += value;
            prev = value;
        }
    }
    (total > 0).then_some(total)
}

/// Trims and collapses whitespace. Bracket noise is left alone so the
/// bracket-aware detectors can see it.
pub(crate) fn sanitize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text that must not be risked against the pattern chain: Hebrew-script
/// dates and undeclared leading-hyphen values.
pub(crate) fn unparseable(text: &str) -> bool {
    text.starts_with('-') || HEBREW_SCRIPT.is_match(text)
}

/// Runs the chain and returns the first match with its normalized form.
pub(crate) fn detect(text: &str) -> Option<(Pattern, String)> {
    if unparseable(text) {
        return None;
    }
    DETECTOR_CHAIN
        .iter()
        .find(|pattern| pattern.supports(text))
        .and_then(|&pattern| pattern.normalize(text).map(|norm| (pattern, norm)))
}

/// Generic fallback when nothing in the chain matches: strips bracket and
/// trailing punctuation noise and zero-pads 3-digit bare numbers.
pub(crate) fn fallback_normalize(text: &str) -> String {
    let stripped: String = text
        .chars()
        .filter(|c| !matches!(c, '[' | ']'))
        .collect();
    let stripped = stripped
        .trim()
        .trim_end_matches(['.', ',', ';', ':'])
        .trim()
        .to_owned();
    if stripped.len() == 3 && stripped.chars().all(|c| c.is_ascii_digit()) {
        return format!("0{stripped}");
    }
    stripped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(text: &str) -> Option<String> {
        detect(text).map(|(_, n)| n)
    }

    #[test]
    fn edtf_passthrough() {
        assert_eq!(norm("2019"), Some("2019".into()));
        assert_eq!(norm("2019-08"), Some("2019-08".into()));
        assert_eq!(norm("2019-08-10"), Some("2019-08-10".into()));
    }

    #[test]
    fn slash_dates() {
        assert_eq!(norm("12/1/2017"), Some("2017-12-01".into()));
        assert_eq!(norm("1/31/1999"), Some("1999-01-31".into()));
    }

    #[test]
    fn slash_dates_with_century_inference() {
        assert_eq!(norm("12/1/99"), Some("1999-12-01".into()));
        assert_eq!(norm("12/1/17"), Some("2017-12-01".into()));
    }

    #[test]
    fn year_ranges() {
        assert_eq!(norm("1914-1918"), Some("1914/1918".into()));
        assert_eq!(norm("966 - 1025"), Some("0966/1025".into()));
    }

    #[test]
    fn decades() {
        assert_eq!(norm("196-"), Some("196X".into()));
        assert_eq!(norm("1960s"), Some("196X".into()));
        assert_eq!(norm("the 1960's"), Some("196X".into()));
    }

    #[test]
    fn before_common_era() {
        assert_eq!(norm("300 B.C."), Some("-0299".into()));
        assert_eq!(norm("1 BC"), Some("0000".into()));
    }

    #[test]
    fn embedded_years() {
        assert_eq!(norm("printed in 1820, London"), Some("1820".into()));
        assert_eq!(norm("anno 966"), Some("0966".into()));
    }

    #[test]
    fn bracket_obscured_years() {
        // Plain "[1820]" is caught by the embedded-year detector first;
        // interleaved brackets need the dedicated pattern.
        assert_eq!(norm("[1820]"), Some("1820".into()));
        assert_eq!(norm("18[20]"), Some("1820".into()));
        assert_eq!(norm("[18]20"), Some("1820".into()));
    }

    #[test]
    fn centuries() {
        assert_eq!(norm("18--"), Some("18XX".into()));
        assert_eq!(norm("18th century"), Some("17XX".into()));
        assert_eq!(norm("21st century"), Some("20XX".into()));
        assert_eq!(norm("xvi"), Some("15XX".into()));
        // The trailing-letter guard keeps Roman letters inside ordinary
        // words from matching.
        assert_eq!(norm("ms. xerox copy"), None);
    }

    #[test]
    fn roman_years() {
        assert_eq!(norm("MDCCLXXVI"), Some("1776".into()));
        assert_eq!(norm("MDCCCLXIX."), Some("1869".into()));
    }

    #[test]
    fn short_years() {
        assert_eq!(norm("7"), Some("0007".into()));
        assert_eq!(norm("66"), Some("0066".into()));
    }

    #[test]
    fn unparseable_routes() {
        assert!(unparseable("-35"));
        assert!(unparseable("\u{05ea}\u{05e9}\u{05dc}\u{05d2}"));
        assert_eq!(norm("-35"), None);
    }

    #[test]
    fn fallback_normalization() {
        assert_eq!(fallback_normalize("[chez Villeneuve]."), "chez Villeneuve");
        assert_eq!(fallback_normalize("966"), "0966");
    }

    #[test]
    fn chain_priority_is_stable() {
        // "1914-1918" also contains an embedded 4-digit year; the range
        // detector must win.
        assert_eq!(detect("1914-1918").map(|(p, _)| p), Some(Pattern::YearRange));
        assert_eq!(detect("2019-08").map(|(p, _)| p), Some(Pattern::Edtf));
    }
}
