//! Decoding resolved values into display strings.
//!
//! A decode request carries an ordered list of allowed precisions, most
//! specific first. The decoder emits the most specific allowed precision
//! not exceeding the resolved one, falling back to the head of the list
//! when none is compatible.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::calendrical::{CalendricalValue, CivilDate, Precision};
use crate::statement::Qualifier;
use crate::utils;

/// All precisions, most specific first.
pub const DEFAULT_PRECISIONS: &[Precision] = &[
    Precision::Day,
    Precision::Month,
    Precision::Year,
    Precision::Decade,
    Precision::Century,
];

/// Options controlling [`DateValue::decoded_value`][crate::DateValue::decoded_value].
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions<'a> {
    /// Allowed output precisions, most specific first.
    pub allowed_precisions: &'a [Precision],
    /// Return no value for unparsable statements instead of falling back
    /// to the original text.
    pub ignore_unparseable: bool,
    /// Prefer the original trimmed text when no encoding was declared,
    /// unless the text is itself an unambiguous numeric form.
    pub prefer_original_text: bool,
}

impl Default for DecodeOptions<'_> {
    fn default() -> Self {
        Self {
            allowed_precisions: DEFAULT_PRECISIONS,
            ignore_unparseable: false,
            prefer_original_text: false,
        }
    }
}

static SIMPLE_NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[?\d{1,4}\??\]?\.?$").unwrap());

/// Bare-numeric or simple bracketed-year original text decodes even when
/// the caller prefers original text.
pub(crate) fn is_simple_numeric(text: &str) -> bool {
    SIMPLE_NUMERIC.is_match(text)
}

/// Renders a resolved value at the best allowed precision.
pub(crate) fn decode(value: &CalendricalValue, allowed: &[Precision]) -> String {
    match value {
        CalendricalValue::Interval { lower, upper } => {
            let lower = lower.as_deref().map(|v| decode(v, allowed));
            let upper = upper.as_deref().map(|v| decode(v, allowed));
            match (lower, upper) {
                (Some(l), Some(u)) if l == u => l,
                (Some(l), Some(u)) => format!("{l} - {u}"),
                (Some(l), None) => l,
                (None, Some(u)) => u,
                (None, None) => String::new(),
            }
        }
        CalendricalValue::Set(members) => {
            let mut rendered: Vec<String> =
                members.iter().map(|m| decode(m, allowed)).collect();
            rendered.dedup();
            rendered.join(", ")
        }
        scalar => {
            let target = select_precision(allowed, scalar.precision());
            scalar_at(scalar, target)
        }
    }
}

fn select_precision(allowed: &[Precision], resolved: Precision) -> Precision {
    allowed
        .iter()
        .copied()
        .find(|p| p.specificity() <= resolved.specificity())
        .or_else(|| allowed.first().copied())
        .unwrap_or(resolved)
}

fn scalar_at(value: &CalendricalValue, target: Precision) -> String {
    let anchor = value.earliest().unwrap_or_default();
    match target {
        Precision::Day => format!(
            "{} {}, {}",
            utils::month_name(anchor.month),
            anchor.day,
            year_display(anchor.year)
        ),
        Precision::Month => match value {
            CalendricalValue::Season { year, season } => {
                format!("{} {}", season.name(), year_display(*year))
            }
            _ => format!(
                "{} {}",
                utils::month_name(anchor.month),
                year_display(anchor.year)
            ),
        },
        Precision::Year => year_display(anchor.year),
        Precision::Decade => decade_display(anchor),
        Precision::Century => century_display(anchor),
    }
}

/// Year display: BCE years as "{1-year} BCE", years before 1000 CE with an
/// explicit "CE", modern years bare.
fn year_display(year: i32) -> String {
    if year < 1 {
        format!("{} BCE", 1 - year)
    } else if year < 1000 {
        format!("{year} CE")
    } else {
        year.to_string()
    }
}

fn decade_display(anchor: CivilDate) -> String {
    let decade = anchor.year - anchor.year.rem_euclid(10);
    format!("{decade}s")
}

fn century_display(anchor: CivilDate) -> String {
    let century_start = anchor.year - anchor.year.rem_euclid(100);
    if century_start < 0 {
        let n = (-century_start) / 100 + 1;
        format!("{}{} century BCE", n, utils::ordinal_suffix(n))
    } else {
        let n = century_start / 100 + 1;
        format!("{}{} century", n, utils::ordinal_suffix(n))
    }
}

/// Wraps a decoded value per its statement qualifier.
pub(crate) fn qualify(decoded: &str, qualifier: Qualifier) -> String {
    match qualifier {
        Qualifier::Approximate => format!("[ca. {decoded}]"),
        Qualifier::Questionable => format!("[{decoded}?]"),
        Qualifier::Inferred => format!("[{decoded}]"),
    }
}
