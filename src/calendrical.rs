//! The calendrical value model.
//!
//! A [`CalendricalValue`] is the closed union every date statement resolves
//! into. Each variant knows its own [`Precision`] and can compute its
//! earliest and latest [`CivilDate`] boundaries, which is where all
//! unspecified-field defaults live: an unspecified month resolves to
//! January/December, an unspecified day to the first/last day of the
//! resolved month, with leap years accounted for.

use crate::utils;

/// A plain proleptic-Gregorian calendar date used for boundary math.
///
/// Ordering is chronological by construction: year, then month, then day.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CivilDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl CivilDate {
    /// Creates a new `CivilDate` without validation.
    #[inline]
    pub(crate) const fn new_unchecked(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// January 1st of the given year.
    #[inline]
    pub(crate) const fn first_of(year: i32) -> Self {
        Self::new_unchecked(year, 1, 1)
    }

    /// December 31st of the given year.
    #[inline]
    pub(crate) const fn last_of(year: i32) -> Self {
        Self::new_unchecked(year, 12, 31)
    }
}

/// An EDTF season, codes 21 through 24.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Season {
    Spring = 21,
    Summer = 22,
    Autumn = 23,
    Winter = 24,
}

impl Season {
    /// Maps an EDTF month-slot code to a season.
    pub(crate) fn from_code(code: u8) -> Option<Self> {
        match code {
            21 => Some(Self::Spring),
            22 => Some(Self::Summer),
            23 => Some(Self::Autumn),
            24 => Some(Self::Winter),
            _ => None,
        }
    }

    /// The first month of the season.
    pub(crate) fn first_month(self) -> u8 {
        match self {
            Self::Spring => 3,
            Self::Summer => 6,
            Self::Autumn => 9,
            Self::Winter => 12,
        }
    }

    /// Display name.
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Autumn => "Autumn",
            Self::Winter => "Winter",
        }
    }
}

/// The finest calendar unit specified by a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    Day,
    Month,
    Year,
    Decade,
    Century,
}

impl Precision {
    /// Relative specificity, higher is more specific.
    #[inline]
    pub(crate) fn specificity(self) -> u8 {
        match self {
            Self::Century => 0,
            Self::Decade => 1,
            Self::Year => 2,
            Self::Month => 3,
            Self::Day => 4,
        }
    }
}

/// A resolved, precision-aware calendrical value.
///
/// `Decade` holds the first year of the decade (`196X` → `Decade(1960)`)
/// and `Century` the first year of the century (`19XX` → `Century(1900)`),
/// as in EDTF unspecified-digit notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendricalValue {
    Day { year: i32, month: u8, day: u8 },
    Month { year: i32, month: u8 },
    Year(i32),
    Decade(i32),
    Century(i32),
    Season { year: i32, season: Season },
    Interval {
        lower: Option<Box<CalendricalValue>>,
        upper: Option<Box<CalendricalValue>>,
    },
    Set(Vec<CalendricalValue>),
}

impl CalendricalValue {
    /// Returns the precision of this value.
    ///
    /// A season is month-precise. An interval reports its lower bound's
    /// precision (upper if the lower is open); a set reports its first
    /// member's.
    pub fn precision(&self) -> Precision {
        match self {
            Self::Day { .. } => Precision::Day,
            Self::Month { .. } | Self::Season { .. } => Precision::Month,
            Self::Year(_) => Precision::Year,
            Self::Decade(_) => Precision::Decade,
            Self::Century(_) => Precision::Century,
            Self::Interval { lower, upper } => lower
                .as_deref()
                .or(upper.as_deref())
                .map(Self::precision)
                .unwrap_or(Precision::Year),
            Self::Set(members) => members
                .first()
                .map(Self::precision)
                .unwrap_or(Precision::Year),
        }
    }

    /// The earliest day this value can denote, or `None` for an open bound.
    pub fn earliest(&self) -> Option<CivilDate> {
        match self {
            Self::Day { year, month, day } => {
                Some(CivilDate::new_unchecked(*year, *month, *day))
            }
            Self::Month { year, month } => Some(CivilDate::new_unchecked(*year, *month, 1)),
            Self::Year(year) => Some(CivilDate::first_of(*year)),
            Self::Decade(year) => Some(CivilDate::first_of(*year)),
            Self::Century(year) => Some(CivilDate::first_of(*year)),
            Self::Season { year, season } => {
                Some(CivilDate::new_unchecked(*year, season.first_month(), 1))
            }
            Self::Interval { lower, .. } => lower.as_ref().and_then(|v| v.earliest()),
            Self::Set(members) => members.first().and_then(Self::earliest),
        }
    }

    /// The latest day this value can denote, or `None` for an open bound.
    pub fn latest(&self) -> Option<CivilDate> {
        match self {
            Self::Day { year, month, day } => {
                Some(CivilDate::new_unchecked(*year, *month, *day))
            }
            Self::Month { year, month } => Some(CivilDate::new_unchecked(
                *year,
                *month,
                utils::days_in_month(*year, *month),
            )),
            Self::Year(year) => Some(CivilDate::last_of(*year)),
            Self::Decade(year) => Some(CivilDate::last_of(*year + 9)),
            Self::Century(year) => Some(CivilDate::last_of(*year + 99)),
            // Winter spills into the following year (Dec-Feb).
            Self::Season { year, season } => Some(match season {
                Season::Spring => CivilDate::new_unchecked(*year, 5, 31),
                Season::Summer => CivilDate::new_unchecked(*year, 8, 31),
                Season::Autumn => CivilDate::new_unchecked(*year, 11, 30),
                Season::Winter => {
                    CivilDate::new_unchecked(*year + 1, 2, utils::days_in_month(*year + 1, 2))
                }
            }),
            Self::Interval { upper, .. } => upper.as_ref().and_then(|v| v.latest()),
            Self::Set(members) => members.last().and_then(Self::latest),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn civil_date_ordering_is_chronological() {
        let a = CivilDate::new_unchecked(1999, 12, 31);
        let b = CivilDate::new_unchecked(2000, 1, 1);
        let c = CivilDate::new_unchecked(2000, 1, 2);
        assert!(a < b && b < c);
        assert!(CivilDate::new_unchecked(-44, 3, 15) < CivilDate::first_of(0));
    }

    #[test]
    fn month_boundaries_respect_leap_years() {
        let feb_leap = CalendricalValue::Month { year: 2020, month: 2 };
        assert_eq!(
            feb_leap.latest(),
            Some(CivilDate::new_unchecked(2020, 2, 29))
        );
        let feb = CalendricalValue::Month { year: 2021, month: 2 };
        assert_eq!(feb.latest(), Some(CivilDate::new_unchecked(2021, 2, 28)));
    }

    #[test]
    fn year_boundaries_default_unspecified_fields() {
        let year = CalendricalValue::Year(1920);
        assert_eq!(year.earliest(), Some(CivilDate::new_unchecked(1920, 1, 1)));
        assert_eq!(year.latest(), Some(CivilDate::new_unchecked(1920, 12, 31)));
    }

    #[test]
    fn decade_and_century_boundaries() {
        let decade = CalendricalValue::Decade(1960);
        assert_eq!(decade.earliest(), Some(CivilDate::first_of(1960)));
        assert_eq!(decade.latest(), Some(CivilDate::last_of(1969)));

        let century = CalendricalValue::Century(1900);
        assert_eq!(century.earliest(), Some(CivilDate::first_of(1900)));
        assert_eq!(century.latest(), Some(CivilDate::last_of(1999)));
    }

    #[test]
    fn interval_delegates_to_bounds() {
        let interval = CalendricalValue::Interval {
            lower: Some(Box::new(CalendricalValue::Year(1000))),
            upper: Some(Box::new(CalendricalValue::Year(1999))),
        };
        assert_eq!(interval.earliest(), Some(CivilDate::first_of(1000)));
        assert_eq!(interval.latest(), Some(CivilDate::last_of(1999)));

        let open = CalendricalValue::Interval {
            lower: None,
            upper: Some(Box::new(CalendricalValue::Year(1999))),
        };
        assert_eq!(open.earliest(), None);
        assert_eq!(open.latest(), Some(CivilDate::last_of(1999)));
    }

    #[test]
    fn winter_latest_spills_into_next_year() {
        let winter = CalendricalValue::Season {
            year: 2019,
            season: Season::Winter,
        };
        assert_eq!(
            winter.earliest(),
            Some(CivilDate::new_unchecked(2019, 12, 1))
        );
        assert_eq!(winter.latest(), Some(CivilDate::new_unchecked(2020, 2, 29)));
    }
}
