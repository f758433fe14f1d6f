//! Best-date selection.
//!
//! A pure function choosing one preferred date from a candidate list.
//! Output is stable under any input ordering beyond the documented
//! tie-breaks (the first of equal sort keys wins).

use crate::decode::DecodeOptions;
use crate::range::DateRange;
use crate::resolver::Encoding;
use crate::statement::{DateValue, Qualifier};

/// A parsed date statement: either a single value or a range.
#[derive(Debug, Clone)]
pub enum ParsedDate {
    Value(DateValue),
    Range(DateRange),
}

impl ParsedDate {
    /// Whether the candidate resolved to a calendrical value.
    pub fn parsed(&self) -> bool {
        match self {
            Self::Value(v) => v.parsed(),
            Self::Range(r) => r.parsed(),
        }
    }

    /// The chronological sort key.
    pub fn sort_key(&self) -> String {
        match self {
            Self::Value(v) => v.sort_key(),
            Self::Range(r) => r.sort_key(),
        }
    }

    /// The effective encoding.
    pub fn encoding(&self) -> Option<Encoding> {
        match self {
            Self::Value(v) => v.encoding(),
            Self::Range(r) => r.encoding(),
        }
    }

    /// The effective qualifier.
    pub fn qualifier(&self) -> Option<Qualifier> {
        match self {
            Self::Value(v) => v.qualifier(),
            Self::Range(r) => r.qualifier(),
        }
    }

    /// Whether the candidate was marked primary.
    pub fn is_primary(&self) -> bool {
        match self {
            Self::Value(v) => v.is_primary(),
            Self::Range(r) => r.is_primary(),
        }
    }

    /// The event type.
    pub fn event_type(&self) -> Option<&str> {
        match self {
            Self::Value(v) => v.event_type(),
            Self::Range(r) => r.event_type(),
        }
    }

    /// Decodes for display.
    pub fn decoded_value(&self, options: &DecodeOptions<'_>) -> Option<String> {
        match self {
            Self::Value(v) => v.decoded_value(options),
            Self::Range(r) => r.decoded_value(options),
        }
    }

    /// The qualified rendering.
    pub fn qualified_value(&self) -> Option<String> {
        match self {
            Self::Value(v) => v.qualified_value(),
            Self::Range(r) => r.qualified_value(),
        }
    }

    /// The de-duplication key.
    pub fn base_value(&self) -> String {
        match self {
            Self::Value(v) => v.base_value(),
            Self::Range(r) => r.base_value(),
        }
    }
}

/// Selects the preferred date among candidates of one semantic type.
///
/// Unparsed candidates are discarded, qualified ones optionally so. If
/// any remaining candidate is primary, only primary candidates are
/// considered; otherwise, if any declares an explicit encoding, only
/// those are. The chronologically earliest candidate by sort key wins.
pub fn best_date<'a>(
    candidates: &'a [ParsedDate],
    event_type: Option<&str>,
    exclude_qualified: bool,
) -> Option<&'a ParsedDate> {
    let pool: Vec<&ParsedDate> = candidates
        .iter()
        .filter(|c| event_type.is_none() || c.event_type() == event_type)
        .filter(|c| c.parsed())
        .filter(|c| !exclude_qualified || c.qualifier().is_none())
        .collect();

    let pool = if pool.iter().any(|c| c.is_primary()) {
        pool.into_iter().filter(|c| c.is_primary()).collect()
    } else if pool.iter().any(|c| c.encoding().is_some()) {
        pool.into_iter()
            .filter(|c| c.encoding().is_some())
            .collect()
    } else {
        pool
    };

    pool.into_iter().min_by_key(|c| c.sort_key())
}
