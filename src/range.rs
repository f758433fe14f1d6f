//! Date ranges composed of two endpoint values.
//!
//! A [`DateRange`] holds up to two [`DateValue`] endpoints tagged with
//! start/end roles and re-derives every property from them. Range-level
//! encoding and qualifier metadata act only as fallbacks when the
//! endpoints carry none of their own.

use crate::decode::{self, DecodeOptions};
use crate::error::DateError;
use crate::resolver::Encoding;
use crate::statement::{DateValue, Qualifier, RawDateStatement, Role};
use crate::DateResult;

/// A date range with at least one endpoint.
#[derive(Debug, Clone)]
pub struct DateRange {
    start: Option<DateValue>,
    stop: Option<DateValue>,
    encoding: Option<Encoding>,
    qualifier: Option<Qualifier>,
    event_type: Option<String>,
}

impl DateRange {
    /// Creates a range from explicit endpoints. At least one endpoint is
    /// required; a range with neither is a contract violation.
    pub fn new(start: Option<DateValue>, stop: Option<DateValue>) -> DateResult<Self> {
        if start.is_none() && stop.is_none() {
            return Err(
                DateError::ty().with_message("DateRange requires at least one endpoint.")
            );
        }
        Ok(Self {
            start,
            stop,
            encoding: None,
            qualifier: None,
            event_type: None,
        })
    }

    /// Builds a range from candidate statements by locating role-tagged
    /// endpoints. A candidate with no role is dropped, never defaulted;
    /// with duplicate roles the first match wins.
    pub fn from_statements(
        candidates: impl IntoIterator<Item = RawDateStatement>,
    ) -> DateResult<Self> {
        let mut start = None;
        let mut stop = None;
        for candidate in candidates {
            match candidate.role() {
                Some(Role::Start) if start.is_none() => start = Some(DateValue::new(candidate)),
                Some(Role::End) if stop.is_none() => stop = Some(DateValue::new(candidate)),
                _ => {}
            }
        }
        Self::new(start, stop)
    }

    /// Sets the range-level fallback encoding.
    #[must_use]
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Sets the range-level fallback qualifier.
    #[must_use]
    pub fn with_qualifier(mut self, qualifier: Qualifier) -> Self {
        self.qualifier = Some(qualifier);
        self
    }

    /// Sets the event type for the range as a whole.
    #[must_use]
    pub fn with_event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    /// The start endpoint, if present.
    pub fn start(&self) -> Option<&DateValue> {
        self.start.as_ref()
    }

    /// The end endpoint, if present.
    pub fn stop(&self) -> Option<&DateValue> {
        self.stop.as_ref()
    }

    /// The effective encoding: start's, then stop's, then the range-level
    /// declared encoding.
    pub fn encoding(&self) -> Option<Encoding> {
        self.start
            .as_ref()
            .and_then(DateValue::encoding)
            .or_else(|| self.stop.as_ref().and_then(DateValue::encoding))
            .or(self.encoding)
    }

    /// The qualifier, reported only when both endpoints agree. Falls back
    /// to the range-level qualifier when neither endpoint carries one.
    pub fn qualifier(&self) -> Option<Qualifier> {
        match (
            self.start.as_ref().and_then(DateValue::qualifier),
            self.stop.as_ref().and_then(DateValue::qualifier),
        ) {
            (Some(a), Some(b)) if a == b => Some(a),
            (Some(a), None) if self.stop.is_none() => Some(a),
            (None, Some(b)) if self.start.is_none() => Some(b),
            (None, None) => self.qualifier,
            _ => None,
        }
    }

    /// The event type.
    pub fn event_type(&self) -> Option<&str> {
        self.event_type
            .as_deref()
            .or_else(|| self.start.as_ref().and_then(DateValue::event_type))
            .or_else(|| self.stop.as_ref().and_then(DateValue::event_type))
    }

    /// True when either endpoint was marked primary.
    pub fn is_primary(&self) -> bool {
        self.start.as_ref().is_some_and(DateValue::is_primary)
            || self.stop.as_ref().is_some_and(DateValue::is_primary)
    }

    /// True when either endpoint parsed.
    pub fn parsed(&self) -> bool {
        self.start.as_ref().is_some_and(DateValue::parsed)
            || self.stop.as_ref().is_some_and(DateValue::parsed)
    }

    /// The range's sort key: its chronologically earliest endpoint's key.
    pub fn sort_key(&self) -> String {
        self.start
            .as_ref()
            .map(DateValue::sort_key)
            .filter(|k| !k.is_empty())
            .or_else(|| self.stop.as_ref().map(DateValue::sort_key))
            .unwrap_or_default()
    }

    /// Decodes both endpoints and joins them, deduplicating identical
    /// renders.
    pub fn decoded_value(&self, options: &DecodeOptions<'_>) -> Option<String> {
        let start = self
            .start
            .as_ref()
            .and_then(|v| v.decoded_value(options))
            .filter(|s| !s.is_empty());
        let stop = self
            .stop
            .as_ref()
            .and_then(|v| v.decoded_value(options))
            .filter(|s| !s.is_empty());
        match (start, stop) {
            (Some(a), Some(b)) if a == b => Some(a),
            (Some(a), Some(b)) => Some(format!("{a} - {b}")),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        }
    }

    /// The qualified rendering. When both endpoints agree on a qualifier
    /// (or a range-level fallback applies) the joint decoded value is
    /// wrapped once; otherwise each endpoint is wrapped per its own
    /// qualifier ("[ca. X] - [Y?]").
    pub fn qualified_value(&self) -> Option<String> {
        if let Some(qualifier) = self.qualifier() {
            let decoded = self.decoded_value(&DecodeOptions::default())?;
            return Some(decode::qualify(&decoded, qualifier));
        }
        let start = self.start.as_ref().and_then(DateValue::qualified_value);
        let stop = self.stop.as_ref().and_then(DateValue::qualified_value);
        match (start, stop) {
            (Some(a), Some(b)) if a == b => Some(a),
            (Some(a), Some(b)) => Some(format!("{a} - {b}")),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        }
    }

    /// Concatenates both endpoints' base values for range-level
    /// de-duplication.
    pub fn base_value(&self) -> String {
        format!(
            "{}-{}",
            self.start.as_ref().map(DateValue::base_value).unwrap_or_default(),
            self.stop.as_ref().map(DateValue::base_value).unwrap_or_default(),
        )
    }

    /// Materializes the range as an EDTF interval, open-siding absent
    /// endpoints, for interval-containment tests.
    pub fn as_interval(&self) -> String {
        format!(
            "{}/{}",
            self.start
                .as_ref()
                .map(DateValue::base_value)
                .unwrap_or_else(|| "..".to_owned()),
            self.stop
                .as_ref()
                .map(DateValue::base_value)
                .unwrap_or_else(|| "..".to_owned()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendrical::Precision;

    fn endpoint(text: &str, role: Role) -> RawDateStatement {
        RawDateStatement::new(text)
            .with_encoding(Encoding::W3cdtf)
            .with_role(role)
    }

    #[test]
    fn requires_an_endpoint() {
        assert!(DateRange::new(None, None).is_err());
    }

    #[test]
    fn untagged_candidates_are_dropped() {
        // No role, no endpoint; never defaulted to start.
        let result = DateRange::from_statements([RawDateStatement::new("1920")]);
        assert!(result.is_err());
    }

    #[test]
    fn duplicate_roles_first_match_wins() {
        let range = DateRange::from_statements([
            endpoint("1920", Role::Start),
            endpoint("1921", Role::Start),
            endpoint("1930", Role::End),
        ])
        .unwrap();
        assert_eq!(range.start().unwrap().text(), "1920");
    }

    #[test]
    fn decodes_at_year_precision() {
        let range = DateRange::from_statements([
            endpoint("2020-01-01", Role::Start),
            endpoint("2021-10-31", Role::End),
        ])
        .unwrap();
        let options = DecodeOptions {
            allowed_precisions: &[Precision::Year],
            ..Default::default()
        };
        assert_eq!(range.decoded_value(&options), Some("2020 - 2021".to_owned()));
    }

    #[test]
    fn encoding_prefers_start_then_stop_then_range() {
        let range = DateRange::new(
            Some(DateValue::new(RawDateStatement::new("1920"))),
            Some(DateValue::new(
                RawDateStatement::new("1930").with_encoding(Encoding::Marc),
            )),
        )
        .unwrap()
        .with_encoding(Encoding::Edtf);
        assert_eq!(range.encoding(), Some(Encoding::Marc));

        let range = DateRange::new(Some(DateValue::new(RawDateStatement::new("1920"))), None)
            .unwrap()
            .with_encoding(Encoding::Edtf);
        assert_eq!(range.encoding(), Some(Encoding::Edtf));
    }

    #[test]
    fn qualifier_requires_agreement() {
        let agreeing = DateRange::new(
            Some(DateValue::new(
                RawDateStatement::new("1920").with_qualifier(Qualifier::Approximate),
            )),
            Some(DateValue::new(
                RawDateStatement::new("1930").with_qualifier(Qualifier::Approximate),
            )),
        )
        .unwrap();
        assert_eq!(agreeing.qualifier(), Some(Qualifier::Approximate));
        assert_eq!(agreeing.qualified_value(), Some("[ca. 1920 - 1930]".to_owned()));

        let disagreeing = DateRange::new(
            Some(DateValue::new(
                RawDateStatement::new("1920").with_qualifier(Qualifier::Approximate),
            )),
            Some(DateValue::new(
                RawDateStatement::new("1930").with_qualifier(Qualifier::Questionable),
            )),
        )
        .unwrap();
        assert_eq!(disagreeing.qualifier(), None);
        assert_eq!(
            disagreeing.qualified_value(),
            Some("[ca. 1920] - [1930?]".to_owned())
        );
    }

    #[test]
    fn base_value_concatenates_endpoints() {
        let range = DateRange::from_statements([
            endpoint("1920", Role::Start),
            endpoint("1930", Role::End),
        ])
        .unwrap();
        assert_eq!(range.base_value(), "1920-1930");
    }

    #[test]
    fn as_interval_open_sides_absent_endpoints() {
        let range =
            DateRange::from_statements([endpoint("1920", Role::Start)]).unwrap();
        assert_eq!(range.as_interval(), "1920/..");

        let range = DateRange::from_statements([endpoint("1930", Role::End)]).unwrap();
        assert_eq!(range.as_interval(), "../1930");
    }

    #[test]
    fn parsed_and_primary_are_disjunctive() {
        let range = DateRange::from_statements([
            RawDateStatement::new("chez Villeneuve").with_role(Role::Start),
            endpoint("1930", Role::End),
        ])
        .unwrap();
        assert!(range.parsed());
        assert!(!range.is_primary());
    }
}
