//! The per-statement attribute map consumed from descriptive metadata.
//!
//! A [`DateDescription`] mirrors one date occurrence as it appears in the
//! source document: an optional free-text `value` plus encoding,
//! qualifier, status, and type attributes, or a `structuredValue` array
//! of the same shape. A present `structuredValue` makes the description a
//! range constructor; the enclosing object's own value, encoding, and
//! qualifier then serve only as range-level fallbacks.

use std::str::FromStr;

use serde::Deserialize;

use crate::range::DateRange;
use crate::resolver::Encoding;
use crate::select::ParsedDate;
use crate::statement::{DateValue, Qualifier, RawDateStatement, Role};

/// One date occurrence from a metadata document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DateDescription {
    pub value: Option<String>,
    pub structured_value: Vec<DateDescription>,
    pub encoding: Option<EncodingAttr>,
    pub qualifier: Option<String>,
    pub status: Option<String>,
    /// Free-text event or role string: "publication", "creation", ...,
    /// or "start"/"end" on structured entries.
    #[serde(rename = "type")]
    pub date_type: Option<String>,
}

/// The `encoding` sub-attribute, `{"code": "w3cdtf"}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EncodingAttr {
    pub code: Option<String>,
}

impl DateDescription {
    fn declared_encoding(&self) -> Option<Encoding> {
        let code = self.encoding.as_ref()?.code.as_deref()?;
        match Encoding::from_str(code) {
            Ok(encoding) => Some(encoding),
            Err(_) => {
                log::warn!("ignoring unrecognized date encoding code {code:?}");
                None
            }
        }
    }

    fn declared_qualifier(&self) -> Option<Qualifier> {
        let qualifier = self.qualifier.as_deref()?;
        match Qualifier::from_str(qualifier) {
            Ok(qualifier) => Some(qualifier),
            Err(_) => {
                log::warn!("ignoring unrecognized date qualifier {qualifier:?}");
                None
            }
        }
    }

    fn is_primary(&self) -> bool {
        self.status.as_deref() == Some("primary")
    }

    /// Builds the statement for a standalone (non-structured) occurrence.
    fn to_statement(&self) -> Option<RawDateStatement> {
        let encoding = self.declared_encoding();
        let value = match self.value.as_deref().map(str::trim) {
            Some(v) if !v.is_empty() => v,
            _ => {
                if encoding.is_some() {
                    // Upstream data-quality defect: a declared encoding
                    // with nothing to decode. Absorbed, never raised.
                    log::warn!("date with declared encoding but empty value");
                    ""
                } else {
                    return None;
                }
            }
        };
        let mut statement = RawDateStatement::new(value).with_primary(self.is_primary());
        if let Some(encoding) = encoding {
            statement = statement.with_encoding(encoding);
        }
        if let Some(qualifier) = self.declared_qualifier() {
            statement = statement.with_qualifier(qualifier);
        }
        match self.date_type.as_deref().and_then(|t| Role::from_str(t).ok()) {
            Some(role) => statement = statement.with_role(role),
            None => {
                if let Some(event_type) = self.date_type.as_deref() {
                    statement = statement.with_event_type(event_type);
                }
            }
        }
        Some(statement)
    }

    /// Converts the description into a parsed date: a [`DateRange`] when
    /// a `structuredValue` is present, a single [`DateValue`] otherwise.
    /// Returns `None` when there is nothing usable at all.
    pub fn to_parsed_date(&self) -> Option<ParsedDate> {
        if !self.structured_value.is_empty() {
            let endpoints = self
                .structured_value
                .iter()
                .filter_map(DateDescription::to_statement);
            let mut range = DateRange::from_statements(endpoints).ok()?;
            if let Some(encoding) = self.declared_encoding() {
                range = range.with_encoding(encoding);
            }
            if let Some(qualifier) = self.declared_qualifier() {
                range = range.with_qualifier(qualifier);
            }
            if let Some(event_type) = self.date_type.as_deref() {
                range = range.with_event_type(event_type);
            }
            return Some(ParsedDate::Range(range));
        }
        self.to_statement()
            .map(|statement| ParsedDate::Value(DateValue::new(statement)))
    }
}
