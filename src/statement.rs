//! Date statements and their resolved values.
//!
//! A [`RawDateStatement`] is one metadata occurrence: the raw text plus
//! whatever encoding, qualifier, role, and status metadata accompanied
//! it. A [`DateValue`] wraps a statement with a lazily resolved
//! [`CalendricalValue`]; resolution is pure and memoized, so a value is
//! parsed at most once and never re-resolved.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::OnceCell;

use crate::calendrical::{CalendricalValue, Precision};
use crate::decode::{self, DecodeOptions};
use crate::resolver::{self, Encoding};
use crate::{detectors, sort_key};

/// A certainty modifier on a date statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualifier {
    Approximate,
    Questionable,
    Inferred,
}

/// A parsing error for [`Qualifier`].
#[derive(Debug, Clone, Copy)]
pub struct ParseQualifierError;

impl fmt::Display for ParseQualifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid Qualifier")
    }
}

impl FromStr for Qualifier {
    type Err = ParseQualifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approximate" => Ok(Self::Approximate),
            "questionable" => Ok(Self::Questionable),
            "inferred" => Ok(Self::Inferred),
            _ => Err(ParseQualifierError),
        }
    }
}

/// The endpoint role a statement plays inside a structured range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Start,
    End,
}

/// A parsing error for [`Role`].
#[derive(Debug, Clone, Copy)]
pub struct ParseRoleError;

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid Role")
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "end" => Ok(Self::End),
            _ => Err(ParseRoleError),
        }
    }
}

/// One immutable date statement as it occurred in the source metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDateStatement {
    text: String,
    encoding: Option<Encoding>,
    qualifier: Option<Qualifier>,
    role: Option<Role>,
    primary: bool,
    event_type: Option<String>,
}

impl RawDateStatement {
    /// Creates a statement from its raw text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            encoding: None,
            qualifier: None,
            role: None,
            primary: false,
            event_type: None,
        }
    }

    /// Sets the declared encoding.
    #[must_use]
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Sets the certainty qualifier.
    #[must_use]
    pub fn with_qualifier(mut self, qualifier: Qualifier) -> Self {
        self.qualifier = Some(qualifier);
        self
    }

    /// Sets the range-endpoint role.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Marks the statement as the primary one for its event.
    #[must_use]
    pub fn with_primary(mut self, primary: bool) -> Self {
        self.primary = primary;
        self
    }

    /// Sets the free-text event type ("publication", "creation", ...).
    #[must_use]
    pub fn with_event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    /// The raw text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The declared encoding, if any.
    pub fn encoding(&self) -> Option<Encoding> {
        self.encoding
    }

    /// The certainty qualifier, if any.
    pub fn qualifier(&self) -> Option<Qualifier> {
        self.qualifier
    }

    /// The endpoint role, if any.
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Whether the statement was marked primary.
    pub fn is_primary(&self) -> bool {
        self.primary
    }

    /// The event type, if any.
    pub fn event_type(&self) -> Option<&str> {
        self.event_type.as_deref()
    }
}

/// The outcome of resolving one statement, computed once.
#[derive(Debug, Clone)]
struct Resolution {
    /// The EDTF-compatible normalized form, when one was produced.
    normalized: Option<String>,
    value: Option<CalendricalValue>,
}

/// A date statement with its lazily resolved calendrical value.
#[derive(Debug, Clone)]
pub struct DateValue {
    statement: RawDateStatement,
    resolution: OnceCell<Resolution>,
}

impl DateValue {
    /// Wraps a statement. No parsing happens until a derived property is
    /// first requested.
    pub fn new(statement: RawDateStatement) -> Self {
        Self {
            statement,
            resolution: OnceCell::new(),
        }
    }

    /// The underlying statement.
    pub fn statement(&self) -> &RawDateStatement {
        &self.statement
    }

    fn resolution(&self) -> &Resolution {
        self.resolution.get_or_init(|| self.resolve())
    }

    fn resolve(&self) -> Resolution {
        let sanitized = detectors::sanitize(self.statement.text());
        if sanitized.is_empty() {
            return Resolution {
                normalized: None,
                value: None,
            };
        }

        if let Some(encoding) = self.statement.encoding() {
            // A declared encoding bypasses detection entirely.
            let value = resolver::resolve(&sanitized, encoding);
            return Resolution {
                normalized: value.is_some().then(|| sanitized.clone()),
                value,
            };
        }

        if let Some((_, normalized)) = detectors::detect(&sanitized) {
            let value = resolver::resolve(&normalized, Encoding::Edtf);
            return Resolution {
                normalized: value.is_some().then_some(normalized),
                value,
            };
        }
        if detectors::unparseable(&sanitized) {
            return Resolution {
                normalized: None,
                value: None,
            };
        }

        let fallback = detectors::fallback_normalize(&sanitized);
        let value = resolver::resolve(&fallback, Encoding::Edtf);
        Resolution {
            normalized: value.is_some().then_some(fallback),
            value,
        }
    }

    /// Whether the statement resolved to a calendrical value.
    pub fn parsed(&self) -> bool {
        self.resolution().value.is_some()
    }

    /// The resolved value, if any.
    pub fn value(&self) -> Option<&CalendricalValue> {
        self.resolution().value.as_ref()
    }

    /// The resolved precision, if parsed.
    pub fn precision(&self) -> Option<Precision> {
        self.value().map(CalendricalValue::precision)
    }

    /// The chronological sort key. Unparsable statements yield the empty
    /// string, which sorts first; filter on [`Self::parsed`] to exclude
    /// them.
    pub fn sort_key(&self) -> String {
        self.value().map(sort_key::encode).unwrap_or_default()
    }

    /// Decodes the value for display per the given options.
    pub fn decoded_value(&self, options: &DecodeOptions<'_>) -> Option<String> {
        let trimmed = self.statement.text().trim();
        let Some(value) = self.value() else {
            if options.ignore_unparseable {
                return None;
            }
            return Some(trimmed.to_owned());
        };
        if options.prefer_original_text
            && self.statement.encoding().is_none()
            && !decode::is_simple_numeric(trimmed)
        {
            return Some(trimmed.to_owned());
        }
        Some(decode::decode(value, options.allowed_precisions))
    }

    /// The decoded value wrapped in its qualifier markup.
    pub fn qualified_value(&self) -> Option<String> {
        let decoded = self.decoded_value(&DecodeOptions::default())?;
        match self.statement.qualifier() {
            Some(qualifier) => Some(decode::qualify(&decoded, qualifier)),
            None => Some(decoded),
        }
    }

    /// A canonical digit form used to detect duplicate statements
    /// regardless of formatting. Placeholder digits are preserved, so
    /// "19uu" never collides with "1900-01-01".
    pub fn base_value(&self) -> String {
        match &self.resolution().normalized {
            Some(normalized) => normalized.clone(),
            None => detectors::sanitize(self.statement.text()),
        }
    }

    // Pass-through accessors.

    /// The raw text.
    pub fn text(&self) -> &str {
        self.statement.text()
    }

    /// The declared encoding, if any.
    pub fn encoding(&self) -> Option<Encoding> {
        self.statement.encoding()
    }

    /// The certainty qualifier, if any.
    pub fn qualifier(&self) -> Option<Qualifier> {
        self.statement.qualifier()
    }

    /// The endpoint role, if any.
    pub fn role(&self) -> Option<Role> {
        self.statement.role()
    }

    /// Whether the statement was marked primary.
    pub fn is_primary(&self) -> bool {
        self.statement.is_primary()
    }

    /// The event type, if any.
    pub fn event_type(&self) -> Option<&str> {
        self.statement.event_type()
    }
}

impl From<RawDateStatement> for DateValue {
    fn from(statement: RawDateStatement) -> Self {
        Self::new(statement)
    }
}
