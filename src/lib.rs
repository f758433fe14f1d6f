//! `metadate` normalizes the date statements found in bibliographic and
//! archival metadata into a canonical, sortable, precision-aware model.
//!
//! Source records state dates every way humans ever have: ISO 8601 and
//! W3CDTF strings, MARC fixed fields with placeholder digits, EDTF
//! expressions, US slash dates, Roman numerals, century and decade
//! shorthand, BCE statements, and years buried inside free prose. The
//! crate funnels all of them through one pipeline:
//!
//! 1. **Detection**: an ordered chain of pattern detectors classifies
//!    undeclared text and rewrites it into an EDTF-compatible
//!    normalized form.
//! 2. **Resolution** ([`resolver`]): the normalized form (or the raw
//!    text, when an [`Encoding`] was declared) is parsed into a
//!    [`CalendricalValue`] carrying its own [`Precision`].
//! 3. **Derivation**: from the resolved value a [`DateValue`] exposes a
//!    lexicographically chronological sort key, display decoding capped
//!    to allowed precisions, qualifier markup, and a canonical base
//!    value for de-duplication.
//!
//! [`DateRange`] composes two role-tagged endpoint values, [`best_date`]
//! selects the preferred candidate among several statements for one
//! event, and [`DateDescription`] deserializes the attribute maps found
//! in descriptive-metadata documents.
//!
//! ```
//! use metadate::{DateValue, DecodeOptions, RawDateStatement};
//!
//! let date = DateValue::new(RawDateStatement::new("12/1/99"));
//! assert!(date.parsed());
//! assert_eq!(date.sort_key(), "1999-12-01");
//! assert_eq!(
//!     date.decoded_value(&DecodeOptions::default()),
//!     Some("December 1, 1999".to_owned())
//! );
//! ```
//!
//! Resolution is pure and memoized per value; all public types are
//! `Send + Sync` and safe to share across threads.

pub mod calendrical;
pub mod decode;
pub mod description;
mod detectors;
pub mod error;
pub mod range;
pub mod resolver;
pub mod select;
mod sort_key;
pub mod statement;
mod utils;

#[doc(inline)]
pub use calendrical::{CalendricalValue, CivilDate, Precision, Season};
#[doc(inline)]
pub use decode::{DecodeOptions, DEFAULT_PRECISIONS};
#[doc(inline)]
pub use description::DateDescription;
#[doc(inline)]
pub use error::DateError;
#[doc(inline)]
pub use range::DateRange;
#[doc(inline)]
pub use resolver::Encoding;
#[doc(inline)]
pub use select::{best_date, ParsedDate};
#[doc(inline)]
pub use statement::{DateValue, Qualifier, RawDateStatement, Role};

/// The crate's result type.
pub type DateResult<T> = Result<T, DateError>;
