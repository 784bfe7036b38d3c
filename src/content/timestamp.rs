//! Timestamp (de)serialization and form-input date formats.
//!
//! The backend emits RFC 3339, but records written by older deployments carry naive ISO
//! timestamps without an offset. Those are read as UTC.

// crates.io
use serde::{Deserializer, Serializer, de::Error as _};
use time::{
	Date, PrimitiveDateTime,
	format_description::{BorrowedFormatItem, well_known::Rfc3339},
	macros::format_description,
};
// self
use crate::{_prelude::*, error::ValidationError};

const NAIVE: &[BorrowedFormatItem<'static>] = format_description!(
	"[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
);
const DATE_INPUT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const DATETIME_INPUT: &[BorrowedFormatItem<'static>] =
	format_description!("[year]-[month]-[day]T[hour]:[minute]");

/// Serializes as RFC 3339.
pub fn serialize<S>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	let text = value.format(&Rfc3339).map_err(serde::ser::Error::custom)?;

	serializer.serialize_str(&text)
}

/// Deserializes RFC 3339, falling back to naive ISO timestamps read as UTC.
pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = String::deserialize(deserializer)?;

	parse_lenient(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp `{raw}`")))
}

/// Parses RFC 3339 or a naive ISO timestamp (as UTC).
pub fn parse_lenient(raw: &str) -> Option<OffsetDateTime> {
	let raw = raw.trim();

	OffsetDateTime::parse(raw, &Rfc3339)
		.ok()
		.or_else(|| PrimitiveDateTime::parse(raw, NAIVE).ok().map(PrimitiveDateTime::assume_utc))
}

/// Formats the calendar date for a `YYYY-MM-DD` input.
pub fn date_input(value: OffsetDateTime) -> String {
	let date = value.to_offset(time::UtcOffset::UTC).date();

	date.format(DATE_INPUT).unwrap_or_default()
}

/// Formats the UTC date and time for a `YYYY-MM-DDTHH:MM` input.
pub fn datetime_input(value: OffsetDateTime) -> String {
	let utc = value.to_offset(time::UtcOffset::UTC);

	PrimitiveDateTime::new(utc.date(), utc.time()).format(DATETIME_INPUT).unwrap_or_default()
}

/// Parses a `YYYY-MM-DD` input as midnight UTC.
pub fn parse_date_input(field: &'static str, raw: &str) -> Result<OffsetDateTime, ValidationError> {
	Date::parse(raw.trim(), DATE_INPUT)
		.map(|date| date.midnight().assume_utc())
		.map_err(|_| ValidationError::InvalidDate { field, value: raw.to_owned() })
}

/// Parses a `YYYY-MM-DDTHH:MM` input (seconds tolerated) as UTC.
pub fn parse_datetime_input(
	field: &'static str,
	raw: &str,
) -> Result<OffsetDateTime, ValidationError> {
	let trimmed = raw.trim();

	PrimitiveDateTime::parse(trimmed, DATETIME_INPUT)
		.or_else(|_| PrimitiveDateTime::parse(trimmed, NAIVE))
		.map(PrimitiveDateTime::assume_utc)
		.map_err(|_| ValidationError::InvalidDate { field, value: raw.to_owned() })
}

/// Optional-field variant for records where the timestamp may be absent.
pub mod option {
	// crates.io
	use serde::{Deserializer, Serializer};
	// self
	use crate::_prelude::*;

	/// Serializes `Some` as RFC 3339 and `None` as `null`.
	pub fn serialize<S>(value: &Option<OffsetDateTime>, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match value {
			Some(value) => super::serialize(value, serializer),
			None => serializer.serialize_none(),
		}
	}

	/// Deserializes an optional lenient timestamp.
	pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
	where
		D: Deserializer<'de>,
	{
		Option::<String>::deserialize(deserializer)?
			.map(|raw| {
				super::parse_lenient(&raw).ok_or_else(|| {
					<D::Error as serde::de::Error>::custom(format!("invalid timestamp `{raw}`"))
				})
			})
			.transpose()
	}
}
