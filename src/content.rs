//! Content records, submission payloads, and the form models that edit them.
//!
//! Wire names are camelCase and timestamps are RFC 3339, matching the REST backend.

pub mod blog;
pub mod contact;
pub mod event;
pub mod pages;
pub mod timestamp;

pub use blog::*;
pub use contact::*;
pub use event::*;
pub use pages::*;

// self
use crate::{_prelude::*, error::ValidationError};

/// A content collection exposed as a REST resource.
pub trait Resource
where
	Self: 'static + Clone + Debug + Send + Sync + Serialize + DeserializeOwned,
{
	/// Body submitted on create and update.
	type Payload: 'static + Clone + Debug + Send + Sync + Serialize + DeserializeOwned;
	/// Form model that produces [`Resource::Payload`].
	type Form: ResourceForm<Self>;

	/// Collection path under the API base, e.g. `/blog`.
	const COLLECTION: &'static str;
	/// Local storage key used by the early, storage-backed variant.
	const STORAGE_KEY: &'static str;
	/// Human-readable singular label.
	const LABEL: &'static str;

	/// Server-assigned identifier.
	fn id(&self) -> &str;

	/// Builds a record from a payload and a locally assigned id.
	fn from_payload(id: String, payload: Self::Payload) -> Self;

	/// Path of one item, e.g. `/blog/42`.
	fn item_path(id: &str) -> String {
		format!("{}/{id}", Self::COLLECTION)
	}
}

/// Editable form state for a [`Resource`].
pub trait ResourceForm<R>
where
	Self: 'static + Clone + Debug + PartialEq + Send + Sync,
	R: Resource,
{
	/// Empty form for creating a new record.
	fn blank() -> Self;

	/// Form pre-filled with the stored values of `record`.
	fn from_record(record: &R) -> Self;

	/// Validates required fields and converts the inputs into a payload.
	fn to_payload(&self) -> Result<R::Payload, ValidationError>;
}

/// Fails with [`ValidationError::MissingField`] when `value` is blank.
pub(crate) fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
	if value.trim().is_empty() {
		Err(ValidationError::MissingField { field })
	} else {
		Ok(())
	}
}
