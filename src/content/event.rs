//! School events.

// self
use crate::{
	_prelude::*,
	content::{Resource, ResourceForm, require, timestamp},
	error::ValidationError,
};

/// A scheduled event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
	/// Server-assigned identifier.
	pub id: String,
	/// Event name.
	pub title: String,
	/// Description.
	pub description: String,
	/// Start timestamp.
	#[serde(with = "timestamp")]
	pub event_date: OffsetDateTime,
	/// Venue.
	#[serde(default)]
	pub location: String,
	/// Banner image URL.
	#[serde(default)]
	pub image_url: String,
}
impl Event {
	/// Whether the event starts at or after `now`.
	pub fn is_upcoming(&self, now: OffsetDateTime) -> bool {
		self.event_date >= now
	}
}
impl Resource for Event {
	type Form = EventForm;
	type Payload = EventPayload;

	const COLLECTION: &'static str = "/events";
	const LABEL: &'static str = "event";
	const STORAGE_KEY: &'static str = "events";

	fn id(&self) -> &str {
		&self.id
	}

	fn from_payload(id: String, payload: Self::Payload) -> Self {
		let EventPayload { title, description, event_date, location, image_url } = payload;

		Self { id, title, description, event_date, location, image_url }
	}
}

/// Body of `POST /events` and `PUT /events/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
	/// Event name.
	pub title: String,
	/// Description.
	pub description: String,
	/// Start timestamp.
	#[serde(with = "timestamp")]
	pub event_date: OffsetDateTime,
	/// Venue.
	#[serde(default)]
	pub location: String,
	/// Banner image URL.
	#[serde(default)]
	pub image_url: String,
}

/// Admin form state for an event; `event_date` holds the raw `YYYY-MM-DDTHH:MM` input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventForm {
	/// Name input.
	pub title: String,
	/// Description input.
	pub description: String,
	/// `YYYY-MM-DDTHH:MM` input, read as UTC.
	pub event_date: String,
	/// Venue input.
	pub location: String,
	/// Banner image URL input.
	pub image_url: String,
}
impl ResourceForm<Event> for EventForm {
	fn blank() -> Self {
		Self::default()
	}

	fn from_record(record: &Event) -> Self {
		Self {
			title: record.title.clone(),
			description: record.description.clone(),
			event_date: timestamp::datetime_input(record.event_date),
			location: record.location.clone(),
			image_url: record.image_url.clone(),
		}
	}

	fn to_payload(&self) -> Result<EventPayload, ValidationError> {
		require("title", &self.title)?;
		require("description", &self.description)?;
		require("eventDate", &self.event_date)?;

		Ok(EventPayload {
			title: self.title.clone(),
			description: self.description.clone(),
			event_date: timestamp::parse_datetime_input("eventDate", &self.event_date)?,
			location: self.location.clone(),
			image_url: self.image_url.clone(),
		})
	}
}
