//! Contact-form submissions.

// self
use crate::{
	_prelude::*,
	content::{Resource, ResourceForm, require, timestamp},
	error::ValidationError,
};

/// A message left through the public contact form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
	/// Server-assigned identifier.
	pub id: String,
	/// Sender name.
	pub name: String,
	/// Sender email.
	pub email: String,
	/// Sender phone.
	#[serde(default)]
	pub phone: String,
	/// Subject line.
	pub subject: String,
	/// Body.
	pub message: String,
	/// Receipt timestamp.
	#[serde(with = "timestamp")]
	pub date: OffsetDateTime,
}
impl Resource for ContactMessage {
	type Form = ContactForm;
	type Payload = ContactSubmission;

	const COLLECTION: &'static str = "/contact";
	const LABEL: &'static str = "contact message";
	const STORAGE_KEY: &'static str = "contacts";

	fn id(&self) -> &str {
		&self.id
	}

	fn from_payload(id: String, payload: Self::Payload) -> Self {
		let ContactSubmission { name, email, phone, subject, message } = payload;

		Self { id, name, email, phone, subject, message, date: OffsetDateTime::now_utc() }
	}
}

/// Body of `POST /contact`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
	/// Sender name.
	pub name: String,
	/// Sender email.
	pub email: String,
	/// Sender phone.
	#[serde(default)]
	pub phone: String,
	/// Subject line.
	pub subject: String,
	/// Body.
	pub message: String,
}

/// Contact form inputs. Values are submitted exactly as entered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
	/// Name input.
	pub name: String,
	/// Email input.
	pub email: String,
	/// Phone input (optional).
	pub phone: String,
	/// Subject input.
	pub subject: String,
	/// Message input.
	pub message: String,
}
impl ContactForm {
	/// Whether every input is empty.
	pub fn is_empty(&self) -> bool {
		*self == Self::default()
	}
}
impl ResourceForm<ContactMessage> for ContactForm {
	fn blank() -> Self {
		Self::default()
	}

	fn from_record(record: &ContactMessage) -> Self {
		Self {
			name: record.name.clone(),
			email: record.email.clone(),
			phone: record.phone.clone(),
			subject: record.subject.clone(),
			message: record.message.clone(),
		}
	}

	fn to_payload(&self) -> Result<ContactSubmission, ValidationError> {
		require("name", &self.name)?;
		require("email", &self.email)?;
		require("subject", &self.subject)?;
		require("message", &self.message)?;

		Ok(ContactSubmission {
			name: self.name.clone(),
			email: self.email.clone(),
			phone: self.phone.clone(),
			subject: self.subject.clone(),
			message: self.message.clone(),
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn submission_keeps_values_verbatim() {
		let form = ContactForm {
			name: " Ada ".into(),
			email: "ada@example.org".into(),
			phone: String::new(),
			subject: "Volunteering".into(),
			message: "How can I help?\n".into(),
		};
		let payload = form.to_payload().expect("Complete form should validate.");

		assert_eq!(payload.name, " Ada ");
		assert_eq!(payload.message, "How can I help?\n");
		assert_eq!(
			serde_json::to_value(&payload).expect("Payload should serialize."),
			serde_json::json!({
				"name": " Ada ",
				"email": "ada@example.org",
				"phone": "",
				"subject": "Volunteering",
				"message": "How can I help?\n"
			})
		);
	}

	#[test]
	fn phone_is_optional_but_subject_is_not() {
		let form = ContactForm {
			name: "Ada".into(),
			email: "ada@example.org".into(),
			message: "Hello".into(),
			..Default::default()
		};

		assert_eq!(form.to_payload(), Err(ValidationError::MissingField { field: "subject" }));
		assert!(!form.is_empty());
		assert!(ContactForm::blank().is_empty());
	}
}
