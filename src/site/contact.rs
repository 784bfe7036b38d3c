//! Public contact form controller.

// self
use crate::{
	_prelude::*,
	content::{ContactForm, ContactMessage, Resource, ResourceForm},
	context::AppContext,
};

/// Toast shown after the message is accepted.
pub const CONTACT_SENT: &str = "Thank you for contacting us! We'll get back to you soon.";
/// Toast shown when the message could not be sent.
pub const CONTACT_FAILED: &str = "Failed to send message. Please try again.";

/// Contact page: form inputs plus submit.
#[derive(Clone, Debug)]
pub struct ContactPage {
	ctx: AppContext,
	form: Arc<RwLock<ContactForm>>,
	submitting: Arc<AsyncMutex<()>>,
}
impl ContactPage {
	/// Creates an empty form.
	pub fn new(ctx: &AppContext) -> Self {
		Self {
			ctx: ctx.clone(),
			form: Arc::default(),
			submitting: Arc::new(AsyncMutex::new(())),
		}
	}

	/// Current inputs.
	pub fn form(&self) -> ContactForm {
		self.form.read().clone()
	}

	/// Edits the inputs.
	pub fn update(&self, change: impl FnOnce(&mut ContactForm)) {
		change(&mut self.form.write());
	}

	/// Validates and sends the form with one `POST /contact`.
	///
	/// On success the inputs are cleared. On failure they are kept so the visitor can retry.
	pub async fn submit(&self) -> Result<()> {
		let _in_flight = self.submitting.lock().await;
		let submission = match self.form.read().to_payload() {
			Ok(submission) => submission,
			Err(e) => {
				self.ctx.notifier().error(&e.to_string());

				return Err(e.into());
			},
		};
		let body = serde_json::to_value(&submission)
			.map_err(crate::error::ConfigError::Body)
			.map_err(Error::from)?;

		match self.ctx.client().send(Method::POST, ContactMessage::COLLECTION, Some(body)).await {
			Ok(_) => {
				*self.form.write() = ContactForm::blank();

				self.ctx.notifier().success(CONTACT_SENT);

				Ok(())
			},
			Err(e) => {
				tracing::error!(error = %e, "contact form submission failed");
				self.ctx.notifier().error(CONTACT_FAILED);

				Err(e)
			},
		}
	}
}
