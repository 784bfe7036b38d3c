//! Contact messages inbox: read and delete only.

// self
use crate::{
	_prelude::*,
	admin::{AdminResource, CrudMessages, CrudPage, DeleteOutcome},
	content::ContactMessage,
	context::AppContext,
	repo::Repository,
};

impl AdminResource for ContactMessage {
	const MESSAGES: CrudMessages = CrudMessages {
		created: "Message sent",
		updated: "Message updated",
		deleted: "Contact message deleted",
		delete_failed: "Failed to delete message",
		save_failed: "Failed to save message",
		load_failed: "Failed to load messages",
		delete_prompt: "Are you sure you want to delete this message?",
	};
}

/// Admin inbox for contact-form submissions.
#[derive(Clone, Debug)]
pub struct ContactsPage(CrudPage<ContactMessage>);
impl ContactsPage {
	/// Inbox backed by `GET /contact` and `DELETE /contact/{id}`.
	pub fn new(ctx: &AppContext) -> Self {
		Self(CrudPage::new(ctx))
	}

	/// Inbox backed by an arbitrary repository, e.g. the `contacts` storage key.
	pub fn with_repository(ctx: &AppContext, repo: Arc<dyn Repository<ContactMessage>>) -> Self {
		Self(CrudPage::with_repository(ctx, repo))
	}

	/// Fetches the messages.
	pub async fn load(&self) -> Result<()> {
		self.0.load().await
	}

	/// Messages in backend order.
	pub fn messages(&self) -> Vec<ContactMessage> {
		self.0.items()
	}

	/// Banner text from the last failed fetch.
	pub fn error(&self) -> Option<String> {
		self.0.state().error
	}

	/// Deletes a message after confirmation, restoring it if the backend refuses.
	pub async fn delete(&self, id: &str) -> Result<DeleteOutcome> {
		self.0.delete(id).await
	}
}
