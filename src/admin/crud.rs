//! Generic create/edit/delete page controller for admin collections.
//!
//! [`CrudPage`] owns the list a view renders, the open form (if any), and the loading/error
//! flags. Mutations are serialized per page; a delete removes the item from the list before
//! the request is sent and puts the previous list back when the request fails.

// self
use crate::{
	_prelude::*,
	admin::failure_message,
	content::{BlogPost, Event, Resource, ResourceForm},
	context::AppContext,
	error::ValidationError,
	repo::Repository,
};

/// Toast and prompt text for one admin collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CrudMessages {
	/// Shown after a successful create.
	pub created: &'static str,
	/// Shown after a successful update.
	pub updated: &'static str,
	/// Shown after a successful delete.
	pub deleted: &'static str,
	/// Shown when a delete fails; never replaced by backend detail.
	pub delete_failed: &'static str,
	/// Fallback when a save fails without backend detail.
	pub save_failed: &'static str,
	/// Fallback when loading fails without backend detail.
	pub load_failed: &'static str,
	/// Confirmation prompt before deleting.
	pub delete_prompt: &'static str,
}

/// A [`Resource`] managed from the admin area.
pub trait AdminResource
where
	Self: Resource,
{
	/// User-facing text for this collection.
	const MESSAGES: CrudMessages;
}
impl AdminResource for BlogPost {
	const MESSAGES: CrudMessages = CrudMessages {
		created: "Blog post created",
		updated: "Blog post updated",
		deleted: "Blog post deleted",
		delete_failed: "Failed to delete post",
		save_failed: "Failed to save blog post",
		load_failed: "Failed to load blog posts",
		delete_prompt: "Delete this blog post permanently?",
	};
}
impl AdminResource for Event {
	const MESSAGES: CrudMessages = CrudMessages {
		created: "Event created successfully",
		updated: "Event updated successfully",
		deleted: "Event deleted",
		delete_failed: "Failed to delete event",
		save_failed: "Failed to save event",
		load_failed: "Failed to load events",
		delete_prompt: "Delete this event permanently?",
	};
}

/// Blog posts admin page.
pub type BlogAdmin = CrudPage<BlogPost>;
/// Events admin page.
pub type EventsAdmin = CrudPage<Event>;

/// Open create/edit form.
#[derive(Clone, Debug, PartialEq)]
pub struct FormState<R>
where
	R: Resource,
{
	/// Id of the record being edited; `None` when creating.
	pub editing: Option<String>,
	/// Current inputs.
	pub values: R::Form,
	/// A submit is in flight.
	pub saving: bool,
}
impl<R> FormState<R>
where
	R: Resource,
{
	/// Whether submitting will update an existing record.
	pub fn is_edit(&self) -> bool {
		self.editing.is_some()
	}
}

/// Renderable page state.
#[derive(Clone, Debug)]
pub struct CrudState<R>
where
	R: Resource,
{
	/// Collection in backend order.
	pub items: Vec<R>,
	/// A fetch is in flight.
	pub loading: bool,
	/// Banner text from the last failed fetch.
	pub error: Option<String>,
	/// Open form, if shown.
	pub form: Option<FormState<R>>,
}
impl<R> Default for CrudState<R>
where
	R: Resource,
{
	fn default() -> Self {
		Self { items: Vec::new(), loading: false, error: None, form: None }
	}
}

/// Result of [`CrudPage::delete`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
	/// The user declined the confirmation prompt.
	Cancelled,
	/// The backend confirmed the delete.
	Deleted,
}

/// Admin page controller for one collection.
pub struct CrudPage<R>
where
	R: AdminResource,
{
	ctx: AppContext,
	repo: Arc<dyn Repository<R>>,
	state: Arc<RwLock<CrudState<R>>>,
	ops: Arc<AsyncMutex<()>>,
}
impl<R> CrudPage<R>
where
	R: AdminResource,
{
	/// Creates a page backed by the REST API.
	pub fn new(ctx: &AppContext) -> Self {
		Self::with_repository(ctx, ctx.api_repository::<R>())
	}

	/// Creates a page backed by an arbitrary repository.
	pub fn with_repository(ctx: &AppContext, repo: Arc<dyn Repository<R>>) -> Self {
		Self {
			ctx: ctx.clone(),
			repo,
			state: Arc::new(RwLock::new(CrudState::default())),
			ops: Arc::new(AsyncMutex::new(())),
		}
	}

	/// Snapshot of the page state.
	pub fn state(&self) -> CrudState<R> {
		self.state.read().clone()
	}

	/// Current items.
	pub fn items(&self) -> Vec<R> {
		self.state.read().items.clone()
	}

	/// Open form, if any.
	pub fn form(&self) -> Option<FormState<R>> {
		self.state.read().form.clone()
	}

	/// Fetches the collection, replacing the list.
	///
	/// On failure the list is kept, an error banner is set, and an error toast is shown.
	pub async fn load(&self) -> Result<()> {
		let _op = self.ops.lock().await;

		self.refetch().await
	}

	/// Shows a blank create form.
	pub fn open_create(&self) {
		self.state.write().form =
			Some(FormState { editing: None, values: R::Form::blank(), saving: false });
	}

	/// Shows the edit form pre-filled from the listed item `id`.
	pub fn edit(&self, id: &str) -> Result<()> {
		let mut state = self.state.write();
		let record = state
			.items
			.iter()
			.find(|item| item.id() == id)
			.ok_or_else(|| Error::NotFound { resource: R::LABEL, id: id.to_owned() })?;
		let values = R::Form::from_record(record);

		state.form = Some(FormState { editing: Some(id.to_owned()), values, saving: false });

		Ok(())
	}

	/// Applies `change` to the open form's inputs. Returns `false` when no form is open.
	pub fn update_form(&self, change: impl FnOnce(&mut R::Form)) -> bool {
		match self.state.write().form.as_mut() {
			Some(form) => {
				change(&mut form.values);

				true
			},
			None => false,
		}
	}

	/// Hides and resets the form.
	pub fn cancel(&self) {
		self.state.write().form = None;
	}

	/// Validates and saves the open form.
	///
	/// Editing issues `PUT /<collection>/{id}`; creating issues `POST /<collection>`. On
	/// success the form is closed and the collection refetched. On failure the form stays open
	/// with its inputs.
	pub async fn submit(&self) -> Result<R> {
		let _op = self.ops.lock().await;
		let (editing, payload) = {
			let mut state = self.state.write();
			let form = state.form.as_mut().ok_or(ValidationError::FormClosed)?;
			let payload = match form.values.to_payload() {
				Ok(payload) => payload,
				Err(e) => {
					drop(state);

					self.ctx.notifier().error(&e.to_string());

					return Err(e.into());
				},
			};

			form.saving = true;

			(form.editing.clone(), payload)
		};
		let saved = match &editing {
			Some(id) => self.repo.update(id, &payload).await,
			None => self.repo.create(&payload).await,
		};

		match saved {
			Ok(record) => {
				let messages = R::MESSAGES;

				self.ctx
					.notifier()
					.success(if editing.is_some() { messages.updated } else { messages.created });
				self.state.write().form = None;

				// Refetch failures are reported by the refetch itself.
				let _ = self.refetch().await;

				Ok(record)
			},
			Err(e) => {
				if let Some(form) = self.state.write().form.as_mut() {
					form.saving = false;
				}

				tracing::error!(error = %e, collection = R::COLLECTION, "save failed");
				self.ctx.notifier().error(&failure_message(&e, R::MESSAGES.save_failed));

				Err(e)
			},
		}
	}

	/// Deletes `id` after confirmation, optimistically.
	pub async fn delete(&self, id: &str) -> Result<DeleteOutcome> {
		let messages = R::MESSAGES;

		if !self.ctx.confirm().confirm(messages.delete_prompt) {
			return Ok(DeleteOutcome::Cancelled);
		}

		let _op = self.ops.lock().await;
		let previous = {
			let mut state = self.state.write();
			let previous = state.items.clone();

			state.items.retain(|item| item.id() != id);

			previous
		};

		match self.repo.delete(id).await {
			Ok(()) => {
				self.ctx.notifier().success(messages.deleted);

				Ok(DeleteOutcome::Deleted)
			},
			Err(e) => {
				tracing::error!(error = %e, collection = R::COLLECTION, id, "delete failed");

				self.state.write().items = previous;
				self.ctx.notifier().error(messages.delete_failed);

				Err(e)
			},
		}
	}

	async fn refetch(&self) -> Result<()> {
		{
			let mut state = self.state.write();

			state.loading = true;
			state.error = None;
		}

		let fetched = self.repo.list().await;
		let mut state = self.state.write();

		state.loading = false;

		match fetched {
			Ok(items) => {
				state.items = items;

				Ok(())
			},
			Err(e) => {
				let message = failure_message(&e, R::MESSAGES.load_failed);

				state.error = Some(message.clone());
				drop(state);

				tracing::error!(error = %e, collection = R::COLLECTION, "fetch failed");
				self.ctx.notifier().error(&message);

				Err(e)
			},
		}
	}
}
impl<R> Clone for CrudPage<R>
where
	R: AdminResource,
{
	fn clone(&self) -> Self {
		Self {
			ctx: self.ctx.clone(),
			repo: self.repo.clone(),
			state: self.state.clone(),
			ops: self.ops.clone(),
		}
	}
}
impl<R> Debug for CrudPage<R>
where
	R: AdminResource,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let state = self.state.read();

		f.debug_struct("CrudPage")
			.field("collection", &R::COLLECTION)
			.field("items", &state.items.len())
			.field("form_open", &state.form.is_some())
			.finish()
	}
}
