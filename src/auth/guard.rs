//! Admin route guard.
//!
//! A guard is mounted once per protected view. It starts in [`GuardState::Loading`], resolves
//! to [`GuardState::Authenticated`] or [`GuardState::Unauthenticated`], and from then on only
//! moves between those two as the stored token changes. While not authenticated, the protected
//! view is never constructed; the shell is redirected to the login route instead.

// crates.io
use tokio::sync::broadcast::error::RecvError;
// self
use crate::{
	_prelude::*,
	auth::TOKEN_KEY,
	context::AppContext,
	shell::NavigationMode,
	site::{ApiContentProvider, ContentProvider},
	store::StorageEvents,
};

/// Boxed future returned by [`IdentityProvider::current_session`].
pub type IdentityFuture<'a> = Pin<Box<dyn Future<Output = Option<IdentitySession>> + 'a + Send>>;

/// Third-party identity session consumed by [`GuardStrategy::Identity`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentitySession {
	/// Provider-specific subject identifier.
	pub subject: String,
	/// Email on the identity, when shared.
	pub email: Option<String>,
}

/// Source of third-party identity sessions.
pub trait IdentityProvider
where
	Self: Send + Sync,
{
	/// Returns the signed-in session, if any.
	fn current_session(&self) -> IdentityFuture<'_>;
}

/// How a guard decides whether the admin is signed in.
#[derive(Clone)]
pub enum GuardStrategy {
	/// A token must be stored; with `validate`, `GET /health` must also succeed with it.
	StoredToken {
		/// Verify the stored token against the backend.
		validate: bool,
	},
	/// An identity provider must report a session.
	Identity(Arc<dyn IdentityProvider>),
}
impl Default for GuardStrategy {
	fn default() -> Self {
		Self::StoredToken { validate: true }
	}
}
impl Debug for GuardStrategy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::StoredToken { validate } => {
				f.debug_struct("StoredToken").field("validate", validate).finish()
			},
			Self::Identity(_) => f.write_str("Identity(..)"),
		}
	}
}

/// Authentication state of a mounted guard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GuardState {
	/// Check in progress; only ever the initial state.
	Loading,
	/// Session present (and valid, when validated).
	Authenticated,
	/// No usable session.
	Unauthenticated,
}

/// What the shell should display for a guarded route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Guarded<V> {
	/// Loading placeholder.
	Loading,
	/// Redirected to this route; nothing to render.
	Redirect(String),
	/// The protected view.
	Render(V),
}
impl<V> Guarded<V> {
	/// Returns the rendered view, if any.
	pub fn into_view(self) -> Option<V> {
		match self {
			Self::Render(view) => Some(view),
			_ => None,
		}
	}
}

/// Guard factory bound to an application context.
#[derive(Clone, Debug)]
pub struct AdminGuard {
	ctx: AppContext,
	strategy: GuardStrategy,
}
impl AdminGuard {
	/// Creates a guard using `strategy`.
	pub fn new(ctx: &AppContext, strategy: GuardStrategy) -> Self {
		Self { ctx: ctx.clone(), strategy }
	}

	/// Mounts the guard for one protected view.
	///
	/// The storage subscription is taken before the first check so a token change racing
	/// with resolution is still observed by [`MountedGuard::next_change`].
	pub fn mount(&self) -> MountedGuard {
		MountedGuard {
			events: self.ctx.session().subscribe(),
			ctx: self.ctx.clone(),
			strategy: self.strategy.clone(),
			state: GuardState::Loading,
		}
	}
}

/// A guard mounted for one protected view.
pub struct MountedGuard {
	ctx: AppContext,
	strategy: GuardStrategy,
	events: StorageEvents,
	state: GuardState,
}
impl MountedGuard {
	/// Current state.
	pub fn state(&self) -> GuardState {
		self.state
	}

	/// Runs the check and records the outcome.
	pub async fn resolve(&mut self) -> GuardState {
		self.state = self.evaluate().await;

		tracing::debug!(state = ?self.state, "admin guard resolved");

		self.state
	}

	/// Decides what to show. `view` is only called when authenticated.
	///
	/// When unauthenticated, the shell is sent to the login route with history replacement,
	/// unless it is already there.
	pub fn render<V>(&self, view: impl FnOnce() -> V) -> Guarded<V> {
		match self.state {
			GuardState::Loading => Guarded::Loading,
			GuardState::Authenticated => Guarded::Render(view()),
			GuardState::Unauthenticated => {
				let login = &self.ctx.config().login_route;
				let navigator = self.ctx.navigator();

				if navigator.current_route().as_deref() != Some(login.as_str()) {
					navigator.navigate(login, NavigationMode::Replace);
				}

				Guarded::Redirect(login.clone())
			},
		}
	}

	/// Waits for the next token change in storage and re-evaluates.
	///
	/// Changes to other keys are ignored. Returns `None` once the storage stops publishing.
	pub async fn next_change(&mut self) -> Option<GuardState> {
		loop {
			match self.events.recv().await {
				Ok(event) if event.key == TOKEN_KEY => break,
				Ok(_) => continue,
				Err(RecvError::Lagged(skipped)) => {
					tracing::debug!(skipped, "admin guard lagged behind storage events");

					break;
				},
				Err(RecvError::Closed) => return None,
			}
		}

		Some(self.resolve().await)
	}

	async fn evaluate(&self) -> GuardState {
		match &self.strategy {
			GuardStrategy::StoredToken { validate } => self.evaluate_token(*validate).await,
			GuardStrategy::Identity(provider) => match provider.current_session().await {
				Some(_) => GuardState::Authenticated,
				None => GuardState::Unauthenticated,
			},
		}
	}

	async fn evaluate_token(&self, validate: bool) -> GuardState {
		match self.ctx.session().token().await {
			Ok(Some(_)) => {},
			Ok(None) => return GuardState::Unauthenticated,
			Err(e) => {
				tracing::warn!(error = %e, "admin guard could not read the stored token");

				return GuardState::Unauthenticated;
			},
		}

		if !validate {
			return GuardState::Authenticated;
		}

		// A 401 here has already cleared the token inside the client.
		let provider = ApiContentProvider::new(self.ctx.client().clone());

		match provider.health().await {
			Ok(_) => GuardState::Authenticated,
			Err(e) => {
				tracing::debug!(error = %e, "admin guard token validation failed");

				GuardState::Unauthenticated
			},
		}
	}
}
impl Debug for MountedGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("MountedGuard")
			.field("strategy", &self.strategy)
			.field("state", &self.state)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		_preludet::{TestHarness, build_test_harness},
		auth::AccessToken,
		shell::Visit,
	};

	struct FixedIdentity(Option<IdentitySession>);
	impl IdentityProvider for FixedIdentity {
		fn current_session(&self) -> IdentityFuture<'_> {
			let session = self.0.clone();

			Box::pin(async move { session })
		}
	}

	fn harness() -> TestHarness {
		// Unroutable; only used by strategies that never reach the network.
		build_test_harness("http://127.0.0.1:9/api")
	}

	#[tokio::test]
	async fn missing_token_redirects_without_rendering() {
		let h = harness();
		let mut mounted =
			AdminGuard::new(&h.ctx, GuardStrategy::StoredToken { validate: true }).mount();

		assert_eq!(mounted.render(|| "dashboard"), Guarded::Loading);
		assert_eq!(mounted.resolve().await, GuardState::Unauthenticated);

		let mut rendered = false;
		let outcome = mounted.render(|| rendered = true);

		assert_eq!(outcome, Guarded::Redirect("/admin/login".into()));
		assert!(!rendered);
		assert_eq!(
			h.navigator.visits(),
			[Visit { route: "/admin/login".into(), mode: NavigationMode::Replace }]
		);

		// Already on the login route: no second navigation.
		let _ = mounted.render(|| ());

		assert_eq!(h.navigator.count("/admin/login"), 1);
	}

	#[tokio::test]
	async fn unvalidated_token_presence_is_enough() {
		let h = harness();

		h.ctx.session().store_token(&AccessToken::new("jwt")).await.expect("Store should succeed.");

		let mut mounted =
			AdminGuard::new(&h.ctx, GuardStrategy::StoredToken { validate: false }).mount();

		assert_eq!(mounted.resolve().await, GuardState::Authenticated);
		assert_eq!(mounted.render(|| 7).into_view(), Some(7));
	}

	#[tokio::test]
	async fn storage_events_flip_state_without_loading() {
		let h = harness();
		let mut mounted =
			AdminGuard::new(&h.ctx, GuardStrategy::StoredToken { validate: false }).mount();

		assert_eq!(mounted.resolve().await, GuardState::Unauthenticated);

		h.ctx.session().store_token(&AccessToken::new("jwt")).await.expect("Store should succeed.");

		assert_eq!(mounted.next_change().await, Some(GuardState::Authenticated));

		h.ctx.session().clear().await.expect("Clear should succeed.");

		assert_eq!(mounted.next_change().await, Some(GuardState::Unauthenticated));
		assert_ne!(mounted.state(), GuardState::Loading);
	}

	#[tokio::test]
	async fn identity_strategy_uses_provider_session() {
		let h = harness();
		let signed_in = Arc::new(FixedIdentity(Some(IdentitySession {
			subject: "user_1".into(),
			email: Some("admin@example.org".into()),
		})));
		let mut mounted = AdminGuard::new(&h.ctx, GuardStrategy::Identity(signed_in)).mount();

		assert_eq!(mounted.resolve().await, GuardState::Authenticated);

		let mut anonymous =
			AdminGuard::new(&h.ctx, GuardStrategy::Identity(Arc::new(FixedIdentity(None)))).mount();

		assert_eq!(anonymous.resolve().await, GuardState::Unauthenticated);
		assert!(anonymous.render(|| ()).into_view().is_none());
	}
}
