//! Explicit application context shared by the guard, admin pages, and site loaders.

// self
use crate::{
	_prelude::*,
	auth::Session,
	config::ClientConfig,
	content::Resource,
	http::ApiClient,
	repo::{ApiRepository, Repository},
	shell::{Confirm, DecliningConfirm, HistoryNavigator, Navigator, Notifier, TracingNotifier},
	store::{MemoryStorage, Storage},
};

/// Everything a page controller needs: configuration, the token session, the API client, and
/// the UI shell seams.
#[derive(Clone)]
pub struct AppContext {
	config: Arc<ClientConfig>,
	storage: Arc<dyn Storage>,
	session: Session,
	client: ApiClient,
	navigator: Arc<dyn Navigator>,
	notifier: Arc<dyn Notifier>,
	confirm: Arc<dyn Confirm>,
}
impl AppContext {
	/// Starts a builder with in-memory defaults for every collaborator.
	pub fn builder(config: ClientConfig) -> AppContextBuilder {
		AppContextBuilder {
			config,
			storage: None,
			navigator: None,
			notifier: None,
			confirm: None,
			http: None,
		}
	}

	/// Active configuration.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Persistent storage shared with the session.
	pub fn storage(&self) -> &Arc<dyn Storage> {
		&self.storage
	}

	/// Token session.
	pub fn session(&self) -> &Session {
		&self.session
	}

	/// API client.
	pub fn client(&self) -> &ApiClient {
		&self.client
	}

	/// Navigation seam.
	pub fn navigator(&self) -> &Arc<dyn Navigator> {
		&self.navigator
	}

	/// Toast seam.
	pub fn notifier(&self) -> &Arc<dyn Notifier> {
		&self.notifier
	}

	/// Confirmation dialog seam.
	pub fn confirm(&self) -> &Arc<dyn Confirm> {
		&self.confirm
	}

	/// REST repository for `R`, sharing this context's client.
	pub fn api_repository<R>(&self) -> Arc<dyn Repository<R>>
	where
		R: Resource,
	{
		Arc::new(ApiRepository::<R>::new(self.client.clone()))
	}
}
impl Debug for AppContext {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AppContext")
			.field("base_url", &self.config.base_url.as_str())
			.field("login_route", &self.config.login_route)
			.finish_non_exhaustive()
	}
}

/// Builder for [`AppContext`].
pub struct AppContextBuilder {
	config: ClientConfig,
	storage: Option<Arc<dyn Storage>>,
	navigator: Option<Arc<dyn Navigator>>,
	notifier: Option<Arc<dyn Notifier>>,
	confirm: Option<Arc<dyn Confirm>>,
	http: Option<ReqwestClient>,
}
impl AppContextBuilder {
	/// Persistent storage for the token; defaults to [`MemoryStorage`].
	pub fn storage(mut self, storage: Arc<dyn Storage>) -> Self {
		self.storage = Some(storage);

		self
	}

	/// Navigation seam; defaults to a [`HistoryNavigator`] starting at the dashboard route.
	pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
		self.navigator = Some(navigator);

		self
	}

	/// Toast seam; defaults to [`TracingNotifier`].
	pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
		self.notifier = Some(notifier);

		self
	}

	/// Confirmation seam; defaults to [`DecliningConfirm`], so nothing is deleted unasked.
	pub fn confirm(mut self, confirm: Arc<dyn Confirm>) -> Self {
		self.confirm = Some(confirm);

		self
	}

	/// Reuses an existing reqwest client instead of building one from the config.
	pub fn http_client(mut self, http: ReqwestClient) -> Self {
		self.http = Some(http);

		self
	}

	/// Wires the collaborators together.
	pub fn build(self) -> Result<AppContext> {
		let Self { config, storage, navigator, notifier, confirm, http } = self;
		let storage = storage.unwrap_or_else(|| Arc::new(MemoryStorage::default()));
		let navigator = navigator.unwrap_or_else(|| {
			Arc::new(HistoryNavigator::starting_at(config.dashboard_route.clone()))
		});
		let notifier = notifier.unwrap_or_else(|| Arc::new(TracingNotifier));
		let confirm = confirm.unwrap_or_else(|| Arc::new(DecliningConfirm));
		let session = Session::new(storage.clone());
		let client = match http {
			Some(http) => {
				ApiClient::with_http_client(http, config.clone(), session.clone(), navigator.clone())
			},
			None => ApiClient::new(config.clone(), session.clone(), navigator.clone())?,
		};

		Ok(AppContext {
			config: Arc::new(config),
			storage,
			session,
			client,
			navigator,
			notifier,
			confirm,
		})
	}
}
impl Debug for AppContextBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AppContextBuilder").field("config", &self.config).finish_non_exhaustive()
	}
}
