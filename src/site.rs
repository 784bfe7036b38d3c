//! Public site: read-only content and the contact form.
//!
//! Every public page reads through one [`ContentProvider`]. Page loaders fold the result into a
//! [`PageState`]. Listing failures are logged and rendered as an empty listing, while a detail
//! page that cannot be fetched is rendered as not found.

pub mod contact;

pub use contact::*;

// self
use crate::{
	_prelude::*,
	content::{
		AboutContent, BlogPost, Event, GovernanceContent, HealthStatus, HomeStats, Partner,
		Program, Resource, VisionContent,
	},
	context::AppContext,
	http::ApiClient,
};

/// Boxed future returned by [`ContentProvider`] operations.
pub type ContentFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Read access to everything the public pages display.
pub trait ContentProvider
where
	Self: Send + Sync,
{
	/// All blog posts.
	fn blog_posts(&self) -> ContentFuture<'_, Vec<BlogPost>>;

	/// One blog post.
	fn blog_post<'a>(&'a self, id: &'a str) -> ContentFuture<'a, BlogPost>;

	/// All events.
	fn events(&self) -> ContentFuture<'_, Vec<Event>>;

	/// One event.
	fn event<'a>(&'a self, id: &'a str) -> ContentFuture<'a, Event>;

	/// Programs.
	fn programs(&self) -> ContentFuture<'_, Vec<Program>>;

	/// Memberships and partnerships.
	fn partnerships(&self) -> ContentFuture<'_, Vec<Partner>>;

	/// Vision, mission and values.
	fn vision(&self) -> ContentFuture<'_, VisionContent>;

	/// Governance structure.
	fn governance(&self) -> ContentFuture<'_, GovernanceContent>;

	/// Home-page figures.
	fn home_stats(&self) -> ContentFuture<'_, HomeStats>;

	/// About-page content.
	fn about(&self) -> ContentFuture<'_, AboutContent>;

	/// Backend health.
	fn health(&self) -> ContentFuture<'_, HealthStatus>;
}

/// [`ContentProvider`] over the REST API.
#[derive(Clone, Debug)]
pub struct ApiContentProvider {
	client: ApiClient,
}
impl ApiContentProvider {
	/// Wraps a client.
	pub fn new(client: ApiClient) -> Self {
		Self { client }
	}
}
impl ContentProvider for ApiContentProvider {
	fn blog_posts(&self) -> ContentFuture<'_, Vec<BlogPost>> {
		Box::pin(self.client.get(BlogPost::COLLECTION))
	}

	fn blog_post<'a>(&'a self, id: &'a str) -> ContentFuture<'a, BlogPost> {
		Box::pin(async move { self.client.get(&BlogPost::item_path(id)).await })
	}

	fn events(&self) -> ContentFuture<'_, Vec<Event>> {
		Box::pin(self.client.get(Event::COLLECTION))
	}

	fn event<'a>(&'a self, id: &'a str) -> ContentFuture<'a, Event> {
		Box::pin(async move { self.client.get(&Event::item_path(id)).await })
	}

	fn programs(&self) -> ContentFuture<'_, Vec<Program>> {
		Box::pin(self.client.get("/programs"))
	}

	fn partnerships(&self) -> ContentFuture<'_, Vec<Partner>> {
		Box::pin(self.client.get("/partnerships"))
	}

	fn vision(&self) -> ContentFuture<'_, VisionContent> {
		Box::pin(self.client.get("/vision"))
	}

	fn governance(&self) -> ContentFuture<'_, GovernanceContent> {
		Box::pin(self.client.get("/governance"))
	}

	fn home_stats(&self) -> ContentFuture<'_, HomeStats> {
		Box::pin(self.client.get("/home/stats"))
	}

	fn about(&self) -> ContentFuture<'_, AboutContent> {
		Box::pin(self.client.get("/about"))
	}

	fn health(&self) -> ContentFuture<'_, HealthStatus> {
		Box::pin(self.client.get("/health"))
	}
}

/// What a public page renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageState<T> {
	/// Content to display.
	Ready(T),
	/// A listing with nothing in it.
	Empty,
	/// The requested item does not exist or could not be fetched.
	NotFound,
	/// A single-content page could not be fetched.
	Failed(String),
}
impl<T> PageState<T> {
	/// Returns the content, if ready.
	pub fn ready(self) -> Option<T> {
		match self {
			Self::Ready(value) => Some(value),
			_ => None,
		}
	}
}

/// Page loaders for the public site.
#[derive(Clone)]
pub struct SitePages {
	provider: Arc<dyn ContentProvider>,
}
impl SitePages {
	/// Loaders over the context's API client.
	pub fn new(ctx: &AppContext) -> Self {
		Self::with_provider(Arc::new(ApiContentProvider::new(ctx.client().clone())))
	}

	/// Loaders over an arbitrary provider.
	pub fn with_provider(provider: Arc<dyn ContentProvider>) -> Self {
		Self { provider }
	}

	/// Underlying provider.
	pub fn provider(&self) -> &Arc<dyn ContentProvider> {
		&self.provider
	}

	/// Blog listing.
	pub async fn blog(&self) -> PageState<Vec<BlogPost>> {
		listing("blog", self.provider.blog_posts().await)
	}

	/// Blog post detail.
	pub async fn blog_post(&self, id: &str) -> PageState<BlogPost> {
		detail("blog post", id, self.provider.blog_post(id).await)
	}

	/// Events listing.
	pub async fn events(&self) -> PageState<Vec<Event>> {
		listing("events", self.provider.events().await)
	}

	/// Upcoming events only, relative to `now`.
	pub async fn upcoming_events(&self, now: OffsetDateTime) -> PageState<Vec<Event>> {
		match self.events().await {
			PageState::Ready(events) => {
				let upcoming =
					events.into_iter().filter(|event| event.is_upcoming(now)).collect::<Vec<_>>();

				if upcoming.is_empty() { PageState::Empty } else { PageState::Ready(upcoming) }
			},
			other => other,
		}
	}

	/// Event detail.
	pub async fn event(&self, id: &str) -> PageState<Event> {
		detail("event", id, self.provider.event(id).await)
	}

	/// Programs listing.
	pub async fn programs(&self) -> PageState<Vec<Program>> {
		listing("programs", self.provider.programs().await)
	}

	/// Partnerships listing.
	pub async fn partnerships(&self) -> PageState<Vec<Partner>> {
		listing("partnerships", self.provider.partnerships().await)
	}

	/// Vision page.
	pub async fn vision(&self) -> PageState<VisionContent> {
		single("vision", self.provider.vision().await)
	}

	/// Governance page.
	pub async fn governance(&self) -> PageState<GovernanceContent> {
		single("governance", self.provider.governance().await)
	}

	/// Home-page figures.
	pub async fn home_stats(&self) -> PageState<HomeStats> {
		single("home stats", self.provider.home_stats().await)
	}

	/// About page.
	pub async fn about(&self) -> PageState<AboutContent> {
		single("about", self.provider.about().await)
	}

	/// Backend status, as shown on the status banner.
	pub async fn health(&self) -> PageState<HealthStatus> {
		single("health", self.provider.health().await)
	}
}
impl Debug for SitePages {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("SitePages(..)")
	}
}

fn listing<T>(page: &'static str, fetched: Result<Vec<T>>) -> PageState<Vec<T>> {
	match fetched {
		Ok(items) if items.is_empty() => PageState::Empty,
		Ok(items) => PageState::Ready(items),
		Err(e) => {
			tracing::error!(error = %e, page, "failed to load listing");

			PageState::Empty
		},
	}
}

fn detail<T>(resource: &'static str, id: &str, fetched: Result<T>) -> PageState<T> {
	match fetched {
		Ok(item) => PageState::Ready(item),
		Err(e) => {
			tracing::error!(error = %e, resource, id, "item not found");

			PageState::NotFound
		},
	}
}

fn single<T>(page: &'static str, fetched: Result<T>) -> PageState<T> {
	match fetched {
		Ok(value) => PageState::Ready(value),
		Err(e) => {
			tracing::error!(error = %e, page, "failed to load page content");

			PageState::Failed(e.detail().map(str::to_owned).unwrap_or_else(|| e.to_string()))
		},
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;
	use crate::{content::EventPayload, error::ApiError};

	#[derive(Default)]
	struct FixedContent {
		events: Vec<Event>,
		fail: bool,
	}
	impl FixedContent {
		fn answer<T>(&self, value: T) -> ContentFuture<'_, T>
		where
			T: 'static + Send,
		{
			let fail = self.fail;

			Box::pin(async move {
				if fail {
					Err(ApiError { status: 503, detail: Some("Database unavailable".into()) }.into())
				} else {
					Ok(value)
				}
			})
		}
	}
	impl ContentProvider for FixedContent {
		fn blog_posts(&self) -> ContentFuture<'_, Vec<BlogPost>> {
			self.answer(Vec::new())
		}

		fn blog_post<'a>(&'a self, id: &'a str) -> ContentFuture<'a, BlogPost> {
			let id = id.to_owned();

			Box::pin(async move { Err(Error::NotFound { resource: "blog post", id }) })
		}

		fn events(&self) -> ContentFuture<'_, Vec<Event>> {
			self.answer(self.events.clone())
		}

		fn event<'a>(&'a self, id: &'a str) -> ContentFuture<'a, Event> {
			let found = self.events.iter().find(|event| event.id == id).cloned();

			Box::pin(async move {
				found.ok_or_else(|| Error::NotFound { resource: "event", id: String::new() })
			})
		}

		fn programs(&self) -> ContentFuture<'_, Vec<Program>> {
			self.answer(Vec::new())
		}

		fn partnerships(&self) -> ContentFuture<'_, Vec<Partner>> {
			self.answer(Vec::new())
		}

		fn vision(&self) -> ContentFuture<'_, VisionContent> {
			self.answer(VisionContent {
				vision: "A beacon of hope".into(),
				mission: "Free, holistic education".into(),
				core_values: Vec::new(),
			})
		}

		fn governance(&self) -> ContentFuture<'_, GovernanceContent> {
			Box::pin(async { Err(ApiError { status: 500, detail: None }.into()) })
		}

		fn home_stats(&self) -> ContentFuture<'_, HomeStats> {
			self.answer(HomeStats::default())
		}

		fn about(&self) -> ContentFuture<'_, AboutContent> {
			self.answer(AboutContent::default())
		}

		fn health(&self) -> ContentFuture<'_, HealthStatus> {
			self.answer(HealthStatus::default())
		}
	}

	fn event(id: &str, at: OffsetDateTime) -> Event {
		Event::from_payload(
			id.into(),
			EventPayload {
				title: format!("Event {id}"),
				description: "Details".into(),
				event_date: at,
				location: String::new(),
				image_url: String::new(),
			},
		)
	}

	#[tokio::test]
	async fn listings_fold_failures_into_empty() {
		let provider = FixedContent { fail: true, ..Default::default() };
		let pages = SitePages::with_provider(Arc::new(provider));

		assert_eq!(pages.blog().await, PageState::Empty);
		assert_eq!(pages.events().await, PageState::Empty);
		assert_eq!(pages.vision().await, PageState::Failed("Database unavailable".into()));
		assert_eq!(pages.blog_post("nope").await, PageState::NotFound);
		assert_eq!(pages.health().await, PageState::Failed("Database unavailable".into()));
	}

	#[tokio::test]
	async fn events_split_on_now() {
		let past = event("a", datetime!(2024-01-01 09:00 UTC));
		let future = event("b", datetime!(2030-01-01 09:00 UTC));
		let pages = SitePages::with_provider(Arc::new(FixedContent {
			events: vec![past.clone(), future.clone()],
			fail: false,
		}));

		assert_eq!(pages.events().await, PageState::Ready(vec![past, future.clone()]));
		assert_eq!(
			pages.upcoming_events(datetime!(2025-06-01 00:00 UTC)).await,
			PageState::Ready(vec![future.clone()])
		);
		assert_eq!(pages.upcoming_events(datetime!(2031-01-01 00:00 UTC)).await, PageState::Empty);
		assert_eq!(pages.event("b").await.ready(), Some(future));
		assert_eq!(pages.event("zzz").await, PageState::NotFound);
		assert!(matches!(pages.governance().await, PageState::Failed(_)));
		assert!(pages.vision().await.ready().is_some());
	}
}
