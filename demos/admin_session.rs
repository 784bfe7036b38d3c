//! Walks an admin session against a mocked backend: log in, pass the guard, publish a blog post,
//! then watch a 401 clear the token and bounce the shell back to the login route.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use heavenly_nature::{
	admin::{BlogAdmin, Credentials, Dashboard, LoginPage},
	auth::{AdminGuard, GuardStrategy},
	config::ClientConfig,
	context::AppContext,
	shell::{HistoryNavigator, Navigator, NotificationLog},
	store::MemoryStorage,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let login_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/login");
			then.status(200).json_body(json!({ "access_token": "demo-jwt", "token_type": "bearer" }));
		})
		.await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/health").header("authorization", "Bearer demo-jwt");
			then.status(200).json_body(json!({ "status": "healthy", "database": "connected" }));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/blog");
			then.status(200).json_body(json!([]));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/blog");
			then.status(201).json_body(json!({
				"id": "p1",
				"title": "School reopens",
				"excerpt": "Classes resume on Monday.",
				"publishDate": "2025-01-06T00:00:00Z"
			}));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/stats");
			then.status(401).json_body(json!({ "detail": "Token expired" }));
		})
		.await;

	let navigator = Arc::new(HistoryNavigator::starting_at("/admin/login"));
	let notifier = Arc::new(NotificationLog::default());
	let ctx = AppContext::builder(ClientConfig::new(&server.url("/api"))?)
		.storage(Arc::new(MemoryStorage::default()))
		.navigator(navigator.clone())
		.notifier(notifier.clone())
		.build()?;

	LoginPage::new(&ctx).submit(&Credentials::new("admin@example.org", "demo-password")).await?;

	let mut guard = AdminGuard::new(&ctx, GuardStrategy::default()).mount();

	println!("Guard state after login: {:?}.", guard.resolve().await);

	let blog = BlogAdmin::new(&ctx);

	blog.load().await?;
	blog.open_create();
	blog.update_form(|form| {
		form.title = "School reopens".into();
		form.excerpt = "Classes resume on Monday.".into();
		form.publish_date = "2025-01-06".into();
	});

	let post = blog.submit().await?;

	println!("Published `{}` as {}.", post.title, post.id);

	if let Err(e) = Dashboard::new(&ctx).load().await {
		println!("Dashboard failed: {e}");
	}

	println!("Token still stored: {}.", ctx.session().has_token().await?);
	println!("Current route: {:?}.", navigator.current_route());

	for toast in notifier.toasts() {
		println!("[{:?}] {}", toast.level, toast.message);
	}

	login_mock.assert_async().await;

	Ok(())
}
