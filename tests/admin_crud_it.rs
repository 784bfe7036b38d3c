// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use heavenly_nature::{
	_preludet::*,
	admin::{BlogAdmin, DeleteOutcome, EventsAdmin},
	auth::AccessToken,
	shell::{Toast, ToastLevel},
};

fn post(id: &str, title: &str) -> serde_json::Value {
	json!({
		"id": id,
		"title": title,
		"excerpt": "Summary",
		"content": "<p>Body</p>",
		"imageUrl": "",
		"publishDate": "2025-01-06T00:00:00Z",
		"readTime": "5 min read"
	})
}

#[tokio::test]
async fn editing_a_post_submits_put_not_post() {
	let server = MockServer::start_async().await;
	let h = build_test_harness(&server.url("/api"));

	h.ctx.session().store_token(&AccessToken::new("jwt")).await.expect("Store should succeed.");

	let list = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/blog");
			then.status(200).json_body(json!([post("p1", "Term opens")]));
		})
		.await;
	let put = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path("/api/blog/p1")
				.header("authorization", "Bearer jwt")
				.json_body(json!({
					"title": "Term opens Monday",
					"excerpt": "Summary",
					"content": "<p>Body</p>",
					"imageUrl": "",
					"publishDate": "2025-01-06T00:00:00Z"
				}));
			then.status(200).json_body(post("p1", "Term opens Monday"));
		})
		.await;
	let create = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/blog");
			then.status(201).json_body(post("p2", "Unexpected"));
		})
		.await;
	let page = BlogAdmin::new(&h.ctx);

	page.load().await.expect("Load should succeed.");
	page.edit("p1").expect("Listed post should be editable.");

	let form = page.form().expect("Form should be open.");

	assert_eq!(form.editing.as_deref(), Some("p1"));
	assert_eq!(form.values.title, "Term opens");
	assert_eq!(form.values.publish_date, "2025-01-06");

	page.update_form(|values| values.title = "Term opens Monday".into());

	let saved = page.submit().await.expect("Update should succeed.");

	assert_eq!(saved.title, "Term opens Monday");
	assert!(page.form().is_none());
	assert_eq!(
		h.notifier.last(),
		Some(Toast { level: ToastLevel::Success, message: "Blog post updated".into() })
	);
	put.assert_async().await;
	create.assert_calls_async(0).await;
	// Initial load plus the refetch after saving.
	list.assert_calls_async(2).await;
}

#[tokio::test]
async fn failed_delete_rolls_back_and_toasts() {
	let server = MockServer::start_async().await;
	let h = build_test_harness(&server.url("/api"));

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/blog");
			then.status(200).json_body(json!([post("p1", "First"), post("p2", "Second")]));
		})
		.await;

	let delete = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/api/blog/p1");
			then.status(500).json_body(json!({ "detail": "Database unavailable" }));
		})
		.await;
	let page = BlogAdmin::new(&h.ctx);

	page.load().await.expect("Load should succeed.");

	let err = page.delete("p1").await.expect_err("Delete should fail.");

	assert_eq!(err.status(), Some(500));
	assert_eq!(
		page.items().iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
		["p1", "p2"]
	);
	assert_eq!(
		h.notifier.last(),
		Some(Toast { level: ToastLevel::Error, message: "Failed to delete post".into() })
	);
	assert_eq!(h.confirm.prompts(), ["Delete this blog post permanently?"]);
	delete.assert_async().await;
}

#[tokio::test]
async fn successful_delete_removes_event() {
	let server = MockServer::start_async().await;
	let h = build_test_harness(&server.url("/api"));

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/events");
			then.status(200).json_body(json!([{
				"id": "e1",
				"title": "Graduation",
				"description": "P8 leavers",
				"eventDate": "2025-11-28T10:30:00Z"
			}]));
		})
		.await;

	let delete = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/api/events/e1");
			then.status(200).json_body(json!({ "message": "Event deleted" }));
		})
		.await;
	let page = EventsAdmin::new(&h.ctx);

	page.load().await.expect("Load should succeed.");

	assert_eq!(page.items()[0].location, "");
	assert_eq!(page.delete("e1").await.expect("Delete should succeed."), DeleteOutcome::Deleted);
	assert!(page.items().is_empty());
	assert_eq!(h.notifier.last().map(|t| t.message), Some("Event deleted".into()));
	delete.assert_async().await;
}

#[tokio::test]
async fn load_failure_shows_backend_detail() {
	let server = MockServer::start_async().await;
	let h = build_test_harness(&server.url("/api"));

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/events");
			then.status(503).json_body(json!({ "detail": "Database unavailable" }));
		})
		.await;

	let page = EventsAdmin::new(&h.ctx);

	page.load().await.expect_err("Load should fail.");

	let state = page.state();

	assert!(!state.loading);
	assert_eq!(state.error.as_deref(), Some("Database unavailable"));
	assert_eq!(h.notifier.last().map(|t| t.message), Some("Database unavailable".into()));
}
