// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use heavenly_nature::{
	_preludet::*,
	admin::Dashboard,
	auth::{AccessToken, TOKEN_KEY},
	config::ClientConfig,
	content::{AdminStats, BlogPost},
	context::AppContext,
	error::TransportError,
	shell::{HistoryNavigator, NavigationMode, Visit},
	store::Storage,
};

#[tokio::test]
async fn bearer_header_is_sent_only_with_a_stored_token() {
	let server = MockServer::start_async().await;
	let h = build_test_harness(&server.url("/api"));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/stats").header("authorization", "Bearer jwt-abc");
			then.status(200).json_body(json!({ "contacts": 4, "blogPosts": 2, "events": 1 }));
		})
		.await;
	let dashboard = Dashboard::new(&h.ctx);
	let anonymous = dashboard.load().await.expect_err("Unsigned request should not match.");

	assert_eq!(anonymous.status(), Some(404));

	h.ctx
		.session()
		.store_token(&AccessToken::new("jwt-abc"))
		.await
		.expect("Token should be stored.");

	let stats = dashboard.load().await.expect("Signed request should succeed.");

	assert_eq!(stats, AdminStats { contacts: 4, blog_posts: 2, events: 1 });
	assert_eq!(dashboard.stats(), Some(stats));
	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn unauthorized_response_clears_token_and_redirects_once() {
	let server = MockServer::start_async().await;
	let h = build_test_harness(&server.url("/api"));
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/blog");
			then.status(401).json_body(json!({ "detail": "Token expired" }));
		})
		.await;

	h.storage.set_item(TOKEN_KEY, "stale".into()).await.expect("Token should be seeded.");

	let err = h
		.ctx
		.client()
		.get::<Vec<BlogPost>>("/blog")
		.await
		.expect_err("401 should surface as an error.");

	assert!(err.is_unauthorized());
	assert_eq!(err.detail(), Some("Token expired"));
	assert_eq!(h.storage.get_item(TOKEN_KEY).await.expect("Read should succeed."), None);
	assert_eq!(
		h.navigator.visits(),
		[Visit { route: "/admin/login".into(), mode: NavigationMode::Replace }]
	);
	mock.assert_async().await;
}

#[tokio::test]
async fn server_errors_keep_the_session() {
	let server = MockServer::start_async().await;
	let h = build_test_harness(&server.url("/api"));

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/blog");
			then.status(503).json_body(json!({ "detail": "Database unavailable" }));
		})
		.await;
	h.storage.set_item(TOKEN_KEY, "jwt".into()).await.expect("Token should be seeded.");

	let err = h
		.ctx
		.client()
		.get::<Vec<BlogPost>>("/blog")
		.await
		.expect_err("503 should surface as an error.");

	match err {
		Error::Api(api) => {
			assert!(api.is_server_error());
			assert_eq!(api.detail.as_deref(), Some("Database unavailable"));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}

	assert!(h.ctx.session().has_token().await.expect("Read should succeed."));
	assert!(h.navigator.visits().is_empty());
}

#[tokio::test]
async fn malformed_bodies_report_the_failing_field() {
	let server = MockServer::start_async().await;
	let h = build_test_harness(&server.url("/api"));

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/blog");
			then.status(200).json_body(json!([{ "id": "p1", "title": 5 }]));
		})
		.await;

	let err = h
		.ctx
		.client()
		.get::<Vec<BlogPost>>("/blog")
		.await
		.expect_err("Wrong field type should fail to decode.");

	match err {
		Error::Decode(decode) => {
			assert_eq!(decode.path, "/blog");
			assert_eq!(decode.at, "[0].title");
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error_and_keeps_the_session() {
	// Nothing listens on the discard port.
	let h = build_test_harness("http://127.0.0.1:9/api");

	h.storage.set_item(TOKEN_KEY, "jwt".into()).await.expect("Token should be seeded.");

	let err = h
		.ctx
		.client()
		.get::<Vec<BlogPost>>("/blog")
		.await
		.expect_err("Refused connection should surface as an error.");

	match err {
		Error::Transport(TransportError::Network { path, .. }) => assert_eq!(path, "/blog"),
		other => panic!("Unexpected error variant: {other:?}."),
	}

	assert!(h.ctx.session().has_token().await.expect("Read should succeed."));
	assert!(h.navigator.visits().is_empty());
}

#[tokio::test]
async fn slow_responses_hit_the_client_timeout() {
	let server = MockServer::start_async().await;
	let navigator = Arc::new(HistoryNavigator::default());
	let config = ClientConfig::new(&server.url("/api"))
		.expect("Mock base URL should parse.")
		.with_timeout(Duration::from_millis(200));
	let ctx = AppContext::builder(config)
		.navigator(navigator.clone())
		.build()
		.expect("Context should build.");

	server
		.mock_async(|when, then| {
			when.method(GET).path("/api/events");
			then.status(200).delay(Duration::from_secs(2)).json_body(json!([]));
		})
		.await;
	ctx.session().store_token(&AccessToken::new("jwt")).await.expect("Store should succeed.");

	let err = ctx
		.client()
		.get::<Vec<serde_json::Value>>("/events")
		.await
		.expect_err("Delayed response should time out.");

	assert!(
		matches!(&err, Error::Transport(TransportError::Timeout { path }) if path == "/events"),
		"Unexpected error: {err:?}."
	);
	assert!(ctx.session().has_token().await.expect("Read should succeed."));
	assert!(navigator.visits().is_empty());
}
