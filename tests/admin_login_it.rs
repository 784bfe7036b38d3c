// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use heavenly_nature::{
	_preludet::*,
	admin::{Credentials, LOGIN_FAILED, LoginPage},
	shell::{Navigator, ToastLevel},
};

#[tokio::test]
async fn login_stores_token_and_opens_dashboard() {
	let server = MockServer::start_async().await;
	let h = build_test_harness(&server.url("/api"));
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/login")
				.json_body(json!({ "email": "admin@example.org", "password": "s3cret" }));
			then.status(200).json_body(json!({ "access_token": "jwt-new", "token_type": "bearer" }));
		})
		.await;
	let page = LoginPage::new(&h.ctx);
	let token = page
		.submit(&Credentials::new("admin@example.org", "s3cret"))
		.await
		.expect("Login should succeed.");

	assert_eq!(token.expose(), "jwt-new");
	assert_eq!(
		h.ctx.session().token().await.expect("Read should succeed.").map(|t| t.expose().to_owned()),
		Some("jwt-new".into())
	);
	assert_eq!(h.navigator.current_route().as_deref(), Some("/admin"));
	assert_eq!(
		h.notifier.last().map(|t| t.message),
		Some("Login successful! Redirecting...".into())
	);
	mock.assert_async().await;
}

#[tokio::test]
async fn missing_token_uses_generic_message() {
	let server = MockServer::start_async().await;
	let h = build_test_harness(&server.url("/api"));

	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/login");
			then.status(200).json_body(json!({ "message": "ok" }));
		})
		.await;

	let err = LoginPage::new(&h.ctx)
		.submit(&Credentials::new("admin@example.org", "s3cret"))
		.await
		.expect_err("Missing token should fail.");

	assert!(matches!(err, Error::MissingToken));
	assert!(!h.ctx.session().has_token().await.expect("Read should succeed."));
	assert_eq!(h.notifier.last().map(|t| t.message), Some(LOGIN_FAILED.into()));
	assert!(h.navigator.visits().is_empty());
}

#[tokio::test]
async fn rejected_credentials_show_backend_message() {
	let server = MockServer::start_async().await;
	let h = build_test_harness(&server.url("/api"));

	server
		.mock_async(|when, then| {
			when.method(POST).path("/api/login");
			then.status(400).json_body(json!({ "message": "Incorrect email or password" }));
		})
		.await;

	LoginPage::new(&h.ctx)
		.submit(&Credentials::new("admin@example.org", "wrong"))
		.await
		.expect_err("Bad credentials should fail.");

	assert_eq!(h.notifier.count(ToastLevel::Error), 1);
	assert_eq!(
		h.notifier.last().map(|t| t.message),
		Some("Incorrect email or password".into())
	);
}
