//! HTTP client wrapper for the site's REST API.
//!
//! [`ApiClient`] plays the role of an interceptor pair around `reqwest`:
//!
//! - Outbound, [`ApiClient::prepare`] reads the stored token and attaches it as a bearer
//!   `Authorization` header. Requests without a stored token carry no such header.
//! - Inbound, a 401 clears the stored token and sends the shell to the login route exactly once
//!   per response. Other failures are logged and handed back unchanged; nothing is retried.

// crates.io
use reqwest::{Request, header::ACCEPT};
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	auth::Session,
	config::ClientConfig,
	error::{ApiError, ConfigError, DecodeError, TransportError},
	obs::{self, RequestOutcome, RequestSpan},
	shell::{NavigationMode, Navigator},
};

/// Raw response returned by [`ApiClient::send`] for 2xx statuses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
	/// Path the request was sent to, relative to the API base.
	pub path: String,
	/// HTTP status code.
	pub status: u16,
	/// Response body bytes.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Decodes the body as JSON, reporting the failing field path on mismatch.
	pub fn json<T>(&self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		decode_json(&self.path, &self.body)
	}
}

/// Token-aware client for the versioned REST API.
#[derive(Clone)]
pub struct ApiClient {
	http: ReqwestClient,
	config: Arc<ClientConfig>,
	session: Session,
	navigator: Arc<dyn Navigator>,
}
impl ApiClient {
	/// Builds a client with its own reqwest transport honoring the configured timeout.
	pub fn new(
		config: ClientConfig,
		session: Session,
		navigator: Arc<dyn Navigator>,
	) -> Result<Self> {
		let http =
			ReqwestClient::builder().timeout(config.timeout).build().map_err(ConfigError::from)?;

		Ok(Self::with_http_client(http, config, session, navigator))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_http_client(
		http: ReqwestClient,
		config: ClientConfig,
		session: Session,
		navigator: Arc<dyn Navigator>,
	) -> Self {
		Self { http, config: Arc::new(config), session, navigator }
	}

	/// Active configuration.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Session whose token is attached to requests.
	pub fn session(&self) -> &Session {
		&self.session
	}

	/// `GET path`, decoding the JSON response.
	pub async fn get<T>(&self, path: &str) -> Result<T>
	where
		T: DeserializeOwned,
	{
		self.send(Method::GET, path, None).await?.json()
	}

	/// `POST path` with a JSON body, decoding the JSON response.
	pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
	where
		B: ?Sized + Serialize,
		T: DeserializeOwned,
	{
		let body = to_json(body)?;

		self.send(Method::POST, path, Some(body)).await?.json()
	}

	/// `PUT path` with a JSON body, decoding the JSON response.
	pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
	where
		B: ?Sized + Serialize,
		T: DeserializeOwned,
	{
		let body = to_json(body)?;

		self.send(Method::PUT, path, Some(body)).await?.json()
	}

	/// `DELETE path`; the response body is ignored.
	pub async fn delete(&self, path: &str) -> Result<()> {
		self.send(Method::DELETE, path, None).await.map(|_| ())
	}

	/// Builds the outbound request, attaching the stored token when one exists.
	pub async fn prepare(
		&self,
		method: Method,
		path: &str,
		body: Option<&Value>,
	) -> Result<Request> {
		let url = self.config.endpoint(path)?;
		let mut builder = self
			.http
			.request(method.clone(), url)
			.timeout(self.config.timeout)
			.header(ACCEPT, "application/json");

		if let Some(token) = self.session.token().await? {
			builder = builder.bearer_auth(token.expose());
		}
		if let Some(body) = body {
			builder = builder.json(body);
		}

		if self.config.log_payloads && !path.contains("/login") {
			tracing::debug!(?body, "[API REQUEST] {method} {path}");
		} else {
			tracing::debug!(body = "[hidden]", "[API REQUEST] {method} {path}");
		}

		builder.build().map_err(|e| ConfigError::from(e).into())
	}

	/// Sends a request and applies the response policy.
	///
	/// 2xx responses are returned as-is. A 401 clears the stored token, navigates to the login
	/// route, and yields [`Error::Unauthorized`]. Other statuses yield [`Error::Api`], and
	/// requests that never get a response yield [`Error::Transport`].
	pub async fn send(
		&self,
		method: Method,
		path: &str,
		body: Option<Value>,
	) -> Result<ApiResponse> {
		let span = RequestSpan::new(&method, path);

		span.instrument(async move {
			let request = self.prepare(method.clone(), path, body.as_ref()).await?;
			let response = match self.http.execute(request).await {
				Ok(response) => response,
				Err(e) => return Err(self.network_failure(&method, path, e)),
			};
			let status = response.status().as_u16();
			let bytes = match response.bytes().await {
				Ok(bytes) => bytes.to_vec(),
				Err(e) => return Err(self.network_failure(&method, path, e)),
			};

			obs::record_request_outcome(&method, RequestOutcome::from_status(status));

			if (200..300).contains(&status) {
				if self.config.log_payloads {
					tracing::debug!(
						status,
						body = %String::from_utf8_lossy(&bytes),
						"[API RESPONSE] {path}"
					);
				} else {
					tracing::debug!(status, "[API RESPONSE] {path}");
				}

				return Ok(ApiResponse { path: path.to_owned(), status, body: bytes });
			}

			let detail = error_detail(&bytes);

			if status >= 500 {
				tracing::error!(
					status,
					detail = detail.as_deref(),
					"[API ERROR] server failure on {path}"
				);
			} else {
				tracing::error!(status, detail = detail.as_deref(), "[API ERROR] {path}");
			}

			if status == StatusCode::UNAUTHORIZED.as_u16() {
				self.force_logout().await;

				return Err(Error::Unauthorized { detail });
			}

			Err(ApiError { status, detail }.into())
		})
		.await
	}

	async fn force_logout(&self) {
		if let Err(e) = self.session.clear().await {
			tracing::warn!(error = %e, "failed to clear stored token after 401");
		}

		self.navigator.navigate(&self.config.login_route, NavigationMode::Replace);
	}

	fn network_failure(&self, method: &Method, path: &str, err: ReqwestError) -> Error {
		obs::record_request_outcome(method, RequestOutcome::NetworkFailure);
		tracing::error!(error = %err, "[API NETWORK ERROR] {method} {path}");

		if err.is_timeout() {
			TransportError::Timeout { path: path.to_owned() }.into()
		} else {
			TransportError::network(path, err).into()
		}
	}
}
impl Debug for ApiClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient")
			.field("base_url", &self.config.base_url.as_str())
			.field("timeout", &self.config.timeout)
			.finish()
	}
}

fn to_json<B>(body: &B) -> Result<Value>
where
	B: ?Sized + Serialize,
{
	serde_json::to_value(body).map_err(|e| ConfigError::Body(e).into())
}

pub(crate) fn decode_json<T>(path: &str, bytes: &[u8]) -> Result<T>
where
	T: DeserializeOwned,
{
	let de = &mut serde_json::Deserializer::from_slice(bytes);

	serde_path_to_error::deserialize(de).map_err(|e| DecodeError::new(path, e).into())
}

/// Pulls a user-facing message out of a JSON error body (`detail`, then `message`).
fn error_detail(bytes: &[u8]) -> Option<String> {
	let value: Value = serde_json::from_slice(bytes).ok()?;

	["detail", "message"]
		.into_iter()
		.find_map(|key| value.get(key).and_then(Value::as_str))
		.map(str::to_owned)
}
