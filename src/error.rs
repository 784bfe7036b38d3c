//! Crate-level error types shared by the client, stores, and page controllers.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// No response reached the client (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Backend answered with a non-success status other than 401.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// Backend answered with a body that does not match the expected shape.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Form input failed required-field or format checks.
	#[error(transparent)]
	Validation(#[from] ValidationError),

	/// Backend rejected the credential; the stored token has already been cleared.
	#[error("Session is not authorized{}.", detail_suffix(.detail))]
	Unauthorized {
		/// Server-supplied detail, when the body carried one.
		detail: Option<String>,
	},
	/// Login succeeded at the HTTP level but the response carried no token.
	#[error("No token received.")]
	MissingToken,
	/// Item is missing from a locally held collection.
	#[error("No {resource} with id `{id}` exists.")]
	NotFound {
		/// Collection label.
		resource: &'static str,
		/// Requested identifier.
		id: String,
	},
}
impl Error {
	/// Returns the HTTP status carried by the error, if it came from a response.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Unauthorized { .. } => Some(401),
			Self::Api(e) => Some(e.status),
			_ => None,
		}
	}

	/// Returns the user-facing detail sent by the backend, if any.
	pub fn detail(&self) -> Option<&str> {
		match self {
			Self::Unauthorized { detail } => detail.as_deref(),
			Self::Api(e) => e.detail.as_deref(),
			_ => None,
		}
	}

	/// Whether the error means the requested item does not exist.
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound { .. }) || self.status() == Some(404)
	}

	/// Whether the error forced a logout.
	pub fn is_unauthorized(&self) -> bool {
		matches!(self, Self::Unauthorized { .. })
	}
}

fn detail_suffix(detail: &Option<String>) -> String {
	detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL cannot be parsed.
	#[error("API base URL `{value}` is invalid.")]
	InvalidBaseUrl {
		/// Raw value that failed to parse.
		value: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL uses a scheme other than http(s).
	#[error("API base URL must use http or https, got `{scheme}`.")]
	UnsupportedScheme {
		/// Offending scheme.
		scheme: String,
	},
	/// An environment override could not be parsed.
	#[error("Environment variable {name} has an invalid value `{value}`.")]
	InvalidEnv {
		/// Variable name.
		name: &'static str,
		/// Raw value.
		value: String,
	},
	/// Request body could not be serialized.
	#[error("Request body could not be serialized.")]
	Body(#[source] serde_json::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures where no response reached the client.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {path}.")]
	Network {
		/// Request path relative to the API base.
		path: String,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The fixed client-side timeout elapsed.
	#[error("Request to {path} timed out.")]
	Timeout {
		/// Request path relative to the API base.
		path: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(path: impl Into<String>, src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { path: path.into(), source: Box::new(src) }
	}
}

/// Non-success response other than 401.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Backend returned HTTP {status}{}.", detail_suffix(.detail))]
pub struct ApiError {
	/// HTTP status code.
	pub status: u16,
	/// `detail` (or `message`) field of the JSON error body, when present.
	pub detail: Option<String>,
}
impl ApiError {
	/// Whether the backend reported a server-side failure (status >= 500).
	pub fn is_server_error(&self) -> bool {
		self.status >= 500
	}
}

/// Response body did not match the expected JSON shape.
#[derive(Debug, ThisError)]
#[error("Response from {path} could not be decoded at `{at}`.")]
pub struct DecodeError {
	/// Request path relative to the API base.
	pub path: String,
	/// JSON path of the first field that failed to decode.
	pub at: String,
	/// Structured parsing failure.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
}
impl DecodeError {
	/// Captures the failing JSON path alongside the parser error.
	pub fn new(
		path: impl Into<String>,
		source: serde_path_to_error::Error<serde_json::Error>,
	) -> Self {
		Self { path: path.into(), at: source.path().to_string(), source }
	}
}

/// Form validation failures.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ValidationError {
	/// A required field was empty or whitespace.
	#[error("Field `{field}` is required.")]
	MissingField {
		/// Form field name.
		field: &'static str,
	},
	/// Submit was requested while no form is open.
	#[error("No form is open.")]
	FormClosed,
	/// A date/time field does not match the form's input format.
	#[error("Field `{field}` has an invalid date `{value}`.")]
	InvalidDate {
		/// Form field name.
		field: &'static str,
		/// Raw input.
		value: String,
	},
}
