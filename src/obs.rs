//! Observability helpers for API traffic.
//!
//! - Every request runs inside a `hns.api` span carrying `method` and `path`.
//! - Enable `metrics` to increment the `hns_api_request_total` counter for every completed
//!   request, labeled by `method` + `outcome`.

mod metrics;
mod tracing;

pub use self::{metrics::*, tracing::*};

// self
use crate::_prelude::*;

/// Classification of a completed API request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
	/// 2xx response.
	Success,
	/// 401 response; the session was cleared.
	Unauthorized,
	/// Other 4xx response.
	ClientError,
	/// 5xx response.
	ServerError,
	/// No response reached the client.
	NetworkFailure,
}
impl RequestOutcome {
	/// Classifies an HTTP status code.
	pub fn from_status(status: u16) -> Self {
		match status {
			401 => Self::Unauthorized,
			500.. => Self::ServerError,
			400.. => Self::ClientError,
			_ => Self::Success,
		}
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestOutcome::Success => "success",
			RequestOutcome::Unauthorized => "unauthorized",
			RequestOutcome::ClientError => "client_error",
			RequestOutcome::ServerError => "server_error",
			RequestOutcome::NetworkFailure => "network_failure",
		}
	}
}
impl Display for RequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn statuses_map_to_outcomes() {
		assert_eq!(RequestOutcome::from_status(204), RequestOutcome::Success);
		assert_eq!(RequestOutcome::from_status(401), RequestOutcome::Unauthorized);
		assert_eq!(RequestOutcome::from_status(404), RequestOutcome::ClientError);
		assert_eq!(RequestOutcome::from_status(503), RequestOutcome::ServerError);
		assert_eq!(RequestOutcome::NetworkFailure.to_string(), "network_failure");
	}
}
