//! Client configuration: API base URL, timeout, routes, and diagnostic switches.

// self
use crate::{_prelude::*, error::ConfigError};

/// Production API used when no override is configured.
pub const DEFAULT_API_BASE: &str = "https://heavenlynatureschools-qpvf.onrender.com/api";
/// Route of the admin login view.
pub const LOGIN_ROUTE: &str = "/admin/login";
/// Route of the admin dashboard.
pub const DASHBOARD_ROUTE: &str = "/admin";

/// Settings shared by the API client and page controllers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
	/// Versioned API base, e.g. `https://host/api`. Request paths are appended verbatim.
	pub base_url: Url,
	/// Fixed client-side request timeout.
	pub timeout: Duration,
	/// Logs request and response bodies (never for login requests).
	pub log_payloads: bool,
	/// Route shown after a forced logout.
	pub login_route: String,
	/// Route shown after a successful login.
	pub dashboard_route: String,
}
impl ClientConfig {
	/// Default request timeout.
	pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

	/// Creates a configuration for `base_url` with default settings.
	pub fn new(base_url: &str) -> Result<Self, ConfigError> {
		Ok(Self {
			base_url: parse_base_url(base_url)?,
			timeout: Self::DEFAULT_TIMEOUT,
			log_payloads: false,
			login_route: LOGIN_ROUTE.into(),
			dashboard_route: DASHBOARD_ROUTE.into(),
		})
	}

	/// Reads overrides from the process environment.
	///
	/// - `HNS_API_URL`, then `VITE_API_URL`, then `REACT_APP_API_URL` select the base URL.
	/// - `HNS_API_TIMEOUT_SECS` overrides the timeout.
	/// - `HNS_LOG_PAYLOADS` (`1`/`true`) enables body logging.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Same as [`ClientConfig::from_env`] with a custom variable source.
	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
		let base = ["HNS_API_URL", "VITE_API_URL", "REACT_APP_API_URL"]
			.into_iter()
			.find_map(|name| lookup(name).filter(|value| !value.trim().is_empty()))
			.unwrap_or_else(|| DEFAULT_API_BASE.into());
		let mut config = Self::new(base.trim())?;

		if let Some(raw) = lookup("HNS_API_TIMEOUT_SECS") {
			let secs = raw
				.trim()
				.parse::<u64>()
				.ok()
				.filter(|secs| *secs > 0)
				.ok_or(ConfigError::InvalidEnv { name: "HNS_API_TIMEOUT_SECS", value: raw.clone() })?;

			config.timeout = Duration::from_secs(secs);
		}
		if let Some(raw) = lookup("HNS_LOG_PAYLOADS") {
			config.log_payloads = match raw.trim().to_ascii_lowercase().as_str() {
				"1" | "true" | "yes" | "on" => true,
				"0" | "false" | "no" | "off" | "" => false,
				_ => return Err(ConfigError::InvalidEnv { name: "HNS_LOG_PAYLOADS", value: raw }),
			};
		}

		Ok(config)
	}

	/// Overrides the request timeout.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Enables or disables body logging.
	pub fn with_payload_logging(mut self, enabled: bool) -> Self {
		self.log_payloads = enabled;

		self
	}

	/// Overrides the login route.
	pub fn with_login_route(mut self, route: impl Into<String>) -> Self {
		self.login_route = route.into();

		self
	}

	/// Builds the absolute URL for `path` under the base URL.
	pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		let base = self.base_url.as_str().trim_end_matches('/');
		let joined = if path.starts_with('/') {
			format!("{base}{path}")
		} else {
			format!("{base}/{path}")
		};

		Url::parse(&joined).map_err(|source| ConfigError::InvalidBaseUrl { value: joined, source })
	}
}
impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			base_url: Url::parse(DEFAULT_API_BASE).expect("Default API base URL must parse."),
			timeout: Self::DEFAULT_TIMEOUT,
			log_payloads: false,
			login_route: LOGIN_ROUTE.into(),
			dashboard_route: DASHBOARD_ROUTE.into(),
		}
	}
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
	let url = Url::parse(value)
		.map_err(|source| ConfigError::InvalidBaseUrl { value: value.into(), source })?;

	match url.scheme() {
		"http" | "https" => Ok(url),
		other => Err(ConfigError::UnsupportedScheme { scheme: other.into() }),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
		move |name| vars.iter().find(|(key, _)| *key == name).map(|(_, value)| value.to_string())
	}

	#[test]
	fn endpoint_appends_paths_verbatim() {
		let config = ClientConfig::new("https://example.com/api").expect("Base URL should parse.");

		assert_eq!(
			config.endpoint("/blog/42").expect("Endpoint should build.").as_str(),
			"https://example.com/api/blog/42"
		);
		assert_eq!(
			config.endpoint("home/stats").expect("Endpoint should build.").as_str(),
			"https://example.com/api/home/stats"
		);

		let slashed = ClientConfig::new("https://example.com/api/").expect("Base URL should parse.");

		assert_eq!(
			slashed.endpoint("/events").expect("Endpoint should build.").as_str(),
			"https://example.com/api/events"
		);
	}

	#[test]
	fn env_lookup_prefers_crate_variable_then_fallbacks() {
		let vars = [("VITE_API_URL", "https://vite.example/api"), ("HNS_API_TIMEOUT_SECS", "5")];
		let config = ClientConfig::from_lookup(lookup(&vars)).expect("Config should load.");

		assert_eq!(config.base_url.as_str(), "https://vite.example/api");
		assert_eq!(config.timeout, Duration::from_secs(5));
		assert!(!config.log_payloads);

		let vars = [("HNS_API_URL", "http://localhost:8000/api"), ("VITE_API_URL", "https://x/api")];
		let config = ClientConfig::from_lookup(lookup(&vars)).expect("Config should load.");

		assert_eq!(config.base_url.as_str(), "http://localhost:8000/api");
	}

	#[test]
	fn env_lookup_defaults_to_production() {
		let config = ClientConfig::from_lookup(|_| None).expect("Config should load.");

		assert_eq!(config, ClientConfig::default());
		assert_eq!(config.base_url.as_str(), DEFAULT_API_BASE);
	}

	#[test]
	fn invalid_overrides_are_rejected() {
		let err = ClientConfig::from_lookup(lookup(&[("HNS_API_TIMEOUT_SECS", "soon")]))
			.expect_err("Non-numeric timeout should fail.");

		assert!(matches!(err, ConfigError::InvalidEnv { name: "HNS_API_TIMEOUT_SECS", .. }));

		let err = ClientConfig::new("ftp://example.com").expect_err("FTP base should fail.");

		assert!(matches!(err, ConfigError::UnsupportedScheme { .. }));
	}
}
