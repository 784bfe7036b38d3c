//! Admin login.

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	content::require,
	context::AppContext,
	error::ValidationError,
	shell::NavigationMode,
};

/// Toast shown when login fails without a backend message.
pub const LOGIN_FAILED: &str = "Invalid credentials or server error. Please try again.";

/// Body of `POST /login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
	/// Admin email.
	pub email: String,
	/// Admin password.
	pub password: String,
}
impl Credentials {
	/// Bundles an email and password.
	pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
		Self { email: email.into(), password: password.into() }
	}

	fn validate(&self) -> Result<(), ValidationError> {
		require("email", &self.email)?;
		require("password", &self.password)
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("email", &self.email)
			.field("password", &"<redacted>")
			.finish()
	}
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
	#[serde(default)]
	access_token: Option<String>,
}

/// Login page controller.
#[derive(Clone, Debug)]
pub struct LoginPage {
	ctx: AppContext,
}
impl LoginPage {
	/// Creates the page.
	pub fn new(ctx: &AppContext) -> Self {
		Self { ctx: ctx.clone() }
	}

	/// Exchanges credentials for a token, stores it, and opens the dashboard.
	///
	/// Failures toast the backend `detail`, then `message`, then [`LOGIN_FAILED`].
	pub async fn submit(&self, credentials: &Credentials) -> Result<AccessToken> {
		match self.exchange(credentials).await {
			Ok(token) => {
				self.ctx.notifier().success("Login successful! Redirecting...");
				self.ctx
					.navigator()
					.navigate(&self.ctx.config().dashboard_route, NavigationMode::Push);

				Ok(token)
			},
			Err(e) => {
				tracing::error!(error = %e, "login failed");

				let message = match &e {
					Error::Validation(invalid) => invalid.to_string(),
					_ => e.detail().unwrap_or(LOGIN_FAILED).to_owned(),
				};

				self.ctx.notifier().error(&message);

				Err(e)
			},
		}
	}

	async fn exchange(&self, credentials: &Credentials) -> Result<AccessToken> {
		credentials.validate()?;

		let response: LoginResponse = self.ctx.client().post("/login", credentials).await?;
		let token = response
			.access_token
			.filter(|token| !token.trim().is_empty())
			.map(AccessToken::new)
			.ok_or(Error::MissingToken)?;

		self.ctx.session().store_token(&token).await?;

		Ok(token)
	}
}
