//! Admin dashboard: collection counts and logout.

// self
use crate::{_prelude::*, content::AdminStats, context::AppContext, shell::NavigationMode};

/// Dashboard controller.
#[derive(Clone, Debug)]
pub struct Dashboard {
	ctx: AppContext,
	stats: Arc<RwLock<Option<AdminStats>>>,
}
impl Dashboard {
	/// Creates the dashboard.
	pub fn new(ctx: &AppContext) -> Self {
		Self { ctx: ctx.clone(), stats: Arc::default() }
	}

	/// Last loaded counts.
	pub fn stats(&self) -> Option<AdminStats> {
		*self.stats.read()
	}

	/// Fetches `GET /stats`; failures toast `Failed to load stats`.
	pub async fn load(&self) -> Result<AdminStats> {
		match self.ctx.client().get::<AdminStats>("/stats").await {
			Ok(stats) => {
				*self.stats.write() = Some(stats);

				Ok(stats)
			},
			Err(e) => {
				tracing::error!(error = %e, "failed to load dashboard stats");
				self.ctx.notifier().error("Failed to load stats");

				Err(e)
			},
		}
	}

	/// Clears the stored token and returns to the login route.
	pub async fn logout(&self) -> Result<()> {
		self.ctx.session().clear().await?;
		self.ctx.notifier().success("Logged out");
		self.ctx.navigator().navigate(&self.ctx.config().login_route, NavigationMode::Push);

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{_preludet::build_test_harness, auth::AccessToken, shell::Navigator};

	#[tokio::test]
	async fn logout_clears_token_and_navigates() {
		let h = build_test_harness("http://127.0.0.1:9/api");
		let dashboard = Dashboard::new(&h.ctx);

		h.ctx.session().store_token(&AccessToken::new("jwt")).await.expect("Store should succeed.");
		dashboard.logout().await.expect("Logout should succeed.");

		assert!(!h.ctx.session().has_token().await.expect("Read should succeed."));
		assert_eq!(h.navigator.current_route().as_deref(), Some("/admin/login"));
		assert_eq!(h.notifier.last().map(|t| t.message), Some("Logged out".into()));
		assert_eq!(dashboard.stats(), None);
	}
}
