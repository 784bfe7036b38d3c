//! Site client and admin CMS controllers for Heavenly Nature Schools: a token-aware API client,
//! an admin route guard, CRUD admin pages, and read-only content providers in one crate.

#![deny(clippy::all, unused_crate_dependencies)]
#![warn(missing_docs)]

pub mod admin;
pub mod auth;
pub mod config;
pub mod content;
pub mod context;
pub mod error;
pub mod http;
pub mod obs;
pub mod repo;
pub mod shell;
pub mod site;
pub mod store;
#[doc(hidden)]
pub mod _preludet {
	//! Convenience re-exports and fixtures for integration tests and demos.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::ClientConfig,
		context::AppContext,
		shell::{HistoryNavigator, NotificationLog, ScriptedConfirm},
		store::MemoryStorage,
	};

	/// Handles to the in-memory collaborators behind a test [`AppContext`].
	#[derive(Clone, Debug)]
	pub struct TestHarness {
		/// Context wired to the in-memory collaborators below.
		pub ctx: AppContext,
		/// Backing token storage.
		pub storage: Arc<MemoryStorage>,
		/// Navigation recorder.
		pub navigator: Arc<HistoryNavigator>,
		/// Toast recorder.
		pub notifier: Arc<NotificationLog>,
		/// Confirmation dialog stand-in; answers "yes" unless scripted otherwise.
		pub confirm: Arc<ScriptedConfirm>,
	}

	/// Builds an [`AppContext`] pointed at `base_url` and backed by in-memory collaborators.
	pub fn build_test_harness(base_url: &str) -> TestHarness {
		let config = ClientConfig::new(base_url)
			.expect("Test base URL should parse.")
			.with_timeout(Duration::from_secs(5))
			.with_payload_logging(true);
		let storage = Arc::new(MemoryStorage::default());
		let navigator = Arc::new(HistoryNavigator::default());
		let notifier = Arc::new(NotificationLog::default());
		let confirm = Arc::new(ScriptedConfirm::default());
		let ctx = AppContext::builder(config)
			.storage(storage.clone())
			.navigator(navigator.clone())
			.notifier(notifier.clone())
			.confirm(confirm.clone())
			.build()
			.expect("Test context should build.");

		TestHarness { ctx, storage, navigator, notifier, confirm }
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
		time::Duration,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError, Method, StatusCode};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
