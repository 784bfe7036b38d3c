//! Persistent key/value storage contracts and built-in backends.
//!
//! [`Storage`] mirrors browser local storage: string keys, string values, and a change feed
//! that fires whenever a key's value actually changes. The session token and the early
//! local collections both live behind this contract instead of ambient global state.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

// crates.io
use tokio::sync::broadcast;
// self
use crate::_prelude::*;

/// Boxed future returned by [`Storage`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Receiver half of a storage change feed.
pub type StorageEvents = broadcast::Receiver<StorageEvent>;

/// Storage backend contract implemented by key/value stores.
pub trait Storage
where
	Self: Send + Sync,
{
	/// Returns the value stored under `key`, if present.
	fn get_item<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>>;

	/// Stores `value` under `key`, replacing any previous value.
	fn set_item<'a>(&'a self, key: &'a str, value: String) -> StoreFuture<'a, ()>;

	/// Removes `key`, returning the previous value.
	fn remove_item<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>>;

	/// Subscribes to change events emitted after each effective mutation.
	fn subscribe(&self) -> StorageEvents;
}

/// Change notification published by a [`Storage`] backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageEvent {
	/// Key whose value changed.
	pub key: String,
	/// Value before the change.
	pub old_value: Option<String>,
	/// Value after the change; `None` when the key was removed.
	pub new_value: Option<String>,
}

/// Error type produced by [`Storage`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Fan-out for [`StorageEvent`]s shared by the built-in backends.
#[derive(Clone, Debug)]
pub(crate) struct EventHub(broadcast::Sender<StorageEvent>);
impl EventHub {
	const CAPACITY: usize = 64;

	pub(crate) fn subscribe(&self) -> StorageEvents {
		self.0.subscribe()
	}

	/// Publishes a change unless the value stayed the same.
	pub(crate) fn publish(&self, key: &str, old_value: Option<String>, new_value: Option<String>) {
		if old_value == new_value {
			return;
		}

		// No subscribers is not an error.
		let _ = self.0.send(StorageEvent { key: key.to_owned(), old_value, new_value });
	}
}
impl Default for EventHub {
	fn default() -> Self {
		Self(broadcast::channel(Self::CAPACITY).0)
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::error::Error as StdError;
	// self
	use super::*;

	#[test]
	fn store_error_converts_into_crate_error_with_source() {
		let store_error = StoreError::Backend { message: "disk full".into() };
		let error: Error = store_error.clone().into();

		assert!(matches!(error, Error::Storage(_)));
		assert!(error.to_string().contains("disk full"));

		let source = StdError::source(&error)
			.expect("Crate error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}

	#[test]
	fn event_hub_skips_unchanged_values() {
		let hub = EventHub::default();
		let mut events = hub.subscribe();

		hub.publish("access_token", Some("a".into()), Some("a".into()));
		hub.publish("access_token", Some("a".into()), None);

		let event = events.try_recv().expect("Removal should publish an event.");

		assert_eq!(event.key, "access_token");
		assert_eq!(event.old_value.as_deref(), Some("a"));
		assert_eq!(event.new_value, None);
		assert!(events.try_recv().is_err(), "Unchanged value must not publish.");
	}
}
