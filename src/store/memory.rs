//! Thread-safe in-memory [`Storage`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	store::{EventHub, Storage, StorageEvents, StoreError, StoreFuture},
};

type StoreMap = Arc<RwLock<HashMap<String, String>>>;

/// Storage backend that keeps values in-process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
	map: StoreMap,
	events: EventHub,
}
impl MemoryStorage {
	/// Seeds the store with `entries` without publishing events.
	pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<String>,
		V: Into<String>,
	{
		let map = entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect();

		Self { map: Arc::new(RwLock::new(map)), events: EventHub::default() }
	}

	fn set_now(&self, key: &str, value: String) -> Result<(), StoreError> {
		let previous = self.map.write().insert(key.to_owned(), value.clone());

		self.events.publish(key, previous, Some(value));

		Ok(())
	}

	fn remove_now(&self, key: &str) -> Option<String> {
		let previous = self.map.write().remove(key);

		self.events.publish(key, previous.clone(), None);

		previous
	}
}
impl Storage for MemoryStorage {
	fn get_item<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>> {
		let map = self.map.clone();

		Box::pin(async move { Ok(map.read().get(key).cloned()) })
	}

	fn set_item<'a>(&'a self, key: &'a str, value: String) -> StoreFuture<'a, ()> {
		Box::pin(async move { self.set_now(key, value) })
	}

	fn remove_item<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>> {
		Box::pin(async move { Ok(self.remove_now(key)) })
	}

	fn subscribe(&self) -> StorageEvents {
		self.events.subscribe()
	}
}
