//! Stored admin session backed by a [`Storage`] backend.

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	store::{Storage, StorageEvents},
};

/// Fixed storage key holding the admin bearer token.
pub const TOKEN_KEY: &str = "access_token";

/// Reads and writes the admin token under [`TOKEN_KEY`].
///
/// The session is the only shared mutable state in the crate. Reads and clears are
/// whole-value operations, so the client and the guard never observe a partial update.
#[derive(Clone)]
pub struct Session {
	storage: Arc<dyn Storage>,
}
impl Session {
	/// Creates a session over the provided storage backend.
	pub fn new(storage: Arc<dyn Storage>) -> Self {
		Self { storage }
	}

	/// Returns the stored token; empty values count as absent.
	pub async fn token(&self) -> Result<Option<AccessToken>> {
		let raw = self.storage.get_item(TOKEN_KEY).await?;

		Ok(raw.filter(|value| !value.trim().is_empty()).map(AccessToken::new))
	}

	/// Persists a freshly issued token.
	pub async fn store_token(&self, token: &AccessToken) -> Result<()> {
		self.storage.set_item(TOKEN_KEY, token.expose().to_owned()).await?;

		Ok(())
	}

	/// Removes the stored token, returning whether one was present.
	pub async fn clear(&self) -> Result<bool> {
		Ok(self.storage.remove_item(TOKEN_KEY).await?.is_some())
	}

	/// Whether a token is currently stored.
	pub async fn has_token(&self) -> Result<bool> {
		Ok(self.token().await?.is_some())
	}

	/// Subscribes to change events from the backing storage.
	pub fn subscribe(&self) -> StorageEvents {
		self.storage.subscribe()
	}

	/// Backing storage handle.
	pub fn storage(&self) -> &Arc<dyn Storage> {
		&self.storage
	}
}
impl Debug for Session {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("Session(..)")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::store::MemoryStorage;

	#[tokio::test]
	async fn token_round_trip_and_clear() {
		let session = Session::new(Arc::new(MemoryStorage::default()));

		assert_eq!(session.token().await.expect("Read should succeed."), None);

		session.store_token(&AccessToken::new("jwt")).await.expect("Store should succeed.");

		let token = session.token().await.expect("Read should succeed.").expect("Token present.");

		assert_eq!(token.expose(), "jwt");
		assert!(session.clear().await.expect("Clear should succeed."));
		assert!(!session.clear().await.expect("Second clear should succeed."));
		assert!(!session.has_token().await.expect("Read should succeed."));
	}

	#[tokio::test]
	async fn blank_token_counts_as_absent() {
		let session =
			Session::new(Arc::new(MemoryStorage::with_entries([(TOKEN_KEY, "  ")])));

		assert!(!session.has_token().await.expect("Read should succeed."));
	}
}
