//! Collection repositories for content resources.
//!
//! [`ApiRepository`] talks to the REST backend and is what the admin pages use by default.
//! [`StorageRepository`] keeps each collection as a JSON array in a [`Storage`] backend under
//! the resource's fixed key, matching the site's earlier local-only deployment.

// std
use std::marker::PhantomData;
// self
use crate::{
	_prelude::*,
	content::Resource,
	http::{ApiClient, decode_json},
	store::{Storage, StoreError},
};

/// Boxed future returned by [`Repository`] operations.
pub type RepoFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// CRUD access to one resource collection.
pub trait Repository<R>
where
	Self: Send + Sync,
	R: Resource,
{
	/// Fetches the whole collection in backend order.
	fn list(&self) -> RepoFuture<'_, Vec<R>>;

	/// Fetches one item.
	fn get<'a>(&'a self, id: &'a str) -> RepoFuture<'a, R>;

	/// Creates an item and returns it with its assigned id.
	fn create<'a>(&'a self, payload: &'a R::Payload) -> RepoFuture<'a, R>;

	/// Replaces the item `id`.
	fn update<'a>(&'a self, id: &'a str, payload: &'a R::Payload) -> RepoFuture<'a, R>;

	/// Deletes the item `id`.
	fn delete<'a>(&'a self, id: &'a str) -> RepoFuture<'a, ()>;
}

/// REST-backed repository (`GET/POST /<collection>`, `GET/PUT/DELETE /<collection>/{id}`).
pub struct ApiRepository<R> {
	client: ApiClient,
	_resource: PhantomData<fn() -> R>,
}
impl<R> ApiRepository<R>
where
	R: Resource,
{
	/// Wraps a client.
	pub fn new(client: ApiClient) -> Self {
		Self { client, _resource: PhantomData }
	}

	/// Underlying client.
	pub fn client(&self) -> &ApiClient {
		&self.client
	}
}
impl<R> Clone for ApiRepository<R> {
	fn clone(&self) -> Self {
		Self { client: self.client.clone(), _resource: PhantomData }
	}
}
impl<R> Debug for ApiRepository<R>
where
	R: Resource,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiRepository").field("collection", &R::COLLECTION).finish()
	}
}
impl<R> Repository<R> for ApiRepository<R>
where
	R: Resource,
{
	fn list(&self) -> RepoFuture<'_, Vec<R>> {
		Box::pin(self.client.get(R::COLLECTION))
	}

	fn get<'a>(&'a self, id: &'a str) -> RepoFuture<'a, R> {
		Box::pin(async move { self.client.get(&R::item_path(id)).await })
	}

	fn create<'a>(&'a self, payload: &'a R::Payload) -> RepoFuture<'a, R> {
		Box::pin(self.client.post(R::COLLECTION, payload))
	}

	/// Backends that answer `PUT` with a status message instead of the stored record get the
	/// record rebuilt from `payload`.
	fn update<'a>(&'a self, id: &'a str, payload: &'a R::Payload) -> RepoFuture<'a, R> {
		Box::pin(async move {
			let path = R::item_path(id);
			let body = serde_json::to_value(payload)
				.map_err(crate::error::ConfigError::Body)
				.map_err(Error::from)?;
			let response = self.client.send(Method::PUT, &path, Some(body)).await?;

			match decode_json::<R>(&path, &response.body) {
				Ok(record) => Ok(record),
				Err(e) => {
					tracing::debug!(error = %e, "update response is not a record; using payload");

					Ok(R::from_payload(id.to_owned(), payload.clone()))
				},
			}
		})
	}

	fn delete<'a>(&'a self, id: &'a str) -> RepoFuture<'a, ()> {
		Box::pin(async move { self.client.delete(&R::item_path(id)).await })
	}
}

/// Repository that keeps the collection as a JSON array under [`Resource::STORAGE_KEY`].
///
/// Mutations run read-modify-write under one async lock per repository handle. Ids are
/// random 16-digit hex strings.
pub struct StorageRepository<R> {
	storage: Arc<dyn Storage>,
	write_lock: Arc<AsyncMutex<()>>,
	_resource: PhantomData<fn() -> R>,
}
impl<R> StorageRepository<R>
where
	R: Resource,
{
	/// Creates a repository over `storage`.
	pub fn new(storage: Arc<dyn Storage>) -> Self {
		Self { storage, write_lock: Arc::new(AsyncMutex::new(())), _resource: PhantomData }
	}

	async fn read_all(&self) -> Result<Vec<R>> {
		let Some(raw) = self.storage.get_item(R::STORAGE_KEY).await? else {
			return Ok(Vec::new());
		};

		serde_json::from_str(&raw).map_err(|e| {
			StoreError::Serialization {
				message: format!("`{}` does not hold a {} list: {e}", R::STORAGE_KEY, R::LABEL),
			}
			.into()
		})
	}

	async fn write_all(&self, items: &[R]) -> Result<()> {
		let raw = serde_json::to_string(items)
			.map_err(|e| StoreError::Serialization { message: e.to_string() })?;

		self.storage.set_item(R::STORAGE_KEY, raw).await?;

		Ok(())
	}

	fn not_found(id: &str) -> Error {
		Error::NotFound { resource: R::LABEL, id: id.to_owned() }
	}
}
impl<R> Clone for StorageRepository<R> {
	fn clone(&self) -> Self {
		Self {
			storage: self.storage.clone(),
			write_lock: self.write_lock.clone(),
			_resource: PhantomData,
		}
	}
}
impl<R> Debug for StorageRepository<R>
where
	R: Resource,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("StorageRepository").field("key", &R::STORAGE_KEY).finish()
	}
}
impl<R> Repository<R> for StorageRepository<R>
where
	R: Resource,
{
	fn list(&self) -> RepoFuture<'_, Vec<R>> {
		Box::pin(self.read_all())
	}

	fn get<'a>(&'a self, id: &'a str) -> RepoFuture<'a, R> {
		Box::pin(async move {
			self.read_all()
				.await?
				.into_iter()
				.find(|item| item.id() == id)
				.ok_or_else(|| Self::not_found(id))
		})
	}

	fn create<'a>(&'a self, payload: &'a R::Payload) -> RepoFuture<'a, R> {
		Box::pin(async move {
			let _guard = self.write_lock.lock().await;
			let mut items = self.read_all().await?;
			let record = R::from_payload(generate_id(), payload.clone());

			items.push(record.clone());
			self.write_all(&items).await?;

			Ok(record)
		})
	}

	fn update<'a>(&'a self, id: &'a str, payload: &'a R::Payload) -> RepoFuture<'a, R> {
		Box::pin(async move {
			let _guard = self.write_lock.lock().await;
			let mut items = self.read_all().await?;
			let slot =
				items.iter_mut().find(|item| item.id() == id).ok_or_else(|| Self::not_found(id))?;
			let record = R::from_payload(id.to_owned(), payload.clone());

			*slot = record.clone();
			self.write_all(&items).await?;

			Ok(record)
		})
	}

	fn delete<'a>(&'a self, id: &'a str) -> RepoFuture<'a, ()> {
		Box::pin(async move {
			let _guard = self.write_lock.lock().await;
			let mut items = self.read_all().await?;
			let before = items.len();

			items.retain(|item| item.id() != id);

			if items.len() == before {
				return Err(Self::not_found(id));
			}

			self.write_all(&items).await
		})
	}
}

fn generate_id() -> String {
	format!("{:016x}", rand::random::<u64>())
}
