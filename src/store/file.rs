//! Simple file-backed [`Storage`] for kiosks, CLIs, and long-lived admin sessions.

// std
use std::{
	fs::{self, File},
	io::Write,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	store::{EventHub, Storage, StorageEvents, StoreError, StoreFuture},
};

type Snapshot = BTreeMap<String, String>;

/// Persists every key to a JSON object file after each mutation.
///
/// Several processes may share one file the way browser tabs share local storage. A process
/// does not observe another's writes until it calls [`FileStorage::reload`], which publishes a
/// [`StorageEvent`](crate::store::StorageEvent) for every key that changed on disk.
#[derive(Clone, Debug)]
pub struct FileStorage {
	path: PathBuf,
	inner: Arc<RwLock<Snapshot>>,
	events: EventHub,
}
impl FileStorage {
	/// Opens (or creates) a store at the provided path, eagerly loading existing data.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;

		let snapshot = Self::load_snapshot(&path)?;

		Ok(Self { path, inner: Arc::new(RwLock::new(snapshot)), events: EventHub::default() })
	}

	/// Location of the backing file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Re-reads the file and publishes events for keys changed by other writers.
	///
	/// Returns the number of keys whose value differed from the in-memory view.
	pub fn reload(&self) -> Result<usize, StoreError> {
		let on_disk = Self::load_snapshot(&self.path)?;
		let mut guard = self.inner.write();
		let mut changed = Vec::new();

		for (key, value) in &on_disk {
			if guard.get(key) != Some(value) {
				changed.push((key.clone(), guard.get(key).cloned(), Some(value.clone())));
			}
		}
		for (key, value) in guard.iter() {
			if !on_disk.contains_key(key) {
				changed.push((key.clone(), Some(value.clone()), None));
			}
		}

		*guard = on_disk;

		drop(guard);

		let count = changed.len();

		for (key, old_value, new_value) in changed {
			self.events.publish(&key, old_value, new_value);
		}

		Ok(count)
	}

	fn load_snapshot(path: &Path) -> Result<Snapshot, StoreError> {
		if !path.exists() {
			return Ok(Snapshot::new());
		}

		let metadata = path.metadata().map_err(|e| StoreError::Backend {
			message: format!("Failed to inspect {}: {e}", path.display()),
		})?;

		if metadata.len() == 0 {
			return Ok(Snapshot::new());
		}

		let bytes = fs::read(path).map_err(|e| StoreError::Backend {
			message: format!("Failed to read {}: {e}", path.display()),
		})?;

		serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization {
			message: format!("Failed to parse {}: {e}", path.display()),
		})
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
				message: format!("Failed to create store directory {}: {e}", parent.display()),
			})?;
		}
		Ok(())
	}

	fn persist_locked(&self, contents: &Snapshot) -> Result<(), StoreError> {
		Self::ensure_parent_exists(&self.path)?;

		let serialized =
			serde_json::to_vec_pretty(contents).map_err(|e| StoreError::Serialization {
				message: format!("Failed to serialize store snapshot: {e}"),
			})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| StoreError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}
}
impl Storage for FileStorage {
	fn get_item<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>> {
		Box::pin(async move { Ok(self.inner.read().get(key).cloned()) })
	}

	fn set_item<'a>(&'a self, key: &'a str, value: String) -> StoreFuture<'a, ()> {
		Box::pin(async move {
			let previous = {
				let mut guard = self.inner.write();
				let previous = guard.insert(key.to_owned(), value.clone());

				if let Err(e) = self.persist_locked(&guard) {
					// Keep memory consistent with disk.
					match &previous {
						Some(old) => guard.insert(key.to_owned(), old.clone()),
						None => guard.remove(key),
					};

					return Err(e);
				}

				previous
			};

			self.events.publish(key, previous, Some(value));

			Ok(())
		})
	}

	fn remove_item<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>> {
		Box::pin(async move {
			let previous = {
				let mut guard = self.inner.write();
				let previous = guard.remove(key);

				if let Some(old) = &previous {
					if let Err(e) = self.persist_locked(&guard) {
						// Keep memory consistent with disk.
						guard.insert(key.to_owned(), old.clone());

						return Err(e);
					}
				}

				previous
			};

			self.events.publish(key, previous.clone(), None);

			Ok(previous)
		})
	}

	fn subscribe(&self) -> StorageEvents {
		self.events.subscribe()
	}
}
