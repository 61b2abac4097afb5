use std::{collections::HashMap, hash::Hash, path::PathBuf, sync::Arc};
use tokio::{fs, sync::RwLock};

use crate::errors::ServiceError;

/// Generic JSON file-backed key-value map store.
///
/// Keeps a `HashMap<K, V>` in memory and rewrites the whole JSON file after
/// every mutation. Writers hold the lock until the file is replaced, so the
/// file never lags behind a later in-memory state.
pub struct JsonMapStore<K, V> {
    inner: RwLock<HashMap<K, V>>,
    file_path: PathBuf,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Eq + Hash + serde::Serialize + serde::de::DeserializeOwned + Clone,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Initialize the store from a path. Creates the file with an empty map if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| ServiceError::Db(e.to_string()))?;
            }
        }

        let map: HashMap<K, V> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => HashMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ServiceError::Db(format!("corrupt store {}: {e}", file_path.display())))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty: HashMap<K, V> = HashMap::new();
                Self::write_file(&file_path, &empty).await?;
                empty
            }
            Err(e) => return Err(ServiceError::Db(e.to_string())),
        };

        Ok(Arc::new(Self { inner: RwLock::new(map), file_path }))
    }

    async fn write_file(path: &PathBuf, map: &HashMap<K, V>) -> Result<(), ServiceError> {
        let data = serde_json::to_vec(map).map_err(|e| ServiceError::Db(e.to_string()))?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, data).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        fs::rename(&tmp, path).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(())
    }

    /// List all values.
    pub async fn values(&self) -> Vec<V> {
        let map = self.inner.read().await;
        map.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Insert or replace a value by key and persist.
    pub async fn insert(&self, key: K, value: V) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        map.insert(key, value);
        Self::write_file(&self.file_path, &map).await
    }

    /// Remove a key and persist; returns whether it existed.
    pub async fn remove(&self, key: &K) -> Result<bool, ServiceError> {
        let mut map = self.inner.write().await;
        let existed = map.remove(key).is_some();
        if existed {
            Self::write_file(&self.file_path, &map).await?;
        }
        Ok(existed)
    }

    /// Apply a mutation to the underlying map and persist. Nothing is written
    /// if the closure fails.
    pub async fn update_map<F, T>(&self, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut HashMap<K, V>) -> Result<T, ServiceError>,
    {
        let mut map = self.inner.write().await;
        let out = f(&mut map)?;
        Self::write_file(&self.file_path, &map).await?;
        Ok(out)
    }
}
