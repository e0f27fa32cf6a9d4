use crate::core::error::StoreError;
use crate::utils::fs::write_replace;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::info;

/// A flat JSON array of objects stored in one file (classes, equipment).
pub struct JsonListStore {
    name: &'static str,
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonListStore {
    pub fn new(name: &'static str, path: PathBuf) -> Self {
        Self {
            name,
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write an empty array if the file does not exist yet.
    /// Returns true when the file was created.
    pub async fn ensure_initialized(&self) -> Result<bool, StoreError> {
        if fs::try_exists(&self.path).await? {
            return Ok(false);
        }
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(e.into()),
        };
        file.write_all(b"[]").await?;
        file.flush().await?;

        info!(store = self.name, path = %self.path.display(), "List store created");
        Ok(true)
    }

    /// File content exactly as stored.
    pub async fn list_raw(&self) -> Result<Vec<u8>, StoreError> {
        Ok(fs::read(&self.path).await?)
    }

    pub async fn list(&self) -> Result<Vec<Value>, StoreError> {
        let raw = self.list_raw().await?;
        self.decode(&raw)
    }

    /// Append `item` with a server-assigned id and rewrite the file.
    ///
    /// Any `id` already present in `item` is overwritten. Returns the stored
    /// item.
    pub async fn append(&self, mut item: Map<String, Value>) -> Result<Value, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut items = self.list().await?;
        let id = next_item_id(&items, crate::utils::time::current_timestamp_millis())?;
        item.insert("id".to_string(), Value::from(id));

        let item = Value::Object(item);
        items.push(item.clone());
        write_replace(&self.path, &serde_json::to_vec(&items)?).await?;

        info!(store = self.name, item_id = id, total = items.len(), "Item saved");
        Ok(item)
    }

    fn decode(&self, raw: &[u8]) -> Result<Vec<Value>, StoreError> {
        match serde_json::from_slice::<Value>(raw)? {
            Value::Array(items) => Ok(items),
            _ => Err(StoreError::NotAList(self.path.clone())),
        }
    }
}

/// Id for a new item: the current epoch millis, bumped past the highest
/// existing id when the clock has not moved on.
pub fn next_item_id(items: &[Value], now_millis: i64) -> Result<i64, StoreError> {
    let max_existing = items
        .iter()
        .filter_map(|item| item.get("id").and_then(Value::as_i64))
        .max();

    match max_existing {
        Some(max) if max >= now_millis => max
            .checked_add(1)
            .ok_or_else(|| StoreError::IdsExhausted(max.to_string())),
        _ => Ok(now_millis),
    }
}
