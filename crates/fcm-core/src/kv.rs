//! String key-value persistence (the CLI's stand-in for browser local storage).
//!
//! Values are whole JSON documents; every write replaces the previous value
//! for that key in one step.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;
const EXTENSION: &str = ".json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{op} {path}: {source}")]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("encode {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("store location unavailable: {0}")]
    Location(String),
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// One file per key under a directory: `<dir>/<encoded key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default location: `~/.local/state/fcm/store/`.
    pub fn open_default() -> Result<Self, StoreError> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("fcm")
            .map_err(|e| StoreError::Location(e.to_string()))?;
        let dir = xdg_dirs
            .create_state_directory("store")
            .map_err(|e| StoreError::Location(e.to_string()))?;
        Ok(Self::new(dir))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}{}", file_stem(key), EXTENSION))
    }
}

/// File name stem for `key`, at most `NAME_MAX` bytes once the extension is added.
/// Keys whose encoding is too long keep a readable prefix followed by `~` and the
/// SHA-256 of the full key. `~` is always escaped by [`encode_key`], so these
/// stems never collide with short ones.
fn file_stem(key: &str) -> String {
    let encoded = encode_key(key);
    let max_stem = NAME_MAX - EXTENSION.len();
    if encoded.len() <= max_stem {
        return encoded;
    }
    let digest = hex::encode(Sha256::digest(key.as_bytes()));
    let take = max_stem - digest.len() - 1;
    format!("{}~{}", &encoded[..take], digest)
}

/// Percent-encode every byte outside `[A-Za-z0-9._@-]` so any identity maps to
/// a distinct, portable file name.
fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for b in key.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'@' | b'-') {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{:02X}", b));
        }
    }
    // A leading dot would hide the file and allow "." / "..".
    if out.starts_with('.') {
        out.replace_range(..1, "%2E");
    }
    out
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { op: "read", path, source }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let io_err = |op, source| StoreError::Io { op, path: path.clone(), source };
        std::fs::create_dir_all(&self.dir).map_err(|e| io_err("create dir", e))?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir).map_err(|e| io_err("create temp", e))?;
        tmp.write_all(value.as_bytes()).map_err(|e| io_err("write", e))?;
        tmp.persist(&path).map_err(|e| io_err("replace", e.error))?;
        tracing::debug!(key, path = %path.display(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { op: "remove", path, source }),
        }
    }
}

/// In-process store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    map: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.map.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.map.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.map.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_key_keeps_safe_chars() {
        assert_eq!(encode_key("fcm_history_alice"), "fcm_history_alice");
        assert_eq!(encode_key("fcm_history_a@b.io"), "fcm_history_a@b.io");
    }

    #[test]
    fn encode_key_escapes_separators_and_dots() {
        assert_eq!(encode_key("a/b c"), "a%2Fb%20c");
        assert_eq!(encode_key(".."), "%2E.");
        assert_eq!(encode_key("100%"), "100%25");
        assert_ne!(encode_key("a/b"), encode_key("a%2Fb"));
    }

    #[test]
    fn long_keys_are_clamped_to_name_max() {
        let long = format!("fcm_history_{}", "山".repeat(27));
        let stem = file_stem(&long);
        assert!(stem.len() + EXTENSION.len() <= NAME_MAX, "{} bytes", stem.len());
        assert!(stem.starts_with("fcm_history_%E5%B1%B1"));
        assert_eq!(stem, file_stem(&long));

        let other = format!("fcm_history_{}", "山".repeat(28));
        assert_ne!(stem, file_stem(&other));
        assert_eq!(file_stem("fcm_history_alice"), "fcm_history_alice");
    }

    #[test]
    fn file_store_accepts_long_non_ascii_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        let key = format!("fcm_history_{}", "山".repeat(40));
        store.set(&key, "[1]").unwrap();
        assert_eq!(store.get(&key).unwrap().as_deref(), Some("[1]"));
        store.remove(&key).unwrap();
        assert_eq!(store.get(&key).unwrap(), None);
    }

    #[test]
    fn file_store_set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("store"));
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "[1]").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("[1]"));

        store.set("k", "[2,1]").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("[2,1]"));

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
        // Removing a missing key is fine.
        store.remove("k").unwrap();
    }

    #[test]
    fn file_store_keys_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.set("fcm_history_a", "a").unwrap();
        store.set("fcm_history_b", "b").unwrap();
        assert_eq!(store.get("fcm_history_a").unwrap().as_deref(), Some("a"));
        assert_eq!(store.get("fcm_history_b").unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn memory_store_clones_share_state() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.set("x", "1").unwrap();
        assert_eq!(b.get("x").unwrap().as_deref(), Some("1"));
    }
}
