//! Preference store backed by one JSON document on disk.
//!
//! The document lives inside a capability directory, so the store can only
//! ever touch its own file. Writes go through a sibling temporary file and a
//! rename.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::board::ports::{PreferenceError, PreferenceResult, PreferenceStore};

type PreferenceDocument = BTreeMap<String, String>;

/// File-backed [`PreferenceStore`].
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    dir: Arc<Dir>,
    file_name: String,
    write_lock: Arc<Mutex<()>>,
}

impl FilePreferenceStore {
    /// Creates a store for `file_name` inside an already opened directory.
    #[must_use]
    pub fn new(dir: Dir, file_name: impl Into<String>) -> Self {
        Self {
            dir: Arc::new(dir),
            file_name: file_name.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Opens a store at `path`; the parent directory must exist, the file
    /// is created on first write.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::Storage`] when the path has no file name or
    /// its parent directory cannot be opened.
    pub fn open(path: &Utf8Path) -> PreferenceResult<Self> {
        let file_name = path.file_name().ok_or_else(|| {
            PreferenceError::storage(std::io::Error::other("path must include a file name"))
        })?;
        let parent = path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let dir =
            Dir::open_ambient_dir(parent, ambient_authority()).map_err(PreferenceError::storage)?;
        Ok(Self::new(dir, file_name))
    }

    fn load(&self) -> PreferenceResult<PreferenceDocument> {
        let contents = match self.dir.read_to_string(&self.file_name) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(PreferenceDocument::new());
            }
            Err(err) => return Err(PreferenceError::storage(err)),
        };
        if contents.trim().is_empty() {
            return Ok(PreferenceDocument::new());
        }
        serde_json::from_str(&contents).map_err(|err| PreferenceError::Malformed {
            key: self.file_name.clone(),
            reason: err.to_string(),
        })
    }

    fn save(&self, document: &PreferenceDocument) -> PreferenceResult<()> {
        let encoded = serde_json::to_string_pretty(document).map_err(PreferenceError::storage)?;
        let temporary = format!("{}.tmp", self.file_name);
        self.dir
            .write(&temporary, encoded)
            .map_err(PreferenceError::storage)?;
        self.dir
            .rename(&temporary, &self.dir, &self.file_name)
            .map_err(PreferenceError::storage)
    }

    fn update(&self, change: impl FnOnce(&mut PreferenceDocument)) -> PreferenceResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|err| PreferenceError::storage(std::io::Error::other(err.to_string())))?;
        let mut document = self.load()?;
        change(&mut document);
        self.save(&document)
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> PreferenceResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> PreferenceResult<()> {
        self.update(|document| {
            document.insert(key.to_owned(), value.to_owned());
        })
    }

    fn remove(&self, key: &str) -> PreferenceResult<()> {
        self.update(|document| {
            document.remove(key);
        })
    }
}
