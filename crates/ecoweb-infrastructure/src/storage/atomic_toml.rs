//! Atomic TOML file operations.
//!
//! Writes go through a temporary sibling file that is fsynced and renamed over
//! the target, so readers never observe a half-written config or session.

use ecoweb_core::EcowebError;
use fs2::FileExt;
use serde::{Serialize, de::DeserializeOwned};
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum AtomicTomlError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    /// The exclusive update lock could not be taken.
    Lock(String),
    /// The update closure refused the edited record; nothing was written.
    Rejected(EcowebError),
}

impl std::fmt::Display for AtomicTomlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicTomlError::Io(e) => write!(f, "I/O error: {}", e),
            AtomicTomlError::Parse(e) => write!(f, "TOML parse error: {}", e),
            AtomicTomlError::Serialize(e) => write!(f, "TOML serialization error: {}", e),
            AtomicTomlError::Lock(e) => write!(f, "Lock error: {}", e),
            AtomicTomlError::Rejected(e) => write!(f, "Update rejected: {}", e),
        }
    }
}

impl std::error::Error for AtomicTomlError {}

impl From<std::io::Error> for AtomicTomlError {
    fn from(e: std::io::Error) -> Self {
        AtomicTomlError::Io(e)
    }
}

impl From<toml::de::Error> for AtomicTomlError {
    fn from(e: toml::de::Error) -> Self {
        AtomicTomlError::Parse(e)
    }
}

impl From<toml::ser::Error> for AtomicTomlError {
    fn from(e: toml::ser::Error) -> Self {
        AtomicTomlError::Serialize(e)
    }
}

impl From<AtomicTomlError> for EcowebError {
    fn from(e: AtomicTomlError) -> Self {
        match e {
            AtomicTomlError::Io(e) => e.into(),
            AtomicTomlError::Parse(e) => e.into(),
            AtomicTomlError::Serialize(e) => e.into(),
            AtomicTomlError::Lock(message) => EcowebError::io(message),
            AtomicTomlError::Rejected(e) => e,
        }
    }
}

/// One TOML document on disk.
///
/// - `save` writes `.<name>.tmp`, fsyncs it and renames it over the target
/// - `update` runs under an exclusive `fs2` lock on `<name>.lock`
/// - `private` files are created owner-only (0600 on Unix)
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    private: bool,
    _record: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            private: false,
            _record: PhantomData,
        }
    }

    pub fn private(mut self) -> Self {
        self.private = true;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `None` when the file is missing or blank.
    pub fn load(&self) -> Result<Option<T>, AtomicTomlError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(toml::from_str(&content)?))
    }

    pub fn save(&self, data: &T) -> Result<(), AtomicTomlError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let serialized = toml::to_string_pretty(data)?;

        let tmp = self.sibling(".", ".tmp");
        let mut file = File::create(&tmp)?;
        if self.private {
            restrict_permissions(&tmp)?;
        }
        file.write_all(serialized.as_bytes())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Deletes the file. A missing file is not an error.
    pub fn remove(&self) -> Result<(), AtomicTomlError> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    /// Loads (or starts from `default_value`), applies `f`, saves.
    ///
    /// Holds the lock for the whole cycle; nothing is written when `f` fails.
    pub fn update<F>(&self, default_value: T, f: F) -> Result<T, AtomicTomlError>
    where
        F: FnOnce(&mut T) -> Result<(), AtomicTomlError>,
    {
        let _lock = UpdateLock::acquire(self.sibling("", ".lock"))?;

        let mut data = self.load()?.unwrap_or(default_value);
        f(&mut data)?;
        self.save(&data)?;
        Ok(data)
    }

    /// `<prefix><file name><suffix>` next to the target.
    fn sibling(&self, prefix: &str, suffix: &str) -> PathBuf {
        let mut name = OsString::from(prefix);
        name.push(self.path.file_name().unwrap_or_default());
        name.push(suffix);
        self.path.with_file_name(name)
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Released, and its file removed, on drop.
struct UpdateLock {
    file: File,
    path: PathBuf,
}

impl UpdateLock {
    fn acquire(path: PathBuf) -> Result<Self, AtomicTomlError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;
        file.lock_exclusive()
            .map_err(|e| AtomicTomlError::Lock(format!("{}: {}", path.display(), e)))?;
        Ok(Self { file, path })
    }
}

impl Drop for UpdateLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
        let _ = fs::remove_file(&self.path);
    }
}
