//! Session token storage adapters.
//!
//! The file store goes through `cap_std` capability handles scoped to the
//! token file's parent directory rather than ambient `std::fs` paths.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;

use crate::domain::SessionToken;
use crate::domain::ports::{SessionStore, SessionStoreError};

/// Keeps the token for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<SessionToken>>,
}

impl MemorySessionStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn store_token(&self, token: &SessionToken) -> Result<(), SessionStoreError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        Ok(())
    }

    fn load_token(&self) -> Result<Option<SessionToken>, SessionStoreError> {
        Ok(self
            .token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Persists the token as a single-line text file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store backed by the file at `path`. Nothing is touched until first use.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the token file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_parent(&self, create: bool) -> io::Result<(Dir, OsString)> {
        let (parent, file_name) = parent_and_file_name(&self.path)?;
        if create {
            Dir::create_ambient_dir_all(parent, ambient_authority())?;
        }
        let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
        Ok((dir, file_name))
    }
}

impl SessionStore for FileSessionStore {
    fn store_token(&self, token: &SessionToken) -> Result<(), SessionStoreError> {
        let (dir, file_name) = self.open_parent(true).map_err(unavailable)?;
        dir.write(Path::new(&file_name), format!("{}\n", token.expose()))
            .map_err(unavailable)?;
        debug!(path = %self.path.display(), "session token stored");
        Ok(())
    }

    fn load_token(&self) -> Result<Option<SessionToken>, SessionStoreError> {
        let (dir, file_name) = match self.open_parent(false) {
            Ok(opened) => opened,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(unavailable(error)),
        };
        let contents = match dir.read_to_string(Path::new(&file_name)) {
            Ok(text) => text,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(unavailable(error)),
        };
        SessionToken::new(contents.trim_end_matches(['\r', '\n']))
            .map(Some)
            .map_err(|error| SessionStoreError::corrupt(error.to_string()))
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        let (dir, file_name) = match self.open_parent(false) {
            Ok(opened) => opened,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(error) => return Err(unavailable(error)),
        };
        match dir.remove_file(Path::new(&file_name)) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(unavailable(error)),
        }
    }
}

fn parent_and_file_name(path: &Path) -> io::Result<(&Path, OsString)> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("session path `{}` has no file name", path.display()),
        )
    })?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok((parent, file_name.to_os_string()))
}

fn unavailable(error: io::Error) -> SessionStoreError {
    SessionStoreError::unavailable(error.to_string())
}
