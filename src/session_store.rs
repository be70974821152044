use std::{
    fmt::Debug,
    io::{self, BufReader, BufWriter},
    path::PathBuf,
};

use derive_more::{AsRef, Display, From};
use fs_err::File;
use serde::{Deserialize, Serialize};

/// Login data that survives between runs.
#[derive(Default, Serialize, Deserialize)]
pub struct SessionStore {
    pub student_id: Option<jwch_utils::student_id::StudentId>,
    pub identifier: Identifier,
    /// Cookie jar serialized by `reqwest_cookie_store`.
    pub cookie_jar: String,
}
impl Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("student_id", &self.student_id)
            .field("identifier", &self.identifier)
            .finish_non_exhaustive()
    }
}

/// The `id` query parameter appended to every authenticated request.
#[derive(
    Clone, Default, PartialEq, Eq, Debug, From, AsRef, Display, Serialize, Deserialize,
)]
#[as_ref(forward)]
pub struct Identifier(String);
impl Identifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl SessionStore {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, SessionStoreLoadError> {
        Ok(serde_json::from_reader(BufReader::new(File::open(path)?))?)
    }

    pub fn save(&self, path: impl Into<PathBuf>) -> std::io::Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(writer, self)?;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionStoreLoadError {
    #[error("Session store was not found.")]
    NotFound,
    #[error("An I/O error occurred when loading the session store: {0:?}")]
    IOError(io::Error),
    #[error("The session store json file is corrupted and could not be loaded: {0:?}")]
    JsonError(#[from] serde_json::Error),
}
impl From<io::Error> for SessionStoreLoadError {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => Self::NotFound,
            _ => Self::IOError(e),
        }
    }
}
