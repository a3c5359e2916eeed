//! Staged files and per-invocation scratch space.

use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// An object name paired with its local copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    name: String,
    local_path: PathBuf,
}

impl StagedFile {
    pub fn new(name: impl Into<String>, local_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            local_path: local_path.into(),
        }
    }

    /// Object name in the bucket.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Location of the local copy.
    pub fn local_path(&self) -> &Path {
        &self.local_path
    }

    /// Where an in-flight download is written before it is complete.
    pub fn partial_path(&self) -> PathBuf {
        let mut path = self.local_path.clone().into_os_string();
        path.push(".part");
        PathBuf::from(path)
    }
}

/// Root directory under which every invocation gets its own subdirectory.
#[derive(Debug, Clone)]
pub struct ScratchSpace {
    root: PathBuf,
}

impl ScratchSpace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the root directory if it does not exist.
    pub async fn ensure(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.root).await
    }

    /// Scratch area for a single invocation.
    pub fn invocation(&self, id: Uuid) -> InvocationScratch {
        InvocationScratch {
            dir: self.root.join(id.to_string()),
        }
    }
}

/// Scratch directory owned by one pipeline invocation.
///
/// Two invocations for the same object name never share local paths, and
/// each invocation stages exactly one raw and one processed file, so local
/// names do not depend on the object name beyond its extension.
#[derive(Debug, Clone)]
pub struct InvocationScratch {
    dir: PathBuf,
}

impl InvocationScratch {
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Staged location of a raw video.
    pub fn raw_file(&self, name: &str) -> StagedFile {
        StagedFile::new(name, self.dir.join("raw").join(local_file_name(name)))
    }

    /// Staged location of a processed video.
    pub fn processed_file(&self, name: &str) -> StagedFile {
        StagedFile::new(name, self.dir.join("processed").join(local_file_name(name)))
    }

    /// Removes the invocation directory. Missing directories are fine.
    pub async fn remove(&self) -> std::io::Result<()> {
        match fs::remove_dir_all(&self.dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

const LOCAL_STEM: &str = "video";

/// Longest extension carried over to the local name.
const MAX_EXTENSION_LEN: usize = 8;

/// Fixed local name for a staged object, keeping a short ASCII extension so
/// ffmpeg can pick the output container from it.
fn local_file_name(name: &str) -> String {
    let extension = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        });
    match extension {
        Some(ext) => format!("{}.{}", LOCAL_STEM, ext),
        None => LOCAL_STEM.to_string(),
    }
}

/// Deletes a staged file, treating an already missing file as success.
///
/// Returns whether a file was actually removed.
pub async fn remove_staged(staged: &StagedFile) -> std::io::Result<bool> {
    match fs::remove_file(staged.local_path()).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
