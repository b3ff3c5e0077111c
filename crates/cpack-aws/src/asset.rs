//! # Source Assets
//!
//! Deterministic fingerprinting of the local folder that feeds the bucket
//! deployment. The fingerprint covers relative paths and file contents in
//! sorted order, so an unchanged folder fingerprints identically across
//! synthesis runs and machines, and any content change forces the engine
//! to re-run the copy.

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use thiserror::Error;

/// Error while reading or fingerprinting a source folder.
#[derive(Error, Debug)]
pub enum AssetError {
    /// The source path does not exist.
    #[error("source folder not found: {0}")]
    SourceMissing(PathBuf),

    /// The source path exists but is not a directory.
    #[error("source path is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The source folder contains no files.
    #[error("source folder is empty: {0}")]
    EmptySource(PathBuf),

    /// A file inside the source folder could not be read.
    #[error("failed to read {path}: {source}")]
    Unreadable {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },
}

/// Deterministic content fingerprint of a source folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceFingerprint([u8; 32]);

impl SourceFingerprint {
    /// Fingerprint a source folder.
    ///
    /// Walks the folder recursively, sorts entries by relative path, and
    /// hashes each relative path followed by the file's bytes. Hidden
    /// files are included; symlinks are followed through `fs::read`.
    ///
    /// # Errors
    ///
    /// Returns `AssetError` if the folder is missing, not a directory,
    /// empty, or contains an unreadable file.
    pub fn of_folder(root: &Path) -> Result<Self, AssetError> {
        if !root.exists() {
            return Err(AssetError::SourceMissing(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(AssetError::NotADirectory(root.to_path_buf()));
        }

        let mut files = Vec::new();
        collect_files(root, root, &mut files)?;
        if files.is_empty() {
            return Err(AssetError::EmptySource(root.to_path_buf()));
        }
        files.sort();

        let mut hasher = Sha256::new();
        for relative in &files {
            // Path separator normalized so the fingerprint is portable.
            let name = relative.to_string_lossy().replace('\\', "/");
            hasher.update(name.as_bytes());
            hasher.update([0u8]);
            let contents = fs::read(root.join(relative)).map_err(|source| {
                AssetError::Unreadable {
                    path: root.join(relative),
                    source,
                }
            })?;
            hasher.update((contents.len() as u64).to_be_bytes());
            hasher.update(&contents);
        }

        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&hasher.finalize());
        Ok(Self(bytes))
    }

    /// Render the fingerprint as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for SourceFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn collect_files(
    root: &Path,
    dir: &Path,
    files: &mut Vec<PathBuf>,
) -> Result<(), AssetError> {
    let entries = fs::read_dir(dir).map_err(|source| AssetError::Unreadable {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| AssetError::Unreadable {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(root, &path, files)?;
        } else if let Ok(relative) = path.strip_prefix(root) {
            files.push(relative.to_path_buf());
        }
    }
    Ok(())
}
