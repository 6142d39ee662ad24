//! Utility helpers: folders, file names, temp directories

use crate::{Error, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub struct Utils;

impl Utils {
    pub fn home_folder() -> Result<PathBuf> {
        if cfg!(unix) {
            env::var("HOME")
                .map(PathBuf::from)
                .map_err(|_| Error::OperationFailed("Could not find home folder".to_string()))
        } else if cfg!(windows) {
            let drive = env::var("HOMEDRIVE").unwrap_or_default();
            let path = env::var("HOMEPATH").unwrap_or_default();
            if drive.is_empty() && path.is_empty() {
                Err(Error::OperationFailed(
                    "Could not find home folder".to_string(),
                ))
            } else {
                Ok(PathBuf::from(format!("{}{}", drive, path)))
            }
        } else {
            Err(Error::OperationFailed(
                "Could not find home folder".to_string(),
            ))
        }
    }

    pub fn documents_folder() -> Result<PathBuf> {
        if cfg!(unix) {
            let home = Self::home_folder()?;
            Ok(home.join("Documents"))
        } else {
            Self::home_folder()
        }
    }

    /// A file name of the form `<prefix>YYYYMMDD_HHMMSS<postfix>`.
    pub fn date_time_filename(prefix: &str, postfix: &str) -> String {
        let now = chrono::Local::now();
        format!("{}{}{}", prefix, now.format("%Y%m%d_%H%M%S"), postfix)
    }

    pub fn shorten(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            text.chars().take(max_chars).collect()
        }
    }
}

/// A temp directory removed (with its files) on drop.
pub struct TempFolder {
    path: PathBuf,
}

impl TempFolder {
    pub fn new() -> Result<Self> {
        let mut path = env::temp_dir();
        let unique = format!(
            "reliefmesh_{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0)
        );
        path.push(unique);
        fs::create_dir_all(&path)
            .map_err(|e| Error::OperationFailed(format!("Failed to create temp dir: {}", e)))?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempFolder {
    fn drop(&mut self) {
        if let Ok(entries) = fs::read_dir(&self.path) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_file() {
                    let _ = fs::remove_file(path);
                }
            }
        }
        let _ = fs::remove_dir(&self.path);
    }
}
