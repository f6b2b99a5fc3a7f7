// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the newsletter pipeline.

use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A user-supplied argument (month, slug) is malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {what} at {}", .path.display())]
    ResourceNotFound { what: &'static str, path: PathBuf },

    #[error("Already exists: {} (use --force to overwrite)", .path.display())]
    AlreadyExists { path: PathBuf },

    /// One post file or bookmark entry could not be used. Never fatal:
    /// the locator and the snapshot reader log it and move on.
    #[error("Malformed record {item}: {reason}")]
    MalformedRecord { item: String, reason: String },

    #[error("Render error: {0}")]
    Render(String),

    #[error("Invalid bookmark snapshot {}: {reason}", .path.display())]
    InvalidSnapshot { path: PathBuf, reason: String },

    #[error("Invalid draft {}: {reason}", .path.display())]
    InvalidDraft { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn not_found<P: AsRef<Path>>(what: &'static str, path: P) -> Self {
        Error::ResourceNotFound {
            what,
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn already_exists<P: AsRef<Path>>(path: P) -> Self {
        Error::AlreadyExists {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn malformed<S: Into<String>, R: std::fmt::Display>(item: S, reason: R) -> Self {
        Error::MalformedRecord {
            item: item.into(),
            reason: reason.to_string(),
        }
    }

    pub fn io<P: AsRef<Path>>(path: P, source: std::io::Error) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// True for errors that end the run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::MalformedRecord { .. })
    }
}
