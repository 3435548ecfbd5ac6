//! Storage abstraction for the gdoc documentation renderer.
//!
//! This crate provides a [`Storage`] trait for reading the flat files that make
//! up a documentation tree (`versions.yml`, `sidebar.yml`, `_source/**/*.md`).
//! Keeping I/O behind a trait enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Clean separation** between request resolution and file access
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with a byte-level `read()` method
//! - [`FsStorage`] implementation rooted at a documents directory
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::{Path, PathBuf};
//! use gdoc_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("storage/docs"));
//! let bytes = storage.read(Path::new("versions.yml"))?;
//! let text = String::from_utf8_lossy(&bytes);
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind};
