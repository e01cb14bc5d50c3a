//! # pc-storage
//!
//! The client's shared key-value storage, modelled on browser `localStorage`.
//!
//! Every value is a string under a string key. Several *tabs* can share one
//! store; a write made by one tab is announced to the others as a
//! [`StorageEvent`], never to the writer itself. Nothing read from storage is
//! trusted: callers re-validate on every read.
//!
//! Two backends:
//! - [`MemoryStorage`]: in-process, hands out tab handles and delivers
//!   change events.
//! - [`FileStorage`]: one file per key under a directory (0600 on Unix), so
//!   several processes can share it. It has no change notifications; the
//!   session watchdog's periodic pass covers that.

mod error;
mod events;
mod file;
pub mod form;
mod memory;

use std::sync::Arc;

pub use error::StorageError;
pub use events::{StorageEvent, StorageEvents, TabId};
pub use file::FileStorage;
pub use form::{FORM_STATE_KEY, clear_form, load_form, save_form};
pub use memory::{MemoryStorage, MemoryTab};

/// Key holding the session token.
pub const TOKEN_KEY: &str = "token";

/// A handle onto the shared key-value store, as seen by one tab.
pub trait SharedStorage: Send + Sync {
    /// Read the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Change events caused by *other* tabs, if this backend can deliver them.
    fn subscribe(&self) -> Option<StorageEvents>;
}

impl<S: SharedStorage + ?Sized> SharedStorage for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn subscribe(&self) -> Option<StorageEvents> {
        (**self).subscribe()
    }
}
