//! Persistence adapter: scene snapshots in and out of a backing store.
//!
//! The engine never talks to a store directly; the host wires a
//! [`Storage`] implementation to the session's scene-changed callback.
//! Stores hold the encoded wire format, not live scene values, so a
//! load always exercises the same decode path a reopened project does.

mod memory;

pub use memory::MemoryStorage;

use crate::scene::Scene;
use crate::snapshot::{self, SnapshotError};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("scene not found: {0}")]
    NotFound(String),
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
    #[error("io error: {0}")]
    Io(String),
    #[error("storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async storage operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// A backend holding scene snapshots keyed by scene id.
pub trait Storage: Send + Sync {
    /// Save a scene snapshot under its own id.
    fn save(&self, scene: &Scene) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a scene by id.
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<Scene>>;

    /// Delete a stored scene.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all stored scene ids.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check if a scene is stored.
    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

pub(crate) fn encode_scene(scene: &Scene) -> StorageResult<String> {
    Ok(snapshot::encode(scene)?)
}

pub(crate) fn decode_scene(json: &str) -> StorageResult<Scene> {
    Ok(snapshot::decode(json)?)
}
