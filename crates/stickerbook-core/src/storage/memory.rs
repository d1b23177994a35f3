//! In-memory storage implementation.

use super::{BoxFuture, Storage, StorageError, StorageResult, decode_scene, encode_scene};
use crate::scene::Scene;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use. Holds encoded
/// snapshots, not scene values.
#[derive(Default)]
pub struct MemoryStorage {
    snapshots: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn save(&self, scene: &Scene) -> BoxFuture<'_, StorageResult<()>> {
        let id = scene.id.clone();
        let encoded = encode_scene(scene);
        Box::pin(async move {
            let mut snapshots = self
                .snapshots
                .write()
                .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
            snapshots.insert(id, encoded?);
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<Scene>> {
        let id = id.to_string();
        Box::pin(async move {
            let snapshots = self
                .snapshots
                .read()
                .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
            let json = snapshots.get(&id).ok_or(StorageError::NotFound(id))?;
            decode_scene(json)
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            let mut snapshots = self
                .snapshots
                .write()
                .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
            snapshots.remove(&id);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let snapshots = self
                .snapshots
                .read()
                .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
            Ok(snapshots.keys().cloned().collect())
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let id = id.to_string();
        Box::pin(async move {
            let snapshots = self
                .snapshots
                .read()
                .map_err(|e| StorageError::Other(format!("lock error: {e}")))?;
            Ok(snapshots.contains_key(&id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::PlacedSticker;
    use kurbo::Point;

    fn block_on<F: std::future::Future>(f: F) -> F::Output {
        // Simple blocking executor for tests
        use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

        fn dummy_raw_waker() -> RawWaker {
            fn no_op(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker {
                dummy_raw_waker()
            }
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
            RawWaker::new(std::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
        let mut cx = Context::from_waker(&waker);
        let mut f = std::pin::pin!(f);

        loop {
            match f.as_mut().poll(&mut cx) {
                Poll::Ready(result) => return result,
                Poll::Pending => {}
            }
        }
    }

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let mut scene = Scene::new();
        scene.add_sticker(PlacedSticker::new("star", Point::new(1.0, 2.0)));

        block_on(storage.save(&scene)).unwrap();
        let loaded = block_on(storage.load(&scene.id)).unwrap();

        assert_eq!(loaded.id, scene.id);
        assert_eq!(loaded.stickers, scene.stickers);
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = block_on(storage.load("nonexistent"));

        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_exists_and_delete() {
        let storage = MemoryStorage::new();
        let scene = Scene::new();

        assert!(!block_on(storage.exists(&scene.id)).unwrap());
        block_on(storage.save(&scene)).unwrap();
        assert!(block_on(storage.exists(&scene.id)).unwrap());

        block_on(storage.delete(&scene.id)).unwrap();
        assert!(!block_on(storage.exists(&scene.id)).unwrap());
    }

    #[test]
    fn test_list() {
        let storage = MemoryStorage::new();
        let a = Scene::new();
        let b = Scene::new();

        block_on(storage.save(&a)).unwrap();
        block_on(storage.save(&b)).unwrap();

        let list = block_on(storage.list()).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains(&a.id));
        assert!(list.contains(&b.id));
    }
}
