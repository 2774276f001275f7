use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use guesstree_core::{KnowledgeStore, NodeRecord};

use crate::{Format, StoreError};

#[derive(Debug, Default)]
struct Slot {
    encoded: Option<String>,
    saves: usize,
    fail_saves: bool,
}

/// In-memory knowledge base for tests and throwaway sessions.
///
/// The tree is kept encoded as JSON so a save/load cycle goes through the same
/// serialization as the file store. All clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Slot>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `root`.
    pub fn with_record(root: &NodeRecord) -> Result<Self, StoreError> {
        let store = Self::new();
        store.lock().encoded = Some(Format::Json.encode(root)?);
        Ok(store)
    }

    /// Create a store whose saves always fail, for exercising error paths.
    pub fn failing() -> Self {
        let store = Self::new();
        store.set_failing(true);
        store
    }

    /// Make subsequent saves fail (or succeed again).
    pub fn set_failing(&self, fail: bool) {
        self.lock().fail_saves = fail;
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.lock().saves
    }

    /// The encoded form of the last saved tree.
    pub fn contents(&self) -> Option<String> {
        self.lock().encoded.clone()
    }

    // A panic while holding the lock cannot leave the slot half-updated.
    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KnowledgeStore for MemoryStore {
    type Error = StoreError;

    fn load(&self) -> Result<Option<NodeRecord>, StoreError> {
        self.lock()
            .encoded
            .as_deref()
            .map(|text| Format::Json.decode(text))
            .transpose()
    }

    fn save(&self, root: &NodeRecord) -> Result<(), StoreError> {
        let mut slot = self.lock();
        if slot.fail_saves {
            return Err(StoreError::Unavailable {
                reason: "memory store is set to fail".to_string(),
            });
        }
        slot.encoded = Some(Format::Json.encode(root)?);
        slot.saves += 1;
        Ok(())
    }
}
