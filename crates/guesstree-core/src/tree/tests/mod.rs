mod game_tests;

use std::{
    cell::{Cell, RefCell},
    fmt,
};

use crate::{KnowledgeStore, NodeRecord};

#[derive(Debug)]
pub(crate) struct StoreUnavailable;

impl fmt::Display for StoreUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "store unavailable")
    }
}

impl std::error::Error for StoreUnavailable {}

/// Store double that keeps the last saved record and can be switched to fail.
#[derive(Debug, Default)]
pub(crate) struct RecordingStore {
    pub saved: RefCell<Option<NodeRecord>>,
    pub saves: Cell<usize>,
    pub fail_load: bool,
    pub fail_save: bool,
}

impl RecordingStore {
    pub fn with(record: NodeRecord) -> Self {
        RecordingStore {
            saved: RefCell::new(Some(record)),
            ..Default::default()
        }
    }
}

impl KnowledgeStore for RecordingStore {
    type Error = StoreUnavailable;

    fn load(&self) -> Result<Option<NodeRecord>, Self::Error> {
        if self.fail_load {
            return Err(StoreUnavailable);
        }
        Ok(self.saved.borrow().clone())
    }

    fn save(&self, root: &NodeRecord) -> Result<(), Self::Error> {
        if self.fail_save {
            return Err(StoreUnavailable);
        }
        *self.saved.borrow_mut() = Some(root.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
