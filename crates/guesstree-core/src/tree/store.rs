use std::error::Error;

use crate::tree::record::NodeRecord;

/// Port for loading and saving the knowledge base.
///
/// Implementations decide the storage medium and format. The game calls `load` once when it
/// opens and `save` after every change to the tree.
pub trait KnowledgeStore {
    type Error: Error + Send + Sync + 'static;

    /// Return the previously saved tree, or `None` if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored data exists but cannot be read or decoded.
    fn load(&self) -> Result<Option<NodeRecord>, Self::Error>;

    /// Write the whole tree, replacing anything saved before.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written. Nothing is retried.
    fn save(&self, root: &NodeRecord) -> Result<(), Self::Error>;
}

impl<S: KnowledgeStore + ?Sized> KnowledgeStore for &S {
    type Error = S::Error;

    fn load(&self) -> Result<Option<NodeRecord>, Self::Error> {
        (**self).load()
    }

    fn save(&self, root: &NodeRecord) -> Result<(), Self::Error> {
        (**self).save(root)
    }
}

impl<S: KnowledgeStore + ?Sized> KnowledgeStore for Box<S> {
    type Error = S::Error;

    fn load(&self) -> Result<Option<NodeRecord>, Self::Error> {
        (**self).load()
    }

    fn save(&self, root: &NodeRecord) -> Result<(), Self::Error> {
        (**self).save(root)
    }
}
