mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::{DEFAULT_KNOWLEDGE_BASE, FileStore, Format, YAML_MAX_DEPTH};
pub use memory::MemoryStore;
