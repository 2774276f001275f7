use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};

use guesstree_core::{KnowledgeStore, NodeRecord};
use serde::Deserialize;
use tracing::debug;

use crate::StoreError;

/// File name used when no knowledge base path is given.
pub const DEFAULT_KNOWLEDGE_BASE: &str = "knowledge_base.json";

/// Deepest tree written as YAML. serde_yaml refuses to read more than 128 nested mappings.
pub const YAML_MAX_DEPTH: usize = 120;

/// On-disk encoding of the knowledge base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Pretty-printed JSON.
    Json,
    Yaml,
}

impl Format {
    /// `.yaml` and `.yml` select YAML, anything else JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Format::Yaml
            }
            _ => Format::Json,
        }
    }

    /// Decode a knowledge base from text.
    /// JSON of any depth is accepted; the parser grows its stack on demand.
    pub fn decode(self, text: &str) -> Result<NodeRecord, StoreError> {
        let record = match self {
            Format::Json => {
                let mut json = serde_json::Deserializer::from_str(text);
                json.disable_recursion_limit();
                let record = NodeRecord::deserialize(serde_stacker::Deserializer::new(&mut json))?;
                json.end()?;
                record
            }
            Format::Yaml => serde_yaml::from_str(text)?,
        };
        Ok(record)
    }

    /// Encode a knowledge base as text.
    /// YAML output is refused for trees deeper than `YAML_MAX_DEPTH`, which could not be read back.
    pub fn encode(self, root: &NodeRecord) -> Result<String, StoreError> {
        let mut text = match self {
            Format::Json => serde_json::to_string_pretty(root)?,
            Format::Yaml => {
                let depth = root.depth();
                if depth > YAML_MAX_DEPTH {
                    return Err(StoreError::TooDeep {
                        depth,
                        limit: YAML_MAX_DEPTH,
                    });
                }
                serde_yaml::to_string(root)?
            }
        };
        if !text.ends_with('\n') {
            text.push('\n');
        }
        Ok(text)
    }
}

/// Knowledge base kept in a single file.
///
/// A missing or empty file means nothing was saved yet. Saving rewrites the whole file
/// through a sibling temporary file that is renamed over the target, so readers never see a
/// half-written tree.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    format: Format,
}

impl FileStore {
    /// Store JSON at `path`.
    pub fn json(path: impl Into<PathBuf>) -> Self {
        FileStore {
            path: path.into(),
            format: Format::Json,
        }
    }

    /// Store YAML at `path`.
    pub fn yaml(path: impl Into<PathBuf>) -> Self {
        FileStore {
            path: path.into(),
            format: Format::Yaml,
        }
    }

    /// Pick the format from the file extension.
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = Format::from_path(&path);
        FileStore { path, format }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// Check whether a knowledge base file is present.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn io_error(&self, operation: &'static str, source: io::Error) -> StoreError {
        StoreError::Io {
            operation,
            path: self.path.clone(),
            source,
        }
    }
}

impl KnowledgeStore for FileStore {
    type Error = StoreError;

    fn load(&self) -> Result<Option<NodeRecord>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "knowledge base file not found");
                return Ok(None);
            }
            Err(err) => return Err(self.io_error("read", err)),
        };

        if text.trim().is_empty() {
            debug!(path = %self.path.display(), "knowledge base file is empty");
            return Ok(None);
        }

        let record = self.format.decode(&text)?;
        debug!(
            path = %self.path.display(),
            nodes = record.node_count(),
            "read knowledge base"
        );
        Ok(Some(record))
    }

    fn save(&self, root: &NodeRecord) -> Result<(), StoreError> {
        let text = self.format.encode(root)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.io_error("create directory for", err))?;
        }

        let temp = temp_path(&self.path);
        fs::write(&temp, text).map_err(|err| self.io_error("write", err))?;
        if let Err(err) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(self.io_error("replace", err));
        }

        debug!(
            path = %self.path.display(),
            nodes = root.node_count(),
            "wrote knowledge base"
        );
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from(DEFAULT_KNOWLEDGE_BASE));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn sample() -> NodeRecord {
        NodeRecord::question(
            "Is it edible?",
            NodeRecord::question(
                "Is it hard?",
                NodeRecord::leaf("Candy"),
                NodeRecord::leaf("Chocolate"),
            ),
            NodeRecord::leaf("Flowers"),
        )
    }

    fn deep(depth: usize) -> NodeRecord {
        let mut record = NodeRecord::leaf("item 0");
        for level in 1..depth {
            record = NodeRecord::question(
                format!("question {level}?"),
                record,
                NodeRecord::leaf(format!("item {level}")),
            );
        }
        record
    }

    #[test]
    fn deep_json_tree_roundtrips() {
        let dir = TempDir::new().expect("temp dir");
        let store = FileStore::json(dir.path().join("knowledge_base.json"));
        let record = deep(300);

        store.save(&record).expect("save");

        assert_eq!(store.load().expect("load"), Some(record));
    }

    #[test]
    fn yaml_keeps_trees_up_to_the_depth_limit() {
        let dir = TempDir::new().expect("temp dir");
        let store = FileStore::yaml(dir.path().join("kb.yaml"));
        let record = deep(YAML_MAX_DEPTH);

        store.save(&record).expect("save");

        assert_eq!(store.load().expect("load"), Some(record));
    }

    #[test]
    fn yaml_refuses_trees_it_cannot_read_back() {
        let dir = TempDir::new().expect("temp dir");
        let store = FileStore::yaml(dir.path().join("kb.yaml"));
        store.save(&sample()).expect("first save");

        let err = store.save(&deep(130)).expect_err("too deep for yaml");

        assert!(matches!(
            err,
            StoreError::TooDeep {
                depth: 130,
                limit: YAML_MAX_DEPTH
            }
        ));
        assert_eq!(store.load().expect("load"), Some(sample()));
    }

    #[test]
    fn trailing_json_is_rejected() {
        let err = Format::Json
            .decode("{ \"text\": \"Flowers\" } extra")
            .expect_err("trailing characters");
        assert!(matches!(err, StoreError::Json(_)));
    }

    #[test]
    fn format_follows_extension() {
        assert_eq!(Format::from_path(Path::new("kb.yaml")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("kb.YML")), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("kb.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("kb")), Format::Json);
    }

    #[test]
    fn missing_file_loads_as_nothing() {
        let dir = TempDir::new().expect("temp dir");
        let store = FileStore::json(dir.path().join("knowledge_base.json"));

        assert!(!store.exists());
        assert!(store.load().expect("load").is_none());
    }

    #[test]
    fn empty_file_loads_as_nothing() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("knowledge_base.json");
        fs::write(&path, "\n").expect("write");

        assert!(FileStore::json(&path).load().expect("load").is_none());
    }

    #[test]
    fn json_roundtrip() {
        let dir = TempDir::new().expect("temp dir");
        let store = FileStore::json(dir.path().join("knowledge_base.json"));

        store.save(&sample()).expect("save");

        assert!(store.exists());
        assert_eq!(store.load().expect("load"), Some(sample()));
        assert!(!temp_path(store.path()).exists());
    }

    #[test]
    fn yaml_roundtrip() {
        let dir = TempDir::new().expect("temp dir");
        let store = FileStore::for_path(dir.path().join("kb.yaml"));
        assert_eq!(store.format(), Format::Yaml);

        store.save(&sample()).expect("save");
        let text = fs::read_to_string(store.path()).expect("read");

        assert!(text.contains("Is it edible?"));
        assert!(!text.trim_start().starts_with('{'));
        assert_eq!(store.load().expect("load"), Some(sample()));
    }

    #[test]
    fn save_overwrites_previous_tree() {
        let dir = TempDir::new().expect("temp dir");
        let store = FileStore::json(dir.path().join("knowledge_base.json"));

        store.save(&sample()).expect("first save");
        store.save(&NodeRecord::leaf("Flowers")).expect("second save");

        assert_eq!(store.load().expect("load"), Some(NodeRecord::leaf("Flowers")));
    }

    #[test]
    fn save_creates_missing_directories() {
        let dir = TempDir::new().expect("temp dir");
        let store = FileStore::json(dir.path().join("nested/deeper/knowledge_base.json"));

        store.save(&sample()).expect("save");

        assert_eq!(store.load().expect("load"), Some(sample()));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("knowledge_base.json");
        fs::write(&path, "{ \"text\": ").expect("write");

        let err = FileStore::json(&path).load().expect_err("corrupt json");
        assert!(matches!(err, StoreError::Json(_)));
    }

    #[test]
    fn save_into_a_file_path_returns_error() {
        let dir = TempDir::new().expect("temp dir");
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").expect("write");
        let store = FileStore::json(blocker.join("knowledge_base.json"));

        let err = store.save(&sample()).expect_err("parent is a file");
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
