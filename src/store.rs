//! Collaborators the codec hands payloads to and pulls them back from.
//! The unpacker writes named payloads under an output root; the repacker
//! reads them back by the names recorded in the manifest.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use log::debug;

use crate::errors::PvzpakError;
use crate::manifest::Manifest;

pub(crate) const MANIFEST_FILE: &str = "manifest.json";

pub trait PayloadStore {
    fn write_payload(&mut self, name: &str, data: &[u8]) -> Result<(), PvzpakError>;
    /// `Ok(None)` when the store holds no payload under `name`.
    fn read_payload(&self, name: &str) -> Result<Option<Vec<u8>>, PvzpakError>;
}

/// Directory-backed store. Archive entry names use `\` as separator and are
/// mapped to host paths below `root`; parent traversal components are
/// stripped so an archive cannot escape the root.
#[derive(Debug)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        DirStore {
            root: root.as_ref().to_owned(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, name: &str) -> PathBuf {
        let mut path = self.root.clone();
        for part in name.split(['\\', '/']) {
            match Path::new(part).components().next() {
                Some(Component::Normal(part)) => path.push(part),
                _ => continue,
            }
        }
        path
    }

    pub fn store_manifest(&self, manifest: &Manifest) -> Result<(), PvzpakError> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.root.join(MANIFEST_FILE), manifest.to_json()?)?;
        Ok(())
    }

    pub fn load_manifest(&self) -> Result<Manifest, PvzpakError> {
        let bytes = fs::read(self.root.join(MANIFEST_FILE))?;
        Manifest::from_json(&bytes)
    }
}

impl PayloadStore for DirStore {
    fn write_payload(&mut self, name: &str, data: &[u8]) -> Result<(), PvzpakError> {
        let path = self.entry_path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        debug!("writing {} bytes to {}", data.len(), path.display());
        fs::write(path, data)?;
        Ok(())
    }

    fn read_payload(&self, name: &str) -> Result<Option<Vec<u8>>, PvzpakError> {
        match fs::read(self.entry_path(name)) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory store for tests and embedders.
#[derive(Debug, Default)]
pub struct MemoryStore {
    payloads: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, data: Vec<u8>) {
        self.payloads.insert(name.to_owned(), data);
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }
}

impl PayloadStore for MemoryStore {
    fn write_payload(&mut self, name: &str, data: &[u8]) -> Result<(), PvzpakError> {
        self.payloads.insert(name.to_owned(), data.to_vec());
        Ok(())
    }

    fn read_payload(&self, name: &str) -> Result<Option<Vec<u8>>, PvzpakError> {
        Ok(self.payloads.get(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_path_uses_backslash_separators() {
        let store = DirStore::new("/tmp/out");
        assert_eq!(
            store.entry_path("images\\background1.jpg"),
            Path::new("/tmp/out/images/background1.jpg")
        );
    }

    #[test]
    fn test_entry_path_strips_traversal() {
        let store = DirStore::new("/tmp/out");
        assert_eq!(
            store.entry_path("..\\..\\etc\\passwd"),
            Path::new("/tmp/out/etc/passwd")
        );
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        store.write_payload("a.bin", b"abc").unwrap();
        assert_eq!(store.read_payload("a.bin").unwrap(), Some(b"abc".to_vec()));
        assert_eq!(store.read_payload("missing").unwrap(), None);
    }
}
