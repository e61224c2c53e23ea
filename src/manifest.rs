use serde::{Deserialize, Serialize};

use crate::errors::PvzpakError;
use crate::pak::Pak;
use crate::record::Record;

/// Reconstruction contract produced by unpacking and consumed by
/// repacking: the recovered key plus the entries in archive order. Entry
/// order is load-bearing: names are not guaranteed unique and the end
/// marker is positional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Recovered XOR key; empty means "no transform".
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key: Vec<u8>,
    #[serde(default)]
    pub version: u32,
    pub entries: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub size: u32,
    pub timestamp: u64,
    /// Omitted from the persisted form when zero; absence restores zero.
    #[serde(default, skip_serializing_if = "flags_is_zero")]
    pub flags: u8,
}

fn flags_is_zero(flags: &u8) -> bool {
    *flags == 0
}

impl Manifest {
    pub(crate) fn from_pak(pak: &Pak, key: Vec<u8>) -> Self {
        Manifest {
            key,
            version: pak.version,
            entries: pak.entries.iter().map(ManifestEntry::from_record).collect(),
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>, PvzpakError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, PvzpakError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

impl ManifestEntry {
    fn from_record(record: &Record) -> Self {
        ManifestEntry {
            name: record.name.clone(),
            size: record.size,
            timestamp: record.timestamp,
            flags: record.flags,
        }
    }
}
