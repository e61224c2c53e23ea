use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;

use log::{debug, info};
use walkdir::WalkDir;

use crate::cipher::xor_in_place;
use crate::errors::PvzpakError;
use crate::header::{write_header, Header};
use crate::manifest::Manifest;
use crate::record::Record;
use crate::store::{PayloadStore, MANIFEST_FILE};
use crate::table::write_table;
use crate::MAGIC;

/// Serializes header, table, and payload region, then applies the XOR
/// transform with `key` over the whole buffer. `entries` and `payloads`
/// are parallel and in table order; each payload length must match its
/// record's size, otherwise every following offset would silently shift.
pub fn serialize(
    version: u32,
    entries: &[Record],
    payloads: &[Vec<u8>],
    key: &[u8],
) -> Result<Vec<u8>, PvzpakError> {
    if entries.len() != payloads.len() {
        return Err(PvzpakError::ValidationError("entry/payload count"));
    }
    let mut out = Vec::new();
    write_header(
        &mut out,
        &Header {
            magic: MAGIC,
            version,
        },
    )?;
    write_table(&mut out, entries, false)?;
    for (record, payload) in entries.iter().zip(payloads) {
        if payload.len() as u64 != record.size as u64 {
            return Err(PvzpakError::SizeMismatch {
                name: record.name.clone(),
                expected: record.size,
                actual: payload.len() as u64,
            });
        }
        out.extend_from_slice(payload);
    }
    xor_in_place(&mut out, key);
    Ok(out)
}

/// Rebuilds the encrypted archive described by `manifest`, pulling each
/// payload from `store` in manifest order.
pub fn repack(manifest: &Manifest, store: &impl PayloadStore) -> Result<Vec<u8>, PvzpakError> {
    let mut records = Vec::with_capacity(manifest.entries.len());
    let mut payloads = Vec::with_capacity(manifest.entries.len());
    let mut offset = 0u64;
    for entry in &manifest.entries {
        let payload = store
            .read_payload(&entry.name)?
            .ok_or_else(|| PvzpakError::MissingPayload(entry.name.clone()))?;
        if payload.len() as u64 != entry.size as u64 {
            return Err(PvzpakError::SizeMismatch {
                name: entry.name.clone(),
                expected: entry.size,
                actual: payload.len() as u64,
            });
        }
        debug!("repacking {:?} ({} bytes)", entry.name, entry.size);
        records.push(Record {
            flags: entry.flags,
            name: entry.name.clone(),
            size: entry.size,
            compressed_size: None,
            timestamp: entry.timestamp,
            offset,
        });
        offset += entry.size as u64;
        payloads.push(payload);
    }
    let archive = serialize(manifest.version, &records, &payloads, &manifest.key)?;
    info!(
        "repacked {} entries into {} bytes",
        records.len(),
        archive.len()
    );
    Ok(archive)
}

/// Builds a fresh archive from a directory tree when no manifest exists.
/// Files are walked in sorted order, entry names use the archive's `\`
/// separator, flags are zero, and timestamps come from filesystem mtimes.
/// A `manifest.json` at the root is skipped so a previously unpacked tree
/// can be packed directly.
pub fn pack_directory<P: AsRef<Path>>(
    root: P,
    version: u32,
    key: &[u8],
) -> Result<Vec<u8>, PvzpakError> {
    let root = root.as_ref();
    let mut records = Vec::new();
    let mut payloads = Vec::new();
    let mut offset = 0u64;
    for dir_entry in WalkDir::new(root).sort_by_file_name() {
        let dir_entry = dir_entry.map_err(std::io::Error::from)?;
        if !dir_entry.file_type().is_file() {
            continue;
        }
        if dir_entry.depth() == 1 && dir_entry.file_name() == MANIFEST_FILE {
            continue;
        }
        let payload = fs::read(dir_entry.path())?;
        let size = u32::try_from(payload.len())
            .map_err(|_| PvzpakError::ValidationError("payload size"))?;
        let name = dir_entry
            .path()
            .strip_prefix(root)
            .map_err(|_| PvzpakError::ValidationError("entry path"))?
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("\\");
        let timestamp = dir_entry
            .metadata()
            .ok()
            .and_then(|m| m.modified().ok())
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs())
            .unwrap_or(0);
        debug!("packing {:?} ({} bytes)", name, size);
        records.push(Record {
            flags: 0,
            name,
            size,
            compressed_size: None,
            timestamp,
            offset,
        });
        offset += size as u64;
        payloads.push(payload);
    }
    serialize(version, &records, &payloads, key)
}
