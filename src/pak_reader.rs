use log::{debug, info};

use crate::cipher::xor_in_place;
use crate::errors::PvzpakError;
use crate::key::recover_key;
use crate::manifest::Manifest;
use crate::pak::Pak;
use crate::record::Record;
use crate::store::PayloadStore;

/// Decodes one archive start to finish: key recovery, one whole-buffer
/// decryption, one parse. The decrypted buffer is retained so payload
/// access is a borrow, not a copy.
#[derive(Debug)]
pub struct PakReader {
    key: Vec<u8>,
    decrypted: Vec<u8>,
    pak: Pak,
}

impl PakReader {
    /// Fails with [`PvzpakError::KeyNotFound`] when no candidate key
    /// satisfies the signature; parse errors propagate as-is.
    pub fn read(raw: Vec<u8>) -> Result<Self, PvzpakError> {
        let key = recover_key(&raw).ok_or(PvzpakError::KeyNotFound)?;
        info!("recovered XOR key of {} byte(s)", key.len());
        let mut decrypted = raw;
        xor_in_place(&mut decrypted, &key);
        let pak = Pak::parse(&decrypted)?;
        debug!(
            "version {}, {} entries, payload region at {:#x}",
            pak.version,
            pak.entries.len(),
            pak.payload_start
        );
        Ok(PakReader {
            key,
            decrypted,
            pak,
        })
    }

    pub fn version(&self) -> u32 {
        self.pak.version
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn entries(&self) -> &[Record] {
        &self.pak.entries
    }

    pub fn payload(&self, record: &Record) -> Result<&[u8], PvzpakError> {
        self.pak.payload(record, &self.decrypted)
    }

    /// Entries paired with their payload slices, in table order.
    pub fn payloads(&self) -> impl Iterator<Item = (&Record, Result<&[u8], PvzpakError>)> + '_ {
        self.pak.entries.iter().map(move |r| (r, self.payload(r)))
    }

    pub fn manifest(&self) -> Manifest {
        Manifest::from_pak(&self.pak, self.key.clone())
    }

    /// Writes every payload to `store` in table order and returns the
    /// manifest describing how to rebuild the archive. Entries already
    /// written stay in place if a later one fails.
    pub fn unpack_to(&self, store: &mut impl PayloadStore) -> Result<Manifest, PvzpakError> {
        for record in &self.pak.entries {
            let payload = self.payload(record)?;
            debug!("extracting {:?} ({} bytes)", record.name, record.size);
            store.write_payload(&record.name, payload)?;
        }
        info!("extracted {} entries", self.pak.entries.len());
        Ok(self.manifest())
    }
}
