//! Codec for the PopCap `.pak` container used by Plants vs. Zombies and
//! related titles: a signature+version header, a flat table of named
//! variable-length entries, and a contiguous payload region, the whole file
//! wrapped in a cyclic XOR transform whose key is recovered by trial.

mod cipher;
mod errors;
mod ext;
mod header;
mod key;
mod manifest;
mod pak;
mod pak_reader;
mod pak_writer;
mod record;
mod store;
mod table;

pub use cipher::{xor, xor_in_place};
pub use errors::PvzpakError;
pub use header::{read_header, write_header, Header, HEADER_SIZE};
pub use key::{recover_key, recover_key_with, DEFAULT_PASSWORDS, KNOWN_XOR_BYTE};
pub use manifest::{Manifest, ManifestEntry};
pub use pak::Pak;
pub use pak_reader::PakReader;
pub use pak_writer::{pack_directory, repack, serialize};
pub use record::{Record, FLAG_END};
pub use store::{DirStore, MemoryStore, PayloadStore};

/// Signature of a correctly decrypted archive, stored little-endian at
/// offset 0.
pub const MAGIC: u32 = 0xBAC04AC0;
