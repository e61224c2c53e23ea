use std::io::Cursor;

use crate::errors::PvzpakError;
use crate::header::read_header;
use crate::record::Record;
use crate::table::read_table;

/// Parsed view of a decrypted archive: `[signature][version][table][payload
/// region]`. Constructed once by [`Pak::parse`]; payloads stay in the
/// caller's buffer and are handed out as slices.
#[derive(Debug, Clone, PartialEq)]
pub struct Pak {
    pub version: u32,
    /// Entries in table order, which is also payload order.
    pub entries: Vec<Record>,
    /// Byte position of the payload region within the decrypted buffer:
    /// immediately after the table's end marker.
    pub payload_start: u64,
}

impl Pak {
    pub fn parse(decrypted: &[u8]) -> Result<Self, PvzpakError> {
        Self::parse_with(decrypted, false)
    }

    /// Parse with the global compression mode on, which inserts a
    /// compressed-size field into every record. No known build sets it.
    pub fn parse_with(decrypted: &[u8], compression: bool) -> Result<Self, PvzpakError> {
        let mut reader = Cursor::new(decrypted);
        let header = read_header(&mut reader)?;
        let entries = read_table(&mut reader, compression)?;
        let payload_start = reader.position();
        Ok(Pak {
            version: header.version,
            entries,
            payload_start,
        })
    }

    /// Slice of `decrypted` holding `record`'s payload. Payloads are
    /// contiguous in entry order with no gaps or padding.
    pub fn payload<'a>(
        &self,
        record: &Record,
        decrypted: &'a [u8],
    ) -> Result<&'a [u8], PvzpakError> {
        if record.compressed_size.unwrap_or(0) != 0 {
            return Err(PvzpakError::UnsupportedCompression);
        }
        let start = self.payload_start + record.offset;
        let end = start + record.size as u64;
        decrypted
            .get(start as usize..end as usize)
            .ok_or(PvzpakError::Truncated("payload"))
    }
}
