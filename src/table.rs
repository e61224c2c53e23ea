//! The entry table: a stream of variable-length records terminated either
//! by a standalone flags byte with [`FLAG_END`] set or by end of input. The
//! terminator carries no name/size/timestamp fields and contributes no
//! entry.

use std::io::{ErrorKind, Read, Write};

use byteorder::WriteBytesExt;

use crate::errors::PvzpakError;
use crate::record::{read_record_fields, write_record, Record, FLAG_END};

/// Reads records until the end marker or EOF, assigning each entry its
/// payload offset in a single forward pass.
pub(crate) fn read_table<R: Read>(
    reader: &mut R,
    compression: bool,
) -> Result<Vec<Record>, PvzpakError> {
    let mut entries = Vec::new();
    let mut offset = 0u64;
    loop {
        let flags = match read_flags(reader)? {
            Some(flags) => flags,
            None => break,
        };
        if flags & FLAG_END != 0 {
            break;
        }
        let record = read_record_fields(reader, flags, compression, offset)?;
        offset += record.size as u64;
        entries.push(record);
    }
    Ok(entries)
}

// A table may legitimately end at EOF instead of an end marker.
fn read_flags<R: Read>(reader: &mut R) -> Result<Option<u8>, PvzpakError> {
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(byte[0])),
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        }
    }
}

/// Writes every record in order, then the single terminator byte.
pub(crate) fn write_table<W: Write>(
    writer: &mut W,
    records: &[Record],
    compression: bool,
) -> Result<(), PvzpakError> {
    for record in records {
        write_record(writer, record, compression)?;
    }
    writer.write_u8(FLAG_END)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn entry_bytes(flags: u8, name: &[u8], size: u32, timestamp: u64) -> Vec<u8> {
        let mut bytes = vec![flags, name.len() as u8];
        bytes.extend_from_slice(name);
        bytes.extend_from_slice(&size.to_le_bytes());
        bytes.extend_from_slice(&timestamp.to_le_bytes());
        bytes
    }

    #[test]
    fn test_offsets_are_running_sums() {
        let mut bytes = entry_bytes(0, b"one", 10, 0);
        bytes.extend(entry_bytes(0, b"two", 4, 0));
        bytes.extend(entry_bytes(0, b"three", 7, 0));
        bytes.push(FLAG_END);

        let entries = read_table(&mut Cursor::new(&bytes), false).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].offset, 0);
        assert_eq!(entries[1].offset, 10);
        assert_eq!(entries[2].offset, 14);
    }

    #[test]
    fn test_end_marker_contributes_no_entry() {
        let mut bytes = entry_bytes(0, b"only", 1, 0);
        bytes.push(FLAG_END);
        // Trailing bytes after the marker belong to the payload region and
        // must not be read as records.
        bytes.extend_from_slice(&entry_bytes(0, b"ghost", 1, 0));

        let mut reader = Cursor::new(&bytes);
        let entries = read_table(&mut reader, false).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "only");
        assert_eq!(
            reader.position() as usize,
            entry_bytes(0, b"only", 1, 0).len() + 1
        );
    }

    #[test]
    fn test_empty_table() {
        let entries = read_table(&mut Cursor::new([FLAG_END]), false).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_exhausted_input_ends_table() {
        let bytes = entry_bytes(0, b"tail", 2, 0);
        let entries = read_table(&mut Cursor::new(&bytes), false).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_truncated_record_is_an_error() {
        let mut bytes = entry_bytes(0, b"one", 10, 0);
        bytes.truncate(bytes.len() - 3);
        assert!(matches!(
            read_table(&mut Cursor::new(&bytes), false),
            Err(PvzpakError::Truncated("timestamp"))
        ));
    }

    #[test]
    fn test_write_table_round_trip() {
        let records = vec![
            Record {
                flags: 0x05,
                name: "data\\first.bin".to_owned(),
                size: 3,
                compressed_size: None,
                timestamp: 7,
                offset: 0,
            },
            Record {
                flags: 0,
                name: "second".to_owned(),
                size: 0,
                compressed_size: None,
                timestamp: 0,
                offset: 3,
            },
        ];
        let mut buf = Vec::new();
        write_table(&mut buf, &records, false).unwrap();
        assert_eq!(*buf.last().unwrap(), FLAG_END);

        let parsed = read_table(&mut Cursor::new(&buf), false).unwrap();
        assert_eq!(parsed, records);
    }
}
