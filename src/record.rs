use std::io::{Read, Write};

use byteorder::{ReadBytesExt, WriteBytesExt, LE};

use crate::errors::PvzpakError;
use crate::ext::{eof_means_truncated, latin1_to_string, string_to_latin1, ReadExt};

/// High bit of a flags byte. A standalone flags byte with this bit set
/// terminates the entry table; it is never part of a data entry's stored
/// flags.
pub const FLAG_END: u8 = 0x80;

/// One entry of the table. Built once during parse and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Low 7 bits, opaque and round-tripped verbatim.
    pub flags: u8,
    /// Raw 8-bit entry name, held as latin-1. Separator inside archives is
    /// `\`.
    pub name: String,
    /// Payload byte count.
    pub size: u32,
    /// Present only when the global compression mode is on (off in every
    /// known build). The compressed payload codec is unknown; decoding is
    /// unsupported.
    pub compressed_size: Option<u32>,
    /// Opaque to the format.
    pub timestamp: u64,
    /// Byte position of the payload within the payload region: the running
    /// sum of preceding entry sizes. Derived during parse, not stored on
    /// disk.
    pub offset: u64,
}

/// Reads the remainder of a record whose (non-terminal) flags byte has
/// already been consumed.
pub(crate) fn read_record_fields<R: Read>(
    reader: &mut R,
    flags: u8,
    compression: bool,
    offset: u64,
) -> Result<Record, PvzpakError> {
    let name_len = reader.read_u8().map_err(eof_means_truncated("name length"))?;
    let name = latin1_to_string(&reader.read_len(name_len as usize, "filename")?);
    let size = reader.read_u32::<LE>().map_err(eof_means_truncated("size"))?;
    let compressed_size = if compression {
        Some(
            reader
                .read_u32::<LE>()
                .map_err(eof_means_truncated("compressed size"))?,
        )
    } else {
        None
    };
    let timestamp = reader
        .read_u64::<LE>()
        .map_err(eof_means_truncated("timestamp"))?;
    Ok(Record {
        flags,
        name,
        size,
        compressed_size,
        timestamp,
        offset,
    })
}

pub(crate) fn write_record<W: Write>(
    writer: &mut W,
    record: &Record,
    compression: bool,
) -> Result<(), PvzpakError> {
    let name = string_to_latin1(&record.name)?;
    if name.len() > u8::MAX as usize {
        return Err(PvzpakError::ValidationError("filename length"));
    }
    writer.write_u8(record.flags & !FLAG_END)?;
    writer.write_u8(name.len() as u8)?;
    writer.write_all(&name)?;
    writer.write_u32::<LE>(record.size)?;
    if compression {
        writer.write_u32::<LE>(record.compressed_size.unwrap_or(0))?;
    }
    writer.write_u64::<LE>(record.timestamp)?;
    Ok(())
}
