use std::io::{Read, Write};

use byteorder::{ReadBytesExt, WriteBytesExt, LE};

use crate::errors::PvzpakError;
use crate::ext::eof_means_truncated;
use crate::MAGIC;

/// Fixed-size prefix of a decrypted archive.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Header {
    /// Must be [`MAGIC`].
    pub magic: u32,
    /// Surfaced as-is; no known build rejects any value here.
    pub version: u32,
}

pub const HEADER_SIZE: u64 = 8;

pub fn read_header<R: Read>(reader: &mut R) -> Result<Header, PvzpakError> {
    let magic = reader
        .read_u32::<LE>()
        .map_err(eof_means_truncated("signature"))?;
    if magic != MAGIC {
        return Err(PvzpakError::InvalidSignature(magic));
    }
    let version = reader
        .read_u32::<LE>()
        .map_err(eof_means_truncated("version"))?;
    Ok(Header { magic, version })
}

pub fn write_header<W: Write>(writer: &mut W, header: &Header) -> Result<(), PvzpakError> {
    writer.write_u32::<LE>(header.magic)?;
    writer.write_u32::<LE>(header.version)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_read_header() {
        let bytes = [0xC0, 0x4A, 0xC0, 0xBA, 0x02, 0x00, 0x00, 0x00];
        let mut reader = Cursor::new(bytes);
        let header = read_header(&mut reader).unwrap();
        assert_eq!(header.magic, MAGIC);
        assert_eq!(header.version, 2);
    }

    #[test]
    fn test_write_header() {
        let mut buf = Vec::new();
        write_header(
            &mut buf,
            &Header {
                magic: MAGIC,
                version: 0,
            },
        )
        .unwrap();
        assert_eq!(buf, [0xC0, 0x4A, 0xC0, 0xBA, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(buf.len() as u64, HEADER_SIZE);
    }

    #[test]
    fn test_bad_signature() {
        let bytes = [0xEF, 0xBE, 0xAD, 0xDE, 0x00, 0x00, 0x00, 0x00];
        let mut reader = Cursor::new(bytes);
        assert!(matches!(
            read_header(&mut reader),
            Err(PvzpakError::InvalidSignature(0xDEADBEEF))
        ));
    }

    #[test]
    fn test_truncated_version() {
        let bytes = [0xC0, 0x4A, 0xC0, 0xBA, 0x02];
        let mut reader = Cursor::new(bytes);
        assert!(matches!(
            read_header(&mut reader),
            Err(PvzpakError::Truncated("version"))
        ));
    }
}
