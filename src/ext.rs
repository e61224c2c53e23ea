use std::io::{ErrorKind, Read};

use crate::errors::PvzpakError;

pub trait ReadExt {
    fn read_len(&mut self, len: usize, field: &'static str) -> Result<Vec<u8>, PvzpakError>;
}

impl<R: Read> ReadExt for R {
    fn read_len(&mut self, len: usize, field: &'static str) -> Result<Vec<u8>, PvzpakError> {
        let mut buf = vec![0; len];
        self.read_exact(&mut buf).map_err(eof_means_truncated(field))?;
        Ok(buf)
    }
}

/// Maps an unexpected EOF onto [`PvzpakError::Truncated`] so codec callers
/// see a format error instead of a bare IO error.
pub(crate) fn eof_means_truncated(
    field: &'static str,
) -> impl FnOnce(std::io::Error) -> PvzpakError {
    move |err| match err.kind() {
        ErrorKind::UnexpectedEof => PvzpakError::Truncated(field),
        _ => PvzpakError::IoError(err),
    }
}

/// Entry names are raw 8-bit bytes with no declared encoding. Decoding them
/// as latin-1 keeps every byte value representable in a `String`.
pub(crate) fn latin1_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

pub(crate) fn string_to_latin1(name: &str) -> Result<Vec<u8>, PvzpakError> {
    name.chars()
        .map(|c| u8::try_from(c as u32).map_err(|_| PvzpakError::ValidationError("filename encoding")))
        .collect()
}
