//! Offline-message magic marker.

use bytestream::{ByteReader, ByteWriter};

use crate::error::WireResult;

/// Size of the offline-message magic in bytes.
pub const MAGIC_LEN: usize = 16;

/// The 16-byte marker carried by unconnected (pre-session) packets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Magic([u8; MAGIC_LEN]);

impl Magic {
    /// The marker every stock RakNet peer uses.
    pub const RAKNET: Self = Self([
        0x00, 0xFF, 0xFF, 0x00, 0xFE, 0xFE, 0xFE, 0xFE, 0xFD, 0xFD, 0xFD, 0xFD, 0x12, 0x34, 0x56,
        0x78,
    ]);

    /// Creates a magic from raw bytes.
    #[must_use]
    pub const fn new(bytes: [u8; MAGIC_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; MAGIC_LEN] {
        &self.0
    }

    /// Writes the marker.
    pub fn write(&self, writer: &mut ByteWriter) {
        writer.write_bytes(&self.0);
    }

    /// Consumes 16 bytes and reports whether they match this marker.
    ///
    /// A mismatch is not an error; callers decide what an invalid marker means.
    pub fn check(&self, reader: &mut ByteReader<'_>) -> WireResult<bool> {
        let found = reader.read_array::<MAGIC_LEN>()?;
        Ok(found == self.0)
    }
}

impl Default for Magic {
    fn default() -> Self {
        Self::RAKNET
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DecodeError;

    #[test]
    fn default_is_raknet() {
        assert_eq!(Magic::default(), Magic::RAKNET);
        assert_eq!(Magic::RAKNET.as_bytes()[..4], [0x00, 0xFF, 0xFF, 0x00]);
    }

    #[test]
    fn check_matching_marker() {
        let mut writer = ByteWriter::new();
        Magic::RAKNET.write(&mut writer);
        let bytes = writer.finish();
        assert_eq!(bytes.len(), MAGIC_LEN);

        let mut reader = ByteReader::new(&bytes);
        assert!(Magic::RAKNET.check(&mut reader).unwrap());
        assert!(reader.is_empty());
    }

    #[test]
    fn check_mismatch_consumes_and_reports_false() {
        let bytes = [0xAAu8; MAGIC_LEN];
        let mut reader = ByteReader::new(&bytes);
        assert!(!Magic::RAKNET.check(&mut reader).unwrap());
        assert!(reader.is_empty());
    }

    #[test]
    fn check_truncated_fails() {
        let bytes = [0x00u8; 4];
        let mut reader = ByteReader::new(&bytes);
        let err = Magic::RAKNET.check(&mut reader).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnexpectedEndOfBuffer {
                requested: MAGIC_LEN,
                available: 4
            }
        );
    }

    #[test]
    fn alternate_magic() {
        let custom = Magic::new([0x42; MAGIC_LEN]);
        let mut writer = ByteWriter::new();
        custom.write(&mut writer);
        let bytes = writer.finish();
        let mut reader = ByteReader::new(&bytes);
        assert!(!Magic::RAKNET.check(&mut reader).unwrap());
    }
}
