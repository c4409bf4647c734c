//! Connection-type tag appended to unconnected packets.
//!
//! Stock RakNet peers send nothing here. Peers that want to advertise their
//! implementation append a tag: a 7-byte marker, a 16-byte UUID, the name,
//! language and version strings, and up to 255 metadata key/value pairs.

use bytestream::{ByteReader, ByteWriter};

use crate::error::{EncodeError, EncodeResult, WireResult};

/// Marker that opens a connection-type tag.
pub const CONNECTION_TYPE_MAGIC: [u8; 7] = [0x03, 0x08, 0x05, 0x0B, 0x43, 0x54, 0x49];

/// Maximum metadata entries (the count is a single byte on the wire).
pub const MAX_METADATA_ENTRIES: usize = u8::MAX as usize;

/// Identifies the implementation on the other end of an unconnected exchange.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConnectionType {
    /// No tag on the wire.
    #[default]
    Vanilla,
    /// Tagged implementation details.
    Tagged(ConnectionInfo),
}

/// Details carried by a tagged connection type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectionInfo {
    pub uuid: [u8; 16],
    pub name: String,
    pub language: String,
    pub version: String,
    /// Ordered key/value pairs; order is preserved on the wire.
    pub metadata: Vec<(String, String)>,
}

impl ConnectionInfo {
    /// Creates tag details with no metadata.
    #[must_use]
    pub fn new(
        uuid: [u8; 16],
        name: impl Into<String>,
        language: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            uuid,
            name: name.into(),
            language: language.into(),
            version: version.into(),
            metadata: Vec::new(),
        }
    }

    /// Appends a metadata entry.
    #[must_use]
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }
}

impl ConnectionType {
    /// Returns `true` for the untagged stock implementation.
    #[must_use]
    pub const fn is_vanilla(&self) -> bool {
        matches!(self, Self::Vanilla)
    }

    /// Reads a tag if one is present.
    ///
    /// When the remaining bytes do not start with [`CONNECTION_TYPE_MAGIC`]
    /// nothing is consumed and [`ConnectionType::Vanilla`] is returned.
    pub fn read(reader: &mut ByteReader<'_>) -> WireResult<Self> {
        let tagged = reader
            .peek_bytes(CONNECTION_TYPE_MAGIC.len())
            .is_ok_and(|bytes| bytes == CONNECTION_TYPE_MAGIC);
        if !tagged {
            return Ok(Self::Vanilla);
        }
        reader.read_bytes(CONNECTION_TYPE_MAGIC.len())?;

        let uuid = reader.read_array::<16>()?;
        let name = reader.read_string()?;
        let language = reader.read_string()?;
        let version = reader.read_string()?;
        let count = reader.read_u8()?;
        let mut metadata = Vec::with_capacity(usize::from(count));
        for _ in 0..count {
            let key = reader.read_string()?;
            let value = reader.read_string()?;
            metadata.push((key, value));
        }

        Ok(Self::Tagged(ConnectionInfo {
            uuid,
            name,
            language,
            version,
            metadata,
        }))
    }

    /// Writes the tag; vanilla writes nothing.
    pub fn write(&self, writer: &mut ByteWriter) -> EncodeResult<()> {
        let Self::Tagged(info) = self else {
            return Ok(());
        };
        let count =
            u8::try_from(info.metadata.len()).map_err(|_| EncodeError::LengthOverflow {
                length: info.metadata.len(),
                max: MAX_METADATA_ENTRIES,
            })?;

        writer.write_bytes(&CONNECTION_TYPE_MAGIC);
        writer.write_bytes(&info.uuid);
        writer.write_string(&info.name)?;
        writer.write_string(&info.language)?;
        writer.write_string(&info.version)?;
        writer.write_u8(count);
        for (key, value) in &info.metadata {
            writer.write_string(key)?;
            writer.write_string(value)?;
        }
        Ok(())
    }
}
