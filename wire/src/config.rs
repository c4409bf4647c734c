//! Per-codec configuration passed into every encode/decode call.

use crate::connection::ConnectionType;
use crate::limits::Limits;
use crate::magic::Magic;

/// Values a codec instance is built with instead of process-wide constants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WireConfig {
    /// Marker written to and checked on unconnected packets.
    pub magic: Magic,
    /// Local connection-type tag stamped on outgoing unconnected packets.
    pub connection_type: ConnectionType,
    /// Decoding limits.
    pub limits: Limits,
}

impl WireConfig {
    /// Creates a config with the given magic and default everything else.
    #[must_use]
    pub fn with_magic(magic: Magic) -> Self {
        Self {
            magic,
            ..Self::default()
        }
    }

    /// Replaces the local connection-type tag.
    #[must_use]
    pub fn connection_type(mut self, connection_type: ConnectionType) -> Self {
        self.connection_type = connection_type;
        self
    }

    /// Replaces the decoding limits.
    #[must_use]
    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Config suitable for tests: stock magic, vanilla tag, small limits.
    #[must_use]
    pub fn for_testing() -> Self {
        Self::default().limits(Limits::for_testing())
    }
}
