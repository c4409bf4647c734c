//! Byte-level primitives for the rakcodec RakNet codec.
//!
//! This crate provides [`ByteWriter`] and [`ByteReader`] for the fixed-width
//! fields RakNet packets are built from: booleans, big-endian shorts and longs,
//! little-endian 24-bit "triads" and length-prefixed strings.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads are bounds-checked, all writes range-checked.
//! - **No domain knowledge** - This crate knows nothing about packets or acknowledgments.
//! - **Explicit errors** - All failures return structured errors, never panic.
//!
//! # Example
//!
//! ```
//! use bytestream::{ByteReader, ByteWriter};
//!
//! let mut writer = ByteWriter::new();
//! writer.write_bool(true);
//! writer.write_u24_le(42).unwrap();
//!
//! let bytes = writer.finish();
//!
//! let mut reader = ByteReader::new(&bytes);
//! assert!(reader.read_bool().unwrap());
//! assert_eq!(reader.read_u24_le().unwrap(), 42);
//! ```

mod error;
mod reader;
mod writer;

pub use error::{ByteError, ByteResult};
pub use reader::ByteReader;
pub use writer::ByteWriter;

/// Largest value a 24-bit triad can carry.
pub const U24_MAX: u32 = 0x00FF_FFFF;
