//! Conversions between raw fixed-point codes and `f64`.
//!
//! - `byte_order`: explicit byte order of buffered values
//! - `reader`: safe, width-aware access to caller-owned buffers
//! - `decode`: raw code or buffer to real values
//! - `encode`: real values to raw codes or buffers
//! - `error`: explicit, actionable errors
//!
//! All functions are pure; buffers are only read, and every call completes
//! synchronously.

pub mod byte_order;
pub mod decode;
pub mod encode;
pub mod error;
pub mod reader;

pub use byte_order::ByteOrder;
pub use decode::{decode_buffer, decode_sequence, decode_value};
pub use encode::{encode_buffer, encode_sequence, encode_value};
pub use error::CodecError;
