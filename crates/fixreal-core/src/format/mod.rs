//! Fixed-point format descriptors.
//!
//! A format is fully described by its width, binary point position,
//! signedness and an optional decode scaling. The builder derives the masks,
//! step and limits once; codecs only read them. Names follow the toolchain
//! convention `fix_<bits>_<binary point>` (signed) and
//! `ufix_<bits>_<binary point>` (unsigned).
//!
//! Module layout mirrors the codec side:
//! - `layout`: name tokens and builder constants
//! - `reader`: cursor over a type name
//! - `parser`: name to descriptor
//! - `descriptor`: the immutable record and its builder
//! - `error`: explicit, actionable errors

pub mod descriptor;
pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use descriptor::{FormatDescriptor, Width, build_descriptor};
pub use error::DescriptorError;
pub use parser::parse_format_name;
