//! Format name tokens and builder constants.

pub const SIGNED_PREFIX: &str = "fix";
pub const UNSIGNED_PREFIX: &str = "ufix";
pub const FIELD_SEPARATOR: char = '_';

pub const DEFAULT_SCALING: f64 = 1.0;
