use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DescriptorError;
use super::layout;
use super::parser::parse_format_name;

/// Total width of a fixed-point representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Width {
    W8,
    W16,
    W32,
}

impl Width {
    pub const fn bits(self) -> u32 {
        match self {
            Width::W8 => 8,
            Width::W16 => 16,
            Width::W32 => 32,
        }
    }

    pub const fn bytes(self) -> usize {
        (self.bits() / 8) as usize
    }
}

impl TryFrom<u32> for Width {
    type Error = DescriptorError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            8 => Ok(Width::W8),
            16 => Ok(Width::W16),
            32 => Ok(Width::W32),
            _ => Err(DescriptorError::UnsupportedWidth { bits }),
        }
    }
}

impl From<Width> for u32 {
    fn from(width: Width) -> Self {
        width.bits()
    }
}

/// Serialized input accepted when deserializing a descriptor; derived
/// constants are always recomputed.
#[derive(Debug, Deserialize)]
struct FormatParams {
    bits: u32,
    binary_point: u32,
    #[serde(default)]
    signed: bool,
    #[serde(default = "default_scaling")]
    scaling: f64,
}

fn default_scaling() -> f64 {
    layout::DEFAULT_SCALING
}

impl TryFrom<FormatParams> for FormatDescriptor {
    type Error = DescriptorError;

    fn try_from(params: FormatParams) -> Result<Self, Self::Error> {
        build_descriptor(params.bits, params.binary_point, params.signed, params.scaling)
    }
}

/// Every constant needed to convert between one fixed-point layout and `f64`.
///
/// A descriptor is immutable once built and is `Copy`, so a single value can
/// be shared by any number of threads running conversions.
///
/// `scaling` divides decoded values; encoding ignores it, so a round trip
/// through a descriptor with `scaling != 1.0` does not return the input.
///
/// # Examples
/// ```
/// use fixreal_core::FormatDescriptor;
///
/// let fmt = FormatDescriptor::new(8, 7, true)?;
/// assert_eq!(fmt.sign_mask(), 0x80);
/// assert_eq!(fmt.int_mask(), 0);
/// assert_eq!(fmt.dec_mask(), 0x7f);
/// assert_eq!(fmt.int_min(), -1.0);
/// assert_eq!(fmt.to_string(), "fix_8_7");
/// # Ok::<(), fixreal_core::DescriptorError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FormatParams")]
pub struct FormatDescriptor {
    bits: Width,
    binary_point: u32,
    signed: bool,
    scaling: f64,
    dec_step: f64,
    dec_mask: u32,
    int_mask: u32,
    sign_mask: u32,
    int_min: f64,
    int_max: f64,
}

/// Build a descriptor from explicit parameters, including a scaling divisor.
///
/// # Examples
/// ```
/// use fixreal_core::build_descriptor;
///
/// let fmt = build_descriptor(16, 10, false, 2.0)?;
/// assert_eq!(fmt.scaling(), 2.0);
/// assert_eq!(fmt.int_max(), 63.0);
/// # Ok::<(), fixreal_core::DescriptorError>(())
/// ```
pub fn build_descriptor(
    bits: u32,
    binary_point: u32,
    signed: bool,
    scaling: f64,
) -> Result<FormatDescriptor, DescriptorError> {
    FormatDescriptor::new(bits, binary_point, signed)?.with_scaling(scaling)
}

impl FormatDescriptor {
    /// Build a descriptor with the default scaling of 1.0.
    pub fn new(bits: u32, binary_point: u32, signed: bool) -> Result<Self, DescriptorError> {
        let width = Width::try_from(bits)?;
        if binary_point >= bits {
            return Err(DescriptorError::InvalidBinaryPoint { binary_point, bits });
        }

        let descriptor = if signed {
            Self::signed(width, binary_point)
        } else {
            Self::unsigned(width, binary_point)
        };
        tracing::debug!(bits, binary_point, signed, "built fixed-point descriptor");
        Ok(descriptor)
    }

    /// Return a copy of this descriptor that divides decoded values by `scaling`.
    pub fn with_scaling(self, scaling: f64) -> Result<Self, DescriptorError> {
        if !scaling.is_finite() || scaling == 0.0 {
            return Err(DescriptorError::InvalidScaling { scaling });
        }
        if scaling != self.scaling {
            tracing::debug!(format = %self, scaling, "applied decode scaling");
        }
        Ok(Self { scaling, ..self })
    }

    fn unsigned(width: Width, binary_point: u32) -> Self {
        let bits = width.bits();
        Self {
            bits: width,
            binary_point,
            signed: false,
            scaling: layout::DEFAULT_SCALING,
            dec_step: dec_step(binary_point),
            dec_mask: bit_range(0, binary_point),
            int_mask: bit_range(binary_point, bits),
            sign_mask: 0,
            int_min: 0.0,
            int_max: pow2(bits - binary_point) - 1.0,
        }
    }

    fn signed(width: Width, binary_point: u32) -> Self {
        let bits = width.bits();
        Self {
            bits: width,
            binary_point,
            signed: true,
            scaling: layout::DEFAULT_SCALING,
            dec_step: dec_step(binary_point),
            dec_mask: bit_range(0, binary_point),
            int_mask: bit_range(binary_point, bits - 1),
            sign_mask: 1 << (bits - 1),
            int_min: -pow2(bits - 1 - binary_point),
            int_max: pow2(bits - 1 - binary_point) - 1.0,
        }
    }

    pub fn width(&self) -> Width {
        self.bits
    }

    pub fn bits(&self) -> u32 {
        self.bits.bits()
    }

    /// Size in bytes of one encoded value.
    pub fn width_bytes(&self) -> usize {
        self.bits.bytes()
    }

    pub fn binary_point(&self) -> u32 {
        self.binary_point
    }

    pub fn is_signed(&self) -> bool {
        self.signed
    }

    pub fn scaling(&self) -> f64 {
        self.scaling
    }

    /// Value of the least significant fractional bit.
    pub fn dec_step(&self) -> f64 {
        self.dec_step
    }

    pub fn dec_mask(&self) -> u32 {
        self.dec_mask
    }

    /// Integer magnitude bits; never includes the sign bit.
    pub fn int_mask(&self) -> u32 {
        self.int_mask
    }

    pub fn sign_mask(&self) -> u32 {
        self.sign_mask
    }

    pub fn int_min(&self) -> f64 {
        self.int_min
    }

    pub fn int_max(&self) -> f64 {
        self.int_max
    }

    /// Smallest value any raw code decodes to, before scaling.
    pub fn min_value(&self) -> f64 {
        self.int_min
    }

    /// Largest value any raw code decodes to, before scaling.
    pub fn max_value(&self) -> f64 {
        self.int_max + f64::from(self.dec_mask) * self.dec_step
    }

    /// Canonical toolchain name, e.g. `fix_8_7` or `ufix_16_10`.
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FormatDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.signed {
            layout::SIGNED_PREFIX
        } else {
            layout::UNSIGNED_PREFIX
        };
        let sep = layout::FIELD_SEPARATOR;
        write!(f, "{prefix}{sep}{}{sep}{}", self.bits(), self.binary_point)
    }
}

impl FromStr for FormatDescriptor {
    type Err = DescriptorError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        parse_format_name(name)
    }
}

fn pow2(exp: u32) -> f64 {
    2f64.powi(exp as i32)
}

fn dec_step(binary_point: u32) -> f64 {
    1.0 / pow2(binary_point)
}

/// Mask with bits `low..high` set.
fn bit_range(low: u32, high: u32) -> u32 {
    let ones = |n: u32| (1u64 << n) - 1;
    (ones(high) & !ones(low)) as u32
}
