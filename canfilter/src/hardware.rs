use std::fmt::{Display, Formatter};

use crate::error::FilterError;

/// Filter hardware reported by the firmware.
///
/// The discriminant doubles as the first byte of every serialized filter
/// image, so firmware can check that an incoming image was compiled for the
/// controller it actually drives.
#[repr(u8)]
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum HardwareType {
    /// No hardware acceptance filter.
    None = 0,
    /// bxCAN with 14 filter banks.
    BxCan14 = 1,
    /// bxCAN with 28 filter banks.
    BxCan28 = 2,
    /// FDCAN with 28 standard and 8 extended filter elements.
    FdCan28 = 3,
    /// FDCAN with 128 standard and 64 extended filter elements.
    FdCan128 = 4,
}

impl TryFrom<u8> for HardwareType {
    type Error = FilterError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::BxCan14),
            2 => Ok(Self::BxCan28),
            3 => Ok(Self::FdCan28),
            4 => Ok(Self::FdCan128),
            _ => Err(FilterError::UnknownHardware(value)),
        }
    }
}

impl Display for HardwareType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "no hardware filter"),
            Self::BxCan14 => write!(f, "bxCAN with 14 filter banks"),
            Self::BxCan28 => write!(f, "bxCAN with 28 filter banks"),
            Self::FdCan28 => write!(f, "FDCAN with 28 standard, 8 extended filters"),
            Self::FdCan128 => write!(f, "FDCAN with 128 standard, 64 extended filters"),
        }
    }
}
