/// Mask for standard identifiers.
pub const SFF_MASK: u32 = 0x0000_07FF;
/// Mask for extended identifiers.
pub const EFF_MASK: u32 = 0x1FFF_FFFF;
/// Bit width of a standard identifier.
pub const SFF_BITS: u32 = 11;
/// Bit width of an extended identifier.
pub const EFF_BITS: u32 = 29;
