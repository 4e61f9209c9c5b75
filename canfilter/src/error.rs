use thiserror::Error;

/// Shared error type of the compiler and the transport built on top of it.
///
/// `Param` and `Full` are the only kinds a builder call can return; a failed
/// call leaves the builder in a defined but unspecified state, so discard it
/// or start over with `begin`.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum FilterError {
    /// Argument magnitude or ordering violates the target encoding.
    #[error("CAN-FILTER - parameter out of range")]
    Param,
    /// The controller cannot hold any more filter entries.
    #[error("CAN-FILTER - filter capacity exhausted")]
    Full,
    /// The filter definition text does not parse.
    #[error("CAN-FILTER - syntax error in filter definition")]
    Syntax,

    #[error("CAN-FILTER - device is not opened")]
    DeviceNotOpened,
    #[error("CAN-FILTER - no matching USB device found")]
    DeviceNotFound,
    #[error("CAN-FILTER - device open failed: {0}")]
    DeviceOpenFailed(String),
    #[error("CAN-FILTER - controller has no hardware filter")]
    NotSupported,
    #[error("CAN-FILTER - unknown filter hardware: {0}")]
    UnknownHardware(u8),
    #[error("CAN-FILTER - transfer failed: {0}")]
    TransferFailed(String),
}
