//! **`gsusb`**, the USB side of CAN hardware acceptance filtering: opens a
//! gs_usb adapter, probes what filter hardware its firmware drives, and ships
//! a compiled [`canfilter`] image down with a vendor control transfer.

mod constant;
pub use constant::*;
mod device;
pub use device::*;
mod api;
pub use api::*;
mod info;
pub use info::*;
mod driver;
pub use driver::*;
