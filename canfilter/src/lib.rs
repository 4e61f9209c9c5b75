//! **`canfilter`**, a compiler from CAN identifier filter definitions to the
//! acceptance-filter images programmed into bxCAN and FDCAN controllers.
//!
//! The workflow is `begin` → `add_*`/`parse` → `end`, after which
//! [`FilterBuilder::image`] yields the opaque blob shipped to firmware.

mod constant;
pub use constant::*;
mod error;
pub use error::*;
mod hardware;
pub use hardware::*;
mod builder;
pub use builder::*;
mod bxcan;
pub use bxcan::*;
mod fdcan;
pub use fdcan::*;
