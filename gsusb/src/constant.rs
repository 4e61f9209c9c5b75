use std::time::Duration;

use bitflags::bitflags;

/* gs_usb control requests - MUST MATCH the firmware's gs_usb_breq */
pub const GS_USB_BREQ_HOST_FORMAT: u8 = 0;
pub const GS_USB_BREQ_BITTIMING: u8 = 1;
pub const GS_USB_BREQ_MODE: u8 = 2;
pub const GS_USB_BREQ_BERR: u8 = 3;
pub const GS_USB_BREQ_BT_CONST: u8 = 4;
pub const GS_USB_BREQ_DEVICE_CONFIG: u8 = 5;
pub const GS_USB_BREQ_TIMESTAMP: u8 = 6;
pub const GS_USB_BREQ_IDENTIFY: u8 = 7;
pub const GS_USB_BREQ_GET_USER_ID: u8 = 8;
pub const GS_USB_BREQ_SET_USER_ID: u8 = 9;
pub const GS_USB_BREQ_DATA_BITTIMING: u8 = 10;
pub const GS_USB_BREQ_BT_CONST_EXT: u8 = 11;
pub const GS_USB_BREQ_SET_TERMINATION: u8 = 12;
pub const GS_USB_BREQ_GET_TERMINATION: u8 = 13;
pub const GS_USB_BREQ_GET_STATE: u8 = 14;
pub const GS_USB_BREQ_SET_FILTER: u8 = 15;
pub const GS_USB_BREQ_GET_FILTER: u8 = 16;

bitflags! {
    /// Feature bits reported in the `BT_CONST` capability word.
    #[derive(Debug, Clone, Copy, Eq, PartialEq)]
    pub struct GsFeature: u32 {
        const LISTEN_ONLY = 1 << 0;
        const LOOP_BACK = 1 << 1;
        const TRIPLE_SAMPLE = 1 << 2;
        const ONE_SHOT = 1 << 3;
        const HW_TIMESTAMP = 1 << 4;
        const IDENTIFY = 1 << 5;
        const USER_ID = 1 << 6;
        const PAD_PKTS_TO_MAX_PKT_SIZE = 1 << 7;
        const FD = 1 << 8;
        const BT_CONST_EXT = 1 << 10;
        const TERMINATION = 1 << 11;
        const BERR_REPORTING = 1 << 12;
        const GET_STATE = 1 << 13;
        /// Firmware supports the hardware acceptance filter requests.
        const FILTER = 1 << 16;
    }
}

/// VID/PID candidates tried in order when no explicit pair is supplied.
pub const DEFAULT_VID_PID: [(u16, u16); 4] = [
    (0x1D50, 0x606F), // gs_usb
    (0x1209, 0x2323), // candleLight
    (0x1CD2, 0x606F), // CES CANext FD
    (0x16D0, 0x10B8), // ABE CANdebugger FD
];

pub(crate) const GSUSB_ENV: &str = "gsusb.env";
pub(crate) const GSUSB_VAR: &str = "GSUSB_VIDPID";

pub(crate) const CTRL_TIMEOUT: Duration = Duration::from_secs(1);
