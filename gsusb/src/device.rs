use rusb::{Context, DeviceHandle, Direction, Recipient, RequestType, UsbContext};

use canfilter::FilterError;

use crate::constant::{CTRL_TIMEOUT, DEFAULT_VID_PID, GSUSB_ENV, GSUSB_VAR};

/// USB identity of a CAN adapter as found on the host.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UsbInfo {
    pub vendor_id: u16,
    pub product_id: u16,
    pub serial: Option<String>,
}

/// A claimed gs_usb device.
///
/// Owns the libusb context for its lifetime. On Linux an attached kernel
/// driver is detached from interface 0 on open and reattached on close; the
/// pairing holds on every exit path since `Drop` closes the device.
pub struct UsbDevice {
    context: Context,
    handle: Option<DeviceHandle<Context>>,
    driver_detached: bool,
}

impl UsbDevice {
    pub fn new() -> Result<Self, FilterError> {
        let context = Context::new().map_err(|e| FilterError::DeviceOpenFailed(e.to_string()))?;
        Ok(Self {
            context,
            handle: None,
            driver_detached: false,
        })
    }

    /// Open the first device matching `vid`/`pid`, and `serial` when given.
    pub fn open(&mut self, vid: u16, pid: u16, serial: Option<&str>) -> Result<(), FilterError> {
        self.close();

        let devices = self
            .context
            .devices()
            .map_err(|e| FilterError::DeviceOpenFailed(e.to_string()))?;

        for device in devices.iter() {
            let descriptor = match device.device_descriptor() {
                Ok(d) => d,
                Err(_) => continue,
            };
            if descriptor.vendor_id() != vid || descriptor.product_id() != pid {
                continue;
            }

            let mut handle = match device.open() {
                Ok(h) => h,
                Err(e) => {
                    log::debug!("GS-FILTER - open {:04x}:{:04x} failed: {}", vid, pid, e);
                    continue;
                }
            };

            if let Some(serial) = serial {
                match handle.read_serial_number_string_ascii(&descriptor) {
                    Ok(s) if s == serial => {}
                    _ => continue,
                }
            }

            let mut detached = false;
            #[cfg(target_os = "linux")]
            if handle.kernel_driver_active(0).unwrap_or(false) && handle.detach_kernel_driver(0).is_ok() {
                log::debug!("GS-FILTER - kernel driver detached");
                detached = true;
            }

            if handle.claim_interface(0).is_err() {
                log::warn!("GS-FILTER - failed to claim interface 0");
                #[cfg(target_os = "linux")]
                if detached {
                    let _ = handle.attach_kernel_driver(0);
                }
                continue;
            }

            log::info!("GS-FILTER - opened device {:04x}:{:04x}", vid, pid);
            self.handle = Some(handle);
            self.driver_detached = detached;
            return Ok(());
        }

        Err(FilterError::DeviceNotFound)
    }

    /// Try the VID/PID candidates in order until one opens.
    pub fn open_first(&mut self) -> Result<(), FilterError> {
        log::debug!("GS-FILTER - scanning CAN filter VIDs/PIDs");
        for (vid, pid) in candidates() {
            if self.open(vid, pid, None).is_ok() {
                return Ok(());
            }
        }
        Err(FilterError::DeviceNotFound)
    }

    /// Release interface 0, reattach the kernel driver when it was detached,
    /// and drop the handle.
    pub fn close(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            log::debug!("GS-FILTER - closing device");
            let _ = handle.release_interface(0);
            #[cfg(target_os = "linux")]
            if self.driver_detached {
                let _ = handle.attach_kernel_driver(0);
                log::debug!("GS-FILTER - kernel driver reattached");
            }
            self.driver_detached = false;
        }
    }

    fn handle(&self) -> Result<&DeviceHandle<Context>, FilterError> {
        self.handle.as_ref().ok_or(FilterError::DeviceNotOpened)
    }

    pub(crate) fn control_in(&self, request: u8, buf: &mut [u8]) -> Result<usize, FilterError> {
        let request_type = rusb::request_type(Direction::In, RequestType::Vendor, Recipient::Interface);
        self.handle()?
            .read_control(request_type, request, 0, 0, buf, CTRL_TIMEOUT)
            .map_err(|e| FilterError::TransferFailed(e.to_string()))
    }

    pub(crate) fn control_out(&self, request: u8, buf: &[u8]) -> Result<usize, FilterError> {
        let request_type = rusb::request_type(Direction::Out, RequestType::Vendor, Recipient::Interface);
        self.handle()?
            .write_control(request_type, request, 0, 0, buf, CTRL_TIMEOUT)
            .map_err(|e| FilterError::TransferFailed(e.to_string()))
    }
}

impl Drop for UsbDevice {
    fn drop(&mut self) {
        self.close();
    }
}

/// The candidate list, headed by a `vid:pid` pair from the `GSUSB_VIDPID`
/// variable in `gsusb.env` when present.
fn candidates() -> Vec<(u16, u16)> {
    let mut list = Vec::with_capacity(DEFAULT_VID_PID.len() + 1);
    if dotenvy::from_filename(GSUSB_ENV).is_ok() {
        if let Ok(value) = std::env::var(GSUSB_VAR) {
            match parse_vid_pid(&value) {
                Some(pair) => list.push(pair),
                None => log::warn!("GS-FILTER - ignoring malformed {}: {}", GSUSB_VAR, value),
            }
        }
    }
    list.extend_from_slice(&DEFAULT_VID_PID);
    list
}

/// Parse a `vid:pid` pair of hex values, e.g. `1d50:606f`.
fn parse_vid_pid(value: &str) -> Option<(u16, u16)> {
    let (vid, pid) = value.split_once(':')?;
    let vid = u16::from_str_radix(vid.trim(), 16).ok()?;
    let pid = u16::from_str_radix(pid.trim(), 16).ok()?;
    Some((vid, pid))
}
