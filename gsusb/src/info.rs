use canfilter::FilterError;

use crate::device::UsbInfo;

/// Maps a CAN network-interface name to the USB identity of the adapter
/// behind it.
pub trait ResolveUsbInfo {
    fn resolve(&self, netdev: &str) -> Result<UsbInfo, FilterError>;
}

/// Resolver walking sysfs: `/sys/class/net/<dev>/device` is canonicalized
/// and parents are searched upward for the USB device node carrying
/// `idVendor`/`idProduct`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SysfsResolver;

#[cfg(target_os = "linux")]
impl ResolveUsbInfo for SysfsResolver {
    fn resolve(&self, netdev: &str) -> Result<UsbInfo, FilterError> {
        use std::path::PathBuf;

        let device = PathBuf::from("/sys/class/net").join(netdev).join("device");
        let mut path = device
            .canonicalize()
            .map_err(|_| FilterError::DeviceNotFound)?;

        loop {
            let vendor = path.join("idVendor");
            let product = path.join("idProduct");
            if vendor.is_file() && product.is_file() {
                let vendor_id = read_hex16(&vendor)?;
                let product_id = read_hex16(&product)?;
                let serial = std::fs::read_to_string(path.join("serial"))
                    .ok()
                    .map(|s| s.trim().to_string());
                return Ok(UsbInfo {
                    vendor_id,
                    product_id,
                    serial,
                });
            }

            if !path.pop() || path.as_os_str() == "/" {
                break;
            }
        }

        Err(FilterError::DeviceNotFound)
    }
}

#[cfg(target_os = "linux")]
fn read_hex16(path: &std::path::Path) -> Result<u16, FilterError> {
    let text = std::fs::read_to_string(path).map_err(|_| FilterError::DeviceNotFound)?;
    u16::from_str_radix(text.trim(), 16).map_err(|_| FilterError::DeviceNotFound)
}

#[cfg(not(target_os = "linux"))]
impl ResolveUsbInfo for SysfsResolver {
    fn resolve(&self, _netdev: &str) -> Result<UsbInfo, FilterError> {
        Err(FilterError::DeviceNotFound)
    }
}
