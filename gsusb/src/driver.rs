use canfilter::{BxCan14, BxCan28, FdCan128, FdCan28, FilterBuilder, FilterError, HardwareType};

use crate::api::FilterApi;
use crate::device::{UsbDevice, UsbInfo};
use crate::info::ResolveUsbInfo;

/// The builder matching the filter hardware a device reported.
pub fn builder_for(hardware: HardwareType) -> Result<Box<dyn FilterBuilder>, FilterError> {
    match hardware {
        HardwareType::BxCan14 => Ok(Box::new(BxCan14::new())),
        HardwareType::BxCan28 => Ok(Box::new(BxCan28::new())),
        HardwareType::FdCan28 => Ok(Box::new(FdCan28::new())),
        HardwareType::FdCan128 => Ok(Box::new(FdCan128::new())),
        HardwareType::None => Err(FilterError::NotSupported),
    }
}

/// Probe `device`, compile `definition` for the hardware it reports, and
/// program the image. Any failing step aborts before anything is shipped.
pub fn ship_filter<A: FilterApi>(device: &A, definition: &str) -> Result<(), FilterError> {
    if !device.has_hardware_filter()? {
        return Err(FilterError::NotSupported);
    }

    let hardware = device.filter_hardware()?;
    let mut builder = builder_for(hardware)?;
    log::info!("GS-FILTER - using {}", hardware);

    builder.begin();
    builder.parse(definition)?;
    builder.end()?;

    log::debug!("GS-FILTER - {}", builder.usage());
    log::debug!("GS-FILTER - {}", builder.dump_filters());

    device.program_filter(&builder.image())
}

/// Drives one parse → compile → ship sequence against a claimed device.
pub struct FilterDriver {
    device: UsbDevice,
}

impl FilterDriver {
    pub fn new() -> Result<Self, FilterError> {
        Ok(Self {
            device: UsbDevice::new()?,
        })
    }

    /// Compile `definition` for the adapter described by `info` and program
    /// it. The device is closed again on every path.
    pub fn set_filter(&mut self, info: &UsbInfo, definition: &str) -> Result<(), FilterError> {
        self.device
            .open(info.vendor_id, info.product_id, info.serial.as_deref())?;

        let result = ship_filter(&self.device, definition);
        self.device.close();
        result
    }
}

/// Program `definition` into the CAN adapter behind network interface
/// `netdev`. Any failing step aborts the whole operation; nothing is shipped
/// partially.
pub fn set_hardware_filter<R: ResolveUsbInfo>(
    resolver: &R,
    netdev: &str,
    definition: &str,
) -> Result<(), FilterError> {
    log::info!("GS-FILTER - interface: {}, filter: {}", netdev, definition);

    let info = resolver.resolve(netdev)?;
    let mut driver = FilterDriver::new()?;
    driver.set_filter(&info, definition).map_err(|e| {
        log::warn!("GS-FILTER - {}", e);
        e
    })
}
