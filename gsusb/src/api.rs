use canfilter::{FilterError, HardwareType};

use crate::constant::{GsFeature, GS_USB_BREQ_BT_CONST, GS_USB_BREQ_GET_FILTER, GS_USB_BREQ_SET_FILTER};
use crate::device::UsbDevice;

pub(crate) const CAPABILITY_SIZE: usize = 40;
pub(crate) const FILTER_INFO_SIZE: usize = 4;

/// The 40-byte record answered to `BT_CONST`: the feature word followed by
/// the bit-timing limits of the controller.
#[derive(Debug, Clone, Copy)]
pub struct Capability {
    pub feature: GsFeature,
    pub fclk_can: u32,
    pub tseg1_min: u32,
    pub tseg1_max: u32,
    pub tseg2_min: u32,
    pub tseg2_max: u32,
    pub sjw_max: u32,
    pub brp_min: u32,
    pub brp_max: u32,
    pub brp_inc: u32,
}

impl Capability {
    pub(crate) fn from_le_bytes(buf: &[u8; CAPABILITY_SIZE]) -> Self {
        let mut words = [0u32; 10];
        for (word, chunk) in words.iter_mut().zip(buf.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Self {
            feature: GsFeature::from_bits_truncate(words[0]),
            fclk_can: words[1],
            tseg1_min: words[2],
            tseg1_max: words[3],
            tseg2_min: words[4],
            tseg2_max: words[5],
            sjw_max: words[6],
            brp_min: words[7],
            brp_max: words[8],
            brp_inc: words[9],
        }
    }
}

/// The vendor requests a filter-capable gs_usb firmware answers.
///
/// [`UsbDevice`] implements this over real control transfers; the seam keeps
/// the probe and ship sequence testable without hardware.
pub trait FilterApi {
    /// Read the capability record.
    fn capability(&self) -> Result<Capability, FilterError>;
    /// Ask which filter hardware the firmware drives.
    fn filter_hardware(&self) -> Result<HardwareType, FilterError>;
    /// Ship a compiled filter image. The firmware applies it atomically.
    fn program_filter(&self, image: &[u8]) -> Result<(), FilterError>;

    /// Whether the firmware supports the hardware acceptance filter requests.
    fn has_hardware_filter(&self) -> Result<bool, FilterError> {
        Ok(self.capability()?.feature.contains(GsFeature::FILTER))
    }
}

impl FilterApi for UsbDevice {
    fn capability(&self) -> Result<Capability, FilterError> {
        let mut buf = [0u8; CAPABILITY_SIZE];
        let read = self.control_in(GS_USB_BREQ_BT_CONST, &mut buf)?;
        if read != CAPABILITY_SIZE {
            return Err(FilterError::TransferFailed(format!("short capability read: {read}")));
        }
        Ok(Capability::from_le_bytes(&buf))
    }

    fn filter_hardware(&self) -> Result<HardwareType, FilterError> {
        let mut buf = [0u8; FILTER_INFO_SIZE];
        let read = self.control_in(GS_USB_BREQ_GET_FILTER, &mut buf)?;
        if read != FILTER_INFO_SIZE {
            return Err(FilterError::TransferFailed(format!("short filter info read: {read}")));
        }
        HardwareType::try_from(buf[0])
    }

    fn program_filter(&self, image: &[u8]) -> Result<(), FilterError> {
        let written = self.control_out(GS_USB_BREQ_SET_FILTER, image)?;
        if written != image.len() {
            return Err(FilterError::TransferFailed(format!(
                "short filter write: {}/{}",
                written,
                image.len()
            )));
        }
        Ok(())
    }
}
