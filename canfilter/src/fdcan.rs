use crate::builder::{percent, FilterBuilder};
use crate::constant::{EFF_MASK, SFF_MASK};
use crate::error::FilterError;
use crate::hardware::HardwareType;

// SFT/EFT filter type
const FT_RANGE: u32 = 0x0;
const FT_DUAL: u32 = 0x1;
// SFEC/EFEC element configuration
const FEC_RX_FIFO0: u32 = 0x1;

const FILTER_TYPES: [&str; 4] = ["range", "dual", "mask", "off"];
const FILTER_CONFIGS: [&str; 8] = [
    "off",
    "fifo0",
    "fifo1",
    "reject",
    "prio",
    "prio fifo0",
    "prio fifo1",
    "not used",
];

/// Filter builder for FDCAN (Bosch M_CAN) controllers.
///
/// The hardware natively supports dual-identifier and start/end-range filter
/// elements. Single identifiers are paired up into dual elements, with the
/// first identifier replicated into the second slot so a singleton flushed by
/// `end` still matches only the intended identifier. Ranges are emitted
/// directly, endpoints normalized. Every element routes to FIFO 0.
pub struct FdCan<const STD: usize, const EXT: usize> {
    hardware: HardwareType,

    std_filter: [u32; STD],
    std_filter_nbr: usize,
    ext_filter: [[u32; 2]; EXT],
    ext_filter_nbr: usize,

    std_id: [u32; 2],
    std_id_count: usize,
    ext_id: [u32; 2],
    ext_id_count: usize,
}

/// FDCAN with 28 standard and 8 extended filter elements.
pub type FdCan28 = FdCan<28, 8>;
/// FDCAN with 128 standard and 64 extended filter elements.
pub type FdCan128 = FdCan<128, 64>;

impl FdCan<28, 8> {
    pub fn new() -> Self {
        Self::with_hardware(HardwareType::FdCan28)
    }
}

impl FdCan<128, 64> {
    pub fn new() -> Self {
        Self::with_hardware(HardwareType::FdCan128)
    }
}

impl Default for FdCan<28, 8> {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for FdCan<128, 64> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const STD: usize, const EXT: usize> FdCan<STD, EXT> {
    fn with_hardware(hardware: HardwareType) -> Self {
        Self {
            hardware,
            std_filter: [0; STD],
            std_filter_nbr: 0,
            ext_filter: [[0; 2]; EXT],
            ext_filter_nbr: 0,
            std_id: [0; 2],
            std_id_count: 0,
            ext_id: [0; 2],
            ext_id_count: 0,
        }
    }

    /// Emit one standard filter element word.
    fn emit_std(&mut self, filter_type: u32, id1: u32, id2: u32) -> Result<(), FilterError> {
        if self.std_filter_nbr >= STD {
            return Err(FilterError::Full);
        }
        if id1 > SFF_MASK || id2 > SFF_MASK {
            return Err(FilterError::Param);
        }

        self.std_filter[self.std_filter_nbr] =
            (filter_type << 30) | (FEC_RX_FIFO0 << 27) | (id1 << 16) | id2;
        self.std_filter_nbr += 1;

        Ok(())
    }

    /// Emit one extended filter element (two words).
    fn emit_ext(&mut self, filter_type: u32, id1: u32, id2: u32) -> Result<(), FilterError> {
        if self.ext_filter_nbr >= EXT {
            return Err(FilterError::Full);
        }
        if id1 > EFF_MASK || id2 > EFF_MASK {
            return Err(FilterError::Param);
        }

        self.ext_filter[self.ext_filter_nbr][0] = (FEC_RX_FIFO0 << 29) | id1;
        self.ext_filter[self.ext_filter_nbr][1] = (filter_type << 30) | id2;
        self.ext_filter_nbr += 1;

        Ok(())
    }
}

impl<const STD: usize, const EXT: usize> FilterBuilder for FdCan<STD, EXT> {
    fn begin(&mut self) {
        *self = Self::with_hardware(self.hardware);
    }

    fn add_std_id(&mut self, id: u32) -> Result<(), FilterError> {
        if id > SFF_MASK || self.std_id_count > 1 {
            return Err(FilterError::Param);
        }

        self.std_id[self.std_id_count] = id;
        self.std_id_count += 1;
        if self.std_id_count == 1 {
            self.std_id[1] = id;
        } else {
            self.std_id_count = 0;
            return self.emit_std(FT_DUAL, self.std_id[0], self.std_id[1]);
        }
        Ok(())
    }

    fn add_ext_id(&mut self, id: u32) -> Result<(), FilterError> {
        if id > EFF_MASK || self.ext_id_count > 1 {
            return Err(FilterError::Param);
        }

        self.ext_id[self.ext_id_count] = id;
        self.ext_id_count += 1;
        if self.ext_id_count == 1 {
            self.ext_id[1] = id;
        } else {
            self.ext_id_count = 0;
            return self.emit_ext(FT_DUAL, self.ext_id[0], self.ext_id[1]);
        }
        Ok(())
    }

    fn add_std_range(&mut self, begin: u32, end: u32) -> Result<(), FilterError> {
        if begin > SFF_MASK || end > SFF_MASK {
            return Err(FilterError::Param);
        }

        if begin <= end {
            self.emit_std(FT_RANGE, begin, end)
        } else {
            self.emit_std(FT_RANGE, end, begin)
        }
    }

    fn add_ext_range(&mut self, begin: u32, end: u32) -> Result<(), FilterError> {
        if begin > EFF_MASK || end > EFF_MASK {
            return Err(FilterError::Param);
        }

        if begin <= end {
            self.emit_ext(FT_RANGE, begin, end)
        } else {
            self.emit_ext(FT_RANGE, end, begin)
        }
    }

    fn end(&mut self) -> Result<(), FilterError> {
        if self.std_id_count != 0 {
            self.std_id_count = 0;
            self.emit_std(FT_DUAL, self.std_id[0], self.std_id[1])?;
        }
        if self.ext_id_count != 0 {
            self.ext_id_count = 0;
            self.emit_ext(FT_DUAL, self.ext_id[0], self.ext_id[1])?;
        }
        Ok(())
    }

    fn hardware(&self) -> HardwareType {
        self.hardware
    }

    fn image(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(4 + 4 * STD + 8 * EXT);
        buf.push(self.hardware as u8);
        buf.push(self.std_filter_nbr as u8);
        buf.push(self.ext_filter_nbr as u8);
        buf.push(0);
        for word in &self.std_filter {
            buf.extend_from_slice(&word.to_le_bytes());
        }
        for element in &self.ext_filter {
            buf.extend_from_slice(&element[0].to_le_bytes());
            buf.extend_from_slice(&element[1].to_le_bytes());
        }
        buf
    }

    fn dump_registers(&self) -> String {
        let mut out = String::new();
        out.push_str("fdcan registers:\n");
        out.push_str(&format!("standard filters: {}\n", self.std_filter_nbr));
        for i in 0..self.std_filter_nbr {
            out.push_str(&format!("sf[{}]: 0x{:08x}\n", i, self.std_filter[i]));
        }
        out.push_str(&format!("extended filters: {}\n", self.ext_filter_nbr));
        for i in 0..self.ext_filter_nbr {
            out.push_str(&format!(
                "ef[{}]: f0=0x{:08x} f1=0x{:08x}\n",
                i, self.ext_filter[i][0], self.ext_filter[i][1]
            ));
        }
        out
    }

    fn dump_filters(&self) -> String {
        let mut out = String::new();
        out.push_str("fdcan filters:\n");
        for i in 0..self.std_filter_nbr {
            let word = self.std_filter[i];
            let id1 = (word >> 16) & SFF_MASK;
            let id2 = word & SFF_MASK;
            let config = (word >> 27) & 0x7;
            let filter_type = (word >> 30) & 0x3;
            out.push_str(&format!(
                "sf[{}]: {} 0x{:03x} 0x{:03x} {}\n",
                i,
                FILTER_TYPES[filter_type as usize],
                id1,
                id2,
                FILTER_CONFIGS[config as usize]
            ));
        }
        for i in 0..self.ext_filter_nbr {
            let id1 = self.ext_filter[i][0] & EFF_MASK;
            let id2 = self.ext_filter[i][1] & EFF_MASK;
            let config = (self.ext_filter[i][0] >> 29) & 0x7;
            let filter_type = (self.ext_filter[i][1] >> 30) & 0x3;
            out.push_str(&format!(
                "ef[{}]: {} 0x{:08x} 0x{:08x} {}\n",
                i,
                FILTER_TYPES[filter_type as usize],
                id1,
                id2,
                FILTER_CONFIGS[config as usize]
            ));
        }
        out
    }

    fn usage(&self) -> String {
        format!(
            "filter usage: {}/{} standard ({}%), {}/{} extended ({}%)",
            self.std_filter_nbr,
            STD,
            percent(self.std_filter_nbr, STD),
            self.ext_filter_nbr,
            EXT,
            percent(self.ext_filter_nbr, EXT)
        )
    }
}
