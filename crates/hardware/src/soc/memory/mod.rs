//! Segmented System Memory.
//!
//! This module implements the simulated address space. It provides:
//! 1. **Regions:** Named, non-overlapping spans (text, data, stack, ...) each with
//!    its own zeroed buffer.
//! 2. **Routing:** Binary search over the regions, sorted by base address.
//! 3. **Access:** Little-endian byte, half and word access through [`MemoryBus`].
//! 4. **Utilities:** Bulk program loading, range dumps and reset.
//!
//! An address no region contains is always an error, never a silent zero. A
//! multi-byte access that straddles two adjacent regions is split between them.

/// Region buffer implementation.
pub mod region;

pub use self::region::MemoryRegion;

use crate::common::{AddressError, ConfigError, WORD_BYTES};
use crate::config::{MemoryConfig, RegionConfig};
use crate::soc::traits::MemoryBus;

/// System memory made of sorted, non-overlapping regions.
#[derive(Clone, Debug)]
pub struct Memory {
    regions: Vec<MemoryRegion>,
}

impl Memory {
    /// Builds and validates the memory map.
    ///
    /// # Arguments
    ///
    /// * `configs` - Region descriptions, in any order.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::NoRegions`] if `configs` is empty.
    /// * [`ConfigError::InvalidRegion`] for a zero-sized region or one that
    ///   runs past `0xFFFF_FFFF`.
    /// * [`ConfigError::Overlap`] if two regions share an address.
    pub fn new(configs: &[RegionConfig]) -> Result<Self, ConfigError> {
        if configs.is_empty() {
            return Err(ConfigError::NoRegions);
        }

        let mut regions = configs
            .iter()
            .map(|cfg| {
                let bound = u64::from(cfg.base) + u64::from(cfg.size);
                if cfg.size == 0 || bound > u64::from(u32::MAX) + 1 {
                    return Err(ConfigError::InvalidRegion {
                        name: cfg.name.clone(),
                    });
                }
                Ok(MemoryRegion::new(
                    cfg.name.as_str(),
                    cfg.base,
                    (bound - 1) as u32,
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        regions.sort_by_key(MemoryRegion::base);
        for pair in regions.windows(2) {
            if pair[0].bound() >= pair[1].base() {
                return Err(ConfigError::Overlap {
                    first: pair[0].name().to_string(),
                    second: pair[1].name().to_string(),
                });
            }
        }

        Ok(Self { regions })
    }

    /// Builds the memory map from configuration and checks that the text region exists.
    ///
    /// # Errors
    ///
    /// Everything [`Memory::new`] reports, plus [`ConfigError::MissingTextRegion`]
    /// and [`ConfigError::MisalignedTextRegion`].
    pub fn from_config(config: &MemoryConfig) -> Result<Self, ConfigError> {
        let memory = Self::new(&config.regions)?;
        let text = memory
            .region(&config.text_region)
            .ok_or_else(|| ConfigError::MissingTextRegion(config.text_region.clone()))?;
        if text.base() % WORD_BYTES != 0 {
            return Err(ConfigError::MisalignedTextRegion {
                name: config.text_region.clone(),
                base: text.base(),
            });
        }
        Ok(memory)
    }

    /// Returns the regions sorted by base address.
    pub fn regions(&self) -> &[MemoryRegion] {
        &self.regions
    }

    /// Looks a region up by name.
    pub fn region(&self, name: &str) -> Option<&MemoryRegion> {
        self.regions.iter().find(|r| r.name() == name)
    }

    /// Zeroes every region.
    pub fn reset(&mut self) {
        for region in &mut self.regions {
            region.clear();
        }
    }

    /// Writes consecutive words starting at `base`.
    ///
    /// # Errors
    ///
    /// Fails on the first word that is misaligned or unmapped. Words before it
    /// have already been written.
    pub fn load_words(&mut self, base: u32, words: &[u32]) -> Result<(), AddressError> {
        let mut addr = base;
        for &word in words {
            self.write_word(addr, word)?;
            addr = addr.wrapping_add(WORD_BYTES);
        }
        Ok(())
    }

    /// Returns the `(address, word)` pairs from `lo` to `hi` inclusive.
    ///
    /// `lo` must be word-aligned; the last word read is the one starting at or
    /// before `hi`. An empty vector is returned when `lo > hi`.
    ///
    /// # Errors
    ///
    /// Fails on the first misaligned or unmapped word.
    pub fn dump(&self, lo: u32, hi: u32) -> Result<Vec<(u32, u32)>, AddressError> {
        let mut out = Vec::new();
        let mut addr = u64::from(lo);
        while addr <= u64::from(hi) {
            let a = addr as u32;
            out.push((a, self.read_word(a)?));
            addr += u64::from(WORD_BYTES);
        }
        Ok(out)
    }

    /// Finds the region containing `addr`.
    fn find(&self, addr: u32) -> Option<usize> {
        let idx = self.regions.partition_point(|r| r.base() <= addr);
        let candidate = idx.checked_sub(1)?;
        self.regions[candidate].contains(addr).then_some(candidate)
    }

    /// Resolves a single byte to a region index and offset.
    fn locate(&self, addr: u32) -> Result<(usize, usize), AddressError> {
        let idx = self.find(addr).ok_or(AddressError::Unmapped(addr))?;
        Ok((idx, (addr - self.regions[idx].base()) as usize))
    }

    /// Resolves an access of `N` bytes that stays inside one region.
    ///
    /// Returns `None` for the offset when the access runs past the bound of the
    /// region it starts in.
    fn locate_span<const N: usize>(
        &self,
        addr: u32,
    ) -> Result<(usize, Option<usize>), AddressError> {
        let (idx, off) = self.locate(addr)?;
        let fits = off + N <= self.regions[idx].len();
        Ok((idx, fits.then_some(off)))
    }

    /// Reads `N` bytes, continuing into the next region when the access
    /// straddles two adjacent ones.
    ///
    /// Fails at the first byte no region maps.
    fn read_bytes<const N: usize>(&self, addr: u32) -> Result<[u8; N], AddressError> {
        if let (idx, Some(off)) = self.locate_span::<N>(addr)? {
            return Ok(self.regions[idx].read(off));
        }
        let mut out = [0; N];
        let mut a = addr;
        for byte in &mut out {
            let (idx, off) = self.locate(a)?;
            *byte = self.regions[idx].read::<1>(off)[0];
            a = a.wrapping_add(1);
        }
        Ok(out)
    }

    /// Writes `data`, continuing into the next region when the access
    /// straddles two adjacent ones.
    ///
    /// Every byte is resolved before any is written, so a failed write leaves
    /// memory unchanged.
    fn write_bytes<const N: usize>(
        &mut self,
        addr: u32,
        data: [u8; N],
    ) -> Result<(), AddressError> {
        if let (idx, Some(off)) = self.locate_span::<N>(addr)? {
            self.regions[idx].write(off, &data);
            return Ok(());
        }
        let mut targets = [(0, 0); N];
        let mut a = addr;
        for target in &mut targets {
            *target = self.locate(a)?;
            a = a.wrapping_add(1);
        }
        for ((idx, off), byte) in targets.into_iter().zip(data) {
            self.regions[idx].write(off, &[byte]);
        }
        Ok(())
    }

    /// Checks word alignment.
    const fn check_aligned(addr: u32) -> Result<(), AddressError> {
        if addr % WORD_BYTES != 0 {
            return Err(AddressError::Misaligned {
                addr,
                width: WORD_BYTES,
            });
        }
        Ok(())
    }
}

impl MemoryBus for Memory {
    fn read_byte(&self, addr: u32) -> Result<u8, AddressError> {
        let (idx, off) = self.locate(addr)?;
        Ok(self.regions[idx].read::<1>(off)[0])
    }

    fn read_half(&self, addr: u32) -> Result<u16, AddressError> {
        self.read_bytes(addr).map(u16::from_le_bytes)
    }

    fn read_word(&self, addr: u32) -> Result<u32, AddressError> {
        Self::check_aligned(addr)?;
        self.read_bytes(addr).map(u32::from_le_bytes)
    }

    fn write_byte(&mut self, addr: u32, val: u8) -> Result<(), AddressError> {
        let (idx, off) = self.locate(addr)?;
        self.regions[idx].write(off, &[val]);
        Ok(())
    }

    fn write_half(&mut self, addr: u32, val: u16) -> Result<(), AddressError> {
        self.write_bytes(addr, val.to_le_bytes())
    }

    fn write_word(&mut self, addr: u32, val: u32) -> Result<(), AddressError> {
        Self::check_aligned(addr)?;
        self.write_bytes(addr, val.to_le_bytes())
    }
}
