//! Flat mock memory bus.
//!
//! Backs a single span of addresses with a byte vector and can be told to fail
//! specific addresses, so engine tests do not depend on the region map.

use mipsim_core::common::AddressError;
use mipsim_core::soc::MemoryBus;

/// Single-span memory bus with injectable faults.
#[derive(Debug)]
pub struct MockBus {
    data: Vec<u8>,
    base: u32,
    fault_addrs: Vec<u32>,
    /// Every successful write as `(addr, width)`.
    pub writes: Vec<(u32, u32)>,
}

impl MockBus {
    /// Creates `size` zeroed bytes starting at `base`.
    pub fn new(size: usize, base: u32) -> Self {
        Self {
            data: vec![0; size],
            base,
            fault_addrs: Vec::new(),
            writes: Vec::new(),
        }
    }

    /// Makes any access touching `addr` fail as unmapped.
    pub fn inject_fault(&mut self, addr: u32) {
        self.fault_addrs.push(addr);
    }

    fn check(&self, addr: u32, width: u32) -> Result<usize, AddressError> {
        for a in addr..addr.wrapping_add(width) {
            if self.fault_addrs.contains(&a) {
                return Err(AddressError::Unmapped(a));
            }
        }
        let offset = addr.wrapping_sub(self.base) as usize;
        if addr < self.base || offset + width as usize > self.data.len() {
            return Err(AddressError::Unmapped(addr));
        }
        Ok(offset)
    }

    fn check_aligned(addr: u32) -> Result<(), AddressError> {
        if addr % 4 == 0 {
            Ok(())
        } else {
            Err(AddressError::Misaligned { addr, width: 4 })
        }
    }
}

impl MemoryBus for MockBus {
    fn read_byte(&self, addr: u32) -> Result<u8, AddressError> {
        let off = self.check(addr, 1)?;
        Ok(self.data[off])
    }

    fn read_half(&self, addr: u32) -> Result<u16, AddressError> {
        let off = self.check(addr, 2)?;
        Ok(u16::from_le_bytes([self.data[off], self.data[off + 1]]))
    }

    fn read_word(&self, addr: u32) -> Result<u32, AddressError> {
        Self::check_aligned(addr)?;
        let off = self.check(addr, 4)?;
        let mut bytes = [0; 4];
        bytes.copy_from_slice(&self.data[off..off + 4]);
        Ok(u32::from_le_bytes(bytes))
    }

    fn write_byte(&mut self, addr: u32, val: u8) -> Result<(), AddressError> {
        let off = self.check(addr, 1)?;
        self.data[off] = val;
        self.writes.push((addr, 1));
        Ok(())
    }

    fn write_half(&mut self, addr: u32, val: u16) -> Result<(), AddressError> {
        let off = self.check(addr, 2)?;
        self.data[off..off + 2].copy_from_slice(&val.to_le_bytes());
        self.writes.push((addr, 2));
        Ok(())
    }

    fn write_word(&mut self, addr: u32, val: u32) -> Result<(), AddressError> {
        Self::check_aligned(addr)?;
        let off = self.check(addr, 4)?;
        self.data[off..off + 4].copy_from_slice(&val.to_le_bytes());
        self.writes.push((addr, 4));
        Ok(())
    }
}
