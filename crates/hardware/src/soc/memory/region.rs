//! Memory Region Buffer.
//!
//! One contiguous, named span of the address space with its own zero-initialized
//! backing store. Offsets passed to the accessors are region-relative and must
//! already be bounds-checked by the caller.

/// A named memory region covering `base..=bound`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryRegion {
    name: String,
    base: u32,
    bound: u32,
    bytes: Vec<u8>,
}

impl MemoryRegion {
    /// Allocates a zeroed region.
    ///
    /// # Arguments
    ///
    /// * `name` - Region name (e.g. `"text"`).
    /// * `base` - First mapped address.
    /// * `bound` - Last mapped address (inclusive); must be `>= base`.
    pub fn new(name: impl Into<String>, base: u32, bound: u32) -> Self {
        let len = (u64::from(bound) - u64::from(base) + 1) as usize;
        Self {
            name: name.into(),
            base,
            bound,
            bytes: vec![0; len],
        }
    }

    /// Returns the region name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the first mapped address.
    pub const fn base(&self) -> u32 {
        self.base
    }

    /// Returns the last mapped address (inclusive).
    pub const fn bound(&self) -> u32 {
        self.bound
    }

    /// Returns the size of the region in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the region has no bytes (never the case once built).
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns `true` if `addr` falls inside the region.
    #[inline]
    pub const fn contains(&self, addr: u32) -> bool {
        self.base <= addr && addr <= self.bound
    }

    /// Reads `N` bytes starting at `offset`.
    #[inline]
    pub(crate) fn read<const N: usize>(&self, offset: usize) -> [u8; N] {
        let mut out = [0; N];
        out.copy_from_slice(&self.bytes[offset..offset + N]);
        out
    }

    /// Writes `data` starting at `offset`.
    #[inline]
    pub(crate) fn write(&mut self, offset: usize, data: &[u8]) {
        self.bytes[offset..offset + data.len()].copy_from_slice(data);
    }

    /// Zeroes every byte.
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }
}
