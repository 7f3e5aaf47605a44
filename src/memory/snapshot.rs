// Mon Apr 13 2026 - Alex

use crate::memory::{Address, MemoryError, MemoryRange, MemoryReader, MemoryRegion, RegionKind};

/// An owned, point-in-time capture assembled from byte buffers, one per
/// mapped region. The simplest way to hand this crate a heap/metaspace
/// snapshot, and the fixture vehicle for every test in the crate.
pub struct SnapshotMemory {
    regions: Vec<SnapshotRegion>,
}

struct SnapshotRegion {
    range: MemoryRange,
    kind: RegionKind,
    name: String,
    data: Vec<u8>,
}

impl SnapshotMemory {
    pub fn new() -> Self {
        Self { regions: Vec::new() }
    }

    pub fn add_region(
        &mut self,
        start: Address,
        kind: RegionKind,
        name: impl Into<String>,
        data: Vec<u8>,
    ) {
        let range = MemoryRange::from_start_size(start, data.len() as u64);
        self.regions.push(SnapshotRegion { range, kind, name: name.into(), data });
        self.regions.sort_by_key(|r| r.range.start());
    }

    pub fn with_region(
        mut self,
        start: Address,
        kind: RegionKind,
        name: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        self.add_region(start, kind, name, data);
        self
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    fn locate(&self, addr: Address, len: usize) -> Result<&[u8], MemoryError> {
        let region = self
            .regions
            .iter()
            .find(|r| r.range.contains(addr))
            .ok_or(MemoryError::Unmapped(addr.as_u64()))?;
        if !region.range.contains_span(addr, len) {
            return Err(MemoryError::OutOfBounds { addr: addr.as_u64(), len });
        }
        let offset = (addr - region.range.start()) as usize;
        Ok(&region.data[offset..offset + len])
    }
}

impl Default for SnapshotMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryReader for SnapshotMemory {
    fn read_bytes(&self, addr: Address, len: usize) -> Result<Vec<u8>, MemoryError> {
        Ok(self.locate(addr, len)?.to_vec())
    }

    fn base_address(&self) -> Address {
        self.regions.first().map(|r| r.range.start()).unwrap_or(Address::zero())
    }

    fn regions(&self) -> Vec<MemoryRegion> {
        self.regions
            .iter()
            .map(|r| MemoryRegion::new(r.range, r.kind, r.name.clone()))
            .collect()
    }
}
