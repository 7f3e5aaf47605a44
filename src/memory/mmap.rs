// Mon Apr 13 2026 - Alex

use crate::memory::{Address, MemoryError, MemoryRange, MemoryReader, MemoryRegion, RegionKind};
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

/// A file-backed capture (raw dump of one contiguous span) mapped at a
/// declared base address. Multi-span dumps compose several of these behind
/// a SnapshotMemory-style front or one reader per span.
pub struct MmapMemory {
    mmap: Arc<Mmap>,
    base_address: Address,
    kind: RegionKind,
}

impl MmapMemory {
    pub fn from_file<P: AsRef<Path>>(path: P, base_address: Address) -> Result<Self, MemoryError> {
        let file = File::open(path).map_err(MemoryError::Io)?;
        let mmap = unsafe { Mmap::map(&file) }.map_err(MemoryError::Io)?;
        Ok(Self {
            mmap: Arc::new(mmap),
            base_address,
            kind: RegionKind::Unknown,
        })
    }

    pub fn with_kind(mut self, kind: RegionKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn size(&self) -> usize {
        self.mmap.len()
    }

    fn offset(&self, addr: Address, len: usize) -> Result<usize, MemoryError> {
        if addr.as_u64() < self.base_address.as_u64() {
            return Err(MemoryError::Unmapped(addr.as_u64()));
        }
        let offset = (addr.as_u64() - self.base_address.as_u64()) as usize;
        if offset >= self.mmap.len() {
            return Err(MemoryError::Unmapped(addr.as_u64()));
        }
        if offset + len > self.mmap.len() {
            return Err(MemoryError::OutOfBounds { addr: addr.as_u64(), len });
        }
        Ok(offset)
    }
}

impl MemoryReader for MmapMemory {
    fn read_bytes(&self, addr: Address, len: usize) -> Result<Vec<u8>, MemoryError> {
        let offset = self.offset(addr, len)?;
        Ok(self.mmap[offset..offset + len].to_vec())
    }

    fn base_address(&self) -> Address {
        self.base_address
    }

    fn regions(&self) -> Vec<MemoryRegion> {
        let range = MemoryRange::from_start_size(self.base_address, self.mmap.len() as u64);
        vec![MemoryRegion::new(range, self.kind, "mmap")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_mapped_file_reads() {
        let mut path = std::env::temp_dir();
        path.push("hotspot_object_model_mmap_test.bin");
        {
            let mut f = File::create(&path).unwrap();
            f.write_all(&[1u8, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        }

        let mem = MmapMemory::from_file(&path, Address::new(0x7000_0000)).unwrap();
        assert_eq!(mem.size(), 8);
        assert_eq!(mem.read_u8(Address::new(0x7000_0000)).unwrap(), 1);
        assert_eq!(mem.read_u32(Address::new(0x7000_0004)).unwrap(), 0x0807_0605);
        assert!(mem.read_u8(Address::new(0x7000_0008)).is_err());
        assert!(mem.read_u8(Address::new(0x6fff_ffff)).is_err());

        std::fs::remove_file(&path).ok();
    }
}
