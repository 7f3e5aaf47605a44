// Mon Apr 13 2026 - Alex

use crate::memory::{Address, MemoryError, MemoryReader, MemoryRegion};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Block cache in front of a slow reader (remote transport, large dump).
/// Blocks are keyed by aligned base address; the map is cleared wholesale
/// when it reaches max_blocks.
pub struct CachedReader {
    inner: Arc<dyn MemoryReader>,
    blocks: RwLock<HashMap<u64, Arc<Vec<u8>>>>,
    block_size: usize,
    max_blocks: usize,
}

impl CachedReader {
    pub fn new(inner: Arc<dyn MemoryReader>, block_size: usize, max_blocks: usize) -> Self {
        assert!(block_size.is_power_of_two(), "block size must be a power of two");
        Self {
            inner,
            blocks: RwLock::new(HashMap::new()),
            block_size,
            max_blocks,
        }
    }

    pub fn cached_blocks(&self) -> usize {
        self.blocks.read().len()
    }

    pub fn clear(&self) {
        self.blocks.write().clear();
    }

    fn block(&self, block_addr: Address) -> Result<Arc<Vec<u8>>, MemoryError> {
        if let Some(cached) = self.blocks.read().get(&block_addr.as_u64()) {
            return Ok(cached.clone());
        }
        let data = Arc::new(self.inner.read_bytes(block_addr, self.block_size)?);
        let mut blocks = self.blocks.write();
        if blocks.len() >= self.max_blocks {
            log::debug!("block cache full ({} blocks), clearing", blocks.len());
            blocks.clear();
        }
        blocks.insert(block_addr.as_u64(), data.clone());
        Ok(data)
    }
}

impl MemoryReader for CachedReader {
    fn read_bytes(&self, addr: Address, len: usize) -> Result<Vec<u8>, MemoryError> {
        let mut out = Vec::with_capacity(len);
        let mut cursor = addr;
        while out.len() < len {
            let block_addr = cursor.align_down(self.block_size);
            let block = match self.block(block_addr) {
                Ok(block) => block,
                // A span near a region edge may not fill a whole block;
                // fall through to the inner reader for the exact span.
                Err(_) => {
                    let rest = self.inner.read_bytes(cursor, len - out.len())?;
                    out.extend_from_slice(&rest);
                    break;
                }
            };
            let start = (cursor - block_addr) as usize;
            let take = (len - out.len()).min(self.block_size - start);
            out.extend_from_slice(&block[start..start + take]);
            cursor = cursor + take as u64;
        }
        Ok(out)
    }

    fn base_address(&self) -> Address {
        self.inner.base_address()
    }

    fn regions(&self) -> Vec<MemoryRegion> {
        self.inner.regions()
    }
}
