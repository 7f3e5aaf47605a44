// Mon Apr 13 2026 - Alex

use crate::memory::{Address, MemoryError, MemoryRegion};

/// Read-only access to a captured runtime image. Implementations own the
/// capture (snapshot buffer, mapped core file, remote transport); this crate
/// never writes through them. All multi-byte reads are little-endian,
/// matching the targets the layout mirror was built against.
pub trait MemoryReader: Send + Sync {
    fn read_bytes(&self, addr: Address, len: usize) -> Result<Vec<u8>, MemoryError>;

    fn base_address(&self) -> Address;

    fn regions(&self) -> Vec<MemoryRegion>;

    fn read_u8(&self, addr: Address) -> Result<u8, MemoryError> {
        Ok(self.read_bytes(addr, 1)?[0])
    }

    fn read_u16(&self, addr: Address) -> Result<u16, MemoryError> {
        let b = self.read_bytes(addr, 2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn read_u32(&self, addr: Address) -> Result<u32, MemoryError> {
        let b = self.read_bytes(addr, 4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn read_u64(&self, addr: Address) -> Result<u64, MemoryError> {
        let b = self.read_bytes(addr, 8)?;
        Ok(u64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]))
    }

    fn read_i8(&self, addr: Address) -> Result<i8, MemoryError> {
        Ok(self.read_u8(addr)? as i8)
    }

    fn read_i16(&self, addr: Address) -> Result<i16, MemoryError> {
        Ok(self.read_u16(addr)? as i16)
    }

    fn read_i32(&self, addr: Address) -> Result<i32, MemoryError> {
        Ok(self.read_u32(addr)? as i32)
    }

    fn read_i64(&self, addr: Address) -> Result<i64, MemoryError> {
        Ok(self.read_u64(addr)? as i64)
    }

    /// NUL-terminated byte string, bounded to keep a corrupt capture from
    /// turning one bad pointer into an unbounded scan.
    fn read_c_string(&self, addr: Address, max_len: usize) -> Result<String, MemoryError> {
        let mut bytes = Vec::new();
        for i in 0..max_len {
            let byte = self.read_u8(addr + i as u64)?;
            if byte == 0 {
                break;
            }
            bytes.push(byte);
        }
        String::from_utf8(bytes).map_err(|_| MemoryError::InvalidString(addr.as_u64()))
    }
}
