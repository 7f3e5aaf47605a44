// Fri Apr 17 2026 - Alex

//! Synthetic-capture builder shared by the unit tests: carves heap,
//! metaspace and native regions out of zeroed buffers and pokes field
//! values at profile-computed offsets.

use crate::config::ImageConfig;
use crate::image::RuntimeImage;
use crate::jtypes::CompressedEncoding;
use crate::layout::LayoutProfile;
use crate::memory::{Address, RegionKind, SnapshotMemory};
use std::sync::Arc;

const REGION_SIZE: usize = 64 * 1024;
pub(crate) const HEAP_BASE: u64 = 0x0000_0008_0000_0000;
pub(crate) const META_BASE: u64 = 0x0000_0010_0000_0000;
pub(crate) const NATIVE_BASE: u64 = 0x0000_7f00_0000_0000;

struct RegionData {
    start: u64,
    data: Vec<u8>,
    cursor: u64,
}

impl RegionData {
    fn new(start: u64) -> Self {
        // Leave the base address unused so no record encodes to narrow 0.
        Self { start, data: vec![0; REGION_SIZE], cursor: 64 }
    }

    fn alloc(&mut self, size: u64, align: u64) -> Address {
        self.cursor = (self.cursor + align - 1) & !(align - 1);
        let addr = self.start + self.cursor;
        self.cursor += size;
        assert!(self.cursor as usize <= self.data.len(), "test region exhausted");
        Address::new(addr)
    }

    fn contains(&self, addr: u64) -> bool {
        addr >= self.start && addr < self.start + self.data.len() as u64
    }

    fn write(&mut self, addr: u64, bytes: &[u8]) {
        let offset = (addr - self.start) as usize;
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
    }
}

pub(crate) struct ImageBuilder {
    config: ImageConfig,
    profile: LayoutProfile,
    heap: RegionData,
    meta: RegionData,
    native: RegionData,
}

impl ImageBuilder {
    pub fn new() -> Self {
        Self::with_config(ImageConfig::default())
    }

    pub fn with_config(config: ImageConfig) -> Self {
        let profile = LayoutProfile::build(config.pointer_width);
        Self {
            profile,
            config,
            heap: RegionData::new(HEAP_BASE),
            meta: RegionData::new(META_BASE),
            native: RegionData::new(NATIVE_BASE),
        }
    }

    /// Compressed-klass setup with the metaspace region placed at the
    /// encoding base.
    pub fn with_compressed_klass(encoding: CompressedEncoding) -> Self {
        let mut builder = Self::with_config(ImageConfig::default().with_compressed_klass(encoding));
        builder.meta = RegionData::new(encoding.base);
        builder
    }

    pub fn profile(&self) -> &LayoutProfile {
        &self.profile
    }

    pub fn config_mut(&mut self) -> &mut ImageConfig {
        &mut self.config
    }

    pub fn alloc_heap(&mut self, size: u64) -> Address {
        self.heap.alloc(size, self.config.object_alignment)
    }

    pub fn alloc_meta(&mut self, type_name: &str) -> Address {
        let size = self.profile.size_of(type_name).unwrap();
        self.meta.alloc(size.max(8), 8)
    }

    pub fn alloc_raw(&mut self, size: u64, align: u64) -> Address {
        self.native.alloc(size, align)
    }

    pub fn alloc_symbol(&mut self, body: &[u8]) -> Address {
        let body_offset = self.profile.offset_of("Symbol", "body").unwrap();
        let size = (body_offset + body.len() as u64 + 7) & !7;
        let addr = self.meta.alloc(size, 8);
        self.set_u16_field("Symbol", "length", addr, body.len() as u16);
        self.poke_bytes(addr.as_u64() + body_offset, body);
        addr
    }

    pub fn alloc_u1_array(&mut self, values: &[u8]) -> Address {
        let addr = self.meta.alloc(4 + values.len() as u64, 8);
        self.poke_i32(addr.as_u64(), values.len() as i32);
        self.poke_bytes(addr.as_u64() + 4, values);
        addr
    }

    pub fn alloc_u2_array(&mut self, values: &[u16]) -> Address {
        let addr = self.meta.alloc(4 + 2 * values.len() as u64, 8);
        self.poke_i32(addr.as_u64(), values.len() as i32);
        for (i, value) in values.iter().enumerate() {
            self.poke_u16(addr.as_u64() + 4 + 2 * i as u64, *value);
        }
        addr
    }

    pub fn alloc_constant_pool(&mut self, length: i32) -> Address {
        let header = self.profile.size_of("ConstantPool").unwrap();
        let word = self.config.pointer_width.bytes();
        let addr = self.meta.alloc(header + word * length as u64, 8);
        self.set_i32_field("ConstantPool", "_length", addr, length);
        addr
    }

    pub fn set_pool_slot(&mut self, pool: Address, index: usize, value: u64) {
        let header = self.profile.size_of("ConstantPool").unwrap();
        let word = self.config.pointer_width.bytes();
        self.poke_ptr(pool.as_u64() + header + word * index as u64, value);
    }

    fn region_for(&mut self, addr: u64) -> &mut RegionData {
        if self.heap.contains(addr) {
            &mut self.heap
        } else if self.meta.contains(addr) {
            &mut self.meta
        } else if self.native.contains(addr) {
            &mut self.native
        } else {
            panic!("poke outside any test region: {:#x}", addr);
        }
    }

    pub fn poke_bytes(&mut self, addr: u64, bytes: &[u8]) {
        self.region_for(addr).write(addr, bytes);
    }

    pub fn poke_u8(&mut self, addr: u64, value: u8) {
        self.poke_bytes(addr, &[value]);
    }

    pub fn poke_u16(&mut self, addr: u64, value: u16) {
        self.poke_bytes(addr, &value.to_le_bytes());
    }

    pub fn poke_u32(&mut self, addr: u64, value: u32) {
        self.poke_bytes(addr, &value.to_le_bytes());
    }

    pub fn poke_i32(&mut self, addr: u64, value: i32) {
        self.poke_bytes(addr, &value.to_le_bytes());
    }

    pub fn poke_u64(&mut self, addr: u64, value: u64) {
        self.poke_bytes(addr, &value.to_le_bytes());
    }

    pub fn poke_ptr(&mut self, addr: u64, value: u64) {
        match self.config.pointer_width {
            crate::jtypes::PointerWidth::P32 => self.poke_u32(addr, value as u32),
            crate::jtypes::PointerWidth::P64 => self.poke_u64(addr, value),
        }
    }

    fn field_addr(&self, type_name: &str, field: &str, base: Address) -> u64 {
        base.as_u64() + self.profile.offset_of(type_name, field).unwrap()
    }

    pub fn set_u8_field(&mut self, type_name: &str, field: &str, base: Address, value: u8) {
        self.poke_u8(self.field_addr(type_name, field, base), value);
    }

    pub fn set_u16_field(&mut self, type_name: &str, field: &str, base: Address, value: u16) {
        self.poke_u16(self.field_addr(type_name, field, base), value);
    }

    pub fn set_u32_field(&mut self, type_name: &str, field: &str, base: Address, value: u32) {
        self.poke_u32(self.field_addr(type_name, field, base), value);
    }

    pub fn set_i32_field(&mut self, type_name: &str, field: &str, base: Address, value: i32) {
        self.poke_i32(self.field_addr(type_name, field, base), value);
    }

    pub fn set_u64_field(&mut self, type_name: &str, field: &str, base: Address, value: u64) {
        self.poke_u64(self.field_addr(type_name, field, base), value);
    }

    pub fn set_ptr_field(&mut self, type_name: &str, field: &str, base: Address, value: u64) {
        self.poke_ptr(self.field_addr(type_name, field, base), value);
    }

    pub fn build(self) -> RuntimeImage {
        let mut snapshot = SnapshotMemory::new();
        snapshot.add_region(Address::new(self.heap.start), RegionKind::Heap, "heap", self.heap.data);
        snapshot.add_region(
            Address::new(self.meta.start),
            RegionKind::Metaspace,
            "metaspace",
            self.meta.data,
        );
        snapshot.add_region(
            Address::new(self.native.start),
            RegionKind::Native,
            "native",
            self.native.data,
        );
        RuntimeImage::with_profile(Arc::new(snapshot), self.config, self.profile)
    }
}
