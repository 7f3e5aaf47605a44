// Tue Apr 14 2026 - Alex

use crate::jtypes::{CompressedEncoding, PointerWidth};
use crate::memory::Address;
use serde::{Deserialize, Serialize};

/// Start/end of one span in the target's address space, as recorded in a
/// capture manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionBounds {
    pub start: u64,
    pub end: u64,
}

impl RegionBounds {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, addr: Address) -> bool {
        addr.as_u64() >= self.start && addr.as_u64() < self.end
    }
}

/// Per-target-instance parameters. Everything here comes from the captured
/// process (its flags, its dump metadata), never from this crate's host:
/// the same build of this crate inspects 32- and 64-bit captures, with and
/// without compressed references, side by side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Free-form label of the target build the layout tables are assumed
    /// to match, carried into logs and validation reports.
    pub version_label: String,
    pub pointer_width: PointerWidth,
    pub compressed_oops: Option<CompressedEncoding>,
    pub compressed_klass: Option<CompressedEncoding>,
    /// Managed-heap bounds; object-view construction range-checks against
    /// these when present.
    pub heap: Option<RegionBounds>,
    /// Metaspace bounds; descriptor-view construction range-checks against
    /// these when present.
    pub metaspace: Option<RegionBounds>,
    /// The shared (CDS) metaspace span, when the target maps one.
    pub shared_metaspace: Option<RegionBounds>,
    /// Address of the VM-intrinsic symbol pointer table in the target.
    pub vm_symbols: Option<u64>,
    /// Static-field start offset inside a mirror object; a per-build
    /// static in the target, so a plain config input here.
    pub mirror_static_fields_offset: Option<u64>,
    /// Stack start offset inside a stack-chunk object, same story.
    pub stack_chunk_stack_offset: Option<u64>,
    /// Heap object alignment in bytes.
    pub object_alignment: u64,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            version_label: String::from("unspecified"),
            pointer_width: PointerWidth::P64,
            compressed_oops: None,
            compressed_klass: None,
            heap: None,
            metaspace: None,
            shared_metaspace: None,
            vm_symbols: None,
            mirror_static_fields_offset: None,
            stack_chunk_stack_offset: None,
            object_alignment: 8,
        }
    }
}

impl ImageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version_label(mut self, label: impl Into<String>) -> Self {
        self.version_label = label.into();
        self
    }

    pub fn with_pointer_width(mut self, width: PointerWidth) -> Self {
        self.pointer_width = width;
        self
    }

    pub fn with_compressed_oops(mut self, encoding: CompressedEncoding) -> Self {
        self.compressed_oops = Some(encoding);
        self
    }

    pub fn with_compressed_klass(mut self, encoding: CompressedEncoding) -> Self {
        self.compressed_klass = Some(encoding);
        self
    }

    pub fn with_heap(mut self, bounds: RegionBounds) -> Self {
        self.heap = Some(bounds);
        self
    }

    pub fn with_metaspace(mut self, bounds: RegionBounds) -> Self {
        self.metaspace = Some(bounds);
        self
    }

    pub fn with_shared_metaspace(mut self, bounds: RegionBounds) -> Self {
        self.shared_metaspace = Some(bounds);
        self
    }

    pub fn with_vm_symbols(mut self, table: u64) -> Self {
        self.vm_symbols = Some(table);
        self
    }

    pub fn with_object_alignment(mut self, alignment: u64) -> Self {
        self.object_alignment = alignment;
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
