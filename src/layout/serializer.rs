// Tue Apr 14 2026 - Alex

use crate::layout::{LayoutProfile, TypeLayout};
use serde::{Deserialize, Serialize};

/// Flat, serde-friendly form of a computed layout. Captured to JSON on a
/// known-good target and replayed through the validation module to guard
/// against silent layout drift.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SerializableLayout {
    pub name: String,
    pub size: u64,
    pub alignment: u64,
    pub fields: Vec<SerializableField>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SerializableField {
    pub name: String,
    pub offset: u64,
    pub size: u64,
}

impl From<&TypeLayout> for SerializableLayout {
    fn from(layout: &TypeLayout) -> Self {
        Self {
            name: layout.name().to_string(),
            size: layout.size(),
            alignment: layout.alignment(),
            fields: layout
                .fields()
                .iter()
                .map(|f| SerializableField {
                    name: f.name().to_string(),
                    offset: f.offset(),
                    size: f.size(),
                })
                .collect(),
        }
    }
}

impl SerializableLayout {
    pub fn capture_profile(profile: &LayoutProfile) -> Vec<Self> {
        profile.iter().map(Self::from).collect()
    }

    pub fn to_json(layouts: &[Self]) -> serde_json::Result<String> {
        serde_json::to_string_pretty(layouts)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Vec<Self>> {
        serde_json::from_str(json)
    }
}
