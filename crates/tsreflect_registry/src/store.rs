//! The reflection-metadata store.
//!
//! A plain own-key/value store keyed by target identity, metadata key,
//! and optional property key. "Own" semantics throughout: lookups never
//! walk an inheritance chain, so a subclass exposes no entry written
//! against its parent.

use crate::value::{ClassHandle, TargetKey, Value};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct EntryKey {
    target: TargetKey,
    metadata_key: String,
    property: Option<String>,
}

/// The metadata store. The transformer's attachments are its sole writer.
#[derive(Default)]
pub struct MetadataStore<'a> {
    entries: FxHashMap<EntryKey, Value<'a>>,
}

impl<'a> MetadataStore<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a metadata value for a target (and optional property key),
    /// replacing any previous value for the same key.
    pub fn define_metadata(
        &mut self,
        metadata_key: &str,
        value: Value<'a>,
        target: &ClassHandle,
        property: Option<&str>,
    ) {
        self.entries.insert(
            EntryKey {
                target: target.key(),
                metadata_key: metadata_key.to_string(),
                property: property.map(str::to_string),
            },
            value,
        );
    }

    /// Read a metadata value defined on exactly this target.
    pub fn get_own_metadata(
        &self,
        metadata_key: &str,
        target: &ClassHandle,
        property: Option<&str>,
    ) -> Option<&Value<'a>> {
        self.entries.get(&EntryKey {
            target: target.key(),
            metadata_key: metadata_key.to_string(),
            property: property.map(str::to_string),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
