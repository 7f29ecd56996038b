//! Tile palette
//!
//! Maps tile-type names to opaque [`TileHandle`]s. The tilemap only ever stores
//! handles; names are looked up here when tiles are saved or loaded.

use crate::config::TileConfig;
use std::collections::HashMap;

/// Opaque reference to a palette entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileHandle(usize);

/// Renderable definition of a tile type
#[derive(Debug, Clone, PartialEq)]
pub struct TileDef {
    pub name: String,
    pub rgb: [u8; 3],
}

#[derive(Debug, Clone, Default)]
pub struct TilePalette {
    defs: Vec<TileDef>,
    lookup: HashMap<String, TileHandle>,
}

impl TilePalette {
    /// Build from the configured list. A repeated name replaces the earlier definition.
    pub fn from_config(entries: &[TileConfig]) -> Self {
        let mut palette = Self::default();
        for entry in entries {
            palette.insert(TileDef {
                name: entry.name.clone(),
                rgb: entry.rgb,
            });
        }
        palette
    }

    fn insert(&mut self, def: TileDef) -> TileHandle {
        if let Some(&handle) = self.lookup.get(&def.name) {
            self.defs[handle.0] = def;
            return handle;
        }
        let handle = TileHandle(self.defs.len());
        self.lookup.insert(def.name.clone(), handle);
        self.defs.push(def);
        handle
    }

    /// Resolve a tile-type name
    pub fn resolve(&self, name: &str) -> Option<TileHandle> {
        self.lookup.get(name).copied()
    }

    pub fn get(&self, handle: TileHandle) -> Option<&TileDef> {
        self.defs.get(handle.0)
    }

    pub fn name(&self, handle: TileHandle) -> Option<&str> {
        self.get(handle).map(|def| def.name.as_str())
    }

    /// Entries in button order
    pub fn iter(&self) -> impl Iterator<Item = (TileHandle, &TileDef)> {
        self.defs.iter().enumerate().map(|(i, def)| (TileHandle(i), def))
    }
}
