//! Sparse tilemap keyed by integer cell coordinates

use super::palette::TileHandle;
use std::collections::HashMap;

/// Integer cell coordinate. `y` grows upwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub x: i32,
    pub y: i32,
}

impl CellPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tilemap {
    cells: HashMap<CellPos, TileHandle>,
}

impl Tilemap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell, returning the previous occupant
    pub fn set(&mut self, pos: CellPos, tile: TileHandle) -> Option<TileHandle> {
        self.cells.insert(pos, tile)
    }

    /// Occupied cells in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (CellPos, TileHandle)> + '_ {
        self.cells.iter().map(|(pos, tile)| (*pos, *tile))
    }

    /// Occupied cells in bounding-rectangle order: rows by ascending y,
    /// ascending x within a row. Equivalent to scanning every position of
    /// the occupied bounding rectangle and keeping the occupied ones.
    pub fn cells_in_bounds_order(&self) -> Vec<(CellPos, TileHandle)> {
        let mut cells: Vec<_> = self.iter().collect();
        cells.sort_unstable_by_key(|(pos, _)| (pos.y, pos.x));
        cells
    }
}

#[cfg(test)]
impl Tilemap {
    pub fn get(&self, pos: CellPos) -> Option<TileHandle> {
        self.cells.get(&pos).copied()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_palette;
    use crate::editor::TilePalette;

    /// Inclusive (min, max) corners of the occupied cells
    fn bounds(map: &Tilemap) -> Option<(CellPos, CellPos)> {
        let mut cells = map.iter().map(|(pos, _)| pos);
        let first = cells.next()?;
        Some(cells.fold((first, first), |(min, max), p| {
            (
                CellPos::new(min.x.min(p.x), min.y.min(p.y)),
                CellPos::new(max.x.max(p.x), max.y.max(p.y)),
            )
        }))
    }

    fn handles() -> (TileHandle, TileHandle) {
        let palette = TilePalette::from_config(&default_palette());
        (
            palette.resolve("BasicTile1").unwrap(),
            palette.resolve("BasicTile2").unwrap(),
        )
    }

    #[test]
    fn test_set_overwrites() {
        let (a, b) = handles();
        let mut map = Tilemap::new();
        assert_eq!(map.set(CellPos::new(1, 2), a), None);
        assert_eq!(map.set(CellPos::new(1, 2), b), Some(a));
        assert_eq!(map.get(CellPos::new(1, 2)), Some(b));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_bounds() {
        let (a, _) = handles();
        let mut map = Tilemap::new();
        assert_eq!(bounds(&map), None);

        map.set(CellPos::new(-3, 4), a);
        map.set(CellPos::new(5, -1), a);
        map.set(CellPos::new(0, 0), a);
        assert_eq!(bounds(&map), Some((CellPos::new(-3, -1), CellPos::new(5, 4))));
    }

    #[test]
    fn test_bounds_order_matches_full_scan() {
        let (a, b) = handles();
        let mut map = Tilemap::new();
        for (x, y) in [(2, 1), (-1, 0), (0, 1), (3, -2), (0, 0)] {
            map.set(CellPos::new(x, y), if x % 2 == 0 { a } else { b });
        }

        let (min, max) = bounds(&map).unwrap();
        let mut scanned = Vec::new();
        for y in min.y..=max.y {
            for x in min.x..=max.x {
                if let Some(tile) = map.get(CellPos::new(x, y)) {
                    scanned.push((CellPos::new(x, y), tile));
                }
            }
        }
        assert_eq!(map.cells_in_bounds_order(), scanned);
    }
}
