//! Tile layers and the wall grid with its adjacency codes.

use bounty_core::{tuning::WATER_TILE, CellCoord, TileLayer};

/// Adjacency code of a wall without active orthogonal neighbours.
pub(crate) const ISOLATED: u8 = 6;

/// Dense background tile layers of a map.
#[derive(Clone, Debug)]
pub(crate) struct TileLayers {
    columns: u32,
    rows: u32,
    layers: [Vec<i32>; 3],
}

impl TileLayers {
    /// Creates layers where every cell holds the same tile.
    pub(crate) fn filled(columns: u32, rows: u32, tile: i32) -> Self {
        let count = columns as usize * rows as usize;
        Self {
            columns,
            rows,
            layers: [vec![tile; count], vec![tile; count], vec![tile; count]],
        }
    }

    /// Wraps pre-validated layers whose lengths equal `columns * rows`.
    pub(crate) fn from_layers(columns: u32, rows: u32, layers: [Vec<i32>; 3]) -> Self {
        debug_assert!(layers
            .iter()
            .all(|layer| layer.len() == columns as usize * rows as usize));
        Self {
            columns,
            rows,
            layers,
        }
    }

    pub(crate) fn columns(&self) -> u32 {
        self.columns
    }

    pub(crate) fn rows(&self) -> u32 {
        self.rows
    }

    pub(crate) fn layer(&self, layer: TileLayer) -> &[i32] {
        &self.layers[layer.index()]
    }

    pub(crate) fn tile(&self, layer: TileLayer, cell: CellCoord) -> Option<i32> {
        let index = self.index(cell)?;
        Some(self.layers[layer.index()][index])
    }

    /// Writes a tile, returning `false` when the cell lies outside the map.
    pub(crate) fn set_tile(&mut self, layer: TileLayer, cell: CellCoord, tile: i32) -> bool {
        match self.index(cell) {
            Some(index) => {
                self.layers[layer.index()][index] = tile;
                true
            }
            None => false,
        }
    }

    /// Reports whether the terrain layer marks the cell as water.
    pub(crate) fn is_water(&self, cell: CellCoord) -> bool {
        self.tile(TileLayer::Terrain, cell) == Some(WATER_TILE)
    }

    /// Iterates over every land cell, column by column.
    pub(crate) fn land_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        cells_column_major(self.columns, self.rows).filter(move |cell| {
            self.tile(TileLayer::Terrain, *cell)
                .is_some_and(|tile| tile != WATER_TILE)
        })
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        cell_index(self.columns, self.rows, cell)
    }
}

/// State of a single wall cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Wall {
    pub(crate) active: bool,
    pub(crate) gate: bool,
    pub(crate) hp: i32,
    pub(crate) adjacency: u8,
}

impl Default for Wall {
    fn default() -> Self {
        Self {
            active: false,
            gate: false,
            hp: 0,
            adjacency: ISOLATED,
        }
    }
}

/// Dense grid storing one wall per map cell.
#[derive(Clone, Debug)]
pub(crate) struct WallGrid {
    columns: u32,
    rows: u32,
    cells: Vec<Wall>,
}

impl WallGrid {
    pub(crate) fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            cells: vec![Wall::default(); columns as usize * rows as usize],
        }
    }

    pub(crate) fn get(&self, cell: CellCoord) -> Option<&Wall> {
        let index = cell_index(self.columns, self.rows, cell)?;
        self.cells.get(index)
    }

    pub(crate) fn get_mut(&mut self, cell: CellCoord) -> Option<&mut Wall> {
        let index = cell_index(self.columns, self.rows, cell)?;
        self.cells.get_mut(index)
    }

    /// Reports whether the wall at `cell` exists and stands.
    pub(crate) fn is_active(&self, cell: CellCoord) -> bool {
        self.get(cell).is_some_and(|wall| wall.active)
    }

    /// Iterates over active walls, column by column.
    pub(crate) fn iter_active(&self) -> impl Iterator<Item = (CellCoord, &Wall)> + '_ {
        cells_column_major(self.columns, self.rows).filter_map(move |cell| {
            self.get(cell)
                .filter(|wall| wall.active)
                .map(|wall| (cell, wall))
        })
    }

    /// Recomputes the adjacency code of every cell from its active neighbours.
    pub(crate) fn recompute_adjacency(&mut self) {
        for row in 0..self.rows {
            for column in 0..self.columns {
                let code = adjacency_code(Neighbours {
                    north: self.active_offset(column, row, 0, -1),
                    south: self.active_offset(column, row, 0, 1),
                    east: self.active_offset(column, row, 1, 0),
                    west: self.active_offset(column, row, -1, 0),
                });
                if let Some(wall) = self.get_mut(CellCoord::new(column, row)) {
                    wall.adjacency = code;
                }
            }
        }
    }

    fn active_offset(&self, column: u32, row: u32, dx: i64, dy: i64) -> bool {
        let column = i64::from(column) + dx;
        let row = i64::from(row) + dy;
        match (u32::try_from(column), u32::try_from(row)) {
            (Ok(column), Ok(row)) => self.is_active(CellCoord::new(column, row)),
            _ => false,
        }
    }
}

/// Active flags of the four orthogonal neighbours of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Neighbours {
    pub(crate) north: bool,
    pub(crate) south: bool,
    pub(crate) east: bool,
    pub(crate) west: bool,
}

/// Selects the wall sprite code for a neighbourhood.
///
/// Rules are listed from lowest to highest precedence; the last matching rule wins.
pub(crate) fn adjacency_code(neighbours: Neighbours) -> u8 {
    let Neighbours {
        north: n,
        south: s,
        east: e,
        west: w,
    } = neighbours;
    let rules = [
        (e, 10),
        (w, 9),
        (s, 7),
        (n, 8),
        (e && w, 1),
        (n && s, 0),
        (s && e, 11),
        (s && w, 12),
        (n && e, 13),
        (n && w, 14),
        (s && n && w, 4),
        (s && n && e, 5),
        (s && e && w, 2),
        (n && e && w, 3),
        (n && s && e && w, 17),
    ];
    rules
        .iter()
        .rev()
        .find(|(matches, _)| *matches)
        .map_or(ISOLATED, |(_, code)| *code)
}

fn cell_index(columns: u32, rows: u32, cell: CellCoord) -> Option<usize> {
    if cell.column() >= columns || cell.row() >= rows {
        return None;
    }
    Some(cell.column() as usize + cell.row() as usize * columns as usize)
}

fn cells_column_major(columns: u32, rows: u32) -> impl Iterator<Item = CellCoord> {
    (0..columns).flat_map(move |column| (0..rows).map(move |row| CellCoord::new(column, row)))
}
