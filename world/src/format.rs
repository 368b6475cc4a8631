//! Text map asset format shared by the battle loader and the map editor.
//!
//! ```text
//! #map
//! #layer1
//! <width>
//! <height>
//! <width * height tiles>
//! #layer2
//! <width * height tiles>
//! #layer3
//! <width * height tiles>
//! #units
//! <count>
//! <x> <y> <hp> <max hp> <kind id> <owner id>   (one line per unit)
//! #buildings
//! <column> <row> <hp>                          (one line per active wall)
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    str::{FromStr, SplitWhitespace},
};

use bounty_core::{CellCoord, Owner, UnitKind, Vec2};
use thiserror::Error;

const MAP_HEADER: &str = "#map";
const LAYER_HEADERS: [&str; 3] = ["#layer1", "#layer2", "#layer3"];
const UNITS_HEADER: &str = "#units";
const BUILDINGS_HEADER: &str = "#buildings";

/// Unit stored in a map asset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitRecord {
    /// Position in world units.
    pub position: Vec2,
    /// Current hit points.
    pub hp: i32,
    /// Maximum hit points.
    pub max_hp: i32,
    /// Kind of the unit.
    pub kind: UnitKind,
    /// Faction controlling the unit.
    pub owner: Owner,
}

/// Active wall stored in a map asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallRecord {
    /// Cell holding the wall.
    pub cell: CellCoord,
    /// Hit points of the wall.
    pub hp: i32,
}

/// In-memory representation of a map asset.
#[derive(Clone, Debug, PartialEq)]
pub struct MapAsset {
    /// Number of tile columns.
    pub columns: u32,
    /// Number of tile rows.
    pub rows: u32,
    /// Background tile layers, each holding `columns * rows` row-major tiles.
    pub layers: [Vec<i32>; 3],
    /// Units placed by the map author.
    pub units: Vec<UnitRecord>,
    /// Walls standing when the map loads.
    pub walls: Vec<WallRecord>,
}

/// Errors raised while reading or writing map assets.
#[derive(Debug, Error)]
pub enum MapFormatError {
    /// The asset file could not be read or written.
    #[error("could not access map asset {}", path.display())]
    Io {
        /// Path of the asset.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// A section header was missing or out of order.
    #[error("expected section header `{expected}`, found `{found}`")]
    MissingHeader {
        /// Header that should have appeared.
        expected: &'static str,
        /// Token found instead.
        found: String,
    },
    /// The asset ended before a section was complete.
    #[error("map asset ended while reading {context}")]
    Truncated {
        /// Section being read.
        context: &'static str,
    },
    /// A token could not be parsed as a number.
    #[error("invalid number `{token}` while reading {context}")]
    InvalidNumber {
        /// Offending token.
        token: String,
        /// Section being read.
        context: &'static str,
    },
    /// The map declared an empty grid.
    #[error("map dimensions must be positive, found {columns}x{rows}")]
    InvalidDimensions {
        /// Declared column count.
        columns: u32,
        /// Declared row count.
        rows: u32,
    },
    /// A tile layer did not hold one tile per cell.
    #[error("layer {layer} holds {found} tiles, expected {expected}")]
    LayerSize {
        /// Zero-based layer index.
        layer: usize,
        /// Tiles required by the dimensions.
        expected: usize,
        /// Tiles present in the layer.
        found: usize,
    },
    /// A unit referenced an unknown kind identifier.
    #[error("unknown unit kind id {0}")]
    UnknownUnitKind(i32),
    /// A unit referenced an unknown owner identifier.
    #[error("unknown owner id {0}")]
    UnknownOwner(i32),
    /// A wall referenced a cell outside the map.
    #[error("wall at ({column}, {row}) lies outside the map")]
    WallOutOfBounds {
        /// Declared column.
        column: i64,
        /// Declared row.
        row: i64,
    },
}

impl MapAsset {
    /// Creates an empty map where every layer holds `tile`.
    #[must_use]
    pub fn filled(columns: u32, rows: u32, tile: i32) -> Self {
        let count = columns as usize * rows as usize;
        Self {
            columns,
            rows,
            layers: [vec![tile; count], vec![tile; count], vec![tile; count]],
            units: Vec::new(),
            walls: Vec::new(),
        }
    }

    /// Reads and parses a map asset from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapFormatError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| MapFormatError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source)
    }

    /// Serialises the asset and writes it to disk.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MapFormatError> {
        let path = path.as_ref();
        fs::write(path, self.write()).map_err(|source| MapFormatError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parses a map asset from its textual form.
    pub fn parse(source: &str) -> Result<Self, MapFormatError> {
        let mut tokens = Tokens::new(source);
        tokens.expect_header(MAP_HEADER)?;
        tokens.expect_header(LAYER_HEADERS[0])?;

        let columns: u32 = tokens.number("map width")?;
        let rows: u32 = tokens.number("map height")?;
        if columns == 0 || rows == 0 {
            return Err(MapFormatError::InvalidDimensions { columns, rows });
        }
        let cells = columns as usize * rows as usize;

        let terrain = tokens.tiles(cells, "layer 1")?;
        tokens.expect_header(LAYER_HEADERS[1])?;
        let detail = tokens.tiles(cells, "layer 2")?;
        tokens.expect_header(LAYER_HEADERS[2])?;
        let overlay = tokens.tiles(cells, "layer 3")?;

        tokens.expect_header(UNITS_HEADER)?;
        let count: usize = tokens.number("unit count")?;
        let mut units = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            units.push(tokens.unit()?);
        }

        tokens.expect_header(BUILDINGS_HEADER)?;
        let mut walls = Vec::new();
        while let Some(column) = tokens.optional_number::<i64>("wall column")? {
            let row: i64 = tokens.number("wall row")?;
            let hp: i32 = tokens.number("wall hp")?;
            let cell = match (u32::try_from(column), u32::try_from(row)) {
                (Ok(c), Ok(r)) if c < columns && r < rows => CellCoord::new(c, r),
                _ => return Err(MapFormatError::WallOutOfBounds { column, row }),
            };
            walls.push(WallRecord { cell, hp });
        }

        Ok(Self {
            columns,
            rows,
            layers: [terrain, detail, overlay],
            units,
            walls,
        })
    }

    /// Renders the asset in its textual form.
    #[must_use]
    pub fn write(&self) -> String {
        let mut text = String::new();
        text.push_str(MAP_HEADER);
        text.push('\n');
        for (index, layer) in self.layers.iter().enumerate() {
            text.push_str(LAYER_HEADERS[index]);
            text.push('\n');
            if index == 0 {
                text.push_str(&format!("{}\n{}\n", self.columns, self.rows));
            }
            for row in layer.chunks(self.columns.max(1) as usize) {
                let line: Vec<String> = row.iter().map(i32::to_string).collect();
                text.push_str(&line.join(" "));
                text.push('\n');
            }
        }

        text.push_str(UNITS_HEADER);
        text.push('\n');
        text.push_str(&format!("{}\n", self.units.len()));
        for unit in &self.units {
            text.push_str(&format!(
                "{} {} {} {} {} {}\n",
                unit.position.x.round() as i64,
                unit.position.y.round() as i64,
                unit.hp,
                unit.max_hp,
                unit.kind.id(),
                unit.owner.id(),
            ));
        }

        text.push_str(BUILDINGS_HEADER);
        text.push('\n');
        for wall in &self.walls {
            text.push_str(&format!(
                "{} {} {}\n",
                wall.cell.column(),
                wall.cell.row(),
                wall.hp
            ));
        }
        text
    }

    /// Verifies that every layer holds one tile per cell.
    pub fn validate(&self) -> Result<(), MapFormatError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(MapFormatError::InvalidDimensions {
                columns: self.columns,
                rows: self.rows,
            });
        }
        let expected = self.columns as usize * self.rows as usize;
        for (layer, tiles) in self.layers.iter().enumerate() {
            if tiles.len() != expected {
                return Err(MapFormatError::LayerSize {
                    layer,
                    expected,
                    found: tiles.len(),
                });
            }
        }
        for wall in &self.walls {
            if wall.cell.column() >= self.columns || wall.cell.row() >= self.rows {
                return Err(MapFormatError::WallOutOfBounds {
                    column: i64::from(wall.cell.column()),
                    row: i64::from(wall.cell.row()),
                });
            }
        }
        Ok(())
    }
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            inner: source.split_whitespace(),
        }
    }

    fn expect_header(&mut self, expected: &'static str) -> Result<(), MapFormatError> {
        match self.inner.next() {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(MapFormatError::MissingHeader {
                expected,
                found: token.to_owned(),
            }),
            None => Err(MapFormatError::Truncated { context: expected }),
        }
    }

    fn number<T: FromStr>(&mut self, context: &'static str) -> Result<T, MapFormatError> {
        self.optional_number(context)?
            .ok_or(MapFormatError::Truncated { context })
    }

    fn optional_number<T: FromStr>(
        &mut self,
        context: &'static str,
    ) -> Result<Option<T>, MapFormatError> {
        let Some(token) = self.inner.next() else {
            return Ok(None);
        };
        token
            .parse::<T>()
            .map(Some)
            .map_err(|_| MapFormatError::InvalidNumber {
                token: token.to_owned(),
                context,
            })
    }

    fn tiles(&mut self, count: usize, context: &'static str) -> Result<Vec<i32>, MapFormatError> {
        let mut tiles = Vec::with_capacity(count.min(1 << 16));
        for _ in 0..count {
            tiles.push(self.number(context)?);
        }
        Ok(tiles)
    }

    fn unit(&mut self) -> Result<UnitRecord, MapFormatError> {
        let x: f32 = self.number("unit position")?;
        let y: f32 = self.number("unit position")?;
        let hp: i32 = self.number("unit hp")?;
        let max_hp: i32 = self.number("unit max hp")?;
        let kind_id: i32 = self.number("unit kind")?;
        let owner_id: i32 = self.number("unit owner")?;
        Ok(UnitRecord {
            position: Vec2::new(x, y),
            hp,
            max_hp,
            kind: UnitKind::from_id(kind_id).ok_or(MapFormatError::UnknownUnitKind(kind_id))?,
            owner: Owner::from_id(owner_id).ok_or(MapFormatError::UnknownOwner(owner_id))?,
        })
    }
}
