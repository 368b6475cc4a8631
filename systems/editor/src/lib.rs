#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Map editor state machine producing tile-paint and unit placement commands.
//!
//! The editor never touches the world directly. It keeps the active brush in
//! an [`EditorState`] and turns adapter input into commands that the world
//! applies like any other mutation, so edited maps export through
//! `query::to_asset` unchanged.

use bounty_core::{
    tuning::WATER_TILE, CellCoord, Command, Owner, RemovalReason, TileLayer, UnitId, UnitKind,
    UnitSpawn, UnitState, Vec2,
};
use bounty_world::{query, World};

/// Hit points given to ships placed by the editor.
const PLACED_SHIP_HP: i32 = 100;

/// Edge length of the square, anchored at a unit's position, that erasing hits.
const ERASE_BOX: f32 = 100.0;

/// Screen the editor currently shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorMode {
    /// Clicks paint tiles or place ships on the map.
    Place,
    /// Clicks pick the tile brush.
    TilePalette,
    /// Clicks pick the ship brush.
    UnitPalette,
}

/// Brushes and mode of the editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditorState {
    /// Screen the editor currently shows.
    pub mode: EditorMode,
    /// Layer painted by the tile brush.
    pub layer: TileLayer,
    /// Tile written by the tile brush.
    pub tile: i32,
    /// Owner of the ships placed by the ship brush, if one is selected.
    pub ship: Option<Owner>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            mode: EditorMode::Place,
            layer: TileLayer::Terrain,
            tile: WATER_TILE,
            ship: None,
        }
    }
}

/// Single input gesture forwarded by the adapter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EditorInput {
    /// Opens the tile palette for `layer`, or closes it when it is already open.
    ToggleTilePalette(TileLayer),
    /// Opens or closes the unit palette.
    ToggleUnitPalette,
    /// Selects the tile brush while the tile palette is open.
    PickTile(i32),
    /// Selects the ship brush while the unit palette is open; `None` clears it.
    PickShip(Option<Owner>),
    /// Applies the active brush at a world position.
    Click {
        /// Cursor position in world units.
        position: Vec2,
    },
    /// Clears both brushes and removes the unit under the cursor.
    Erase {
        /// Cursor position in world units.
        position: Vec2,
    },
}

/// Map editor system.
#[derive(Clone, Debug, Default)]
pub struct Editor {
    state: EditorState,
}

impl Editor {
    /// Creates an editor in place mode with a water brush.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current brushes and mode.
    #[must_use]
    pub const fn state(&self) -> EditorState {
        self.state
    }

    /// Applies one input gesture, emitting the resulting world commands.
    pub fn handle(&mut self, input: EditorInput, world: &World, out: &mut Vec<Command>) {
        match input {
            EditorInput::ToggleTilePalette(layer) => {
                if self.state.mode == EditorMode::TilePalette {
                    self.state.mode = EditorMode::Place;
                } else {
                    self.state.mode = EditorMode::TilePalette;
                    self.state.layer = layer;
                    self.state.ship = None;
                }
            }
            EditorInput::ToggleUnitPalette => {
                self.state.mode = if self.state.mode == EditorMode::UnitPalette {
                    EditorMode::Place
                } else {
                    EditorMode::UnitPalette
                };
            }
            EditorInput::PickTile(tile) => {
                if self.state.mode == EditorMode::TilePalette {
                    self.state.tile = tile;
                }
            }
            EditorInput::PickShip(owner) => {
                if self.state.mode == EditorMode::UnitPalette {
                    self.state.ship = owner;
                }
            }
            EditorInput::Click { position } => {
                if self.state.mode == EditorMode::Place {
                    self.click(position, world, out);
                }
            }
            EditorInput::Erase { position } => {
                self.state.ship = None;
                self.state.tile = WATER_TILE;
                if let Some(unit) = unit_under(world, position) {
                    out.push(Command::RemoveUnit {
                        unit,
                        reason: RemovalReason::Erased,
                    });
                }
            }
        }
    }

    fn click(&self, position: Vec2, world: &World, out: &mut Vec<Command>) {
        if let Some(owner) = self.state.ship {
            out.push(Command::SpawnUnit {
                spawn: UnitSpawn {
                    kind: UnitKind::EliteShip,
                    owner,
                    state: UnitState::Idle,
                    position,
                    destination: None,
                    origin: position,
                    hp: PLACED_SHIP_HP,
                    max_hp: PLACED_SHIP_HP,
                    damage: 0,
                    boulder_armed: false,
                },
            });
            return;
        }

        let size = query::world_size(world);
        let inside = position.x > 0.0
            && position.y > 0.0
            && position.x < size.x
            && position.y < size.y;
        if let Some(cell) = CellCoord::containing(position).filter(|_| inside) {
            out.push(Command::PaintTile {
                layer: self.state.layer,
                cell,
                tile: self.state.tile,
            });
        }
    }
}

/// First unit, by identifier, whose erase box contains `position`.
fn unit_under(world: &World, position: Vec2) -> Option<UnitId> {
    query::unit_view(world)
        .iter()
        .find(|unit| {
            position.x > unit.position.x
                && position.y > unit.position.y
                && position.x < unit.position.x + ERASE_BOX
                && position.y < unit.position.y + ERASE_BOX
        })
        .map(|unit| unit.id)
}
