use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use bounty_core::{CellCoord, Command, TurretKind};
use bounty_world::{query, World};
use serde::{Deserialize, Serialize};

const LAYOUT_DOMAIN: &str = "bounty";
const LAYOUT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded layout payload.
pub(crate) const LAYOUT_HEADER: &str = "bounty:v1";
/// Delimiter used to separate the prefix, map dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Fortifications standing on a map, in a form that can be shared as text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct FortificationLayout {
    /// Number of tile columns of the map the layout was captured on.
    pub columns: u32,
    /// Number of tile rows of the map the layout was captured on.
    pub rows: u32,
    /// Walls and gates, with the turrets they carry.
    pub walls: Vec<LayoutWall>,
}

/// Wall captured within a layout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct LayoutWall {
    /// Cell holding the wall.
    pub cell: CellCoord,
    /// Hit points of the wall.
    pub hp: i32,
    /// Whether the wall is a passable gate.
    pub gate: bool,
    /// Turret mounted on the wall.
    pub turret: Option<LayoutTurret>,
}

/// Turret captured within a layout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct LayoutTurret {
    /// Variant of the turret.
    pub kind: TurretKind,
    /// Ticks between two consecutive shots.
    pub shot_delay: u32,
}

#[derive(Serialize, Deserialize)]
struct SerializableLayout {
    walls: Vec<LayoutWall>,
}

impl FortificationLayout {
    /// Captures every active wall and turret of the world.
    #[must_use]
    pub(crate) fn capture(world: &World) -> Self {
        let walls = query::walls(world)
            .into_iter()
            .map(|wall| LayoutWall {
                cell: wall.cell,
                hp: wall.hp,
                gate: wall.gate,
                turret: query::turret_at(world, wall.cell).map(|turret| LayoutTurret {
                    kind: turret.kind,
                    shot_delay: turret.shot_delay,
                }),
            })
            .collect();
        Self {
            columns: query::columns(world),
            rows: query::rows(world),
            walls,
        }
    }

    /// Encodes the layout into a single-line string suitable for sharing.
    pub(crate) fn encode(&self) -> Result<String, LayoutTransferError> {
        let payload = SerializableLayout {
            walls: self.walls.clone(),
        };
        let json = serde_json::to_vec(&payload).map_err(LayoutTransferError::InvalidPayload)?;
        let encoded = STANDARD_NO_PAD.encode(json);
        Ok(format!(
            "{LAYOUT_HEADER}:{}x{}:{encoded}",
            self.columns, self.rows
        ))
    }

    /// Decodes a layout from its string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, LayoutTransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(LayoutTransferError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(LayoutTransferError::MissingPrefix)?;
        let version = parts.next().ok_or(LayoutTransferError::MissingVersion)?;
        let dimensions = parts
            .next()
            .ok_or(LayoutTransferError::MissingDimensions)?;
        let payload = parts.next().ok_or(LayoutTransferError::MissingPayload)?;

        if domain != LAYOUT_DOMAIN {
            return Err(LayoutTransferError::InvalidPrefix(domain.to_owned()));
        }
        if version != LAYOUT_VERSION {
            return Err(LayoutTransferError::UnsupportedVersion(version.to_owned()));
        }

        let (columns, rows) = parse_dimensions(dimensions)?;
        let bytes = STANDARD_NO_PAD
            .decode(payload.as_bytes())
            .map_err(LayoutTransferError::InvalidEncoding)?;
        let decoded: SerializableLayout =
            serde_json::from_slice(&bytes).map_err(LayoutTransferError::InvalidPayload)?;

        Ok(Self {
            columns,
            rows,
            walls: decoded.walls,
        })
    }

    /// Commands that rebuild the layout on a world of matching dimensions.
    pub(crate) fn commands_for(&self, world: &World) -> Result<Vec<Command>, LayoutTransferError> {
        let expected = (query::columns(world), query::rows(world));
        if (self.columns, self.rows) != expected {
            return Err(LayoutTransferError::DimensionMismatch {
                layout: (self.columns, self.rows),
                map: expected,
            });
        }

        let mut commands = Vec::with_capacity(self.walls.len() * 2);
        for wall in &self.walls {
            commands.push(Command::PlaceWall {
                cell: wall.cell,
                hp: wall.hp,
                gate: wall.gate,
            });
            if let Some(turret) = wall.turret {
                commands.push(Command::PlaceTurret {
                    kind: turret.kind,
                    cell: wall.cell,
                    shot_delay: turret.shot_delay,
                });
            }
        }
        Ok(commands)
    }
}

/// Errors that can occur while transferring fortification layouts.
#[derive(Debug)]
pub(crate) enum LayoutTransferError {
    /// The provided string was empty or contained only whitespace.
    EmptyPayload,
    /// The prefix segment was missing from the encoded layout.
    MissingPrefix,
    /// The encoded layout did not contain a version segment.
    MissingVersion,
    /// The encoded layout did not include map dimensions.
    MissingDimensions,
    /// The encoded layout did not include the payload segment.
    MissingPayload,
    /// The encoded layout used an unexpected prefix segment.
    InvalidPrefix(String),
    /// The encoded layout used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The map dimensions could not be parsed from the encoded layout.
    InvalidDimensions(String),
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The payload could not be serialised or deserialised.
    InvalidPayload(serde_json::Error),
    /// The layout was captured on a map of different size.
    DimensionMismatch {
        /// Columns and rows recorded in the layout.
        layout: (u32, u32),
        /// Columns and rows of the target map.
        map: (u32, u32),
    },
}

impl fmt::Display for LayoutTransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "layout string was empty"),
            Self::MissingPrefix => write!(f, "layout string is missing the prefix"),
            Self::MissingVersion => write!(f, "layout string is missing the version"),
            Self::MissingDimensions => write!(f, "layout string is missing the map dimensions"),
            Self::MissingPayload => write!(f, "layout string is missing the payload"),
            Self::InvalidPrefix(prefix) => write!(f, "layout prefix '{prefix}' is not supported"),
            Self::UnsupportedVersion(version) => {
                write!(f, "layout version '{version}' is not supported")
            }
            Self::InvalidDimensions(dimensions) => {
                write!(f, "could not parse map dimensions '{dimensions}'")
            }
            Self::InvalidEncoding(error) => {
                write!(f, "could not decode layout payload: {error}")
            }
            Self::InvalidPayload(error) => {
                write!(f, "could not process layout payload: {error}")
            }
            Self::DimensionMismatch { layout, map } => write!(
                f,
                "layout was made for a {}x{} map but this map is {}x{}",
                layout.0, layout.1, map.0, map.1
            ),
        }
    }
}

impl Error for LayoutTransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            _ => None,
        }
    }
}

fn parse_dimensions(dimensions: &str) -> Result<(u32, u32), LayoutTransferError> {
    let invalid = || LayoutTransferError::InvalidDimensions(dimensions.to_owned());
    let (columns, rows) = dimensions.split_once(['x', 'X']).ok_or_else(invalid)?;
    let columns = columns.trim().parse::<u32>().map_err(|_| invalid())?;
    let rows = rows.trim().parse::<u32>().map_err(|_| invalid())?;
    if columns == 0 || rows == 0 {
        return Err(invalid());
    }
    Ok((columns, rows))
}
