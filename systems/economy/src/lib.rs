#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system translating the player's tool selection into economy commands.
//!
//! Validation lives in the world: this system never checks funds, terrain or
//! nearby enemies. It only decides which command the cursor confirmation
//! stands for.

use bounty_core::{BuildingKind, CellCoord, Command};

/// Action bound to the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    /// Buys a structure at the cursor cell.
    Build(BuildingKind),
    /// Sells the turret or wall at the cursor cell.
    Sell,
    /// Restores the wall at the cursor cell to full health.
    Repair,
}

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EconomyInput {
    /// Tool picked from the sidebar or a hotkey on this frame.
    pub select: Option<Tool>,
    /// Indicates whether the player dropped the active tool on this frame.
    pub cancel: bool,
    /// Cell currently hovered by the cursor, if it lies on the map.
    pub cursor_cell: Option<CellCoord>,
    /// Indicates whether the player confirmed the active tool on this frame.
    pub confirm: bool,
    /// Indicates whether the player requested a full refund of the defences.
    pub reset: bool,
}

/// Economy system holding the currently selected tool.
#[derive(Clone, Debug, Default)]
pub struct Economy {
    tool: Option<Tool>,
}

impl Economy {
    /// Creates an economy system with no tool selected.
    #[must_use]
    pub const fn new() -> Self {
        Self { tool: None }
    }

    /// Tool currently bound to the cursor.
    #[must_use]
    pub const fn tool(&self) -> Option<Tool> {
        self.tool
    }

    /// Consumes one frame of input and emits the matching economy commands.
    ///
    /// Resetting the defences is only honoured while `planning` holds.
    pub fn handle(&mut self, input: EconomyInput, planning: bool, out: &mut Vec<Command>) {
        if input.cancel {
            self.tool = None;
        }
        if let Some(tool) = input.select {
            self.tool = Some(tool);
        }

        if input.reset && planning {
            out.push(Command::ResetDefences);
        }

        if !input.confirm {
            return;
        }
        let (Some(tool), Some(cell)) = (self.tool, input.cursor_cell) else {
            return;
        };
        out.push(match tool {
            Tool::Build(kind) => Command::Build { kind, cell },
            Tool::Sell => Command::Sell { cell },
            Tool::Repair => Command::Repair { cell },
        });
    }
}
