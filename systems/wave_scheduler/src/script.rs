//! Wave script mini-language: alternating `<unitTypeId> <sideChar>` tokens.

use std::{fmt, str::FromStr};

use bounty_core::{Side, UnitKind};
use thiserror::Error;

/// Single carrier launched by a wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WaveGroup {
    /// Kind of the spawned unit, normally a carrier.
    pub kind: UnitKind,
    /// Map edge the unit enters from.
    pub side: Side,
}

/// Ordered list of groups launched together.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Wave {
    groups: Vec<WaveGroup>,
}

impl Wave {
    /// Creates a wave from explicit groups.
    #[must_use]
    pub fn new(groups: Vec<WaveGroup>) -> Self {
        Self { groups }
    }

    /// Groups of the wave in launch order.
    #[must_use]
    pub fn groups(&self) -> &[WaveGroup] {
        &self.groups
    }

    /// Number of units the wave launches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Reports whether the wave launches nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl FromStr for Wave {
    type Err = WaveScriptError;

    fn from_str(script: &str) -> Result<Self, Self::Err> {
        parse_wave_script(script)
    }
}

impl fmt::Display for Wave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, group) in self.groups.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{} {}", group.kind.id(), group.side.as_char())?;
        }
        Ok(())
    }
}

/// Errors reported while parsing a wave script.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WaveScriptError {
    /// Tokens must come in `<unit> <side>` pairs.
    #[error("wave script has {0} tokens; expected unit/side pairs")]
    OddTokenCount(usize),
    /// The unit token is not a known unit identifier.
    #[error("unknown unit `{0}` in wave script")]
    UnknownUnit(String),
    /// The side token is not one of `n`, `s`, `e` or `w`.
    #[error("unknown side `{0}` in wave script")]
    UnknownSide(String),
}

/// Parses a wave script such as `"0 n 4 e"`.
pub fn parse_wave_script(script: &str) -> Result<Wave, WaveScriptError> {
    let tokens: Vec<&str> = script.split_whitespace().collect();
    if tokens.len() % 2 != 0 {
        return Err(WaveScriptError::OddTokenCount(tokens.len()));
    }

    let groups = tokens
        .chunks_exact(2)
        .map(|pair| {
            let kind = pair[0]
                .parse::<i32>()
                .ok()
                .and_then(UnitKind::from_id)
                .ok_or_else(|| WaveScriptError::UnknownUnit(pair[0].to_owned()))?;
            let side = single_char(pair[1])
                .and_then(Side::from_char)
                .ok_or_else(|| WaveScriptError::UnknownSide(pair[1].to_owned()))?;
            Ok(WaveGroup { kind, side })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Wave { groups })
}

fn single_char(token: &str) -> Option<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(value), None) => Some(value),
        _ => None,
    }
}
