//! Battle terrain: cells and the grid that holds them
//!
//! Move cost is carried as data for decision providers. Movement
//! resolution does not apply it.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::core::types::Position;

/// Known terrain kinds and their advisory movement cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TerrainKind {
    #[default]
    Ground,
    Water,
    Mountain,
    Forest,
    Road,
    Swamp,
    Desert,
    Fortress,
}

impl TerrainKind {
    pub const ALL: [TerrainKind; 8] = [
        TerrainKind::Ground,
        TerrainKind::Water,
        TerrainKind::Mountain,
        TerrainKind::Forest,
        TerrainKind::Road,
        TerrainKind::Swamp,
        TerrainKind::Desert,
        TerrainKind::Fortress,
    ];

    /// Movement cost multiplier (1.0 = normal)
    pub fn movement_cost(&self) -> f64 {
        match self {
            TerrainKind::Ground => 1.0,
            TerrainKind::Water => 10.0,
            TerrainKind::Mountain => 3.0,
            TerrainKind::Forest => 2.0,
            TerrainKind::Road => 0.5,
            TerrainKind::Swamp => 4.0,
            TerrainKind::Desert => 1.5,
            TerrainKind::Fortress => 1.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TerrainKind::Ground => "ground",
            TerrainKind::Water => "water",
            TerrainKind::Mountain => "mountain",
            TerrainKind::Forest => "forest",
            TerrainKind::Road => "road",
            TerrainKind::Swamp => "swamp",
            TerrainKind::Desert => "desert",
            TerrainKind::Fortress => "fortress",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        TerrainKind::ALL
            .into_iter()
            .find(|k| k.label().eq_ignore_ascii_case(label))
    }
}

/// A single grid cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerrainCell {
    #[serde(rename = "type")]
    pub kind: String,
    pub move_cost: f64,
}

impl Default for TerrainCell {
    fn default() -> Self {
        Self::from(TerrainKind::Ground)
    }
}

impl From<TerrainKind> for TerrainCell {
    fn from(kind: TerrainKind) -> Self {
        Self {
            kind: kind.label().to_string(),
            move_cost: kind.movement_cost(),
        }
    }
}

impl TerrainCell {
    pub fn new(kind: impl Into<String>, move_cost: f64) -> Self {
        Self {
            kind: kind.into(),
            move_cost,
        }
    }

    /// Cell for a label, using the known cost when the label names a `TerrainKind`
    pub fn named(kind: &str) -> Self {
        match TerrainKind::from_label(kind) {
            Some(known) => Self::from(known),
            None => Self::new(kind, 1.0),
        }
    }
}

/// Row-major terrain grid, `height` rows of `width` cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainGrid {
    width: u32,
    height: u32,
    rows: Vec<Vec<TerrainCell>>,
}

impl TerrainGrid {
    /// Grid of plain ground
    pub fn new(width: u32, height: u32) -> Self {
        let rows = vec![vec![TerrainCell::default(); width as usize]; height as usize];
        Self {
            width,
            height,
            rows,
        }
    }

    /// Build from rows; every row must have the same length
    pub fn from_rows(rows: Vec<Vec<TerrainCell>>) -> Result<Self> {
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |row| row.len() as u32);
        if let Some(ragged) = rows.iter().find(|row| row.len() as u32 != width) {
            return Err(SimError::TerrainSizeMismatch {
                expected_width: width,
                expected_height: height,
                width: ragged.len() as u32,
                height,
            });
        }
        Ok(Self {
            width,
            height,
            rows,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rows(&self) -> &[Vec<TerrainCell>] {
        &self.rows
    }

    /// Is the position on the grid?
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Clamp both axes into `[0, width-1] x [0, height-1]`
    pub fn clamp(&self, pos: Position) -> Position {
        Position::new(
            clamp_axis(pos.x, self.width),
            clamp_axis(pos.y, self.height),
        )
    }

    pub fn get(&self, pos: Position) -> Option<&TerrainCell> {
        if !self.contains(pos) {
            return None;
        }
        self.rows
            .get(pos.y as usize)
            .and_then(|row| row.get(pos.x as usize))
    }

    /// Replace one cell. Returns false when the position is off-grid.
    pub fn set(&mut self, pos: Position, cell: TerrainCell) -> bool {
        if !self.contains(pos) {
            return false;
        }
        match self
            .rows
            .get_mut(pos.y as usize)
            .and_then(|row| row.get_mut(pos.x as usize))
        {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Advisory movement cost at a position
    pub fn move_cost_at(&self, pos: Position) -> Option<f64> {
        self.get(pos).map(|cell| cell.move_cost)
    }
}

fn clamp_axis(value: i32, size: u32) -> i32 {
    let max = i32::try_from(size).unwrap_or(i32::MAX).saturating_sub(1);
    value.min(max).max(0)
}
