use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid grid dimensions: {width}x{height}")]
    InvalidGrid { width: u32, height: u32 },

    #[error("max_ticks must be at least 1")]
    InvalidMaxTicks,

    #[error(
        "Terrain is {width}x{height}, engine grid is {expected_width}x{expected_height}"
    )]
    TerrainSizeMismatch {
        expected_width: u32,
        expected_height: u32,
        width: u32,
        height: u32,
    },

    #[error("Duplicate unit id: {0}")]
    DuplicateUnit(String),

    #[error("Unknown unit preset: {0}")]
    UnknownPreset(String),

    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("Unit {id} placed off-grid at ({x}, {y})")]
    UnitOutOfBounds { id: String, x: i32, y: i32 },

    #[error("Terrain override off-grid at ({x}, {y})")]
    TerrainOutOfBounds { x: i32, y: i32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scenario parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
