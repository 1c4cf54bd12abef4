//! Grid definition for a map.

use std::fmt;
use std::str::FromStr;

use super::color::Color;

/// The cell geometry of a map grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridType {
    /// Flat-topped hexes.
    Flat,
    /// Pointy-topped hexes.
    Pointy,
    #[default]
    Square,
}

impl FromStr for GridType {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s.to_ascii_lowercase().as_str() {
            "flat" => Ok(GridType::Flat),
            "pointy" => Ok(GridType::Pointy),
            "square" => Ok(GridType::Square),
            _ => Err(()),
        }
    }
}

impl fmt::Display for GridType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridType::Flat => write!(f, "flat"),
            GridType::Pointy => write!(f, "pointy"),
            GridType::Square => write!(f, "square"),
        }
    }
}

/// Everything needed to draw a grid over a map background.
///
/// `width` and `height` are pixel dimensions filled in by the rendering
/// layer; the parser leaves them at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSettings {
    pub grid_type: GridType,
    pub grid_color: Option<Color>,
    /// Number of columns; always positive when the grid exists at all.
    pub cols: i64,
    /// Number of rows; always positive when the grid exists at all.
    pub rows: i64,
    /// Show the column key along the top edge.
    pub col_key: Option<bool>,
    /// Show the row key along the left edge.
    pub row_key: Option<bool>,
    pub col_key_scale: Option<i64>,
    pub row_key_scale: Option<i64>,
    pub width: i64,
    pub height: i64,
}
