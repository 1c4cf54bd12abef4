//! Coordinate and dimension primitives shared by map entities.

/// A col/row coordinate pair. Columns and rows start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCoordinate {
    pub col: i64,
    pub row: i64,
}

impl GridCoordinate {
    pub const fn new(col: i64, row: i64) -> Self {
        Self { col, row }
    }
}

/// A pixel offset from the map origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelPoint {
    pub x: i64,
    pub y: i64,
}

/// A pixel clip rectangle applied before an image is drawn.
///
/// Negative width/height clip that many pixels off the far edge of the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

/// Scale multipliers, e.g. for token art that bleeds over its base.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScaleSpec {
    pub scale: Option<f64>,
    pub scale_x: Option<f64>,
    pub scale_y: Option<f64>,
}

impl ScaleSpec {
    /// True if any axis resolved to a non-zero multiplier.
    pub fn is_some(&self) -> bool {
        [self.scale, self.scale_x, self.scale_y]
            .iter()
            .any(|v| matches!(v, Some(n) if *n != 0.0))
    }
}

/// Entity dimensions: grid extent (cols/rows) and/or pixel extent.
///
/// Either half may be absent; the parser merges whatever the section
/// provided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizeSpec {
    pub cols: Option<i64>,
    pub rows: Option<i64>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

impl SizeSpec {
    pub fn is_empty(&self) -> bool {
        self.cols.is_none() && self.rows.is_none() && self.width.is_none() && self.height.is_none()
    }

    /// Grid extent as a pair, if both halves are present.
    pub fn grid_extent(&self) -> Option<(i64, i64)> {
        match (self.cols, self.rows) {
            (Some(cols), Some(rows)) => Some((cols, rows)),
            _ => None,
        }
    }
}
