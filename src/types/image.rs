//! Image descriptors for map layers.

use super::geometry::{ClipRect, GridCoordinate, PixelPoint, ScaleSpec, SizeSpec};

/// An image placed on a map layer: background, terrain, aura, or token.
///
/// Auras carry the `anchor_id`/`opacity`/`is_active` extras; the fields stay
/// `None` for every other layer.
#[derive(Debug, Clone, PartialEq)]
pub struct MapImage {
    /// Unique identifier, stamped at parse time.
    pub id: String,

    pub name: String,

    pub url: String,

    /// Id of the image's owner (the `user=` field).
    pub user_id: Option<String>,

    /// Placement on the grid.
    pub grid_offset: Option<GridCoordinate>,

    /// Placement in pixels, when given instead of (or as well as) a grid
    /// offset.
    pub pixel_offset: Option<PixelPoint>,

    pub clip: Option<ClipRect>,

    pub scale: Option<ScaleSpec>,

    pub size: SizeSpec,

    /// Aura only: the name of the terrain/token this aura follows.
    pub anchor_id: Option<String>,

    /// Aura only: 0 to 1.
    pub opacity: Option<f64>,

    /// Aura only: whether the aura is currently shown.
    pub is_active: Option<bool>,
}
