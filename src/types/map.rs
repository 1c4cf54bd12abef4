//! The structured map document produced by parsing.

use std::fmt;

use super::geometry::GridCoordinate;
use super::grid::GridSettings;
use super::image::MapImage;

/// The four layers of a map, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Background,
    Terrain,
    Aura,
    Token,
}

impl LayerKind {
    /// The section label this layer reads from and writes to.
    pub fn label(self) -> &'static str {
        match self {
            LayerKind::Background => "background",
            LayerKind::Terrain => "terrain",
            LayerKind::Aura => "aura",
            LayerKind::Token => "token",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One layer of images.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub kind: LayerKind,
    /// Unique identifier, stamped at parse time.
    pub id: String,
    /// Images in source order.
    pub images: Vec<MapImage>,
}

/// The full layer set.
#[derive(Debug, Clone, PartialEq)]
pub struct Layers {
    pub background: Layer,
    pub terrain: Layer,
    pub aura: Layer,
    pub token: Layer,
}

/// A parsed map document.
///
/// A document always has a name; a parse that cannot establish one yields
/// no document at all.
#[derive(Debug, Clone, PartialEq)]
pub struct MapDocument {
    pub name: String,

    /// Where new tokens first appear.
    pub spawn: Option<GridCoordinate>,

    /// Id of the map's owner.
    pub user_id: Option<String>,

    pub grid: Option<GridSettings>,

    pub layers: Layers,
}

impl MapDocument {
    /// Images for a layer, in source order.
    pub fn images(&self, kind: LayerKind) -> &[MapImage] {
        match kind {
            LayerKind::Background => &self.layers.background.images,
            LayerKind::Terrain => &self.layers.terrain.images,
            LayerKind::Aura => &self.layers.aura.images,
            LayerKind::Token => &self.layers.token.images,
        }
    }
}
