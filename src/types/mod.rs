//! Core types for map documents and their flattened editor shape.

mod color;
mod flat;
mod geometry;
mod grid;
mod image;
mod map;

pub use color::Color;
pub use flat::{
    FlatBackground, FlatImage, FlatLayer, FlatMap, AURA_LAYER, TERRAIN_LAYER, TOKEN_LAYER,
};
pub use geometry::{ClipRect, GridCoordinate, PixelPoint, ScaleSpec, SizeSpec};
pub use grid::{GridSettings, GridType};
pub use image::MapImage;
pub use map::{Layer, LayerKind, Layers, MapDocument};
