//! The flattened map shape the editor works with.
//!
//! This is the persistence and rendering representation: layers are
//! positional (0 = terrain, 1 = aura, 2 = token), images carry mandatory
//! `size`/`gridOffset` pairs once normalized, and aura/token extras are flat
//! strings. [`crate::flatten::flatten`] projects a parsed
//! [`crate::MapDocument`] into this shape; [`crate::writer::to_text`]
//! serializes it back to map text.

use serde::{Deserialize, Serialize};

/// Index of the terrain layer in [`FlatMap::layers`].
pub const TERRAIN_LAYER: usize = 0;
/// Index of the aura layer in [`FlatMap::layers`].
pub const AURA_LAYER: usize = 1;
/// Index of the token layer in [`FlatMap::layers`].
pub const TOKEN_LAYER: usize = 2;

/// The map background record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlatBackground {
    #[serde(default)]
    pub url: String,
}

/// An image in the flattened shape.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlatImage {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub url: String,

    /// `[cols, rows]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<[f64; 2]>,

    /// `[col, row]`; fractional after anchor resolution.
    #[serde(
        rename = "gridOffset",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub grid_offset: Option<[f64; 2]>,

    /// Aura only: name of the anchoring terrain/token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,

    /// Aura only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    /// Token only: owner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// One positional layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlatLayer {
    #[serde(default)]
    pub images: Vec<FlatImage>,
}

/// A whole map in the flattened shape.
///
/// Fields are optional so that hand-written or partial JSON still
/// deserializes; [`FlatMap::normalize`] fills the gaps the way the editor
/// does on load, while the serializer reports missing fields instead.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlatMap {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<FlatBackground>,

    /// `[cols, rows]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<[i64; 2]>,

    /// `[col, row]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spawn: Option<[i64; 2]>,

    #[serde(default)]
    pub layers: Vec<FlatLayer>,
}

impl FlatMap {
    /// Fill absent fields with editor defaults: empty background, zero
    /// grid/spawn, three layers, zeroed image size/offset pairs.
    pub fn normalize(&mut self) {
        self.background.get_or_insert_with(FlatBackground::default);
        self.grid.get_or_insert([0, 0]);
        self.spawn.get_or_insert([0, 0]);
        while self.layers.len() < 3 {
            self.layers.push(FlatLayer::default());
        }
        for layer in &mut self.layers {
            for image in &mut layer.images {
                image.size.get_or_insert([0.0, 0.0]);
                image.grid_offset.get_or_insert([0.0, 0.0]);
            }
        }
    }

    /// Images of a positional layer; empty when the layer is missing.
    pub fn images(&self, layer: usize) -> &[FlatImage] {
        self.layers
            .get(layer)
            .map(|l| l.images.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_fills_defaults() {
        let mut map = FlatMap {
            name: "Crypt".to_string(),
            ..Default::default()
        };
        map.normalize();

        assert_eq!(map.background, Some(FlatBackground::default()));
        assert_eq!(map.grid, Some([0, 0]));
        assert_eq!(map.spawn, Some([0, 0]));
        assert_eq!(map.layers.len(), 3);
    }

    #[test]
    fn test_normalize_fills_image_pairs() {
        let mut map = FlatMap::default();
        map.layers.push(FlatLayer {
            images: vec![FlatImage {
                name: "Rubble".to_string(),
                ..Default::default()
            }],
        });
        map.normalize();

        let image = &map.layers[TERRAIN_LAYER].images[0];
        assert_eq!(image.size, Some([0.0, 0.0]));
        assert_eq!(image.grid_offset, Some([0.0, 0.0]));
    }

    #[test]
    fn test_json_field_names() {
        let image = FlatImage {
            name: "Hero".to_string(),
            url: "https://example.com/hero.png".to_string(),
            size: Some([2.0, 2.0]),
            grid_offset: Some([3.0, 4.0]),
            user: Some("alice".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&image).unwrap();
        assert!(json.contains("\"gridOffset\":[3.0,4.0]"));
        assert!(!json.contains("anchor"));
    }

    #[test]
    fn test_deserialize_partial() {
        let map: FlatMap = serde_json::from_str(r#"{"name":"Keep"}"#).unwrap();
        assert_eq!(map.name, "Keep");
        assert!(map.grid.is_none());
        assert!(map.layers.is_empty());
    }
}
