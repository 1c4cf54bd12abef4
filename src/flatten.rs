//! Projection of a parsed document into the flattened editor shape.
//!
//! Anchor resolution happens here, once, as the document is projected:
//! an aura that names an anchor is centered over it using both entities'
//! grid extents. The result is the [`FlatMap`] the editor, persistence and
//! serializer all work with.

use crate::types::{FlatBackground, FlatImage, FlatLayer, FlatMap, MapDocument, MapImage};

/// Project a parsed document into the flattened shape.
///
/// Layers become positional (terrain, aura, token); auras are anchored
/// against the token list.
pub fn flatten(doc: &MapDocument) -> FlatMap {
    let tokens: Vec<FlatImage> = doc
        .layers
        .token
        .images
        .iter()
        .map(|image| flatten_image(image, &[]))
        .collect();
    let terrain: Vec<FlatImage> = doc
        .layers
        .terrain
        .images
        .iter()
        .map(|image| flatten_image(image, &[]))
        .collect();
    let aura: Vec<FlatImage> = doc
        .layers
        .aura
        .images
        .iter()
        .map(|image| flatten_image(image, &tokens))
        .collect();

    FlatMap {
        name: doc.name.clone(),
        background: Some(FlatBackground {
            url: doc
                .layers
                .background
                .images
                .first()
                .map(|image| image.url.clone())
                .unwrap_or_default(),
        }),
        grid: Some(
            doc.grid
                .as_ref()
                .map(|grid| [grid.cols, grid.rows])
                .unwrap_or([0, 0]),
        ),
        spawn: Some(doc.spawn.map(|s| [s.col, s.row]).unwrap_or([0, 0])),
        layers: vec![
            FlatLayer { images: terrain },
            FlatLayer { images: aura },
            FlatLayer { images: tokens },
        ],
    }
}

/// Flatten one image, resolving its anchor against the candidates.
pub fn flatten_image(image: &MapImage, anchors: &[FlatImage]) -> FlatImage {
    let grid_offset = resolve_anchor(image, anchors)
        .or_else(|| {
            image
                .grid_offset
                .map(|offset| [offset.col as f64, offset.row as f64])
        })
        .unwrap_or([0.0, 0.0]);

    FlatImage {
        name: image.name.clone(),
        url: image.url.clone(),
        size: Some([
            image.size.cols.unwrap_or(0) as f64,
            image.size.rows.unwrap_or(0) as f64,
        ]),
        grid_offset: Some(grid_offset),
        anchor: image.anchor_id.clone(),
        opacity: image.opacity,
        user: image.user_id.clone(),
    }
}

/// The derived offset that centers `image` over its anchor:
/// `(own - anchor) / -2` on each axis. `None` when the image has no stored
/// offset, no anchor, no grid extent, or the anchor name matches nothing —
/// the caller then keeps the original offset.
pub fn resolve_anchor(image: &MapImage, anchors: &[FlatImage]) -> Option<[f64; 2]> {
    image.grid_offset?;
    let anchor_id = image.anchor_id.as_deref()?;
    let anchor = anchors.iter().find(|a| a.name == anchor_id)?;
    let (cols, rows) = image.size.grid_extent()?;
    let anchor_size = anchor.size?;

    Some([
        (cols as f64 - anchor_size[0]) / -2.0,
        (rows as f64 - anchor_size[1]) / -2.0,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GridCoordinate, MapImage, SizeSpec};

    fn image(name: &str, cols: i64, rows: i64, anchor: Option<&str>) -> MapImage {
        MapImage {
            id: "1".to_string(),
            name: name.to_string(),
            url: format!("https://example.com/{name}.png"),
            user_id: None,
            grid_offset: Some(GridCoordinate::new(1, 1)),
            pixel_offset: None,
            clip: None,
            scale: None,
            size: SizeSpec {
                cols: Some(cols),
                rows: Some(rows),
                ..Default::default()
            },
            anchor_id: anchor.map(String::from),
            opacity: None,
            is_active: None,
        }
    }

    fn candidates() -> Vec<FlatImage> {
        vec![flatten_image(&image("Hero", 2, 2, None), &[])]
    }

    #[test]
    fn test_larger_aura_shifts_up_and_left() {
        let aura = image("Glow", 3, 3, Some("Hero"));
        assert_eq!(resolve_anchor(&aura, &candidates()), Some([-0.5, -0.5]));
    }

    #[test]
    fn test_smaller_aura_centers_inward() {
        let aura = image("Spark", 1, 1, Some("Hero"));
        assert_eq!(resolve_anchor(&aura, &candidates()), Some([0.5, 0.5]));
    }

    #[test]
    fn test_unmatched_anchor_keeps_original_offset() {
        let aura = image("Glow", 3, 3, Some("Nobody"));
        assert_eq!(resolve_anchor(&aura, &candidates()), None);
        let flat = flatten_image(&aura, &candidates());
        assert_eq!(flat.grid_offset, Some([1.0, 1.0]));
    }

    #[test]
    fn test_no_stored_offset_skips_resolution() {
        let mut aura = image("Glow", 3, 3, Some("Hero"));
        aura.grid_offset = None;
        assert_eq!(resolve_anchor(&aura, &candidates()), None);
        let flat = flatten_image(&aura, &candidates());
        assert_eq!(flat.grid_offset, Some([0.0, 0.0]));
    }

    #[test]
    fn test_flatten_layer_order_and_defaults() {
        let source = "\
[map]
https://example.com/bg.jpg
name=Order
grid=10x8
spawn=2,2
[terrain]
https://example.com/t.png
name=Floor
size=10x8
position=1,1
[token]
https://example.com/hero.png
name=Hero
size=2x2
position=4,4
[aura]
https://example.com/glow.png
name=Glow
anchor=Hero
size=4x4
position=1,1
";
        let doc = crate::parser::parse(source).unwrap().unwrap();
        let flat = flatten(&doc);

        assert_eq!(flat.name, "Order");
        assert_eq!(flat.background.as_ref().unwrap().url, "https://example.com/bg.jpg");
        assert_eq!(flat.grid, Some([10, 8]));
        assert_eq!(flat.spawn, Some([2, 2]));
        assert_eq!(flat.layers.len(), 3);

        assert_eq!(flat.images(crate::types::TERRAIN_LAYER)[0].name, "Floor");
        assert_eq!(flat.images(crate::types::TOKEN_LAYER)[0].name, "Hero");

        // 4x4 aura over a 2x2 token: centered one cell up and left
        let glow = &flat.images(crate::types::AURA_LAYER)[0];
        assert_eq!(glow.grid_offset, Some([-1.0, -1.0]));
        assert_eq!(glow.anchor, Some("Hero".to_string()));
    }
}
