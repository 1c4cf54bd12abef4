//! In-place edits on flattened maps.
//!
//! Copying and removing images keeps anchored auras consistent: a copied
//! terrain piece or token drags clones of its auras along under the new
//! name, and removing one takes its auras with it.

use crate::rename::{rename_duplicate, SuffixStrategy};
use crate::types::{FlatImage, FlatMap, AURA_LAYER};

/// Duplicate the image at `layer`/`index`.
///
/// The copy lands right after the original, offset by its own size so the
/// two do not overlap, and is renamed alphabetically against its layer.
/// Auras anchored to the original are cloned too, each placed right after
/// its source, renamed with the same suffix and re-anchored to the copy.
/// Returns the copy's name.
pub fn copy_image(map: &mut FlatMap, layer: usize, index: usize) -> Option<String> {
    let source = map.layers.get(layer)?.images.get(index)?.clone();

    let renamed = {
        let names = map.images(layer).iter().map(|i| i.name.as_str());
        rename_duplicate(&source.name, names, &SuffixStrategy::Alpha)
    };

    let mut copy = source.clone();
    if let (Some(offset), Some(size)) = (copy.grid_offset.as_mut(), copy.size) {
        offset[0] += size[0];
        offset[1] += size[1];
    }
    if let Some(renamed) = &renamed {
        copy.name = renamed.name.clone();
    }
    let copy_name = copy.name.clone();
    map.layers[layer].images.insert(index + 1, copy);

    if layer != AURA_LAYER {
        if let Some(auras) = map.layers.get_mut(AURA_LAYER) {
            let mut i = 0;
            while i < auras.images.len() {
                if auras.images[i].anchor.as_deref() != Some(source.name.as_str()) {
                    i += 1;
                    continue;
                }
                let mut clone = auras.images[i].clone();
                if let Some(renamed) = &renamed {
                    clone.name = renamed.apply(&clone.name);
                }
                clone.anchor = Some(copy_name.clone());
                // each clone goes right after its source aura
                auras.images.insert(i + 1, clone);
                i += 2;
            }
        }
    }

    Some(copy_name)
}

/// Remove the image at `layer`/`index`, along with any auras anchored to
/// it. Returns the removed image.
pub fn remove_image(map: &mut FlatMap, layer: usize, index: usize) -> Option<FlatImage> {
    let images = &mut map.layers.get_mut(layer)?.images;
    if index >= images.len() {
        return None;
    }
    let removed = images.remove(index);

    if layer != AURA_LAYER {
        if let Some(auras) = map.layers.get_mut(AURA_LAYER) {
            auras
                .images
                .retain(|aura| aura.anchor.as_deref() != Some(removed.name.as_str()));
        }
    }

    Some(removed)
}

/// Append a map to a collection, numbering its name if taken. Returns the
/// index of the added map.
pub fn add_map(maps: &mut Vec<FlatMap>, mut map: FlatMap) -> usize {
    let renamed = rename_duplicate(
        &map.name,
        maps.iter().map(|m| m.name.as_str()),
        &SuffixStrategy::Numeric,
    );
    if let Some(renamed) = renamed {
        map.name = renamed.name;
    }
    maps.push(map);
    maps.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TOKEN_LAYER;

    fn image(name: &str, anchor: Option<&str>) -> FlatImage {
        FlatImage {
            name: name.to_string(),
            url: format!("https://example.com/{name}.png"),
            size: Some([2.0, 2.0]),
            grid_offset: Some([4.0, 4.0]),
            anchor: anchor.map(String::from),
            ..Default::default()
        }
    }

    fn map_with_hero_and_glow() -> FlatMap {
        let mut map = FlatMap {
            name: "Crypt".to_string(),
            ..Default::default()
        };
        map.normalize();
        map.layers[TOKEN_LAYER].images.push(image("Hero", None));
        map.layers[AURA_LAYER]
            .images
            .push(image("Glow", Some("Hero")));
        map
    }

    #[test]
    fn test_copy_shifts_and_renames() {
        let mut map = map_with_hero_and_glow();
        let name = copy_image(&mut map, TOKEN_LAYER, 0).unwrap();

        assert_eq!(name, "Hero A");
        let tokens = map.images(TOKEN_LAYER);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].name, "Hero A");
        assert_eq!(tokens[1].grid_offset, Some([6.0, 6.0]));
        // original untouched
        assert_eq!(tokens[0].grid_offset, Some([4.0, 4.0]));
    }

    #[test]
    fn test_copy_clones_anchored_auras() {
        let mut map = map_with_hero_and_glow();
        copy_image(&mut map, TOKEN_LAYER, 0).unwrap();

        let auras = map.images(AURA_LAYER);
        assert_eq!(auras.len(), 2);
        assert_eq!(auras[1].name, "Glow A");
        assert_eq!(auras[1].anchor, Some("Hero A".to_string()));
        assert_eq!(auras[0].anchor, Some("Hero".to_string()));
    }

    #[test]
    fn test_copy_places_each_aura_clone_after_its_source() {
        let mut map = map_with_hero_and_glow();
        map.layers[AURA_LAYER]
            .images
            .push(image("Haze", Some("Hero")));
        copy_image(&mut map, TOKEN_LAYER, 0).unwrap();

        let names: Vec<&str> = map
            .images(AURA_LAYER)
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(names, vec!["Glow", "Glow A", "Haze", "Haze A"]);
    }

    #[test]
    fn test_copy_replaces_existing_aura_suffix() {
        let mut map = map_with_hero_and_glow();
        map.layers[AURA_LAYER].images[0].name = "Glow B".to_string();
        copy_image(&mut map, TOKEN_LAYER, 0).unwrap();

        // the clone carries the token's new suffix, not a stacked one
        let auras = map.images(AURA_LAYER);
        assert_eq!(auras[1].name, "Glow A");
    }

    #[test]
    fn test_copy_aura_does_not_cascade() {
        let mut map = map_with_hero_and_glow();
        copy_image(&mut map, AURA_LAYER, 0).unwrap();

        let auras = map.images(AURA_LAYER);
        assert_eq!(auras.len(), 2);
        assert_eq!(auras[1].name, "Glow A");
        // a copied aura keeps its anchor
        assert_eq!(auras[1].anchor, Some("Hero".to_string()));
    }

    #[test]
    fn test_copy_out_of_range() {
        let mut map = map_with_hero_and_glow();
        assert!(copy_image(&mut map, TOKEN_LAYER, 5).is_none());
        assert!(copy_image(&mut map, 9, 0).is_none());
    }

    #[test]
    fn test_remove_takes_anchored_auras() {
        let mut map = map_with_hero_and_glow();
        let removed = remove_image(&mut map, TOKEN_LAYER, 0).unwrap();

        assert_eq!(removed.name, "Hero");
        assert!(map.images(TOKEN_LAYER).is_empty());
        assert!(map.images(AURA_LAYER).is_empty());
    }

    #[test]
    fn test_remove_aura_leaves_anchor() {
        let mut map = map_with_hero_and_glow();
        remove_image(&mut map, AURA_LAYER, 0).unwrap();

        assert!(map.images(AURA_LAYER).is_empty());
        assert_eq!(map.images(TOKEN_LAYER).len(), 1);
    }

    #[test]
    fn test_add_map_numbers_duplicates() {
        let mut maps = vec![FlatMap {
            name: "Dungeon".to_string(),
            ..Default::default()
        }];

        let index = add_map(
            &mut maps,
            FlatMap {
                name: "Dungeon".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(index, 1);
        assert_eq!(maps[1].name, "Dungeon #1");

        add_map(
            &mut maps,
            FlatMap {
                name: "Dungeon".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(maps[2].name, "Dungeon #2");

        let index = add_map(
            &mut maps,
            FlatMap {
                name: "Keep".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(maps[index].name, "Keep");
    }

    #[test]
    fn test_layer_without_images_default_map() {
        let mut map = FlatMap::default();
        assert!(remove_image(&mut map, TOKEN_LAYER, 0).is_none());
    }
}
