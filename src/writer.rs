//! Serialization of flattened maps back to map text.
//!
//! The writer is total: a map that cannot be rendered produces an
//! `[error]` block naming the problem, so callers always get text back.
//! Optional aura/token fields are written as empty `key=` lines, which the
//! parser treats as absent.

use thiserror::Error;

use crate::types::{FlatImage, FlatMap, AURA_LAYER, TERRAIN_LAYER, TOKEN_LAYER};

#[derive(Debug, Error)]
enum RenderError {
    #[error("map has no background")]
    MissingBackground,
    #[error("map has no grid")]
    MissingGrid,
    #[error("map has no spawn point")]
    MissingSpawn,
    #[error("map has {0} of 3 layers")]
    MissingLayers(usize),
    #[error("image \"{0}\" has no size")]
    MissingSize(String),
    #[error("image \"{0}\" has no position")]
    MissingPosition(String),
}

/// Render a flattened map as map text.
pub fn to_text(map: &FlatMap) -> String {
    match render(map) {
        Ok(text) => text,
        Err(err) => format!("[error]\nmessage={err}\n"),
    }
}

fn render(map: &FlatMap) -> Result<String, RenderError> {
    let background = map
        .background
        .as_ref()
        .ok_or(RenderError::MissingBackground)?;
    let grid = map.grid.ok_or(RenderError::MissingGrid)?;
    let spawn = map.spawn.ok_or(RenderError::MissingSpawn)?;
    if map.layers.len() < 3 {
        return Err(RenderError::MissingLayers(map.layers.len()));
    }

    let mut out = String::new();
    out.push_str("[map]\n");
    if !background.url.is_empty() {
        out.push_str(&background.url);
        out.push('\n');
    }
    out.push_str(&format!("name={}\n", map.name));
    out.push_str(&format!("grid={}x{}\n", grid[0], grid[1]));
    out.push_str(&format!("spawn={},{}\n", spawn[0], spawn[1]));

    for image in map.images(TERRAIN_LAYER) {
        let (size, position) = extent(image)?;
        out.push_str(&format!("\n[terrain]\n{}\n", image.url));
        out.push_str(&format!("name={}\n", image.name));
        out.push_str(&format!("size={}x{}\n", size[0], size[1]));
        out.push_str(&format!("position={},{}\n", position[0], position[1]));
    }

    for image in map.images(AURA_LAYER) {
        let (size, position) = extent(image)?;
        out.push_str(&format!("\n[aura]\n{}\n", image.url));
        out.push_str(&format!("name={}\n", image.name));
        out.push_str(&format!(
            "anchor={}\n",
            image.anchor.as_deref().unwrap_or_default()
        ));
        out.push_str(&format!("opacity={}\n", display_opt(image.opacity)));
        out.push_str(&format!("size={}x{}\n", size[0], size[1]));
        out.push_str(&format!("position={},{}\n", position[0], position[1]));
    }

    for image in map.images(TOKEN_LAYER) {
        let (size, position) = extent(image)?;
        out.push_str(&format!("\n[token]\n{}\n", image.url));
        out.push_str(&format!("name={}\n", image.name));
        out.push_str(&format!("size={}x{}\n", size[0], size[1]));
        out.push_str(&format!("position={},{}\n", position[0], position[1]));
        out.push_str(&format!(
            "user={}\n",
            image.user.as_deref().unwrap_or_default()
        ));
    }

    Ok(out)
}

fn extent(image: &FlatImage) -> Result<([f64; 2], [f64; 2]), RenderError> {
    let size = image
        .size
        .ok_or_else(|| RenderError::MissingSize(image.name.clone()))?;
    let position = image
        .grid_offset
        .ok_or_else(|| RenderError::MissingPosition(image.name.clone()))?;
    Ok((size, position))
}

fn display_opt(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
