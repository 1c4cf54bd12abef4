//! Entity builders: compose field extraction into domain entities.
//!
//! Image builders are permissive: a block missing its minimum fields is
//! dropped as a [`Skipped`] outcome rather than an error, so one malformed
//! block never aborts the rest of the document.

use log::debug;

use super::fields::PixelUnit;
use super::section::Section;
use crate::error::Result;
use crate::id::SnowflakeGenerator;
use crate::types::{GridCoordinate, GridSettings, MapImage};

/// Map-level metadata from the `[map]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct MapHeader {
    pub name: String,
    pub spawn: Option<GridCoordinate>,
    pub user: Option<String>,
}

/// Why an image block was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    /// Section label the block came from.
    pub label: String,
    pub reason: String,
}

/// Outcome of building an image entity from a section.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildOutcome {
    Image(MapImage),
    Skipped(Skipped),
}

/// Diagnostics collected across one parse.
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    skipped: Vec<Skipped>,
}

impl ParseReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, skipped: Skipped) {
        debug!("skipped [{}] entity: {}", skipped.label, skipped.reason);
        self.skipped.push(skipped);
    }

    /// True when nothing was dropped.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn skipped(&self) -> &[Skipped] {
        &self.skipped
    }
}

/// Build map metadata. A section without a `name=` yields no map at all.
pub fn build_map(section: &Section) -> Option<MapHeader> {
    let Some(name) = section.string(&["name"]) else {
        debug!("[{}] section has no name", section.label);
        return None;
    };
    let spawn = section
        .numbers(&["spawn"], PixelUnit::Optional)
        .map(|pair| GridCoordinate::new(pair[0], pair[1]));
    let user = section.string(&["user"]);
    Some(MapHeader { name, spawn, user })
}

/// Build a grid definition. Requires positive `cols` and `rows`; the grid
/// type falls back to square, and per-axis key settings fall back to the
/// generic `key`/`keyScale` fields.
pub fn build_grid(section: &Section) -> Option<GridSettings> {
    let (cols, rows) = section.cols_and_rows()?;
    if cols <= 0 || rows <= 0 {
        return None;
    }

    let grid_color = section
        .color(&["gridcolor"])
        .or_else(|| section.color(&["color"]));
    let grid_type = section
        .grid_type(&["gridtype"])
        .or_else(|| section.grid_type(&["type"]))
        .unwrap_or_default();

    Some(GridSettings {
        grid_type,
        grid_color,
        cols,
        rows,
        col_key: section
            .boolean(&["colkey"])
            .or_else(|| section.boolean(&["key"])),
        row_key: section
            .boolean(&["rowkey"])
            .or_else(|| section.boolean(&["key"])),
        col_key_scale: section
            .number(&["colkeyscale"])
            .or_else(|| section.number(&["keyscale"])),
        row_key_scale: section
            .number(&["rowkeyscale"])
            .or_else(|| section.number(&["keyscale"])),
        width: 0,
        height: 0,
    })
}

/// Build an image descriptor. `url` and `name` are required; anything else
/// is optional.
pub fn build_image(section: &Section, ids: &SnowflakeGenerator) -> Result<BuildOutcome> {
    let url = section.url();
    let name = section.string(&["name"]);

    let (url, name) = match (url, name) {
        (Some(url), Some(name)) => (url, name),
        (url, name) => {
            let mut missing = Vec::new();
            if url.is_none() {
                missing.push("url");
            }
            if name.is_none() {
                missing.push("name");
            }
            return Ok(BuildOutcome::Skipped(Skipped {
                label: section.label.to_string(),
                reason: format!("missing {}", missing.join(" and ")),
            }));
        }
    };

    Ok(BuildOutcome::Image(MapImage {
        id: ids.next()?,
        name,
        url,
        user_id: section.string(&["user"]),
        grid_offset: section.grid_offset(),
        pixel_offset: section.pixel_offset(),
        clip: section.clip(),
        scale: section.scale(),
        size: section.size(),
        anchor_id: None,
        opacity: None,
        is_active: None,
    }))
}

/// Build an aura: an image plus anchor, opacity and active flag.
pub fn build_aura(section: &Section, ids: &SnowflakeGenerator) -> Result<BuildOutcome> {
    Ok(match build_image(section, ids)? {
        BuildOutcome::Image(mut image) => {
            image.anchor_id = section.string(&["anchor"]);
            image.opacity = section.percent(&["opacity"]);
            image.is_active = section.boolean(&["active"]);
            BuildOutcome::Image(image)
        }
        skipped => skipped,
    })
}

/// Build everything the `[map]` section can carry at once: map metadata, an
/// inline background image, and an inline grid. An inline background
/// missing its own extent inherits the grid's cols/rows.
pub fn build_map_with_background_and_grid(
    section: &Section,
    ids: &SnowflakeGenerator,
) -> Result<(Option<MapHeader>, Option<MapImage>, Option<GridSettings>)> {
    let header = build_map(section);
    let mut image = match build_image(section, ids)? {
        BuildOutcome::Image(image) => Some(image),
        BuildOutcome::Skipped(skipped) => {
            debug!("no inline background: {}", skipped.reason);
            None
        }
    };
    let grid = build_grid(section);

    if let (Some(image), Some(grid)) = (image.as_mut(), grid.as_ref()) {
        if image.size.cols.is_none() {
            image.size.cols = Some(grid.cols);
        }
        if image.size.rows.is_none() {
            image.size.rows = Some(grid.rows);
        }
    }

    Ok((header, image, grid))
}
