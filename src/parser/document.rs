//! Whole-document parsing.
//!
//! Orchestrates section extraction and entity building into a
//! [`MapDocument`]. Parsing is maximally permissive: malformed image blocks
//! are dropped and reported, and only a missing `[map]` section (or a map
//! without a name) yields no document.

use super::entity::{
    build_aura, build_grid, build_image, build_map_with_background_and_grid, BuildOutcome,
    ParseReport,
};
use super::section::LineBuffer;
use crate::error::Result;
use crate::id::SnowflakeGenerator;
use crate::types::{Layer, LayerKind, Layers, MapDocument, MapImage};

/// Parses map text into structured documents.
///
/// Holds the id generator that stamps every entity; construct one and reuse
/// it across parses.
#[derive(Debug, Default)]
pub struct MapParser {
    ids: SnowflakeGenerator,
}

impl MapParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific generator (custom epoch/node id).
    pub fn with_generator(ids: SnowflakeGenerator) -> Self {
        Self { ids }
    }

    /// Parse map text. Returns `None` when no document can be established;
    /// the only hard errors are id-generator faults.
    pub fn parse(&self, source: &str) -> Result<Option<MapDocument>> {
        self.parse_with_report(source).map(|(doc, _)| doc)
    }

    /// Parse map text, also returning the skipped-entity report.
    pub fn parse_with_report(&self, source: &str) -> Result<(Option<MapDocument>, ParseReport)> {
        let mut report = ParseReport::new();
        let mut lines = LineBuffer::new(source);

        let Some(map_section) = lines.take_section("map") else {
            return Ok((None, report));
        };
        let (header, inline_background, inline_grid) =
            build_map_with_background_and_grid(&map_section, &self.ids)?;
        let Some(header) = header else {
            return Ok((None, report));
        };

        // inline grid wins over a dedicated [grid] section
        let grid = match inline_grid {
            Some(grid) => Some(grid),
            None => lines.take_section("grid").as_ref().and_then(build_grid),
        };

        // the inline background comes first, dedicated sections follow
        let mut background = Vec::new();
        if let Some(image) = inline_background {
            background.push(image);
        }
        for section in lines.take_sections("background") {
            match build_image(&section, &self.ids)? {
                BuildOutcome::Image(image) => background.push(image),
                BuildOutcome::Skipped(skipped) => report.push(skipped),
            }
        }

        let mut terrain = Vec::new();
        for section in lines.take_sections("terrain") {
            match build_image(&section, &self.ids)? {
                BuildOutcome::Image(image) => terrain.push(image),
                BuildOutcome::Skipped(skipped) => report.push(skipped),
            }
        }

        let mut aura = Vec::new();
        for section in lines.take_sections("aura") {
            match build_aura(&section, &self.ids)? {
                BuildOutcome::Image(image) => aura.push(image),
                BuildOutcome::Skipped(skipped) => report.push(skipped),
            }
        }

        let mut token = Vec::new();
        for section in lines.take_sections("token") {
            match build_image(&section, &self.ids)? {
                BuildOutcome::Image(image) => token.push(image),
                BuildOutcome::Skipped(skipped) => report.push(skipped),
            }
        }

        let document = MapDocument {
            name: header.name,
            spawn: header.spawn,
            user_id: header.user,
            grid,
            layers: Layers {
                background: self.layer(LayerKind::Background, background)?,
                terrain: self.layer(LayerKind::Terrain, terrain)?,
                aura: self.layer(LayerKind::Aura, aura)?,
                token: self.layer(LayerKind::Token, token)?,
            },
        };
        Ok((Some(document), report))
    }

    fn layer(&self, kind: LayerKind, images: Vec<MapImage>) -> Result<Layer> {
        Ok(Layer {
            kind,
            id: self.ids.next()?,
            images,
        })
    }
}

/// Parse map text with a default parser.
pub fn parse(source: &str) -> Result<Option<MapDocument>> {
    MapParser::new().parse(source)
}
