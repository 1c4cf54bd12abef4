//! Parsing of plain-text map definitions.
//!
//! Map text is a forgiving, line-oriented format: `[label]` headers open
//! sections, and section bodies mix `key=value` pairs (keys
//! case-insensitive, many spellings accepted) with bare value lines such as
//! an image url.
//!
//! # Usage
//!
//! ```ignore
//! use gridmap::parser::MapParser;
//!
//! let parser = MapParser::new();
//! if let Some(doc) = parser.parse(&source)? {
//!     println!("parsed map: {}", doc.name);
//! }
//! ```

mod document;
mod entity;
mod fields;
mod section;

pub use document::{parse, MapParser};
pub use entity::{
    build_aura, build_grid, build_image, build_map, build_map_with_background_and_grid,
    BuildOutcome, MapHeader, ParseReport, Skipped,
};
pub use fields::PixelUnit;
pub use section::{header_label, LineBuffer, Section, SECTION_LABELS};
