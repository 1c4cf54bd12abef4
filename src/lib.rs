//! gridmap - Plain-text tabletop map codec
//!
//! A library for converting permissive plain-text map definitions into
//! structured map documents and back: parsing, anchor resolution,
//! duplicate-name handling, and JSON persistence for map collections.

pub mod cli;
pub mod edit;
pub mod error;
pub mod flatten;
pub mod id;
pub mod output;
pub mod parser;
pub mod rename;
pub mod store;
pub mod types;
pub mod writer;

pub use edit::{add_map, copy_image, remove_image};
pub use error::{MapError, Result};
pub use flatten::{flatten, resolve_anchor};
pub use id::SnowflakeGenerator;
pub use parser::{parse, MapParser, ParseReport};
pub use rename::{rename_duplicate, Renamed, SuffixStrategy};
pub use store::{MapStore, StoreData};
pub use types::{
    FlatBackground, FlatImage, FlatLayer, FlatMap, GridCoordinate, GridSettings, GridType, Layer,
    LayerKind, Layers, MapDocument, MapImage,
};
pub use writer::to_text;
