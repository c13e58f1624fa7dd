//! Core library for packing sprites into a single atlas image.
//!
//! - Sprite names may carry an extrusion directive: `box [ext=UD].png`
//! - Canvas estimation seeds one free space; a greedy free-space packer places sprites tallest first
//! - Compositing emits blit instructions for bodies and 1px extruded edges
//! - Exporters: JSON array, JSON hash, libGDX `.atlas`, CSS, XML
//!
//! Quick example:
//! ```ignore
//! use spriteatlas_core::{AtlasConfig, OutputFormat, pack_layout, render};
//! # fn main() -> anyhow::Result<()> {
//! let cfg = AtlasConfig::builder().output_format(OutputFormat::Xml).build();
//! let out = pack_layout(vec![("hero.png", 32, 48), ("wall [ext=lr].png", 16, 16)], &cfg)?;
//! println!("{}", render(cfg.output_format, &out.atlas));
//! # Ok(()) }
//! ```

pub mod compositing;
pub mod config;
pub mod error;
pub mod estimate;
pub mod export;
pub mod export_css;
pub mod export_libgdx;
pub mod export_xml;
pub mod model;
pub mod packer;
pub mod pipeline;
pub mod sprite;

pub use config::*;
pub use error::*;
pub use export::*;
pub use model::*;
pub use pipeline::*;

/// Application name written into metadata headers.
pub const APP_NAME: &str = "spriteatlas";

/// Convenience prelude for common types and functions.
/// Importing `spriteatlas_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::compositing::{Blit, BlitKind, BlitSink, Composition, RgbaCanvas};
    pub use crate::config::{AtlasConfig, AtlasConfigBuilder, OutputFormat, WidthEstimate};
    pub use crate::model::{Atlas, AtlasStats, Extrude, FreeSpace, Rect, SpriteRect};
    pub use crate::packer::{PackFailure, Packer, free_space::FreeSpacePacker};
    pub use crate::{
        ImageOutput, InputImage, PackOutput, PackRun, SpriteInput, pack_images, pack_layout,
        pack_sprites, render,
    };
}
