//! Sprite naming: logical name plus an optional extrusion directive.
//!
//! A raw layer/file name such as `green_pipe [ext=UD].png` yields the logical
//! name `green_pipe` with extrusion on the top and bottom edges. Malformed
//! directives are ignored rather than rejected.

use crate::model::{Extrude, SpriteRect};

/// File extensions stripped from raw names (case-sensitive).
const IMAGE_EXTENSIONS: [&str; 2] = [".png", ".jpg"];

const DIRECTIVE_PREFIX: &str = "ext=";

/// Splits a raw name into `(logical_name, extrude)`.
pub fn parse_name(raw: &str) -> (String, Extrude) {
    let stem = strip_image_extension(raw);
    let (Some(open), Some(close)) = (stem.find('['), stem.find(']')) else {
        return (stem.to_string(), Extrude::NONE);
    };
    if open >= close {
        return (stem.to_string(), Extrude::NONE);
    }
    let name = stem[..open].trim().to_string();
    let directive = stem[open + 1..close].trim().to_lowercase();
    let extrude = match directive.strip_prefix(DIRECTIVE_PREFIX) {
        Some(sides) => Extrude {
            up: sides.contains('u'),
            down: sides.contains('d'),
            left: sides.contains('l'),
            right: sides.contains('r'),
        },
        None => Extrude::NONE,
    };
    (name, extrude)
}

fn strip_image_extension(raw: &str) -> &str {
    IMAGE_EXTENSIONS
        .iter()
        .find_map(|ext| raw.strip_suffix(ext))
        .unwrap_or(raw)
}

impl<H> SpriteRect<H> {
    /// Builds a sprite from a raw name, its pixel size and the caller's source handle.
    pub fn parse(raw_name: &str, width: u32, height: u32, source: H) -> Self {
        let (name, extrude) = parse_name(raw_name);
        Self::with_extrude(name, width, height, extrude, source)
    }

    /// Builds a sprite with an explicit extrusion set, bypassing name parsing.
    pub fn with_extrude(
        name: impl Into<String>,
        width: u32,
        height: u32,
        extrude: Extrude,
        source: H,
    ) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            extrude,
            total_width: width + extrude.left_px() + extrude.right_px(),
            total_height: height + extrude.up_px() + extrude.down_px(),
            pack_x: 0,
            pack_y: 0,
            placed: false,
            source,
        }
    }
}
