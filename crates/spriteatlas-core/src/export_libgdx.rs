//! libGDX TextureAtlas export (`.atlas`).
//!
//! ```text
//! sprites.png
//! size: 96,64
//! format: RGBA8888
//! filter: Linear,Linear
//! repeat: none
//! hero
//!   rotate: false
//!   xy: 0, 0
//!   size: 32, 32
//!   orig: 32, 32
//!   offset: 0, 0
//!   index: -1
//! ```

use crate::model::Atlas;

const FORMAT: &str = "RGBA8888";
const FILTER: &str = "Linear,Linear";
const REPEAT: &str = "none";

pub fn to_libgdx<H>(atlas: &Atlas<H>) -> String {
    let mut s = String::new();
    s.push_str(&format!(
        "{}\nsize: {},{}\nformat: {}\nfilter: {}\nrepeat: {}\n",
        single_line(&atlas.meta.image),
        atlas.width,
        atlas.height,
        FORMAT,
        FILTER,
        REPEAT
    ));
    for sp in &atlas.sprites {
        s.push_str(&format!(
            "{}\n  rotate: false\n  xy: {}, {}\n  size: {}, {}\n  orig: {}, {}\n  offset: 0, 0\n  index: -1\n",
            single_line(&sp.name),
            sp.pack_x,
            sp.pack_y,
            sp.width,
            sp.height,
            sp.width,
            sp.height,
        ));
    }
    s
}

/// The format is line oriented; a name must not span lines.
fn single_line(name: &str) -> String {
    name.replace(['\r', '\n'], " ")
}
