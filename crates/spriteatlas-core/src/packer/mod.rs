use crate::model::{FreeSpace, SpriteRect};
use std::cmp::Ordering;
use tracing::{debug, warn};

pub mod free_space;

/// A packer reserves slots for padded sprite footprints.
///
/// `place` returns the top-left of the reserved slot, or `None` when no free
/// area can hold a `w x h` footprint. A failed `place` leaves the packer unchanged.
pub trait Packer {
    fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)>;
}

/// A sprite the packer could not place; it stays at the origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackFailure {
    pub name: String,
    pub total_width: u32,
    pub total_height: u32,
}

/// Packing order: taller sprites first. Use with a stable sort so equal
/// heights keep their input order.
pub fn by_height_desc<H>(a: &SpriteRect<H>, b: &SpriteRect<H>) -> Ordering {
    b.height.cmp(&a.height)
}

/// Free-space scan order: smallest area first. Equal areas compare equal, so
/// a stable sort keeps them in collection order.
pub fn by_area_asc(a: &FreeSpace, b: &FreeSpace) -> Ordering {
    a.area().cmp(&b.area())
}

/// Places every sprite in slice order and records the ones that did not fit.
///
/// The body of a placed sprite lands inside its slot, offset by its left/top
/// extrusion. Unplaced sprites are left at the origin with `placed = false`.
pub fn pack_all<H>(
    packer: &mut dyn Packer,
    sprites: &mut [SpriteRect<H>],
    padding: u32,
) -> Vec<PackFailure> {
    let mut failures = Vec::new();
    for s in sprites.iter_mut() {
        let w = s.total_width + padding;
        let h = s.total_height + padding;
        match packer.place(w, h) {
            Some((x, y)) => {
                s.pack_x = x + s.extrude.left_px();
                s.pack_y = y + s.extrude.up_px();
                s.placed = true;
                debug!(name = %s.name, x = s.pack_x, y = s.pack_y, "placed sprite");
            }
            None => {
                s.pack_x = 0;
                s.pack_y = 0;
                s.placed = false;
                warn!(name = %s.name, w, h, "could not find space for sprite");
                failures.push(PackFailure {
                    name: s.name.clone(),
                    total_width: s.total_width,
                    total_height: s.total_height,
                });
            }
        }
    }
    failures
}
