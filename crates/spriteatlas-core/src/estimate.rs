//! Starting canvas size for the free-space packer.

use crate::config::WidthEstimate;
use crate::model::{FreeSpace, SpriteRect};

/// Target utilization; the width is over-provisioned by `1 / UTILIZATION`.
const UTILIZATION: f64 = 0.95;

/// Returns `(start_width, start_height)` for the sprites in input order.
///
/// The width aims for a square-ish canvas holding the padded sprite area, but
/// never less than the widest padded sprite. The height is twice the width so
/// the greedy packer rarely runs out of room.
pub fn estimate<H>(sprites: &[SpriteRect<H>], padding: u32, rule: WidthEstimate) -> (u32, u32) {
    let mut area = 0u64;
    let mut max_width = 0u32;
    for s in sprites {
        let w = s.total_width + padding;
        let h = s.total_height + padding;
        area += w as u64 * h as u64;
        max_width = match rule {
            WidthEstimate::Accumulate => w.max(max_width + padding),
            WidthEstimate::RunningMax => w.max(max_width),
        };
    }
    let start_width = if area > 0 {
        let side = (area as f64 / UTILIZATION).sqrt().ceil() as u32;
        side.max(max_width)
    } else {
        max_width
    };
    (start_width, start_width * 2)
}

/// The single free space the packer starts from.
pub fn seed_space(start_width: u32, start_height: u32) -> FreeSpace {
    FreeSpace::new(0, 0, start_width, start_height)
}
