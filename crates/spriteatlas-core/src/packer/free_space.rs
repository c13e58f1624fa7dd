use super::{Packer, by_area_asc};
use crate::model::FreeSpace;
use tracing::trace;

/// Greedy packer over a bag of free spaces.
///
/// Before every placement the spaces are stably sorted smallest-area first and
/// the first one that holds the footprint is used. The chosen space is then
/// removed (exact fit), shrunk in place (one matching side) or split into a
/// strip right of the slot plus the remainder below it. Spaces never merge.
pub struct FreeSpacePacker {
    spaces: Vec<FreeSpace>,
}

impl FreeSpacePacker {
    pub fn new(seed: FreeSpace) -> Self {
        Self { spaces: vec![seed] }
    }

    /// Current free spaces in collection order.
    pub fn spaces(&self) -> &[FreeSpace] {
        &self.spaces
    }

    pub fn into_spaces(self) -> Vec<FreeSpace> {
        self.spaces
    }

    fn find(&self, w: u32, h: u32) -> Option<usize> {
        self.spaces
            .iter()
            .position(|sp| w <= sp.width && h <= sp.height)
    }

    fn resolve(&mut self, idx: usize, w: u32, h: u32) {
        let space = self.spaces[idx];
        if w == space.width && h == space.height {
            trace!(?space, "exact fit, space consumed");
            self.spaces.remove(idx);
        } else if h == space.height {
            let sp = &mut self.spaces[idx];
            sp.x += w;
            sp.width -= w;
            trace!(space = ?sp, "height match, space shrunk rightwards");
        } else if w == space.width {
            let sp = &mut self.spaces[idx];
            sp.y += h;
            sp.height -= h;
            trace!(space = ?sp, "width match, space shrunk downwards");
        } else {
            let right = FreeSpace::new(space.x + w, space.y, space.width - w, h);
            self.spaces.push(right);
            let sp = &mut self.spaces[idx];
            sp.y += h;
            sp.height -= h;
            trace!(?right, below = ?sp, "space split");
        }
    }
}

impl Packer for FreeSpacePacker {
    fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        self.spaces.sort_by(by_area_asc);
        let idx = self.find(w, h)?;
        let FreeSpace { x, y, .. } = self.spaces[idx];
        self.resolve(idx, w, h);
        Some((x, y))
    }
}
