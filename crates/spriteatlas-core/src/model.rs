use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    /// Exclusive right edge (`x + w`).
    pub fn x2(&self) -> u32 {
        self.x + self.w
    }
    /// Exclusive bottom edge (`y + h`).
    pub fn y2(&self) -> u32 {
        self.y + self.h
    }
    /// True if the two rectangles share any pixel.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.x >= other.x2() || other.x >= self.x2() || self.y >= other.y2() || other.y >= self.y2())
    }
    /// Intersection of two rectangles, `None` when they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.x2().min(other.x2());
        let y2 = self.y2().min(other.y2());
        if x2 > x1 && y2 > y1 {
            Some(Rect::new(x1, y1, x2 - x1, y2 - y1))
        } else {
            None
        }
    }
}

/// Which sides of a sprite get a repeated 1-pixel edge border.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Extrude {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Extrude {
    pub const NONE: Extrude = Extrude {
        up: false,
        down: false,
        left: false,
        right: false,
    };
    pub const ALL: Extrude = Extrude {
        up: true,
        down: true,
        left: true,
        right: true,
    };

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
    pub fn up_px(&self) -> u32 {
        self.up as u32
    }
    pub fn down_px(&self) -> u32 {
        self.down as u32
    }
    pub fn left_px(&self) -> u32 {
        self.left as u32
    }
    pub fn right_px(&self) -> u32 {
        self.right as u32
    }
}

/// One input sprite and, after packing, its place in the atlas.
///
/// `width`/`height` are the raw pixel size and are what exporters report.
/// `total_width`/`total_height` add the extruded borders and are fixed at
/// construction. `pack_x`/`pack_y` locate the top-left of the unextruded body
/// and are only meaningful once the packer has run.
#[derive(Debug, Clone)]
pub struct SpriteRect<H = usize> {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub extrude: Extrude,
    pub total_width: u32,
    pub total_height: u32,
    pub pack_x: u32,
    pub pack_y: u32,
    /// False until a free space was found for this sprite.
    pub placed: bool,
    /// Opaque handle to the pixel source owned by the caller.
    pub source: H,
}

impl<H> SpriteRect<H> {
    /// Placed footprint including the extruded borders.
    pub fn footprint(&self) -> Rect {
        Rect::new(
            self.pack_x.saturating_sub(self.extrude.left_px()),
            self.pack_y.saturating_sub(self.extrude.up_px()),
            self.total_width,
            self.total_height,
        )
    }
}

/// A free rectangle of the canvas that can still receive a sprite.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FreeSpace {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FreeSpace {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Atlas-level metadata shared by the exporters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    pub app: String,
    pub version: String,
    /// File name of the atlas image referenced from the metadata.
    pub image: String,
    pub scale: u32,
}

impl Meta {
    pub fn for_image(image: impl Into<String>) -> Self {
        Self {
            app: crate::APP_NAME.into(),
            version: format!("{} {}", crate::APP_NAME, env!("CARGO_PKG_VERSION")),
            image: image.into(),
            scale: 1,
        }
    }
}

/// Final layout: canvas extents plus every sprite in packing order.
#[derive(Debug, Clone)]
pub struct Atlas<H = usize> {
    pub width: u32,
    pub height: u32,
    pub sprites: Vec<SpriteRect<H>>,
    pub meta: Meta,
}

/// Statistics about atlas packing efficiency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AtlasStats {
    pub num_sprites: usize,
    /// Sprites with at least one extruded side.
    pub num_extruded: usize,
    /// Sprites the packer could not place.
    pub num_failed: usize,
    pub canvas_area: u64,
    /// Sum of sprite body areas (extrusion excluded).
    pub used_area: u64,
    /// used_area / canvas_area (0.0 to 1.0).
    pub occupancy: f64,
}

impl<H> Atlas<H> {
    pub fn stats(&self) -> AtlasStats {
        let canvas_area = self.width as u64 * self.height as u64;
        let mut used_area = 0u64;
        let mut num_extruded = 0;
        let mut num_failed = 0;
        for s in &self.sprites {
            used_area += s.width as u64 * s.height as u64;
            if s.extrude.any() {
                num_extruded += 1;
            }
            if !s.placed {
                num_failed += 1;
            }
        }
        let occupancy = if canvas_area > 0 {
            used_area as f64 / canvas_area as f64
        } else {
            0.0
        };
        AtlasStats {
            num_sprites: self.sprites.len(),
            num_extruded,
            num_failed,
            canvas_area,
            used_area,
            occupancy,
        }
    }
}

impl AtlasStats {
    pub fn summary(&self) -> String {
        format!(
            "Sprites: {}, Extruded: {}, Failed: {}, Occupancy: {:.2}%, Canvas Area: {} px², Used Area: {} px²",
            self.num_sprites,
            self.num_extruded,
            self.num_failed,
            self.occupancy * 100.0,
            self.canvas_area,
            self.used_area,
        )
    }

    pub fn wasted_area(&self) -> u64 {
        self.canvas_area.saturating_sub(self.used_area)
    }
}
