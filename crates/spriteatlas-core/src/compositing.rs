use crate::error::{Result, SpriteAtlasError};
use crate::model::{Rect, SpriteRect};
use image::RgbaImage;

/// What part of a sprite a blit copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlitKind {
    Body,
    EdgeUp,
    EdgeDown,
    EdgeLeft,
    EdgeRight,
}

/// Copy `src` (in the sprite's own pixel space) to `(dst_x, dst_y)` on the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blit<H> {
    pub source: H,
    pub kind: BlitKind,
    pub src: Rect,
    pub dst_x: u32,
    pub dst_y: u32,
}

/// Destination of blit instructions.
///
/// Implementations clip against both the source and destination bounds and
/// silently skip empty intersections.
pub trait BlitSink<H> {
    fn copy_region(&mut self, source: &H, src: Rect, dst_x: u32, dst_y: u32);
}

/// Canvas size plus the ordered blits that fill it.
#[derive(Debug, Clone)]
pub struct Composition<H> {
    pub width: u32,
    pub height: u32,
    pub blits: Vec<Blit<H>>,
}

/// Tight bounding box of all sprite bodies plus their right/bottom extrusion.
pub fn canvas_extent<H>(sprites: &[SpriteRect<H>]) -> Result<(u32, u32)> {
    let mut width = 0u32;
    let mut height = 0u32;
    for s in sprites {
        width = width.max(s.pack_x + s.width + s.extrude.right_px());
        height = height.max(s.pack_y + s.height + s.extrude.down_px());
    }
    if width == 0 || height == 0 {
        return Err(SpriteAtlasError::ZeroExtent { width, height });
    }
    Ok((width, height))
}

/// Computes the canvas extents and the blit list for placed sprites.
///
/// Each sprite contributes its full body first, followed by one 1-pixel strip
/// per extruded side, copied from the matching boundary row or column.
pub fn compose<H: Clone>(sprites: &[SpriteRect<H>]) -> Result<Composition<H>> {
    let (width, height) = canvas_extent(sprites)?;
    let mut blits = Vec::with_capacity(sprites.len());
    for s in sprites {
        push_sprite_blits(s, &mut blits);
    }
    Ok(Composition {
        width,
        height,
        blits,
    })
}

fn push_sprite_blits<H: Clone>(s: &SpriteRect<H>, out: &mut Vec<Blit<H>>) {
    let (x, y, w, h) = (s.pack_x, s.pack_y, s.width, s.height);
    let mut push = |kind: BlitKind, src: Rect, dst: Option<(u32, u32)>| {
        // A strip that would start left of / above the canvas is clipped away entirely.
        if let Some((dst_x, dst_y)) = dst {
            out.push(Blit {
                source: s.source.clone(),
                kind,
                src,
                dst_x,
                dst_y,
            });
        }
    };
    push(BlitKind::Body, Rect::new(0, 0, w, h), Some((x, y)));
    let e = s.extrude;
    if e.up {
        push(
            BlitKind::EdgeUp,
            Rect::new(0, 0, w, 1),
            y.checked_sub(1).map(|dy| (x, dy)),
        );
    }
    if e.down {
        push(
            BlitKind::EdgeDown,
            Rect::new(0, h.saturating_sub(1), w, 1),
            Some((x, y + h)),
        );
    }
    if e.left {
        push(
            BlitKind::EdgeLeft,
            Rect::new(0, 0, 1, h),
            x.checked_sub(1).map(|dx| (dx, y)),
        );
    }
    if e.right {
        push(
            BlitKind::EdgeRight,
            Rect::new(w.saturating_sub(1), 0, 1, h),
            Some((x + w, y)),
        );
    }
}

/// Feeds every blit to the sink in order.
pub fn apply_blits<H>(blits: &[Blit<H>], sink: &mut dyn BlitSink<H>) {
    for b in blits {
        sink.copy_region(&b.source, b.src, b.dst_x, b.dst_y);
    }
}

/// RGBA destination canvas whose sources are addressed by index.
pub struct RgbaCanvas<'a> {
    sources: &'a [RgbaImage],
    canvas: RgbaImage,
}

impl<'a> RgbaCanvas<'a> {
    pub fn new(sources: &'a [RgbaImage], width: u32, height: u32) -> Self {
        Self {
            sources,
            canvas: RgbaImage::new(width, height),
        }
    }

    pub fn into_image(self) -> RgbaImage {
        self.canvas
    }
}

impl BlitSink<usize> for RgbaCanvas<'_> {
    fn copy_region(&mut self, source: &usize, src: Rect, dst_x: u32, dst_y: u32) {
        if let Some(img) = self.sources.get(*source) {
            blit_rgba(img, &mut self.canvas, src, dst_x, dst_y);
        }
    }
}

/// Copy `src_rect` of `src` into `canvas` at `(dx, dy)`, clipped to both images.
pub fn blit_rgba(src: &RgbaImage, canvas: &mut RgbaImage, src_rect: Rect, dx: u32, dy: u32) {
    let (sw, sh) = src.dimensions();
    let (cw, ch) = canvas.dimensions();
    let Some(clipped) = src_rect.intersect(&Rect::new(0, 0, sw, sh)) else {
        return;
    };
    // shift the destination by whatever was clipped off the top/left of the source
    let dx = dx + (clipped.x - src_rect.x);
    let dy = dy + (clipped.y - src_rect.y);
    for yy in 0..clipped.h {
        if dy + yy >= ch {
            break;
        }
        for xx in 0..clipped.w {
            if dx + xx >= cw {
                break;
            }
            let px = *src.get_pixel(clipped.x + xx, clipped.y + yy);
            canvas.put_pixel(dx + xx, dy + yy, px);
        }
    }
}
