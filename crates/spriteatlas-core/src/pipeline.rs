use crate::compositing::{Blit, Composition, RgbaCanvas, apply_blits, compose};
use crate::config::AtlasConfig;
use crate::error::{Result, SpriteAtlasError};
use crate::estimate::{estimate, seed_space};
use crate::export::render;
use crate::model::{Atlas, FreeSpace, Meta, SpriteRect};
use crate::packer::{PackFailure, by_height_desc, free_space::FreeSpacePacker, pack_all};
use image::{DynamicImage, RgbaImage};
use tracing::{info, instrument};

/// One sprite as supplied by the input collaborator.
#[derive(Debug, Clone)]
pub struct SpriteInput<H> {
    /// Raw layer/file name, possibly carrying an image extension and an `[ext=..]` directive.
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub source: H,
}

/// In-memory image to pack (raw name + decoded image).
pub struct InputImage {
    pub name: String,
    pub image: DynamicImage,
}

/// Layout of a run: final atlas, blit list and packing diagnostics.
#[derive(Debug, Clone)]
pub struct PackOutput<H> {
    pub atlas: Atlas<H>,
    pub blits: Vec<Blit<H>>,
    /// Sprites that found no free space. Their placement overlaps the origin.
    pub failures: Vec<PackFailure>,
}

/// Output of [`pack_images`]: layout plus the composed RGBA atlas and its metadata text.
pub struct ImageOutput {
    pub layout: PackOutput<usize>,
    pub rgba: RgbaImage,
    pub metadata: String,
}

/// State of a single packing run.
///
/// Stages run in order: [`PackRun::new`] parses the inputs and sizes the seed
/// space, [`PackRun::estimate`] resets the free spaces to it, [`PackRun::pack`] places sprites and
/// [`PackRun::compose`] finalizes the canvas. Nothing is shared between runs.
#[derive(Debug)]
pub struct PackRun<H> {
    padding: u32,
    /// Sized from the sprites in input order, before any packing sort.
    seed: FreeSpace,
    sprites: Vec<SpriteRect<H>>,
    spaces: Vec<FreeSpace>,
    failures: Vec<PackFailure>,
    packed: bool,
}

impl<H: Clone> PackRun<H> {
    /// Parses every input into a sprite, in input order.
    pub fn new(inputs: Vec<SpriteInput<H>>, cfg: &AtlasConfig) -> Result<Self> {
        if inputs.is_empty() {
            return Err(SpriteAtlasError::Empty);
        }
        let mut sprites = Vec::with_capacity(inputs.len());
        for inp in inputs {
            if inp.width == 0 || inp.height == 0 {
                return Err(SpriteAtlasError::InvalidInput(format!(
                    "sprite '{}' has zero size ({}x{})",
                    inp.name, inp.width, inp.height
                )));
            }
            sprites.push(SpriteRect::parse(&inp.name, inp.width, inp.height, inp.source));
        }
        let padding = cfg.padding();
        let (w, h) = estimate(&sprites, padding, cfg.width_estimate);
        Ok(Self {
            padding,
            seed: seed_space(w, h),
            sprites,
            spaces: Vec::new(),
            failures: Vec::new(),
            packed: false,
        })
    }

    pub fn sprites(&self) -> &[SpriteRect<H>] {
        &self.sprites
    }

    /// Free spaces left after packing (or the seed before it).
    pub fn spaces(&self) -> &[FreeSpace] {
        &self.spaces
    }

    pub fn failures(&self) -> &[PackFailure] {
        &self.failures
    }

    /// Resets the free spaces to the seed and returns it.
    ///
    /// The seed is fixed at construction, so repeated calls (also after
    /// [`PackRun::pack`]) always yield the same space.
    pub fn estimate(&mut self) -> FreeSpace {
        self.spaces = vec![self.seed];
        self.seed
    }

    /// Sorts sprites tallest first (stable) and places them from the seed.
    pub fn pack(&mut self) {
        self.sprites.sort_by(by_height_desc);
        let mut packer = FreeSpacePacker::new(self.seed);
        self.failures = pack_all(&mut packer, &mut self.sprites, self.padding);
        self.spaces = packer.into_spaces();
        self.packed = true;
    }

    /// Computes the canvas extents and blit list for the placed sprites.
    pub fn compose(&self) -> Result<Composition<H>> {
        if !self.packed {
            return Err(SpriteAtlasError::InvalidInput(
                "compose called before pack".into(),
            ));
        }
        compose(&self.sprites)
    }

    /// Consumes the run into its final output.
    pub fn finish(self, cfg: &AtlasConfig) -> Result<PackOutput<H>> {
        let Composition {
            width,
            height,
            blits,
        } = self.compose()?;
        let atlas = Atlas {
            width,
            height,
            sprites: self.sprites,
            meta: Meta::for_image(cfg.image_name()),
        };
        Ok(PackOutput {
            atlas,
            blits,
            failures: self.failures,
        })
    }
}

/// Runs every stage on `inputs` and returns the layout.
///
/// Sprites that do not fit are reported in `failures` and logged; the run
/// still succeeds.
#[instrument(skip_all)]
pub fn pack_sprites<H: Clone>(
    inputs: Vec<SpriteInput<H>>,
    cfg: &AtlasConfig,
) -> Result<PackOutput<H>> {
    cfg.validate()?;
    let mut run = PackRun::new(inputs, cfg)?;
    let seed = run.estimate();
    run.pack();
    let out = run.finish(cfg)?;
    let stats = out.atlas.stats();
    info!(
        sprites = stats.num_sprites,
        seed_w = seed.width,
        seed_h = seed.height,
        width = out.atlas.width,
        height = out.atlas.height,
        failed = out.failures.len(),
        occupancy = format!("{:.2}%", stats.occupancy * 100.0),
        "packed atlas"
    );
    Ok(out)
}

/// Packs sizes only, without pixel data. Inputs are `(raw_name, width, height)`.
pub fn pack_layout<K: Into<String>>(
    inputs: Vec<(K, u32, u32)>,
    cfg: &AtlasConfig,
) -> Result<PackOutput<usize>> {
    let inputs = inputs
        .into_iter()
        .enumerate()
        .map(|(i, (name, width, height))| SpriteInput {
            name: name.into(),
            width,
            height,
            source: i,
        })
        .collect();
    pack_sprites(inputs, cfg)
}

/// Packs decoded images, composes the RGBA atlas and renders the metadata text.
#[instrument(skip_all)]
pub fn pack_images(inputs: Vec<InputImage>, cfg: &AtlasConfig) -> Result<ImageOutput> {
    let sources: Vec<RgbaImage> = inputs.iter().map(|i| i.image.to_rgba8()).collect();
    let sprite_inputs = inputs
        .into_iter()
        .zip(&sources)
        .enumerate()
        .map(|(i, (inp, rgba))| SpriteInput {
            name: inp.name,
            width: rgba.width(),
            height: rgba.height(),
            source: i,
        })
        .collect();
    let layout = pack_sprites(sprite_inputs, cfg)?;
    let mut canvas = RgbaCanvas::new(&sources, layout.atlas.width, layout.atlas.height);
    apply_blits(&layout.blits, &mut canvas);
    let metadata = render(cfg.output_format, &layout.atlas);
    Ok(ImageOutput {
        rgba: canvas.into_image(),
        metadata,
        layout,
    })
}
