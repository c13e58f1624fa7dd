use image::{DynamicImage, Rgba, RgbaImage};
use spriteatlas_core::prelude::*;

fn image(w: u32, h: u32, shade: u8) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba([shade, shade, shade, 255])))
}

fn specs() -> Vec<(&'static str, u32, u32)> {
    vec![
        ("tree.png", 24, 40),
        ("rock [ext=ud].png", 12, 9),
        ("bush [ext=lr].png", 18, 14),
        ("grass [ext=udlr].png", 16, 16),
        ("cloud.png", 40, 12),
    ]
}

#[test]
fn layout_only_matches_image_packing() {
    let cfg = AtlasConfig::builder().output_format(OutputFormat::JsonHash).build();
    let layout = pack_layout(specs(), &cfg).expect("layout");
    let inputs: Vec<InputImage> = specs()
        .into_iter()
        .enumerate()
        .map(|(i, (name, w, h))| InputImage {
            name: name.to_string(),
            image: image(w, h, 40 * i as u8),
        })
        .collect();
    let images = pack_images(inputs, &cfg).expect("images");

    let a = &layout.atlas;
    let b = &images.layout.atlas;
    assert_eq!((a.width, a.height), (b.width, b.height));
    assert_eq!(images.rgba.dimensions(), (a.width, a.height));
    let geo = |atlas: &Atlas| -> Vec<(String, u32, u32)> {
        atlas
            .sprites
            .iter()
            .map(|s| (s.name.clone(), s.pack_x, s.pack_y))
            .collect()
    };
    assert_eq!(geo(a), geo(b));
    assert_eq!(images.metadata, render(cfg.output_format, a));
}

#[test]
fn sprite_bodies_are_copied_verbatim() {
    let cfg = AtlasConfig::default();
    let inputs: Vec<InputImage> = specs()
        .into_iter()
        .enumerate()
        .map(|(i, (name, w, h))| InputImage {
            name: name.to_string(),
            image: image(w, h, 30 + 40 * i as u8),
        })
        .collect();
    let out = pack_images(inputs, &cfg).expect("images");
    for s in &out.layout.atlas.sprites {
        let shade = 30 + 40 * s.source as u8;
        for (x, y) in [(0, 0), (s.width - 1, s.height - 1), (s.width / 2, s.height / 2)] {
            assert_eq!(
                out.rgba.get_pixel(s.pack_x + x, s.pack_y + y).0,
                [shade, shade, shade, 255],
                "{} at ({}, {})",
                s.name,
                x,
                y
            );
        }
    }
}
