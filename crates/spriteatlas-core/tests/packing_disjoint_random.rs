use rand::{Rng, SeedableRng};
use spriteatlas_core::prelude::*;

fn random_inputs(seed: u64, count: usize) -> Vec<(String, u32, u32)> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let sides = ["", "u", "d", "l", "r", "ud", "lr", "udlr", "dl"];
    (0..count)
        .map(|i| {
            let w = rng.gen_range(1..=48);
            let h = rng.gen_range(1..=48);
            let ext = sides[rng.gen_range(0..sides.len())];
            let name = if ext.is_empty() {
                format!("s{}.png", i)
            } else {
                format!("s{} [ext={}].png", i, ext)
            };
            (name, w, h)
        })
        .collect()
}

fn assert_disjoint(atlas: &Atlas) {
    let sprites = &atlas.sprites;
    for i in 0..sprites.len() {
        for j in (i + 1)..sprites.len() {
            let a = sprites[i].footprint();
            let b = sprites[j].footprint();
            assert!(
                !a.overlaps(&b),
                "{} {:?} overlaps {} {:?}",
                sprites[i].name,
                a,
                sprites[j].name,
                b
            );
        }
    }
}

#[test]
fn random_sets_pack_without_overlap() {
    for seed in [1u64, 7, 42, 1234] {
        for padding in [false, true] {
            let cfg = AtlasConfig::builder().add_padding(padding).build();
            let out = pack_layout(random_inputs(seed, 150), &cfg).expect("pack");
            assert!(
                out.failures.is_empty(),
                "seed {} padding {}: {:?}",
                seed,
                padding,
                out.failures
            );
            assert_disjoint(&out.atlas);
        }
    }
}

#[test]
fn padding_keeps_a_gap_between_footprints() {
    let cfg = AtlasConfig::builder().add_padding(true).build();
    let out = pack_layout(random_inputs(99, 80), &cfg).expect("pack");
    let slots: Vec<Rect> = out
        .atlas
        .sprites
        .iter()
        .map(|s| {
            let f = s.footprint();
            Rect::new(f.x, f.y, f.w + 1, f.h + 1)
        })
        .collect();
    for i in 0..slots.len() {
        for j in (i + 1)..slots.len() {
            assert!(!slots[i].overlaps(&slots[j]));
        }
    }
}

#[test]
fn packing_is_repeatable() {
    let cfg = AtlasConfig::default();
    let a = pack_layout(random_inputs(5, 120), &cfg).expect("pack a");
    let b = pack_layout(random_inputs(5, 120), &cfg).expect("pack b");
    assert_eq!((a.atlas.width, a.atlas.height), (b.atlas.width, b.atlas.height));
    assert_eq!(a.atlas.sprites.len(), b.atlas.sprites.len());
    for (x, y) in a.atlas.sprites.iter().zip(b.atlas.sprites.iter()) {
        assert_eq!(x.name, y.name);
        assert_eq!((x.pack_x, x.pack_y), (y.pack_x, y.pack_y));
    }
}

#[test]
fn canvas_is_tight_bounding_box() {
    let cfg = AtlasConfig::default();
    let out = pack_layout(random_inputs(11, 60), &cfg).expect("pack");
    let w = out.atlas.sprites.iter().map(|s| s.footprint().x2()).max();
    let h = out.atlas.sprites.iter().map(|s| s.footprint().y2()).max();
    assert_eq!(w, Some(out.atlas.width));
    assert_eq!(h, Some(out.atlas.height));
}
