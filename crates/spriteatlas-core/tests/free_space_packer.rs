use spriteatlas_core::model::{FreeSpace, SpriteRect};
use spriteatlas_core::packer::free_space::FreeSpacePacker;
use spriteatlas_core::packer::{Packer, by_height_desc, pack_all};
use spriteatlas_core::prelude::*;

fn seed(w: u32, h: u32) -> FreeSpacePacker {
    FreeSpacePacker::new(FreeSpace::new(0, 0, w, h))
}

#[test]
fn exact_fit_consumes_space() {
    let mut p = seed(10, 10);
    assert_eq!(p.place(10, 10), Some((0, 0)));
    assert!(p.spaces().is_empty());
    assert_eq!(p.place(1, 1), None);
}

#[test]
fn height_match_shrinks_rightwards() {
    let mut p = seed(10, 4);
    assert_eq!(p.place(3, 4), Some((0, 0)));
    assert_eq!(p.spaces(), &[FreeSpace::new(3, 0, 7, 4)]);
}

#[test]
fn width_match_shrinks_downwards() {
    let mut p = seed(10, 10);
    assert_eq!(p.place(10, 3), Some((0, 0)));
    assert_eq!(p.spaces(), &[FreeSpace::new(0, 3, 10, 7)]);
}

#[test]
fn general_fit_splits_right_then_down() {
    let mut p = seed(10, 10);
    assert_eq!(p.place(4, 3), Some((0, 0)));
    assert_eq!(
        p.spaces(),
        &[FreeSpace::new(0, 3, 10, 7), FreeSpace::new(4, 0, 6, 3)]
    );

    // the right strip (area 18) is scanned before the remainder (area 70)
    assert_eq!(p.place(5, 3), Some((4, 0)));
    assert!(p.spaces().contains(&FreeSpace::new(9, 0, 1, 3)));
    assert!(p.spaces().contains(&FreeSpace::new(0, 3, 10, 7)));
}

#[test]
fn equal_area_spaces_keep_collection_order() {
    let mut p = seed(4, 3);
    assert_eq!(p.place(2, 2), Some((0, 0)));
    // below = (0,2,4,1) and right = (2,0,2,2) both have area 4; below came first
    assert_eq!(
        p.spaces(),
        &[FreeSpace::new(0, 2, 4, 1), FreeSpace::new(2, 0, 2, 2)]
    );
    assert_eq!(p.place(1, 1), Some((0, 2)));
}

#[test]
fn oversized_footprint_is_rejected_without_mutation() {
    let mut p = seed(8, 8);
    assert_eq!(p.place(9, 1), None);
    assert_eq!(p.place(8, 9), None);
    assert_eq!(p.spaces(), &[FreeSpace::new(0, 0, 8, 8)]);
}

#[test]
fn extrusion_offsets_body_inside_slot() {
    let mut sprites = vec![SpriteRect::parse("s [ext=ul]", 10, 10, ())];
    let mut p = seed(32, 32);
    let failures = pack_all(&mut p, &mut sprites, 1);
    assert!(failures.is_empty());
    assert_eq!((sprites[0].pack_x, sprites[0].pack_y), (1, 1));
    assert!(sprites[0].placed);
}

#[test]
fn unplaced_sprite_is_reported_and_left_at_origin() {
    let mut sprites = vec![
        SpriteRect::parse("first", 8, 8, ()),
        SpriteRect::parse("second [ext=lr]", 8, 8, ()),
    ];
    let mut p = seed(10, 10);
    let failures = pack_all(&mut p, &mut sprites, 0);
    assert_eq!(
        failures,
        vec![PackFailure {
            name: "second".into(),
            total_width: 10,
            total_height: 8,
        }]
    );
    assert!(sprites[0].placed);
    assert!(!sprites[1].placed);
    assert_eq!((sprites[1].pack_x, sprites[1].pack_y), (0, 0));
}

#[test]
fn height_sort_is_stable() {
    let mut sprites = vec![
        SpriteRect::parse("a", 5, 10, ()),
        SpriteRect::parse("b", 50, 20, ()),
        SpriteRect::parse("c", 7, 10, ()),
        SpriteRect::parse("d", 1, 20, ()),
    ];
    sprites.sort_by(by_height_desc);
    let names: Vec<&str> = sprites.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["b", "d", "a", "c"]);
}

#[test]
fn three_squares_scenario() {
    let cfg = AtlasConfig::builder().add_padding(false).build();
    let out = pack_layout(vec![("big", 64, 64), ("a", 32, 32), ("b", 32, 32)], &cfg)
        .expect("pack");
    assert!(out.failures.is_empty());
    let pos: Vec<(&str, u32, u32)> = out
        .atlas
        .sprites
        .iter()
        .map(|s| (s.name.as_str(), s.pack_x, s.pack_y))
        .collect();
    assert_eq!(pos, [("big", 0, 0), ("a", 0, 64), ("b", 32, 64)]);
    assert_eq!((out.atlas.width, out.atlas.height), (64, 96));
}

#[test]
fn staged_run_exposes_seed_and_leftover_spaces() {
    let cfg = AtlasConfig::builder().add_padding(false).build();
    let inputs = vec![
        SpriteInput {
            name: "big".into(),
            width: 64,
            height: 64,
            source: 0usize,
        },
        SpriteInput {
            name: "small".into(),
            width: 32,
            height: 32,
            source: 1usize,
        },
    ];
    let mut run = PackRun::new(inputs, &cfg).expect("run");
    assert!(run.compose().is_err(), "compose requires a packed run");
    let seed = run.estimate();
    // area 5120 -> ceil(sqrt(5120 / 0.95)) = 74
    assert_eq!(seed, FreeSpace::new(0, 0, 74, 148));
    run.pack();
    assert!(run.failures().is_empty());
    assert!(run.sprites().iter().all(|s| s.placed));
    assert!(!run.spaces().is_empty());
    let comp = run.compose().expect("compose");
    assert_eq!((comp.width, comp.height), (64, 96));
    assert_eq!(comp.blits.len(), 2);
}
