use spriteatlas_core::model::{Extrude, SpriteRect};
use spriteatlas_core::sprite::parse_name;

#[test]
fn directive_sets_up_and_down() {
    let s = SpriteRect::parse("box [ext=UD].png", 16, 8, ());
    assert_eq!(s.name, "box");
    assert!(s.extrude.up);
    assert!(s.extrude.down);
    assert!(!s.extrude.left);
    assert!(!s.extrude.right);
    assert_eq!((s.total_width, s.total_height), (16, 10));
}

#[test]
fn all_sides_add_one_pixel_each() {
    let s = SpriteRect::parse("tile [ext=udlr]", 10, 10, ());
    assert_eq!(s.extrude, Extrude::ALL);
    assert_eq!((s.width, s.height), (10, 10));
    assert_eq!((s.total_width, s.total_height), (12, 12));
    assert_eq!((s.pack_x, s.pack_y), (0, 0));
    assert!(!s.placed);
}

#[test]
fn letters_may_appear_anywhere_and_repeat() {
    let (name, e) = parse_name("pipe[ext=rludx].jpg");
    assert_eq!(name, "pipe");
    assert_eq!(e, Extrude::ALL);

    let (name, e) = parse_name("wall [  EXT=Ll  ]");
    assert_eq!(name, "wall");
    assert_eq!(
        e,
        Extrude {
            left: true,
            ..Extrude::NONE
        }
    );
}

#[test]
fn extension_stripping_is_case_sensitive() {
    assert_eq!(parse_name("hero.png").0, "hero");
    assert_eq!(parse_name("hero.jpg").0, "hero");
    assert_eq!(parse_name("hero.PNG").0, "hero.PNG");
    assert_eq!(parse_name("hero.gif").0, "hero.gif");
    // only one extension is removed
    assert_eq!(parse_name("hero.png.png").0, "hero.png");
}

#[test]
fn malformed_brackets_keep_full_name() {
    let (name, e) = parse_name("a ]b[.png");
    assert_eq!(name, "a ]b[");
    assert_eq!(e, Extrude::NONE);

    let (name, e) = parse_name("open [ext=ud");
    assert_eq!(name, "open [ext=ud");
    assert_eq!(e, Extrude::NONE);
}

#[test]
fn other_bracket_content_only_trims_the_name() {
    let (name, e) = parse_name("coin [pad=2].png");
    assert_eq!(name, "coin");
    assert_eq!(e, Extrude::NONE);

    let (name, e) = parse_name("coin [ext=]");
    assert_eq!(name, "coin");
    assert!(!e.any());
}
