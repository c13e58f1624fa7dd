use crate::model::Atlas;

/// One class per sprite, positioning the shared atlas image as a background.
pub fn to_css<H>(atlas: &Atlas<H>) -> String {
    let mut s = format!("/* {} */\n", atlas.meta.version.replace("*/", "* /"));
    let image = atlas.meta.image.replace(['\'', '\\'], "_");
    for sp in &atlas.sprites {
        s.push_str(&format!(
            ".{} {{\n\tbackground: url('{}') no-repeat -{}px -{}px;\n\twidth: {}px;\n\theight: {}px;\n}}\n",
            css_class_name(&sp.name),
            image,
            sp.pack_x,
            sp.pack_y,
            sp.width,
            sp.height,
        ));
    }
    s
}

/// Turns a sprite name into a CSS class name.
///
/// ASCII letters are lower-cased, `[a-z0-9_-]` are kept and every run of other
/// characters collapses into a single `_`. Names starting with a digit get a
/// `_` prefix.
pub fn css_class_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_run = false;
    for c in name.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_' {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}
