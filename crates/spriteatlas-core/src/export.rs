use crate::config::OutputFormat;
use crate::model::{Atlas, SpriteRect};
use serde_json::{Map, Value, json};

/// Renders the metadata text for `format`.
pub fn render<H>(format: OutputFormat, atlas: &Atlas<H>) -> String {
    match format {
        OutputFormat::JsonArray => to_pretty(&to_json_array(atlas)),
        OutputFormat::JsonHash => to_pretty(&to_json_hash(atlas)),
        OutputFormat::LibGdx => crate::export_libgdx::to_libgdx(atlas),
        OutputFormat::Css => crate::export_css::to_css(atlas),
        OutputFormat::Xml => crate::export_xml::to_xml(atlas),
    }
}

fn to_pretty(v: &Value) -> String {
    // Serializing a `Value` cannot fail: all keys are strings.
    serde_json::to_string_pretty(v).unwrap_or_default()
}

/// Per-sprite fields shared by both JSON layouts.
fn frame_fields<H>(s: &SpriteRect<H>) -> Map<String, Value> {
    let mut m = Map::new();
    m.insert(
        "frame".into(),
        json!({"x": s.pack_x, "y": s.pack_y, "w": s.width, "h": s.height}),
    );
    m.insert("rotated".into(), json!(false));
    m.insert("trimmed".into(), json!(false));
    m.insert(
        "spriteSourceSize".into(),
        json!({"x": 0, "y": 0, "w": s.width, "h": s.height}),
    );
    m.insert("sourceSize".into(), json!({"w": s.width, "h": s.height}));
    m
}

fn meta_value<H>(atlas: &Atlas<H>) -> Value {
    json!({
        "app": atlas.meta.app,
        "version": atlas.meta.version,
        "image": atlas.meta.image,
        "size": {"w": atlas.width, "h": atlas.height},
        "scale": atlas.meta.scale,
    })
}

/// TexturePacker-style JSON array.
/// Shape: `{ frames: [ { filename, frame, rotated, trimmed, spriteSourceSize, sourceSize } ], meta }`.
pub fn to_json_array<H>(atlas: &Atlas<H>) -> Value {
    let frames: Vec<Value> = atlas
        .sprites
        .iter()
        .map(|s| {
            let mut m = Map::new();
            m.insert("filename".into(), json!(s.name));
            m.extend(frame_fields(s));
            Value::Object(m)
        })
        .collect();
    json!({ "frames": frames, "meta": meta_value(atlas) })
}

/// Same per-sprite fields as [`to_json_array`], keyed by sprite name.
/// A repeated name keeps the last sprite, matching how JSON readers resolve duplicate keys.
pub fn to_json_hash<H>(atlas: &Atlas<H>) -> Value {
    let mut frames = Map::new();
    for s in &atlas.sprites {
        frames.insert(s.name.clone(), Value::Object(frame_fields(s)));
    }
    json!({ "frames": frames, "meta": meta_value(atlas) })
}
