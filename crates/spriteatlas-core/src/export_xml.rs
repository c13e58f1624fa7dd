use crate::model::Atlas;

/// Starling/Sparrow style `TextureAtlas` document.
pub fn to_xml<H>(atlas: &Atlas<H>) -> String {
    let mut s = format!(
        "<TextureAtlas imagePath=\"{}\">\n\t<!-- {} -->\n",
        xml_escape(&atlas.meta.image),
        atlas.meta.version.replace("--", "- -"),
    );
    for sp in &atlas.sprites {
        s.push_str(&format!(
            "\t<SubTexture name=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/>\n",
            xml_escape(&sp.name),
            sp.pack_x,
            sp.pack_y,
            sp.width,
            sp.height,
        ));
    }
    s.push_str("</TextureAtlas>\n");
    s
}

pub fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
