use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Metadata formats the exporters can render.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// TexturePacker-style JSON with a `frames` array.
    JsonArray,
    /// TexturePacker-style JSON with `frames` keyed by sprite name.
    JsonHash,
    /// libGDX TextureAtlas plain text (`.atlas`).
    #[serde(rename = "libgdx")]
    LibGdx,
    /// One CSS class per sprite.
    Css,
    /// `TextureAtlas` / `SubTexture` XML.
    Xml,
}

impl OutputFormat {
    /// File extension of the metadata artifact (without the dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::JsonArray | OutputFormat::JsonHash => "json",
            OutputFormat::LibGdx => "atlas",
            OutputFormat::Css => "css",
            OutputFormat::Xml => "xml",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json-array" | "json" | "jsonarray" => Ok(Self::JsonArray),
            "json-hash" | "jsonhash" => Ok(Self::JsonHash),
            "libgdx" | "atlas" => Ok(Self::LibGdx),
            "css" => Ok(Self::Css),
            "xml" => Ok(Self::Xml),
            _ => Err(()),
        }
    }
}

/// How the canvas estimator tracks the widest sprite.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WidthEstimate {
    /// `max_w = max(total_w + pad, max_w + pad)` per sprite, so the padding unit
    /// accumulates once per sprite. Reproduces the historical canvas sizes.
    Accumulate,
    /// Plain running maximum of `total_w + pad`.
    RunningMax,
}

impl FromStr for WidthEstimate {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "accumulate" => Ok(Self::Accumulate),
            "running_max" | "max" => Ok(Self::RunningMax),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasConfig {
    /// Base name of the artifacts; the atlas image is referenced as `<file_tag>.png`.
    #[serde(default = "default_file_tag")]
    pub file_tag: String,
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,
    /// Keep one pixel between packed sprites.
    #[serde(default = "default_add_padding")]
    pub add_padding: bool,
    #[serde(default = "default_width_estimate")]
    pub width_estimate: WidthEstimate,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            file_tag: default_file_tag(),
            output_format: default_output_format(),
            add_padding: default_add_padding(),
            width_estimate: default_width_estimate(),
        }
    }
}

impl AtlasConfig {
    /// Padding unit applied between sprite footprints (0 or 1).
    pub fn padding(&self) -> u32 {
        if self.add_padding { 1 } else { 0 }
    }

    /// File name of the atlas image as referenced from the metadata.
    pub fn image_name(&self) -> String {
        format!("{}.png", self.file_tag)
    }

    /// File name of the metadata artifact for the selected format.
    pub fn metadata_name(&self) -> String {
        format!("{}.{}", self.file_tag, self.output_format.extension())
    }

    /// Validates the configuration parameters.
    ///
    /// Returns an error if the file tag is empty or would escape the output directory.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::SpriteAtlasError;

        if self.file_tag.trim().is_empty() {
            return Err(SpriteAtlasError::InvalidConfig(
                "file_tag must not be empty".into(),
            ));
        }
        if self.file_tag.contains(['/', '\\']) {
            return Err(SpriteAtlasError::InvalidConfig(format!(
                "file_tag ({}) must not contain path separators",
                self.file_tag
            )));
        }
        Ok(())
    }
}

fn default_file_tag() -> String {
    "sprites".into()
}
fn default_output_format() -> OutputFormat {
    OutputFormat::JsonArray
}
fn default_add_padding() -> bool {
    true
}
fn default_width_estimate() -> WidthEstimate {
    WidthEstimate::Accumulate
}

/// Builder for `AtlasConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct AtlasConfigBuilder {
    cfg: AtlasConfig,
}

impl AtlasConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: AtlasConfig::default(),
        }
    }
    pub fn file_tag(mut self, v: impl Into<String>) -> Self {
        self.cfg.file_tag = v.into();
        self
    }
    pub fn output_format(mut self, v: OutputFormat) -> Self {
        self.cfg.output_format = v;
        self
    }
    pub fn add_padding(mut self, v: bool) -> Self {
        self.cfg.add_padding = v;
        self
    }
    pub fn width_estimate(mut self, v: WidthEstimate) -> Self {
        self.cfg.width_estimate = v;
        self
    }
    pub fn build(self) -> AtlasConfig {
        self.cfg
    }
}

impl AtlasConfig {
    /// Create a fluent builder for `AtlasConfig`.
    pub fn builder() -> AtlasConfigBuilder {
        AtlasConfigBuilder::new()
    }
}
