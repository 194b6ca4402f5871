//! Sketch options.
//!
//! Options come from `data-*` attributes on the host container or from a
//! plain options object passed to `SketchHandle::create`. Both paths go
//! through [`SketchConfig::from_attributes`], which takes a lookup function so
//! the parsing can be exercised off-browser.

use crate::error::ConfigError;

/// Which of the two sketch flavours to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// `time` plus a fixed `resolution` vector.
    #[default]
    Basic,
    /// Adds the `uProgress` slider, a texture and fixed size vectors.
    Progress,
}

impl Variant {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "basic" | "" => Ok(Variant::Basic),
            "progress" => Ok(Variant::Progress),
            other => Err(ConfigError::UnknownVariant(other.to_string())),
        }
    }
}

/// Plane dimensions in world units and its subdivision counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneSpec {
    pub width: f32,
    pub height: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for PlaneSpec {
    fn default() -> Self {
        Self {
            width: 200.0,
            height: 200.0,
            width_segments: 100,
            height_segments: 100,
        }
    }
}

/// Everything needed to build one sketch instance.
#[derive(Debug, Clone, PartialEq)]
pub struct SketchConfig {
    pub variant: Variant,
    pub wireframe: bool,
    /// Drag to orbit, wheel to zoom.
    pub controls: bool,
    pub plane: PlaneSpec,
    /// Image bound to `uTexture` in the progress variant.
    pub texture_url: String,
    /// Fixed `uTextureSize` vector.
    pub texture_size: [f32; 2],
    /// Fixed `resolution` / `uResolution` vector.
    pub resolution: [f32; 2],
    /// Overrides the host's device pixel ratio when set.
    pub pixel_ratio: Option<f64>,
    pub log_level: log::Level,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self::for_variant(Variant::Basic)
    }
}

impl SketchConfig {
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            wireframe: variant == Variant::Basic,
            controls: true,
            plane: PlaneSpec::default(),
            texture_url: "textures/pattern.svg".to_string(),
            texture_size: [512.0, 512.0],
            resolution: match variant {
                Variant::Basic => [0.0, 0.0],
                Variant::Progress => [200.0, 200.0],
            },
            pixel_ratio: None,
            log_level: log::Level::Info,
        }
    }

    /// Builds a config from string attributes.
    ///
    /// Recognised keys: `variant`, `wireframe`, `controls`, `texture`,
    /// `pixel-ratio`, `log-level`. Missing keys keep the variant's defaults.
    pub fn from_attributes<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let variant = match lookup("variant") {
            Some(v) => Variant::parse(&v)?,
            None => Variant::Basic,
        };
        let mut config = Self::for_variant(variant);

        if let Some(v) = lookup("wireframe") {
            config.wireframe = parse_bool("wireframe", &v)?;
        }
        if let Some(v) = lookup("controls") {
            config.controls = parse_bool("controls", &v)?;
        }
        if let Some(v) = lookup("texture") {
            if !v.trim().is_empty() {
                config.texture_url = v.trim().to_string();
            }
        }
        if let Some(v) = lookup("pixel-ratio") {
            let ratio: f64 = v.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                key: "pixel-ratio",
                value: v.clone(),
            })?;
            if !(ratio.is_finite() && ratio > 0.0) {
                return Err(ConfigError::InvalidNumber {
                    key: "pixel-ratio",
                    value: v,
                });
            }
            config.pixel_ratio = Some(ratio);
        }
        if let Some(v) = lookup("log-level") {
            config.log_level = v
                .trim()
                .parse()
                .map_err(|_| ConfigError::UnknownLogLevel(v.clone()))?;
        }

        Ok(config)
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: value.to_string(),
        }),
    }
}
